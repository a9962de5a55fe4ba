//! # iw-app
//!
//! Application layer for Inkwise: use cases coordinating the domain models
//! of `iw-core` with whatever stands behind the ports. Holds the per-record
//! transition guard and the upload session driver; contains no storage and
//! no presentation.

pub mod usecases;

pub use usecases::internal::{ConcurrentTransitionError, TransitionGuard};
pub use usecases::*;
