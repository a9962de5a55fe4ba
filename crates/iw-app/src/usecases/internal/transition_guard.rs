//! Per-record transition locking.
//!
//! At most one lifecycle transition may be in flight per manuscript. A
//! second attempt while one is pending fails fast instead of queueing, so
//! e.g. a completion can never race a delete on the same record.

use std::collections::HashSet;
use std::sync::{Arc, Mutex};

use iw_core::ids::ManuscriptId;

/// A second transition was attempted while one was pending on the record.
/// Retry after the in-flight transition resolves.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("another transition is already in flight for manuscript {id}")]
pub struct ConcurrentTransitionError {
    pub id: ManuscriptId,
}

/// Tracks which records currently have a transition in flight.
///
/// The inner mutex is a plain `std::sync::Mutex`: it is never held across an
/// await point, only for set membership updates.
#[derive(Debug, Clone, Default)]
pub struct TransitionGuard {
    in_flight: Arc<Mutex<HashSet<ManuscriptId>>>,
}

/// Held for the duration of one transition; releases the record on drop.
#[derive(Debug)]
pub struct TransitionPermit {
    id: ManuscriptId,
    in_flight: Arc<Mutex<HashSet<ManuscriptId>>>,
}

impl TransitionGuard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn acquire(
        &self,
        id: &ManuscriptId,
    ) -> Result<TransitionPermit, ConcurrentTransitionError> {
        let mut in_flight = self.in_flight.lock().expect("transition guard poisoned");
        if !in_flight.insert(id.clone()) {
            return Err(ConcurrentTransitionError { id: id.clone() });
        }
        Ok(TransitionPermit {
            id: id.clone(),
            in_flight: Arc::clone(&self.in_flight),
        })
    }
}

impl Drop for TransitionPermit {
    fn drop(&mut self) {
        let mut in_flight = self.in_flight.lock().expect("transition guard poisoned");
        in_flight.remove(&self.id);
    }
}
