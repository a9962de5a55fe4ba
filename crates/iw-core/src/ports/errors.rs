use thiserror::Error;

#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("manuscript not found")]
    NotFound,

    #[error("storage error: {0}")]
    Storage(String),
}
