use crate::ids::ManuscriptId;
use crate::manuscript::Manuscript;
use crate::ports::errors::RepositoryError;

/// Storage for manuscript records.
///
/// `delete` is idempotent: removing an id that is not on file is a no-op,
/// which keeps retry semantics trivial for callers.
#[async_trait::async_trait]
pub trait ManuscriptRepositoryPort: Send + Sync {
    async fn get(&self, id: &ManuscriptId) -> Result<Option<Manuscript>, RepositoryError>;
    async fn insert(&self, manuscript: Manuscript) -> Result<(), RepositoryError>;
    /// Replaces the stored record; `NotFound` if it was never inserted.
    async fn update(&self, manuscript: Manuscript) -> Result<(), RepositoryError>;
    async fn delete(&self, id: &ManuscriptId) -> Result<(), RepositoryError>;
    /// Snapshot of the whole collection, unordered.
    async fn list(&self) -> Result<Vec<Manuscript>, RepositoryError>;
}
