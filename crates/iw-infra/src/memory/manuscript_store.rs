use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::debug;

use iw_core::ids::ManuscriptId;
use iw_core::manuscript::Manuscript;
use iw_core::ports::{ManuscriptRepositoryPort, RepositoryError};

/// In-memory manuscript repository.
///
/// The product has no backend; the bookshelf lives for the session. Reads
/// hand out clones, so callers always operate on snapshots.
#[derive(Default)]
pub struct MemoryManuscriptStore {
    records: RwLock<HashMap<ManuscriptId, Manuscript>>,
}

impl MemoryManuscriptStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ManuscriptRepositoryPort for MemoryManuscriptStore {
    async fn get(&self, id: &ManuscriptId) -> Result<Option<Manuscript>, RepositoryError> {
        Ok(self.records.read().await.get(id).cloned())
    }

    async fn insert(&self, manuscript: Manuscript) -> Result<(), RepositoryError> {
        let mut records = self.records.write().await;
        records.insert(manuscript.id.clone(), manuscript);
        Ok(())
    }

    async fn update(&self, manuscript: Manuscript) -> Result<(), RepositoryError> {
        let mut records = self.records.write().await;
        if !records.contains_key(&manuscript.id) {
            return Err(RepositoryError::NotFound);
        }
        records.insert(manuscript.id.clone(), manuscript);
        Ok(())
    }

    async fn delete(&self, id: &ManuscriptId) -> Result<(), RepositoryError> {
        // idempotent: removing an unknown id is a quiet no-op
        let removed = self.records.write().await.remove(id).is_some();
        debug!(manuscript_id = %id, removed, "delete");
        Ok(())
    }

    async fn list(&self) -> Result<Vec<Manuscript>, RepositoryError> {
        Ok(self.records.read().await.values().cloned().collect())
    }
}
