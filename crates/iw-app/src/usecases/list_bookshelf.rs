use std::sync::Arc;

use iw_core::bookshelf::{query, BookshelfFilter, BookshelfSort};
use iw_core::manuscript::Manuscript;
use iw_core::ports::{ManuscriptRepositoryPort, RepositoryError};

/// Use case for listing the bookshelf.
///
/// Takes a snapshot of the collection and runs the pure filter/sort over
/// it; no locking, safe to call on every render.
pub struct ListBookshelf {
    repo: Arc<dyn ManuscriptRepositoryPort>,
}

impl ListBookshelf {
    pub fn from_ports(repo: Arc<dyn ManuscriptRepositoryPort>) -> Self {
        Self { repo }
    }

    #[tracing::instrument(name = "usecase.list_bookshelf.execute", skip_all)]
    pub async fn execute(
        &self,
        filter: &BookshelfFilter,
        sort: BookshelfSort,
    ) -> Result<Vec<Manuscript>, RepositoryError> {
        let snapshot = self.repo.list().await?;
        Ok(query(&snapshot, filter, sort))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::usecases::tests::support::InMemoryRepo;

    #[tokio::test]
    async fn test_lists_snapshot_sorted() {
        let repo = Arc::new(InMemoryRepo::default());
        let a = repo.seed_awaiting().await;
        let b = repo.seed_awaiting().await;

        let uc = ListBookshelf::from_ports(repo);
        let shelf = uc
            .execute(&BookshelfFilter::default(), BookshelfSort::TitleAz)
            .await
            .unwrap();

        assert_eq!(shelf.len(), 2);
        let ids: Vec<_> = shelf.iter().map(|m| m.id.clone()).collect();
        assert!(ids.contains(&a.id) && ids.contains(&b.id));
    }

    #[tokio::test]
    async fn test_filter_narrows_results() {
        let repo = Arc::new(InMemoryRepo::default());
        repo.seed_awaiting().await;

        let uc = ListBookshelf::from_ports(repo);
        let shelf = uc
            .execute(&BookshelfFilter::text("no such author"), BookshelfSort::TitleAz)
            .await
            .unwrap();
        assert!(shelf.is_empty());
    }
}
