//! Bookshelf queries.
//!
//! Pure functions over a snapshot of the manuscript collection; no locking,
//! safe to recompute on every render.

mod filter;
mod sort;

pub use filter::BookshelfFilter;
pub use sort::BookshelfSort;

use crate::manuscript::Manuscript;

/// Filter then sort a snapshot of the collection.
pub fn query(
    records: &[Manuscript],
    filter: &BookshelfFilter,
    sort: BookshelfSort,
) -> Vec<Manuscript> {
    let mut shelf: Vec<Manuscript> = records
        .iter()
        .filter(|m| filter.matches(m))
        .cloned()
        .collect();
    shelf.sort_by(|a, b| sort.compare(a, b));
    shelf
}
