use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::manuscript::Manuscript;

/// Sort keys the bookshelf offers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum BookshelfSort {
    /// `last_analyzed` descending, never-analyzed last,
    /// ties broken by `uploaded_at` descending.
    #[default]
    RecentlyAnalyzed,
    /// Title, case-insensitive ascending.
    TitleAz,
    /// `word_count` descending.
    WordCountHigh,
    /// Lexicographic on the status string.
    Status,
    /// `uploaded_at` descending.
    UploadDate,
}

impl BookshelfSort {
    pub fn compare(self, a: &Manuscript, b: &Manuscript) -> Ordering {
        match self {
            Self::RecentlyAnalyzed => match (a.last_analyzed, b.last_analyzed) {
                (Some(ta), Some(tb)) => tb
                    .cmp(&ta)
                    .then_with(|| b.uploaded_at.cmp(&a.uploaded_at)),
                (Some(_), None) => Ordering::Less,
                (None, Some(_)) => Ordering::Greater,
                (None, None) => b.uploaded_at.cmp(&a.uploaded_at),
            },
            Self::TitleAz => a.title.to_lowercase().cmp(&b.title.to_lowercase()),
            Self::WordCountHigh => b.word_count.cmp(&a.word_count),
            Self::Status => a.status.as_str().cmp(b.status.as_str()),
            Self::UploadDate => b.uploaded_at.cmp(&a.uploaded_at),
        }
    }
}
