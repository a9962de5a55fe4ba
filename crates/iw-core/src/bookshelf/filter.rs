//! Bookshelf filter.
//!
//! A filter is pure data plus a pure matcher; it is re-evaluated freely on
//! every render over a snapshot of the collection.

use serde::{Deserialize, Serialize};

use crate::manuscript::{Manuscript, ManuscriptStatus};

/// Filter over the bookshelf.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookshelfFilter {
    /// Case-insensitive substring, matched against title OR author.
    pub text: Option<String>,
    /// Exact status match.
    pub status: Option<ManuscriptStatus>,
}

impl BookshelfFilter {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            status: None,
        }
    }

    pub fn status(status: ManuscriptStatus) -> Self {
        Self {
            text: None,
            status: Some(status),
        }
    }

    /// Whether this filter matches everything.
    pub fn is_empty(&self) -> bool {
        self.text.as_deref().map_or(true, str::is_empty) && self.status.is_none()
    }

    pub fn matches(&self, manuscript: &Manuscript) -> bool {
        if let Some(status) = self.status {
            if manuscript.status != status {
                return false;
            }
        }

        match self.text.as_deref() {
            None | Some("") => true,
            Some(needle) => {
                let needle = needle.to_lowercase();
                manuscript.title.to_lowercase().contains(&needle)
                    || manuscript.author.to_lowercase().contains(&needle)
            }
        }
    }
}
