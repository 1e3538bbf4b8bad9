//! Transient filter criteria over the in-memory collection
//!
//! Criteria are UI state, never persisted. All active criteria must hold
//! simultaneously for a book to survive filtering; a criterion left empty
//! matches everything.

use crate::models::{Book, Genre, ReadingStatus};
use serde::{Deserialize, Serialize};

/// Filter criteria: free-text search plus genre and status selectors.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterCriteria {
    /// Case-insensitive substring matched against title or author
    pub search: String,
    /// Exact genre match when set
    pub genre: Option<Genre>,
    /// Exact reading status match when set
    pub status: Option<ReadingStatus>,
}

impl FilterCriteria {
    /// Criteria matching every book.
    pub fn empty() -> Self {
        Self::default()
    }

    /// True when no criterion is active.
    pub fn is_empty(&self) -> bool {
        self.search.trim().is_empty() && self.genre.is_none() && self.status.is_none()
    }

    /// Replace the search text.
    pub fn set_search(&mut self, search: impl Into<String>) {
        self.search = search.into();
    }

    /// Toggle a genre chip.
    ///
    /// Clicking the active genre clears the genre filter; clicking any other
    /// genre replaces it. Only one genre is active at a time.
    pub fn toggle_genre(&mut self, genre: Genre) {
        if self.genre == Some(genre) {
            self.genre = None;
        } else {
            self.genre = Some(genre);
        }
    }

    /// Set or clear the reading status filter.
    pub fn set_status(&mut self, status: Option<ReadingStatus>) {
        self.status = status;
    }

    /// Clear all criteria.
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Whether a book satisfies every active criterion.
    pub fn matches(&self, book: &Book) -> bool {
        let search = self.search.trim().to_lowercase();
        let matches_search = search.is_empty()
            || book.title.to_lowercase().contains(&search)
            || book.author.to_lowercase().contains(&search);

        let matches_genre = self.genre.map_or(true, |g| book.genre == g);
        let matches_status = self.status.map_or(true, |s| book.reading_status == s);

        matches_search && matches_genre && matches_status
    }
}
