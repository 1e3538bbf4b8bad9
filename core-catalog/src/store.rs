//! Book store trait and sort specification
//!
//! The remote entity store is an external collaborator; this module defines
//! the interface connectors implement and the error taxonomy the rest of the
//! core reasons about.

use crate::models::{Book, BookFields, BookId};
use async_trait::async_trait;
use thiserror::Error;

/// Attribute a listing can be ordered by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKey {
    UpdatedDate,
    CreatedDate,
    Title,
}

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Ascending,
    Descending,
}

/// Sort specification for list requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortSpec {
    pub key: SortKey,
    pub direction: SortDirection,
}

impl SortSpec {
    /// Most-recently-updated first, the collection view's default ordering.
    pub fn recently_updated() -> Self {
        Self {
            key: SortKey::UpdatedDate,
            direction: SortDirection::Descending,
        }
    }
}

impl Default for SortSpec {
    fn default() -> Self {
        Self::recently_updated()
    }
}

/// Errors surfaced by a book store implementation.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Book store unavailable: {0}")]
    Unavailable(String),

    #[error("Book not found in store: {id}")]
    NotFound { id: String },

    #[error("Invalid store response: {0}")]
    InvalidResponse(String),
}

pub type Result<T> = std::result::Result<T, StoreError>;

/// Remote book store interface.
///
/// The store owns persistence, id assignment, and timestamps. There is no
/// delete operation on this surface.
#[async_trait]
pub trait BookStore: Send + Sync {
    /// Fetch the full book list in the requested order.
    async fn list(&self, sort: SortSpec) -> Result<Vec<Book>>;

    /// Persist a new book.
    ///
    /// The store assigns the id and timestamps of the returned record.
    async fn create(&self, fields: &BookFields) -> Result<Book>;

    /// Replace an existing book record in full.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::NotFound` when no record has the given id.
    async fn update(&self, id: &BookId, fields: &BookFields) -> Result<Book>;
}
