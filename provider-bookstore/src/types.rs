//! Entity API wire types
//!
//! Data structures for the remote store's Book entity endpoints. The wire
//! shape is kept separate from the domain model; the connector converts
//! between the two.

use core_catalog::{BookFields, Genre, ReadingStatus};
use serde::{Deserialize, Serialize};

/// Book entity resource as returned by the store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookResource {
    /// Store-assigned identifier
    pub id: String,

    /// Book title
    pub title: String,

    /// Author name
    pub author: String,

    /// Genre wire value
    pub genre: Genre,

    /// Publication year
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub publication_year: Option<i32>,

    /// Free-text description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Reading progress wire value
    pub reading_status: ReadingStatus,

    /// Rating from 1 to 5
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<i32>,

    /// Page count
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pages: Option<i32>,

    /// ISBN
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub isbn: Option<String>,

    /// Creation time (RFC 3339, store-owned)
    pub created_date: String,

    /// Last update time (RFC 3339, store-owned)
    pub updated_date: String,
}

/// Create/update request body for a Book entity.
///
/// Identifier and timestamps are omitted; the store owns both.
#[derive(Debug, Clone, Serialize)]
pub struct BookPayload {
    pub title: String,
    pub author: String,
    pub genre: Genre,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub publication_year: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub reading_status: ReadingStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rating: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pages: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub isbn: Option<String>,
}

impl From<&BookFields> for BookPayload {
    fn from(fields: &BookFields) -> Self {
        Self {
            title: fields.title.clone(),
            author: fields.author.clone(),
            genre: fields.genre,
            publication_year: fields.publication_year,
            description: fields.description.clone(),
            reading_status: fields.reading_status,
            rating: fields.rating,
            pages: fields.pages,
            isbn: fields.isbn.clone(),
        }
    }
}
