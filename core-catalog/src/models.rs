//! Domain models for the book collection
//!
//! This module contains the book record, its enumerated attributes, and
//! validation.

use crate::error::CatalogError;
use serde::{Deserialize, Serialize};
use std::fmt;

// =============================================================================
// ID Type
// =============================================================================

/// Unique identifier for a book, assigned by the remote store.
///
/// The store owns id generation, so this is an opaque string rather than a
/// locally generated UUID.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BookId(pub String);

impl BookId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for BookId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for BookId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

// =============================================================================
// Enumerated Attributes
// =============================================================================

/// Book genre.
///
/// Wire values match the store's Indonesian strings (`fiksi`, `non-fiksi`, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Genre {
    Fiksi,
    NonFiksi,
    Teknologi,
    Sejarah,
    Bisnis,
    SelfHelp,
    Biografi,
    Romance,
    Thriller,
    Fantasy,
    Lainnya,
}

impl Genre {
    /// Every genre, in the order the filter bar presents them.
    pub const ALL: [Genre; 11] = [
        Genre::Fiksi,
        Genre::NonFiksi,
        Genre::Teknologi,
        Genre::Sejarah,
        Genre::Bisnis,
        Genre::SelfHelp,
        Genre::Biografi,
        Genre::Romance,
        Genre::Thriller,
        Genre::Fantasy,
        Genre::Lainnya,
    ];

    /// Wire representation used by the store.
    pub fn as_str(self) -> &'static str {
        match self {
            Genre::Fiksi => "fiksi",
            Genre::NonFiksi => "non-fiksi",
            Genre::Teknologi => "teknologi",
            Genre::Sejarah => "sejarah",
            Genre::Bisnis => "bisnis",
            Genre::SelfHelp => "self-help",
            Genre::Biografi => "biografi",
            Genre::Romance => "romance",
            Genre::Thriller => "thriller",
            Genre::Fantasy => "fantasy",
            Genre::Lainnya => "lainnya",
        }
    }

    /// Human-readable label for chips and badges.
    pub fn label(self) -> &'static str {
        match self {
            Genre::Fiksi => "Fiksi",
            Genre::NonFiksi => "Non-Fiksi",
            Genre::Teknologi => "Teknologi",
            Genre::Sejarah => "Sejarah",
            Genre::Bisnis => "Bisnis",
            Genre::SelfHelp => "Self-Help",
            Genre::Biografi => "Biografi",
            Genre::Romance => "Romance",
            Genre::Thriller => "Thriller",
            Genre::Fantasy => "Fantasy",
            Genre::Lainnya => "Lainnya",
        }
    }
}

impl fmt::Display for Genre {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Reading progress of a book.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReadingStatus {
    BelumDibaca,
    SedangDibaca,
    Selesai,
}

impl ReadingStatus {
    pub const ALL: [ReadingStatus; 3] = [
        ReadingStatus::BelumDibaca,
        ReadingStatus::SedangDibaca,
        ReadingStatus::Selesai,
    ];

    /// Wire representation used by the store.
    pub fn as_str(self) -> &'static str {
        match self {
            ReadingStatus::BelumDibaca => "belum_dibaca",
            ReadingStatus::SedangDibaca => "sedang_dibaca",
            ReadingStatus::Selesai => "selesai",
        }
    }

    /// Human-readable label.
    pub fn label(self) -> &'static str {
        match self {
            ReadingStatus::BelumDibaca => "Belum Dibaca",
            ReadingStatus::SedangDibaca => "Sedang Dibaca",
            ReadingStatus::Selesai => "Selesai",
        }
    }
}

impl fmt::Display for ReadingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// =============================================================================
// Domain Models
// =============================================================================

/// A book record as held by the remote store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Book {
    /// Store-assigned identifier
    pub id: BookId,
    /// Book title
    pub title: String,
    /// Author name
    pub author: String,
    /// Genre
    pub genre: Genre,
    /// Publication year
    pub publication_year: Option<i32>,
    /// Free-text description
    pub description: Option<String>,
    /// Reading progress
    pub reading_status: ReadingStatus,
    /// Rating from 1 to 5
    pub rating: Option<i32>,
    /// Page count
    pub pages: Option<i32>,
    /// ISBN
    pub isbn: Option<String>,
    /// When first persisted (Unix timestamp, store-owned)
    pub created_at: i64,
    /// Last update time (Unix timestamp, store-owned)
    pub updated_at: i64,
}

impl Book {
    /// The mutable payload of this record, for pre-populating the edit form.
    pub fn fields(&self) -> BookFields {
        BookFields {
            title: self.title.clone(),
            author: self.author.clone(),
            genre: self.genre,
            publication_year: self.publication_year,
            description: self.description.clone(),
            reading_status: self.reading_status,
            rating: self.rating,
            pages: self.pages,
            isbn: self.isbn.clone(),
        }
    }
}

/// The mutable attributes of a book, used as the create/update payload.
///
/// Identifier and timestamps are store-owned and therefore absent here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookFields {
    pub title: String,
    pub author: String,
    pub genre: Genre,
    pub publication_year: Option<i32>,
    pub description: Option<String>,
    pub reading_status: ReadingStatus,
    pub rating: Option<i32>,
    pub pages: Option<i32>,
    pub isbn: Option<String>,
}

impl BookFields {
    /// Validate field values before they are sent to the store.
    pub fn validate(&self) -> Result<(), CatalogError> {
        if self.title.trim().is_empty() {
            return Err(CatalogError::Validation {
                field: "title".to_string(),
                message: "title cannot be empty".to_string(),
            });
        }

        if self.author.trim().is_empty() {
            return Err(CatalogError::Validation {
                field: "author".to_string(),
                message: "author cannot be empty".to_string(),
            });
        }

        if let Some(rating) = self.rating {
            if !(1..=5).contains(&rating) {
                return Err(CatalogError::Validation {
                    field: "rating".to_string(),
                    message: format!("rating {} is outside 1..=5", rating),
                });
            }
        }

        if let Some(pages) = self.pages {
            if pages <= 0 {
                return Err(CatalogError::Validation {
                    field: "pages".to_string(),
                    message: "page count must be positive".to_string(),
                });
            }
        }

        if let Some(year) = self.publication_year {
            if !(0..=2100).contains(&year) {
                return Err(CatalogError::Validation {
                    field: "publication_year".to_string(),
                    message: format!("publication year {} is out of range", year),
                });
            }
        }

        Ok(())
    }
}
