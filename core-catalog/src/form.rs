//! Entry form draft and state machine
//!
//! The form collects a single book's attributes. Numeric attributes are held
//! as text, exactly as the host input controls deliver them, and coerced to
//! integers at submit time. Form visibility is a tagged state so that "open
//! in edit mode without a draft" cannot be represented.

use crate::error::CatalogError;
use crate::models::{Book, BookFields, BookId, Genre, ReadingStatus};
use serde::{Deserialize, Serialize};

/// In-progress form input for one book.
///
/// `publication_year`, `rating`, and `pages` stay text-typed until
/// [`BookDraft::normalize`] runs; an empty string means "absent", not zero.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookDraft {
    pub title: String,
    pub author: String,
    pub genre: Genre,
    pub publication_year: String,
    pub description: String,
    pub reading_status: ReadingStatus,
    pub rating: String,
    pub pages: String,
    pub isbn: String,
}

impl Default for BookDraft {
    /// Create-mode defaults: genre fiksi, status belum dibaca, numerics empty.
    fn default() -> Self {
        Self {
            title: String::new(),
            author: String::new(),
            genre: Genre::Fiksi,
            publication_year: String::new(),
            description: String::new(),
            reading_status: ReadingStatus::BelumDibaca,
            rating: String::new(),
            pages: String::new(),
            isbn: String::new(),
        }
    }
}

impl BookDraft {
    /// Pre-populate a draft from an existing record for the edit path.
    pub fn from_book(book: &Book) -> Self {
        Self {
            title: book.title.clone(),
            author: book.author.clone(),
            genre: book.genre,
            publication_year: book
                .publication_year
                .map(|y| y.to_string())
                .unwrap_or_default(),
            description: book.description.clone().unwrap_or_default(),
            reading_status: book.reading_status,
            rating: book.rating.map(|r| r.to_string()).unwrap_or_default(),
            pages: book.pages.map(|p| p.to_string()).unwrap_or_default(),
            isbn: book.isbn.clone().unwrap_or_default(),
        }
    }

    /// Coerce text fields into a validated store payload.
    ///
    /// Non-empty numeric text must parse as an integer; empty text becomes
    /// `None`. Blank description and ISBN also become `None` rather than
    /// empty strings.
    pub fn normalize(&self) -> Result<BookFields, CatalogError> {
        let fields = BookFields {
            title: self.title.trim().to_string(),
            author: self.author.trim().to_string(),
            genre: self.genre,
            publication_year: parse_optional_int(&self.publication_year, "publication_year")?,
            description: optional_text(&self.description),
            reading_status: self.reading_status,
            rating: parse_optional_int(&self.rating, "rating")?,
            pages: parse_optional_int(&self.pages, "pages")?,
            isbn: optional_text(&self.isbn),
        };

        fields.validate()?;
        Ok(fields)
    }
}

fn parse_optional_int(text: &str, field: &str) -> Result<Option<i32>, CatalogError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }

    trimmed
        .parse::<i32>()
        .map(Some)
        .map_err(|_| CatalogError::Validation {
            field: field.to_string(),
            message: format!("'{}' is not a whole number", trimmed),
        })
}

fn optional_text(text: &str) -> Option<String> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Whether the open form is creating a new record or editing an existing one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum FormMode {
    Create,
    Edit(BookId),
}

/// Form visibility as a tagged state.
///
/// Transitions: `Closed -> Open(Create)` on add, `Closed -> Open(Edit)` on a
/// card's edit action, `Open -> Closed` on cancel or successful submit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum FormState {
    Closed,
    Open { mode: FormMode, draft: BookDraft },
}

impl FormState {
    pub fn is_open(&self) -> bool {
        matches!(self, FormState::Open { .. })
    }
}
