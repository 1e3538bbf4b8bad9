//! Card presentation model
//!
//! A pure projection of one book record into display-ready values. The host
//! UI renders the card; this module owns the genre/status lookup tables and
//! the star rating so that every enum value has a mapping checked at compile
//! time.

use crate::models::{Book, Genre};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Maximum description length shown on a card before truncation.
const DESCRIPTION_PREVIEW_CHARS: usize = 160;

/// Badge color tone keyed by genre.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BadgeTone {
    Orange,
    Emerald,
    Blue,
    Yellow,
    Slate,
    Pink,
    Indigo,
    Rose,
    Red,
    Purple,
    Gray,
}

impl Genre {
    /// Badge tone for this genre.
    ///
    /// Exhaustive by construction: adding a genre without a tone is a
    /// compile error, so there is no silent fallback color.
    pub fn badge_tone(self) -> BadgeTone {
        match self {
            Genre::Fiksi => BadgeTone::Orange,
            Genre::NonFiksi => BadgeTone::Emerald,
            Genre::Teknologi => BadgeTone::Blue,
            Genre::Sejarah => BadgeTone::Yellow,
            Genre::Bisnis => BadgeTone::Slate,
            Genre::SelfHelp => BadgeTone::Pink,
            Genre::Biografi => BadgeTone::Indigo,
            Genre::Romance => BadgeTone::Rose,
            Genre::Thriller => BadgeTone::Red,
            Genre::Fantasy => BadgeTone::Purple,
            Genre::Lainnya => BadgeTone::Gray,
        }
    }
}

/// A 1-5 star rating rendered as filled and unfilled stars.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StarRating {
    pub filled: u8,
}

impl StarRating {
    pub const MAX: u8 = 5;

    /// Build from a stored rating value; out-of-range values are clamped.
    pub fn new(rating: i32) -> Self {
        Self {
            filled: rating.clamp(0, Self::MAX as i32) as u8,
        }
    }
}

impl fmt::Display for StarRating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for i in 0..Self::MAX {
            if i < self.filled {
                write!(f, "★")?;
            } else {
                write!(f, "☆")?;
            }
        }
        write!(f, " ({})", self.filled)
    }
}

/// Display-ready summary of one book.
///
/// Serializable so FFI hosts can take the whole card as JSON.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BookCard {
    pub title: String,
    pub author: String,
    /// Truncated description, `None` when the book has none
    pub description_preview: Option<String>,
    pub genre_label: &'static str,
    pub genre_tone: BadgeTone,
    pub status_label: &'static str,
    pub publication_year: Option<i32>,
    pub pages: Option<i32>,
    pub rating: Option<StarRating>,
}

impl BookCard {
    /// Project a book record into its card.
    pub fn from_book(book: &Book) -> Self {
        Self {
            title: book.title.clone(),
            author: book.author.clone(),
            description_preview: book
                .description
                .as_deref()
                .map(|d| truncate_chars(d, DESCRIPTION_PREVIEW_CHARS)),
            genre_label: book.genre.label(),
            genre_tone: book.genre.badge_tone(),
            status_label: book.reading_status.label(),
            publication_year: book.publication_year,
            pages: book.pages,
            rating: book.rating.map(StarRating::new),
        }
    }
}

/// Truncate on a character boundary, appending an ellipsis when shortened.
fn truncate_chars(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }

    let truncated: String = text.chars().take(max_chars).collect();
    format!("{}…", truncated.trim_end())
}
