//! # Catalog Module
//!
//! Owns the in-memory book collection and provides the domain model,
//! filtering, and controller logic behind the host UI.
//!
//! ## Overview
//!
//! This module manages:
//! - The `Book` domain model with validation
//! - Transient filter criteria (search text, genre, reading status)
//! - Collection statistics (total, finished, in progress)
//! - The `BookStore` trait for the remote entity store
//! - The `CollectionController` driving refresh, filtering, and the
//!   create/edit form state machine
//! - The card presentation model for rendering a single book

pub mod card;
pub mod collection;
pub mod error;
pub mod filter;
pub mod form;
pub mod models;
pub mod store;

pub use card::{BadgeTone, BookCard, StarRating};
pub use collection::{CollectionController, CollectionStats, LoadState, Notification};
pub use error::{CatalogError, Result};
pub use filter::FilterCriteria;
pub use form::{BookDraft, FormMode, FormState};
pub use models::{Book, BookFields, BookId, Genre, ReadingStatus};
pub use store::{BookStore, SortDirection, SortKey, SortSpec, StoreError};
