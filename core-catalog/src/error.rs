use crate::store::StoreError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    #[error("Book not found: {id}")]
    NotFound { id: String },

    #[error("Invalid input: {field} - {message}")]
    Validation { field: String, message: String },

    #[error("A submission is already in flight")]
    Busy,

    #[error("Form is not open")]
    FormClosed,
}

pub type Result<T> = std::result::Result<T, CatalogError>;
