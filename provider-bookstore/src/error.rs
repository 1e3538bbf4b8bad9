use bridge_http::BridgeError;
use core_catalog::StoreError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BookStoreError {
    #[error("Entity API error: status {status_code} - {message}")]
    Api { status_code: u16, message: String },

    #[error("Failed to parse entity API response: {0}")]
    Parse(String),

    #[error("HTTP transport error: {0}")]
    Http(#[from] BridgeError),
}

impl From<BookStoreError> for StoreError {
    fn from(err: BookStoreError) -> Self {
        match err {
            BookStoreError::Api {
                status_code,
                message,
            } => StoreError::Unavailable(format!("HTTP {}: {}", status_code, message)),
            BookStoreError::Parse(message) => StoreError::InvalidResponse(message),
            BookStoreError::Http(e) => StoreError::Unavailable(e.to_string()),
        }
    }
}
