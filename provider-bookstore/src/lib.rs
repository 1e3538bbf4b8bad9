//! # Book Store Provider
//!
//! HTTP connector for the remote entity store holding book records.
//! Implements the `core-catalog` [`BookStore`](core_catalog::BookStore)
//! trait against the store's REST entity API.

pub mod connector;
pub mod error;
pub mod types;

pub use connector::BookStoreConnector;
pub use error::BookStoreError;
