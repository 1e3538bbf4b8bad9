//! # HTTP Bridge
//!
//! Abstracts HTTP operations behind the [`HttpClient`] trait so that higher
//! layers (store connectors, the service façade) never talk to a concrete
//! HTTP library directly. The crate also ships the native reqwest-backed
//! implementation used by desktop hosts.
//!
//! ## Overview
//!
//! - [`http`] - request/response types, retry policy, and the `HttpClient` trait
//! - [`reqwest_client`] - `ReqwestHttpClient`, the default native implementation
//! - [`error`] - `BridgeError` and the crate-local `Result` alias

pub mod error;
pub mod http;
pub mod reqwest_client;

pub use error::{BridgeError, Result};
pub use http::{HttpClient, HttpMethod, HttpRequest, HttpResponse, RetryPolicy};
pub use reqwest_client::ReqwestHttpClient;
