//! # Core Configuration Module
//!
//! Provides configuration management for the book collection core.
//!
//! ## Overview
//!
//! The configuration system uses a builder pattern to construct a `CoreConfig`
//! instance holding the remote store endpoint and the bridge dependencies the
//! core needs. It enforces fail-fast validation so that a misconfigured host
//! fails at startup with an actionable message instead of at the first
//! network call.
//!
//! ## Usage
//!
//! ```
//! use core_runtime::config::CoreConfig;
//!
//! let config = CoreConfig::builder()
//!     .store_base_url("https://store.example.com/api")
//!     .build()
//!     .expect("Failed to build config");
//! ```
//!
//! ### Configuration with a custom HTTP client
//!
//! ```ignore
//! use core_runtime::config::CoreConfig;
//! use std::sync::Arc;
//!
//! let config = CoreConfig::builder()
//!     .store_base_url("https://store.example.com/api")
//!     .api_key("key-from-secure-storage")
//!     .request_timeout(std::time::Duration::from_secs(10))
//!     .http_client(Arc::new(MyHttpClient))
//!     .build()?;
//! ```

use crate::error::{Error, Result};
use bridge_http::HttpClient;
use std::sync::Arc;
use std::time::Duration;

/// Default timeout applied to every store request.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Core configuration for the book collection core.
///
/// Holds the remote store endpoint and bridge dependencies required to
/// initialize the core. Use [`CoreConfigBuilder`] to construct instances.
#[derive(Clone)]
pub struct CoreConfig {
    /// Base URL of the remote entity store (no trailing slash)
    pub store_base_url: String,

    /// Optional API key sent with every store request
    pub api_key: Option<String>,

    /// Timeout applied to each store request
    pub request_timeout: Duration,

    /// HTTP client for store requests (optional with native reqwest default)
    pub http_client: Option<Arc<dyn HttpClient>>,
}

impl std::fmt::Debug for CoreConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CoreConfig")
            .field("store_base_url", &self.store_base_url)
            .field("api_key", &self.api_key.as_ref().map(|_| "[REDACTED]"))
            .field("request_timeout", &self.request_timeout)
            .field(
                "http_client",
                &self.http_client.as_ref().map(|_| "HttpClient { ... }"),
            )
            .finish()
    }
}

impl CoreConfig {
    /// Start building a configuration.
    pub fn builder() -> CoreConfigBuilder {
        CoreConfigBuilder::default()
    }
}

/// Builder for [`CoreConfig`] with fail-fast validation.
#[derive(Default)]
pub struct CoreConfigBuilder {
    store_base_url: Option<String>,
    api_key: Option<String>,
    request_timeout: Option<Duration>,
    http_client: Option<Arc<dyn HttpClient>>,
}

impl CoreConfigBuilder {
    /// Set the base URL of the remote entity store.
    pub fn store_base_url(mut self, url: impl Into<String>) -> Self {
        self.store_base_url = Some(url.into());
        self
    }

    /// Set the API key sent with every store request.
    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    /// Set the per-request timeout.
    pub fn request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = Some(timeout);
        self
    }

    /// Inject a custom HTTP client implementation.
    pub fn http_client(mut self, client: Arc<dyn HttpClient>) -> Self {
        self.http_client = Some(client);
        self
    }

    /// Validate and build the configuration.
    ///
    /// # Errors
    ///
    /// Returns `Error::Config` when:
    /// - `store_base_url` is missing or empty
    /// - `store_base_url` is not an http(s) URL
    /// - `request_timeout` is zero
    pub fn build(self) -> Result<CoreConfig> {
        let store_base_url = self
            .store_base_url
            .ok_or_else(|| {
                Error::Config(
                    "store_base_url is required - call .store_base_url(\"https://...\")"
                        .to_string(),
                )
            })?
            .trim_end_matches('/')
            .to_string();

        if store_base_url.is_empty() {
            return Err(Error::Config("store_base_url must not be empty".to_string()));
        }

        if !store_base_url.starts_with("http://") && !store_base_url.starts_with("https://") {
            return Err(Error::Config(format!(
                "store_base_url must start with http:// or https://, got: {}",
                store_base_url
            )));
        }

        let request_timeout = self.request_timeout.unwrap_or(DEFAULT_REQUEST_TIMEOUT);
        if request_timeout.is_zero() {
            return Err(Error::Config("request_timeout must be non-zero".to_string()));
        }

        Ok(CoreConfig {
            store_base_url,
            api_key: self.api_key,
            request_timeout,
            http_client: self.http_client,
        })
    }
}
