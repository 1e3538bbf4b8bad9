//! Entity API connector implementation
//!
//! Implements the `BookStore` trait against the remote store's REST entity
//! endpoints.

use async_trait::async_trait;
use bridge_http::{HttpClient, HttpMethod, HttpRequest, HttpResponse, RetryPolicy};
use chrono::DateTime;
use core_catalog::store::Result;
use core_catalog::{Book, BookFields, BookId, BookStore, SortDirection, SortKey, SortSpec, StoreError};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, instrument, warn};

use crate::error::BookStoreError;
use crate::types::{BookPayload, BookResource};

/// Path of the Book entity collection, relative to the store base URL
const ENTITY_BOOK_PATH: &str = "/entities/Book";

/// Retry attempts for rate-limited and server-errored requests
const MAX_RETRIES: u32 = 3;

/// Entity API connector
///
/// Implements [`BookStore`] over HTTP.
///
/// # Features
///
/// - Full-list fetch with server-side ordering
/// - Create and full-record update of Book entities
/// - Exponential backoff for rate limiting and server errors
/// - Optional API key authentication
///
/// # Example
///
/// ```ignore
/// use provider_bookstore::BookStoreConnector;
/// use core_catalog::{BookStore, SortSpec};
///
/// let connector = BookStoreConnector::new(http_client, "https://store.example.com/api", None);
/// let books = connector.list(SortSpec::recently_updated()).await?;
/// ```
pub struct BookStoreConnector {
    /// HTTP client for API requests
    http_client: Arc<dyn HttpClient>,

    /// Store base URL, no trailing slash
    base_url: String,

    /// Optional API key sent with every request
    api_key: Option<String>,

    /// Per-request timeout
    request_timeout: Duration,
}

impl BookStoreConnector {
    /// Create a new entity API connector
    ///
    /// # Arguments
    ///
    /// * `http_client` - HTTP client implementation
    /// * `base_url` - store base URL (trailing slash is stripped)
    /// * `api_key` - optional API key for the store
    pub fn new(
        http_client: Arc<dyn HttpClient>,
        base_url: impl Into<String>,
        api_key: Option<String>,
    ) -> Self {
        Self {
            http_client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key,
            request_timeout: Duration::from_secs(30),
        }
    }

    /// Override the per-request timeout
    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    fn collection_url(&self) -> String {
        format!("{}{}", self.base_url, ENTITY_BOOK_PATH)
    }

    fn entity_url(&self, id: &BookId) -> String {
        format!(
            "{}{}/{}",
            self.base_url,
            ENTITY_BOOK_PATH,
            urlencoding::encode(id.as_str())
        )
    }

    /// Render a sort spec as the entity API's sort query value
    /// (`-updated_date` style: leading dash for descending).
    fn sort_value(sort: SortSpec) -> String {
        let key = match sort.key {
            SortKey::UpdatedDate => "updated_date",
            SortKey::CreatedDate => "created_date",
            SortKey::Title => "title",
        };
        match sort.direction {
            SortDirection::Descending => format!("-{}", key),
            SortDirection::Ascending => key.to_string(),
        }
    }

    /// Base request with auth header and timeout applied
    fn request(&self, method: HttpMethod, url: String) -> HttpRequest {
        let mut request = HttpRequest::new(method, url)
            .header("Accept", "application/json")
            .timeout(self.request_timeout);
        if let Some(key) = &self.api_key {
            request = request.api_key(key.clone());
        }
        request
    }

    /// Parse RFC 3339 timestamp to Unix timestamp
    fn parse_timestamp(rfc3339: &str) -> Option<i64> {
        DateTime::parse_from_rfc3339(rfc3339)
            .ok()
            .map(|dt| dt.timestamp())
    }

    /// Convert a wire resource to the domain model
    fn convert_resource(resource: BookResource) -> Book {
        let created_at = Self::parse_timestamp(&resource.created_date).unwrap_or_else(|| {
            warn!(id = %resource.id, "Unparseable created_date from store");
            0
        });
        let updated_at = Self::parse_timestamp(&resource.updated_date).unwrap_or_else(|| {
            warn!(id = %resource.id, "Unparseable updated_date from store");
            0
        });

        Book {
            id: BookId::new(resource.id),
            title: resource.title,
            author: resource.author,
            genre: resource.genre,
            publication_year: resource.publication_year,
            description: resource.description,
            reading_status: resource.reading_status,
            rating: resource.rating,
            pages: resource.pages,
            isbn: resource.isbn,
            created_at,
            updated_at,
        }
    }

    /// Execute an API request with retry logic
    ///
    /// Retries rate limiting (429) and server errors (5xx) with exponential
    /// backoff; every other status is handed back to the caller.
    async fn execute_with_retry(
        &self,
        request: HttpRequest,
        max_retries: u32,
    ) -> std::result::Result<HttpResponse, BookStoreError> {
        let mut attempt = 0;

        loop {
            // The bridge client must not retry on its own here; backoff is
            // owned by this loop.
            match self
                .http_client
                .execute_with_retry(request.clone(), RetryPolicy::none())
                .await
            {
                Ok(response) => {
                    let status = response.status;

                    if status == 429 || (500..600).contains(&status) {
                        attempt += 1;
                        if attempt >= max_retries {
                            warn!(
                                "API request failed after {} attempts: status={}",
                                max_retries, status
                            );
                            return Err(BookStoreError::Api {
                                status_code: status,
                                message: format!("Request failed after {} retries", max_retries),
                            });
                        }

                        let backoff_ms = 100u64 * 2u64.pow(attempt);
                        warn!(
                            "API request failed (attempt {}/{}): status={}, retrying in {}ms",
                            attempt, max_retries, status, backoff_ms
                        );
                        tokio::time::sleep(tokio::time::Duration::from_millis(backoff_ms)).await;
                    } else {
                        debug!("API request completed: status={}", status);
                        return Ok(response);
                    }
                }
                Err(e) => {
                    attempt += 1;
                    if attempt >= max_retries {
                        warn!("API request failed after {} attempts: {}", max_retries, e);
                        return Err(e.into());
                    }

                    let backoff_ms = 100u64 * 2u64.pow(attempt);
                    warn!(
                        "API request failed (attempt {}/{}): {}, retrying in {}ms",
                        attempt, max_retries, e, backoff_ms
                    );
                    tokio::time::sleep(tokio::time::Duration::from_millis(backoff_ms)).await;
                }
            }
        }
    }

    fn api_error(response: &HttpResponse) -> BookStoreError {
        BookStoreError::Api {
            status_code: response.status,
            message: String::from_utf8_lossy(&response.body).to_string(),
        }
    }
}

#[async_trait]
impl BookStore for BookStoreConnector {
    #[instrument(skip(self))]
    async fn list(&self, sort: SortSpec) -> Result<Vec<Book>> {
        let url = format!(
            "{}?sort={}",
            self.collection_url(),
            urlencoding::encode(&Self::sort_value(sort))
        );

        let request = self.request(HttpMethod::Get, url);
        let response = self
            .execute_with_retry(request, MAX_RETRIES)
            .await
            .map_err(StoreError::from)?;

        if !response.is_success() {
            return Err(Self::api_error(&response).into());
        }

        let resources: Vec<BookResource> = serde_json::from_slice(&response.body)
            .map_err(|e| BookStoreError::Parse(format!("Failed to parse book list: {}", e)))?;

        info!("Listed {} books from store", resources.len());

        Ok(resources.into_iter().map(Self::convert_resource).collect())
    }

    #[instrument(skip(self, fields), fields(title = %fields.title))]
    async fn create(&self, fields: &BookFields) -> Result<Book> {
        let request = self
            .request(HttpMethod::Post, self.collection_url())
            .json(&BookPayload::from(fields))
            .map_err(BookStoreError::from)?;

        let response = self
            .execute_with_retry(request, MAX_RETRIES)
            .await
            .map_err(StoreError::from)?;

        if !response.is_success() {
            return Err(Self::api_error(&response).into());
        }

        let resource: BookResource = serde_json::from_slice(&response.body)
            .map_err(|e| BookStoreError::Parse(format!("Failed to parse created book: {}", e)))?;

        info!(book_id = %resource.id, "Created book in store");

        Ok(Self::convert_resource(resource))
    }

    #[instrument(skip(self, fields), fields(book_id = %id))]
    async fn update(&self, id: &BookId, fields: &BookFields) -> Result<Book> {
        let request = self
            .request(HttpMethod::Put, self.entity_url(id))
            .json(&BookPayload::from(fields))
            .map_err(BookStoreError::from)?;

        let response = self
            .execute_with_retry(request, MAX_RETRIES)
            .await
            .map_err(StoreError::from)?;

        if response.status == 404 {
            return Err(StoreError::NotFound {
                id: id.to_string(),
            });
        }

        if !response.is_success() {
            return Err(Self::api_error(&response).into());
        }

        let resource: BookResource = serde_json::from_slice(&response.body)
            .map_err(|e| BookStoreError::Parse(format!("Failed to parse updated book: {}", e)))?;

        info!(book_id = %resource.id, "Updated book in store");

        Ok(Self::convert_resource(resource))
    }
}
