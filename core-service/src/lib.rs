//! Core service façade and bootstrap helpers.
//!
//! This crate wires the HTTP bridge and the remote book store connector into
//! the shared core and hands the host application a single entry point: a
//! [`CoreService`] holding the collection controller and the event bus. Hosts
//! build a [`CoreConfig`], call [`bootstrap`], then drive the controller from
//! their UI loop and render its state.
//!
//! ```ignore
//! use core_runtime::config::CoreConfig;
//!
//! let config = CoreConfig::builder()
//!     .store_base_url("https://store.example.com/api")
//!     .build()?;
//!
//! let mut core = core_service::bootstrap(config).await?;
//! for book in core.collection().filtered_books() {
//!     println!("{}", book.title);
//! }
//! ```

pub mod error;

pub use error::{CoreError, Result};

use std::sync::Arc;

use bridge_http::{HttpClient, ReqwestHttpClient};
use core_catalog::CollectionController;
use core_runtime::config::CoreConfig;
use core_runtime::events::{EventBus, DEFAULT_EVENT_BUFFER_SIZE};
use provider_bookstore::BookStoreConnector;
use tracing::{info, warn};

/// Primary façade exposed to host applications.
///
/// Owns the collection controller and the event bus. The controller carries
/// all mutable collection state; hosts that need concurrent access wrap the
/// service in their own synchronization.
pub struct CoreService {
    collection: CollectionController,
    events: EventBus,
    config: CoreConfig,
}

impl CoreService {
    /// Read access to the collection controller.
    pub fn collection(&self) -> &CollectionController {
        &self.collection
    }

    /// Mutable access to the collection controller, for refresh, filtering,
    /// and form operations.
    pub fn collection_mut(&mut self) -> &mut CollectionController {
        &mut self.collection
    }

    /// The event bus carrying collection and notification events.
    ///
    /// Clone it (or call [`EventBus::subscribe`]) to observe state changes
    /// from other tasks.
    pub fn events(&self) -> &EventBus {
        &self.events
    }

    /// The configuration the service was bootstrapped with.
    pub fn config(&self) -> &CoreConfig {
        &self.config
    }
}

/// Wire up the core and perform the initial collection load.
///
/// Uses the HTTP client injected via [`CoreConfig`] when present, otherwise
/// constructs the native reqwest client with the configured request timeout.
/// A failing initial load does not abort bootstrap; the controller records a
/// notification and the host can call refresh again.
pub async fn bootstrap(config: CoreConfig) -> Result<CoreService> {
    info!(store_base_url = %config.store_base_url, "Bootstrapping book collection core");

    let http_client: Arc<dyn HttpClient> = match &config.http_client {
        Some(client) => Arc::clone(client),
        None => Arc::new(ReqwestHttpClient::with_timeout(config.request_timeout)),
    };

    let connector = BookStoreConnector::new(
        http_client,
        config.store_base_url.clone(),
        config.api_key.clone(),
    )
    .with_request_timeout(config.request_timeout);

    let events = EventBus::new(DEFAULT_EVENT_BUFFER_SIZE);
    let mut collection = CollectionController::new(Arc::new(connector), events.clone());

    if let Err(e) = collection.refresh().await {
        warn!("Initial collection load failed: {}", e);
    }

    Ok(CoreService {
        collection,
        events,
        config,
    })
}
