//! # Event Bus System
//!
//! Provides an event-driven architecture for the book collection core using
//! `tokio::sync::broadcast`. Core modules emit typed events; host UIs
//! subscribe to drive toasts, refresh indicators, and badge updates without
//! polling the controller.
//!
//! ## Usage
//!
//! ### Creating an Event Bus
//!
//! ```rust
//! use core_runtime::events::EventBus;
//!
//! let event_bus = EventBus::new(100); // Buffer size of 100 events
//! ```
//!
//! ### Publishing Events
//!
//! ```rust
//! use core_runtime::events::{EventBus, CoreEvent, CatalogEvent};
//!
//! # let event_bus = EventBus::new(100);
//! let event = CoreEvent::Catalog(CatalogEvent::BookCreated {
//!     book_id: "b-123".to_string(),
//! });
//!
//! event_bus.emit(event).ok();
//! ```
//!
//! ### Subscribing to Events
//!
//! ```rust
//! use core_runtime::events::{EventBus, CoreEvent};
//! use tokio::sync::broadcast::error::RecvError;
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! let event_bus = EventBus::new(100);
//! let mut stream = event_bus.subscribe();
//!
//! tokio::spawn(async move {
//!     loop {
//!         match stream.recv().await {
//!             Ok(event) => println!("Received: {:?}", event),
//!             Err(RecvError::Lagged(n)) => {
//!                 eprintln!("Missed {} events", n);
//!             }
//!             Err(RecvError::Closed) => break,
//!         }
//!     }
//! });
//! # }
//! ```
//!
//! ## Error Handling
//!
//! The bus uses `tokio::sync::broadcast`, which can produce two errors:
//!
//! - **`RecvError::Lagged(n)`**: subscriber missed `n` events. Non-fatal;
//!   the subscriber keeps receiving new events.
//! - **`RecvError::Closed`**: all senders dropped. Treat as shutdown.

use serde::{Deserialize, Serialize};
use std::fmt;
use tokio::sync::broadcast;

// Re-export commonly used types
pub use tokio::sync::broadcast::error::{RecvError, SendError};
pub use tokio::sync::broadcast::Receiver;

/// Default buffer size for the event bus channel.
///
/// Subscribers that can't keep up will receive `RecvError::Lagged`.
pub const DEFAULT_EVENT_BUFFER_SIZE: usize = 100;

// ============================================================================
// Core Event Types
// ============================================================================

/// Top-level event enum encompassing all event categories.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", content = "payload")]
pub enum CoreEvent {
    /// Catalog-related events (collection refresh, book mutations)
    Catalog(CatalogEvent),
    /// Notification lifecycle events
    Notification(NotificationEvent),
}

impl CoreEvent {
    /// Returns a human-readable description of the event.
    pub fn description(&self) -> &str {
        match self {
            CoreEvent::Catalog(e) => e.description(),
            CoreEvent::Notification(e) => e.description(),
        }
    }

    /// Returns the severity level of the event.
    pub fn severity(&self) -> EventSeverity {
        match self {
            CoreEvent::Catalog(CatalogEvent::RefreshFailed { .. }) => EventSeverity::Error,
            CoreEvent::Catalog(CatalogEvent::SubmitFailed { .. }) => EventSeverity::Error,
            CoreEvent::Catalog(CatalogEvent::BookCreated { .. }) => EventSeverity::Info,
            CoreEvent::Catalog(CatalogEvent::BookUpdated { .. }) => EventSeverity::Info,
            CoreEvent::Catalog(CatalogEvent::RefreshCompleted { .. }) => EventSeverity::Info,
            _ => EventSeverity::Debug,
        }
    }
}

/// Events emitted by the collection controller.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "kind")]
pub enum CatalogEvent {
    /// A full-list refresh started
    RefreshStarted,
    /// A full-list refresh completed
    RefreshCompleted { book_count: usize },
    /// A full-list refresh failed
    RefreshFailed { message: String },
    /// A new book was persisted to the store
    BookCreated { book_id: String },
    /// An existing book was replaced in the store
    BookUpdated { book_id: String },
    /// A form submission failed (validation or store error)
    SubmitFailed { message: String },
}

impl CatalogEvent {
    pub fn description(&self) -> &str {
        match self {
            CatalogEvent::RefreshStarted => "Collection refresh started",
            CatalogEvent::RefreshCompleted { .. } => "Collection refresh completed",
            CatalogEvent::RefreshFailed { .. } => "Collection refresh failed",
            CatalogEvent::BookCreated { .. } => "Book created",
            CatalogEvent::BookUpdated { .. } => "Book updated",
            CatalogEvent::SubmitFailed { .. } => "Form submission failed",
        }
    }
}

/// Notification lifecycle events.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "kind")]
pub enum NotificationEvent {
    /// A notification was posted for the host UI to display
    Posted {
        notification_id: u64,
        severity: EventSeverity,
        message: String,
    },
    /// A notification was dismissed
    Dismissed { notification_id: u64 },
}

impl NotificationEvent {
    pub fn description(&self) -> &str {
        match self {
            NotificationEvent::Posted { .. } => "Notification posted",
            NotificationEvent::Dismissed { .. } => "Notification dismissed",
        }
    }
}

/// Severity classification for events and notifications.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum EventSeverity {
    Debug,
    Info,
    Warning,
    Error,
}

impl fmt::Display for EventSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EventSeverity::Debug => write!(f, "debug"),
            EventSeverity::Info => write!(f, "info"),
            EventSeverity::Warning => write!(f, "warning"),
            EventSeverity::Error => write!(f, "error"),
        }
    }
}

// ============================================================================
// Event Bus
// ============================================================================

/// Central broadcast channel for publishing core events.
///
/// Cloning the bus is cheap; all clones publish into the same channel.
#[derive(Clone)]
pub struct EventBus {
    sender: broadcast::Sender<CoreEvent>,
}

impl EventBus {
    /// Create a new event bus with the given buffer size.
    pub fn new(buffer_size: usize) -> Self {
        let (sender, _) = broadcast::channel(buffer_size);
        Self { sender }
    }

    /// Publish an event to all current subscribers.
    ///
    /// Returns the number of subscribers that received the event. An error
    /// means there are no subscribers, which is not fatal - emitters may
    /// ignore it.
    pub fn emit(&self, event: CoreEvent) -> Result<usize, SendError<CoreEvent>> {
        self.sender.send(event)
    }

    /// Subscribe to all future events.
    pub fn subscribe(&self) -> Receiver<CoreEvent> {
        self.sender.subscribe()
    }

    /// Number of active subscribers.
    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(DEFAULT_EVENT_BUFFER_SIZE)
    }
}
