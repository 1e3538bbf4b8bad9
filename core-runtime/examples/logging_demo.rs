//! Logging system demonstration
//!
//! Shows the logging infrastructure in its different output modes.
//!
//! Run with:
//! ```bash
//! # Pretty format (default in debug)
//! cargo run --example logging_demo
//!
//! # JSON format
//! cargo run --example logging_demo -- json
//!
//! # Compact format
//! cargo run --example logging_demo -- compact
//!
//! # With custom filter
//! cargo run --example logging_demo -- pretty "core_runtime=trace"
//! ```

use core_runtime::logging::{
    init_logging, redact_if_sensitive, LogFormat, LogLevel, LoggingConfig,
};
use std::env;
use tracing::{debug, info, instrument, warn};

fn main() {
    let args: Vec<String> = env::args().collect();

    let format = match args.get(1).map(String::as_str) {
        Some("json") => LogFormat::Json,
        Some("compact") => LogFormat::Compact,
        Some("pretty") => LogFormat::Pretty,
        _ => LogFormat::default(),
    };

    let mut config = LoggingConfig::default()
        .with_format(format)
        .with_level(LogLevel::Trace)
        .with_spans(true)
        .with_target(true);

    if let Some(filter) = args.get(2) {
        config = config.with_filter(filter.clone());
    }

    init_logging(config).expect("Failed to initialize logging");

    info!(format = ?format, "Logging initialized");

    refresh_collection(42);

    let key = "sk-very-secret";
    info!(
        api_key = %redact_if_sensitive("api_key", key),
        "Connecting to store"
    );

    warn!("Store responded slowly");
    info!("Demo complete");
}

#[instrument]
fn refresh_collection(book_count: usize) {
    debug!("Fetching book list");
    info!(book_count, "Collection refreshed");
}
