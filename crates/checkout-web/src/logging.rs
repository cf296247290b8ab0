//! Browser console logging
//!
//! `tracing-subscriber` fmt output routed to the console, one call per event.

use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};
use tracing_web::MakeWebConsoleWriter;

const FALLBACK_DIRECTIVE: &str = "info";

/// Parse the page's `logLevel`; a bad directive falls back to `info`
fn filter(directive: &str) -> EnvFilter {
    EnvFilter::try_new(directive).unwrap_or_else(|_| EnvFilter::new(FALLBACK_DIRECTIVE))
}

/// Install the console subscriber
pub fn init(directive: &str) {
    // wasm32 has no clock for timestamps
    let _ = tracing_subscriber::registry()
        .with(filter(directive))
        .with(
            tracing_subscriber::fmt::layer()
                .without_time()
                .with_ansi(false)
                .with_writer(MakeWebConsoleWriter::new()),
        )
        .try_init();
}
