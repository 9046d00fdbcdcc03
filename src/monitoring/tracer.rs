/*!
 * Structured Tracing
 * Subscriber setup for the lifecycle's `tracing` events
 *
 * Features:
 * - `EnvFilter` driven by RUST_LOG
 * - JSON-formatted output for structured parsing
 * - Span close events for activation and shutdown timings
 */

use crate::core::limits::ENV_TRACE_JSON;
use tracing::{debug, info};
use tracing_subscriber::{
    fmt::format::FmtSpan, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter,
};

/// Initialize structured tracing
///
/// Environment variables:
/// - RUST_LOG: Set log level (default: info)
/// - RT_TRACE_JSON: Enable JSON output (default: false)
///
/// A subscriber installed earlier is left in place.
pub fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(env_filter);

    let installed = if trace_json_requested() {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_target(true)
                    .with_thread_ids(true)
                    .with_thread_names(true)
                    .with_current_span(true)
                    .with_span_list(true)
                    .with_span_events(FmtSpan::CLOSE),
            )
            .try_init()
    } else {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .with_target(true)
                    .with_thread_ids(true)
                    .with_thread_names(true)
                    .with_span_events(FmtSpan::CLOSE)
                    .compact(),
            )
            .try_init()
    };

    match installed {
        Ok(()) => info!(json = trace_json_requested(), "structured tracing initialized"),
        Err(e) => debug!(error = %e, "tracing subscriber already installed"),
    }
}

/// Whether RT_TRACE_JSON asks for JSON output
pub fn trace_json_requested() -> bool {
    std::env::var(ENV_TRACE_JSON)
        .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
        .unwrap_or(false)
}
