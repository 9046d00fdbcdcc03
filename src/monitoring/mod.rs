/*!
 * Monitoring
 * Structured logging setup for the lifecycle
 */

mod tracer;

pub use tracer::{init_tracing, trace_json_requested};
