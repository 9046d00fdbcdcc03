/*!
 * Lifecycle Limits and Constants
 *
 * Centralized location for the tunables of the lifecycle protocol.
 */

use std::time::Duration;

// =============================================================================
// SPIN-WAIT
// =============================================================================

/// How long a spin-wait may run before a stall warning is logged
/// Waits never time out; this only surfaces stuck activations or workers
pub const DEFAULT_STALL_WARNING: Duration = Duration::from_secs(5);

// =============================================================================
// ENVIRONMENT
// =============================================================================

/// Enables the memory leak checker ("1" or "true")
pub const ENV_CHECK_LEAKS: &str = "RT_CHECK_LEAKS";

/// Enables the cleaner leak checker ("1" or "true")
pub const ENV_CHECK_LEAKED_CLEANERS: &str = "RT_CHECK_LEAKED_CLEANERS";

/// Overrides the spin-wait stall warning, in milliseconds
pub const ENV_SPIN_STALL_WARN_MS: &str = "RT_SPIN_STALL_WARN_MS";

/// Switches the tracing output to JSON ("1" or "true")
pub const ENV_TRACE_JSON: &str = "RT_TRACE_JSON";
