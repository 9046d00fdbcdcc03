/*!
 * Spin-Wait Configuration
 */

use crate::core::limits::DEFAULT_STALL_WARNING;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Spin-wait configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpinConfig {
    /// Log a warning once a single wait has spun for this long
    pub stall_warning: Duration,
}

impl Default for SpinConfig {
    fn default() -> Self {
        Self {
            stall_warning: DEFAULT_STALL_WARNING,
        }
    }
}

impl SpinConfig {
    /// Configuration that reports stalls quickly (tests, diagnostics)
    pub const fn eager() -> Self {
        Self {
            stall_warning: Duration::from_millis(100),
        }
    }
}
