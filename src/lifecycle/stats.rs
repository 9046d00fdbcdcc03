/*!
 * Lifecycle Statistics
 */

use super::status::GlobalStatus;
use crate::core::types::ContextId;
use serde::{Deserialize, Serialize};

/// Point-in-time snapshot of a runtime context
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LifecycleStats {
    pub context: ContextId,
    pub status: GlobalStatus,
    pub alive_runtimes: usize,
    pub initializing_runtimes: usize,
    pub memory_leak_checker: bool,
    pub cleaners_leak_checker: bool,
}
