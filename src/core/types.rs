/*!
 * Core Types
 * Opaque handles and identifiers shared between the lifecycle and its subsystems
 */

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of a runtime context
///
/// Keys the thread-local slot so that several contexts can live in one process.
pub type ContextId = u64;

/// Memory subsystem state owned by one per-thread runtime
///
/// The value is issued by [`MemorySubsystem::init_memory`](crate::subsystems::MemorySubsystem)
/// and handed back on restore, collection and teardown. Not `Clone`: exactly one
/// runtime owns it.
#[derive(Debug, PartialEq, Eq, Hash)]
pub struct MemoryHandle {
    id: u64,
}

impl MemoryHandle {
    #[inline]
    pub fn new(id: u64) -> Self {
        Self { id }
    }

    #[inline]
    pub fn id(&self) -> u64 {
        self.id
    }
}

/// Identity of a worker, stable across the worker handle's teardown
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct WorkerId(pub u64);

impl fmt::Display for WorkerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "worker#{}", self.0)
    }
}

/// Worker subsystem state owned by one per-thread runtime
#[derive(Debug, PartialEq, Eq)]
pub struct WorkerHandle {
    id: WorkerId,
    is_main: bool,
}

impl WorkerHandle {
    #[inline]
    pub fn new(id: WorkerId, is_main: bool) -> Self {
        Self { id, is_main }
    }

    #[inline]
    pub fn id(&self) -> WorkerId {
        self.id
    }

    #[inline]
    pub fn is_main(&self) -> bool {
        self.is_main
    }
}
