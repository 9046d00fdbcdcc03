/*!
 * Memory Subsystem Interface
 */

use crate::core::types::MemoryHandle;
use thiserror::Error;

/// Memory subsystem errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MemoryError {
    #[error("Out of memory: {0}")]
    OutOfMemory(String),
}

pub type MemoryResult<T> = Result<T, MemoryError>;

/// Per-thread memory/GC state provider
pub trait MemorySubsystem: Send + Sync {
    /// Create the memory state for a newly activated thread
    ///
    /// Failure is the one recoverable activation error.
    fn init_memory(&self) -> MemoryResult<MemoryHandle>;

    /// Restore/flush the state of `memory` before its runtime is torn down
    ///
    /// May run during thread exit, after thread-local storage is gone; the
    /// handle is always passed explicitly.
    fn restore_memory(&self, memory: &MemoryHandle);

    /// Destroy the state of a torn-down runtime
    fn deinit_memory(&self, memory: MemoryHandle);

    /// Run a full collection on `memory`
    fn perform_full_gc(&self, memory: &MemoryHandle);
}
