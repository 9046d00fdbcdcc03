/*!
 * Per-Thread Runtime State
 *
 * One instance per thread that activated a runtime context. Only ever held
 * through an `Rc`, so it never leaves the thread that created it; the
 * thread-local slot holds one reference while it is published.
 */

use crate::core::types::{MemoryHandle, WorkerHandle, WorkerId};
use serde::{Deserialize, Serialize};
use std::cell::Cell;

/// Local state machine of a per-thread runtime
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RuntimeStatus {
    Uninitialized,
    Running,
    Destroying,
}

/// Per-thread runtime: memory state, worker, and local status
#[derive(Debug)]
pub(crate) struct ThreadRuntime {
    memory: MemoryHandle,
    worker: WorkerHandle,
    status: Cell<RuntimeStatus>,
}

impl ThreadRuntime {
    pub(crate) fn new(memory: MemoryHandle, worker: WorkerHandle) -> Self {
        Self {
            memory,
            worker,
            status: Cell::new(RuntimeStatus::Uninitialized),
        }
    }

    #[inline]
    pub(crate) fn memory(&self) -> &MemoryHandle {
        &self.memory
    }

    #[inline]
    pub(crate) fn worker_id(&self) -> WorkerId {
        self.worker.id()
    }

    #[inline]
    pub(crate) fn status(&self) -> RuntimeStatus {
        self.status.get()
    }

    #[inline]
    pub(crate) fn set_status(&self, status: RuntimeStatus) {
        self.status.set(status);
    }

    /// Release the state into its owned handles
    pub(crate) fn into_parts(self) -> (MemoryHandle, WorkerHandle) {
        (self.memory, self.worker)
    }
}
