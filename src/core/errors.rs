/*!
 * Error Types
 * Recoverable lifecycle errors and unrecoverable protocol violations
 */

use crate::lifecycle::{GlobalStatus, RuntimeStatus};
use miette::Diagnostic;
use serde::{Deserialize, Serialize};
use thiserror::Error;

// Re-export MemoryError from subsystems module
pub use crate::subsystems::MemoryError;

/// Recoverable lifecycle errors
///
/// Resource exhaustion and activation on an exiting thread are recoverable;
/// everything else is a [`ProtocolViolation`] and terminates the process.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Diagnostic)]
#[serde(tag = "error_type", content = "details", rename_all = "snake_case")]
pub enum LifecycleError {
    #[error("Failed to allocate per-thread runtime state: {0}")]
    #[diagnostic(
        code(lifecycle::allocation_failed),
        help("The memory subsystem could not provide state for this thread. No runtime is active on it.")
    )]
    AllocationFailed(String),

    #[error("Thread is exiting; its runtime slot is already destroyed")]
    #[diagnostic(
        code(lifecycle::thread_exiting),
        help("Activation was attempted from a thread-local destructor. The state allocated for it was released.")
    )]
    ThreadExiting,
}

impl From<MemoryError> for LifecycleError {
    fn from(err: MemoryError) -> Self {
        LifecycleError::AllocationFailed(err.to_string())
    }
}

pub type LifecycleResult<T> = Result<T, LifecycleError>;

/// Misuse of the lifecycle API or a broken internal invariant
///
/// Handed to [`Platform::abort`](crate::platform::Platform::abort), never returned.
#[derive(Error, Debug, Clone, PartialEq, Eq, Diagnostic)]
pub enum ProtocolViolation {
    #[error("Runtime was shut down. Cannot create new runtimes")]
    #[diagnostic(code(lifecycle::activate_after_shutdown))]
    ActivateAfterShutdown,

    #[error("Runtime is shutting down. Cannot create new runtimes")]
    #[diagnostic(code(lifecycle::activate_during_shutdown))]
    ActivateDuringShutdown,

    #[error("No active runtimes allowed: thread already has a runtime for context {context}")]
    #[diagnostic(
        code(lifecycle::already_active),
        help("Deinitialize the thread's runtime before activating it again, or use init_if_needed.")
    )]
    AlreadyActive { context: u64 },

    #[error("Runtime must be in the running state, found {found:?}")]
    #[diagnostic(code(lifecycle::not_running))]
    NotRunning { found: RuntimeStatus },

    #[error("Cannot shut down the runtime twice")]
    #[diagnostic(code(lifecycle::shutdown_twice))]
    ShutdownTwice,

    #[error("Runtime must have been initialized before shutdown")]
    #[diagnostic(code(lifecycle::shutdown_uninitialized))]
    ShutdownUninitialized,

    #[error("Current thread must have a runtime initialized on it")]
    #[diagnostic(
        code(lifecycle::no_thread_runtime),
        help("Call shutdown from a thread that activated the runtime.")
    )]
    NoThreadRuntime,

    #[error("Global status must be {expected:?}, found {found:?}")]
    #[diagnostic(code(lifecycle::status_invariant))]
    StatusInvariant {
        expected: GlobalStatus,
        found: GlobalStatus,
    },

    #[error("Cannot run checkers when there are {others} alive runtimes at the shutdown")]
    #[diagnostic(
        code(lifecycle::alive_runtimes_at_shutdown),
        help("Deinitialize every other thread's runtime before shutdown, or disable the memory leak checker.")
    )]
    AliveRuntimesAtShutdown { others: usize },

    #[error("Alive runtime count cannot go below zero")]
    #[diagnostic(code(lifecycle::alive_underflow))]
    AliveCountUnderflow,

    #[error("Runtime state is still referenced during teardown")]
    #[diagnostic(code(lifecycle::state_still_referenced))]
    StateStillReferenced,
}
