/*!
 * RAII Guards
 *
 * Scoped resources with automatic release on drop.
 *
 * ## Guard Types
 *
 * - **CounterGuard**: Scoped increment of a shared atomic counter
 *   (runtimes initializing, runtimes tearing down)
 * - **ThreadAttachment**: Scoped runtime activation on the current thread
 *   (see [`crate::lifecycle::ThreadAttachment`])
 *
 * ## Example
 *
 * ```
 * use rt_lifecycle::core::guard::{CounterGuard, Guard};
 * use std::sync::atomic::{AtomicUsize, Ordering};
 *
 * let in_flight = AtomicUsize::new(0);
 * {
 *     let guard = CounterGuard::new(&in_flight, "initializing-runtime");
 *     assert!(guard.is_active());
 *     assert_eq!(in_flight.load(Ordering::SeqCst), 1);
 * }
 * assert_eq!(in_flight.load(Ordering::SeqCst), 0);
 * ```
 */

mod counter;
mod traits;

pub use counter::CounterGuard;
pub use traits::{Guard, GuardDrop};

/// Result type for guard operations
pub type GuardResult<T> = Result<T, GuardError>;

/// Errors that can occur during guard operations
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GuardError {
    #[error("Resource already released")]
    AlreadyReleased,
}

/// Guard metadata for observability
#[derive(Debug, Clone)]
pub struct GuardMetadata {
    pub resource_type: &'static str,
    pub creation_time: std::time::Instant,
}

impl GuardMetadata {
    #[inline]
    pub fn new(resource_type: &'static str) -> Self {
        Self {
            resource_type,
            creation_time: std::time::Instant::now(),
        }
    }

    #[inline]
    pub fn lifetime_micros(&self) -> u64 {
        self.creation_time.elapsed().as_micros() as u64
    }
}
