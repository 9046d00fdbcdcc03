/*!
 * Counter Guards
 *
 * Scoped increment of a shared atomic counter, decremented exactly once on
 * release or drop (including unwinding).
 */

use super::traits::{Guard, GuardDrop};
use super::{GuardError, GuardMetadata, GuardResult};
use std::sync::atomic::{AtomicUsize, Ordering};

/// Holds one unit of a shared counter for its lifetime
pub struct CounterGuard<'a> {
    counter: &'a AtomicUsize,
    metadata: GuardMetadata,
    active: bool,
}

impl<'a> CounterGuard<'a> {
    /// Increment `counter` and return the guard that gives it back
    #[inline]
    pub fn new(counter: &'a AtomicUsize, resource_type: &'static str) -> Self {
        counter.fetch_add(1, Ordering::SeqCst);
        Self {
            counter,
            metadata: GuardMetadata::new(resource_type),
            active: true,
        }
    }
}

impl Guard for CounterGuard<'_> {
    fn resource_type(&self) -> &'static str {
        self.metadata.resource_type
    }

    fn metadata(&self) -> &GuardMetadata {
        &self.metadata
    }

    fn is_active(&self) -> bool {
        self.active
    }

    fn release(&mut self) -> GuardResult<()> {
        if !self.active {
            return Err(GuardError::AlreadyReleased);
        }
        self.active = false;
        self.counter.fetch_sub(1, Ordering::SeqCst);
        Ok(())
    }
}

impl GuardDrop for CounterGuard<'_> {
    fn on_drop(&mut self) {
        if self.active {
            if let Err(e) = self.release() {
                log::error!("{} guard drop failed: {}", self.metadata.resource_type, e);
            }
        }
    }
}

impl Drop for CounterGuard<'_> {
    fn drop(&mut self) {
        self.on_drop();
    }
}
