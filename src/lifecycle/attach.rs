/*!
 * Thread Attachment Guard
 *
 * Scoped activation: the thread's runtime is deinitialized when the guard is
 * dropped or released.
 */

use super::runtime::Runtime;
use crate::core::guard::{Guard, GuardDrop, GuardError, GuardMetadata, GuardResult};
use std::marker::PhantomData;
use std::rc::Rc;

/// Keeps the calling thread's runtime active for its lifetime
///
/// Bound to the thread that created it.
#[must_use = "the runtime is deinitialized when the attachment is dropped"]
pub struct ThreadAttachment {
    runtime: Runtime,
    metadata: GuardMetadata,
    active: bool,
    _not_send: PhantomData<Rc<()>>,
}

impl ThreadAttachment {
    pub(crate) fn new(runtime: Runtime) -> Self {
        Self {
            runtime,
            metadata: GuardMetadata::new("thread attachment"),
            active: true,
            _not_send: PhantomData,
        }
    }

    pub fn runtime(&self) -> &Runtime {
        &self.runtime
    }
}

impl Guard for ThreadAttachment {
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
        self.runtime.deinit_if_needed();
        Ok(())
    }
}

impl GuardDrop for ThreadAttachment {
    fn on_drop(&mut self) {
        if self.active {
            if let Err(e) = self.release() {
                log::error!("{} guard drop failed: {}", self.metadata.resource_type, e);
            }
        }
    }
}

impl Drop for ThreadAttachment {
    fn drop(&mut self) {
        self.on_drop();
    }
}

impl std::fmt::Debug for ThreadAttachment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ThreadAttachment")
            .field("context", &self.runtime.id())
            .field("active", &self.active)
            .finish()
    }
}
