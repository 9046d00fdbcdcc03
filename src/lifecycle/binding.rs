/*!
 * Thread Bindings
 *
 * The thread-local slot that publishes a thread's runtime for each context,
 * and the exit hook that tears it down when the thread terminates without
 * deinitializing.
 *
 * The slot holds one `Rc` of the runtime plus, once activation succeeded,
 * the hook (a reference to the owning context). Explicit teardown removes
 * the whole entry, hook included, so the hook can never fire for a runtime
 * that is already gone.
 *
 * At thread exit the slot storage is destroyed first and the hooks run from
 * its destructor. From then on every accessor here reports "no runtime":
 * teardown must work from the handle it was given.
 */

use super::context::RuntimeCore;
use super::thread_state::ThreadRuntime;
use crate::core::types::ContextId;
use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Arc;
use std::thread::AccessError;
use tracing::{debug, warn};

thread_local! {
    static SLOTS: RefCell<ThreadSlots> = RefCell::new(ThreadSlots::default());
}

struct Binding {
    context: ContextId,
    runtime: Rc<ThreadRuntime>,
    exit_hook: Option<Arc<RuntimeCore>>,
}

#[derive(Default)]
struct ThreadSlots {
    bindings: Vec<Binding>,
}

impl ThreadSlots {
    fn position(&self, context: ContextId) -> Option<usize> {
        self.bindings.iter().position(|b| b.context == context)
    }
}

impl Drop for ThreadSlots {
    fn drop(&mut self) {
        for binding in std::mem::take(&mut self.bindings) {
            match binding.exit_hook {
                Some(core) => core.on_thread_exit(binding.runtime),
                None => warn!(
                    context = binding.context,
                    "thread exited with a runtime that never finished activating"
                ),
            }
        }
    }
}

/// This thread's runtime for `context`, if one is published
pub(crate) fn current(context: ContextId) -> Option<Rc<ThreadRuntime>> {
    SLOTS
        .try_with(|slots| {
            let slots = slots.borrow();
            slots
                .position(context)
                .map(|i| Rc::clone(&slots.bindings[i].runtime))
        })
        .ok()
        .flatten()
}

pub(crate) fn is_bound(context: ContextId) -> bool {
    SLOTS
        .try_with(|slots| slots.borrow().position(context).is_some())
        .unwrap_or(false)
}

/// Publish `runtime` as this thread's runtime for `context`
///
/// Fails once the slot storage is destroyed (activation from a thread-local
/// destructor at thread exit); nothing is published then.
pub(crate) fn publish(
    context: ContextId,
    runtime: &Rc<ThreadRuntime>,
) -> Result<(), AccessError> {
    SLOTS.try_with(|slots| {
        slots.borrow_mut().bindings.push(Binding {
            context,
            runtime: Rc::clone(runtime),
            exit_hook: None,
        });
    })
}

/// Register the exit hook for this thread's runtime of `core`
pub(crate) fn arm_exit_hook(core: &Arc<RuntimeCore>) {
    let context = core.id;
    let armed = SLOTS
        .try_with(|slots| {
            let mut slots = slots.borrow_mut();
            match slots.position(context) {
                Some(i) => {
                    slots.bindings[i].exit_hook = Some(Arc::clone(core));
                    true
                }
                None => false,
            }
        })
        .unwrap_or(false);

    if armed {
        debug!(context, "thread exit hook registered");
    }
}

/// Remove this thread's entry for `context`, hook included
///
/// No-op once the slot storage is gone (thread exit).
pub(crate) fn unbind(context: ContextId) -> Option<Rc<ThreadRuntime>> {
    SLOTS
        .try_with(|slots| {
            let mut slots = slots.borrow_mut();
            slots
                .position(context)
                .map(|i| slots.bindings.swap_remove(i).runtime)
        })
        .ok()
        .flatten()
}
