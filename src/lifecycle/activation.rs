/*!
 * Runtime Activation
 *
 * Brings up the runtime for the calling thread. The first runtime of an
 * epoch also performs the process-wide bring-up and `InitGlobals`.
 */

use super::binding;
use super::context::RuntimeCore;
use super::registry::InitPhase;
use super::status::GlobalStatus;
use super::thread_state::{RuntimeStatus, ThreadRuntime};
use crate::core::errors::{LifecycleError, LifecycleResult, ProtocolViolation};
use crate::core::guard::CounterGuard;
use std::rc::Rc;
use tracing::{debug, info, instrument, warn};

impl RuntimeCore {
    /// Activate a runtime on the calling thread
    ///
    /// The exit hook is registered by the caller once this returns `Ok`.
    #[instrument(level = "debug", skip(self), fields(context = self.id))]
    pub(crate) fn init_runtime(&self) -> LifecycleResult<()> {
        let _initializing = CounterGuard::new(&self.initializing, "initializing runtime");

        match self
            .status
            .try_advance(GlobalStatus::Uninitialized, GlobalStatus::Running)
        {
            Ok(_) => info!(context = self.id, "runtime started"),
            Err(GlobalStatus::Running) => {}
            Err(GlobalStatus::ShuttingDown) => self.fatal(ProtocolViolation::ActivateDuringShutdown),
            Err(GlobalStatus::Shutdown) => self.fatal(ProtocolViolation::ActivateAfterShutdown),
            Err(found) => self.fatal(ProtocolViolation::StatusInvariant {
                expected: GlobalStatus::Running,
                found,
            }),
        }
        self.platform.terminate_handler_init();

        let memory = self.memory.init_memory().map_err(|e| {
            warn!(context = self.id, error = %e, "failed to allocate runtime state");
            LifecycleError::from(e)
        })?;

        if binding::is_bound(self.id) {
            self.fatal(ProtocolViolation::AlreadyActive { context: self.id });
        }

        let worker = self.workers.worker_init(true);
        let runtime = Rc::new(ThreadRuntime::new(memory, worker));
        if binding::publish(self.id, &runtime).is_err() {
            self.release_unpublished(runtime);
            return Err(LifecycleError::ThreadExiting);
        }

        let alive = self.globals.enter();
        if alive == 1 {
            self.globals.begin_init(&self.spin);
            self.platform.console_init();
            self.platform.interop_init();
            self.run_phase(InitPhase::InitGlobals, runtime.memory());
            self.globals.finish_init();
            debug!(context = self.id, "global state initialized");
        } else {
            self.globals.wait_open(&self.spin);
        }

        self.run_phase(InitPhase::InitThreadLocalGlobals, runtime.memory());

        debug_assert_eq!(runtime.status(), RuntimeStatus::Uninitialized);
        runtime.set_status(RuntimeStatus::Running);

        debug!(
            context = self.id,
            alive,
            worker = %runtime.worker_id(),
            "runtime activated"
        );
        Ok(())
    }

    /// Give back the handles of a runtime that was never published or counted
    fn release_unpublished(&self, runtime: Rc<ThreadRuntime>) {
        let runtime = match Rc::into_inner(runtime) {
            Some(runtime) => runtime,
            None => self.fatal(ProtocolViolation::StateStillReferenced),
        };
        let (memory, worker) = runtime.into_parts();
        let worker_id = worker.id();
        self.workers.worker_deinit(worker);
        self.memory.deinit_memory(memory);
        self.workers.destroy_thread_data_if_needed(worker_id);
        warn!(context = self.id, worker = %worker_id, "thread is exiting; activation abandoned");
    }
}
