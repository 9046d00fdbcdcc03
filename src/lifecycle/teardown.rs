/*!
 * Per-Thread Teardown
 *
 * Ordinary deinitialization of one thread's runtime, explicit or from the
 * thread exit hook. The last runtime of an epoch also runs `DeinitGlobals`.
 *
 * Never reads the thread-local slot to find its runtime: at thread exit the
 * slot is already gone and the handle is passed in.
 */

use super::binding;
use super::context::RuntimeCore;
use super::registry::InitPhase;
use super::thread_state::{RuntimeStatus, ThreadRuntime};
use crate::core::errors::ProtocolViolation;
use crate::core::guard::CounterGuard;
use crate::core::sync::SpinWait;
use std::rc::Rc;
use std::sync::atomic::Ordering;
use tracing::{debug, info};

impl RuntimeCore {
    pub(crate) fn deinit_runtime(&self, runtime: Rc<ThreadRuntime>) {
        let found = runtime.status();
        if found != RuntimeStatus::Running {
            self.fatal(ProtocolViolation::NotRunning { found });
        }
        runtime.set_status(RuntimeStatus::Destroying);

        let previous = {
            let _tearing_down = CounterGuard::new(&self.tearing_down, "tearing down runtime");

            self.memory.restore_memory(runtime.memory());

            let previous = match self.globals.leave() {
                Some(previous) => previous,
                None => self.fatal(ProtocolViolation::AliveCountUnderflow),
            };
            self.run_phase(InitPhase::DeinitThreadLocalGlobals, runtime.memory());
            previous
        };
        let last = previous == 1;

        if last {
            SpinWait::new("thread-local teardowns finished", &self.spin)
                .until(|| self.tearing_down.load(Ordering::SeqCst) == 0);
            self.run_phase(InitPhase::DeinitGlobals, runtime.memory());
            self.globals.finish_deinit();
            info!(context = self.id, "last runtime gone; global state deinitialized");
        }

        let worker_id = runtime.worker_id();
        binding::unbind(self.id);

        let runtime = match Rc::into_inner(runtime) {
            Some(runtime) => runtime,
            None => self.fatal(ProtocolViolation::StateStillReferenced),
        };
        let (memory, worker) = runtime.into_parts();
        self.workers.worker_deinit(worker);
        self.memory.deinit_memory(memory);
        self.workers.destroy_thread_data_if_needed(worker_id);

        debug!(context = self.id, alive = previous - 1, worker = %worker_id, "runtime torn down");
    }

    /// Exit hook body: tear down `runtime` if it is still running
    pub(crate) fn on_thread_exit(&self, runtime: Rc<ThreadRuntime>) {
        match runtime.status() {
            RuntimeStatus::Running => {
                debug!(context = self.id, "thread exiting with an active runtime");
                self.deinit_runtime(runtime);
            }
            status => debug!(context = self.id, ?status, "exit hook skipped"),
        }
    }
}
