/*!
 * Runtime Shutdown
 *
 * One-shot, irreversible process-wide shutdown driven from a thread that has
 * an active runtime. Drains or discards pending cleaners, seals the status
 * register, optionally checks that no other runtime is still alive, then
 * tears down the calling thread's runtime.
 */

use super::binding;
use super::context::RuntimeCore;
use super::status::GlobalStatus;
use crate::core::errors::ProtocolViolation;
use crate::core::sync::SpinWait;
use std::sync::atomic::Ordering;
use tracing::{debug, info, instrument};

impl RuntimeCore {
    #[instrument(level = "debug", skip(self), fields(context = self.id))]
    pub(crate) fn shutdown_runtime(&self) {
        match self
            .status
            .try_advance(GlobalStatus::Running, GlobalStatus::ShuttingDown)
        {
            Ok(_) => info!(context = self.id, "runtime shutting down"),
            Err(GlobalStatus::ShuttingDown | GlobalStatus::Shutdown) => {
                self.fatal(ProtocolViolation::ShutdownTwice)
            }
            Err(GlobalStatus::Uninitialized) => self.fatal(ProtocolViolation::ShutdownUninitialized),
            Err(found) => self.fatal(ProtocolViolation::StatusInvariant {
                expected: GlobalStatus::Running,
                found,
            }),
        }

        let runtime = match binding::current(self.id) {
            Some(runtime) => runtime,
            None => self.fatal(ProtocolViolation::NoThreadRuntime),
        };

        let check_cleaners = self.checkers.cleaners();
        if check_cleaners {
            self.memory.perform_full_gc(runtime.memory());
        }
        self.cleaners.shutdown_cleaners(check_cleaners);
        debug!(context = self.id, executed_pending = check_cleaners, "cleaners stopped");

        if let Err(found) = self
            .status
            .try_advance(GlobalStatus::ShuttingDown, GlobalStatus::Shutdown)
        {
            self.fatal(ProtocolViolation::StatusInvariant {
                expected: GlobalStatus::ShuttingDown,
                found,
            });
        }

        // Activations that raced with us fail on the sealed status; wait them out
        SpinWait::new("in-flight activations", &self.spin)
            .until(|| self.initializing.load(Ordering::SeqCst) == 0);

        if self.checkers.memory() {
            self.workers.wait_native_workers_termination();

            let others = match self.alive_count().checked_sub(1) {
                Some(others) => others,
                None => self.fatal(ProtocolViolation::AliveCountUnderflow),
            };
            if others > 0 {
                self.fatal(ProtocolViolation::AliveRuntimesAtShutdown { others });
            }
        }

        self.deinit_runtime(runtime);
        info!(context = self.id, "runtime shut down");
    }
}
