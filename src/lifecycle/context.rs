/*!
 * Runtime Context
 *
 * Shared state of one managed runtime: the global status register, the
 * counters, the initializer registry, and the subsystems it drives.
 * Activation, teardown and shutdown are implemented on it in their own
 * modules.
 */

use super::config::{LeakCheckers, LifecycleConfig};
use super::globals::GlobalsGate;
use super::registry::{InitPhase, InitializerRegistry};
use super::status::StatusRegister;
use crate::core::errors::ProtocolViolation;
use crate::core::sync::SpinConfig;
use crate::core::types::{ContextId, MemoryHandle};
use crate::platform::Platform;
use crate::subsystems::{CleanerSubsystem, MemorySubsystem, WorkerSubsystem};
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::sync::Arc;

static NEXT_CONTEXT_ID: AtomicU64 = AtomicU64::new(1);

pub(crate) struct RuntimeCore {
    pub(crate) id: ContextId,
    pub(crate) status: StatusRegister,
    /// Activations currently in progress
    pub(crate) initializing: AtomicUsize,
    /// Teardowns that have not finished their thread-local deinit
    pub(crate) tearing_down: AtomicUsize,
    /// Alive runtime count and global phase state
    pub(crate) globals: GlobalsGate,
    pub(crate) registry: InitializerRegistry,
    pub(crate) memory: Arc<dyn MemorySubsystem>,
    pub(crate) workers: Arc<dyn WorkerSubsystem>,
    pub(crate) cleaners: Arc<dyn CleanerSubsystem>,
    pub(crate) platform: Arc<dyn Platform>,
    pub(crate) checkers: LeakCheckers,
    pub(crate) spin: SpinConfig,
}

/// Subsystems a context is assembled from
pub(crate) struct Subsystems {
    pub(crate) memory: Arc<dyn MemorySubsystem>,
    pub(crate) workers: Arc<dyn WorkerSubsystem>,
    pub(crate) cleaners: Arc<dyn CleanerSubsystem>,
    pub(crate) platform: Arc<dyn Platform>,
}

impl RuntimeCore {
    pub(crate) fn new(
        registry: InitializerRegistry,
        subsystems: Subsystems,
        config: LifecycleConfig,
    ) -> Self {
        Self {
            id: NEXT_CONTEXT_ID.fetch_add(1, Ordering::Relaxed),
            status: StatusRegister::new(),
            initializing: AtomicUsize::new(0),
            tearing_down: AtomicUsize::new(0),
            globals: GlobalsGate::new(),
            registry,
            memory: subsystems.memory,
            workers: subsystems.workers,
            cleaners: subsystems.cleaners,
            platform: subsystems.platform,
            checkers: LeakCheckers::new(&config),
            spin: config.spin,
        }
    }

    /// Terminate through the platform
    pub(crate) fn fatal(&self, violation: ProtocolViolation) -> ! {
        self.platform.abort(&violation)
    }

    #[inline]
    pub(crate) fn run_phase(&self, phase: InitPhase, memory: &MemoryHandle) {
        self.registry.run_phase(phase, memory);
    }

    #[inline]
    pub(crate) fn alive_count(&self) -> usize {
        self.globals.alive()
    }

    #[inline]
    pub(crate) fn initializing_count(&self) -> usize {
        self.initializing.load(Ordering::SeqCst)
    }
}

impl std::fmt::Debug for RuntimeCore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RuntimeCore")
            .field("id", &self.id)
            .field("status", &self.status.load())
            .field("alive", &self.alive_count())
            .field("initializing", &self.initializing_count())
            .field("registry", &self.registry)
            .finish_non_exhaustive()
    }
}
