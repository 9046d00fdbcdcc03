/*!
 * Runtime Context Handle
 *
 * Public entry points of the lifecycle. A `Runtime` is a cheap clonable
 * handle to one context; every thread that uses the runtime activates it
 * once and deinitializes it (or exits) when done.
 */

use super::attach::ThreadAttachment;
use super::binding;
use super::config::LifecycleConfig;
use super::context::{RuntimeCore, Subsystems};
use super::registry::{Initializer, InitializerRegistry};
use super::stats::LifecycleStats;
use super::status::GlobalStatus;
use crate::core::errors::LifecycleResult;
use crate::core::types::ContextId;
use crate::platform::{Platform, ProcessPlatform};
use crate::subsystems::{
    CleanerSubsystem, MemorySubsystem, StandaloneCleaners, StandaloneMemory, StandaloneWorkers,
    WorkerSubsystem,
};
use std::sync::Arc;
use tracing::info;

/// Handle to a managed runtime context
#[derive(Debug, Clone)]
pub struct Runtime {
    core: Arc<RuntimeCore>,
}

impl Runtime {
    pub fn builder() -> RuntimeBuilder {
        RuntimeBuilder::new()
    }

    /// Unique id of this context
    #[inline]
    pub fn id(&self) -> ContextId {
        self.core.id
    }

    /// Activate a runtime on the calling thread
    ///
    /// Terminates the process if the thread already has a runtime for this
    /// context or the runtime was shut down. Fails only when the memory
    /// subsystem cannot provide state for the thread.
    pub fn activate(&self) -> LifecycleResult<()> {
        self.core.init_runtime()?;
        binding::arm_exit_hook(&self.core);
        Ok(())
    }

    /// Activate unless the calling thread already has a runtime
    pub fn init_if_needed(&self) -> LifecycleResult<()> {
        if binding::is_bound(self.core.id) {
            return Ok(());
        }
        self.activate()
    }

    /// Tear down the calling thread's runtime, if it has one
    pub fn deinit_if_needed(&self) {
        if let Some(runtime) = binding::current(self.core.id) {
            self.core.deinit_runtime(runtime);
        }
    }

    /// Activate for the lifetime of the returned guard
    pub fn attach(&self) -> LifecycleResult<ThreadAttachment> {
        self.init_if_needed()?;
        Ok(ThreadAttachment::new(self.clone()))
    }

    /// Shut the runtime down from a thread that has an active runtime
    ///
    /// One-shot: a second call, or a call before any activation, terminates
    /// the process.
    pub fn shutdown(&self) {
        self.core.shutdown_runtime();
    }

    /// Whether the calling thread has a runtime for this context
    #[inline]
    pub fn is_active(&self) -> bool {
        binding::is_bound(self.core.id)
    }

    #[inline]
    pub fn status(&self) -> GlobalStatus {
        self.core.status.load()
    }

    #[inline]
    pub fn alive_runtimes(&self) -> usize {
        self.core.alive_count()
    }

    #[inline]
    pub fn initializing_runtimes(&self) -> usize {
        self.core.initializing_count()
    }

    pub fn memory_leak_checker(&self) -> bool {
        self.core.checkers.memory()
    }

    pub fn set_memory_leak_checker(&self, enabled: bool) {
        self.core.checkers.set_memory(enabled);
    }

    pub fn cleaners_leak_checker(&self) -> bool {
        self.core.checkers.cleaners()
    }

    pub fn set_cleaners_leak_checker(&self, enabled: bool) {
        self.core.checkers.set_cleaners(enabled);
    }

    pub fn stats(&self) -> LifecycleStats {
        LifecycleStats {
            context: self.core.id,
            status: self.status(),
            alive_runtimes: self.alive_runtimes(),
            initializing_runtimes: self.initializing_runtimes(),
            memory_leak_checker: self.memory_leak_checker(),
            cleaners_leak_checker: self.cleaners_leak_checker(),
        }
    }
}

/// Assembles a [`Runtime`]: subsystems, configuration and initializers
///
/// Initializers can only be registered here; the list is frozen by [`build`](Self::build).
pub struct RuntimeBuilder {
    registry: InitializerRegistry,
    memory: Option<Arc<dyn MemorySubsystem>>,
    workers: Option<Arc<dyn WorkerSubsystem>>,
    cleaners: Option<Arc<dyn CleanerSubsystem>>,
    platform: Option<Arc<dyn Platform>>,
    config: LifecycleConfig,
}

impl Default for RuntimeBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl RuntimeBuilder {
    pub fn new() -> Self {
        Self {
            registry: InitializerRegistry::new(),
            memory: None,
            workers: None,
            cleaners: None,
            platform: None,
            config: LifecycleConfig::default(),
        }
    }

    pub fn with_memory(mut self, memory: Arc<dyn MemorySubsystem>) -> Self {
        self.memory = Some(memory);
        self
    }

    pub fn with_workers(mut self, workers: Arc<dyn WorkerSubsystem>) -> Self {
        self.workers = Some(workers);
        self
    }

    pub fn with_cleaners(mut self, cleaners: Arc<dyn CleanerSubsystem>) -> Self {
        self.cleaners = Some(cleaners);
        self
    }

    pub fn with_platform(mut self, platform: Arc<dyn Platform>) -> Self {
        self.platform = Some(platform);
        self
    }

    pub fn with_config(mut self, config: LifecycleConfig) -> Self {
        self.config = config;
        self
    }

    /// Append an initializer; all phases run in registration order
    pub fn register_initializer(mut self, initializer: impl Initializer + 'static) -> Self {
        self.registry.append(Box::new(initializer));
        self
    }

    /// Freeze the registry and create the context
    ///
    /// Subsystems left unset fall back to the standalone implementations and
    /// [`ProcessPlatform`].
    pub fn build(self) -> Runtime {
        let subsystems = Subsystems {
            memory: self
                .memory
                .unwrap_or_else(|| Arc::new(StandaloneMemory::new())),
            workers: self
                .workers
                .unwrap_or_else(|| Arc::new(StandaloneWorkers::new())),
            cleaners: self
                .cleaners
                .unwrap_or_else(|| Arc::new(StandaloneCleaners::new())),
            platform: self.platform.unwrap_or_else(|| Arc::new(ProcessPlatform)),
        };

        let core = RuntimeCore::new(self.registry, subsystems, self.config);
        info!(
            context = core.id,
            initializers = core.registry.len(),
            memory_leak_checker = self.config.memory_leak_checker,
            cleaners_leak_checker = self.config.cleaners_leak_checker,
            "runtime context created"
        );

        Runtime {
            core: Arc::new(core),
        }
    }
}
