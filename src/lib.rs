/*!
 * Runtime Lifecycle Library
 * Lifecycle controller for a managed runtime embedded in a native process
 */

pub mod core;
pub mod lifecycle;
pub mod monitoring;
pub mod platform;
pub mod subsystems;

// Re-exports
pub use crate::core::errors::{LifecycleError, LifecycleResult, ProtocolViolation};
pub use crate::core::types::{ContextId, MemoryHandle, WorkerHandle, WorkerId};
pub use lifecycle::{
    GlobalStatus, InitPhase, Initializer, LifecycleConfig, LifecycleStats, Runtime,
    RuntimeBuilder, RuntimeStatus, ThreadAttachment,
};
pub use monitoring::init_tracing;
pub use platform::{MemoryModel, Platform, PlatformInfo, ProcessPlatform};
pub use subsystems::{
    CleanerSubsystem, MemoryError, MemorySubsystem, StandaloneCleaners, StandaloneMemory,
    StandaloneWorkers, WorkerSubsystem,
};
