/*!
 * Runtime Subsystems
 *
 * Narrow interfaces the lifecycle consumes from the memory/GC, worker and
 * cleaner subsystems. The lifecycle never reaches past these traits.
 */

mod cleaner;
mod memory;
pub mod standalone;
mod worker;

pub use cleaner::CleanerSubsystem;
pub use memory::{MemoryError, MemoryResult, MemorySubsystem};
pub use standalone::{Cleaner, StandaloneCleaners, StandaloneMemory, StandaloneWorkers};
pub use worker::WorkerSubsystem;
