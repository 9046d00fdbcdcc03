/*!
 * Core Module
 * Fundamental types, error handling, guards and synchronization helpers
 */

pub mod errors;
pub mod guard;
pub mod limits;
pub mod sync;
pub mod types;

// Re-export for convenience
pub use errors::*;
pub use guard::{CounterGuard, Guard, GuardDrop, GuardError, GuardMetadata, GuardResult};
pub use sync::{SpinConfig, SpinWait};
pub use types::*;
