/*!
 * Synchronization Primitives
 *
 * The lifecycle coordinates threads with lock-free atomics only; the single
 * blocking primitive is an unbounded spin-wait with backoff.
 */

mod config;
mod spinwait;

pub use config::SpinConfig;
pub use spinwait::SpinWait;
