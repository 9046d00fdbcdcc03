/*!
 * Runtime Lifecycle
 *
 * Global status register, initializer registry, per-thread runtimes and the
 * activation, teardown and shutdown protocols that tie them together.
 *
 * ## Phases
 *
 * - **InitGlobals / DeinitGlobals**: once per epoch, run by the first and
 *   the last runtime
 * - **InitThreadLocalGlobals / DeinitThreadLocalGlobals**: once per
 *   activated thread
 *
 * ## Example
 *
 * ```
 * use rt_lifecycle::lifecycle::{GlobalStatus, LifecycleConfig, Runtime};
 *
 * let runtime = Runtime::builder()
 *     .with_config(LifecycleConfig::unchecked())
 *     .build();
 *
 * runtime.activate().unwrap();
 * assert_eq!(runtime.status(), GlobalStatus::Running);
 *
 * runtime.shutdown();
 * assert_eq!(runtime.status(), GlobalStatus::Shutdown);
 * ```
 */

mod activation;
mod attach;
mod binding;
mod config;
mod context;
mod globals;
mod registry;
mod runtime;
mod shutdown;
mod stats;
mod status;
mod teardown;
mod thread_state;

pub use attach::ThreadAttachment;
pub use config::LifecycleConfig;
pub use registry::{InitPhase, Initializer, InitializerRegistry};
pub use runtime::{Runtime, RuntimeBuilder};
pub use stats::LifecycleStats;
pub use status::{GlobalStatus, StatusRegister};
pub use thread_state::RuntimeStatus;
