/*!
 * Platform Integration
 *
 * Process-wide bring-up performed when the first runtime activates, and the
 * fatal termination path for protocol violations.
 */

pub mod capabilities;

pub use capabilities::{CpuArchitecture, MemoryModel, OsFamily, PlatformInfo};

use crate::core::errors::ProtocolViolation;
use std::io::Write;
use std::panic;
use std::sync::Once;
use tracing::error;

static TERMINATE_HANDLER: Once = Once::new();

/// Platform hooks consumed by the lifecycle
pub trait Platform: Send + Sync {
    /// Install the handler for uncaught failures; runs on every activation
    fn terminate_handler_init(&self) {}

    /// Console bring-up, run once per first activation
    fn console_init(&self) {}

    /// Foreign interop bring-up, run after the console on first activation
    fn interop_init(&self) {}

    /// Terminate on a protocol violation
    ///
    /// Never returns: continuing in a violated state cannot be made safe.
    fn abort(&self, violation: &ProtocolViolation) -> !;
}

/// Platform for a real process: violations abort it
#[derive(Debug, Default, Clone, Copy)]
pub struct ProcessPlatform;

impl Platform for ProcessPlatform {
    fn terminate_handler_init(&self) {
        TERMINATE_HANDLER.call_once(|| {
            let previous = panic::take_hook();
            panic::set_hook(Box::new(move |info| {
                let thread = std::thread::current();
                error!(
                    thread = thread.name().unwrap_or("<unnamed>"),
                    panic = %info,
                    "uncaught panic on a runtime thread"
                );
                previous(info);
            }));
        });
    }

    fn abort(&self, violation: &ProtocolViolation) -> ! {
        error!(violation = %violation, "fatal runtime protocol violation");
        let mut stderr = std::io::stderr().lock();
        let _ = writeln!(stderr, "{}", violation);
        let _ = stderr.flush();
        std::process::abort()
    }
}
