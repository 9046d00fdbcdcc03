/*!
 * Unbounded Spin-Wait
 *
 * Busy-polls a condition with exponential backoff. Used where the lifecycle
 * must wait out short, lock-free critical sections on other threads
 * (in-flight activations, global phases).
 *
 * There is no timeout: a condition that never becomes true stalls the caller
 * forever. A single warning is logged once the configured stall threshold
 * has passed.
 */

use super::config::SpinConfig;
use crossbeam_utils::Backoff;
use std::time::Instant;
use tracing::warn;

/// Spin-wait for one named condition
pub struct SpinWait<'a> {
    what: &'static str,
    config: &'a SpinConfig,
}

impl<'a> SpinWait<'a> {
    /// Create a spin-wait; `what` names the awaited condition in stall warnings
    pub fn new(what: &'static str, config: &'a SpinConfig) -> Self {
        Self { what, config }
    }

    /// Spin until `check` returns true
    ///
    /// Returns the number of failed polls.
    pub fn until(&self, mut check: impl FnMut() -> bool) -> u64 {
        let backoff = Backoff::new();
        let mut start: Option<Instant> = None;
        let mut warned = false;
        let mut polls = 0u64;

        while !check() {
            polls += 1;

            // Only look at the clock once the backoff has escalated to yielding
            if backoff.is_completed() && !warned {
                let started = *start.get_or_insert_with(Instant::now);
                if started.elapsed() >= self.config.stall_warning {
                    warn!(
                        condition = self.what,
                        waited_ms = started.elapsed().as_millis() as u64,
                        "spin-wait is stalled"
                    );
                    warned = true;
                }
            }

            backoff.snooze();
        }

        polls
    }
}
