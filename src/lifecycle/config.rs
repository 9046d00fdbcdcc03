/*!
 * Lifecycle Configuration
 *
 * Leak checker defaults and spin-wait tuning, with environment overrides.
 */

use crate::core::limits::{ENV_CHECK_LEAKED_CLEANERS, ENV_CHECK_LEAKS, ENV_SPIN_STALL_WARN_MS};
use crate::core::sync::SpinConfig;
use crate::platform::capabilities::is_debug_binary;
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

/// Configuration for a runtime context
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LifecycleConfig {
    /// Require exactly one live runtime at shutdown
    pub memory_leak_checker: bool,
    /// Collect and run pending cleaners at shutdown instead of dropping them
    pub cleaners_leak_checker: bool,
    /// Spin-wait tuning
    pub spin: SpinConfig,
}

impl Default for LifecycleConfig {
    fn default() -> Self {
        Self {
            memory_leak_checker: is_debug_binary(),
            cleaners_leak_checker: is_debug_binary(),
            spin: SpinConfig::default(),
        }
    }
}

impl LifecycleConfig {
    /// Both leak checkers on
    pub fn checked() -> Self {
        Self {
            memory_leak_checker: true,
            cleaners_leak_checker: true,
            spin: SpinConfig::default(),
        }
    }

    /// Both leak checkers off
    pub fn unchecked() -> Self {
        Self {
            memory_leak_checker: false,
            cleaners_leak_checker: false,
            spin: SpinConfig::default(),
        }
    }

    /// Defaults overridden by `RT_CHECK_LEAKS`, `RT_CHECK_LEAKED_CLEANERS`
    /// and `RT_SPIN_STALL_WARN_MS`
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Some(value) = env_flag(ENV_CHECK_LEAKS) {
            config.memory_leak_checker = value;
        }
        if let Some(value) = env_flag(ENV_CHECK_LEAKED_CLEANERS) {
            config.cleaners_leak_checker = value;
        }
        if let Some(ms) = std::env::var(ENV_SPIN_STALL_WARN_MS)
            .ok()
            .and_then(|v| v.trim().parse::<u64>().ok())
        {
            config.spin.stall_warning = Duration::from_millis(ms);
        }

        config
    }

    #[inline]
    #[must_use]
    pub fn with_memory_leak_checker(mut self, enabled: bool) -> Self {
        self.memory_leak_checker = enabled;
        self
    }

    #[inline]
    #[must_use]
    pub fn with_cleaners_leak_checker(mut self, enabled: bool) -> Self {
        self.cleaners_leak_checker = enabled;
        self
    }

    #[inline]
    #[must_use]
    pub fn with_spin(mut self, spin: SpinConfig) -> Self {
        self.spin = spin;
        self
    }
}

fn env_flag(name: &str) -> Option<bool> {
    let value = std::env::var(name).ok()?;
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

/// Live leak checker flags
///
/// Plain atomic booleans: readable and writable at any time, read by shutdown.
#[derive(Debug)]
pub(crate) struct LeakCheckers {
    memory: AtomicBool,
    cleaners: AtomicBool,
}

impl LeakCheckers {
    pub(crate) fn new(config: &LifecycleConfig) -> Self {
        Self {
            memory: AtomicBool::new(config.memory_leak_checker),
            cleaners: AtomicBool::new(config.cleaners_leak_checker),
        }
    }

    #[inline]
    pub(crate) fn memory(&self) -> bool {
        self.memory.load(Ordering::SeqCst)
    }

    #[inline]
    pub(crate) fn set_memory(&self, enabled: bool) {
        self.memory.store(enabled, Ordering::SeqCst);
    }

    #[inline]
    pub(crate) fn cleaners(&self) -> bool {
        self.cleaners.load(Ordering::SeqCst)
    }

    #[inline]
    pub(crate) fn set_cleaners(&self, enabled: bool) {
        self.cleaners.store(enabled, Ordering::SeqCst);
    }
}
