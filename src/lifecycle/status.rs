/*!
 * Global Status Register
 *
 * Process-wide lifecycle phase, advanced only by compare-and-swap along
 * `Uninitialized -> Running -> ShuttingDown -> Shutdown`. No value is ever
 * revisited; `Shutdown` is terminal.
 */

use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU8, Ordering};

/// Process-wide runtime phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[repr(u8)]
pub enum GlobalStatus {
    Uninitialized = 0,
    Running = 1,
    ShuttingDown = 2,
    Shutdown = 3,
}

impl GlobalStatus {
    pub const ALL: [GlobalStatus; 4] = [
        GlobalStatus::Uninitialized,
        GlobalStatus::Running,
        GlobalStatus::ShuttingDown,
        GlobalStatus::Shutdown,
    ];

    #[inline]
    const fn from_raw(raw: u8) -> Self {
        match raw {
            0 => GlobalStatus::Uninitialized,
            1 => GlobalStatus::Running,
            2 => GlobalStatus::ShuttingDown,
            // Only the four discriminants are ever stored
            _ => GlobalStatus::Shutdown,
        }
    }

    /// The only status this one may advance to
    #[inline]
    pub const fn successor(self) -> Option<Self> {
        match self {
            GlobalStatus::Uninitialized => Some(GlobalStatus::Running),
            GlobalStatus::Running => Some(GlobalStatus::ShuttingDown),
            GlobalStatus::ShuttingDown => Some(GlobalStatus::Shutdown),
            GlobalStatus::Shutdown => None,
        }
    }

    #[inline]
    pub fn can_advance_to(self, next: GlobalStatus) -> bool {
        self.successor() == Some(next)
    }

    #[inline]
    pub fn is_terminal(self) -> bool {
        self == GlobalStatus::Shutdown
    }
}

/// Atomic holder of the [`GlobalStatus`]
#[derive(Debug)]
pub struct StatusRegister {
    value: AtomicU8,
}

impl Default for StatusRegister {
    fn default() -> Self {
        Self::new()
    }
}

impl StatusRegister {
    pub const fn new() -> Self {
        Self {
            value: AtomicU8::new(GlobalStatus::Uninitialized as u8),
        }
    }

    #[inline]
    pub fn load(&self) -> GlobalStatus {
        GlobalStatus::from_raw(self.value.load(Ordering::Acquire))
    }

    /// Compare-and-swap `from -> to`
    ///
    /// Returns `Ok(from)` when this call performed the transition, otherwise
    /// `Err(observed)` with the value found in the register. Pairs that are not
    /// a forward edge never modify the register.
    pub fn try_advance(
        &self,
        from: GlobalStatus,
        to: GlobalStatus,
    ) -> Result<GlobalStatus, GlobalStatus> {
        if !from.can_advance_to(to) {
            return Err(self.load());
        }

        self.value
            .compare_exchange(from as u8, to as u8, Ordering::AcqRel, Ordering::Acquire)
            .map(GlobalStatus::from_raw)
            .map_err(GlobalStatus::from_raw)
    }
}
