/*!
 * Initializer Registry
 *
 * Ordered, append-only list of initializers. Appends happen on the builder
 * during startup; once a runtime context exists the list is immutable and is
 * walked without synchronization.
 *
 * Every phase walks the list head-to-tail. Deinit phases are NOT reversed:
 * deinit order equals init order.
 */

use crate::core::types::MemoryHandle;
use log::trace;
use serde::{Deserialize, Serialize};

/// Phase selector passed to every initializer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[repr(u8)]
pub enum InitPhase {
    InitGlobals = 0,
    InitThreadLocalGlobals = 1,
    DeinitThreadLocalGlobals = 2,
    DeinitGlobals = 3,
}

impl InitPhase {
    /// Process-scope phases run at most once per runtime epoch
    #[inline]
    pub fn is_global(self) -> bool {
        matches!(self, InitPhase::InitGlobals | InitPhase::DeinitGlobals)
    }

    #[inline]
    pub fn is_init(self) -> bool {
        matches!(self, InitPhase::InitGlobals | InitPhase::InitThreadLocalGlobals)
    }
}

/// Global or thread-local state setup/teardown hook
///
/// Invoked for all four phases; implementations act only on the phases they
/// care about.
pub trait Initializer: Send + Sync {
    fn run(&self, phase: InitPhase, memory: &MemoryHandle);

    fn name(&self) -> &str {
        std::any::type_name::<Self>()
    }
}

impl<F> Initializer for F
where
    F: Fn(InitPhase, &MemoryHandle) + Send + Sync,
{
    fn run(&self, phase: InitPhase, memory: &MemoryHandle) {
        self(phase, memory)
    }
}

/// Append-only initializer list
#[derive(Default)]
pub struct InitializerRegistry {
    nodes: Vec<Box<dyn Initializer>>,
}

impl InitializerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an initializer at the tail
    pub fn append(&mut self, initializer: Box<dyn Initializer>) {
        trace!("Initializer '{}' registered at position {}", initializer.name(), self.nodes.len());
        self.nodes.push(initializer);
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Invoke every initializer, in registration order, for `phase`
    pub fn run_phase(&self, phase: InitPhase, memory: &MemoryHandle) {
        for node in &self.nodes {
            trace!("Running {:?} for '{}'", phase, node.name());
            node.run(phase, memory);
        }
    }
}

impl std::fmt::Debug for InitializerRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list()
            .entries(self.nodes.iter().map(|n| n.name()))
            .finish()
    }
}
