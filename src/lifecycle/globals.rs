/*!
 * Globals Gate
 *
 * The alive runtime count and the state of the process-scope phases, packed
 * into one atomic word so that both change together. Orders the global
 * phases against the thread-local ones:
 * - `InitGlobals` completes before any thread-local init of the same epoch
 * - `DeinitGlobals` starts after every thread-local deinit has finished
 * - a new epoch's `InitGlobals` waits for the previous `DeinitGlobals`
 *
 * An epoch spans one 0 -> 1 ... 1 -> 0 excursion of the alive count. The
 * decrement that reaches zero closes the gate in the same update, so an
 * activation arriving afterwards never sees the old epoch's open gate.
 */

use crate::core::sync::{SpinConfig, SpinWait};
use std::sync::atomic::{AtomicUsize, Ordering};

const GATE_BITS: u32 = 2;
const GATE_MASK: usize = (1 << GATE_BITS) - 1;
const ONE: usize = 1 << GATE_BITS;

const DOWN: usize = 0;
const INITIALIZING: usize = 1;
const UP: usize = 2;
const DEINITIALIZING: usize = 3;

#[inline]
const fn gate(word: usize) -> usize {
    word & GATE_MASK
}

#[inline]
const fn count(word: usize) -> usize {
    word >> GATE_BITS
}

#[inline]
const fn with_gate(word: usize, state: usize) -> usize {
    (word & !GATE_MASK) | state
}

#[derive(Debug)]
pub(crate) struct GlobalsGate {
    word: AtomicUsize,
}

impl GlobalsGate {
    pub(crate) const fn new() -> Self {
        Self {
            word: AtomicUsize::new(DOWN),
        }
    }

    #[inline]
    pub(crate) fn alive(&self) -> usize {
        count(self.word.load(Ordering::SeqCst))
    }

    /// Count a new runtime; returns the alive count including it
    ///
    /// A result of 1 means the caller owes `InitGlobals`.
    pub(crate) fn enter(&self) -> usize {
        count(self.word.fetch_add(ONE, Ordering::SeqCst)) + 1
    }

    /// Uncount a runtime; returns the alive count before the call
    ///
    /// `None` when the count is already zero. A result of 1 means the caller
    /// owes `DeinitGlobals`; the gate is closed by this call.
    pub(crate) fn leave(&self) -> Option<usize> {
        self.word
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |word| {
                if count(word) == 0 {
                    return None;
                }
                let next = word - ONE;
                if count(next) == 0 {
                    Some(with_gate(next, DEINITIALIZING))
                } else {
                    Some(next)
                }
            })
            .ok()
            .map(count)
    }

    fn transition(&self, from: usize, to: usize) -> bool {
        self.word
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |word| {
                (gate(word) == from).then(|| with_gate(word, to))
            })
            .is_ok()
    }

    /// Claim the gate for `InitGlobals`, waiting out a previous epoch's teardown
    pub(crate) fn begin_init(&self, spin: &SpinConfig) {
        SpinWait::new("previous globals deinitialized", spin)
            .until(|| self.transition(DOWN, INITIALIZING));
    }

    pub(crate) fn finish_init(&self) {
        self.transition(INITIALIZING, UP);
    }

    /// Wait until `InitGlobals` of the current epoch has completed
    pub(crate) fn wait_open(&self, spin: &SpinConfig) {
        SpinWait::new("globals initialized", spin)
            .until(|| gate(self.word.load(Ordering::SeqCst)) == UP);
    }

    pub(crate) fn finish_deinit(&self) {
        self.transition(DEINITIALIZING, DOWN);
    }

    #[cfg(test)]
    fn is_open(&self) -> bool {
        gate(self.word.load(Ordering::SeqCst)) == UP
    }
}
