/*!
 * Standalone Subsystems
 *
 * Self-contained in-process implementations of the subsystem traits. They
 * keep enough bookkeeping (live handles, collections, queued cleaners) to
 * drive the lifecycle without an embedding runtime: the demo binary,
 * benches and tests use them.
 */

use super::{CleanerSubsystem, MemoryError, MemoryResult, MemorySubsystem, WorkerSubsystem};
use crate::core::types::{MemoryHandle, WorkerHandle, WorkerId};
use ahash::HashSet;
use crossbeam_queue::SegQueue;
use log::{debug, info, warn};
use parking_lot::Mutex;
use std::sync::atomic::{AtomicBool, AtomicU64, AtomicUsize, Ordering};
use std::thread::{self, JoinHandle, ThreadId};

// =============================================================================
// MEMORY
// =============================================================================

/// Memory subsystem that hands out numbered states
#[derive(Debug, Default)]
pub struct StandaloneMemory {
    next_id: AtomicU64,
    live: Mutex<HashSet<u64>>,
    max_live: Option<usize>,
    restores: AtomicU64,
    collections: AtomicU64,
}

impl StandaloneMemory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fail `init_memory` once `max_live` states exist
    pub fn with_capacity(max_live: usize) -> Self {
        Self {
            max_live: Some(max_live),
            ..Self::default()
        }
    }

    /// Number of memory states not yet destroyed
    pub fn live_states(&self) -> usize {
        self.live.lock().len()
    }

    pub fn restore_count(&self) -> u64 {
        self.restores.load(Ordering::SeqCst)
    }

    pub fn collection_count(&self) -> u64 {
        self.collections.load(Ordering::SeqCst)
    }
}

impl MemorySubsystem for StandaloneMemory {
    fn init_memory(&self) -> MemoryResult<MemoryHandle> {
        let mut live = self.live.lock();
        if let Some(max) = self.max_live {
            if live.len() >= max {
                return Err(MemoryError::OutOfMemory(format!(
                    "{} memory states already live",
                    live.len()
                )));
            }
        }

        let id = self.next_id.fetch_add(1, Ordering::Relaxed) + 1;
        live.insert(id);
        debug!("Memory state {} created", id);
        Ok(MemoryHandle::new(id))
    }

    fn restore_memory(&self, memory: &MemoryHandle) {
        self.restores.fetch_add(1, Ordering::SeqCst);
        debug!("Memory state {} restored", memory.id());
    }

    fn deinit_memory(&self, memory: MemoryHandle) {
        if !self.live.lock().remove(&memory.id()) {
            warn!("Memory state {} destroyed twice or never created", memory.id());
        }
    }

    fn perform_full_gc(&self, memory: &MemoryHandle) {
        self.collections.fetch_add(1, Ordering::SeqCst);
        debug!("Full collection on memory state {}", memory.id());
    }
}

// =============================================================================
// WORKERS
// =============================================================================

/// Worker subsystem with tracked native worker threads
///
/// Native workers are joined, not counted: a thread's runtime exit hook runs
/// in its TLS destructors, after the worker closure has returned, and only
/// `join` waits for those.
#[derive(Debug, Default)]
pub struct StandaloneWorkers {
    next_id: AtomicU64,
    live: Mutex<HashSet<WorkerId>>,
    thread_data: Mutex<HashSet<WorkerId>>,
    native: Mutex<Vec<JoinHandle<()>>>,
    native_panics: AtomicUsize,
}

impl StandaloneWorkers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Spawn a native worker thread that `wait_native_workers_termination` joins
    pub fn spawn_native<F>(&self, work: F) -> ThreadId
    where
        F: FnOnce() + Send + 'static,
    {
        let handle = thread::spawn(work);
        let id = handle.thread().id();
        self.native.lock().push(handle);
        id
    }

    pub fn live_workers(&self) -> usize {
        self.live.lock().len()
    }

    /// Workers whose thread data has not been released yet
    pub fn workers_with_thread_data(&self) -> usize {
        self.thread_data.lock().len()
    }

    /// Native workers not joined yet
    pub fn native_running(&self) -> usize {
        self.native.lock().len()
    }

    /// Native workers whose closure panicked
    pub fn native_panics(&self) -> usize {
        self.native_panics.load(Ordering::SeqCst)
    }
}

impl WorkerSubsystem for StandaloneWorkers {
    fn worker_init(&self, is_main: bool) -> WorkerHandle {
        let id = WorkerId(self.next_id.fetch_add(1, Ordering::Relaxed) + 1);
        self.live.lock().insert(id);
        self.thread_data.lock().insert(id);
        debug!("Worker {} initialized (main: {})", id, is_main);
        WorkerHandle::new(id, is_main)
    }

    fn worker_deinit(&self, worker: WorkerHandle) {
        if !self.live.lock().remove(&worker.id()) {
            warn!("Worker {} deinitialized twice or never created", worker.id());
        }
    }

    fn destroy_thread_data_if_needed(&self, id: WorkerId) {
        if self.thread_data.lock().remove(&id) {
            debug!("Thread data for {} destroyed", id);
        }
    }

    fn wait_native_workers_termination(&self) {
        let me = thread::current().id();
        loop {
            let (own, pending): (Vec<_>, Vec<_>) = std::mem::take(&mut *self.native.lock())
                .into_iter()
                .partition(|handle| handle.thread().id() == me);
            // A worker cannot join itself
            self.native.lock().extend(own);
            if pending.is_empty() {
                break;
            }

            for handle in pending {
                let id = handle.thread().id();
                if handle.join().is_err() {
                    self.native_panics.fetch_add(1, Ordering::SeqCst);
                    warn!("Native worker {:?} panicked", id);
                }
            }
        }
    }
}

// =============================================================================
// CLEANERS
// =============================================================================

/// A deferred finalizer
pub type Cleaner = Box<dyn FnOnce() + Send>;

/// Cleaner subsystem backed by a lock-free queue
#[derive(Default)]
pub struct StandaloneCleaners {
    pending: SegQueue<Cleaner>,
    stopped: AtomicBool,
    executed: AtomicUsize,
    discarded: AtomicUsize,
}

impl StandaloneCleaners {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a cleaner; returns false once the subsystem has been shut down
    pub fn schedule(&self, cleaner: Cleaner) -> bool {
        if self.stopped.load(Ordering::SeqCst) {
            warn!("Cleaner scheduled after shutdown; dropping it");
            return false;
        }
        self.pending.push(cleaner);
        true
    }

    pub fn pending(&self) -> usize {
        self.pending.len()
    }

    pub fn executed(&self) -> usize {
        self.executed.load(Ordering::SeqCst)
    }

    pub fn discarded(&self) -> usize {
        self.discarded.load(Ordering::SeqCst)
    }

    pub fn is_stopped(&self) -> bool {
        self.stopped.load(Ordering::SeqCst)
    }
}

impl CleanerSubsystem for StandaloneCleaners {
    fn shutdown_cleaners(&self, execute_pending: bool) {
        self.stopped.store(true, Ordering::SeqCst);

        while let Some(cleaner) = self.pending.pop() {
            if execute_pending {
                cleaner();
                self.executed.fetch_add(1, Ordering::SeqCst);
            } else {
                self.discarded.fetch_add(1, Ordering::SeqCst);
            }
        }

        info!(
            "Cleaners stopped ({} executed, {} discarded)",
            self.executed(),
            self.discarded()
        );
    }
}
