/*!
 * Thread Exit Hook Tests
 * Threads that terminate without deinitializing their runtime
 */

use crate::common::Harness;
use parking_lot::Mutex;
use pretty_assertions::assert_eq;
use rt_lifecycle::{
    InitPhase, LifecycleConfig, LifecycleError, LifecycleResult, MemoryHandle, Runtime,
    StandaloneMemory,
};
use std::cell::RefCell;
use std::sync::{mpsc, Arc};
use std::thread;

#[test]
fn test_thread_exit_tears_down_runtime() {
    let h = Harness::new(LifecycleConfig::unchecked());
    h.runtime.activate().unwrap();

    let runtime = h.runtime.clone();
    thread::spawn(move || {
        runtime.activate().unwrap();
        assert_eq!(runtime.alive_runtimes(), 2);
    })
    .join()
    .unwrap();

    assert_eq!(h.runtime.alive_runtimes(), 1);
    assert_eq!(h.recorder.count(InitPhase::DeinitThreadLocalGlobals), 1);
    assert_eq!(h.recorder.count(InitPhase::DeinitGlobals), 0);
    assert_eq!(h.memory.live_states(), 1);
    assert_eq!(h.workers.live_workers(), 1);

    h.runtime.deinit_if_needed();
}

#[test]
fn test_last_thread_exit_deinitializes_globals() {
    let h = Harness::new(LifecycleConfig::unchecked());

    let runtime = h.runtime.clone();
    thread::spawn(move || runtime.activate().unwrap())
        .join()
        .unwrap();

    assert_eq!(h.runtime.alive_runtimes(), 0);
    assert_eq!(
        h.recorder.events(),
        vec![
            InitPhase::InitGlobals,
            InitPhase::InitThreadLocalGlobals,
            InitPhase::DeinitThreadLocalGlobals,
            InitPhase::DeinitGlobals,
        ]
    );
    assert_eq!(h.memory.restore_count(), 1);
    assert_eq!(h.memory.live_states(), 0);
    assert_eq!(h.workers.workers_with_thread_data(), 0);
}

#[test]
fn test_explicit_deinit_disarms_exit_hook() {
    let h = Harness::new(LifecycleConfig::unchecked());

    let runtime = h.runtime.clone();
    thread::spawn(move || {
        runtime.activate().unwrap();
        runtime.deinit_if_needed();
        assert!(!runtime.is_active());
    })
    .join()
    .unwrap();

    assert_eq!(h.recorder.count(InitPhase::DeinitThreadLocalGlobals), 1);
    assert_eq!(h.recorder.count(InitPhase::DeinitGlobals), 1);
    assert_eq!(h.memory.restore_count(), 1);
}

#[test]
fn test_reactivated_thread_is_torn_down_once_at_exit() {
    let h = Harness::new(LifecycleConfig::unchecked());

    let runtime = h.runtime.clone();
    thread::spawn(move || {
        runtime.activate().unwrap();
        runtime.deinit_if_needed();
        runtime.activate().unwrap();
    })
    .join()
    .unwrap();

    assert_eq!(h.runtime.alive_runtimes(), 0);
    assert_eq!(h.recorder.count(InitPhase::InitThreadLocalGlobals), 2);
    assert_eq!(h.recorder.count(InitPhase::DeinitThreadLocalGlobals), 2);
    assert_eq!(h.memory.live_states(), 0);
}

#[test]
fn test_many_threads_exit_without_deinit() {
    let h = Harness::new(LifecycleConfig::unchecked());

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let runtime = h.runtime.clone();
            thread::spawn(move || runtime.activate().unwrap())
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    assert_eq!(h.runtime.alive_runtimes(), 0);
    assert_eq!(h.recorder.count(InitPhase::InitThreadLocalGlobals), 8);
    assert_eq!(h.recorder.count(InitPhase::DeinitThreadLocalGlobals), 8);
    assert_eq!(
        h.recorder.count(InitPhase::InitGlobals),
        h.recorder.count(InitPhase::DeinitGlobals)
    );
    assert_eq!(h.memory.live_states(), 0);
    assert_eq!(h.workers.live_workers(), 0);
}

/// Activates its runtime when the owning thread destroys it
struct ActivateOnExit {
    runtime: Runtime,
    results: mpsc::Sender<(LifecycleResult<()>, LifecycleResult<()>)>,
}

impl Drop for ActivateOnExit {
    fn drop(&mut self) {
        let activated = self.runtime.activate();
        let if_needed = self.runtime.init_if_needed();
        let _ = self.results.send((activated, if_needed));
    }
}

thread_local! {
    static ACTIVATE_ON_EXIT: RefCell<Option<ActivateOnExit>> = RefCell::new(None);
}

#[test]
fn test_activation_from_exiting_thread_releases_state() {
    let h = Harness::new(LifecycleConfig::unchecked());
    h.runtime.activate().unwrap();

    let (tx, rx) = mpsc::channel();
    let runtime = h.runtime.clone();
    thread::spawn(move || {
        // Registered before the runtime slot, so destroyed after it
        let guard = ActivateOnExit {
            runtime: runtime.clone(),
            results: tx,
        };
        ACTIVATE_ON_EXIT.with(|slot| *slot.borrow_mut() = Some(guard));

        runtime.activate().unwrap();
    })
    .join()
    .unwrap();

    let (activated, if_needed) = rx.recv().unwrap();
    assert_eq!(activated, Err(LifecycleError::ThreadExiting));
    assert_eq!(if_needed, Err(LifecycleError::ThreadExiting));

    assert_eq!(h.runtime.alive_runtimes(), 1);
    assert_eq!(h.runtime.initializing_runtimes(), 0);
    assert_eq!(h.memory.live_states(), 1);
    assert_eq!(h.workers.live_workers(), 1);
    assert_eq!(h.workers.workers_with_thread_data(), 1);
    assert_eq!(h.recorder.count(InitPhase::InitThreadLocalGlobals), 2);
    assert_eq!(h.recorder.count(InitPhase::DeinitThreadLocalGlobals), 1);

    h.runtime.deinit_if_needed();
    assert_eq!(h.runtime.alive_runtimes(), 0);
    assert_eq!(h.recorder.count(InitPhase::DeinitGlobals), 1);
}

#[test]
fn test_exit_hook_runs_after_other_thread_locals_are_gone() {
    // Whether the thread's other TLS is still reachable when the deinit phase runs
    let reachable = Arc::new(Mutex::new(Vec::new()));
    let seen = reachable.clone();
    let h = Harness::build(LifecycleConfig::unchecked(), StandaloneMemory::new(), |builder| {
        builder.register_initializer(move |phase: InitPhase, _memory: &MemoryHandle| {
            if phase == InitPhase::DeinitThreadLocalGlobals {
                seen.lock().push(LATE_SCRATCH.try_with(|_| ()).is_ok());
            }
        })
    });

    let runtime = h.runtime.clone();
    thread::spawn(move || {
        runtime.activate().unwrap();
        // Registered after the runtime slot, so destroyed before it
        LATE_SCRATCH.with(|scratch| scratch.borrow_mut().push(1));
    })
    .join()
    .unwrap();

    assert_eq!(*reachable.lock(), vec![false]);
    assert_eq!(h.runtime.alive_runtimes(), 0);
    assert_eq!(h.recorder.count(InitPhase::DeinitGlobals), 1);
    assert_eq!(h.memory.live_states(), 0);
    assert_eq!(h.workers.live_workers(), 0);
    assert_eq!(h.workers.workers_with_thread_data(), 0);
}

thread_local! {
    static LATE_SCRATCH: RefCell<Vec<usize>> = RefCell::new(Vec::new());
}
