/*!
 * Teardown Tests
 * Explicit per-thread deinitialization and global epochs
 */

use crate::common::Harness;
use pretty_assertions::assert_eq;
use rt_lifecycle::{GlobalStatus, InitPhase, LifecycleConfig, MemoryHandle, StandaloneMemory};
use std::thread;

#[test]
fn test_teardown_releases_every_handle() {
    let h = Harness::new(LifecycleConfig::unchecked());
    h.runtime.activate().unwrap();

    h.runtime.deinit_if_needed();

    assert!(!h.runtime.is_active());
    assert_eq!(h.runtime.alive_runtimes(), 0);
    assert_eq!(h.memory.restore_count(), 1);
    assert_eq!(h.memory.live_states(), 0);
    assert_eq!(h.workers.live_workers(), 0);
    assert_eq!(h.workers.workers_with_thread_data(), 0);
    // Teardown does not move the global status
    assert_eq!(h.runtime.status(), GlobalStatus::Running);
}

#[test]
fn test_deinit_without_runtime_is_noop() {
    let h = Harness::new(LifecycleConfig::unchecked());

    h.runtime.deinit_if_needed();
    assert_eq!(h.runtime.alive_runtimes(), 0);

    h.runtime.activate().unwrap();
    h.runtime.deinit_if_needed();
    h.runtime.deinit_if_needed();

    assert_eq!(h.recorder.count(InitPhase::DeinitThreadLocalGlobals), 1);
    assert_eq!(h.memory.restore_count(), 1);
}

#[test]
fn test_only_last_runtime_deinitializes_globals() {
    let h = Harness::new(LifecycleConfig::unchecked());
    h.runtime.activate().unwrap();

    let runtime = h.runtime.clone();
    let recorder = h.recorder.clone();
    thread::spawn(move || {
        runtime.activate().unwrap();
        runtime.deinit_if_needed();
        assert_eq!(recorder.count(InitPhase::DeinitGlobals), 0);
    })
    .join()
    .unwrap();

    assert_eq!(h.runtime.alive_runtimes(), 1);
    h.runtime.deinit_if_needed();

    assert_eq!(h.recorder.count(InitPhase::DeinitThreadLocalGlobals), 2);
    assert_eq!(h.recorder.count(InitPhase::DeinitGlobals), 1);
    assert_eq!(h.recorder.events().last(), Some(&InitPhase::DeinitGlobals));
}

#[test]
fn test_global_phases_rerun_each_epoch() {
    let h = Harness::new(LifecycleConfig::unchecked());

    for _ in 0..3 {
        h.runtime.activate().unwrap();
        h.runtime.deinit_if_needed();
    }

    let epoch = [
        InitPhase::InitGlobals,
        InitPhase::InitThreadLocalGlobals,
        InitPhase::DeinitThreadLocalGlobals,
        InitPhase::DeinitGlobals,
    ];
    assert_eq!(h.recorder.events(), epoch.repeat(3));
}

#[test]
fn test_deinit_order_matches_init_order() {
    let log = std::sync::Arc::new(parking_lot::Mutex::new(Vec::new()));
    let first = log.clone();
    let second = log.clone();

    let h = Harness::build(LifecycleConfig::unchecked(), StandaloneMemory::new(), |builder| {
        builder
            .register_initializer(move |phase: InitPhase, _: &MemoryHandle| {
                first.lock().push(("first", phase))
            })
            .register_initializer(move |phase: InitPhase, _: &MemoryHandle| {
                second.lock().push(("second", phase))
            })
    });

    h.runtime.activate().unwrap();
    h.runtime.deinit_if_needed();

    let deinit: Vec<_> = log
        .lock()
        .iter()
        .filter(|(_, phase)| *phase == InitPhase::DeinitGlobals)
        .map(|(name, _)| *name)
        .collect();
    assert_eq!(deinit, vec!["first", "second"]);
}
