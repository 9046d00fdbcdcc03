/*!
 * Activation Tests
 * First-runtime bring-up, idempotent entry and activation failures
 */

use crate::common::{violation_of, Harness};
use pretty_assertions::assert_eq;
use rt_lifecycle::{GlobalStatus, InitPhase, LifecycleConfig, LifecycleError, StandaloneMemory};
use std::sync::atomic::Ordering;
use std::thread;

#[test]
fn test_first_activation_brings_up_globals() {
    let h = Harness::new(LifecycleConfig::unchecked());

    h.runtime.activate().unwrap();

    assert_eq!(h.runtime.status(), GlobalStatus::Running);
    assert_eq!(h.runtime.alive_runtimes(), 1);
    assert_eq!(h.runtime.initializing_runtimes(), 0);
    assert!(h.runtime.is_active());
    assert_eq!(
        h.recorder.events(),
        vec![InitPhase::InitGlobals, InitPhase::InitThreadLocalGlobals]
    );
    assert_eq!(h.platform.console_inits.load(Ordering::SeqCst), 1);
    assert_eq!(h.platform.interop_inits.load(Ordering::SeqCst), 1);
    assert_eq!(h.memory.live_states(), 1);
    assert_eq!(h.workers.live_workers(), 1);

    h.runtime.deinit_if_needed();
}

#[test]
fn test_second_thread_skips_global_init() {
    let h = Harness::new(LifecycleConfig::unchecked());
    h.runtime.activate().unwrap();

    let runtime = h.runtime.clone();
    thread::spawn(move || {
        runtime.activate().unwrap();
        assert_eq!(runtime.alive_runtimes(), 2);
        runtime.deinit_if_needed();
    })
    .join()
    .unwrap();

    assert_eq!(h.recorder.count(InitPhase::InitGlobals), 1);
    assert_eq!(h.recorder.count(InitPhase::InitThreadLocalGlobals), 2);
    assert_eq!(h.platform.console_inits.load(Ordering::SeqCst), 1);
    // Unlike console bring-up, the terminate handler is installed on every activation
    assert_eq!(h.platform.terminate_handler_inits.load(Ordering::SeqCst), 2);

    h.runtime.deinit_if_needed();
}

#[test]
fn test_init_if_needed_is_idempotent() {
    let h = Harness::new(LifecycleConfig::unchecked());

    h.runtime.init_if_needed().unwrap();
    h.runtime.init_if_needed().unwrap();

    assert_eq!(h.runtime.alive_runtimes(), 1);
    assert_eq!(h.recorder.count(InitPhase::InitThreadLocalGlobals), 1);

    h.runtime.deinit_if_needed();
}

#[test]
fn test_double_activation_on_thread_is_fatal() {
    let h = Harness::new(LifecycleConfig::unchecked());
    h.runtime.activate().unwrap();

    let message = violation_of(|| h.runtime.activate());

    assert!(message.contains("already has a runtime"), "{}", message);
    assert_eq!(h.runtime.alive_runtimes(), 1);
    assert_eq!(h.runtime.initializing_runtimes(), 0);

    h.runtime.deinit_if_needed();
    assert_eq!(h.runtime.alive_runtimes(), 0);
}

#[test]
fn test_allocation_failure_is_recoverable() {
    let h = Harness::with_memory(LifecycleConfig::unchecked(), StandaloneMemory::with_capacity(0));

    let err = h.runtime.activate().unwrap_err();
    assert!(matches!(err, LifecycleError::AllocationFailed(_)));
    assert!(matches!(h.runtime.init_if_needed(), Err(LifecycleError::AllocationFailed(_))));

    assert!(!h.runtime.is_active());
    assert_eq!(h.runtime.alive_runtimes(), 0);
    assert_eq!(h.runtime.initializing_runtimes(), 0);
    assert!(h.recorder.events().is_empty());
    assert_eq!(h.workers.live_workers(), 0);
}

#[test]
fn test_allocation_failure_leaves_other_runtimes_alone() {
    let h = Harness::with_memory(LifecycleConfig::unchecked(), StandaloneMemory::with_capacity(1));
    h.runtime.activate().unwrap();

    let runtime = h.runtime.clone();
    let result = thread::spawn(move || {
        let result = runtime.activate();
        (result.is_err(), runtime.is_active())
    })
    .join()
    .unwrap();

    assert_eq!(result, (true, false));
    assert_eq!(h.runtime.alive_runtimes(), 1);
    assert_eq!(h.recorder.count(InitPhase::DeinitThreadLocalGlobals), 0);

    h.runtime.deinit_if_needed();
}

#[test]
fn test_activation_after_shutdown_is_fatal() {
    let h = Harness::new(LifecycleConfig::unchecked());
    h.runtime.activate().unwrap();
    h.runtime.shutdown();

    let message = violation_of(|| h.runtime.activate());

    assert_eq!(message, "Runtime was shut down. Cannot create new runtimes");
    assert_eq!(h.runtime.initializing_runtimes(), 0);
    assert_eq!(h.runtime.alive_runtimes(), 0);
}

#[test]
fn test_attach_scopes_activation() {
    let h = Harness::new(LifecycleConfig::unchecked());

    {
        let _attachment = h.runtime.attach().unwrap();
        assert!(h.runtime.is_active());
    }

    assert!(!h.runtime.is_active());
    assert_eq!(
        h.recorder.events(),
        vec![
            InitPhase::InitGlobals,
            InitPhase::InitThreadLocalGlobals,
            InitPhase::DeinitThreadLocalGlobals,
            InitPhase::DeinitGlobals,
        ]
    );
}
