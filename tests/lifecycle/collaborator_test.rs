/*!
 * Collaborator Tests
 * Exact calls made into the memory and cleaner subsystems
 */

use crate::common::PanickingPlatform;
use mockall::predicate::eq;
use mockall::{mock, Sequence};
use rt_lifecycle::subsystems::MemoryResult;
use rt_lifecycle::{
    CleanerSubsystem, LifecycleConfig, LifecycleError, MemoryError, MemoryHandle,
    MemorySubsystem, Runtime, StandaloneWorkers,
};
use std::sync::Arc;

mock! {
    pub Memory {}

    impl MemorySubsystem for Memory {
        fn init_memory(&self) -> MemoryResult<MemoryHandle>;
        fn restore_memory(&self, memory: &MemoryHandle);
        fn deinit_memory(&self, memory: MemoryHandle);
        fn perform_full_gc(&self, memory: &MemoryHandle);
    }
}

mock! {
    pub Cleaners {}

    impl CleanerSubsystem for Cleaners {
        fn shutdown_cleaners(&self, execute_pending: bool);
    }
}

fn runtime_with(memory: MockMemory, cleaners: MockCleaners, config: LifecycleConfig) -> Runtime {
    Runtime::builder()
        .with_config(config)
        .with_memory(Arc::new(memory))
        .with_cleaners(Arc::new(cleaners))
        .with_workers(Arc::new(StandaloneWorkers::new()))
        .with_platform(Arc::new(PanickingPlatform::default()))
        .build()
}

#[test]
fn test_teardown_restores_before_destroying_memory() {
    let mut seq = Sequence::new();
    let mut memory = MockMemory::new();
    memory
        .expect_init_memory()
        .times(1)
        .in_sequence(&mut seq)
        .returning(|| Ok(MemoryHandle::new(7)));
    memory
        .expect_restore_memory()
        .withf(|m| m.id() == 7)
        .times(1)
        .in_sequence(&mut seq)
        .return_const(());
    memory
        .expect_deinit_memory()
        .withf(|m| m.id() == 7)
        .times(1)
        .in_sequence(&mut seq)
        .return_const(());

    let runtime = runtime_with(memory, MockCleaners::new(), LifecycleConfig::unchecked());
    runtime.activate().unwrap();
    runtime.deinit_if_needed();
}

#[test]
fn test_checked_shutdown_collects_then_drains_cleaners() {
    let mut seq = Sequence::new();
    let mut memory = MockMemory::new();
    let mut cleaners = MockCleaners::new();

    memory
        .expect_init_memory()
        .times(1)
        .returning(|| Ok(MemoryHandle::new(1)));
    memory
        .expect_perform_full_gc()
        .times(1)
        .in_sequence(&mut seq)
        .return_const(());
    cleaners
        .expect_shutdown_cleaners()
        .with(eq(true))
        .times(1)
        .in_sequence(&mut seq)
        .return_const(());
    memory
        .expect_restore_memory()
        .times(1)
        .in_sequence(&mut seq)
        .return_const(());
    memory
        .expect_deinit_memory()
        .times(1)
        .in_sequence(&mut seq)
        .return_const(());

    let runtime = runtime_with(memory, cleaners, LifecycleConfig::checked());
    runtime.activate().unwrap();
    runtime.shutdown();
}

#[test]
fn test_unchecked_shutdown_skips_collection() {
    let mut memory = MockMemory::new();
    let mut cleaners = MockCleaners::new();

    memory
        .expect_init_memory()
        .returning(|| Ok(MemoryHandle::new(1)));
    memory.expect_perform_full_gc().never();
    memory.expect_restore_memory().times(1).return_const(());
    memory.expect_deinit_memory().times(1).return_const(());
    cleaners
        .expect_shutdown_cleaners()
        .with(eq(false))
        .times(1)
        .return_const(());

    let runtime = runtime_with(memory, cleaners, LifecycleConfig::unchecked());
    runtime.activate().unwrap();
    runtime.shutdown();
}

#[test]
fn test_failed_allocation_touches_nothing_else() {
    let mut memory = MockMemory::new();
    memory
        .expect_init_memory()
        .times(1)
        .returning(|| Err(MemoryError::OutOfMemory("exhausted".into())));
    memory.expect_restore_memory().never();
    memory.expect_deinit_memory().never();

    let runtime = runtime_with(memory, MockCleaners::new(), LifecycleConfig::unchecked());

    let err = runtime.activate().unwrap_err();
    assert_eq!(
        err,
        LifecycleError::AllocationFailed("Out of memory: exhausted".into())
    );
    assert_eq!(runtime.alive_runtimes(), 0);
    assert!(!runtime.is_active());
}
