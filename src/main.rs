/*!
 * Runtime Lifecycle - Demo Entry Point
 *
 * Brings a runtime up on several threads, lets them exit without explicit
 * deinitialization, then shuts the runtime down from the main thread and
 * prints the final statistics.
 */

use std::error::Error;
use std::sync::Arc;
use tracing::info;

use rt_lifecycle::{
    init_tracing, InitPhase, LifecycleConfig, MemoryHandle, Runtime, StandaloneCleaners,
    StandaloneMemory, StandaloneWorkers, WorkerSubsystem,
};

const WORKER_THREADS: usize = 4;

fn main() -> Result<(), Box<dyn Error>> {
    init_tracing();

    info!("Runtime lifecycle demo starting...");
    info!("Platform: {:?}", rt_lifecycle::PlatformInfo::current());

    let config = LifecycleConfig::from_env();
    let memory = Arc::new(StandaloneMemory::new());
    let workers = Arc::new(StandaloneWorkers::new());
    let cleaners = Arc::new(StandaloneCleaners::new());

    let runtime = Runtime::builder()
        .with_config(config)
        .with_memory(memory.clone())
        .with_workers(workers.clone())
        .with_cleaners(cleaners.clone())
        .register_initializer(|phase: InitPhase, memory: &MemoryHandle| {
            info!(?phase, memory = memory.id(), "initializer");
        })
        .build();

    runtime.init_if_needed()?;

    // Worker threads exit without deinit; their exit hooks tear them down
    for i in 0..WORKER_THREADS {
        let runtime = runtime.clone();
        let cleaners = cleaners.clone();
        workers.spawn_native(move || {
            if let Err(e) = runtime.activate() {
                tracing::error!(worker = i, error = %e, "activation failed");
                return;
            }
            cleaners.schedule(Box::new(move || info!(worker = i, "cleaner ran")));
        });
    }
    workers.wait_native_workers_termination();
    if workers.native_panics() > 0 {
        tracing::error!(panics = workers.native_panics(), "worker threads panicked");
    }

    info!(alive = runtime.alive_runtimes(), "workers finished");

    runtime.shutdown();

    let stats = runtime.stats();
    println!("{}", serde_json::to_string_pretty(&stats)?);
    info!(
        live_states = memory.live_states(),
        live_workers = workers.live_workers(),
        cleaners_executed = cleaners.executed(),
        cleaners_discarded = cleaners.discarded(),
        "Runtime lifecycle demo finished"
    );

    Ok(())
}
