/*!
 * Worker Subsystem Interface
 */

use crate::core::types::{WorkerHandle, WorkerId};

/// Native worker bookkeeping
pub trait WorkerSubsystem: Send + Sync {
    /// Create the worker for a newly activated thread
    fn worker_init(&self, is_main: bool) -> WorkerHandle;

    /// Tear down a worker handle
    fn worker_deinit(&self, worker: WorkerHandle);

    /// Release thread data keyed by a worker's id
    ///
    /// Called after the owning runtime is fully released.
    fn destroy_thread_data_if_needed(&self, id: WorkerId);

    /// Block until every native worker thread has terminated
    fn wait_native_workers_termination(&self);
}
