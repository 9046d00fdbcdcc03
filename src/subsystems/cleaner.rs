/*!
 * Cleaner Subsystem Interface
 */

/// Deferred finalizer ("cleaner") execution
pub trait CleanerSubsystem: Send + Sync {
    /// Stop the cleaner worker
    ///
    /// When `execute_pending` is true, cleaners still queued are run before
    /// returning; otherwise they are discarded.
    fn shutdown_cleaners(&self, execute_pending: bool);
}
