// Worker scheduler port
use std::num::NonZeroUsize;

/// Scheduler that owns the process-wide worker count
///
/// Implemented by the serial scheduler below and by the rayon adapter.
pub trait WorkerScheduler: Send + Sync {
    /// Set the number of workers used by subsequent parallel regions
    ///
    /// Last write wins. Callers must invoke this before any parallel region starts
    /// and never concurrently with another call.
    fn set_worker_count(&self, workers: NonZeroUsize);

    /// Worker count the next parallel region will use
    fn worker_count(&self) -> usize;

    /// Whether this scheduler can run more than one worker
    fn is_parallel(&self) -> bool;
}

/// Scheduler of a build without parallel support
///
/// Always reports a single worker; `set_worker_count` is a no-op.
#[derive(Debug, Clone, Copy, Default)]
pub struct SerialScheduler;

impl WorkerScheduler for SerialScheduler {
    fn set_worker_count(&self, _workers: NonZeroUsize) {}

    fn worker_count(&self) -> usize {
        1
    }

    fn is_parallel(&self) -> bool {
        false
    }
}

// ============================================================================
// Mock Implementations for Testing
// ============================================================================

pub mod mocks {
    use super::*;
    use std::sync::{Arc, Mutex};

    /// Mock scheduler recording every worker-count write
    #[derive(Clone)]
    pub struct MockWorkerScheduler {
        default_workers: usize,
        writes: Arc<Mutex<Vec<usize>>>,
    }

    impl MockWorkerScheduler {
        pub fn new(default_workers: usize) -> Self {
            Self {
                default_workers,
                writes: Arc::new(Mutex::new(Vec::new())),
            }
        }

        /// All values passed to `set_worker_count`, in order
        pub fn writes(&self) -> Vec<usize> {
            self.writes.lock().unwrap().clone()
        }
    }

    impl WorkerScheduler for MockWorkerScheduler {
        fn set_worker_count(&self, workers: NonZeroUsize) {
            self.writes.lock().unwrap().push(workers.get());
        }

        fn worker_count(&self) -> usize {
            self.writes
                .lock()
                .unwrap()
                .last()
                .copied()
                .unwrap_or(self.default_workers)
        }

        fn is_parallel(&self) -> bool {
            true
        }
    }
}
