// Scheduler capability object
use std::num::NonZeroUsize;

use largevis_env_core::domain::EngineContext;
use largevis_env_core::port::{SerialScheduler, WorkerScheduler};
use largevis_env_core::Result;

#[cfg(feature = "parallel")]
use crate::rayon_scheduler::RayonScheduler;

/// Scheduler selected by the build
///
/// Both variants expose the same operations, so callers never branch on build
/// features. On `Serial`, `set_worker_count` is a no-op and `run` executes inline.
#[derive(Debug, Clone, Copy)]
pub enum Scheduler {
    Serial(SerialScheduler),
    #[cfg(feature = "parallel")]
    Parallel(&'static RayonScheduler),
}

impl Scheduler {
    /// The process-wide scheduler of this build
    pub fn for_build() -> Self {
        #[cfg(feature = "parallel")]
        {
            Scheduler::Parallel(RayonScheduler::global())
        }

        #[cfg(not(feature = "parallel"))]
        {
            Scheduler::Serial(SerialScheduler)
        }
    }

    /// Run an engine computation under the context's parallelism setting
    #[cfg_attr(not(feature = "parallel"), allow(unused_variables))]
    pub fn run<OP, R>(&self, ctx: &EngineContext, op: OP) -> Result<R>
    where
        OP: FnOnce() -> R + Send,
        R: Send,
    {
        match self {
            Scheduler::Serial(_) => Ok(op()),
            #[cfg(feature = "parallel")]
            Scheduler::Parallel(parallel) => parallel.install(ctx.effective_cap(), op),
        }
    }
}

impl Default for Scheduler {
    fn default() -> Self {
        Self::for_build()
    }
}

impl WorkerScheduler for Scheduler {
    fn set_worker_count(&self, workers: NonZeroUsize) {
        match self {
            Scheduler::Serial(serial) => serial.set_worker_count(workers),
            #[cfg(feature = "parallel")]
            Scheduler::Parallel(parallel) => parallel.set_worker_count(workers),
        }
    }

    fn worker_count(&self) -> usize {
        match self {
            Scheduler::Serial(serial) => serial.worker_count(),
            #[cfg(feature = "parallel")]
            Scheduler::Parallel(parallel) => parallel.worker_count(),
        }
    }

    fn is_parallel(&self) -> bool {
        match self {
            Scheduler::Serial(serial) => serial.is_parallel(),
            #[cfg(feature = "parallel")]
            Scheduler::Parallel(parallel) => parallel.is_parallel(),
        }
    }
}
