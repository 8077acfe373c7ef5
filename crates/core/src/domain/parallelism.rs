// Parallelism configuration carried by engine entry points

use std::num::NonZeroUsize;

use super::build::BuildConfiguration;
use super::thread_request::ThreadRequest;

/// Explicit parallelism setting for one computation
///
/// `worker_cap == None` defers to the scheduler's process-wide worker count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ParallelismConfig {
    pub worker_cap: Option<NonZeroUsize>,
}

impl ParallelismConfig {
    /// Use whatever the scheduler is currently configured with
    pub const fn scheduler_default() -> Self {
        Self { worker_cap: None }
    }

    /// Force a single worker
    pub const fn single_threaded() -> Self {
        Self {
            worker_cap: Some(NonZeroUsize::MIN),
        }
    }

    /// Apply the same validation as the thread policy: non-positive requests fall back
    /// to the scheduler default
    pub fn from_request(request: &ThreadRequest) -> Self {
        Self {
            worker_cap: request.worker_cap(),
        }
    }
}

/// Context handed to every engine computation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineContext {
    pub build: BuildConfiguration,
    pub parallelism: ParallelismConfig,
}

impl EngineContext {
    pub const fn new(parallelism: ParallelismConfig) -> Self {
        Self {
            build: BuildConfiguration::CURRENT,
            parallelism,
        }
    }

    /// Worker cap this context will actually honour
    ///
    /// Serial builds always run on one worker.
    pub fn effective_cap(&self) -> Option<NonZeroUsize> {
        if self.build.parallel {
            self.parallelism.worker_cap
        } else {
            Some(NonZeroUsize::MIN)
        }
    }
}

impl Default for EngineContext {
    fn default() -> Self {
        Self::new(ParallelismConfig::scheduler_default())
    }
}
