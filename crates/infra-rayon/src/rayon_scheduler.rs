// Rayon scheduler adapter
// reason: rayon's global pool can be sized only once, so the first cap builds it and
// later caps run scheduled regions on a dedicated pool of the new size
use std::num::NonZeroUsize;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, OnceLock, PoisonError};

use rayon::{ThreadPool, ThreadPoolBuilder};
use tracing::{debug, info};

use largevis_env_core::constants::WORKER_THREAD_PREFIX;
use largevis_env_core::port::WorkerScheduler;
use largevis_env_core::{EnvError, Result};

/// Sentinel for "no worker count set": defer to rayon's default pool size
const UNSET: usize = 0;

/// Environment variable rayon reads when sizing its default global pool
const RAYON_THREADS_ENV_VAR: &str = "RAYON_NUM_THREADS";

/// Worker scheduler backed by rayon thread pools
///
/// The process-wide instance ([`RayonScheduler::global`]) sizes rayon's global pool on
/// the first write, so plain parallel iterators honour that cap too. Later writes, and
/// standalone instances, run regions entered through [`RayonScheduler::install`] on a
/// dedicated pool. Only the most recent dedicated pool is kept alive.
#[derive(Debug)]
pub struct RayonScheduler {
    workers: AtomicUsize,
    owns_global_pool: bool,
    /// Size of rayon's global pool if this scheduler built it; `None` once building failed
    global_pool: OnceLock<Option<usize>>,
    pool: Mutex<Option<Arc<ThreadPool>>>,
}

impl RayonScheduler {
    /// Standalone scheduler with its own worker count; never touches rayon's global pool
    pub fn new() -> Self {
        Self {
            workers: AtomicUsize::new(UNSET),
            owns_global_pool: false,
            global_pool: OnceLock::new(),
            pool: Mutex::new(None),
        }
    }

    /// Process-wide scheduler written by the host boundary
    pub fn global() -> &'static RayonScheduler {
        static GLOBAL: OnceLock<RayonScheduler> = OnceLock::new();
        GLOBAL.get_or_init(|| RayonScheduler {
            owns_global_pool: true,
            ..RayonScheduler::new()
        })
    }

    /// Worker count set through `set_worker_count`, if any
    pub fn configured_workers(&self) -> Option<NonZeroUsize> {
        NonZeroUsize::new(self.workers.load(Ordering::Relaxed))
    }

    /// Run `op` inside a pool
    ///
    /// `cap` overrides the configured worker count for this region only. With neither
    /// set, `op` runs against rayon's global pool at its default size.
    pub fn install<OP, R>(&self, cap: Option<NonZeroUsize>, op: OP) -> Result<R>
    where
        OP: FnOnce() -> R + Send,
        R: Send,
    {
        let Some(workers) = cap.or_else(|| self.configured_workers()) else {
            return Ok(op());
        };
        let workers = clamp_workers(workers);

        if self.global_pool_size() == Some(workers) {
            return Ok(op());
        }

        let pool = self.pool(workers)?;
        Ok(pool.install(op))
    }

    fn global_pool_size(&self) -> Option<usize> {
        self.global_pool.get().copied().flatten()
    }

    fn build_global_pool(workers: usize) -> Option<usize> {
        let built = ThreadPoolBuilder::new()
            .num_threads(workers)
            .thread_name(|i| format!("{WORKER_THREAD_PREFIX}-{i}"))
            .build_global();

        match built {
            Ok(()) => {
                debug!(workers = workers, "Global thread pool built");
                Some(workers)
            }
            Err(e) => {
                info!(
                    workers = workers,
                    error = %e,
                    "Global thread pool already running; cap applies to scheduled regions only"
                );
                None
            }
        }
    }

    fn pool(&self, workers: usize) -> Result<Arc<ThreadPool>> {
        let mut slot = self.pool.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(pool) = slot.as_ref().filter(|p| p.current_num_threads() == workers) {
            return Ok(Arc::clone(pool));
        }

        let pool = ThreadPoolBuilder::new()
            .num_threads(workers)
            .thread_name(move |i| format!("{WORKER_THREAD_PREFIX}-{workers}-{i}"))
            .build()
            .map_err(|e| EnvError::ThreadPool(format!("Failed to create thread pool: {e}")))?;
        let pool = Arc::new(pool);

        // The replaced pool shuts down once regions still running on it finish
        if let Some(previous) = slot.replace(Arc::clone(&pool)) {
            debug!(
                previous = previous.current_num_threads(),
                workers = workers,
                "Thread pool replaced"
            );
        } else {
            debug!(workers = workers, "Thread pool built");
        }

        Ok(pool)
    }

    #[cfg(test)]
    fn cached_pool_size(&self) -> Option<usize> {
        self.pool
            .lock()
            .unwrap()
            .as_ref()
            .map(|p| p.current_num_threads())
    }
}

impl Default for RayonScheduler {
    fn default() -> Self {
        Self::new()
    }
}

impl WorkerScheduler for RayonScheduler {
    fn set_worker_count(&self, workers: NonZeroUsize) {
        let workers = clamp_workers(workers);
        self.workers.store(workers, Ordering::Relaxed);

        if self.owns_global_pool {
            self.global_pool
                .get_or_init(|| Self::build_global_pool(workers));
        }
    }

    fn worker_count(&self) -> usize {
        self.configured_workers()
            .map_or_else(default_workers, NonZeroUsize::get)
    }

    fn is_parallel(&self) -> bool {
        true
    }
}

/// Rayon silently caps pool sizes; report the size it will actually build
fn clamp_workers(workers: NonZeroUsize) -> usize {
    workers.get().min(rayon::max_num_threads())
}

/// Size rayon gives an unconfigured global pool, computed without starting it
fn default_workers() -> usize {
    std::env::var(RAYON_THREADS_ENV_VAR)
        .ok()
        .and_then(|raw| raw.trim().parse::<usize>().ok())
        .filter(|&n| n > 0)
        .or_else(|| {
            std::thread::available_parallelism()
                .ok()
                .map(NonZeroUsize::get)
        })
        .unwrap_or(1)
        .min(rayon::max_num_threads())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unset_reports_rayon_default() {
        let scheduler = RayonScheduler::new();
        assert_eq!(scheduler.configured_workers(), None);
        assert_eq!(scheduler.worker_count(), default_workers());
        assert!(scheduler.worker_count() >= 1);
    }

    #[test]
    fn test_unset_query_ignores_enclosing_pool() {
        let scheduler = RayonScheduler::new();
        let outside = scheduler.worker_count();

        let single = RayonScheduler::new();
        let inside = single
            .install(NonZeroUsize::new(1), || scheduler.worker_count())
            .unwrap();

        assert_eq!(inside, outside);
    }

    #[test]
    fn test_set_worker_count() {
        let scheduler = RayonScheduler::new();
        scheduler.set_worker_count(NonZeroUsize::new(3).unwrap());

        assert_eq!(scheduler.worker_count(), 3);
        assert!(scheduler.is_parallel());
    }

    #[test]
    fn test_oversized_cap_reports_clamped_count() {
        let scheduler = RayonScheduler::new();
        scheduler.set_worker_count(NonZeroUsize::MAX);

        assert_eq!(scheduler.worker_count(), rayon::max_num_threads());
    }

    #[test]
    fn test_standalone_never_builds_global_pool() {
        let scheduler = RayonScheduler::new();
        scheduler.set_worker_count(NonZeroUsize::new(2).unwrap());

        assert_eq!(scheduler.global_pool.get(), None);
    }

    #[test]
    fn test_install_uses_configured_count() {
        let scheduler = RayonScheduler::new();
        scheduler.set_worker_count(NonZeroUsize::new(2).unwrap());

        let inside = scheduler.install(None, rayon::current_num_threads).unwrap();
        assert_eq!(inside, 2);
    }

    #[test]
    fn test_install_cap_overrides_for_one_region() {
        let scheduler = RayonScheduler::new();
        scheduler.set_worker_count(NonZeroUsize::new(2).unwrap());

        let inside = scheduler
            .install(NonZeroUsize::new(3), rayon::current_num_threads)
            .unwrap();

        assert_eq!(inside, 3);
        assert_eq!(scheduler.worker_count(), 2);
    }

    #[test]
    fn test_pools_are_reused() {
        let scheduler = RayonScheduler::new();
        let first = scheduler.pool(2).unwrap();
        let second = scheduler.pool(2).unwrap();
        assert!(Arc::ptr_eq(&first, &second));
    }

    #[test]
    fn test_only_latest_pool_is_kept() {
        let scheduler = RayonScheduler::new();
        let first = Arc::downgrade(&scheduler.pool(1).unwrap());

        for n in 1..=20 {
            scheduler.install(NonZeroUsize::new(n), || ()).unwrap();
        }

        assert!(first.upgrade().is_none());
        assert_eq!(scheduler.cached_pool_size(), Some(20));
    }

    #[test]
    fn test_worker_threads_are_named() {
        let scheduler = RayonScheduler::new();
        let name = scheduler
            .install(NonZeroUsize::new(1), || {
                std::thread::current().name().map(str::to_owned)
            })
            .unwrap();
        assert_eq!(name.as_deref(), Some("largevis-worker-1-0"));
    }
}
