// LargeVis Infrastructure - Scheduler Adapters
// Implements: WorkerScheduler (rayon), host boundary (check_bits, check_openmp, check_cran)

pub mod boundary;
#[cfg(feature = "parallel")]
pub mod rayon_scheduler;
pub mod scheduler;

#[cfg(feature = "parallel")]
pub use boundary::check_cran;
pub use boundary::{check_bits, check_openmp, effective_worker_count};
#[cfg(feature = "parallel")]
pub use rayon_scheduler::RayonScheduler;
pub use scheduler::Scheduler;

// The core crate's `parallel` flag is only meaningful through this crate's feature
#[cfg(not(feature = "parallel"))]
const _: () = assert!(
    !largevis_env_core::domain::BuildConfiguration::CURRENT.parallel,
    "enable `largevis-env-rayon/parallel` instead of `largevis-env-core/parallel`"
);
