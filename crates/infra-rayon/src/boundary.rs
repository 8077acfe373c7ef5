//! Host boundary - the entry points exposed to the embedding engine's host.
//!
//! | Function | Availability |
//! |---|---|
//! | [`check_bits`] | always |
//! | [`check_openmp`] | always |
//! | [`check_cran`] | only with the `parallel` feature |
//!
//! `check_cran` is compiled out of serial builds so no caller can believe a thread
//! cap was honoured by a binary that cannot run in parallel.
#![cfg_attr(
    feature = "parallel",
    doc = r#"
```
largevis_env_rayon::check_cran(Some(&[4]));
assert_eq!(largevis_env_rayon::effective_worker_count(), 4);
```
"#
)]
#![cfg_attr(
    not(feature = "parallel"),
    doc = r#"
Serial builds do not export `check_cran`:

```compile_fail
largevis_env_rayon::check_cran(Some(&[4]));
```
"#
)]

use largevis_env_core::application::CapabilityProbe;
use largevis_env_core::port::WorkerScheduler;

use crate::scheduler::Scheduler;

/// True iff vertex/edge indices are 8 bytes wide in this build
pub fn check_bits() -> bool {
    CapabilityProbe::new().check_bits()
}

/// True iff this build includes parallel-execution support
pub fn check_openmp() -> bool {
    CapabilityProbe::new().check_openmp()
}

/// Cap the process-wide worker count
///
/// Only the first element of `threads` is read. Absent, empty and non-positive
/// requests are silently ignored. Must run before any parallel region starts and
/// never concurrently with another call.
#[cfg(feature = "parallel")]
pub fn check_cran(threads: Option<&[i32]>) {
    use largevis_env_core::application::ThreadPolicyGuard;
    use largevis_env_core::domain::ThreadRequest;
    use std::sync::Arc;

    let guard = ThreadPolicyGuard::new(Arc::new(Scheduler::for_build()));
    guard.apply(&ThreadRequest::from_list(threads));
}

/// Worker count the next parallel region will use
pub fn effective_worker_count() -> usize {
    Scheduler::for_build().worker_count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capability_checks_are_deterministic() {
        let bits = check_bits();
        let openmp = check_openmp();
        for _ in 0..50 {
            assert_eq!(check_bits(), bits);
            assert_eq!(check_openmp(), openmp);
        }
    }

    #[test]
    fn test_openmp_flag_follows_adapter_feature() {
        assert_eq!(check_openmp(), cfg!(feature = "parallel"));
    }

    #[cfg(not(feature = "parallel"))]
    #[test]
    fn test_serial_build_reports_one_worker() {
        assert!(!check_openmp());
        assert_eq!(effective_worker_count(), 1);
    }

    #[cfg(feature = "parallel")]
    mod parallel {
        use crate::boundary::*;
        use serial_test::serial;

        #[test]
        #[serial]
        fn test_check_cran_absent_is_noop() {
            let before = effective_worker_count();
            check_cran(None);
            assert_eq!(effective_worker_count(), before);
        }

        #[test]
        #[serial]
        fn test_check_cran_sets_worker_count() {
            check_cran(Some(&[5]));
            assert_eq!(effective_worker_count(), 5);
        }

        #[test]
        #[serial]
        fn test_check_cran_ignores_non_positive() {
            check_cran(Some(&[4]));

            check_cran(Some(&[0]));
            assert_eq!(effective_worker_count(), 4);

            check_cran(Some(&[-3]));
            assert_eq!(effective_worker_count(), 4);

            check_cran(Some(&[]));
            assert_eq!(effective_worker_count(), 4);
        }
    }
}
