//! Thread Policy Guard - single choke point for host-imposed worker caps
//!
//! Shared or policy-restricted hosts must be able to keep the engine below the
//! hardware maximum. Invalid requests degrade to the existing scheduler setting
//! and never fail the caller.

use std::num::NonZeroUsize;
use std::sync::Arc;
use tracing::{debug, info};

use crate::domain::ThreadRequest;
use crate::port::WorkerScheduler;

/// Applies caller-supplied worker caps to a scheduler
pub struct ThreadPolicyGuard {
    scheduler: Arc<dyn WorkerScheduler>,
}

impl ThreadPolicyGuard {
    pub fn new(scheduler: Arc<dyn WorkerScheduler>) -> Self {
        Self { scheduler }
    }

    /// Apply a thread request
    ///
    /// Absent and non-positive requests leave the scheduler untouched. Returns the cap
    /// that was written, if any.
    pub fn apply(&self, request: &ThreadRequest) -> Option<NonZeroUsize> {
        let Some(cap) = request.worker_cap() else {
            debug!(
                requested = ?request.requested(),
                workers = self.scheduler.worker_count(),
                "Thread request ignored"
            );
            return None;
        };

        self.scheduler.set_worker_count(cap);

        info!(
            requested = cap.get(),
            workers = self.scheduler.worker_count(),
            parallel = self.scheduler.is_parallel(),
            "Worker cap applied"
        );
        Some(cap)
    }

    /// Current worker count of the guarded scheduler
    pub fn worker_count(&self) -> usize {
        self.scheduler.worker_count()
    }
}

#[cfg(test)]
#[path = "thread_policy_test.rs"]
mod thread_policy_test;
