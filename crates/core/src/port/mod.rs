// Port Layer - Interfaces for external dependencies

pub mod worker_scheduler;

// Re-exports
pub use worker_scheduler::{SerialScheduler, WorkerScheduler};
