// Environment constants (no magic values)

/// Environment variable carrying a worker-thread cap
pub const THREADS_ENV_VAR: &str = "LARGEVIS_THREADS";

/// Environment variable selecting the log format (`json` or `pretty`)
pub const LOG_FORMAT_ENV_VAR: &str = "LARGEVIS_LOG_FORMAT";

/// Default tracing filter when `RUST_LOG` is unset
pub const DEFAULT_LOG_FILTER: &str = "largevis_env=info";

/// Name prefix for worker threads spawned by the parallel scheduler
pub const WORKER_THREAD_PREFIX: &str = "largevis-worker";
