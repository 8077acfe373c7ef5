// Central Error Type for the Environment Layer

use thiserror::Error;

/// Environment-layer error type
///
/// Capability probes and thread-cap requests never fail; these variants cover
/// the surrounding plumbing (entering a parallel region, checked index conversion).
#[derive(Error, Debug)]
pub enum EnvError {
    #[error("Thread pool error: {0}")]
    ThreadPool(String),

    #[error("Index {value} does not fit a {width_bytes}-byte graph index")]
    IndexOutOfRange { value: i128, width_bytes: usize },
}

/// Result type alias using EnvError
pub type Result<T> = std::result::Result<T, EnvError>;
