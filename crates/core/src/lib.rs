// LargeVis Environment Core - Capabilities, Types & Thread Policy
// NO scheduler dependencies (hexagonal: adapters live in largevis-env-rayon)

pub mod application;
pub mod constants;
pub mod domain;
pub mod error;
pub mod port;

pub use error::{EnvError, Result};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
