//! Capability Probe - answers fixed build questions before the engine commits
//! to a memory layout or a scheduling strategy.
//!
//! - `check_bits`: are vertex/edge indices 8 bytes wide?
//! - `check_openmp`: is parallel execution compiled in?

use crate::domain::{BuildConfiguration, CapabilityFlags};

/// Reports the build characteristics of this binary
///
/// Every instance sees the same [`BuildConfiguration::CURRENT`]; answers never
/// change during a process.
#[derive(Debug, Clone, Copy, Default)]
pub struct CapabilityProbe;

impl CapabilityProbe {
    pub const fn new() -> Self {
        Self
    }

    /// Build configuration the answers are derived from
    pub const fn build(&self) -> BuildConfiguration {
        BuildConfiguration::CURRENT
    }

    /// Both answers at once
    pub const fn flags(&self) -> CapabilityFlags {
        BuildConfiguration::CURRENT.flags()
    }

    /// True iff the vertex/edge index type occupies 8 bytes
    pub const fn check_bits(&self) -> bool {
        self.flags().wide_index
    }

    /// True iff this build includes parallel-execution support
    pub const fn check_openmp(&self) -> bool {
        self.flags().parallel
    }
}
