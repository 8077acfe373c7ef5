// Build Configuration & Capability Flags

use serde::{Deserialize, Serialize};

use super::types::IndexWidth;

/// Compile-time-fixed characteristics of this build
///
/// There is exactly one value per build ([`BuildConfiguration::CURRENT`]); every
/// query in a process observes the same answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildConfiguration {
    pub index_width: IndexWidth,
    pub parallel: bool,
}

impl BuildConfiguration {
    /// Configuration resolved from the `wide-index` and `parallel` cargo features
    ///
    /// `parallel` is set by `largevis-env-rayon/parallel`, which also brings in the
    /// scheduler; it is not meant to be enabled on this crate directly.
    pub const CURRENT: BuildConfiguration = BuildConfiguration {
        index_width: IndexWidth::BUILD,
        parallel: cfg!(feature = "parallel"),
    };

    /// Project onto the capability flags reported to hosts
    pub const fn flags(&self) -> CapabilityFlags {
        CapabilityFlags {
            wide_index: self.index_width.is_wide(),
            parallel: self.parallel,
        }
    }
}

/// Answers of the capability probe
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CapabilityFlags {
    /// Vertex/edge indices are 8 bytes wide
    pub wide_index: bool,
    /// Parallel execution is compiled in
    pub parallel: bool,
}
