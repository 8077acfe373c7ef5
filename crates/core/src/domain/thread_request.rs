// Thread Request - caller-supplied worker cap

use std::num::NonZeroUsize;
use tracing::warn;

use crate::constants::THREADS_ENV_VAR;

/// Optional worker-thread cap supplied by a host
///
/// Validated only at the point of use: non-positive values are kept here and
/// ignored by [`ThreadRequest::worker_cap`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ThreadRequest {
    requested: Option<i32>,
}

impl ThreadRequest {
    /// No cap requested
    pub const fn absent() -> Self {
        Self { requested: None }
    }

    pub const fn new(threads: i32) -> Self {
        Self {
            requested: Some(threads),
        }
    }

    /// Build from a host-style optional integer list; only the first element counts
    ///
    /// A present but empty list is treated as absent.
    pub fn from_list(threads: Option<&[i32]>) -> Self {
        Self {
            requested: threads.and_then(|list| list.first().copied()),
        }
    }

    /// Read the cap from `LARGEVIS_THREADS`
    ///
    /// Unset or unparsable values give an absent request.
    pub fn from_env() -> Self {
        match std::env::var(THREADS_ENV_VAR) {
            Ok(raw) => Self::parse(&raw),
            Err(_) => Self::absent(),
        }
    }

    /// Parse a textual cap, treating garbage as absent
    pub fn parse(raw: &str) -> Self {
        match raw.trim().parse::<i32>() {
            Ok(threads) => Self::new(threads),
            Err(e) => {
                warn!(value = %raw, error = %e, "Ignoring unparsable thread request");
                Self::absent()
            }
        }
    }

    /// Raw requested value, if any
    pub const fn requested(&self) -> Option<i32> {
        self.requested
    }

    /// The cap to apply: present and strictly positive
    pub fn worker_cap(&self) -> Option<NonZeroUsize> {
        self.requested
            .and_then(|n| usize::try_from(n).ok())
            .and_then(NonZeroUsize::new)
    }
}

impl From<Option<i32>> for ThreadRequest {
    fn from(requested: Option<i32>) -> Self {
        Self { requested }
    }
}
