// Engine-wide semantic types
//
// Selected at compile time by the `wide-index` cargo feature.

use serde::{Deserialize, Serialize};
use std::mem::size_of;

use crate::error::{EnvError, Result};

/// Vertex index (signed, 4 or 8 bytes depending on `wide-index`)
#[cfg(feature = "wide-index")]
pub type VertexIdx = i64;

/// Vertex index (signed, 4 or 8 bytes depending on `wide-index`)
#[cfg(not(feature = "wide-index"))]
pub type VertexIdx = i32;

/// Edge index. Always the vertex index type: edge ids are computed from vertex ids.
pub type EdgeIdx = VertexIdx;

/// Iteration counter (platform word)
pub type IterationIdx = usize;

/// Embedding dimension index
pub type DimIdx = u32;

/// Neighbor-list size
pub type KIdx = u32;

/// Distance between two points
pub type Distance = f64;

/// Embedding coordinate
pub type Coordinate = f64;

const _: () = assert!(size_of::<VertexIdx>() == size_of::<EdgeIdx>());
const _: () = assert!(size_of::<VertexIdx>() == 4 || size_of::<VertexIdx>() == 8);

/// Width of the graph index types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IndexWidth {
    /// 4-byte indices
    Narrow,
    /// 8-byte indices
    Wide,
}

impl IndexWidth {
    /// Width baked into this build
    pub const BUILD: IndexWidth = Self::of::<VertexIdx>();

    /// Width of a concrete index type
    pub const fn of<I: GraphIndex>() -> Self {
        if I::BYTES == 8 {
            IndexWidth::Wide
        } else {
            IndexWidth::Narrow
        }
    }

    pub const fn bytes(self) -> usize {
        match self {
            IndexWidth::Narrow => 4,
            IndexWidth::Wide => 8,
        }
    }

    pub const fn is_wide(self) -> bool {
        matches!(self, IndexWidth::Wide)
    }
}

impl std::fmt::Display for IndexWidth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IndexWidth::Narrow => write!(f, "32-bit"),
            IndexWidth::Wide => write!(f, "64-bit"),
        }
    }
}

/// Signed integer usable as a vertex or edge index
///
/// Lets engine code stay generic over the index width instead of depending on
/// the build-selected alias.
pub trait GraphIndex:
    Copy + Ord + Eq + std::hash::Hash + std::fmt::Debug + std::fmt::Display + Send + Sync + 'static
{
    const BYTES: usize;
    const ZERO: Self;

    /// Checked conversion from a container position
    fn from_usize(value: usize) -> Result<Self>;

    /// Checked conversion to a container position (fails on negative indices)
    fn to_usize(self) -> Result<usize>;
}

macro_rules! impl_graph_index {
    ($($ty:ty),*) => {
        $(
            impl GraphIndex for $ty {
                const BYTES: usize = size_of::<$ty>();
                const ZERO: Self = 0;

                fn from_usize(value: usize) -> Result<Self> {
                    <$ty>::try_from(value).map_err(|_| EnvError::IndexOutOfRange {
                        value: value as i128,
                        width_bytes: Self::BYTES,
                    })
                }

                fn to_usize(self) -> Result<usize> {
                    usize::try_from(self).map_err(|_| EnvError::IndexOutOfRange {
                        value: self as i128,
                        width_bytes: size_of::<usize>(),
                    })
                }
            }
        )*
    };
}

impl_graph_index!(i32, i64);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_edge_and_vertex_width_match() {
        assert_eq!(size_of::<VertexIdx>(), size_of::<EdgeIdx>());
        assert_eq!(IndexWidth::BUILD.bytes(), size_of::<VertexIdx>());
    }

    #[test]
    fn test_counter_types() {
        assert_eq!(size_of::<IterationIdx>(), size_of::<usize>());
        assert_eq!(size_of::<DimIdx>(), 4);
        assert_eq!(size_of::<KIdx>(), 4);
    }

    #[test]
    fn test_index_width_of() {
        assert_eq!(IndexWidth::of::<i32>(), IndexWidth::Narrow);
        assert_eq!(IndexWidth::of::<i64>(), IndexWidth::Wide);
        assert!(!IndexWidth::Narrow.is_wide());
        assert_eq!(IndexWidth::Wide.to_string(), "64-bit");
    }

    #[cfg(feature = "wide-index")]
    #[test]
    fn test_wide_build() {
        assert_eq!(IndexWidth::BUILD, IndexWidth::Wide);
    }

    #[cfg(not(feature = "wide-index"))]
    #[test]
    fn test_narrow_build() {
        assert_eq!(IndexWidth::BUILD, IndexWidth::Narrow);
    }

    #[test]
    fn test_narrow_conversion_rejects_overflow() {
        assert_eq!(i32::from_usize(42).unwrap(), 42);

        let err = i32::from_usize(i32::MAX as usize + 1).unwrap_err();
        assert!(matches!(err, EnvError::IndexOutOfRange { width_bytes: 4, .. }));
    }

    #[test]
    fn test_negative_index_has_no_position() {
        assert_eq!(7i64.to_usize().unwrap(), 7);
        assert!((-1i64).to_usize().is_err());
        assert!(i32::ZERO.to_usize().is_ok());
    }
}
