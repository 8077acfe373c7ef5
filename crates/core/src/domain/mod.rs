// Domain Layer - build facts, engine types, thread requests

pub mod build;
pub mod parallelism;
pub mod thread_request;
pub mod types;

// Re-exports
pub use build::{BuildConfiguration, CapabilityFlags};
pub use parallelism::{EngineContext, ParallelismConfig};
pub use thread_request::ThreadRequest;
pub use types::{
    Coordinate, DimIdx, Distance, EdgeIdx, GraphIndex, IndexWidth, IterationIdx, KIdx, VertexIdx,
};
