// Application Layer - Capability and thread-policy services

pub mod capability_probe;
pub mod thread_policy;

// Re-exports
pub use capability_probe::CapabilityProbe;
pub use thread_policy::ThreadPolicyGuard;
