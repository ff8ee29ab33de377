//! Port contracts for server registry access.

mod registry;

pub use registry::{ServerRegistry, ServerRegistryError, ServerRegistryResult};

#[cfg(test)]
pub use registry::MockServerRegistry;
