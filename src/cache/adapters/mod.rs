//! Adapter implementations for cache staleness tracking.

mod memory;

pub use memory::InMemoryCacheStore;
