//! In-memory server registry.

mod repository;

pub use repository::InMemoryServerRegistry;
