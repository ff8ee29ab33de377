//! Invalidation coordination services.

mod coordinator;

pub use coordinator::{InvalidationCoordinator, StaleTagSubscriber};
