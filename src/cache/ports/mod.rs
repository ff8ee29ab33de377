//! Port contracts for cache staleness tracking and change subscription.

mod store;
mod subscriber;

pub use store::CacheStore;
pub use subscriber::InvalidationSubscriber;
