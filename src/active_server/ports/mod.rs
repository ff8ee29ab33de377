//! Port contracts for active-server change notification.

mod publisher;

pub use publisher::ActiveServerChangePublisher;
