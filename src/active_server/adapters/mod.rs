//! Adapter implementations for active-server change publication.

mod broadcast;

pub use broadcast::BroadcastChangePublisher;
