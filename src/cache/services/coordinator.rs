//! Fan-out of active-server changes to cache subscribers.
//!
//! The coordinator holds the registered subscribers and replays each
//! change to all of them. The sweep is idempotent: replaying a change a
//! second time leaves the stale set exactly as it was, so subscribers
//! need no deduplication of their own.

use crate::active_server::domain::ActiveServerChange;
use crate::cache::domain::CacheTag;
use crate::cache::ports::{CacheStore, InvalidationSubscriber};
use std::sync::{Arc, PoisonError, RwLock};
use tokio::sync::broadcast;
use tracing::{debug, warn};

/// Registers cache subscribers and fans active-server changes out to them.
#[derive(Default)]
pub struct InvalidationCoordinator {
    subscribers: RwLock<Vec<Arc<dyn InvalidationSubscriber>>>,
}

impl InvalidationCoordinator {
    /// Creates a coordinator with no subscribers.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a subscriber for subsequent changes.
    pub fn register(&self, subscriber: Arc<dyn InvalidationSubscriber>) {
        self.subscribers
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .push(subscriber);
    }

    /// Returns the number of registered subscribers.
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.subscribers
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Replays one change to every registered subscriber.
    pub fn notify(&self, change: &ActiveServerChange) {
        let subscribers = self
            .subscribers
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone();
        debug!(subscribers = subscribers.len(), "fanning out active-server change");
        for subscriber in subscribers {
            subscriber.on_active_server_changed(change);
        }
    }

    /// Drains a broadcast subscription, forwarding each change.
    ///
    /// Runs until the sending side is dropped. Missed messages after a
    /// lagged receiver are skipped with a warning; every change that does
    /// arrive is forwarded exactly once.
    pub async fn forward(
        self: Arc<Self>,
        mut receiver: broadcast::Receiver<ActiveServerChange>,
    ) {
        loop {
            match receiver.recv().await {
                Ok(change) => self.notify(&change),
                Err(broadcast::error::RecvError::Lagged(missed)) => {
                    warn!(missed, "invalidation forwarder lagged; continuing");
                }
                Err(broadcast::error::RecvError::Closed) => break,
            }
        }
    }
}

/// Default subscriber: marks every swept tag stale in a shared store.
///
/// The sweep covers every resource domain's listing tag plus the
/// active-server tag. It performs no fetches of its own; consumers
/// re-fetch lazily when they next read their tag.
pub struct StaleTagSubscriber {
    store: Arc<dyn CacheStore>,
}

impl StaleTagSubscriber {
    /// Creates a subscriber sweeping into the given store.
    #[must_use]
    pub fn new(store: Arc<dyn CacheStore>) -> Self {
        Self { store }
    }
}

impl InvalidationSubscriber for StaleTagSubscriber {
    fn on_active_server_changed(&self, _change: &ActiveServerChange) {
        for tag in CacheTag::sweep() {
            self.store.mark_stale(tag);
        }
    }
}
