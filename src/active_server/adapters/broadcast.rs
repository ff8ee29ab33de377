//! Tokio broadcast implementation of the change publisher port.

use crate::active_server::domain::ActiveServerChange;
use crate::active_server::ports::ActiveServerChangePublisher;
use tokio::sync::broadcast;
use tracing::debug;

/// Default broadcast channel capacity.
const DEFAULT_CAPACITY: usize = 64;

/// In-process fan-out of active-server changes over a broadcast channel.
#[derive(Debug, Clone)]
pub struct BroadcastChangePublisher {
    sender: broadcast::Sender<ActiveServerChange>,
}

impl BroadcastChangePublisher {
    /// Creates a publisher with the default channel capacity.
    #[must_use]
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    /// Creates a publisher with a custom channel capacity.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Opens a new subscription receiving subsequent changes.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<ActiveServerChange> {
        self.sender.subscribe()
    }

    /// Returns the number of live subscribers.
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl Default for BroadcastChangePublisher {
    fn default() -> Self {
        Self::new()
    }
}

impl ActiveServerChangePublisher for BroadcastChangePublisher {
    fn publish(&self, change: &ActiveServerChange) {
        if self.sender.send(change.clone()).is_err() {
            // No live subscribers; the change is simply not observed.
            debug!("active-server change published with no subscribers");
        }
    }
}
