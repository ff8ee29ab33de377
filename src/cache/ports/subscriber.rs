//! Subscriber contract for active-server changes.

use crate::active_server::domain::ActiveServerChange;

/// A resource-cache module reacting to active-server changes.
///
/// Each consumer subscribes independently; the selection side never needs
/// to know subscribers by name.
pub trait InvalidationSubscriber: Send + Sync {
    /// Called once per active-server change.
    fn on_active_server_changed(&self, change: &ActiveServerChange);
}
