//! Active-server change events.

use super::ActiveServerRef;
use serde::{Deserialize, Serialize};

/// Event emitted whenever the active-server reference changes.
///
/// Cache consumers subscribe to these instead of being invalidated by
/// name, keeping the selection service unaware of who holds per-server
/// caches.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ActiveServerChange {
    /// A server became the active deployment target.
    Activated(ActiveServerRef),
    /// The active server was deselected; the default context applies.
    Cleared,
}
