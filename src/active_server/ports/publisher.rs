//! Publisher port decoupling selection from cache consumers.

use crate::active_server::domain::ActiveServerChange;

/// Outbound seam over which active-server changes are announced.
///
/// Publishing is fire-and-forget: a change with no subscribers is not an
/// error, and the selection service never waits on consumers.
pub trait ActiveServerChangePublisher: Send + Sync {
    /// Announces an active-server change.
    fn publish(&self, change: &ActiveServerChange);
}
