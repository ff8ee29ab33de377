//! Active-server selection service.
//!
//! Selection is a two-step registry transition: the previously active
//! server (if any) is deactivated first, and only after that call
//! completes is the newly chosen server activated. The session slot is
//! committed only once the activation succeeds, so a failed call leaves
//! client state untouched. Concurrent selections resolve last-write-wins
//! through session tickets; a superseded attempt publishes nothing.

use crate::active_server::{
    domain::{ActiveServerChange, ActiveServerRef},
    ports::ActiveServerChangePublisher,
    session::ActiveServerSession,
};
use crate::server_registry::{
    domain::{ServerId, ServerStatus},
    ports::{ServerRegistry, ServerRegistryError},
};
use std::sync::Arc;
use thiserror::Error;
use tracing::{info, warn};

/// Errors surfaced by selection operations.
#[derive(Debug, Error)]
pub enum SelectionError {
    /// A registry status call failed; local state is unchanged.
    #[error(transparent)]
    Registry(#[from] ServerRegistryError),
}

/// Result type for selection operations.
pub type SelectionResult<T> = Result<T, SelectionError>;

/// Result of selecting a server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectionOutcome {
    /// The server became active and the session was updated.
    Applied(ActiveServerRef),
    /// The server was already the active one; nothing was done.
    AlreadyActive,
    /// A newer selection landed first; this one was discarded.
    Superseded,
}

/// Result of selecting the default (no server) context.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClearOutcome {
    /// The active server was deactivated and the session cleared.
    Cleared,
    /// No server was active; nothing was done and no request issued.
    NoActiveServer,
    /// A newer selection landed first; this one was discarded.
    Superseded,
}

/// Result of reconciling the session against the registry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReconcileOutcome {
    /// The registry reported an active server and the session adopted it.
    Adopted(ActiveServerRef),
    /// The registry reported none and a stale local reference was cleared.
    Cleared,
    /// Session and registry already agreed.
    Unchanged,
    /// A selection landed while reconciling; its result stands instead.
    Superseded,
}

/// Orchestrates active-server switching, clearing, and reconciliation.
#[derive(Clone)]
pub struct ActiveServerSelector<R, P>
where
    R: ServerRegistry,
    P: ActiveServerChangePublisher,
{
    registry: Arc<R>,
    session: Arc<ActiveServerSession>,
    publisher: Arc<P>,
}

impl<R, P> ActiveServerSelector<R, P>
where
    R: ServerRegistry,
    P: ActiveServerChangePublisher,
{
    /// Creates a new selector service.
    #[must_use]
    pub const fn new(registry: Arc<R>, session: Arc<ActiveServerSession>, publisher: Arc<P>) -> Self {
        Self {
            registry,
            session,
            publisher,
        }
    }

    /// Returns the session this selector commits into.
    #[must_use]
    pub fn session(&self) -> &ActiveServerSession {
        &self.session
    }

    /// Makes the given server the active deployment target.
    ///
    /// If another server is currently active it is deactivated first; the
    /// activation request is only issued once deactivation has completed,
    /// so the backend never reports two active servers from this action.
    ///
    /// # Errors
    ///
    /// Returns [`SelectionError::Registry`] when either status call fails;
    /// the session is left unchanged in that case.
    pub async fn select(&self, server_id: ServerId) -> SelectionResult<SelectionOutcome> {
        let ticket = self.session.begin_selection();

        if let Some(current) = self.session.current() {
            if current.server_id() == server_id {
                return Ok(SelectionOutcome::AlreadyActive);
            }
            self.registry
                .change_status(current.server_id(), ServerStatus::Inactive)
                .await?;
        }

        let activated = self
            .registry
            .change_status(server_id, ServerStatus::Active)
            .await?;
        let reference = ActiveServerRef::from_record(&activated);

        if self.session.commit(ticket, Some(reference.clone())) {
            info!(server_id = %server_id, "active server switched");
            self.publisher
                .publish(&ActiveServerChange::Activated(reference.clone()));
            Ok(SelectionOutcome::Applied(reference))
        } else {
            warn!(server_id = %server_id, "selection superseded by a newer one");
            Ok(SelectionOutcome::Superseded)
        }
    }

    /// Returns to the default context with no active server.
    ///
    /// A no-op issuing zero registry calls when nothing is active.
    ///
    /// # Errors
    ///
    /// Returns [`SelectionError::Registry`] when deactivation fails; the
    /// session is left unchanged in that case.
    pub async fn select_default(&self) -> SelectionResult<ClearOutcome> {
        let Some(current) = self.session.current() else {
            return Ok(ClearOutcome::NoActiveServer);
        };

        let ticket = self.session.begin_selection();
        self.registry
            .change_status(current.server_id(), ServerStatus::Inactive)
            .await?;

        if self.session.commit(ticket, None) {
            info!(server_id = %current.server_id(), "active server deselected");
            self.publisher.publish(&ActiveServerChange::Cleared);
            Ok(ClearOutcome::Cleared)
        } else {
            Ok(ClearOutcome::Superseded)
        }
    }

    /// Aligns the session with the registry's reported active server.
    ///
    /// Issued on application load: adopts the server the registry reports
    /// as active, or clears a stale local reference. No status mutations
    /// are sent, and a change event is published only when the slot
    /// actually changed.
    ///
    /// # Errors
    ///
    /// Returns [`SelectionError::Registry`] when the lookup fails.
    pub async fn reconcile(&self) -> SelectionResult<ReconcileOutcome> {
        let ticket = self.session.begin_selection();
        let reported = self.registry.find_active().await?;
        let previous = self.session.current();

        match (previous, reported) {
            (Some(current), Some(record)) if current.server_id() == record.id() => {
                Ok(ReconcileOutcome::Unchanged)
            }
            (None, None) => Ok(ReconcileOutcome::Unchanged),
            (_, Some(record)) => {
                let reference = ActiveServerRef::from_record(&record);
                if self.session.commit(ticket, Some(reference.clone())) {
                    info!(server_id = %reference.server_id(), "adopted active server from registry");
                    self.publisher
                        .publish(&ActiveServerChange::Activated(reference.clone()));
                    Ok(ReconcileOutcome::Adopted(reference))
                } else {
                    Ok(ReconcileOutcome::Superseded)
                }
            }
            (Some(_), None) => {
                if self.session.commit(ticket, None) {
                    info!("cleared stale active-server reference");
                    self.publisher.publish(&ActiveServerChange::Cleared);
                    Ok(ReconcileOutcome::Cleared)
                } else {
                    Ok(ReconcileOutcome::Superseded)
                }
            }
        }
    }
}
