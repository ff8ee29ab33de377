//! Owned session-state slot for the active-server reference.
//!
//! The slot is explicitly constructed and injected wherever it is needed;
//! its lifecycle is tied to the embedding application session and nothing
//! is persisted across reloads. Concurrent selector actions are resolved
//! last-write-wins: every selection attempt draws a monotonically
//! increasing ticket, and a commit is applied only when no newer ticket
//! has been applied since.

use crate::active_server::domain::ActiveServerRef;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{PoisonError, RwLock};

/// Ticket ordering one selection attempt against concurrent ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct SelectionTicket(u64);

#[derive(Debug, Default)]
struct SessionSlot {
    current: Option<ActiveServerRef>,
    applied: u64,
}

/// Session-scoped holder of the active-server reference.
#[derive(Debug, Default)]
pub struct ActiveServerSession {
    slot: RwLock<SessionSlot>,
    next_ticket: AtomicU64,
}

impl ActiveServerSession {
    /// Creates an empty session with no active server.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the current active-server reference, if any.
    #[must_use]
    pub fn current(&self) -> Option<ActiveServerRef> {
        self.slot
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .current
            .clone()
    }

    /// Draws a ticket for a new selection attempt.
    ///
    /// Tickets are strictly increasing; drawing one does not modify the
    /// slot.
    #[must_use]
    pub fn begin_selection(&self) -> SelectionTicket {
        SelectionTicket(self.next_ticket.fetch_add(1, Ordering::Relaxed) + 1)
    }

    /// Applies a selection result, unless a newer ticket already has.
    ///
    /// Returns `true` when the slot was updated and `false` when the
    /// attempt was superseded by a later one.
    pub fn commit(&self, ticket: SelectionTicket, value: Option<ActiveServerRef>) -> bool {
        let mut slot = self.slot.write().unwrap_or_else(PoisonError::into_inner);
        if ticket.0 <= slot.applied {
            return false;
        }
        slot.applied = ticket.0;
        slot.current = value;
        true
    }
}
