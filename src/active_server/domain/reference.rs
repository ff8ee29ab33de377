//! Weak reference to the currently selected server.

use crate::server_registry::domain::{
    HostAddress, Port, ServerId, ServerName, ServerRecord, ServerStatus,
};
use serde::{Deserialize, Serialize};

/// Cached display fields for the active server.
///
/// A snapshot is convenience data for rendering; the remote registry
/// remains the source of truth.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerSnapshot {
    /// Display name at selection time.
    pub name: ServerName,
    /// Network host at selection time.
    pub host: HostAddress,
    /// SSH port at selection time.
    pub port: Port,
    /// Lifecycle status at selection time.
    pub status: ServerStatus,
}

/// Weak reference to the currently selected server.
///
/// Holds the identifier plus a cached snapshot; it is not an owning
/// relationship and never outlives reconciliation against the registry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActiveServerRef {
    server_id: ServerId,
    snapshot: ServerSnapshot,
}

impl ActiveServerRef {
    /// Builds a reference from a registry-reported record.
    #[must_use]
    pub fn from_record(record: &ServerRecord) -> Self {
        Self {
            server_id: record.id(),
            snapshot: ServerSnapshot {
                name: record.name().clone(),
                host: record.host().clone(),
                port: record.port(),
                status: record.status(),
            },
        }
    }

    /// Returns the referenced server's identifier.
    #[must_use]
    pub const fn server_id(&self) -> ServerId {
        self.server_id
    }

    /// Returns the cached snapshot.
    #[must_use]
    pub const fn snapshot(&self) -> &ServerSnapshot {
        &self.snapshot
    }
}
