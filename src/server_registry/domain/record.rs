//! Server record aggregate and validated write payloads.
//!
//! [`ServerRecord`] is the client-side view of a server as reported by the
//! remote registry. The registry never returns credential secrets, so
//! records carry none; credential material only travels outward inside
//! [`NewServer`] and [`ServerUpdate`].

use super::{
    CredentialPatch, HostAddress, OrganizationId, Port, ServerDescription, ServerId, ServerName,
    ServerStatus, SshCredential, SshUsername, UserId,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Client-side view of one managed server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerRecord {
    id: ServerId,
    name: ServerName,
    description: Option<ServerDescription>,
    host: HostAddress,
    port: Port,
    username: SshUsername,
    status: ServerStatus,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    user_id: UserId,
    organization_id: OrganizationId,
}

/// Parameter object for building a record from registry-reported fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerRecordData {
    /// Server identifier.
    pub id: ServerId,
    /// Display name.
    pub name: ServerName,
    /// Optional description.
    pub description: Option<ServerDescription>,
    /// Network host.
    pub host: HostAddress,
    /// SSH port.
    pub port: Port,
    /// SSH login name.
    pub username: SshUsername,
    /// Lifecycle status.
    pub status: ServerStatus,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last-update timestamp.
    pub updated_at: DateTime<Utc>,
    /// Owning user.
    pub user_id: UserId,
    /// Owning organization.
    pub organization_id: OrganizationId,
}

impl ServerRecord {
    /// Builds a record from registry-reported fields.
    #[must_use]
    pub fn from_data(data: ServerRecordData) -> Self {
        let ServerRecordData {
            id,
            name,
            description,
            host,
            port,
            username,
            status,
            created_at,
            updated_at,
            user_id,
            organization_id,
        } = data;
        Self {
            id,
            name,
            description,
            host,
            port,
            username,
            status,
            created_at,
            updated_at,
            user_id,
            organization_id,
        }
    }

    /// Returns the server identifier.
    #[must_use]
    pub const fn id(&self) -> ServerId {
        self.id
    }

    /// Returns the display name.
    #[must_use]
    pub const fn name(&self) -> &ServerName {
        &self.name
    }

    /// Returns the optional description.
    #[must_use]
    pub const fn description(&self) -> Option<&ServerDescription> {
        self.description.as_ref()
    }

    /// Returns the network host.
    #[must_use]
    pub const fn host(&self) -> &HostAddress {
        &self.host
    }

    /// Returns the SSH port.
    #[must_use]
    pub const fn port(&self) -> Port {
        self.port
    }

    /// Returns the SSH login name.
    #[must_use]
    pub const fn username(&self) -> &SshUsername {
        &self.username
    }

    /// Returns the lifecycle status.
    #[must_use]
    pub const fn status(&self) -> ServerStatus {
        self.status
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the last-update timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Returns the owning user.
    #[must_use]
    pub const fn user_id(&self) -> UserId {
        self.user_id
    }

    /// Returns the owning organization.
    #[must_use]
    pub const fn organization_id(&self) -> OrganizationId {
        self.organization_id
    }

    /// Returns a copy of this record with the given status applied.
    #[must_use]
    pub fn with_status(&self, status: ServerStatus, updated_at: DateTime<Utc>) -> Self {
        let mut record = self.clone();
        record.status = status;
        record.updated_at = updated_at;
        record
    }
}

/// Validated payload for creating a server record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewServer {
    /// Display name.
    pub name: ServerName,
    /// Optional description.
    pub description: Option<ServerDescription>,
    /// Network host.
    pub host: HostAddress,
    /// SSH port.
    pub port: Port,
    /// SSH login name.
    pub username: SshUsername,
    /// SSH credential; exactly one method populated by construction.
    pub credential: SshCredential,
    /// Owning organization.
    pub organization_id: OrganizationId,
}

/// Validated payload for updating a server record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerUpdate {
    /// Identifier of the record to update.
    pub id: ServerId,
    /// Display name.
    pub name: ServerName,
    /// Optional description.
    pub description: Option<ServerDescription>,
    /// Network host.
    pub host: HostAddress,
    /// SSH port.
    pub port: Port,
    /// SSH login name.
    pub username: SshUsername,
    /// Credential patch; omitted fields preserve the stored credential.
    pub credential: CredentialPatch,
}
