//! Wire DTOs for the fleet registry's server-settings endpoints.
//!
//! Every response body arrives wrapped in a `{ "data": … }` envelope.
//! Server payloads returned by the API carry no credential material;
//! secrets only travel outward in create and update bodies.

use crate::server_registry::domain::{
    CredentialPatch, HostAddress, NewServer, OrganizationId, Pagination, Port, ServerDescription,
    ServerId, ServerName, ServerPage, ServerRecord, ServerRecordData, ServerStatus, ServerUpdate,
    SshCredential, SshUsername, UserId,
};
use crate::server_registry::ports::ServerRegistryError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Response envelope wrapping every registry payload.
#[derive(Debug, Deserialize)]
pub(super) struct Envelope<T> {
    pub(super) data: T,
}

/// Server record as reported by the registry (secrets stripped).
#[derive(Debug, Clone, Deserialize)]
pub(super) struct ServerDto {
    id: Uuid,
    name: String,
    #[serde(default)]
    description: String,
    host: String,
    port: u16,
    username: String,
    status: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    user_id: Uuid,
    organization_id: Uuid,
}

impl TryFrom<ServerDto> for ServerRecord {
    type Error = ServerRegistryError;

    fn try_from(dto: ServerDto) -> Result<Self, Self::Error> {
        let description = if dto.description.is_empty() {
            None
        } else {
            Some(
                ServerDescription::new(dto.description)
                    .map_err(ServerRegistryError::invalid_payload)?,
            )
        };

        Ok(Self::from_data(ServerRecordData {
            id: ServerId::from_uuid(dto.id),
            name: ServerName::new(dto.name).map_err(ServerRegistryError::invalid_payload)?,
            description,
            host: HostAddress::new(dto.host).map_err(ServerRegistryError::invalid_payload)?,
            port: Port::new(dto.port).map_err(ServerRegistryError::invalid_payload)?,
            username: SshUsername::new(dto.username)
                .map_err(ServerRegistryError::invalid_payload)?,
            status: ServerStatus::try_from(dto.status.as_str())
                .map_err(ServerRegistryError::invalid_payload)?,
            created_at: dto.created_at,
            updated_at: dto.updated_at,
            user_id: UserId::from_uuid(dto.user_id),
            organization_id: OrganizationId::from_uuid(dto.organization_id),
        }))
    }
}

/// Pagination metadata as reported by the registry.
#[derive(Debug, Clone, Deserialize)]
pub(super) struct PaginationDto {
    current_page: usize,
    page_size: usize,
    total_pages: usize,
    total_items: usize,
    has_next: bool,
    has_prev: bool,
}

impl From<PaginationDto> for Pagination {
    fn from(dto: PaginationDto) -> Self {
        Self {
            current_page: dto.current_page,
            page_size: dto.page_size,
            total_pages: dto.total_pages,
            total_items: dto.total_items,
            has_next: dto.has_next,
            has_prev: dto.has_prev,
        }
    }
}

/// Listing payload: records plus pagination.
#[derive(Debug, Deserialize)]
pub(super) struct ServerListDto {
    servers: Vec<ServerDto>,
    pagination: PaginationDto,
}

impl TryFrom<ServerListDto> for ServerPage {
    type Error = ServerRegistryError;

    fn try_from(dto: ServerListDto) -> Result<Self, Self::Error> {
        let servers = dto
            .servers
            .into_iter()
            .map(ServerRecord::try_from)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self {
            servers,
            pagination: dto.pagination.into(),
        })
    }
}

/// Create response payload.
#[derive(Debug, Deserialize)]
pub(super) struct CreatedDto {
    pub(super) id: Uuid,
}

/// Request body for `POST /servers`.
#[derive(Debug, Serialize)]
pub(super) struct CreateServerBody {
    name: String,
    description: String,
    host: String,
    port: u16,
    username: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    ssh_password: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    ssh_private_key_path: Option<String>,
    organization_id: Uuid,
}

impl From<&NewServer> for CreateServerBody {
    fn from(server: &NewServer) -> Self {
        let (ssh_password, ssh_private_key_path) = credential_fields(Some(&server.credential));
        Self {
            name: server.name.as_str().to_owned(),
            description: server
                .description
                .as_ref()
                .map(|description| description.as_str().to_owned())
                .unwrap_or_default(),
            host: server.host.as_str().to_owned(),
            port: server.port.get(),
            username: server.username.as_str().to_owned(),
            ssh_password,
            ssh_private_key_path,
            organization_id: server.organization_id.into_inner(),
        }
    }
}

/// Request body for `PUT /servers`.
#[derive(Debug, Serialize)]
pub(super) struct UpdateServerBody {
    id: Uuid,
    name: String,
    description: String,
    host: String,
    port: u16,
    username: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    ssh_password: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    ssh_private_key_path: Option<String>,
}

impl From<&ServerUpdate> for UpdateServerBody {
    fn from(update: &ServerUpdate) -> Self {
        let credential = match &update.credential {
            CredentialPatch::Preserve => None,
            CredentialPatch::Replace(credential) => Some(credential),
        };
        let (ssh_password, ssh_private_key_path) = credential_fields(credential);
        Self {
            id: update.id.into_inner(),
            name: update.name.as_str().to_owned(),
            description: update
                .description
                .as_ref()
                .map(|description| description.as_str().to_owned())
                .unwrap_or_default(),
            host: update.host.as_str().to_owned(),
            port: update.port.get(),
            username: update.username.as_str().to_owned(),
            ssh_password,
            ssh_private_key_path,
        }
    }
}

fn credential_fields(credential: Option<&SshCredential>) -> (Option<String>, Option<String>) {
    match credential {
        None => (None, None),
        Some(SshCredential::Password(secret)) => (Some(secret.clone()), None),
        Some(SshCredential::PrivateKeyPath(path)) => (None, Some(path.clone())),
    }
}

/// Request body for `PATCH /servers/status`.
#[derive(Debug, Serialize)]
pub(super) struct StatusBody {
    pub(super) id: Uuid,
    pub(super) status: &'static str,
}

/// Request body for `DELETE /servers`.
#[derive(Debug, Serialize)]
pub(super) struct DeleteBody {
    pub(super) id: Uuid,
}
