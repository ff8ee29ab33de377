//! Service layer for server record CRUD.
//!
//! [`ServerCatalogService`] converts raw form input into validated domain
//! values before anything touches the registry port, so field-level
//! validation failures never turn into network calls.

use crate::server_registry::{
    domain::{
        CredentialPatch, HostAddress, NewServer, OrganizationId, Port, ServerDescription,
        ServerDomainError, ServerId, ServerName, ServerPage, ServerQuery, ServerUpdate,
        SshCredential, SshUsername,
    },
    ports::{ServerRegistry, ServerRegistryError},
};
use std::sync::Arc;
use thiserror::Error;
use tracing::info;

/// Raw form input for creating a server record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateServerRequest {
    /// Display name.
    pub name: String,
    /// Optional description.
    pub description: Option<String>,
    /// Network host.
    pub host: String,
    /// SSH port.
    pub port: u16,
    /// SSH login name.
    pub username: String,
    /// SSH password, when using password auth.
    pub password: Option<String>,
    /// Private key path, when using key auth.
    pub private_key_path: Option<String>,
    /// Owning organization.
    pub organization_id: OrganizationId,
}

/// Raw form input for updating a server record.
///
/// Leaving both credential fields empty preserves the stored credential.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateServerRequest {
    /// Identifier of the record to update.
    pub id: ServerId,
    /// Display name.
    pub name: String,
    /// Optional description.
    pub description: Option<String>,
    /// Network host.
    pub host: String,
    /// SSH port.
    pub port: u16,
    /// SSH login name.
    pub username: String,
    /// SSH password, when replacing with password auth.
    pub password: Option<String>,
    /// Private key path, when replacing with key auth.
    pub private_key_path: Option<String>,
}

/// Caller's answer to the delete confirmation prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteConfirmation {
    /// The caller confirmed the deletion.
    Confirmed,
    /// The caller cancelled; no delete request may be issued.
    Cancelled,
}

/// Result of a delete attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    /// The record was removed.
    Deleted,
    /// The caller cancelled before any request was issued.
    Cancelled,
}

/// Service-level errors for server catalog operations.
#[derive(Debug, Error)]
pub enum ServerCatalogError {
    /// Field-level validation failed; nothing was sent to the registry.
    #[error(transparent)]
    Domain(#[from] ServerDomainError),
    /// The registry rejected or failed the request.
    #[error(transparent)]
    Registry(#[from] ServerRegistryError),
}

/// Result type for catalog service operations.
pub type ServerCatalogResult<T> = Result<T, ServerCatalogError>;

/// Server catalog orchestration service.
#[derive(Clone)]
pub struct ServerCatalogService<R>
where
    R: ServerRegistry,
{
    registry: Arc<R>,
}

impl<R> ServerCatalogService<R>
where
    R: ServerRegistry,
{
    /// Creates a new catalog service.
    #[must_use]
    pub const fn new(registry: Arc<R>) -> Self {
        Self { registry }
    }

    /// Returns one page of server records matching the query.
    ///
    /// # Errors
    ///
    /// Returns registry errors from the port.
    pub async fn list(&self, query: &ServerQuery) -> ServerCatalogResult<ServerPage> {
        Ok(self.registry.list(query).await?)
    }

    /// Validates and creates a server record, returning its identifier.
    ///
    /// # Errors
    ///
    /// Returns [`ServerCatalogError::Domain`] before any registry call when
    /// a field fails validation, and registry errors otherwise.
    pub async fn create(&self, request: CreateServerRequest) -> ServerCatalogResult<ServerId> {
        let server = validate_create(request)?;
        let server_id = self.registry.create(&server).await?;
        info!(server_id = %server_id, name = %server.name, "server created");
        Ok(server_id)
    }

    /// Validates and applies updates to a server record.
    ///
    /// # Errors
    ///
    /// Returns [`ServerCatalogError::Domain`] before any registry call when
    /// a field fails validation, and registry errors otherwise.
    pub async fn update(&self, request: UpdateServerRequest) -> ServerCatalogResult<()> {
        let update = validate_update(request)?;
        self.registry.update(&update).await?;
        info!(server_id = %update.id, "server updated");
        Ok(())
    }

    /// Deletes a server record once the caller has confirmed.
    ///
    /// A cancelled confirmation issues no registry call at all.
    ///
    /// # Errors
    ///
    /// Returns registry errors from the port.
    pub async fn delete(
        &self,
        server_id: ServerId,
        confirmation: DeleteConfirmation,
    ) -> ServerCatalogResult<DeleteOutcome> {
        if confirmation == DeleteConfirmation::Cancelled {
            return Ok(DeleteOutcome::Cancelled);
        }

        self.registry.delete(server_id).await?;
        info!(server_id = %server_id, "server deleted");
        Ok(DeleteOutcome::Deleted)
    }
}

fn validate_description(
    description: Option<String>,
) -> Result<Option<ServerDescription>, ServerDomainError> {
    description
        .filter(|text| !text.trim().is_empty())
        .map(ServerDescription::new)
        .transpose()
}

fn validate_create(request: CreateServerRequest) -> Result<NewServer, ServerDomainError> {
    Ok(NewServer {
        name: ServerName::new(request.name)?,
        description: validate_description(request.description)?,
        host: HostAddress::new(request.host)?,
        port: Port::new(request.port)?,
        username: SshUsername::new(request.username)?,
        credential: SshCredential::from_fields(
            request.password.as_deref(),
            request.private_key_path.as_deref(),
        )?,
        organization_id: request.organization_id,
    })
}

fn validate_update(request: UpdateServerRequest) -> Result<ServerUpdate, ServerDomainError> {
    Ok(ServerUpdate {
        id: request.id,
        name: ServerName::new(request.name)?,
        description: validate_description(request.description)?,
        host: HostAddress::new(request.host)?,
        port: Port::new(request.port)?,
        username: SshUsername::new(request.username)?,
        credential: CredentialPatch::from_fields(
            request.password.as_deref(),
            request.private_key_path.as_deref(),
        )?,
    })
}
