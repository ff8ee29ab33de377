//! Registry port: the contract every server-registry backend fulfils.

use crate::server_registry::domain::{
    NewServer, Port, ServerId, ServerPage, ServerQuery, ServerRecord, ServerStatus, ServerUpdate,
};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for server registry operations.
pub type ServerRegistryResult<T> = Result<T, ServerRegistryError>;

/// Contract for listing and mutating server records.
///
/// The production implementation talks to the remote fleet API; tests use
/// the in-memory adapter or a mock.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ServerRegistry: Send + Sync {
    /// Returns one page of server records matching the query.
    async fn list(&self, query: &ServerQuery) -> ServerRegistryResult<ServerPage>;

    /// Creates a server record and returns its identifier.
    ///
    /// # Errors
    ///
    /// Returns [`ServerRegistryError::DuplicateName`] or
    /// [`ServerRegistryError::DuplicateEndpoint`] when another record in
    /// the same organization already uses the name or the host and port.
    async fn create(&self, server: &NewServer) -> ServerRegistryResult<ServerId>;

    /// Persists updates to an existing record.
    ///
    /// # Errors
    ///
    /// Returns [`ServerRegistryError::NotFound`] when the record does not
    /// exist, and the same duplicate-name and duplicate-endpoint errors as
    /// [`ServerRegistry::create`] when the new values collide with another
    /// record in the organization.
    async fn update(&self, update: &ServerUpdate) -> ServerRegistryResult<()>;

    /// Transitions a server's lifecycle status and returns the updated
    /// record.
    async fn change_status(
        &self,
        server_id: ServerId,
        status: ServerStatus,
    ) -> ServerRegistryResult<ServerRecord>;

    /// Removes a server record.
    async fn delete(&self, server_id: ServerId) -> ServerRegistryResult<()>;

    /// Returns the organization's active server, if one exists.
    ///
    /// At most one record is expected to hold status `active` at a time.
    async fn find_active(&self) -> ServerRegistryResult<Option<ServerRecord>>;
}

/// Errors returned by server registry implementations.
#[derive(Debug, Clone, Error)]
pub enum ServerRegistryError {
    /// The server was not found.
    #[error("server not found: {0}")]
    NotFound(ServerId),

    /// Another record in the organization already uses this name.
    #[error("a server named '{name}' already exists")]
    DuplicateName {
        /// Conflicting name.
        name: String,
    },

    /// Another record in the organization already uses this endpoint.
    #[error("a server with host {host}:{port} already exists")]
    DuplicateEndpoint {
        /// Conflicting host.
        host: String,
        /// Conflicting port.
        port: Port,
    },

    /// The remote API rejected the request.
    #[error("registry API error (status {status}): {message}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Response body or reason phrase.
        message: String,
    },

    /// The request could not be delivered or the response not read.
    #[error("registry transport error: {0}")]
    Transport(Arc<dyn std::error::Error + Send + Sync>),

    /// The registry returned a payload that does not decode into domain
    /// types.
    #[error("invalid registry payload: {0}")]
    InvalidPayload(Arc<dyn std::error::Error + Send + Sync>),
}

impl ServerRegistryError {
    /// Wraps a transport-layer failure.
    pub fn transport(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Transport(Arc::new(err))
    }

    /// Wraps a payload decoding or validation failure.
    pub fn invalid_payload(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::InvalidPayload(Arc::new(err))
    }
}
