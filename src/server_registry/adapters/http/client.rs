//! Reqwest-based client for the remote fleet registry.

use super::wire::{
    CreateServerBody, CreatedDto, DeleteBody, Envelope, ServerDto, ServerListDto, StatusBody,
    UpdateServerBody,
};
use crate::config::RegistryConfig;
use crate::server_registry::{
    domain::{NewServer, ServerId, ServerPage, ServerQuery, ServerRecord, ServerStatus, ServerUpdate},
    ports::{ServerRegistry, ServerRegistryError, ServerRegistryResult},
};
use async_trait::async_trait;
use reqwest::{Client, StatusCode, Url};
use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::{debug, warn};

/// Errors raised while constructing the HTTP registry client.
#[derive(Debug, Error)]
pub enum HttpRegistryError {
    /// The configured base URL does not parse.
    #[error("invalid registry base URL '{url}': {reason}")]
    InvalidBaseUrl {
        /// Offending URL text.
        url: String,
        /// Parse failure description.
        reason: String,
    },

    /// The configured bearer token is not a valid header value.
    #[error("bearer token is not a valid header value")]
    InvalidBearerToken,

    /// The underlying HTTP client could not be built.
    #[error("failed to build HTTP client: {0}")]
    Client(#[from] reqwest::Error),
}

/// Server registry backed by the remote fleet API.
#[derive(Debug, Clone)]
pub struct HttpServerRegistry {
    client: Client,
    base_url: Url,
}

impl HttpServerRegistry {
    /// Builds a client from registry configuration.
    ///
    /// # Errors
    ///
    /// Returns [`HttpRegistryError`] when the base URL or bearer token is
    /// invalid, or the HTTP client cannot be constructed.
    pub fn from_config(config: &RegistryConfig) -> Result<Self, HttpRegistryError> {
        let base_url =
            Url::parse(config.base_url()).map_err(|source| HttpRegistryError::InvalidBaseUrl {
                url: config.base_url().to_owned(),
                reason: source.to_string(),
            })?;

        let mut headers = reqwest::header::HeaderMap::new();
        if let Some(token) = config.bearer_token() {
            let value = reqwest::header::HeaderValue::from_str(&format!("Bearer {token}"))
                .map_err(|_| HttpRegistryError::InvalidBearerToken)?;
            headers.insert(reqwest::header::AUTHORIZATION, value);
        }

        let client = Client::builder()
            .timeout(config.timeout())
            .default_headers(headers)
            .build()?;

        Ok(Self { client, base_url })
    }

    fn endpoint(&self, path: &str) -> ServerRegistryResult<Url> {
        self.base_url
            .join(path)
            .map_err(ServerRegistryError::transport)
    }

    async fn read_payload<T>(response: reqwest::Response) -> ServerRegistryResult<T>
    where
        T: DeserializeOwned,
    {
        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            warn!(status = status.as_u16(), "registry request rejected");
            return Err(ServerRegistryError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let envelope: Envelope<T> = response
            .json()
            .await
            .map_err(ServerRegistryError::transport)?;
        Ok(envelope.data)
    }

    async fn read_empty(response: reqwest::Response) -> ServerRegistryResult<()> {
        let status = response.status();
        if status.is_success() {
            return Ok(());
        }
        let message = response.text().await.unwrap_or_default();
        warn!(status = status.as_u16(), "registry request rejected");
        Err(ServerRegistryError::Api {
            status: status.as_u16(),
            message,
        })
    }

    fn map_not_found(error: ServerRegistryError, server_id: ServerId) -> ServerRegistryError {
        match error {
            ServerRegistryError::Api { status, .. }
                if status == StatusCode::NOT_FOUND.as_u16() =>
            {
                ServerRegistryError::NotFound(server_id)
            }
            other => other,
        }
    }
}

/// Page size used while scanning listings for the active server.
const SCAN_PAGE_SIZE: usize = 100;

/// Walks the full listing page by page until the active record turns up.
///
/// The registry has no dedicated active-server endpoint, so the scan
/// follows `has_next` to the end rather than trusting any single page.
async fn scan_for_active<R>(registry: &R) -> ServerRegistryResult<Option<ServerRecord>>
where
    R: ServerRegistry + ?Sized,
{
    let mut page_number = 1;
    loop {
        let query = ServerQuery::new()
            .with_page(page_number)
            .with_page_size(SCAN_PAGE_SIZE);
        let page = registry.list(&query).await?;
        let has_next = page.pagination.has_next;
        if let Some(record) = page
            .servers
            .into_iter()
            .find(|record| record.status() == ServerStatus::Active)
        {
            return Ok(Some(record));
        }
        if !has_next {
            return Ok(None);
        }
        page_number += 1;
    }
}

fn query_pairs(query: &ServerQuery) -> Vec<(&'static str, String)> {
    let mut pairs = vec![
        ("page", query.page().to_string()),
        ("page_size", query.page_size().to_string()),
        ("sort_by", query.sort_key().as_str().to_owned()),
        ("sort_order", query.sort_order().as_str().to_owned()),
    ];
    if let Some(term) = query.search() {
        pairs.push(("search", term.to_owned()));
    }
    pairs
}

#[async_trait]
impl ServerRegistry for HttpServerRegistry {
    async fn list(&self, query: &ServerQuery) -> ServerRegistryResult<ServerPage> {
        let url = self.endpoint("servers")?;
        debug!(page = query.page(), page_size = query.page_size(), "listing servers");
        let response = self
            .client
            .get(url)
            .query(&query_pairs(query))
            .send()
            .await
            .map_err(ServerRegistryError::transport)?;
        let listing: ServerListDto = Self::read_payload(response).await?;
        listing.try_into()
    }

    async fn create(&self, server: &NewServer) -> ServerRegistryResult<ServerId> {
        let url = self.endpoint("servers")?;
        let body = CreateServerBody::from(server);
        let response = self
            .client
            .post(url)
            .json(&body)
            .send()
            .await
            .map_err(ServerRegistryError::transport)?;
        let created: CreatedDto = Self::read_payload(response).await?;
        Ok(ServerId::from_uuid(created.id))
    }

    async fn update(&self, update: &ServerUpdate) -> ServerRegistryResult<()> {
        let url = self.endpoint("servers")?;
        let body = UpdateServerBody::from(update);
        let response = self
            .client
            .put(url)
            .json(&body)
            .send()
            .await
            .map_err(ServerRegistryError::transport)?;
        Self::read_empty(response)
            .await
            .map_err(|error| Self::map_not_found(error, update.id))
    }

    async fn change_status(
        &self,
        server_id: ServerId,
        status: ServerStatus,
    ) -> ServerRegistryResult<ServerRecord> {
        let url = self.endpoint("servers/status")?;
        let body = StatusBody {
            id: server_id.into_inner(),
            status: status.as_str(),
        };
        debug!(server_id = %server_id, status = %status, "changing server status");
        let response = self
            .client
            .patch(url)
            .json(&body)
            .send()
            .await
            .map_err(ServerRegistryError::transport)?;
        let dto: ServerDto = Self::read_payload(response)
            .await
            .map_err(|error| Self::map_not_found(error, server_id))?;
        dto.try_into()
    }

    async fn delete(&self, server_id: ServerId) -> ServerRegistryResult<()> {
        let url = self.endpoint("servers")?;
        let body = DeleteBody {
            id: server_id.into_inner(),
        };
        let response = self
            .client
            .delete(url)
            .json(&body)
            .send()
            .await
            .map_err(ServerRegistryError::transport)?;
        Self::read_empty(response)
            .await
            .map_err(|error| Self::map_not_found(error, server_id))
    }

    async fn find_active(&self) -> ServerRegistryResult<Option<ServerRecord>> {
        scan_for_active(self).await
    }
}
