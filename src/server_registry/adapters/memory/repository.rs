//! In-memory implementation of the server registry port.
//!
//! Emulates the remote registry closely enough for service and integration
//! tests: full search, sort, and pagination semantics, name and endpoint
//! uniqueness per organization, and credential-preserving updates. Credential secrets
//! are stored but never surfaced through the port, matching the remote
//! API's secret-stripping behaviour.

use crate::server_registry::{
    domain::{
        CredentialPatch, HostAddress, NewServer, OrganizationId, Pagination, Port, ServerId,
        ServerName, ServerPage, ServerQuery, ServerRecord, ServerRecordData, ServerStatus,
        ServerUpdate, SortKey, SortOrder, SshCredential, UserId,
    },
    ports::{ServerRegistry, ServerRegistryError, ServerRegistryResult},
};
use async_trait::async_trait;
use mockable::Clock;
use std::cmp::Ordering;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

#[derive(Debug, Clone)]
struct StoredServer {
    record: ServerRecord,
    credential: SshCredential,
}

/// Thread-safe in-memory server registry.
#[derive(Clone)]
pub struct InMemoryServerRegistry<C>
where
    C: Clock + Send + Sync,
{
    state: Arc<RwLock<HashMap<ServerId, StoredServer>>>,
    owner: UserId,
    clock: Arc<C>,
}

impl<C> InMemoryServerRegistry<C>
where
    C: Clock + Send + Sync,
{
    /// Creates an empty registry owned by the given user context.
    #[must_use]
    pub fn new(owner: UserId, clock: Arc<C>) -> Self {
        Self {
            state: Arc::new(RwLock::new(HashMap::new())),
            owner,
            clock,
        }
    }

    /// Returns the credential currently stored for a server.
    ///
    /// Test-support accessor; the port itself never exposes secrets.
    ///
    /// # Errors
    ///
    /// Returns [`ServerRegistryError::NotFound`] when the server does not
    /// exist.
    pub fn stored_credential(&self, server_id: ServerId) -> ServerRegistryResult<SshCredential> {
        let state = self.read_state()?;
        state
            .get(&server_id)
            .map(|stored| stored.credential.clone())
            .ok_or(ServerRegistryError::NotFound(server_id))
    }

    fn read_state(
        &self,
    ) -> ServerRegistryResult<std::sync::RwLockReadGuard<'_, HashMap<ServerId, StoredServer>>> {
        self.state
            .read()
            .map_err(|err| ServerRegistryError::transport(std::io::Error::other(err.to_string())))
    }

    fn write_state(
        &self,
    ) -> ServerRegistryResult<std::sync::RwLockWriteGuard<'_, HashMap<ServerId, StoredServer>>>
    {
        self.state
            .write()
            .map_err(|err| ServerRegistryError::transport(std::io::Error::other(err.to_string())))
    }
}

fn matches_search(record: &ServerRecord, term: &str) -> bool {
    let needle = term.to_ascii_lowercase();
    record.name().as_str().to_ascii_lowercase().contains(&needle)
        || record.host().as_str().to_ascii_lowercase().contains(&needle)
}

fn compare(left: &ServerRecord, right: &ServerRecord, key: SortKey) -> Ordering {
    match key {
        SortKey::Name => left.name().as_str().cmp(right.name().as_str()),
        SortKey::Host => left.host().as_str().cmp(right.host().as_str()),
        SortKey::Port => left.port().get().cmp(&right.port().get()),
        SortKey::Username => left.username().as_str().cmp(right.username().as_str()),
        SortKey::CreatedAt => left.created_at().cmp(&right.created_at()),
        SortKey::UpdatedAt => left.updated_at().cmp(&right.updated_at()),
    }
}

/// Uniqueness rules enforced per organization, excluding one record.
struct UniquenessCheck<'a> {
    organization_id: OrganizationId,
    name: &'a ServerName,
    host: &'a HostAddress,
    port: Port,
    exclude: Option<ServerId>,
}

fn check_unique(
    state: &HashMap<ServerId, StoredServer>,
    check: &UniquenessCheck<'_>,
) -> ServerRegistryResult<()> {
    let peers = state.values().filter(|stored| {
        stored.record.organization_id() == check.organization_id
            && check.exclude != Some(stored.record.id())
    });

    for stored in peers {
        if stored.record.name() == check.name {
            return Err(ServerRegistryError::DuplicateName {
                name: check.name.as_str().to_owned(),
            });
        }
        if stored.record.host() == check.host && stored.record.port() == check.port {
            return Err(ServerRegistryError::DuplicateEndpoint {
                host: check.host.as_str().to_owned(),
                port: check.port,
            });
        }
    }
    Ok(())
}

#[async_trait]
impl<C> ServerRegistry for InMemoryServerRegistry<C>
where
    C: Clock + Send + Sync,
{
    async fn list(&self, query: &ServerQuery) -> ServerRegistryResult<ServerPage> {
        let state = self.read_state()?;

        let mut matching: Vec<ServerRecord> = state
            .values()
            .map(|stored| stored.record.clone())
            .filter(|record| query.search().is_none_or(|term| matches_search(record, term)))
            .collect();

        matching.sort_by(|left, right| {
            let ordering = compare(left, right, query.sort_key());
            match query.sort_order() {
                SortOrder::Asc => ordering,
                SortOrder::Desc => ordering.reverse(),
            }
        });

        let pagination = Pagination::for_query(query, matching.len());
        let servers: Vec<ServerRecord> = matching
            .into_iter()
            .skip(query.offset())
            .take(query.page_size())
            .collect();

        Ok(ServerPage {
            servers,
            pagination,
        })
    }

    async fn create(&self, server: &NewServer) -> ServerRegistryResult<ServerId> {
        let mut state = self.write_state()?;

        check_unique(
            &state,
            &UniquenessCheck {
                organization_id: server.organization_id,
                name: &server.name,
                host: &server.host,
                port: server.port,
                exclude: None,
            },
        )?;

        let timestamp = self.clock.utc();
        let record = ServerRecord::from_data(ServerRecordData {
            id: ServerId::new(),
            name: server.name.clone(),
            description: server.description.clone(),
            host: server.host.clone(),
            port: server.port,
            username: server.username.clone(),
            status: ServerStatus::Inactive,
            created_at: timestamp,
            updated_at: timestamp,
            user_id: self.owner,
            organization_id: server.organization_id,
        });
        let server_id = record.id();

        state.insert(
            server_id,
            StoredServer {
                record,
                credential: server.credential.clone(),
            },
        );
        Ok(server_id)
    }

    async fn update(&self, update: &ServerUpdate) -> ServerRegistryResult<()> {
        let timestamp = self.clock.utc();
        let mut state = self.write_state()?;

        let organization_id = state
            .get(&update.id)
            .map(|stored| stored.record.organization_id())
            .ok_or(ServerRegistryError::NotFound(update.id))?;
        check_unique(
            &state,
            &UniquenessCheck {
                organization_id,
                name: &update.name,
                host: &update.host,
                port: update.port,
                exclude: Some(update.id),
            },
        )?;

        let stored = state
            .get_mut(&update.id)
            .ok_or(ServerRegistryError::NotFound(update.id))?;

        stored.record = ServerRecord::from_data(ServerRecordData {
            id: stored.record.id(),
            name: update.name.clone(),
            description: update.description.clone(),
            host: update.host.clone(),
            port: update.port,
            username: update.username.clone(),
            status: stored.record.status(),
            created_at: stored.record.created_at(),
            updated_at: timestamp,
            user_id: stored.record.user_id(),
            organization_id: stored.record.organization_id(),
        });

        if let CredentialPatch::Replace(credential) = &update.credential {
            stored.credential = credential.clone();
        }

        Ok(())
    }

    async fn change_status(
        &self,
        server_id: ServerId,
        status: ServerStatus,
    ) -> ServerRegistryResult<ServerRecord> {
        let timestamp = self.clock.utc();
        let mut state = self.write_state()?;

        let stored = state
            .get_mut(&server_id)
            .ok_or(ServerRegistryError::NotFound(server_id))?;
        stored.record = stored.record.with_status(status, timestamp);
        Ok(stored.record.clone())
    }

    async fn delete(&self, server_id: ServerId) -> ServerRegistryResult<()> {
        let mut state = self.write_state()?;
        state
            .remove(&server_id)
            .ok_or(ServerRegistryError::NotFound(server_id))?;
        Ok(())
    }

    async fn find_active(&self) -> ServerRegistryResult<Option<ServerRecord>> {
        let state = self.read_state()?;
        Ok(state
            .values()
            .map(|stored| &stored.record)
            .find(|record| record.status() == ServerStatus::Active)
            .cloned())
    }
}
