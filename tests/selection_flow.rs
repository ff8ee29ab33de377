//! End-to-end selection flow: catalog CRUD, active-server switching, and
//! cache invalidation wired together the way the application assembles them.

#![expect(
    clippy::expect_used,
    reason = "Test code uses expect for assertion clarity"
)]

use fleetdeck::active_server::adapters::BroadcastChangePublisher;
use fleetdeck::active_server::services::{ActiveServerSelector, ClearOutcome, SelectionOutcome};
use fleetdeck::active_server::session::ActiveServerSession;
use fleetdeck::cache::adapters::InMemoryCacheStore;
use fleetdeck::cache::domain::{CacheDomain, CacheTag};
use fleetdeck::cache::ports::CacheStore;
use fleetdeck::cache::services::{InvalidationCoordinator, StaleTagSubscriber};
use fleetdeck::server_registry::adapters::memory::InMemoryServerRegistry;
use fleetdeck::server_registry::domain::{
    OrganizationId, ServerId, ServerQuery, ServerStatus, UserId,
};
use fleetdeck::server_registry::ports::ServerRegistry;
use fleetdeck::server_registry::services::{CreateServerRequest, ServerCatalogService};
use mockable::DefaultClock;
use std::sync::Arc;
use std::time::Duration;

struct App {
    registry: Arc<InMemoryServerRegistry<DefaultClock>>,
    catalog: ServerCatalogService<InMemoryServerRegistry<DefaultClock>>,
    selector: ActiveServerSelector<InMemoryServerRegistry<DefaultClock>, BroadcastChangePublisher>,
    store: Arc<InMemoryCacheStore>,
    organization: OrganizationId,
    forwarder: tokio::task::JoinHandle<()>,
    publisher: BroadcastChangePublisher,
}

/// Wires the services together the way the application composition root
/// does: the selector publishes over the broadcast channel, and a spawned
/// coordinator task forwards each change into the shared cache store.
fn assemble() -> App {
    let registry = Arc::new(InMemoryServerRegistry::new(
        UserId::new(),
        Arc::new(DefaultClock),
    ));
    let catalog = ServerCatalogService::new(registry.clone());

    let publisher = BroadcastChangePublisher::new();
    let store = Arc::new(InMemoryCacheStore::new());
    let coordinator = Arc::new(InvalidationCoordinator::new());
    coordinator.register(Arc::new(StaleTagSubscriber::new(store.clone())));
    let forwarder = tokio::spawn(coordinator.forward(publisher.subscribe()));

    let selector = ActiveServerSelector::new(
        registry.clone(),
        Arc::new(ActiveServerSession::new()),
        Arc::new(publisher.clone()),
    );

    App {
        registry,
        catalog,
        selector,
        store,
        organization: OrganizationId::new(),
        forwarder,
        publisher,
    }
}

impl App {
    async fn create_server(&self, name: &str, final_octet: u8) -> ServerId {
        self.catalog
            .create(CreateServerRequest {
                name: name.to_owned(),
                description: None,
                host: format!("10.1.0.{final_octet}"),
                port: 22,
                username: "deploy".to_owned(),
                password: Some("hunter2".to_owned()),
                private_key_path: None,
                organization_id: self.organization,
            })
            .await
            .expect("server creation should succeed")
    }

    async fn status_of(&self, server_id: ServerId) -> ServerStatus {
        let page = self
            .registry
            .list(&ServerQuery::default().with_page_size(100))
            .await
            .expect("listing should succeed");
        page.servers
            .iter()
            .find(|record| record.id() == server_id)
            .expect("record should exist")
            .status()
    }

    async fn wait_until_stale(&self, tag: CacheTag) {
        let deadline = tokio::time::Instant::now() + Duration::from_secs(2);
        while !self.store.is_stale(tag) {
            assert!(
                tokio::time::Instant::now() < deadline,
                "tag {tag} never went stale"
            );
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
    }

    async fn shutdown(self) {
        drop(self.selector);
        drop(self.publisher);
        self.forwarder
            .await
            .expect("forwarder task should exit cleanly");
    }
}

#[tokio::test(flavor = "multi_thread")]
async fn switching_servers_updates_statuses_and_sweeps_caches() {
    let app = assemble();
    let first = app.create_server("Web", 1).await;
    let second = app.create_server("App", 2).await;

    // Fresh records start inactive and nothing is cached stale yet.
    assert_eq!(app.status_of(first).await, ServerStatus::Inactive);
    assert!(app.store.stale_tags().is_empty());

    let outcome = app
        .selector
        .select(first)
        .await
        .expect("selection should succeed");
    assert!(matches!(outcome, SelectionOutcome::Applied(_)));
    assert_eq!(app.status_of(first).await, ServerStatus::Active);

    // The change propagates asynchronously into every scoped cache.
    app.wait_until_stale(CacheTag::active_server()).await;
    for domain in CacheDomain::ALL {
        assert!(app.store.is_stale(CacheTag::list(domain)));
    }

    // A consumer re-fetches its listing, then the user switches servers.
    let deployments = CacheTag::list(CacheDomain::Deployments);
    app.store.clear(deployments);

    app.selector
        .select(second)
        .await
        .expect("switch should succeed");
    assert_eq!(app.status_of(first).await, ServerStatus::Inactive);
    assert_eq!(app.status_of(second).await, ServerStatus::Active);
    app.wait_until_stale(deployments).await;

    app.shutdown().await;
}

#[tokio::test(flavor = "multi_thread")]
async fn deselecting_clears_session_and_invalidates() {
    let app = assemble();
    let server_id = app.create_server("Web", 1).await;
    app.selector
        .select(server_id)
        .await
        .expect("selection should succeed");
    app.wait_until_stale(CacheTag::active_server()).await;

    // Consumer refreshed its view of the active server.
    app.store.clear(CacheTag::active_server());

    let outcome = app
        .selector
        .select_default()
        .await
        .expect("deselection should succeed");
    assert_eq!(outcome, ClearOutcome::Cleared);
    assert!(app.selector.session().current().is_none());
    assert_eq!(app.status_of(server_id).await, ServerStatus::Inactive);
    app.wait_until_stale(CacheTag::active_server()).await;

    app.shutdown().await;
}

#[tokio::test(flavor = "multi_thread")]
async fn reconcile_on_startup_adopts_externally_activated_server() {
    let app = assemble();
    let server_id = app.create_server("Web", 1).await;

    // Another client activated the server; this session starts cold.
    app.registry
        .change_status(server_id, ServerStatus::Active)
        .await
        .expect("status change should succeed");

    app.selector
        .reconcile()
        .await
        .expect("reconcile should succeed");
    let adopted = app
        .selector
        .session()
        .current()
        .expect("session should adopt the active server");
    assert_eq!(adopted.server_id(), server_id);
    app.wait_until_stale(CacheTag::active_server()).await;

    app.shutdown().await;
}
