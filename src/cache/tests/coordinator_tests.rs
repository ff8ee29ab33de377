//! Unit tests for invalidation fan-out and sweep idempotence.

use crate::active_server::adapters::BroadcastChangePublisher;
use crate::active_server::domain::{ActiveServerChange, ActiveServerRef};
use crate::active_server::ports::ActiveServerChangePublisher;
use crate::cache::adapters::InMemoryCacheStore;
use crate::cache::domain::{CacheDomain, CacheTag};
use crate::cache::ports::{CacheStore, InvalidationSubscriber};
use crate::cache::services::{InvalidationCoordinator, StaleTagSubscriber};
use crate::server_registry::domain::{
    HostAddress, OrganizationId, Port, ServerId, ServerName, ServerRecord, ServerRecordData,
    ServerStatus, SshUsername, UserId,
};
use chrono::Utc;
use rstest::{fixture, rstest};
use std::collections::HashSet;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

#[fixture]
fn store() -> Arc<InMemoryCacheStore> {
    Arc::new(InMemoryCacheStore::new())
}

fn activated_change() -> ActiveServerChange {
    let now = Utc::now();
    let record = ServerRecord::from_data(ServerRecordData {
        id: ServerId::new(),
        name: ServerName::new("Web").expect("valid name"),
        description: None,
        host: HostAddress::new("10.0.0.1").expect("valid host"),
        port: Port::new(22).expect("valid port"),
        username: SshUsername::new("deploy").expect("valid username"),
        status: ServerStatus::Active,
        created_at: now,
        updated_at: now,
        user_id: UserId::new(),
        organization_id: OrganizationId::new(),
    });
    ActiveServerChange::Activated(ActiveServerRef::from_record(&record))
}

/// Subscriber double counting received changes.
#[derive(Default)]
struct CountingSubscriber {
    received: AtomicUsize,
}

impl InvalidationSubscriber for CountingSubscriber {
    fn on_active_server_changed(&self, _change: &ActiveServerChange) {
        self.received.fetch_add(1, Ordering::Relaxed);
    }
}

#[rstest]
fn notify_reaches_every_registered_subscriber() {
    let coordinator = InvalidationCoordinator::new();
    let first = Arc::new(CountingSubscriber::default());
    let second = Arc::new(CountingSubscriber::default());
    coordinator.register(first.clone());
    coordinator.register(second.clone());
    assert_eq!(coordinator.subscriber_count(), 2);

    coordinator.notify(&ActiveServerChange::Cleared);

    assert_eq!(first.received.load(Ordering::Relaxed), 1);
    assert_eq!(second.received.load(Ordering::Relaxed), 1);
}

#[rstest]
fn sweep_marks_every_listing_and_the_active_server_tag(store: Arc<InMemoryCacheStore>) {
    let subscriber = StaleTagSubscriber::new(store.clone());

    subscriber.on_active_server_changed(&activated_change());

    for domain in CacheDomain::ALL {
        assert!(store.is_stale(CacheTag::list(domain)), "{domain} should be stale");
    }
    assert!(store.is_stale(CacheTag::active_server()));
    assert_eq!(store.transition_count(), CacheDomain::ALL.len() + 1);
}

#[rstest]
fn repeated_sweeps_are_idempotent(store: Arc<InMemoryCacheStore>) {
    let subscriber = StaleTagSubscriber::new(store.clone());

    subscriber.on_active_server_changed(&activated_change());
    let stale_after_first: HashSet<CacheTag> = store.stale_tags().into_iter().collect();
    let transitions_after_first = store.transition_count();

    subscriber.on_active_server_changed(&ActiveServerChange::Cleared);
    let stale_after_second: HashSet<CacheTag> = store.stale_tags().into_iter().collect();

    assert_eq!(stale_after_first, stale_after_second);
    assert_eq!(store.transition_count(), transitions_after_first);
}

#[rstest]
fn cleared_tag_is_marked_again_on_the_next_sweep(store: Arc<InMemoryCacheStore>) {
    let subscriber = StaleTagSubscriber::new(store.clone());
    subscriber.on_active_server_changed(&ActiveServerChange::Cleared);

    let tag = CacheTag::list(CacheDomain::Deployments);
    store.clear(tag);
    assert!(!store.is_stale(tag));

    subscriber.on_active_server_changed(&ActiveServerChange::Cleared);
    assert!(store.is_stale(tag));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn forward_drains_broadcast_changes_into_subscribers(store: Arc<InMemoryCacheStore>) {
    let publisher = BroadcastChangePublisher::new();
    let coordinator = Arc::new(InvalidationCoordinator::new());
    coordinator.register(Arc::new(StaleTagSubscriber::new(store.clone())));
    let forwarder = tokio::spawn(coordinator.clone().forward(publisher.subscribe()));

    publisher.publish(&activated_change());

    let deadline = tokio::time::Instant::now() + Duration::from_secs(2);
    while !store.is_stale(CacheTag::active_server()) {
        assert!(
            tokio::time::Instant::now() < deadline,
            "forwarded change never reached the store"
        );
        tokio::time::sleep(Duration::from_millis(10)).await;
    }

    drop(publisher);
    forwarder.await.expect("forwarder task should exit cleanly");
}
