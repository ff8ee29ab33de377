//! Unit tests for the in-memory registry adapter.

use crate::server_registry::{
    adapters::memory::InMemoryServerRegistry,
    domain::{
        CredentialPatch, HostAddress, NewServer, OrganizationId, Port, ServerId, ServerName,
        ServerQuery, ServerStatus, ServerUpdate, SortKey, SortOrder, SshCredential, SshUsername,
        UserId,
    },
    ports::{ServerRegistry, ServerRegistryError},
};
use mockable::DefaultClock;
use rstest::{fixture, rstest};
use std::sync::Arc;

type TestRegistry = InMemoryServerRegistry<DefaultClock>;

#[fixture]
fn registry() -> TestRegistry {
    InMemoryServerRegistry::new(UserId::new(), Arc::new(DefaultClock))
}

fn new_server(name: &str, host: &str, port: u16, organization_id: OrganizationId) -> NewServer {
    NewServer {
        name: ServerName::new(name).expect("valid name"),
        description: None,
        host: HostAddress::new(host).expect("valid host"),
        port: Port::new(port).expect("valid port"),
        username: SshUsername::new("deploy").expect("valid username"),
        credential: SshCredential::Password("secret".to_owned()),
        organization_id,
    }
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn created_servers_start_inactive(registry: TestRegistry) {
    let organization = OrganizationId::new();
    let server_id = registry
        .create(&new_server("Web", "10.0.0.1", 22, organization))
        .await
        .expect("create should succeed");

    let page = registry
        .list(&ServerQuery::new())
        .await
        .expect("list should succeed");
    let record = page.servers.first().expect("record should exist");
    assert_eq!(record.id(), server_id);
    assert_eq!(record.status(), ServerStatus::Inactive);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn duplicate_endpoint_in_organization_is_rejected(registry: TestRegistry) {
    let organization = OrganizationId::new();
    registry
        .create(&new_server("Web", "10.0.0.1", 22, organization))
        .await
        .expect("first create should succeed");

    let result = registry
        .create(&new_server("Web Copy", "10.0.0.1", 22, organization))
        .await;
    assert!(matches!(
        result,
        Err(ServerRegistryError::DuplicateEndpoint { .. })
    ));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn duplicate_name_in_organization_is_rejected(registry: TestRegistry) {
    let organization = OrganizationId::new();
    registry
        .create(&new_server("Web", "10.0.0.1", 22, organization))
        .await
        .expect("first create should succeed");

    let result = registry
        .create(&new_server("Web", "10.0.0.2", 22, organization))
        .await;
    assert!(matches!(
        result,
        Err(ServerRegistryError::DuplicateName { .. })
    ));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn update_cannot_take_another_servers_name(registry: TestRegistry) {
    let organization = OrganizationId::new();
    registry
        .create(&new_server("Web", "10.0.0.1", 22, organization))
        .await
        .expect("first create should succeed");
    let second = registry
        .create(&new_server("App", "10.0.0.2", 22, organization))
        .await
        .expect("second create should succeed");

    let result = registry
        .update(&ServerUpdate {
            id: second,
            name: ServerName::new("Web").expect("valid name"),
            description: None,
            host: HostAddress::new("10.0.0.2").expect("valid host"),
            port: Port::new(22).expect("valid port"),
            username: SshUsername::new("deploy").expect("valid username"),
            credential: CredentialPatch::Preserve,
        })
        .await;
    assert!(matches!(
        result,
        Err(ServerRegistryError::DuplicateName { .. })
    ));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn update_cannot_take_another_servers_endpoint(registry: TestRegistry) {
    let organization = OrganizationId::new();
    registry
        .create(&new_server("Web", "10.0.0.1", 22, organization))
        .await
        .expect("first create should succeed");
    let second = registry
        .create(&new_server("App", "10.0.0.2", 22, organization))
        .await
        .expect("second create should succeed");

    let result = registry
        .update(&ServerUpdate {
            id: second,
            name: ServerName::new("App").expect("valid name"),
            description: None,
            host: HostAddress::new("10.0.0.1").expect("valid host"),
            port: Port::new(22).expect("valid port"),
            username: SshUsername::new("deploy").expect("valid username"),
            credential: CredentialPatch::Preserve,
        })
        .await;
    assert!(matches!(
        result,
        Err(ServerRegistryError::DuplicateEndpoint { .. })
    ));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn update_keeping_own_name_and_endpoint_succeeds(registry: TestRegistry) {
    let organization = OrganizationId::new();
    let server_id = registry
        .create(&new_server("Web", "10.0.0.1", 22, organization))
        .await
        .expect("create should succeed");

    registry
        .update(&ServerUpdate {
            id: server_id,
            name: ServerName::new("Web").expect("valid name"),
            description: None,
            host: HostAddress::new("10.0.0.1").expect("valid host"),
            port: Port::new(22).expect("valid port"),
            username: SshUsername::new("deploy").expect("valid username"),
            credential: CredentialPatch::Preserve,
        })
        .await
        .expect("update keeping its own identity should succeed");
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn same_endpoint_is_allowed_across_organizations(registry: TestRegistry) {
    registry
        .create(&new_server("Web", "10.0.0.1", 22, OrganizationId::new()))
        .await
        .expect("first create should succeed");
    registry
        .create(&new_server("Web", "10.0.0.1", 22, OrganizationId::new()))
        .await
        .expect("second create should succeed");
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn listing_sorts_by_name_ascending(registry: TestRegistry) {
    let organization = OrganizationId::new();
    for (name, final_octet) in [("Web", 1), ("App", 2), ("DB", 3)] {
        registry
            .create(&new_server(
                name,
                &format!("10.0.0.{final_octet}"),
                22,
                organization,
            ))
            .await
            .expect("create should succeed");
    }

    let query = ServerQuery::new()
        .with_page(1)
        .with_page_size(10)
        .with_sort_key(SortKey::Name)
        .with_sort_order(SortOrder::Asc);
    let page = registry.list(&query).await.expect("list should succeed");

    let names: Vec<&str> = page
        .servers
        .iter()
        .map(|record| record.name().as_str())
        .collect();
    assert_eq!(names, ["App", "DB", "Web"]);
    assert_eq!(page.pagination.total_items, 3);
    assert_eq!(page.pagination.total_pages, 1);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn search_matches_name_and_host(registry: TestRegistry) {
    let organization = OrganizationId::new();
    registry
        .create(&new_server("Web", "edge.example.com", 22, organization))
        .await
        .expect("create should succeed");
    registry
        .create(&new_server("Batch", "10.0.0.9", 22, organization))
        .await
        .expect("create should succeed");

    let by_name = registry
        .list(&ServerQuery::new().with_search("web"))
        .await
        .expect("list should succeed");
    assert_eq!(by_name.servers.len(), 1);

    let by_host = registry
        .list(&ServerQuery::new().with_search("edge"))
        .await
        .expect("list should succeed");
    assert_eq!(by_host.servers.len(), 1);

    let no_match = registry
        .list(&ServerQuery::new().with_search("mainframe"))
        .await
        .expect("list should succeed");
    assert!(no_match.servers.is_empty());
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn pagination_slices_sorted_results(registry: TestRegistry) {
    let organization = OrganizationId::new();
    for index in 1..=5 {
        registry
            .create(&new_server(
                &format!("server-{index}"),
                &format!("10.0.0.{index}"),
                22,
                organization,
            ))
            .await
            .expect("create should succeed");
    }

    let query = ServerQuery::new()
        .with_page(2)
        .with_page_size(2)
        .with_sort_key(SortKey::Name)
        .with_sort_order(SortOrder::Asc);
    let page = registry.list(&query).await.expect("list should succeed");

    let names: Vec<&str> = page
        .servers
        .iter()
        .map(|record| record.name().as_str())
        .collect();
    assert_eq!(names, ["server-3", "server-4"]);
    assert_eq!(page.pagination.total_pages, 3);
    assert!(page.pagination.has_next);
    assert!(page.pagination.has_prev);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn update_preserves_credential_when_patch_is_preserve(registry: TestRegistry) {
    let organization = OrganizationId::new();
    let server_id = registry
        .create(&new_server("Web", "10.0.0.1", 22, organization))
        .await
        .expect("create should succeed");

    registry
        .update(&ServerUpdate {
            id: server_id,
            name: ServerName::new("Web Renamed").expect("valid name"),
            description: None,
            host: HostAddress::new("10.0.0.1").expect("valid host"),
            port: Port::new(2222).expect("valid port"),
            username: SshUsername::new("deploy").expect("valid username"),
            credential: CredentialPatch::Preserve,
        })
        .await
        .expect("update should succeed");

    let credential = registry
        .stored_credential(server_id)
        .expect("credential should exist");
    assert_eq!(credential, SshCredential::Password("secret".to_owned()));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn update_replaces_credential_when_patch_replaces(registry: TestRegistry) {
    let organization = OrganizationId::new();
    let server_id = registry
        .create(&new_server("Web", "10.0.0.1", 22, organization))
        .await
        .expect("create should succeed");

    registry
        .update(&ServerUpdate {
            id: server_id,
            name: ServerName::new("Web").expect("valid name"),
            description: None,
            host: HostAddress::new("10.0.0.1").expect("valid host"),
            port: Port::new(22).expect("valid port"),
            username: SshUsername::new("deploy").expect("valid username"),
            credential: CredentialPatch::Replace(SshCredential::PrivateKeyPath(
                "/etc/keys/deploy.pem".to_owned(),
            )),
        })
        .await
        .expect("update should succeed");

    let credential = registry
        .stored_credential(server_id)
        .expect("credential should exist");
    assert_eq!(
        credential,
        SshCredential::PrivateKeyPath("/etc/keys/deploy.pem".to_owned())
    );
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn status_change_is_reflected_in_find_active(registry: TestRegistry) {
    let organization = OrganizationId::new();
    let server_id = registry
        .create(&new_server("Web", "10.0.0.1", 22, organization))
        .await
        .expect("create should succeed");

    assert!(registry
        .find_active()
        .await
        .expect("lookup should succeed")
        .is_none());

    let record = registry
        .change_status(server_id, ServerStatus::Active)
        .await
        .expect("status change should succeed");
    assert_eq!(record.status(), ServerStatus::Active);

    let active = registry
        .find_active()
        .await
        .expect("lookup should succeed")
        .expect("active server should exist");
    assert_eq!(active.id(), server_id);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn deleting_unknown_server_reports_not_found(registry: TestRegistry) {
    let result = registry.delete(ServerId::new()).await;
    assert!(matches!(result, Err(ServerRegistryError::NotFound(_))));
}
