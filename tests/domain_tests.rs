
use mock_transport::mock_client;
use nimbus_rs::request::{Filter, ListParams, Method};
use nimbus_rs::resources::domains::{CreateDomain, DomainType, UpdateDomain};
use nimbus_rs::types::{ApiError, ApiProblem};
use pretty_assertions::assert_eq;
use serde_json::json;
use std::time::Duration;
use test_helpers::{sample_domain_json, sample_page_json};

#[tokio::test]
async fn test_create_upserts_server_record_not_payload() {
    let (client, transport) = mock_client();
    // The server fills in computed fields the payload never carried.
    transport.respond("POST", "/domains", sample_domain_json(42, "example.com"));

    let payload = CreateDomain::new("example.com", DomainType::Master);
    let created = client.domains().create(&payload).await.unwrap();
    assert_eq!(created.id, 42);

    let entry = client.store().domains.get(42).unwrap();
    assert_eq!(entry, created);
    // Server-assigned fields are present even though the payload omitted them
    assert_eq!(entry.soa_email.as_deref(), Some("admin@example.com"));
    assert_eq!(entry.ttl_sec, Some(300));
}

#[tokio::test]
async fn test_create_domain_scenario() {
    let (client, transport) = mock_client();
    transport.respond("POST", "/domains", sample_domain_json(1234, "example.com"));

    let domain = client
        .domains()
        .create(&CreateDomain::new("example.com", DomainType::Master))
        .await
        .unwrap();

    let entry = client.store().domains.get(domain.id).unwrap();
    assert_eq!(entry.domain, "example.com");
}

#[tokio::test]
async fn test_create_schema_violation_never_reaches_transport() {
    let (client, transport) = mock_client();

    let payload = CreateDomain::new("", DomainType::Master);
    let error = client.domains().create(&payload).await.unwrap_err();
    match error {
        ApiError::Schema { violations } => {
            assert_eq!(violations.len(), 1);
            assert_eq!(violations[0].field, "domain");
        }
        other => panic!("expected schema violation, got {:?}", other),
    }
    assert_eq!(transport.request_count(), 0);
}

#[tokio::test]
async fn test_update_server_rejection_leaves_store_unchanged() {
    let (client, transport) = mock_client();
    transport.respond("POST", "/domains", sample_domain_json(7, "example.com"));
    transport.respond(
        "PUT",
        "/domains/7",
        ApiError::api(400, vec![ApiProblem::new(Some("status"), "invalid value")]),
    );

    let created = client
        .domains()
        .create(&CreateDomain::new("example.com", DomainType::Master))
        .await
        .unwrap();

    let payload = UpdateDomain {
        status: Some(nimbus_rs::DomainStatus::Disabled),
        ..Default::default()
    };
    let error = client.domains().update(7, &payload).await.unwrap_err();

    match error {
        ApiError::Api { status, errors } => {
            assert_eq!(status, 400);
            assert_eq!(errors, vec![ApiProblem::new(Some("status"), "invalid value")]);
        }
        other => panic!("expected API error, got {:?}", other),
    }

    // The failed update must not touch the entry
    assert_eq!(client.store().domains.get(7).unwrap(), created);
}

#[tokio::test]
async fn test_update_success_upserts_returned_record() {
    let (client, transport) = mock_client();
    let mut updated = sample_domain_json(7, "example.com");
    updated["status"] = json!("disabled");
    transport.respond("PUT", "/domains/7", updated);

    let payload = UpdateDomain {
        status: Some(nimbus_rs::DomainStatus::Disabled),
        ..Default::default()
    };
    let domain = client.domains().update(7, &payload).await.unwrap();
    assert_eq!(domain.status, nimbus_rs::DomainStatus::Disabled);
    assert_eq!(client.store().domains.get(7).unwrap().status, nimbus_rs::DomainStatus::Disabled);
}

#[tokio::test]
async fn test_delete_removes_store_entry() {
    let (client, transport) = mock_client();
    transport.respond("POST", "/domains", sample_domain_json(42, "example.com"));
    transport.respond("DELETE", "/domains/42", json!({}));

    client
        .domains()
        .create(&CreateDomain::new("example.com", DomainType::Master))
        .await
        .unwrap();
    assert!(client.store().domains.contains(42));

    client.domains().delete(42).await.unwrap();
    assert!(!client.store().domains.contains(42));
}

#[tokio::test]
async fn test_get_not_found() {
    let (client, transport) = mock_client();
    transport.respond(
        "GET",
        "/domains/999",
        ApiError::api_reason(404, "Not found"),
    );

    let error = client.domains().get(999).await.unwrap_err();
    assert!(error.is_not_found());
    assert_eq!(error.status(), Some(404));
}

#[tokio::test]
async fn test_invalid_id_fails_before_transport() {
    let (client, transport) = mock_client();
    let error = client.domains().get(-1).await.unwrap_err();
    assert!(matches!(error, ApiError::Validation(_)));
    assert_eq!(transport.request_count(), 0);
}

#[tokio::test]
async fn test_list_builds_expected_descriptor_and_never_mutates_store() {
    let (client, transport) = mock_client();
    transport.respond(
        "GET",
        "/domains",
        sample_page_json(vec![
            sample_domain_json(1, "a.com"),
            sample_domain_json(2, "b.com"),
        ]),
    );

    let params = ListParams::new().page(2).page_size(25);
    let filter = Filter::eq("status", "active");
    let page = client
        .domains()
        .list(Some(params), Some(filter.clone()))
        .await
        .unwrap();

    assert_eq!(page.len(), 2);
    assert_eq!(page.results, 2);
    // Listing never seeds the store
    assert!(client.store().domains.is_empty());

    let history = transport.history();
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].method, Method::Get);
    assert_eq!(history[0].path, "/domains");
    assert_eq!(
        history[0].query,
        vec![
            ("page".to_string(), "2".to_string()),
            ("page_size".to_string(), "25".to_string())
        ]
    );
    assert_eq!(history[0].filter, Some(filter));
}

#[tokio::test]
async fn test_clone_and_import_upsert() {
    let (client, transport) = mock_client();
    transport.respond("POST", "/domains/5/clone", sample_domain_json(6, "copy.com"));
    transport.respond("POST", "/domains/import", sample_domain_json(9, "zone.com"));

    let cloned = client.domains().clone_domain(5, "copy.com").await.unwrap();
    assert_eq!(cloned.id, 6);
    assert!(client.store().domains.contains(6));

    let imported = client
        .domains()
        .import_zone("zone.com", "ns1.example.com")
        .await
        .unwrap();
    assert_eq!(imported.id, 9);
    assert!(client.store().domains.contains(9));
}

#[tokio::test]
async fn test_import_zone_rejects_empty_arguments() {
    let (client, transport) = mock_client();
    assert!(client.domains().import_zone("", "ns1.example.com").await.is_err());
    assert!(client.domains().import_zone("zone.com", " ").await.is_err());
    assert_eq!(transport.request_count(), 0);
}

#[tokio::test(start_paused = true)]
async fn test_last_completed_wins_on_out_of_order_completion() {
    let (client, transport) = mock_client();

    // First-issued update completes last; second-issued completes first.
    let mut slow = sample_domain_json(5, "example.com");
    slow["description"] = json!("first-issued");
    let mut fast = sample_domain_json(5, "example.com");
    fast["description"] = json!("second-issued");

    transport.respond_after("PUT", "/domains/5", slow, Duration::from_millis(100));
    transport.respond_after("PUT", "/domains/5", fast, Duration::from_millis(10));

    let domains = client.domains();
    let first_payload = UpdateDomain::default();
    let second_payload = UpdateDomain::default();
    let first = domains.update(5, &first_payload);
    let second = domains.update(5, &second_payload);
    let (first, second) = tokio::join!(first, second);
    first.unwrap();
    second.unwrap();

    // The later-completing response owns the entry, even though it was
    // issued first. This is the documented race callers must avoid by
    // serializing mutations per id.
    let entry = client.store().domains.get(5).unwrap();
    assert_eq!(entry.description.as_deref(), Some("first-issued"));
}
