
use mock_transport::mock_client;
use nimbus_rs::resources::databases::{CreateDatabase, DatabaseStatus, Engine, UpdateDatabase};
use nimbus_rs::types::ApiError;
use pretty_assertions::assert_eq;
use serde_json::json;
use test_helpers::{sample_database_json, sample_page_json};

#[tokio::test]
async fn test_create_upserts_returned_record() {
    let (client, transport) = mock_client();
    transport.respond(
        "POST",
        "/databases/mysql/instances",
        sample_database_json(10, "provisioning"),
    );

    let payload = CreateDatabase {
        label: "prod-db".to_string(),
        engine: Engine::Mysql,
        region: "us-east".to_string(),
        plan_type: "g6-dedicated-2".to_string(),
        cluster_size: None,
        allow_list: None,
    };
    let database = client.databases().create(&payload).await.unwrap();
    assert_eq!(database.status, DatabaseStatus::Provisioning);
    assert_eq!(client.store().databases.get(10).unwrap(), database);
}

#[tokio::test]
async fn test_create_reports_every_invalid_field() {
    let (client, transport) = mock_client();
    let payload = CreateDatabase {
        label: "db".to_string(),
        engine: Engine::Mysql,
        region: "".to_string(),
        plan_type: "g6-dedicated-2".to_string(),
        cluster_size: Some(9),
        allow_list: None,
    };
    let error = client.databases().create(&payload).await.unwrap_err();
    match error {
        ApiError::Schema { violations } => {
            let mut fields: Vec<_> = violations.into_iter().map(|v| v.field).collect();
            fields.sort();
            assert_eq!(fields, vec!["cluster_size", "label", "region"]);
        }
        other => panic!("expected schema violation, got {:?}", other),
    }
    assert_eq!(transport.request_count(), 0);
}

#[tokio::test]
async fn test_suspend_refreshes_store_from_server() {
    let (client, transport) = mock_client();
    transport.respond("POST", "/databases/mysql/instances/10/suspend", json!({}));
    transport.respond(
        "GET",
        "/databases/mysql/instances/10",
        sample_database_json(10, "suspended"),
    );

    let database = client.databases().suspend(Engine::Mysql, 10).await.unwrap();
    assert_eq!(database.status, DatabaseStatus::Suspended);

    // The store reflects the server's status, not a locally assumed one
    let entry = client.store().databases.get(10).unwrap();
    assert_eq!(entry.status, DatabaseStatus::Suspended);
    assert_eq!(transport.request_count(), 2);
}

#[tokio::test]
async fn test_resume_refreshes_store_from_server() {
    let (client, transport) = mock_client();
    transport.respond("POST", "/databases/mysql/instances/10/resume", json!({}));
    transport.respond(
        "GET",
        "/databases/mysql/instances/10",
        sample_database_json(10, "active"),
    );

    let database = client.databases().resume(Engine::Mysql, 10).await.unwrap();
    assert_eq!(database.status, DatabaseStatus::Active);
    assert_eq!(
        client.store().databases.get(10).unwrap().status,
        DatabaseStatus::Active
    );
}

#[tokio::test]
async fn test_suspend_failure_propagates_untouched() {
    let (client, transport) = mock_client();
    transport.respond(
        "POST",
        "/databases/mysql/instances/10/suspend",
        ApiError::api_reason(400, "Cluster is not in a suspendable state."),
    );

    let error = client.databases().suspend(Engine::Mysql, 10).await.unwrap_err();
    assert_eq!(error.status(), Some(400));
    assert_eq!(
        error.primary_reason(),
        "Cluster is not in a suspendable state."
    );
    // Nothing was upserted for the failed lifecycle change
    assert!(client.store().databases.is_empty());
}

#[tokio::test]
async fn test_update_and_delete() {
    let (client, transport) = mock_client();
    let mut renamed = sample_database_json(10, "active");
    renamed["label"] = json!("renamed-db");
    transport.respond("PUT", "/databases/mysql/instances/10", renamed);
    transport.respond("DELETE", "/databases/mysql/instances/10", json!({}));

    let payload = UpdateDatabase {
        label: Some("renamed-db".to_string()),
        ..Default::default()
    };
    let database = client
        .databases()
        .update(Engine::Mysql, 10, &payload)
        .await
        .unwrap();
    assert_eq!(database.label, "renamed-db");
    assert!(client.store().databases.contains(10));

    client.databases().delete(Engine::Mysql, 10).await.unwrap();
    assert!(!client.store().databases.contains(10));
}

#[tokio::test]
async fn test_list_per_engine() {
    let (client, transport) = mock_client();
    transport.respond(
        "GET",
        "/databases/postgresql/instances",
        sample_page_json(vec![]),
    );

    let page = client
        .databases()
        .list(Engine::Postgresql, None, None)
        .await
        .unwrap();
    assert!(page.is_empty());
    assert_eq!(transport.history()[0].path, "/databases/postgresql/instances");
}

#[tokio::test]
async fn test_credentials_round_trip() {
    let (client, transport) = mock_client();
    transport.respond(
        "GET",
        "/databases/mysql/instances/10/credentials",
        json!({ "username": "root", "password": "hunter2hunter2" }),
    );
    transport.respond(
        "POST",
        "/databases/mysql/instances/10/credentials/reset",
        json!({}),
    );

    let credentials = client
        .databases()
        .credentials(Engine::Mysql, 10)
        .await
        .unwrap();
    assert_eq!(credentials.username, "root");

    client
        .databases()
        .reset_credentials(Engine::Mysql, 10)
        .await
        .unwrap();
}
