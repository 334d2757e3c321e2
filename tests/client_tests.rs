use nimbus_rs::client::Nimbus;
use nimbus_rs::resources::ResourceClient;
use nimbus_rs::store::Store;
use nimbus_rs::types::{sanitize_error_message, ApiError, SecureToken};
use std::sync::Arc;

#[test]
fn test_default_base_url() {
    let client = Nimbus::new("test_api_token");
    assert_eq!(client.base_url, "https://api.nimbus.cloud/v4");
}

#[test]
fn test_with_base_url() {
    let client = Nimbus::new("test_api_token").with_base_url("http://localhost:4000");
    assert_eq!(client.base_url, "http://localhost:4000");
}

#[test]
fn test_from_env() {
    // Both halves in one test; env vars are process-global.
    std::env::remove_var("NIMBUS_API_TOKEN");
    match nimbus_rs::from_env() {
        Err(ApiError::MissingToken) => {}
        other => panic!("expected MissingToken, got {:?}", other.map(|_| ())),
    }

    std::env::set_var("NIMBUS_API_TOKEN", "token-from-env");
    assert!(nimbus_rs::from_env().is_ok());
    std::env::remove_var("NIMBUS_API_TOKEN");
}

#[test]
fn test_secure_token_is_redacted() {
    let token = SecureToken::new("nmb_super_secret_value_12345");
    assert_eq!(format!("{:?}", token), "SecureToken([REDACTED])");
    assert_eq!(format!("{}", token), "[REDACTED API TOKEN]");
    // The value itself is still accessible for the auth header
    assert_eq!(token.as_str(), "nmb_super_secret_value_12345");
}

#[test]
fn test_sanitize_error_message() {
    let message = "request failed for token nmb_1234567890abcdefghij at /domains";
    let sanitized = sanitize_error_message(message);
    assert!(!sanitized.contains("nmb_1234567890abcdefghij"));
    assert!(sanitized.contains("[REDACTED]"));

    // Short identifiers survive
    assert_eq!(sanitize_error_message("bad value"), "bad value");
}

#[test]
fn test_builtin_clients_are_cached() {
    let client = Nimbus::new("test_api_token");
    assert!(Arc::ptr_eq(&client.domains(), &client.domains()));
    assert!(Arc::ptr_eq(&client.databases(), &client.databases()));
    assert!(Arc::ptr_eq(&client.firewalls(), &client.firewalls()));
    assert!(Arc::ptr_eq(&client.instances(), &client.instances()));
}

#[test]
fn test_builtin_resource_names() {
    let client = Nimbus::new("test_api_token");
    assert_eq!(client.domains().resource_name(), "domains");
    assert_eq!(client.databases().resource_name(), "databases");
    assert_eq!(client.firewalls().resource_name(), "firewalls");
    assert_eq!(client.instances().resource_name(), "instances");
}

struct VolumesClient;

impl ResourceClient for VolumesClient {
    fn resource_name(&self) -> &str {
        "volumes"
    }
}

#[test]
fn test_register_and_get_custom_resource() {
    let client = Nimbus::new("test_api_token");
    assert!(client.get_resource("volumes").is_none());

    client.register_resource("volumes", VolumesClient);
    let registered = client.get_resource("volumes");
    assert_eq!(registered.map(|c| c.resource_name().to_string()), Some("volumes".to_string()));
    assert_eq!(client.resources().list_resources(), vec!["volumes".to_string()]);
}

#[test]
fn test_injected_store_is_shared() {
    let store = Arc::new(Store::new());
    let first = Nimbus::new("test_api_token").with_store(store.clone());
    let second = Nimbus::new("other_token").with_store(store.clone());

    assert!(Arc::ptr_eq(&first.store(), &store));
    assert!(Arc::ptr_eq(&first.store(), &second.store()));
}

#[test]
fn test_each_client_defaults_to_its_own_store() {
    let first = Nimbus::new("test_api_token");
    let second = Nimbus::new("test_api_token");
    assert!(!Arc::ptr_eq(&first.store(), &second.store()));
}
