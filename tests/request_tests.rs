use nimbus_rs::request::{Filter, ListParams, Method, Order, Request};
use nimbus_rs::resources::domains::create_domain_schema;
use nimbus_rs::types::ApiError;
use pretty_assertions::assert_eq;
use serde_json::json;

#[test]
fn test_setters_commute_for_independent_fields() {
    let a = Request::new()
        .method(Method::Post)
        .url("/domains")
        .unwrap();
    let b = Request::new()
        .url("/domains")
        .unwrap()
        .method(Method::Post);
    assert_eq!(a, b);

    let params = ListParams::new().page(2).page_size(25);
    let filter = Filter::eq("status", "active");
    let a = Request::new()
        .url("/domains")
        .unwrap()
        .params(&params)
        .filter(filter.clone());
    let b = Request::new()
        .url("/domains")
        .unwrap()
        .filter(filter)
        .params(&params);
    assert_eq!(a, b);
}

#[test]
fn test_url_validation() {
    assert!(Request::new().url("").is_err());
    assert!(Request::new().url("domains").is_err());
    assert!(Request::new().url("/domains").is_ok());
}

#[test]
fn test_params_become_query_parameters() {
    let request = Request::new()
        .url("/domains")
        .unwrap()
        .params(&ListParams::new().page(3).page_size(100));
    assert_eq!(
        request.query,
        vec![
            ("page".to_string(), "3".to_string()),
            ("page_size".to_string(), "100".to_string())
        ]
    );
}

#[test]
fn test_filter_header_rendering() {
    let request = Request::new()
        .url("/domains")
        .unwrap()
        .filter(Filter::eq("status", "active"));
    let header: serde_json::Value =
        serde_json::from_str(&request.filter_header().unwrap()).unwrap();
    assert_eq!(header, json!({ "status": "active" }));

    let request = Request::new().url("/domains").unwrap().filter(Filter::and(vec![
        Filter::eq("type", "master"),
        Filter::contains("domain", "example"),
    ]));
    let header: serde_json::Value =
        serde_json::from_str(&request.filter_header().unwrap()).unwrap();
    assert_eq!(
        header,
        json!({
            "+and": [
                { "type": "master" },
                { "domain": { "+contains": "example" } }
            ]
        })
    );
}

#[test]
fn test_order_pair_merges_into_filter_header() {
    let request = Request::new()
        .url("/domains")
        .unwrap()
        .params(&ListParams::new().order_by("domain", Order::Desc))
        .filter(Filter::eq("status", "active"));
    let header: serde_json::Value =
        serde_json::from_str(&request.filter_header().unwrap()).unwrap();
    assert_eq!(
        header,
        json!({ "status": "active", "+order_by": "domain", "+order": "desc" })
    );
}

#[test]
fn test_no_filter_no_header() {
    let request = Request::new().url("/domains").unwrap();
    assert_eq!(request.filter_header(), None);
}

#[test]
fn test_validated_body_fails_synchronously_before_network() {
    // Missing required "type"; this must fail during building, with no
    // transport involved at all.
    let result = Request::new()
        .url("/domains")
        .unwrap()
        .method(Method::Post)
        .validated_body(&json!({ "domain": "example.com" }), &create_domain_schema());

    match result {
        Err(ApiError::Schema { violations }) => {
            assert_eq!(violations.len(), 1);
            assert_eq!(violations[0].field, "type");
        }
        other => panic!("expected schema violation, got {:?}", other),
    }
}

#[test]
fn test_validated_body_applies_schema_defaults() {
    let request = Request::new()
        .url("/domains")
        .unwrap()
        .method(Method::Post)
        .validated_body(
            &json!({ "domain": "example.com", "type": "master" }),
            &create_domain_schema(),
        )
        .unwrap();

    let body = request.body.unwrap();
    assert_eq!(body["domain"], "example.com");
    // Default from the create schema
    assert_eq!(body["status"], "active");
}

#[test]
fn test_builders_do_not_share_state() {
    let base = Request::new().url("/domains").unwrap();
    let with_filter = base.clone().filter(Filter::eq("status", "active"));
    let with_body = base.clone().body(json!({ "domain": "a.com" }));

    assert_eq!(base.filter, None);
    assert_eq!(base.body, None);
    assert!(with_filter.body.is_none());
    assert!(with_body.filter.is_none());
}
