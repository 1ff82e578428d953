//! Tests for the usage reports module

use super::*;
use crate::config::ClientConfig;
use crate::error::Error;
use crate::pagination::{Page, PagerState};
use pretty_assertions::assert_eq;
use serde_json::json;
use test_case::test_case;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const ACCOUNT: &str = "acc-1";
const MONTH: &str = "2024-03";

fn account_path() -> String {
    format!("/v4/accounts/{ACCOUNT}/resource_instances/usage/{MONTH}")
}

fn client_for(server: &MockServer) -> UsageReportsClient {
    let config = ClientConfig {
        url: server.uri(),
        ..ClientConfig::default()
    };
    UsageReportsClient::new(&config).unwrap()
}

fn usage_page(ids: &[&str], next: serde_json::Value) -> serde_json::Value {
    let resources: Vec<_> = ids
        .iter()
        .map(|id| json!({ "resource_instance_id": id, "month": MONTH }))
        .collect();
    json!({
        "limit": ids.len(),
        "count": ids.len(),
        "first": { "href": "/v4/accounts/acc-1/resource_instances/usage/2024-03" },
        "next": next,
        "resources": resources,
    })
}

fn ids(records: &[serde_json::Value]) -> Vec<String> {
    records
        .iter()
        .map(|r| r["resource_instance_id"].as_str().unwrap().to_string())
        .collect()
}

// ============================================================================
// Request validation
// ============================================================================

#[test_case("2024-03" ; "plain month")]
#[test_case("1999-12" ; "december")]
fn test_valid_billing_month(month: &str) {
    assert!(validate_billing_month(month).is_ok());
}

#[test_case("" ; "empty")]
#[test_case("2024-3" ; "single digit month")]
#[test_case("2024-13" ; "month out of range")]
#[test_case("2024/03" ; "wrong separator")]
#[test_case("2024-03-01" ; "full date")]
fn test_invalid_billing_month(month: &str) {
    let err = validate_billing_month(month).unwrap_err();
    assert!(matches!(err, Error::InvalidParameter { ref name, .. } if name == "billingmonth"));
}

#[test]
fn test_request_validation() {
    assert!(ResourceUsageAccountRequest::new(ACCOUNT, MONTH)
        .limit(10)
        .validate()
        .is_ok());

    let err = ResourceUsageAccountRequest::new(ACCOUNT, MONTH)
        .limit(0)
        .validate()
        .unwrap_err();
    assert!(matches!(err, Error::InvalidParameter { ref name, .. } if name == "limit"));

    let err = ResourceUsageResourceGroupRequest::new(ACCOUNT, " ", MONTH)
        .validate()
        .unwrap_err();
    assert!(
        matches!(err, Error::InvalidParameter { ref name, .. } if name == "resource_group_id")
    );

    let err = ResourceUsageOrgRequest::new("", "org-1", MONTH)
        .validate()
        .unwrap_err();
    assert!(matches!(err, Error::InvalidParameter { ref name, .. } if name == "account_id"));
}

// ============================================================================
// Request building
// ============================================================================

#[test]
fn test_path_segments() {
    assert_eq!(
        ResourceUsageAccountRequest::new(ACCOUNT, MONTH).path_segments(),
        vec!["v4", "accounts", ACCOUNT, "resource_instances", "usage", MONTH]
    );
    assert_eq!(
        ResourceUsageResourceGroupRequest::new(ACCOUNT, "rg-1", MONTH).path_segments(),
        vec![
            "v4",
            "accounts",
            ACCOUNT,
            "resource_groups",
            "rg-1",
            "resource_instances",
            "usage",
            MONTH
        ]
    );
    assert_eq!(
        ResourceUsageOrgRequest::new(ACCOUNT, "org-1", MONTH).path_segments(),
        vec![
            "v4",
            "accounts",
            ACCOUNT,
            "organizations",
            "org-1",
            "resource_instances",
            "usage",
            MONTH
        ]
    );
}

#[test]
fn test_account_request_config() {
    let request = ResourceUsageAccountRequest::new(ACCOUNT, MONTH)
        .names(true)
        .tags(false)
        .limit(25)
        .region("us-south")
        .resource_group_id("rg-1")
        .accept_language("en-US");

    let config = request.request_config(Some("tok-2"));

    assert_eq!(config.query.get("_names").map(String::as_str), Some("true"));
    assert_eq!(config.query.get("_tags").map(String::as_str), Some("false"));
    assert_eq!(config.query.get("_limit").map(String::as_str), Some("25"));
    assert_eq!(config.query.get("_start").map(String::as_str), Some("tok-2"));
    assert_eq!(config.query.get("region").map(String::as_str), Some("us-south"));
    assert_eq!(
        config.query.get("resource_group_id").map(String::as_str),
        Some("rg-1")
    );
    assert!(!config.query.contains_key("plan_id"));
    assert_eq!(
        config.headers.get("Accept").map(String::as_str),
        Some("application/json")
    );
    assert_eq!(
        config.headers.get("Accept-Language").map(String::as_str),
        Some("en-US")
    );
}

#[test]
fn test_first_page_has_no_start() {
    let request = ResourceUsageOrgRequest::new(ACCOUNT, "org-1", MONTH);
    let config = request.request_config(None);
    assert!(config.query.is_empty());
    assert!(!config.headers.contains_key("Accept"));
}

// ============================================================================
// Envelope decoding
// ============================================================================

#[test_case(json!({ "offset": "tok-1" }), Some("tok-1") ; "offset")]
#[test_case(json!({ "href": "/v4/accounts/a/resource_instances/usage/2024-03?_limit=2&_start=tok-2" }), Some("tok-2") ; "relative href")]
#[test_case(json!({ "href": "https://billing.cloud.ibm.com/v4/x?start=tok-3" }), Some("tok-3") ; "absolute href with start")]
#[test_case(json!({ "href": "/v4/x?_start=tok-4", "offset": "tok-5" }), Some("tok-5") ; "offset wins")]
#[test_case(json!({ "offset": "", "href": "/v4/x?_limit=2" }), None ; "empty offset and no start")]
#[test_case(serde_json::Value::Null, None ; "no next link")]
fn test_envelope_next_token(next: serde_json::Value, expected: Option<&str>) {
    let envelope: UsagePageEnvelope =
        serde_json::from_value(usage_page(&["r1"], next)).unwrap();
    let page = envelope.into_page();
    assert_eq!(page.items.len(), 1);
    assert_eq!(page.next_token(), expected);
}

#[test]
fn test_envelope_without_resources() {
    let envelope: UsagePageEnvelope = serde_json::from_value(json!({ "limit": 5 })).unwrap();
    let page = envelope.into_page();
    assert!(page.items.is_empty());
    assert!(page.is_last());
}

// ============================================================================
// Client
// ============================================================================

#[tokio::test]
async fn test_get_resource_usage_account() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(account_path()))
        .and(query_param("_limit", "2"))
        .and(header("Accept", "application/json"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(usage_page(&["r1", "r2"], json!({ "offset": "tok-1" }))),
        )
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let request = ResourceUsageAccountRequest::new(ACCOUNT, MONTH).limit(2);
    let page = client
        .get_resource_usage_account(&request, None)
        .await
        .unwrap();

    assert_eq!(ids(&page.items), vec!["r1", "r2"]);
    assert_eq!(page.next_token(), Some("tok-1"));
}

#[tokio::test]
async fn test_get_resource_usage_encodes_path_segments() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(
            "/v4/accounts/acc-1/resource_groups/rg%2F1/resource_instances/usage/2024-03",
        ))
        .respond_with(ResponseTemplate::new(200).set_body_json(usage_page(&[], json!(null))))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let request = ResourceUsageResourceGroupRequest::new(ACCOUNT, "rg/1", MONTH);
    let page = client
        .get_resource_usage_resource_group(&request, None)
        .await
        .unwrap();
    assert_eq!(page, Page::last(vec![]));
}

#[tokio::test]
async fn test_invalid_request_is_not_sent() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let request = ResourceUsageAccountRequest::new(ACCOUNT, "March");

    let err = client
        .get_resource_usage_account(&request, None)
        .await
        .unwrap_err();
    assert!(matches!(err, Error::InvalidParameter { .. }));
    assert!(client.pager(request).is_err());
}

#[tokio::test]
async fn test_invalid_body_is_decode_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>"))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let request = ResourceUsageAccountRequest::new(ACCOUNT, MONTH);
    let err = client
        .get_resource_usage_account(&request, None)
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Decode { .. }));
}

#[tokio::test]
async fn test_pager_walks_all_pages() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v4/accounts/acc-1/organizations/org-1/resource_instances/usage/2024-03"))
        .and(query_param("_start", "tok-1"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(usage_page(
                &["r3"],
                json!({ "href": "/v4/accounts/acc-1/organizations/org-1/resource_instances/usage/2024-03?_start=" }),
            )),
        )
        .with_priority(1)
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v4/accounts/acc-1/organizations/org-1/resource_instances/usage/2024-03"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(usage_page(&["r1", "r2"], json!({ "offset": "tok-1" }))),
        )
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let mut pager = client
        .pager(ResourceUsageOrgRequest::new(ACCOUNT, "org-1", MONTH).limit(2))
        .unwrap();

    let first = pager.get_next().await.unwrap();
    assert_eq!(ids(&first), vec!["r1", "r2"]);
    assert_eq!(pager.state(), &PagerState::HasMore("tok-1".to_string()));

    let second = pager.get_next().await.unwrap();
    assert_eq!(ids(&second), vec!["r3"]);
    assert!(!pager.has_next());
    assert_eq!(pager.pages_fetched(), 2);

    let err = pager.get_next().await.unwrap_err();
    assert!(matches!(err, Error::ExhaustedPagination));
}

#[tokio::test]
async fn test_pager_fetch_failure_keeps_state() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(503).set_body_string("busy"))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let mut pager = client
        .pager(ResourceUsageAccountRequest::new(ACCOUNT, MONTH))
        .unwrap();

    let err = pager.get_next().await.unwrap_err();
    match err {
        Error::FetchFailed { source } => {
            assert!(matches!(*source, Error::HttpStatus { status: 503, .. }));
        }
        other => panic!("expected FetchFailed, got {other:?}"),
    }
    assert_eq!(pager.state(), &PagerState::NotStarted);
    assert!(pager.has_next());
}

#[tokio::test]
async fn test_client_retries_when_enabled() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(503))
        .up_to_n_times(1)
        .with_priority(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(usage_page(&["r1"], json!(null))))
        .mount(&server)
        .await;

    let mut client = client_for(&server);
    client.enable_retries(2, std::time::Duration::from_millis(20));
    assert!(client.http().retries_enabled());

    let records = client
        .pager(ResourceUsageAccountRequest::new(ACCOUNT, MONTH))
        .unwrap()
        .get_all()
        .await
        .unwrap();
    assert_eq!(ids(&records), vec!["r1"]);

    client.disable_retries();
    assert!(!client.http().retries_enabled());
}
