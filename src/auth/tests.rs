//! Tests for the auth module

use super::*;
use wiremock::matchers::{body_string_contains, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn test_no_auth() {
    let auth = Authenticator::new(AuthConfig::None);
    let client = reqwest::Client::new();
    let req = client.get("https://example.com/api");

    let built = auth.apply(req).await.unwrap().build().unwrap();
    assert!(built.headers().get("Authorization").is_none());
}

#[tokio::test]
async fn test_bearer_auth() {
    let auth = Authenticator::new(AuthConfig::Bearer {
        token: "my-bearer-token".to_string(),
    });

    let client = reqwest::Client::new();
    let req = client.get("https://example.com/api");
    let req = auth.apply(req).await.unwrap();

    let built = req.build().unwrap();
    assert_eq!(
        built.headers().get("Authorization").unwrap(),
        "Bearer my-bearer-token"
    );
}

#[tokio::test]
async fn test_basic_auth() {
    let auth = Authenticator::new(AuthConfig::Basic {
        username: "user".to_string(),
        password: "pass".to_string(),
    });

    let client = reqwest::Client::new();
    let req = client.get("https://example.com/api");
    let req = auth.apply(req).await.unwrap();

    let built = req.build().unwrap();
    // base64("user:pass")
    assert_eq!(
        built.headers().get("Authorization").unwrap(),
        "Basic dXNlcjpwYXNz"
    );
}

#[tokio::test]
async fn test_api_key_header_with_prefix() {
    let auth = Authenticator::new(AuthConfig::ApiKey {
        location: Location::Header,
        header_name: Some("X-Api-Key".to_string()),
        query_param: None,
        prefix: Some("Key ".to_string()),
        value: "my-key".to_string(),
    });

    let client = reqwest::Client::new();
    let req = client.get("https://example.com/api");
    let built = auth.apply(req).await.unwrap().build().unwrap();

    assert_eq!(built.headers().get("X-Api-Key").unwrap(), "Key my-key");
}

#[tokio::test]
async fn test_api_key_query() {
    let auth = Authenticator::new(AuthConfig::ApiKey {
        location: Location::Query,
        header_name: None,
        query_param: None,
        prefix: None,
        value: "secret123".to_string(),
    });

    let client = reqwest::Client::new();
    let req = client.get("https://example.com/api");
    let built = auth.apply(req).await.unwrap().build().unwrap();

    assert!(built.url().query().unwrap().contains("apikey=secret123"));
}

#[tokio::test]
async fn test_iam_token_exchange() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/identity/token"))
        .and(body_string_contains("grant_type=urn%3Aibm%3Aparams%3Aoauth%3Agrant-type%3Aapikey"))
        .and(body_string_contains("apikey=my-apikey"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "access_token": "iam-token-123",
            "expires_in": 3600,
            "token_type": "Bearer"
        })))
        .mount(&mock_server)
        .await;

    let auth = Authenticator::new(AuthConfig::Iam {
        apikey: "my-apikey".to_string(),
        url: mock_server.uri(),
    });

    let client = reqwest::Client::new();
    let req = client.get("https://example.com/api");
    let built = auth.apply(req).await.unwrap().build().unwrap();

    assert_eq!(
        built.headers().get("Authorization").unwrap(),
        "Bearer iam-token-123"
    );
}

#[tokio::test]
async fn test_iam_token_caching() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/identity/token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "access_token": "cached-token",
            "expires_in": 3600
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let auth = Authenticator::new(AuthConfig::Iam {
        apikey: "key".to_string(),
        url: mock_server.uri(),
    });

    let client = reqwest::Client::new();
    for _ in 0..3 {
        let req = client.get("https://example.com/api");
        let built = auth.apply(req).await.unwrap().build().unwrap();
        assert_eq!(
            built.headers().get("Authorization").unwrap(),
            "Bearer cached-token"
        );
    }
}

#[tokio::test]
async fn test_iam_clear_cache_refetches() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/identity/token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "access_token": "token",
            "expires_in": 3600
        })))
        .expect(2)
        .mount(&mock_server)
        .await;

    let auth = Authenticator::new(AuthConfig::Iam {
        apikey: "key".to_string(),
        url: mock_server.uri(),
    });

    let client = reqwest::Client::new();
    let _first = auth.apply(client.get("https://example.com/api")).await.unwrap();
    auth.clear_cache().await;
    let _second = auth.apply(client.get("https://example.com/api")).await.unwrap();
}

#[tokio::test]
async fn test_iam_token_failure() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/identity/token"))
        .respond_with(ResponseTemplate::new(400).set_body_string("invalid apikey"))
        .mount(&mock_server)
        .await;

    let auth = Authenticator::new(AuthConfig::Iam {
        apikey: "bad".to_string(),
        url: mock_server.uri(),
    });

    let client = reqwest::Client::new();
    let err = auth
        .apply(client.get("https://example.com/api"))
        .await
        .unwrap_err();

    assert!(matches!(err, crate::Error::TokenRequest { .. }));
    assert!(err.to_string().contains("invalid apikey"));
}

#[tokio::test]
async fn test_iam_token_expiry_out_of_range() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/identity/token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "access_token": "tok",
            "expires_in": i64::MAX
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let auth = Authenticator::new(AuthConfig::Iam {
        apikey: "key".to_string(),
        url: mock_server.uri(),
    });

    let client = reqwest::Client::new();
    let err = auth
        .apply(client.get("https://example.com/api"))
        .await
        .unwrap_err();

    assert!(matches!(err, crate::Error::TokenRequest { .. }));
    assert!(err.to_string().contains("out of range"));
}
