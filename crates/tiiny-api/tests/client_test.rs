#![allow(clippy::unwrap_used)]
// Integration tests for `TiinyClient` using wiremock.

use secrecy::SecretString;
use serde_json::json;
use wiremock::matchers::{body_json, body_string_contains, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use tiiny_api::{Error, FileUpload, TiinyClient, TransportConfig, UploadRequest};

// ── Helpers ─────────────────────────────────────────────────────────

async fn setup() -> (MockServer, TiinyClient) {
    let server = MockServer::start().await;
    let client = TiinyClient::from_api_key(
        &server.uri(),
        &SecretString::from("test-key"),
        &TransportConfig::default(),
    )
    .unwrap();
    (server, client)
}

fn endpoint(name: &str) -> String {
    format!("/v3/external/pub/{name}")
}

fn html_upload(update: bool) -> UploadRequest {
    UploadRequest {
        domain: Some("foo.tiiny.site".into()),
        domain_suffix: ".tiiny.site".into(),
        site_settings: r#"{"passwordProtected":true,"password":"secret"}"#.into(),
        files_to_add: FileUpload::from_html("<h1>hello</h1>"),
        files_to_remove: update.then(|| {
            vec![
                r#"{"id":"a","size":10}"#.to_owned(),
                r#"{"id":"b","size":20}"#.to_owned(),
            ]
        }),
        is_update: update,
    }
}

// ── Upload ──────────────────────────────────────────────────────────

#[tokio::test]
async fn test_upload_sends_multipart_fields() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path(endpoint("upload")))
        .and(header("X-Api-Key", "test-key"))
        .and(body_string_contains(r#"name="domain""#))
        .and(body_string_contains("foo.tiiny.site"))
        .and(body_string_contains(r#"name="domainSuffix""#))
        .and(body_string_contains(r#"{"passwordProtected":true,"password":"secret"}"#))
        .and(body_string_contains(r#"name="filesToAdd"; filename="index.html""#))
        .and(body_string_contains("PGgxPmhlbGxvPC9oMT4="))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "link": "foo.tiiny.site" })),
        )
        .expect(1)
        .mount(&server)
        .await;

    let resp = client.upload(&html_upload(false)).await.unwrap();

    assert_eq!(resp.status, 200);
    assert_eq!(resp.body, json!({ "link": "foo.tiiny.site" }));
}

#[tokio::test]
async fn test_upload_update_sends_removals() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path(endpoint("upload")))
        .and(body_string_contains(r#"name="isUpdate""#))
        .and(body_string_contains(r#"{"id":"a","size":10}"#))
        .and(body_string_contains(r#"{"id":"b","size":20}"#))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "ok": true })))
        .expect(1)
        .mount(&server)
        .await;

    let resp = client.upload(&html_upload(true)).await.unwrap();
    assert_eq!(resp.body, json!({ "ok": true }));
}

#[tokio::test]
async fn test_upload_error_carries_endpoint_and_status() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path(endpoint("upload")))
        .respond_with(
            ResponseTemplate::new(422).set_body_json(json!({ "message": "Domain taken" })),
        )
        .mount(&server)
        .await;

    let err = client.upload(&html_upload(false)).await.unwrap_err();

    match err {
        Error::Api {
            endpoint,
            status,
            message,
        } => {
            assert_eq!(endpoint, "/upload");
            assert_eq!(status, 422);
            assert_eq!(message, "Domain taken");
        }
        other => panic!("expected Api error, got: {other:?}"),
    }
}

// ── Get site ────────────────────────────────────────────────────────

#[tokio::test]
async fn test_get_site_uses_domain_query() {
    let (server, client) = setup().await;

    let body = json!({ "files": [{ "id": "a", "size": 10 }] });

    Mock::given(method("GET"))
        .and(path(endpoint("get-site")))
        .and(query_param("domain", "foo.tiiny.site"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .expect(1)
        .mount(&server)
        .await;

    let resp = client.get_site("foo.tiiny.site").await.unwrap();
    assert_eq!(resp.body, body);
}

// ── Delete ──────────────────────────────────────────────────────────

#[tokio::test]
async fn test_delete_posts_link() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path(endpoint("delete")))
        .and(body_json(json!({ "link": "foo.tiiny.site" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "success": true })))
        .expect(1)
        .mount(&server)
        .await;

    let resp = client.delete_site("foo.tiiny.site").await.unwrap();
    assert_eq!(resp.body, json!({ "success": true }));
}

#[tokio::test]
async fn test_non_json_body_kept_as_string() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path(endpoint("delete")))
        .respond_with(ResponseTemplate::new(200).set_body_string("deleted"))
        .mount(&server)
        .await;

    let resp = client.delete_site("foo.tiiny.site").await.unwrap();
    assert_eq!(resp.body, json!("deleted"));
}

// ── Profile ─────────────────────────────────────────────────────────

#[tokio::test]
async fn test_profile_custom_domains() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path(endpoint("profile")))
        .and(header("X-Api-Key", "test-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "profile": { "customDomains": ["example.com"] }
        })))
        .mount(&server)
        .await;

    let profile = client.profile().await.unwrap();
    assert_eq!(profile.custom_domains(), vec!["example.com"]);
}

#[tokio::test]
async fn test_verify_rejected_key() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path(endpoint("profile")))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let result = client.verify().await;
    assert!(
        matches!(result, Err(Error::InvalidApiKey { status: 401, .. })),
        "expected InvalidApiKey, got: {result:?}"
    );
}

#[tokio::test]
async fn test_verify_accepts_empty_body() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path(endpoint("profile")))
        .respond_with(ResponseTemplate::new(204))
        .mount(&server)
        .await;

    client.verify().await.unwrap();
}
