//! HTTP-level tests for the registry client.
//!
//! Each test runs against a local mock registry and checks the requests the
//! client issues and how it maps responses onto results.

use regsweep_registry::{
    ManifestDigest, MediaType, RegistryApi, RegistryClient, RegistryConfig, RegistryError,
};
use serde_json::json;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const DIGEST: &str = "sha256:9f2f0b1d5c6e7a8b9c0d1e2f3a4b5c6d7e8f9a0b1c2d3e4f5a6b7c8d9e0f1a2b";

fn client_for(server: &MockServer) -> RegistryClient {
    RegistryClient::new(RegistryConfig::new(server.uri())).expect("client should build")
}

#[tokio::test]
async fn test_catalog_lists_repositories() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v2/_catalog"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"repositories": ["web", "team/api"]})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let repositories = client_for(&server).catalog().await.unwrap();
    assert_eq!(repositories, vec!["web", "team/api"]);
}

#[tokio::test]
async fn test_catalog_server_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v2/_catalog"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&server)
        .await;

    let err = client_for(&server).catalog().await.unwrap_err();
    match err {
        RegistryError::HttpError { status, message } => {
            assert_eq!(status, 500);
            assert_eq!(message, "boom");
        }
        other => panic!("Expected HttpError, got {other:?}"),
    }
}

#[tokio::test]
async fn test_catalog_malformed_json() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v2/_catalog"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>"))
        .mount(&server)
        .await;

    let err = client_for(&server).catalog().await.unwrap_err();
    assert!(matches!(err, RegistryError::JsonError { .. }));
}

#[tokio::test]
async fn test_catalog_registry_error_body() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v2/_catalog"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "errors": [{"code": "UNAUTHORIZED", "message": "authentication required"}]
        })))
        .mount(&server)
        .await;

    let err = client_for(&server).catalog().await.unwrap_err();
    assert_eq!(
        err.to_string(),
        "HTTP error from registry: 401 - UNAUTHORIZED: authentication required"
    );
}

#[tokio::test]
async fn test_list_tags() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v2/team/api/tags/list"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"name": "team/api", "tags": ["1.0.0", "latest"]})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let tags = client_for(&server).list_tags("team/api").await.unwrap();
    assert_eq!(tags, vec!["1.0.0", "latest"]);
}

#[tokio::test]
async fn test_list_tags_null_is_empty() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v2/web/tags/list"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"name": "web", "tags": null})),
        )
        .mount(&server)
        .await;

    let tags = client_for(&server).list_tags("web").await.unwrap();
    assert!(tags.is_empty());
}

#[tokio::test]
async fn test_list_tags_not_found_is_empty() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v2/web/tags/list"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let tags = client_for(&server).list_tags("web").await.unwrap();
    assert!(tags.is_empty());
}

#[tokio::test]
async fn test_manifest_digest_uses_schema2_accept_header() {
    let server = MockServer::start().await;
    Mock::given(method("HEAD"))
        .and(path("/v2/web/manifests/1.0.0"))
        .and(header("Accept", MediaType::DOCKER_MANIFEST_V2))
        .respond_with(ResponseTemplate::new(200).insert_header("Docker-Content-Digest", DIGEST))
        .expect(1)
        .mount(&server)
        .await;

    let digest = client_for(&server)
        .manifest_digest("web", "1.0.0")
        .await
        .unwrap();
    assert_eq!(digest, ManifestDigest::new(DIGEST));
}

#[tokio::test]
async fn test_manifest_digest_missing_header() {
    let server = MockServer::start().await;
    Mock::given(method("HEAD"))
        .and(path("/v2/web/manifests/1.0.0"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .manifest_digest("web", "1.0.0")
        .await
        .unwrap_err();
    assert!(matches!(err, RegistryError::DigestMissing { .. }));
    assert!(err.is_not_found());
}

#[tokio::test]
async fn test_manifest_digest_not_found() {
    let server = MockServer::start().await;
    Mock::given(method("HEAD"))
        .and(path("/v2/web/manifests/gone"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .manifest_digest("web", "gone")
        .await
        .unwrap_err();
    assert!(matches!(err, RegistryError::NotFound { .. }));
}

#[tokio::test]
async fn test_delete_manifest_by_digest() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path(format!("/v2/web/manifests/{DIGEST}")))
        .respond_with(ResponseTemplate::new(202))
        .expect(1)
        .mount(&server)
        .await;

    client_for(&server)
        .delete_manifest("web", &ManifestDigest::new(DIGEST))
        .await
        .unwrap();
}

#[tokio::test]
async fn test_delete_manifest_unsupported() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path(format!("/v2/web/manifests/{DIGEST}")))
        .respond_with(ResponseTemplate::new(405).set_body_json(json!({
            "errors": [{"code": "UNSUPPORTED", "message": "The operation is unsupported."}]
        })))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .delete_manifest("web", &ManifestDigest::new(DIGEST))
        .await
        .unwrap_err();
    assert!(matches!(err, RegistryError::HttpError { status: 405, .. }));
    assert!(!err.is_not_found());
}

#[tokio::test]
async fn test_unreachable_registry() {
    let client = RegistryClient::new(RegistryConfig::new("http://127.0.0.1:9")).unwrap();
    let err = client.catalog().await.unwrap_err();
    assert!(matches!(err, RegistryError::ConnectionFailed { .. }));
}
