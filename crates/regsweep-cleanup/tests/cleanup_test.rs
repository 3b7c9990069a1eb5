//! End-to-end cleanup runs against a mock registry.

use std::io::Cursor;

use regsweep_cleanup::{
    Cleanup, CleanupError, CleanupOptions, CleanupState, ConsoleReporter, PromptConfirm,
};
use regsweep_registry::{MediaType, RegistryClient, RegistryConfig};
use serde_json::json;
use wiremock::matchers::{header, method, path, path_regex};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn mount_catalog(server: &MockServer, repositories: &[&str]) {
    Mock::given(method("GET"))
        .and(path("/v2/_catalog"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "repositories": repositories })),
        )
        .mount(server)
        .await;
}

async fn mount_tags(server: &MockServer, repository: &str, body: serde_json::Value) {
    Mock::given(method("GET"))
        .and(path(format!("/v2/{repository}/tags/list")))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

async fn mount_digest(server: &MockServer, repository: &str, tag: &str) {
    Mock::given(method("HEAD"))
        .and(path(format!("/v2/{repository}/manifests/{tag}")))
        .and(header("Accept", MediaType::DOCKER_MANIFEST_V2))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("Docker-Content-Digest", format!("sha256:{tag}")),
        )
        .expect(1)
        .mount(server)
        .await;
}

/// Runs a cleanup answering `answer` at the prompt; returns the report and
/// everything written to the console.
async fn run_cleanup(
    server: &MockServer,
    options: CleanupOptions,
    answer: &str,
) -> (Result<regsweep_cleanup::CleanupReport, CleanupError>, String) {
    let client = RegistryClient::new(RegistryConfig::new(server.uri())).unwrap();
    let mut reporter = ConsoleReporter::new(Vec::new()).with_colors(false);
    let mut console = Vec::new();
    let result = {
        let mut confirm = PromptConfirm::new(Cursor::new(answer.to_string()), &mut console);
        Cleanup::new(client, options)
            .run(&mut reporter, &mut confirm)
            .await
    };

    let mut output = String::from_utf8(reporter.into_inner()).unwrap();
    output.push_str(&String::from_utf8(console).unwrap());
    (result, output)
}

#[tokio::test]
async fn test_confirmed_cleanup_deletes_by_digest() {
    let server = MockServer::start().await;
    mount_catalog(&server, &["web"]).await;
    mount_tags(
        &server,
        "web",
        json!({"name": "web", "tags": ["2.1.0", "2.0.0", "1.5.0", "latest"]}),
    )
    .await;
    mount_digest(&server, "web", "2.0.0").await;
    mount_digest(&server, "web", "1.5.0").await;
    Mock::given(method("DELETE"))
        .and(path_regex(r"^/v2/web/manifests/sha256:(2\.0\.0|1\.5\.0)$"))
        .respond_with(ResponseTemplate::new(202))
        .expect(2)
        .mount(&server)
        .await;

    let (result, output) = run_cleanup(&server, CleanupOptions::new(2), "y\n").await;
    let report = result.unwrap();

    assert_eq!(report.state, CleanupState::Done);
    assert_eq!(report.deleted.len(), 2);
    assert!(report.failures.is_empty());
    assert!(output.contains("  web:latest (keep)\n  web:2.1.0 (keep)\n"));
    assert!(output.contains("  web:2.0.0 (delete)\n  web:1.5.0 (delete)\n"));
    assert!(output.contains("✓ web:2.0.0 (sha256:2.0.0) deleted"));
    assert!(output.contains("Delete these 2 tag(s)? [y/N] "));
}

#[tokio::test]
async fn test_empty_repository_plans_nothing() {
    let server = MockServer::start().await;
    mount_catalog(&server, &["empty"]).await;
    mount_tags(&server, "empty", json!({"name": "empty", "tags": []})).await;

    let (result, output) = run_cleanup(&server, CleanupOptions::new(0), "y\n").await;
    let report = result.unwrap();

    assert_eq!(report.state, CleanupState::Done);
    assert!(report.plan.is_empty());
    assert!(output.contains("Nothing to delete."));
    assert!(!output.contains("[y/N]"));
}

#[tokio::test]
async fn test_catalog_failure_aborts_before_listing() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v2/_catalog"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path_regex(r"/tags/list$"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let (result, output) = run_cleanup(&server, CleanupOptions::new(1), "y\n").await;

    assert!(matches!(result, Err(CleanupError::Catalog { .. })));
    assert!(output.is_empty());
}

#[tokio::test]
async fn test_declined_cleanup_sends_no_delete() {
    let server = MockServer::start().await;
    mount_catalog(&server, &["web"]).await;
    mount_tags(&server, "web", json!({"name": "web", "tags": ["1", "2", "3"]})).await;
    Mock::given(method("HEAD"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .respond_with(ResponseTemplate::new(202))
        .expect(0)
        .mount(&server)
        .await;

    let (result, output) = run_cleanup(&server, CleanupOptions::new(1), "n\n").await;
    let report = result.unwrap();

    assert_eq!(report.state, CleanupState::Cancelled);
    assert_eq!(report.planned(), 2);
    assert!(output.contains("  - web:2\n  - web:1\n"));
    assert!(output.contains("CANCELLED"));
}

#[tokio::test]
async fn test_closed_stdin_declines() {
    let server = MockServer::start().await;
    mount_catalog(&server, &["web"]).await;
    mount_tags(&server, "web", json!({"name": "web", "tags": ["1", "2"]})).await;
    Mock::given(method("DELETE"))
        .respond_with(ResponseTemplate::new(202))
        .expect(0)
        .mount(&server)
        .await;

    let (result, _) = run_cleanup(&server, CleanupOptions::new(1), "").await;
    assert_eq!(result.unwrap().state, CleanupState::Cancelled);
}

#[tokio::test]
async fn test_failed_delete_continues_with_next_tag() {
    let server = MockServer::start().await;
    mount_catalog(&server, &["web"]).await;
    mount_tags(&server, "web", json!({"name": "web", "tags": ["3", "2", "1"]})).await;
    mount_digest(&server, "web", "2").await;
    mount_digest(&server, "web", "1").await;
    Mock::given(method("DELETE"))
        .and(path("/v2/web/manifests/sha256:2"))
        .respond_with(ResponseTemplate::new(405).set_body_json(json!({
            "errors": [{"code": "UNSUPPORTED", "message": "The operation is unsupported."}]
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/v2/web/manifests/sha256:1"))
        .respond_with(ResponseTemplate::new(202))
        .expect(1)
        .mount(&server)
        .await;

    let (result, output) = run_cleanup(&server, CleanupOptions::new(1), "yes\n").await;
    let report = result.unwrap();

    assert_eq!(report.state, CleanupState::Done);
    assert_eq!(report.failures.len(), 1);
    assert_eq!(report.failures[0].tag, "2");
    assert_eq!(report.deleted.len(), 1);
    assert_eq!(report.deleted[0].tag, "1");
    assert!(output.contains("✗ web:2 not deleted: HTTP error from registry: 405"));
    assert!(output.contains("DONE WITH ERRORS"));
}

#[tokio::test]
async fn test_missing_digest_is_reported_per_tag() {
    let server = MockServer::start().await;
    mount_catalog(&server, &["web"]).await;
    mount_tags(&server, "web", json!({"name": "web", "tags": ["2", "1"]})).await;
    Mock::given(method("HEAD"))
        .and(path("/v2/web/manifests/1"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .respond_with(ResponseTemplate::new(202))
        .expect(0)
        .mount(&server)
        .await;

    let (result, _) = run_cleanup(&server, CleanupOptions::new(1), "y\n").await;
    let report = result.unwrap();

    assert_eq!(report.failures.len(), 1);
    assert!(report.failures[0].error.is_not_found());
}

#[tokio::test]
async fn test_dry_run_sends_no_head_or_delete() {
    let server = MockServer::start().await;
    mount_catalog(&server, &["web", "api"]).await;
    mount_tags(&server, "web", json!({"name": "web", "tags": ["1", "2", "latest"]})).await;
    mount_tags(&server, "api", json!({"name": "api", "tags": ["0.1"]})).await;
    Mock::given(method("HEAD"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .respond_with(ResponseTemplate::new(202))
        .expect(0)
        .mount(&server)
        .await;

    let options = CleanupOptions::new(1).with_dry_run(true);
    let (result, output) = run_cleanup(&server, options, "y\n").await;
    let report = result.unwrap();

    assert_eq!(report.state, CleanupState::Done);
    assert_eq!(report.repositories, 2);
    assert_eq!(report.planned(), 2);
    assert!(!output.contains("[y/N]"));
    assert!(output.contains("DRY RUN"));
}

#[tokio::test]
async fn test_unusable_tag_listings_count_as_empty() {
    let server = MockServer::start().await;
    mount_catalog(&server, &["odd", "broken", "web"]).await;
    mount_tags(&server, "odd", json!({"name": "odd", "tags": "latest"})).await;
    Mock::given(method("GET"))
        .and(path("/v2/broken/tags/list"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;
    mount_tags(&server, "web", json!({"name": "web", "tags": ["1"]})).await;

    let (result, output) = run_cleanup(&server, CleanupOptions::new(1), "y\n").await;
    let report = result.unwrap();

    assert_eq!(report.state, CleanupState::Done);
    assert_eq!(report.listing_failures, vec!["broken"]);
    assert_eq!(report.kept, 1);
    assert!(output.contains("could not list tags of broken"));
}
