//! Integration tests using mock HTTP server
//!
//! Tests the full flow: config file → token refresh → stream tree → Singer
//! messages, with the API and accounts server both served by wiremock.

use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use std::time::Duration;
use tap_zohobooks::auth::Authenticator;
use tap_zohobooks::catalog::Catalog;
use tap_zohobooks::config::{ConfigSource, TapConfig};
use tap_zohobooks::engine::{SyncConfig, SyncEngine};
use tap_zohobooks::http::{HttpClient, HttpClientConfig};
use tap_zohobooks::output::MessageWriter;
use tap_zohobooks::state::StateManager;
use tap_zohobooks::streams::StreamRegistry;
use tempfile::TempDir;
use wiremock::matchers::{body_string_contains, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

// ============================================================================
// Helpers
// ============================================================================

fn write_config(dir: &TempDir, server: &MockServer, extra: Value) -> std::path::PathBuf {
    let mut config = json!({
        "client_id": "client",
        "client_secret": "secret",
        "refresh_token": "refresh",
        "accounts-server": server.uri(),
    });
    if let (Some(config), Some(extra)) = (config.as_object_mut(), extra.as_object()) {
        config.extend(extra.clone());
    }

    let path = dir.path().join("config.json");
    std::fs::write(&path, config.to_string()).unwrap();
    path
}

fn client_for(config: &TapConfig) -> HttpClient {
    let http_config = HttpClientConfig::builder()
        .max_tries(3)
        .backoff(Duration::from_millis(1), Duration::from_millis(1))
        .no_rate_limit()
        .no_daily_quota_wait()
        .user_agent(config.user_agent())
        .build();
    let mut client = HttpClient::with_config(http_config).unwrap();
    let auth = Authenticator::from_config(config, client.inner().clone()).unwrap();
    client.set_authenticator(auth);
    client
}

async fn mount_token(server: &MockServer) {
    Mock::given(method("POST"))
        .and(path("/oauth/v2/token"))
        .and(body_string_contains("grant_type=refresh_token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": "fresh-token",
            "expires_in": 3600
        })))
        .expect(1)
        .mount(server)
        .await;
}

async fn mount_organizations(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/books/v3/organizations"))
        .and(header("Authorization", "Zoho-oauthtoken fresh-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "organizations": [{"organization_id": "777"}],
            "page_context": {"page": 1, "has_more_page": false}
        })))
        .mount(server)
        .await;
}

fn parse_lines(out: Vec<u8>) -> Vec<Value> {
    String::from_utf8(out)
        .unwrap()
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect()
}

fn catalog_selecting(streams: &[&str]) -> Catalog {
    let mut catalog = Catalog::discover(&StreamRegistry::zoho_books());
    catalog.select_all(false);
    for entry in &mut catalog.streams {
        if streams.contains(&entry.tap_stream_id.as_str()) {
            entry.root_metadata_mut().selected = Some(true);
        }
    }
    catalog
}

// ============================================================================
// End-to-end Tests
// ============================================================================

#[tokio::test]
async fn test_sync_refreshes_token_and_persists_it() {
    let server = MockServer::start().await;
    mount_token(&server).await;
    mount_organizations(&server).await;

    Mock::given(method("GET"))
        .and(path("/books/v3/chartofaccounts"))
        .and(query_param("organization_id", "777"))
        .and(query_param(
            "last_modified_time",
            "2024-01-01T00:00:01+0000",
        ))
        .and(header("Authorization", "Zoho-oauthtoken fresh-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "chartofaccounts": [
                {"account_id": "a1", "account_name": "Cash", "last_modified_time": "2024-06-01T09:00:00+0000"}
            ],
            "page_context": {"page": 1, "has_more_page": false}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    let config_path = write_config(&dir, &server, json!({"start_date": "2024-01-01T00:00:00Z"}));
    let config = TapConfig::from_sources(&[ConfigSource::File(config_path.clone())]).unwrap();
    config.validate().unwrap();

    let mut engine = SyncEngine::new(
        client_for(&config),
        catalog_selecting(&["chart_of_accounts"]),
        StateManager::in_memory(),
        MessageWriter::new(Vec::new()),
    )
    .with_config(
        SyncConfig::from_tap_config(&config)
            .with_base_url(format!("{}/books/v3/", server.uri())),
    );

    let stats = engine.sync_all().await.unwrap();
    assert_eq!(stats.records_synced, 1);

    let messages = parse_lines(engine.into_writer().into_inner());
    let types: Vec<&str> = messages
        .iter()
        .map(|m| m["type"].as_str().unwrap())
        .collect();
    assert_eq!(types, vec!["SCHEMA", "RECORD", "STATE", "STATE"]);

    let state = &messages[3]["value"]["bookmarks"]["chart_of_accounts"];
    assert_eq!(
        state["partitions"][0]["replication_key_value"],
        "2024-06-01T09:00:00+0000"
    );
    assert_eq!(
        state["partitions"][0]["context"],
        json!({"organization_id": "777"})
    );

    let raw = std::fs::read_to_string(&config_path).unwrap();
    let saved: Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(saved["access_token"], "fresh-token");
    assert!(saved["expires_in"].as_i64().is_some());
    assert_eq!(saved["client_id"], "client");
}

#[tokio::test]
async fn test_sync_resumes_from_state_file() {
    let server = MockServer::start().await;
    mount_token(&server).await;
    mount_organizations(&server).await;

    Mock::given(method("GET"))
        .and(path("/books/v3/invoices"))
        .and(query_param(
            "last_modified_time",
            "2024-03-05T12:00:01+0530",
        ))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "invoices": [{"invoice_id": "inv-9", "last_modified_time": "2024-03-06T08:00:00+0530"}],
            "page_context": {"page": 1, "has_more_page": false}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    let config_path = write_config(&dir, &server, json!({}));
    let state_path = dir.path().join("state.json");
    std::fs::write(
        &state_path,
        json!({
            "bookmarks": {
                "invoices": {
                    "partitions": [{
                        "context": {"organization_id": "777"},
                        "replication_key": "last_modified_time",
                        "replication_key_value": "2024-03-05T12:00:00+0530"
                    }]
                }
            }
        })
        .to_string(),
    )
    .unwrap();

    let config = TapConfig::from_sources(&[ConfigSource::File(config_path)]).unwrap();
    let mut engine = SyncEngine::new(
        client_for(&config),
        catalog_selecting(&["invoices"]),
        StateManager::from_file(&state_path).unwrap(),
        MessageWriter::new(Vec::new()),
    )
    .with_config(SyncConfig::new().with_base_url(format!("{}/books/v3/", server.uri())));

    engine.sync_all().await.unwrap();

    let messages = parse_lines(engine.into_writer().into_inner());
    let last = messages.last().unwrap();
    assert_eq!(
        last["value"]["bookmarks"]["invoices"]["partitions"][0]["replication_key_value"],
        "2024-03-06T08:00:00+0530"
    );
}

#[tokio::test]
async fn test_catalog_file_controls_selection() {
    let server = MockServer::start().await;
    mount_token(&server).await;
    mount_organizations(&server).await;

    Mock::given(method("GET"))
        .and(path("/books/v3/items"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "items": [{"item_id": "it-1", "name": "Desk"}],
            "page_context": {"page": 1, "has_more_page": false}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    let catalog_path = dir.path().join("catalog.json");
    std::fs::write(
        &catalog_path,
        serde_json::to_string(&catalog_selecting(&["items"])).unwrap(),
    )
    .unwrap();

    let config_path = write_config(&dir, &server, json!({}));
    let config = TapConfig::from_sources(&[ConfigSource::File(config_path)]).unwrap();
    let mut engine = SyncEngine::new(
        client_for(&config),
        Catalog::from_file(&catalog_path).unwrap(),
        StateManager::in_memory(),
        MessageWriter::new(Vec::new()),
    )
    .with_config(SyncConfig::new().with_base_url(format!("{}/books/v3/", server.uri())));

    engine.sync_all().await.unwrap();

    let messages = parse_lines(engine.into_writer().into_inner());
    let streams: Vec<&str> = messages
        .iter()
        .filter(|m| m["type"] == "RECORD")
        .map(|m| m["stream"].as_str().unwrap())
        .collect();
    assert_eq!(streams, vec!["items"]);

    // Items has no other request path; nothing else was fetched
    let requested: Vec<String> = server
        .received_requests()
        .await
        .unwrap()
        .iter()
        .map(|r| r.url.path().to_string())
        .collect();
    assert_eq!(
        requested,
        vec![
            "/oauth/v2/token",
            "/books/v3/organizations",
            "/books/v3/items"
        ]
    );
}

#[tokio::test]
async fn test_rejected_refresh_fails_sync() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/oauth/v2/token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"error": "invalid_code"})))
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    let config_path = write_config(&dir, &server, json!({}));
    let config = TapConfig::from_sources(&[ConfigSource::File(config_path)]).unwrap();

    let mut engine = SyncEngine::new(
        client_for(&config),
        catalog_selecting(&["organization_id"]),
        StateManager::in_memory(),
        MessageWriter::new(Vec::new()),
    )
    .with_config(SyncConfig::new().with_base_url(format!("{}/books/v3/", server.uri())));

    let err = engine.sync_all().await.unwrap_err();
    assert!(err.to_string().contains("Token refresh failed"));
}
