//! HTTP client tests against a local mock catalog
//!
//! Verifies request shape (path, query, headers) and the mapping of HTTP
//! outcomes to fetch errors, plus one full run over real HTTP.

mod helpers;

use helpers::{RecordingSleeper, Workspace};
use scenesync_common::config::SyncConfig;
use scenesync_jav::fetch::{FetchError, JavApiClient, SceneSource};
use scenesync_jav::run_sync;
use scenesync_jav::types::RemoteId;
use serde_json::json;
use std::time::Duration;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn config_for(server: &MockServer) -> SyncConfig {
    SyncConfig {
        api_base_url: server.uri(),
        api_token: Some("secret-token".to_string()),
        retry_delay_ms: 0,
        ..SyncConfig::default()
    }
}

#[tokio::test]
async fn test_request_shape_and_decode() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/jav/abc-001"))
        .and(query_param("add_to_collection", "true"))
        .and(header("Authorization", "Bearer secret-token"))
        .and(header("Accept", "application/json"))
        .and(header("User-Agent", "curl/8.7.1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": {
                "_id": 4242,
                "title": "ABC-001 - opening",
                "performers": [],
                "site": {"id": 3, "name": "Three"}
            }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = JavApiClient::new(&config_for(&server)).unwrap();
    let scene = client
        .fetch_scene(&RemoteId::Text("abc-001".into()))
        .await
        .unwrap();

    assert_eq!(scene.id, Some(RemoteId::Number(4242)));
    assert_eq!(scene.title.as_deref(), Some("ABC-001 - opening"));
    assert_eq!(scene.site.unwrap().name.as_deref(), Some("Three"));
}

#[tokio::test]
async fn test_not_found_maps_to_not_found() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/jav/404"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let client = JavApiClient::new(&config_for(&server)).unwrap();
    let err = client.fetch_scene(&RemoteId::Number(404)).await.unwrap_err();

    assert_eq!(err, FetchError::NotFound);
    assert_eq!(err.to_string(), "404 Not Found");
}

#[tokio::test]
async fn test_server_error_maps_to_status() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let client = JavApiClient::new(&config_for(&server)).unwrap();
    let err = client.fetch_scene(&RemoteId::Number(1)).await.unwrap_err();

    assert_eq!(
        err,
        FetchError::Status {
            status: 500,
            reason: "Internal Server Error".into()
        }
    );
}

#[tokio::test]
async fn test_body_without_data_is_parse_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"message": "hi"})))
        .mount(&server)
        .await;

    let client = JavApiClient::new(&config_for(&server)).unwrap();
    let err = client.fetch_scene(&RemoteId::Number(1)).await.unwrap_err();

    assert!(matches!(err, FetchError::Parse(_)));
}

#[tokio::test]
async fn test_non_json_body_is_parse_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>blocked</html>"))
        .mount(&server)
        .await;

    let client = JavApiClient::new(&config_for(&server)).unwrap();
    let err = client.fetch_scene(&RemoteId::Number(1)).await.unwrap_err();

    assert!(matches!(err, FetchError::Parse(_)));
}

#[tokio::test]
async fn test_slow_response_maps_to_timeout() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/jav/slow"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"data": {"_id": 1}}))
                .set_delay(Duration::from_secs(3)),
        )
        .mount(&server)
        .await;

    let config = SyncConfig {
        request_timeout_secs: 1,
        ..config_for(&server)
    };
    let client = JavApiClient::new(&config).unwrap();
    let err = client
        .fetch_scene(&RemoteId::Text("slow".into()))
        .await
        .unwrap_err();

    assert_eq!(err, FetchError::Timeout(Duration::from_secs(1)));
}

#[tokio::test]
async fn test_run_over_http_retries_404_three_times() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/jav/gone"))
        .respond_with(ResponseTemplate::new(404))
        .expect(3)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/jav/77"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": {
                "_id": 77,
                "title": "XYZ-077",
                "description": "quiet afternoon",
                "background": {"full": ""},
                "performers": [
                    {"parent": {"_id": "p1", "name": "Hana", "image": "", "extras": {"gender": "Female"}}}
                ]
            }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let ws = Workspace::new();
    let config = SyncConfig {
        api_base_url: server.uri(),
        ..ws.config.clone()
    };
    ws.write_input(json!([
        {"slug": "GONE-1", "scene_id": "gone"},
        {"video_id": "XYZ-077", "scene_id": 77}
    ]));

    let client = JavApiClient::new(&config).unwrap();
    let sleeper = RecordingSleeper::default();
    let summary = run_sync(&config, &client, &sleeper).await.unwrap();

    assert_eq!(summary.succeeded, 1);
    assert_eq!(summary.failed, 1);
    assert_eq!(
        ws.output(),
        json!([{
            "video_id": "XYZ-077",
            "data": {
                "_id": 77,
                "title": "XYZ-077",
                "description": "Quiet afternoon",
                "date": null,
                "trailer": null,
                "performers": [{"parent": {"_id": "p1"}}]
            }
        }])
    );
    assert_eq!(ws.performers(), json!([{"_id": "p1", "name": "Hana"}]));
    assert_eq!(ws.failed()[0]["error"], json!("404 Not Found"));
    assert!(!ws.config.site_file.exists());
}
