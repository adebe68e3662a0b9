//! Integration tests for the API server.

use axum::body::Body;
use axum::http::{Request, StatusCode};
use event_store::InMemoryEventStore;
use metrics_exporter_prometheus::PrometheusHandle;
use tower::ServiceExt;

use std::sync::OnceLock;

static METRICS_HANDLE: OnceLock<PrometheusHandle> = OnceLock::new();

fn get_metrics_handle() -> PrometheusHandle {
    METRICS_HANDLE
        .get_or_init(|| {
            let builder = metrics_exporter_prometheus::PrometheusBuilder::new();
            builder
                .install_recorder()
                .expect("failed to install Prometheus recorder")
        })
        .clone()
}

fn setup() -> axum::Router {
    let store = InMemoryEventStore::new();
    let (state, _processor) = api::create_default_state(store);
    api::create_app(state, get_metrics_handle())
}

async fn send(app: &axum::Router, request: Request<Body>) -> (StatusCode, serde_json::Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = if body.is_empty() {
        serde_json::Value::Null
    } else {
        serde_json::from_slice(&body).unwrap()
    };
    (status, json)
}

fn post_json(uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_string(&body).unwrap()))
        .unwrap()
}

fn get_req(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn delete_req(uri: &str) -> Request<Body> {
    Request::builder()
        .method("DELETE")
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

async fn register_example_com(app: &axum::Router) {
    let (status, _) = send(
        app,
        post_json("/domains", serde_json::json!({"name": "example.com"})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
}

#[tokio::test]
async fn test_health_check() {
    let app = setup();

    let (status, json) = send(&app, get_req("/health")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"], "ok");
}

#[tokio::test]
async fn test_register_domain() {
    let app = setup();

    let (status, json) = send(
        &app,
        post_json("/domains", serde_json::json!({"name": "example.com"})),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(json["name"], "example.com");
}

#[tokio::test]
async fn test_register_unsupported_tld_is_bad_request() {
    let app = setup();

    let (status, json) = send(
        &app,
        post_json("/domains", serde_json::json!({"name": "example.xyz"})),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"], "'xyz' is not a supported top level domain.");
}

#[tokio::test]
async fn test_register_twice_is_conflict() {
    let app = setup();
    register_example_com(&app).await;

    let (status, _) = send(
        &app,
        post_json("/domains", serde_json::json!({"name": "example.com"})),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_get_unknown_domain_is_not_found() {
    let app = setup();

    let (status, _) = send(&app, get_req("/domains/example.com")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_add_manual_service_and_get_domain() {
    let app = setup();
    register_example_com(&app).await;

    let (status, json) = send(
        &app,
        post_json(
            "/domains/example.com/services/manual",
            serde_json::json!({
                "label": "primary",
                "records": [
                    {"type": "a", "label": "@", "value": "1.2.3.4", "ttl": 3600},
                    {"type": "mx", "label": "@", "value": "10 mail.example.com.", "ttl": 3600}
                ]
            }),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(json["service_type"], "manual");

    let (status, json) = send(&app, get_req("/domains/example.com")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["name"], "example.com");
    assert_eq!(json["version"], 3);
    assert_eq!(json["services"].as_array().unwrap().len(), 1);
    assert_eq!(json["services"][0]["label"], "primary");
    assert_eq!(json["records"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_invalid_record_is_rejected_with_grammar_message() {
    let app = setup();
    register_example_com(&app).await;

    let (status, json) = send(
        &app,
        post_json(
            "/domains/example.com/services/manual",
            serde_json::json!({
                "label": "primary",
                "records": [
                    {"type": "a", "label": "@", "value": "not-an-ip", "ttl": 3600}
                ]
            }),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        json["error"],
        "Value of an A record must be a dotted-quad IP address."
    );
}

#[tokio::test]
async fn test_google_suite_service_and_derived_records() {
    let app = setup();
    register_example_com(&app).await;

    let (status, json) = send(
        &app,
        post_json(
            "/domains/example.com/services/googlesuite",
            serde_json::json!({"verification_token": "abc123"}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(json["service_type"], "googlesuite");

    let (status, json) = send(&app, get_req("/domains/example.com")).await;
    assert_eq!(status, StatusCode::OK);
    // 5 MX records + 1 verification CNAME
    assert_eq!(json["records"].as_array().unwrap().len(), 6);
    assert_eq!(json["services"][0]["label"], "Google Suite");
}

#[tokio::test]
async fn test_second_google_suite_is_conflict() {
    let app = setup();
    register_example_com(&app).await;

    let (status, _) = send(
        &app,
        post_json(
            "/domains/example.com/services/googlesuite",
            serde_json::json!({"verification_token": "tok1"}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, _) = send(
        &app,
        post_json(
            "/domains/example.com/services/googlesuite",
            serde_json::json!({"verification_token": "tok2"}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_remove_service() {
    let app = setup();
    register_example_com(&app).await;

    let service_id = uuid::Uuid::new_v4().to_string();
    let (status, _) = send(
        &app,
        post_json(
            "/domains/example.com/services/manual",
            serde_json::json!({
                "service_id": service_id,
                "label": "primary",
                "records": [
                    {"type": "a", "label": "@", "value": "1.2.3.4", "ttl": 3600}
                ]
            }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, _) = send(
        &app,
        delete_req(&format!("/domains/example.com/services/{service_id}")),
    )
    .await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, json) = send(&app, get_req("/domains/example.com")).await;
    assert_eq!(status, StatusCode::OK);
    assert!(json["services"].as_array().unwrap().is_empty());
    assert!(json["records"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_remove_unknown_service_is_not_found() {
    let app = setup();
    register_example_com(&app).await;

    let service_id = uuid::Uuid::new_v4();
    let (status, _) = send(
        &app,
        delete_req(&format!("/domains/example.com/services/{service_id}")),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_remove_service_on_unknown_domain_is_not_found() {
    let app = setup();

    let service_id = uuid::Uuid::new_v4();
    let (status, _) = send(
        &app,
        delete_req(&format!("/domains/example.com/services/{service_id}")),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_list_domains() {
    let app = setup();
    register_example_com(&app).await;
    let (status, _) = send(
        &app,
        post_json("/domains", serde_json::json!({"name": "other.be"})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, json) = send(&app, get_req("/domains")).await;
    assert_eq!(status, StatusCode::OK);

    let domains = json.as_array().unwrap();
    assert_eq!(domains.len(), 2);
    assert_eq!(domains[0]["name"], "example.com");
    assert_eq!(domains[1]["name"], "other.be");
}

#[tokio::test]
async fn test_domain_events_endpoint() {
    let app = setup();
    register_example_com(&app).await;

    let (status, _) = send(
        &app,
        post_json(
            "/domains/example.com/services/manual",
            serde_json::json!({
                "label": "primary",
                "records": [
                    {"type": "a", "label": "@", "value": "1.2.3.4", "ttl": 3600}
                ]
            }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, json) = send(&app, get_req("/domains/example.com/events")).await;
    assert_eq!(status, StatusCode::OK);

    let types: Vec<_> = json
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["event_type"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(
        types,
        vec!["DomainWasCreated", "ManualWasAdded", "RecordSetWasUpdated"]
    );
    assert_eq!(json[0]["stream_name"], "example.com");
    assert_eq!(json[0]["version"], 1);
}

#[tokio::test]
async fn test_metrics_endpoint() {
    let app = setup();

    let response = app
        .clone()
        .oneshot(get_req("/metrics"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}
