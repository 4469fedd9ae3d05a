mod helpers;

use axum::http::StatusCode;
use helpers::{client, down_client};
use redmask_server::HealthResponse;

#[tokio::test]
async fn health_check_returns_200_when_store_answers() {
    let response = client().get("/health").await;

    response
        .assert_status(StatusCode::OK)
        .assert_content_type_contains("application/json");

    let health: HealthResponse = response.json();
    assert_eq!(health.status, "UP");
}

#[tokio::test]
async fn health_check_returns_503_when_store_is_down() {
    let response = down_client().get("/health").await;

    response.assert_status(StatusCode::SERVICE_UNAVAILABLE);

    let health: HealthResponse = response.json();
    assert_eq!(health.status, "DOWN");
}

#[test]
fn health_response_serializes_correctly() {
    let json = serde_json::to_string(&HealthResponse::default()).unwrap();
    assert_eq!(json, r#"{"status":"UP"}"#);

    let json = serde_json::to_string(&HealthResponse::down()).unwrap();
    assert_eq!(json, r#"{"status":"DOWN"}"#);
}

#[tokio::test]
async fn metrics_endpoint_renders_text() {
    let response = client().get("/metrics").await;

    response.assert_status(StatusCode::OK);
}
