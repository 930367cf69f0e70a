// ABOUTME: HTTP integration tests for health check routes
// ABOUTME: Tests liveness and readiness endpoints without authentication
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Barkeep Project

#![allow(clippy::unwrap_used, clippy::expect_used)]

//! HTTP integration tests for the health check endpoints.

mod common;
mod helpers;

use common::create_test_resources;
use helpers::axum_test::AxumTestRequest;

async fn test_router() -> axum::Router {
    let resources = create_test_resources().await.unwrap();
    barkeep::server::HttpServer::new(resources).router()
}

#[tokio::test]
async fn test_health_endpoint_success() {
    let app = test_router().await;

    let response = AxumTestRequest::get("/health").send(app).await;

    assert_eq!(response.status(), 200);
    let body: serde_json::Value = response.json();
    assert_eq!(body["status"], "healthy");
    assert!(body["timestamp"].is_string());
}

#[tokio::test]
async fn test_health_timestamp_is_rfc3339() {
    let app = test_router().await;

    let response = AxumTestRequest::get("/health").send(app).await;
    let body: serde_json::Value = response.json();

    let timestamp = body["timestamp"].as_str().unwrap();
    assert!(chrono::DateTime::parse_from_rfc3339(timestamp).is_ok());
}

#[tokio::test]
async fn test_ready_endpoint_success() {
    let app = test_router().await;

    let response = AxumTestRequest::get("/ready").send(app).await;

    assert_eq!(response.status(), 200);
    let body: serde_json::Value = response.json();
    assert_eq!(body["status"], "ready");
}

#[tokio::test]
async fn test_health_endpoints_require_no_auth() {
    let app = test_router().await;

    for endpoint in ["/health", "/ready"] {
        let response = AxumTestRequest::get(endpoint).send(app.clone()).await;
        assert_eq!(response.status(), 200, "{endpoint} should return 200");
    }
}

#[tokio::test]
async fn test_responses_carry_request_id_header() {
    let resources = create_test_resources().await.unwrap();
    let app = barkeep::server::HttpServer::new(resources).router();

    let request = axum::http::Request::builder()
        .method("GET")
        .uri("/health")
        .body(axum::body::Body::empty())
        .unwrap();

    use tower::ServiceExt;
    let response = app.oneshot(request).await.unwrap();
    assert!(response.headers().contains_key("x-request-id"));
}

#[tokio::test]
async fn test_client_supplied_request_id_is_echoed_back() {
    let resources = create_test_resources().await.unwrap();
    let app = barkeep::server::HttpServer::new(resources).router();

    let request = axum::http::Request::builder()
        .method("GET")
        .uri("/health")
        .header("x-request-id", "req_client_supplied")
        .body(axum::body::Body::empty())
        .unwrap();

    use tower::ServiceExt;
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(
        response.headers().get("x-request-id").unwrap(),
        "req_client_supplied"
    );
}
