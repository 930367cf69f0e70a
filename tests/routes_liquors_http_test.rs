// ABOUTME: HTTP integration tests for liquor catalog routes
// ABOUTME: Covers listing, type listing, and name/id lookup including 404s
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Barkeep Project

#![allow(clippy::unwrap_used, clippy::expect_used)]

//! HTTP integration tests for the public liquor catalog endpoints.

mod common;
mod helpers;

use common::{create_test_resources, seed_basic_catalog, SeededCatalog};
use helpers::axum_test::AxumTestRequest;

struct TestContext {
    app: axum::Router,
    catalog: SeededCatalog,
}

async fn setup() -> TestContext {
    let resources = create_test_resources().await.unwrap();
    let catalog = seed_basic_catalog(&resources.database).await.unwrap();
    let app = barkeep::server::HttpServer::new(resources).router();
    TestContext { app, catalog }
}

#[tokio::test]
async fn test_list_liquors_returns_catalog_ordered_by_name() {
    let ctx = setup().await;

    let response = AxumTestRequest::get("/api/liquors").send(ctx.app).await;

    assert_eq!(response.status(), 200);
    let body: serde_json::Value = response.json();
    assert_eq!(body["success"], true);
    assert_eq!(body["count"], 4);

    let names: Vec<&str> = body["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|l| l["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, ["Dry Vermouth", "Gin", "Tonic Water", "Vodka"]);
}

#[tokio::test]
async fn test_list_liquors_includes_resolved_type_names() {
    let ctx = setup().await;

    let response = AxumTestRequest::get("/api/liquors").send(ctx.app).await;

    let body: serde_json::Value = response.json();
    let gin = body["data"]
        .as_array()
        .unwrap()
        .iter()
        .find(|l| l["name"] == "Gin")
        .unwrap();
    assert_eq!(gin["type_name"], "Spirit");
}

#[tokio::test]
async fn test_list_liquor_types() {
    let ctx = setup().await;

    let response = AxumTestRequest::get("/api/liquors/types")
        .send(ctx.app)
        .await;

    assert_eq!(response.status(), 200);
    let body: serde_json::Value = response.json();
    assert_eq!(body["success"], true);
    assert_eq!(body["count"], 2);

    // /types must hit the fixed route, not parse "types" as an id
    let names: Vec<&str> = body["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|t| t["type_name"].as_str().unwrap())
        .collect();
    assert_eq!(names, ["Mixer", "Spirit"]);
}

#[tokio::test]
async fn test_get_liquor_by_id() {
    let ctx = setup().await;

    let response = AxumTestRequest::get(&format!("/api/liquors/{}", ctx.catalog.gin))
        .send(ctx.app)
        .await;

    assert_eq!(response.status(), 200);
    let body: serde_json::Value = response.json();
    assert_eq!(body["id"], ctx.catalog.gin);
    assert_eq!(body["name"], "Gin");
}

#[tokio::test]
async fn test_get_unknown_liquor_id_is_not_found() {
    let ctx = setup().await;

    let response = AxumTestRequest::get("/api/liquors/9999").send(ctx.app).await;

    assert_eq!(response.status(), 404);
    let body: serde_json::Value = response.json();
    assert_eq!(body["error"]["code"], "RESOURCE_NOT_FOUND");
}

#[tokio::test]
async fn test_get_liquor_by_exact_name() {
    let ctx = setup().await;

    let response = AxumTestRequest::get("/api/liquors/name/Vodka")
        .send(ctx.app.clone())
        .await;
    assert_eq!(response.status(), 200);
    let body: serde_json::Value = response.json();
    assert_eq!(body["id"], ctx.catalog.vodka);

    let missing = AxumTestRequest::get("/api/liquors/name/Absinthe")
        .send(ctx.app)
        .await;
    assert_eq!(missing.status(), 404);
}
