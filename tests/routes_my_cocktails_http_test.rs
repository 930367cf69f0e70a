// ABOUTME: HTTP integration tests for the achievable cocktail routes
// ABOUTME: Covers the persisted list endpoint and the explicit refresh endpoint
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Barkeep Project

#![allow(clippy::unwrap_used, clippy::expect_used)]

//! HTTP integration tests for the achievable cocktail endpoints.

mod common;
mod helpers;

use common::{create_authenticated_user, create_test_resources, seed_basic_catalog, SeededCatalog};
use helpers::axum_test::AxumTestRequest;
use serde_json::json;
use std::sync::Arc;

struct TestContext {
    resources: Arc<barkeep::resources::ServerResources>,
    app: axum::Router,
    catalog: SeededCatalog,
    token: String,
}

async fn setup() -> TestContext {
    let resources = create_test_resources().await.unwrap();
    let catalog = seed_basic_catalog(&resources.database).await.unwrap();
    let (_user, token) = create_authenticated_user(&resources, "alice", "alice@example.com")
        .await
        .unwrap();
    let app = barkeep::server::HttpServer::new(resources.clone()).router();
    TestContext {
        resources,
        app,
        catalog,
        token,
    }
}

async fn add_liquor(ctx: &TestContext, liquor_id: i64) {
    let response = AxumTestRequest::post("/api/cabinet/add")
        .bearer(&ctx.token)
        .json(&json!({"liquor_id": liquor_id}))
        .send(ctx.app.clone())
        .await;
    assert_eq!(response.status(), 200);
}

#[tokio::test]
async fn test_list_requires_authentication() {
    let ctx = setup().await;

    let response = AxumTestRequest::get("/api/my-cocktails").send(ctx.app).await;

    assert_eq!(response.status(), 401);
}

#[tokio::test]
async fn test_list_is_empty_for_new_user() {
    let ctx = setup().await;

    let response = AxumTestRequest::get("/api/my-cocktails")
        .bearer(&ctx.token)
        .send(ctx.app)
        .await;

    assert_eq!(response.status(), 200);
    let body: serde_json::Value = response.json();
    assert_eq!(body["count"], 0);
}

#[tokio::test]
async fn test_cabinet_mutations_keep_list_in_sync() {
    let ctx = setup().await;

    add_liquor(&ctx, ctx.catalog.gin).await;
    add_liquor(&ctx, ctx.catalog.tonic).await;

    let response = AxumTestRequest::get("/api/my-cocktails")
        .bearer(&ctx.token)
        .send(ctx.app.clone())
        .await;
    let body: serde_json::Value = response.json();
    assert_eq!(body["count"], 1);
    assert_eq!(body["data"][0]["name"], "Gin and Tonic");
    assert!(body["data"][0]["discovered_at"].is_string());
    assert_eq!(body["data"][0]["ingredients"][0], "2 oz Gin");
}

#[tokio::test]
async fn test_refresh_reports_zero_delta_when_nothing_changed() {
    let ctx = setup().await;

    add_liquor(&ctx, ctx.catalog.gin).await;
    add_liquor(&ctx, ctx.catalog.tonic).await;

    // Cabinet adds already reconciled, so an explicit refresh is a no-op
    let response = AxumTestRequest::post("/api/my-cocktails/refresh")
        .bearer(&ctx.token)
        .send(ctx.app)
        .await;

    assert_eq!(response.status(), 200);
    let body: serde_json::Value = response.json();
    assert_eq!(body["success"], true);
    assert_eq!(body["added"], 0);
    assert_eq!(body["removed"], 0);
    assert_eq!(body["message"], "Cocktail list refreshed: 0 added, 0 removed");
}

#[tokio::test]
async fn test_refresh_picks_up_out_of_band_cabinet_changes() {
    let ctx = setup().await;

    // Mutate the cabinet directly, bypassing the routes and their inline
    // reconciliation
    let (user, token) = create_authenticated_user(&ctx.resources, "bob", "bob@example.com")
        .await
        .unwrap();
    ctx.resources
        .database
        .add_liquor_to_cabinet(user.id, ctx.catalog.vodka)
        .await
        .unwrap();
    ctx.resources
        .database
        .add_liquor_to_cabinet(user.id, ctx.catalog.tonic)
        .await
        .unwrap();

    let response = AxumTestRequest::post("/api/my-cocktails/refresh")
        .bearer(&token)
        .send(ctx.app.clone())
        .await;

    assert_eq!(response.status(), 200);
    let body: serde_json::Value = response.json();
    assert_eq!(body["added"], 1);

    let list = AxumTestRequest::get("/api/my-cocktails")
        .bearer(&token)
        .send(ctx.app)
        .await;
    let body: serde_json::Value = list.json();
    assert_eq!(body["count"], 1);
    assert_eq!(body["data"][0]["name"], "Vodka Tonic");
}
