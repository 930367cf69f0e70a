// ABOUTME: Achievable cocktail route handlers for the authenticated user
// ABOUTME: Exposes the persisted achievable list and the explicit refresh endpoint
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Barkeep Project

//! Achievable cocktail routes (authenticated)
//!
//! `GET /` is a read-only passthrough over the persisted achievable set;
//! `POST /refresh` runs a full reconciliation and reports the delta counts.

use crate::errors::AppError;
use crate::models::AchievableCocktail;
use crate::resources::ServerResources;
use crate::routes::{authenticate, ListResponse};
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Serialize;
use std::sync::Arc;

/// Achievable cocktail shaped for API responses
#[derive(Debug, Serialize)]
pub struct AchievableCocktailView {
    pub id: i64,
    pub name: String,
    pub image_url: Option<String>,
    pub glass_type: Option<String>,
    pub instructions: Option<String>,
    pub ingredients: Vec<String>,
    pub discovered_at: String,
}

impl From<AchievableCocktail> for AchievableCocktailView {
    fn from(achievable: AchievableCocktail) -> Self {
        let ingredients = achievable.cocktail.ingredient_lines();
        Self {
            id: achievable.cocktail.id,
            name: achievable.cocktail.name,
            image_url: achievable.cocktail.image_url,
            glass_type: achievable.cocktail.glass_type,
            instructions: achievable.cocktail.instructions,
            ingredients,
            discovered_at: achievable.discovered_at.to_rfc3339(),
        }
    }
}

/// Refresh response with delta counts
#[derive(Debug, Serialize)]
pub struct RefreshResponse {
    pub success: bool,
    pub message: String,
    pub added: usize,
    pub removed: usize,
}

/// Achievable cocktail routes implementation
pub struct MyCocktailRoutes;

impl MyCocktailRoutes {
    /// Create all achievable cocktail routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/", get(Self::handle_list))
            .route("/refresh", post(Self::handle_refresh))
            .with_state(resources)
    }

    /// List the user's achievable cocktails
    async fn handle_list(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
    ) -> Result<Response, AppError> {
        let auth = authenticate(&headers, &resources)?;

        let cocktails = resources
            .database
            .list_achievable_cocktails(auth.user_id)
            .await
            .map_err(|e| AppError::database(e.to_string()).with_user_id(auth.user_id))?;

        let views: Vec<AchievableCocktailView> = cocktails
            .into_iter()
            .map(AchievableCocktailView::from)
            .collect();

        Ok((StatusCode::OK, Json(ListResponse::new(views))).into_response())
    }

    /// Run an explicit reconciliation for the user
    async fn handle_refresh(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
    ) -> Result<Response, AppError> {
        let auth = authenticate(&headers, &resources)?;

        let summary = resources.engine.refresh_achievable(auth.user_id).await?;

        let response = RefreshResponse {
            success: true,
            message: format!(
                "Cocktail list refreshed: {} added, {} removed",
                summary.added, summary.removed
            ),
            added: summary.added,
            removed: summary.removed,
        };

        Ok((StatusCode::OK, Json(response)).into_response())
    }
}
