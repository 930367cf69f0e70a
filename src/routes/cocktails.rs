// ABOUTME: Cocktail catalog route handlers for browsing recipes
// ABOUTME: Provides public endpoints listing cocktails with formatted ingredients
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Barkeep Project

//! Cocktail catalog routes (public, read-only)

use crate::errors::AppError;
use crate::models::Cocktail;
use crate::resources::ServerResources;
use crate::routes::ListResponse;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde::Serialize;
use std::sync::Arc;

/// Cocktail shaped for API responses, with display ingredient lines
#[derive(Debug, Serialize)]
pub struct CocktailView {
    pub id: i64,
    pub name: String,
    pub image_url: Option<String>,
    pub glass_type: Option<String>,
    pub instructions: Option<String>,
    /// Formatted as "{amount} {unit} {liquor}"
    pub ingredients: Vec<String>,
}

impl From<Cocktail> for CocktailView {
    fn from(cocktail: Cocktail) -> Self {
        let ingredients = cocktail.ingredient_lines();
        Self {
            id: cocktail.id,
            name: cocktail.name,
            image_url: cocktail.image_url,
            glass_type: cocktail.glass_type,
            instructions: cocktail.instructions,
            ingredients,
        }
    }
}

/// Cocktail catalog routes implementation
pub struct CocktailRoutes;

impl CocktailRoutes {
    /// Create all cocktail catalog routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/", get(Self::handle_list))
            .route("/:id", get(Self::handle_get_by_id))
            .with_state(resources)
    }

    /// List the full cocktail catalog
    async fn handle_list(
        State(resources): State<Arc<ServerResources>>,
    ) -> Result<Response, AppError> {
        let cocktails = resources
            .database
            .list_cocktails()
            .await
            .map_err(|e| AppError::database(e.to_string()))?;

        let views: Vec<CocktailView> = cocktails.into_iter().map(CocktailView::from).collect();

        Ok((StatusCode::OK, Json(ListResponse::new(views))).into_response())
    }

    /// Get a cocktail by id
    async fn handle_get_by_id(
        State(resources): State<Arc<ServerResources>>,
        Path(id): Path<i64>,
    ) -> Result<Response, AppError> {
        let cocktail = resources
            .database
            .get_cocktail(id)
            .await
            .map_err(|e| AppError::database(e.to_string()))?
            .ok_or_else(|| AppError::not_found("Cocktail"))?;

        Ok((StatusCode::OK, Json(CocktailView::from(cocktail))).into_response())
    }
}
