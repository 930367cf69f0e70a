// ABOUTME: Liquor catalog route handlers for browsing reference data
// ABOUTME: Provides public endpoints for liquors, types, and name/id lookup
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Barkeep Project

//! Liquor catalog routes (public, read-only)

use crate::errors::AppError;
use crate::resources::ServerResources;
use crate::routes::ListResponse;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use std::sync::Arc;

/// Liquor catalog routes implementation
pub struct LiquorRoutes;

impl LiquorRoutes {
    /// Create all liquor catalog routes
    ///
    /// `/types` and `/name/:name` precede `/:id` so fixed segments are not
    /// swallowed by the id capture.
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/", get(Self::handle_list))
            .route("/types", get(Self::handle_list_types))
            .route("/name/:name", get(Self::handle_get_by_name))
            .route("/:id", get(Self::handle_get_by_id))
            .with_state(resources)
    }

    /// List the full liquor catalog
    async fn handle_list(
        State(resources): State<Arc<ServerResources>>,
    ) -> Result<Response, AppError> {
        let liquors = resources
            .database
            .list_liquors()
            .await
            .map_err(|e| AppError::database(e.to_string()))?;

        Ok((StatusCode::OK, Json(ListResponse::new(liquors))).into_response())
    }

    /// List all liquor types
    async fn handle_list_types(
        State(resources): State<Arc<ServerResources>>,
    ) -> Result<Response, AppError> {
        let types = resources
            .database
            .list_liquor_types()
            .await
            .map_err(|e| AppError::database(e.to_string()))?;

        Ok((StatusCode::OK, Json(ListResponse::new(types))).into_response())
    }

    /// Get a liquor by id
    async fn handle_get_by_id(
        State(resources): State<Arc<ServerResources>>,
        Path(id): Path<i64>,
    ) -> Result<Response, AppError> {
        let liquor = resources
            .database
            .get_liquor(id)
            .await
            .map_err(|e| AppError::database(e.to_string()))?
            .ok_or_else(|| AppError::not_found("Liquor"))?;

        Ok((StatusCode::OK, Json(liquor)).into_response())
    }

    /// Get a liquor by exact name
    async fn handle_get_by_name(
        State(resources): State<Arc<ServerResources>>,
        Path(name): Path<String>,
    ) -> Result<Response, AppError> {
        let liquor = resources
            .database
            .get_liquor_by_name(&name)
            .await
            .map_err(|e| AppError::database(e.to_string()))?
            .ok_or_else(|| AppError::not_found("Liquor"))?;

        Ok((StatusCode::OK, Json(liquor)).into_response())
    }
}
