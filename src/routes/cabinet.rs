// ABOUTME: Cabinet route handlers for managing a user's owned liquors
// ABOUTME: Mutations reconcile the achievable cocktail set inline
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Barkeep Project

//! Cabinet routes (authenticated)
//!
//! Adding or removing a liquor changes which cocktails the user can make, so
//! every cabinet mutation runs a reconciliation before responding. Add is
//! idempotent: re-adding an owned liquor succeeds without changing anything.

use crate::errors::AppError;
use crate::models::{LiquorId, LiquorWithStatus};
use crate::resources::ServerResources;
use crate::routes::{authenticate, ListResponse};
use axum::extract::{Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::info;

/// Add/remove request addressing a liquor by id
#[derive(Debug, Deserialize)]
pub struct LiquorIdRequest {
    pub liquor_id: LiquorId,
}

/// Add request addressing a liquor by exact name
#[derive(Debug, Deserialize)]
pub struct LiquorNameRequest {
    pub name: String,
}

/// Query parameters for liquor search
#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    pub q: String,
}

/// Response for cabinet mutations, including the reconciliation outcome
#[derive(Debug, Serialize)]
pub struct CabinetMutationResponse {
    pub success: bool,
    pub message: String,
    /// Cocktails that became makeable as a result of this mutation
    pub cocktails_added: usize,
    /// Cocktails that stopped being makeable
    pub cocktails_removed: usize,
}

/// Cabinet routes implementation
pub struct CabinetRoutes;

impl CabinetRoutes {
    /// Create all cabinet routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/", get(Self::handle_list))
            .route("/all", get(Self::handle_all_with_status))
            .route("/search", get(Self::handle_search))
            .route("/add", post(Self::handle_add))
            .route("/add-by-name", post(Self::handle_add_by_name))
            .route("/remove", post(Self::handle_remove))
            .with_state(resources)
    }

    /// List the user's cabinet
    async fn handle_list(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
    ) -> Result<Response, AppError> {
        let auth = authenticate(&headers, &resources)?;

        let entries = resources
            .database
            .list_cabinet(auth.user_id)
            .await
            .map_err(|e| AppError::database(e.to_string()).with_user_id(auth.user_id))?;

        Ok((StatusCode::OK, Json(ListResponse::new(entries))).into_response())
    }

    /// List all liquors flagged with cabinet membership
    async fn handle_all_with_status(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
    ) -> Result<Response, AppError> {
        let auth = authenticate(&headers, &resources)?;

        let liquors = resources
            .database
            .list_liquors()
            .await
            .map_err(|e| AppError::database(e.to_string()))?;
        let owned = resources
            .database
            .owned_liquor_ids(auth.user_id)
            .await
            .map_err(|e| AppError::database(e.to_string()).with_user_id(auth.user_id))?;

        let flagged: Vec<LiquorWithStatus> = liquors
            .into_iter()
            .map(|liquor| LiquorWithStatus {
                in_cabinet: owned.contains(&liquor.id),
                liquor,
            })
            .collect();

        Ok((StatusCode::OK, Json(ListResponse::new(flagged))).into_response())
    }

    /// Search liquors by name, flagged with cabinet membership
    async fn handle_search(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Query(params): Query<SearchQuery>,
    ) -> Result<Response, AppError> {
        let auth = authenticate(&headers, &resources)?;

        let liquors = resources
            .database
            .search_liquors(&params.q)
            .await
            .map_err(|e| AppError::database(e.to_string()))?;
        let owned = resources
            .database
            .owned_liquor_ids(auth.user_id)
            .await
            .map_err(|e| AppError::database(e.to_string()).with_user_id(auth.user_id))?;

        let flagged: Vec<LiquorWithStatus> = liquors
            .into_iter()
            .map(|liquor| LiquorWithStatus {
                in_cabinet: owned.contains(&liquor.id),
                liquor,
            })
            .collect();

        Ok((StatusCode::OK, Json(ListResponse::new(flagged))).into_response())
    }

    /// Add a liquor to the cabinet by id
    async fn handle_add(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Json(request): Json<LiquorIdRequest>,
    ) -> Result<Response, AppError> {
        let auth = authenticate(&headers, &resources)?;
        Self::add_and_reconcile(&resources, auth.user_id, request.liquor_id).await
    }

    /// Add a liquor to the cabinet by exact name
    async fn handle_add_by_name(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Json(request): Json<LiquorNameRequest>,
    ) -> Result<Response, AppError> {
        let auth = authenticate(&headers, &resources)?;

        let liquor = resources
            .database
            .get_liquor_by_name(&request.name)
            .await
            .map_err(|e| AppError::database(e.to_string()))?
            .ok_or_else(|| AppError::not_found("Liquor"))?;

        Self::add_and_reconcile(&resources, auth.user_id, liquor.id).await
    }

    /// Remove a liquor from the cabinet
    async fn handle_remove(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Json(request): Json<LiquorIdRequest>,
    ) -> Result<Response, AppError> {
        let auth = authenticate(&headers, &resources)?;

        let removed = resources
            .database
            .remove_liquor_from_cabinet(auth.user_id, request.liquor_id)
            .await
            .map_err(|e| AppError::database(e.to_string()).with_user_id(auth.user_id))?;

        if !removed {
            return Err(AppError::not_found("Liquor in cabinet"));
        }

        let summary = resources.engine.refresh_achievable(auth.user_id).await?;

        info!(
            user_id = %auth.user_id,
            liquor_id = request.liquor_id,
            "liquor removed from cabinet"
        );

        let response = CabinetMutationResponse {
            success: true,
            message: "Liquor removed from your cabinet".into(),
            cocktails_added: summary.added,
            cocktails_removed: summary.removed,
        };

        Ok((StatusCode::OK, Json(response)).into_response())
    }

    /// Shared add path: validate the liquor exists, insert, reconcile
    async fn add_and_reconcile(
        resources: &Arc<ServerResources>,
        user_id: uuid::Uuid,
        liquor_id: LiquorId,
    ) -> Result<Response, AppError> {
        let liquor = resources
            .database
            .get_liquor(liquor_id)
            .await
            .map_err(|e| AppError::database(e.to_string()))?
            .ok_or_else(|| AppError::not_found("Liquor"))?;

        resources
            .database
            .add_liquor_to_cabinet(user_id, liquor_id)
            .await
            .map_err(|e| AppError::database(e.to_string()).with_user_id(user_id))?;

        let summary = resources.engine.refresh_achievable(user_id).await?;

        info!(%user_id, liquor_id, liquor_name = %liquor.name, "liquor added to cabinet");

        let response = CabinetMutationResponse {
            success: true,
            message: format!("{} added to your cabinet", liquor.name),
            cocktails_added: summary.added,
            cocktails_removed: summary.removed,
        };

        Ok((StatusCode::OK, Json(response)).into_response())
    }
}
