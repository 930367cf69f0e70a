// ABOUTME: Route module organization for Barkeep HTTP endpoints
// ABOUTME: Provides domain routers plus shared authentication and envelope helpers
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Barkeep Project

//! Route modules for the Barkeep server
//!
//! Routes are organized by domain; handlers stay thin and delegate to the
//! database layer or the matching engine. List responses use the
//! `{ success, count, data }` envelope throughout.

/// Authentication and account routes
pub mod auth;
/// Cabinet (owned liquors) routes
pub mod cabinet;
/// Cocktail catalog routes
pub mod cocktails;
/// Health check and readiness routes
pub mod health;
/// Liquor catalog routes
pub mod liquors;
/// Achievable cocktail routes
pub mod my_cocktails;

pub use auth::AuthRoutes;
pub use cabinet::CabinetRoutes;
pub use cocktails::CocktailRoutes;
pub use health::HealthRoutes;
pub use liquors::LiquorRoutes;
pub use my_cocktails::MyCocktailRoutes;

use crate::auth::{AuthResult, JwtValidationError};
use crate::errors::AppError;
use crate::resources::ServerResources;
use axum::http::HeaderMap;
use serde::Serialize;
use std::sync::Arc;

/// Standard list envelope: `{ success, count, data }`
#[derive(Debug, Serialize)]
pub struct ListResponse<T> {
    pub success: bool,
    pub count: usize,
    pub data: Vec<T>,
}

impl<T> ListResponse<T> {
    /// Wrap a list payload in the standard envelope
    #[must_use]
    pub fn new(data: Vec<T>) -> Self {
        Self {
            success: true,
            count: data.len(),
            data,
        }
    }
}

/// Extract and authenticate the user from the authorization header
///
/// # Errors
///
/// Returns `AppError::auth_required` when the header is missing,
/// `AppError::auth_expired` when the token is valid but past its expiry,
/// and `AppError::auth_invalid` for any other validation failure.
pub(crate) fn authenticate(
    headers: &HeaderMap,
    resources: &Arc<ServerResources>,
) -> Result<AuthResult, AppError> {
    let auth_header = headers
        .get("authorization")
        .and_then(|h| h.to_str().ok())
        .ok_or_else(AppError::auth_required)?;

    resources.auth_manager.authenticate(auth_header).map_err(|e| {
        match e.downcast_ref::<JwtValidationError>() {
            Some(JwtValidationError::TokenExpired { .. }) => AppError::auth_expired(),
            _ => AppError::auth_invalid(format!("Authentication failed: {e}")),
        }
    })
}
