// ABOUTME: User authentication route handlers for registration and login
// ABOUTME: Provides REST endpoints for account creation, token issuance, and profile lookup
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Barkeep Project

//! Authentication routes
//!
//! Registration and login issue HS256 JWTs; `/me` returns the profile of the
//! authenticated user. Handlers are thin wrappers over the database layer and
//! `AuthManager`.

use crate::auth::hash_password;
use crate::errors::AppError;
use crate::models::{User, UserProfile};
use crate::resources::ServerResources;
use crate::routes::authenticate;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{info, warn};

/// User registration request
#[derive(Debug, Clone, Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
}

/// User registration response
#[derive(Debug, Serialize)]
pub struct RegisterResponse {
    pub success: bool,
    pub message: String,
    pub user: UserProfile,
    pub token: String,
}

/// User login request
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// User login response
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub success: bool,
    pub token: String,
    pub expires_at: String,
    pub user: UserProfile,
}

/// Authentication routes implementation
pub struct AuthRoutes;

impl AuthRoutes {
    /// Create all authentication routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/register", post(Self::handle_register))
            .route("/login", post(Self::handle_login))
            .route("/me", get(Self::handle_me))
            .with_state(resources)
    }

    /// Handle user registration
    async fn handle_register(
        State(resources): State<Arc<ServerResources>>,
        Json(request): Json<RegisterRequest>,
    ) -> Result<Response, AppError> {
        if request.username.trim().is_empty()
            || request.email.trim().is_empty()
            || request.password.is_empty()
        {
            return Err(AppError::invalid_input(
                "Username, email, and password are required",
            ));
        }

        if resources
            .database
            .get_user_by_email(&request.email)
            .await
            .map_err(|e| AppError::database(e.to_string()))?
            .is_some()
        {
            warn!(email = %request.email, "registration rejected: email already registered");
            return Err(AppError::invalid_input("Email is already registered"));
        }

        if resources
            .database
            .get_user_by_username(&request.username)
            .await
            .map_err(|e| AppError::database(e.to_string()))?
            .is_some()
        {
            warn!(username = %request.username, "registration rejected: username taken");
            return Err(AppError::invalid_input("Username is already taken"));
        }

        let password_hash =
            hash_password(&request.password).map_err(|e| AppError::internal(e.to_string()))?;
        let user = User::new(request.username, request.email, password_hash);

        resources
            .database
            .create_user(&user)
            .await
            .map_err(|e| AppError::database(e.to_string()))?;

        let token = resources
            .auth_manager
            .generate_token(&user)
            .map_err(|e| AppError::internal(e.to_string()))?;

        info!(user_id = %user.id, username = %user.username, "user registered");

        let response = RegisterResponse {
            success: true,
            message: "Registration successful".into(),
            user: user.profile(),
            token,
        };

        Ok((StatusCode::CREATED, Json(response)).into_response())
    }

    /// Handle user login
    async fn handle_login(
        State(resources): State<Arc<ServerResources>>,
        Json(request): Json<LoginRequest>,
    ) -> Result<Response, AppError> {
        if request.email.trim().is_empty() || request.password.is_empty() {
            return Err(AppError::invalid_input("Email and password are required"));
        }

        // Unknown email and wrong password produce the same response
        let user = resources
            .database
            .get_user_by_email(&request.email)
            .await
            .map_err(|e| AppError::database(e.to_string()))?
            .ok_or_else(|| AppError::auth_invalid("Invalid email or password"))?;

        let password_valid = crate::auth::verify_password(&request.password, &user.password_hash)
            .map_err(|e| AppError::internal(e.to_string()))?;

        if !password_valid {
            warn!(user_id = %user.id, "login rejected: invalid password");
            return Err(AppError::auth_invalid("Invalid email or password"));
        }

        resources
            .database
            .update_last_active(user.id)
            .await
            .map_err(|e| AppError::database(e.to_string()))?;

        let token = resources
            .auth_manager
            .generate_token(&user)
            .map_err(|e| AppError::internal(e.to_string()))?;

        info!(user_id = %user.id, "user logged in");

        let response = LoginResponse {
            success: true,
            token,
            expires_at: resources.auth_manager.token_expiry().to_rfc3339(),
            user: user.profile(),
        };

        Ok((StatusCode::OK, Json(response)).into_response())
    }

    /// Handle profile lookup for the authenticated user
    async fn handle_me(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
    ) -> Result<Response, AppError> {
        let auth = authenticate(&headers, &resources)?;

        let user = resources
            .database
            .get_user(auth.user_id)
            .await
            .map_err(|e| AppError::database(e.to_string()))?
            .ok_or_else(|| AppError::not_found("User"))?;

        Ok((StatusCode::OK, Json(user.profile())).into_response())
    }
}
