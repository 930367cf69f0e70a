// ABOUTME: HTTP server assembly and lifecycle for the Barkeep API
// ABOUTME: Composes domain routers, middleware layers, and the tokio listener
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Barkeep Project

//! HTTP server assembly
//!
//! Builds the full application router from the domain route modules and
//! serves it over a tokio TCP listener.

use crate::middleware::request_id_middleware;
use crate::resources::ServerResources;
use crate::routes::{
    AuthRoutes, CabinetRoutes, CocktailRoutes, HealthRoutes, LiquorRoutes, MyCocktailRoutes,
};
use anyhow::{Context, Result};
use axum::Router;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

/// Barkeep HTTP server
pub struct HttpServer {
    resources: Arc<ServerResources>,
}

impl HttpServer {
    /// Create a server over shared resources
    #[must_use]
    pub const fn new(resources: Arc<ServerResources>) -> Self {
        Self { resources }
    }

    /// Build the full application router
    #[must_use]
    pub fn router(&self) -> Router {
        Router::new()
            .merge(HealthRoutes::routes(Arc::clone(&self.resources)))
            .nest("/api/auth", AuthRoutes::routes(Arc::clone(&self.resources)))
            .nest(
                "/api/liquors",
                LiquorRoutes::routes(Arc::clone(&self.resources)),
            )
            .nest(
                "/api/cocktails",
                CocktailRoutes::routes(Arc::clone(&self.resources)),
            )
            .nest(
                "/api/cabinet",
                CabinetRoutes::routes(Arc::clone(&self.resources)),
            )
            .nest(
                "/api/my-cocktails",
                MyCocktailRoutes::routes(Arc::clone(&self.resources)),
            )
            .layer(axum::middleware::from_fn(request_id_middleware))
            .layer(TraceLayer::new_for_http())
            .layer(CorsLayer::permissive())
    }

    /// Serve the API until the process is stopped
    ///
    /// # Errors
    ///
    /// Returns an error when the listener cannot bind or the server fails.
    pub async fn run(&self, port: u16) -> Result<()> {
        let app = self.router();

        let listener = tokio::net::TcpListener::bind(("0.0.0.0", port))
            .await
            .with_context(|| format!("Failed to bind HTTP port {port}"))?;

        info!("Barkeep HTTP server listening on port {port}");

        axum::serve(listener, app)
            .await
            .context("HTTP server terminated unexpectedly")?;

        Ok(())
    }
}
