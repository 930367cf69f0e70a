// ABOUTME: Centralized resource container for dependency injection across routes
// ABOUTME: Holds the shared database handle, auth manager, engine, and config
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Barkeep Project

//! # Server Resources
//!
//! Centralized resource container for dependency injection. Routes receive an
//! `Arc<ServerResources>` as axum state instead of recreating expensive
//! objects per request or reaching for process-wide globals.

use crate::auth::AuthManager;
use crate::config::environment::ServerConfig;
use crate::database::Database;
use crate::matching::MatchingEngine;
use std::sync::Arc;

/// Shared server resources
#[derive(Clone)]
pub struct ServerResources {
    pub database: Arc<Database>,
    pub auth_manager: Arc<AuthManager>,
    pub engine: MatchingEngine<Database>,
    pub config: Arc<ServerConfig>,
}

impl ServerResources {
    /// Create new server resources with proper Arc sharing
    #[must_use]
    pub fn new(database: Database, auth_manager: AuthManager, config: Arc<ServerConfig>) -> Self {
        let database = Arc::new(database);
        Self {
            engine: MatchingEngine::new(Arc::clone(&database)),
            database,
            auth_manager: Arc::new(auth_manager),
            config,
        }
    }
}
