// ABOUTME: Shared test utilities and setup functions for integration tests
// ABOUTME: Provides common database, auth, catalog seeding, and user helpers
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Barkeep Project
#![allow(dead_code, clippy::missing_errors_doc, clippy::missing_panics_doc)]

//! Shared test utilities for Barkeep
//!
//! Common setup functions to reduce duplication across integration tests.

use anyhow::Result;
use barkeep::{
    auth::{generate_jwt_secret, hash_password, AuthManager},
    config::environment::{
        AuthConfig, DatabaseConfig, DatabaseUrl, Environment, LogLevel, ServerConfig,
    },
    database::Database,
    models::{CocktailId, LiquorId, User},
    resources::ServerResources,
};
use std::sync::{Arc, Once};

static INIT_LOGGER: Once = Once::new();

/// Initialize quiet logging for tests (call once per test process)
pub fn init_test_logging() {
    INIT_LOGGER.call_once(|| {
        let log_level = match std::env::var("TEST_LOG").as_deref() {
            Ok("TRACE") => tracing::Level::TRACE,
            Ok("DEBUG") => tracing::Level::DEBUG,
            Ok("INFO") => tracing::Level::INFO,
            _ => tracing::Level::WARN,
        };

        tracing_subscriber::fmt()
            .with_max_level(log_level)
            .with_test_writer()
            .init();
    });
}

/// Standard in-memory test database with migrations applied
pub async fn create_test_database() -> Result<Database> {
    init_test_logging();
    Database::new("sqlite::memory:").await
}

/// Create a test authentication manager with a fresh random secret
pub fn create_test_auth_manager() -> AuthManager {
    AuthManager::new(generate_jwt_secret().to_vec(), 24)
}

/// Create a test server configuration pointing at an in-memory database
pub fn create_test_config() -> Arc<ServerConfig> {
    Arc::new(ServerConfig {
        http_port: 0,
        log_level: LogLevel::Warn,
        environment: Environment::Testing,
        database: DatabaseConfig {
            url: DatabaseUrl::Memory,
            auto_migrate: true,
        },
        auth: AuthConfig {
            jwt_secret: None,
            jwt_expiry_hours: 24,
        },
    })
}

/// Complete resource setup backed by an in-memory database
pub async fn create_test_resources() -> Result<Arc<ServerResources>> {
    let database = create_test_database().await?;
    let auth_manager = create_test_auth_manager();
    Ok(Arc::new(ServerResources::new(
        database,
        auth_manager,
        create_test_config(),
    )))
}

/// Create a user directly in the database, returning the user and a valid token
pub async fn create_authenticated_user(
    resources: &ServerResources,
    username: &str,
    email: &str,
) -> Result<(User, String)> {
    let password_hash = hash_password("correct horse battery staple")?;
    let user = User::new(username.to_owned(), email.to_owned(), password_hash);
    resources.database.create_user(&user).await?;
    let token = resources.auth_manager.generate_token(&user)?;
    Ok((user, token))
}

/// Liquor and cocktail ids from the standard seeded catalog
pub struct SeededCatalog {
    pub gin: LiquorId,
    pub tonic: LiquorId,
    pub vodka: LiquorId,
    pub vermouth: LiquorId,
    pub gin_and_tonic: CocktailId,
    pub vodka_tonic: CocktailId,
    pub martini: CocktailId,
}

/// Seed a small catalog covering the matching scenarios most tests need:
/// two cocktails sharing a mixer and one unrelated recipe.
pub async fn seed_basic_catalog(database: &Database) -> Result<SeededCatalog> {
    let spirit = database.create_liquor_type("Spirit").await?;
    let mixer = database.create_liquor_type("Mixer").await?;

    let gin = database.create_liquor("Gin", Some(spirit), None).await?;
    let tonic = database
        .create_liquor("Tonic Water", Some(mixer), None)
        .await?;
    let vodka = database.create_liquor("Vodka", Some(spirit), None).await?;
    let vermouth = database
        .create_liquor("Dry Vermouth", Some(spirit), None)
        .await?;

    let gin_and_tonic = database
        .create_cocktail(
            "Gin and Tonic",
            None,
            Some("Highball"),
            Some("Build over ice, stir gently."),
            &[(gin, 2.0, "oz"), (tonic, 4.0, "oz")],
        )
        .await?;
    let vodka_tonic = database
        .create_cocktail(
            "Vodka Tonic",
            None,
            Some("Highball"),
            None,
            &[(vodka, 2.0, "oz"), (tonic, 4.0, "oz")],
        )
        .await?;
    let martini = database
        .create_cocktail(
            "Martini",
            None,
            Some("Cocktail"),
            Some("Stir with ice, strain."),
            &[(gin, 2.5, "oz"), (vermouth, 0.5, "oz")],
        )
        .await?;

    Ok(SeededCatalog {
        gin,
        tonic,
        vodka,
        vermouth,
        gin_and_tonic,
        vodka_tonic,
        martini,
    })
}
