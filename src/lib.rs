// ABOUTME: Main library entry point for the Barkeep cocktail cabinet API
// ABOUTME: Exposes the matching engine, storage layer, and HTTP surface
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Barkeep Project

#![deny(unsafe_code)]

//! # Barkeep
//!
//! A REST API backend for a cocktail cabinet application: users register,
//! maintain a personal cabinet of liquors they own, and Barkeep derives which
//! cocktails they can currently make from a fixed recipe catalog.
//!
//! ## Architecture
//!
//! - **Matching**: the core engine — a pure availability matcher plus a
//!   reconciler that keeps the persisted achievable set in sync
//! - **Database**: SQLite storage for users, catalog, and cabinet state
//! - **Routes**: axum HTTP surface organized by domain
//! - **Auth**: JWT token issuance and validation, bcrypt password hashing
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use barkeep::config::environment::ServerConfig;
//!
//! # fn main() -> anyhow::Result<()> {
//! let config = ServerConfig::from_env()?;
//! println!("Barkeep configured for HTTP port {}", config.http_port);
//! # Ok(())
//! # }
//! ```

/// Authentication and session management
pub mod auth;

/// Configuration management
pub mod config;

/// SQLite persistence layer
pub mod database;

/// Unified error handling
pub mod errors;

/// Logging configuration
pub mod logging;

/// Cabinet-to-cocktail matching and reconciliation engine
pub mod matching;

/// HTTP middleware
pub mod middleware;

/// Core data models
pub mod models;

/// Shared resource container for dependency injection
pub mod resources;

/// HTTP routes organized by domain
pub mod routes;

/// HTTP server assembly
pub mod server;
