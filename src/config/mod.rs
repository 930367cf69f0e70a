// ABOUTME: Configuration module organization for the Barkeep server
// ABOUTME: Exposes environment-based runtime configuration
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Barkeep Project

//! Configuration management for the Barkeep server

/// Environment-based runtime configuration
pub mod environment;

pub use environment::{AuthConfig, DatabaseConfig, DatabaseUrl, Environment, LogLevel, ServerConfig};
