// ABOUTME: Core data models for the Barkeep cocktail cabinet API
// ABOUTME: Defines User, Liquor, Cocktail and the cabinet/achievable view types
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Barkeep Project

//! # Data Models
//!
//! Core data structures used throughout the Barkeep server.
//!
//! ## Design Principles
//!
//! - **Id-based matching**: cocktail requirements reference liquors by id, never
//!   by display name
//! - **Serializable**: all models support JSON serialization for the REST API
//! - **Display-only measurements**: ingredient amounts and units are carried
//!   through for presentation and play no role in availability matching

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Identifier for a liquor in the catalog
pub type LiquorId = i64;

/// Identifier for a cocktail in the catalog
pub type CocktailId = i64;

/// A registered user account
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    /// Unique user identifier
    pub id: Uuid,
    /// Unique display handle
    pub username: String,
    /// User email address (used for login)
    pub email: String,
    /// Hashed password for authentication
    #[serde(skip_serializing)]
    pub password_hash: String,
    /// When the user account was created
    pub created_at: DateTime<Utc>,
    /// Last time user accessed the system
    pub last_active: DateTime<Utc>,
}

impl User {
    /// Create a new user with a generated id
    #[must_use]
    pub fn new(username: String, email: String, password_hash: String) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            username,
            email,
            password_hash,
            created_at: now,
            last_active: now,
        }
    }

    /// Public profile view (no credential material)
    #[must_use]
    pub fn profile(&self) -> UserProfile {
        UserProfile {
            id: self.id,
            username: self.username.clone(),
            email: self.email.clone(),
            created_at: self.created_at,
        }
    }
}

/// User profile returned by the API
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
}

/// A liquor category (gin, whiskey, liqueur, ...)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LiquorType {
    pub id: i64,
    pub type_name: String,
}

/// A liquor in the reference catalog
///
/// Immutable reference data; created only by catalog seeding.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Liquor {
    pub id: LiquorId,
    pub name: String,
    /// Category, when the catalog assigns one
    pub type_id: Option<i64>,
    /// Resolved category name for display
    pub type_name: Option<String>,
    pub image_url: Option<String>,
}

/// A liquor annotated with whether the requesting user owns it
#[derive(Debug, Clone, Serialize)]
pub struct LiquorWithStatus {
    #[serde(flatten)]
    pub liquor: Liquor,
    pub in_cabinet: bool,
}

/// A liquor in a user's cabinet
#[derive(Debug, Clone, Serialize)]
pub struct CabinetEntry {
    #[serde(flatten)]
    pub liquor: Liquor,
    /// When the user added this liquor to their cabinet
    pub added_at: DateTime<Utc>,
}

/// One required ingredient of a cocktail
///
/// The amount and unit are display data only; matching uses `liquor_id`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CocktailIngredient {
    pub liquor_id: LiquorId,
    pub liquor_name: String,
    pub amount: f64,
    pub unit: String,
}

impl CocktailIngredient {
    /// Human-readable ingredient line, e.g. "1.5 oz Gin"
    #[must_use]
    pub fn display_line(&self) -> String {
        format!("{} {} {}", self.amount, self.unit, self.liquor_name)
    }
}

/// A cocktail recipe in the reference catalog
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Cocktail {
    pub id: CocktailId,
    pub name: String,
    pub image_url: Option<String>,
    pub glass_type: Option<String>,
    pub instructions: Option<String>,
    /// Ordered ingredient list as stored in the catalog
    pub ingredients: Vec<CocktailIngredient>,
}

impl Cocktail {
    /// Formatted ingredient lines for display
    #[must_use]
    pub fn ingredient_lines(&self) -> Vec<String> {
        self.ingredients
            .iter()
            .map(CocktailIngredient::display_line)
            .collect()
    }
}

/// A cocktail the user can currently make, as persisted at last reconciliation
#[derive(Debug, Clone, Serialize)]
pub struct AchievableCocktail {
    #[serde(flatten)]
    pub cocktail: Cocktail,
    /// When the reconciler first recorded this cocktail as makeable
    pub discovered_at: DateTime<Utc>,
}
