// ABOUTME: Storage abstraction consumed by the matching engine
// ABOUTME: Defines the CabinetStore trait and its SQLite implementation
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Barkeep Project

//! Cabinet store seam
//!
//! The engine never touches SQL directly; it reads the owned set, the
//! persisted achievable set, and the catalog requirements through this trait
//! and hands the delta back for an atomic apply. This keeps the matcher and
//! reconciler unit-testable without a database, and lets tests substitute a
//! failing store to exercise abort paths.

use super::reconciler::AchievableDelta;
use crate::database::Database;
use crate::models::{CocktailId, LiquorId};
use anyhow::Result;
use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use uuid::Uuid;

/// Storage operations the matching engine depends on
///
/// Implementations must make `apply_achievable_delta` atomic per user: the
/// removes and adds commit together or not at all, and overlapping applies
/// for one user are serialized.
#[async_trait]
pub trait CabinetStore: Send + Sync {
    /// Ids of all liquors the user owns
    async fn owned_liquors(&self, user_id: Uuid) -> Result<HashSet<LiquorId>>;

    /// Achievable cocktail ids as of the last reconciliation
    async fn persisted_achievable(&self, user_id: Uuid) -> Result<HashSet<CocktailId>>;

    /// Full catalog requirement mapping, unfiltered
    async fn all_cocktail_requirements(&self) -> Result<HashMap<CocktailId, HashSet<LiquorId>>>;

    /// Atomically apply a reconciliation delta for the user
    async fn apply_achievable_delta(&self, user_id: Uuid, delta: &AchievableDelta) -> Result<()>;
}

#[async_trait]
impl CabinetStore for Database {
    async fn owned_liquors(&self, user_id: Uuid) -> Result<HashSet<LiquorId>> {
        self.owned_liquor_ids(user_id).await
    }

    async fn persisted_achievable(&self, user_id: Uuid) -> Result<HashSet<CocktailId>> {
        self.persisted_achievable_ids(user_id).await
    }

    async fn all_cocktail_requirements(&self) -> Result<HashMap<CocktailId, HashSet<LiquorId>>> {
        Database::all_cocktail_requirements(self).await
    }

    async fn apply_achievable_delta(&self, user_id: Uuid, delta: &AchievableDelta) -> Result<()> {
        Database::apply_achievable_delta(self, user_id, delta).await
    }
}
