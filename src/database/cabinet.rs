// ABOUTME: Per-user cabinet and achievable-cocktail persistence
// ABOUTME: Owns user_liquors and user_cocktails reads plus the atomic delta apply
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Barkeep Project

//! Cabinet and achievable-cocktail queries
//!
//! The `user_cocktails` table is a materialized view of the matcher output,
//! never a source of truth; the reconciler keeps it in sync through
//! [`Database::apply_achievable_delta`].

use super::Database;
use crate::matching::AchievableDelta;
use crate::models::{AchievableCocktail, CabinetEntry, CocktailId, LiquorId};
use anyhow::Result;
use chrono::{DateTime, Utc};
use sqlx::Row;
use std::collections::HashSet;
use uuid::Uuid;

impl Database {
    // ================================
    // Cabinet (owned liquors)
    // ================================

    /// List the user's cabinet with liquor details, ordered by liquor name
    ///
    /// # Errors
    ///
    /// Returns an error on query failure.
    pub async fn list_cabinet(&self, user_id: Uuid) -> Result<Vec<CabinetEntry>> {
        let rows = sqlx::query(
            r"
            SELECT l.id, l.liquor_name, l.type_id, l.image_url, t.type_name, ul.added_at
            FROM liquors l
            JOIN user_liquors ul ON ul.liquor_id = l.id
            LEFT JOIN liquor_types t ON l.type_id = t.id
            WHERE ul.user_id = ?1
            ORDER BY l.liquor_name
            ",
        )
        .bind(user_id.to_string())
        .fetch_all(self.pool())
        .await?;

        rows.iter()
            .map(|row| {
                let added_at: String = row.try_get("added_at")?;
                Ok(CabinetEntry {
                    liquor: Self::row_to_liquor(row)?,
                    added_at: DateTime::parse_from_rfc3339(&added_at)?.with_timezone(&Utc),
                })
            })
            .collect()
    }

    /// Ids of all liquors the user owns
    ///
    /// # Errors
    ///
    /// Returns an error on query failure.
    pub async fn owned_liquor_ids(&self, user_id: Uuid) -> Result<HashSet<LiquorId>> {
        let rows = sqlx::query("SELECT liquor_id FROM user_liquors WHERE user_id = ?1")
            .bind(user_id.to_string())
            .fetch_all(self.pool())
            .await?;

        rows.iter()
            .map(|row| Ok(row.try_get("liquor_id")?))
            .collect()
    }

    /// Add a liquor to the user's cabinet
    ///
    /// Idempotent: adding an already-owned liquor is a successful no-op.
    /// Returns whether the cabinet actually changed.
    ///
    /// # Errors
    ///
    /// Returns an error on query failure.
    pub async fn add_liquor_to_cabinet(&self, user_id: Uuid, liquor_id: LiquorId) -> Result<bool> {
        let result = sqlx::query(
            "INSERT OR IGNORE INTO user_liquors (user_id, liquor_id, added_at) \
             VALUES (?1, ?2, ?3)",
        )
        .bind(user_id.to_string())
        .bind(liquor_id)
        .bind(Utc::now().to_rfc3339())
        .execute(self.pool())
        .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Remove a liquor from the user's cabinet
    ///
    /// Returns whether the liquor was present.
    ///
    /// # Errors
    ///
    /// Returns an error on query failure.
    pub async fn remove_liquor_from_cabinet(
        &self,
        user_id: Uuid,
        liquor_id: LiquorId,
    ) -> Result<bool> {
        let result = sqlx::query("DELETE FROM user_liquors WHERE user_id = ?1 AND liquor_id = ?2")
            .bind(user_id.to_string())
            .bind(liquor_id)
            .execute(self.pool())
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Check whether a liquor is in the user's cabinet
    ///
    /// # Errors
    ///
    /// Returns an error on query failure.
    pub async fn is_liquor_in_cabinet(&self, user_id: Uuid, liquor_id: LiquorId) -> Result<bool> {
        let row = sqlx::query("SELECT id FROM user_liquors WHERE user_id = ?1 AND liquor_id = ?2")
            .bind(user_id.to_string())
            .bind(liquor_id)
            .fetch_optional(self.pool())
            .await?;

        Ok(row.is_some())
    }

    // ================================
    // Achievable cocktails
    // ================================

    /// Ids of the cocktails recorded as achievable at last reconciliation
    ///
    /// # Errors
    ///
    /// Returns an error on query failure.
    pub async fn persisted_achievable_ids(&self, user_id: Uuid) -> Result<HashSet<CocktailId>> {
        let rows = sqlx::query("SELECT cocktail_id FROM user_cocktails WHERE user_id = ?1")
            .bind(user_id.to_string())
            .fetch_all(self.pool())
            .await?;

        rows.iter()
            .map(|row| Ok(row.try_get("cocktail_id")?))
            .collect()
    }

    /// The user's achievable cocktails with full recipe details
    ///
    /// # Errors
    ///
    /// Returns an error on query failure.
    pub async fn list_achievable_cocktails(
        &self,
        user_id: Uuid,
    ) -> Result<Vec<AchievableCocktail>> {
        let rows = sqlx::query(
            r"
            SELECT c.id, c.cocktail_name, c.image_url, c.glass_type, c.instructions,
                   uc.discovered_at
            FROM cocktails c
            JOIN user_cocktails uc ON uc.cocktail_id = c.id
            WHERE uc.user_id = ?1
            ORDER BY c.cocktail_name
            ",
        )
        .bind(user_id.to_string())
        .fetch_all(self.pool())
        .await?;

        let mut cocktails = Vec::with_capacity(rows.len());
        for row in &rows {
            let discovered_at: String = row.try_get("discovered_at")?;
            cocktails.push(AchievableCocktail {
                cocktail: self.row_to_cocktail(row).await?,
                discovered_at: DateTime::parse_from_rfc3339(&discovered_at)?.with_timezone(&Utc),
            });
        }

        Ok(cocktails)
    }

    /// Apply a reconciliation delta to the user's achievable set
    ///
    /// The removes and adds run in one transaction: either the whole delta
    /// commits or nothing does, so concurrent readers never observe a
    /// partially-updated achievable set. SQLite's single-writer model
    /// serializes overlapping applies for the same user.
    ///
    /// # Errors
    ///
    /// Returns an error on query failure; the transaction rolls back.
    pub async fn apply_achievable_delta(
        &self,
        user_id: Uuid,
        delta: &AchievableDelta,
    ) -> Result<()> {
        let mut tx = self.pool().begin().await?;
        let now = Utc::now().to_rfc3339();

        for cocktail_id in &delta.to_remove {
            sqlx::query("DELETE FROM user_cocktails WHERE user_id = ?1 AND cocktail_id = ?2")
                .bind(user_id.to_string())
                .bind(cocktail_id)
                .execute(&mut *tx)
                .await?;
        }

        for cocktail_id in &delta.to_add {
            sqlx::query(
                "INSERT OR IGNORE INTO user_cocktails (user_id, cocktail_id, discovered_at) \
                 VALUES (?1, ?2, ?3)",
            )
            .bind(user_id.to_string())
            .bind(cocktail_id)
            .bind(&now)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;

        Ok(())
    }
}
