// ABOUTME: Catalog queries for liquor and cocktail reference data
// ABOUTME: Provides reads for routes plus the requirement mapping used by the matcher
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Barkeep Project

//! Liquor and cocktail catalog queries
//!
//! The catalog is shared read-only reference data; writes happen only through
//! the seeding helpers used by the `seed-catalog` binary and tests.

use super::Database;
use crate::models::{Cocktail, CocktailId, CocktailIngredient, Liquor, LiquorId, LiquorType};
use anyhow::Result;
use sqlx::Row;
use std::collections::{HashMap, HashSet};

impl Database {
    // ================================
    // Liquors
    // ================================

    /// List the full liquor catalog with resolved type names, ordered by name
    ///
    /// # Errors
    ///
    /// Returns an error on query failure.
    pub async fn list_liquors(&self) -> Result<Vec<Liquor>> {
        let rows = sqlx::query(
            r"
            SELECT l.id, l.liquor_name, l.type_id, l.image_url, t.type_name
            FROM liquors l
            LEFT JOIN liquor_types t ON l.type_id = t.id
            ORDER BY l.liquor_name
            ",
        )
        .fetch_all(self.pool())
        .await?;

        rows.iter().map(Self::row_to_liquor).collect()
    }

    /// Get a liquor by id
    ///
    /// # Errors
    ///
    /// Returns an error on query failure.
    pub async fn get_liquor(&self, liquor_id: LiquorId) -> Result<Option<Liquor>> {
        let row = sqlx::query(
            r"
            SELECT l.id, l.liquor_name, l.type_id, l.image_url, t.type_name
            FROM liquors l
            LEFT JOIN liquor_types t ON l.type_id = t.id
            WHERE l.id = ?1
            ",
        )
        .bind(liquor_id)
        .fetch_optional(self.pool())
        .await?;

        row.map(|row| Self::row_to_liquor(&row)).transpose()
    }

    /// Get a liquor by exact name
    ///
    /// # Errors
    ///
    /// Returns an error on query failure.
    pub async fn get_liquor_by_name(&self, name: &str) -> Result<Option<Liquor>> {
        let row = sqlx::query(
            r"
            SELECT l.id, l.liquor_name, l.type_id, l.image_url, t.type_name
            FROM liquors l
            LEFT JOIN liquor_types t ON l.type_id = t.id
            WHERE l.liquor_name = ?1
            LIMIT 1
            ",
        )
        .bind(name)
        .fetch_optional(self.pool())
        .await?;

        row.map(|row| Self::row_to_liquor(&row)).transpose()
    }

    /// Search liquors by name substring, ordered by name
    ///
    /// # Errors
    ///
    /// Returns an error on query failure.
    pub async fn search_liquors(&self, query: &str) -> Result<Vec<Liquor>> {
        let pattern = format!("%{}%", query.replace('%', "\\%").replace('_', "\\_"));
        let rows = sqlx::query(
            r"
            SELECT l.id, l.liquor_name, l.type_id, l.image_url, t.type_name
            FROM liquors l
            LEFT JOIN liquor_types t ON l.type_id = t.id
            WHERE l.liquor_name LIKE ?1 ESCAPE '\'
            ORDER BY l.liquor_name
            ",
        )
        .bind(pattern)
        .fetch_all(self.pool())
        .await?;

        rows.iter().map(Self::row_to_liquor).collect()
    }

    /// List all liquor types, ordered by name
    ///
    /// # Errors
    ///
    /// Returns an error on query failure.
    pub async fn list_liquor_types(&self) -> Result<Vec<LiquorType>> {
        let rows = sqlx::query("SELECT id, type_name FROM liquor_types ORDER BY type_name")
            .fetch_all(self.pool())
            .await?;

        rows.iter()
            .map(|row| {
                Ok(LiquorType {
                    id: row.try_get("id")?,
                    type_name: row.try_get("type_name")?,
                })
            })
            .collect()
    }

    // ================================
    // Cocktails
    // ================================

    /// List the full cocktail catalog with ingredients, ordered by name
    ///
    /// # Errors
    ///
    /// Returns an error on query failure.
    pub async fn list_cocktails(&self) -> Result<Vec<Cocktail>> {
        let rows = sqlx::query(
            "SELECT id, cocktail_name, image_url, glass_type, instructions \
             FROM cocktails ORDER BY cocktail_name",
        )
        .fetch_all(self.pool())
        .await?;

        let mut cocktails = Vec::with_capacity(rows.len());
        for row in &rows {
            cocktails.push(self.row_to_cocktail(row).await?);
        }

        Ok(cocktails)
    }

    /// Get a cocktail by id with ingredients
    ///
    /// # Errors
    ///
    /// Returns an error on query failure.
    pub async fn get_cocktail(&self, cocktail_id: CocktailId) -> Result<Option<Cocktail>> {
        let row = sqlx::query(
            "SELECT id, cocktail_name, image_url, glass_type, instructions \
             FROM cocktails WHERE id = ?1",
        )
        .bind(cocktail_id)
        .fetch_optional(self.pool())
        .await?;

        match row {
            Some(row) => Ok(Some(self.row_to_cocktail(&row).await?)),
            None => Ok(None),
        }
    }

    /// Full requirement mapping for the availability matcher
    ///
    /// Reflects the entire catalog with no filtering; a cocktail with no
    /// ingredient rows appears with an empty requirement set so the matcher
    /// can flag it instead of it vanishing silently.
    ///
    /// # Errors
    ///
    /// Returns an error on query failure; never returns partial results.
    pub async fn all_cocktail_requirements(
        &self,
    ) -> Result<HashMap<CocktailId, HashSet<LiquorId>>> {
        let rows = sqlx::query(
            r"
            SELECT c.id AS cocktail_id, ci.liquor_id
            FROM cocktails c
            LEFT JOIN cocktail_ingredients ci ON ci.cocktail_id = c.id
            ",
        )
        .fetch_all(self.pool())
        .await?;

        let mut requirements: HashMap<CocktailId, HashSet<LiquorId>> = HashMap::new();
        for row in &rows {
            let cocktail_id: CocktailId = row.try_get("cocktail_id")?;
            let liquor_id: Option<LiquorId> = row.try_get("liquor_id")?;

            let entry = requirements.entry(cocktail_id).or_default();
            if let Some(liquor_id) = liquor_id {
                entry.insert(liquor_id);
            }
        }

        Ok(requirements)
    }

    // ================================
    // Catalog seeding
    // ================================

    /// Insert a liquor type, returning its id (existing id when already present)
    ///
    /// # Errors
    ///
    /// Returns an error on query failure.
    pub async fn create_liquor_type(&self, type_name: &str) -> Result<i64> {
        if let Some(row) = sqlx::query("SELECT id FROM liquor_types WHERE type_name = ?1")
            .bind(type_name)
            .fetch_optional(self.pool())
            .await?
        {
            return Ok(row.try_get("id")?);
        }

        let result = sqlx::query("INSERT INTO liquor_types (type_name) VALUES (?1)")
            .bind(type_name)
            .execute(self.pool())
            .await?;

        Ok(result.last_insert_rowid())
    }

    /// Insert a liquor, returning its id
    ///
    /// # Errors
    ///
    /// Returns an error on query failure (including duplicate names).
    pub async fn create_liquor(
        &self,
        name: &str,
        type_id: Option<i64>,
        image_url: Option<&str>,
    ) -> Result<LiquorId> {
        let result =
            sqlx::query("INSERT INTO liquors (liquor_name, type_id, image_url) VALUES (?1, ?2, ?3)")
                .bind(name)
                .bind(type_id)
                .bind(image_url)
                .execute(self.pool())
                .await?;

        Ok(result.last_insert_rowid())
    }

    /// Insert a cocktail with its ingredient list, returning its id
    ///
    /// The cocktail row and all ingredient rows commit as one transaction so
    /// the catalog never holds a cocktail with a partially written recipe.
    ///
    /// # Errors
    ///
    /// Returns an error on query failure (including duplicate names and
    /// unknown liquor ids).
    pub async fn create_cocktail(
        &self,
        name: &str,
        image_url: Option<&str>,
        glass_type: Option<&str>,
        instructions: Option<&str>,
        ingredients: &[(LiquorId, f64, &str)],
    ) -> Result<CocktailId> {
        let mut tx = self.pool().begin().await?;

        let result = sqlx::query(
            "INSERT INTO cocktails (cocktail_name, image_url, glass_type, instructions) \
             VALUES (?1, ?2, ?3, ?4)",
        )
        .bind(name)
        .bind(image_url)
        .bind(glass_type)
        .bind(instructions)
        .execute(&mut *tx)
        .await?;
        let cocktail_id = result.last_insert_rowid();

        for (liquor_id, amount, unit) in ingredients {
            sqlx::query(
                "INSERT INTO cocktail_ingredients (cocktail_id, liquor_id, amount, unit) \
                 VALUES (?1, ?2, ?3, ?4)",
            )
            .bind(cocktail_id)
            .bind(liquor_id)
            .bind(amount)
            .bind(unit)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;

        Ok(cocktail_id)
    }

    // ================================
    // Row mapping
    // ================================

    pub(super) fn row_to_liquor(row: &sqlx::sqlite::SqliteRow) -> Result<Liquor> {
        Ok(Liquor {
            id: row.try_get("id")?,
            name: row.try_get("liquor_name")?,
            type_id: row.try_get("type_id")?,
            type_name: row.try_get("type_name")?,
            image_url: row.try_get("image_url")?,
        })
    }

    pub(super) async fn row_to_cocktail(&self, row: &sqlx::sqlite::SqliteRow) -> Result<Cocktail> {
        let id: CocktailId = row.try_get("id")?;

        Ok(Cocktail {
            id,
            name: row.try_get("cocktail_name")?,
            image_url: row.try_get("image_url")?,
            glass_type: row.try_get("glass_type")?,
            instructions: row.try_get("instructions")?,
            ingredients: self.cocktail_ingredients(id).await?,
        })
    }

    pub(super) async fn cocktail_ingredients(
        &self,
        cocktail_id: CocktailId,
    ) -> Result<Vec<CocktailIngredient>> {
        let rows = sqlx::query(
            r"
            SELECT ci.liquor_id, l.liquor_name, ci.amount, ci.unit
            FROM cocktail_ingredients ci
            JOIN liquors l ON l.id = ci.liquor_id
            WHERE ci.cocktail_id = ?1
            ORDER BY ci.id
            ",
        )
        .bind(cocktail_id)
        .fetch_all(self.pool())
        .await?;

        rows.iter()
            .map(|row| {
                Ok(CocktailIngredient {
                    liquor_id: row.try_get("liquor_id")?,
                    liquor_name: row.try_get("liquor_name")?,
                    amount: row.try_get("amount")?,
                    unit: row.try_get("unit")?,
                })
            })
            .collect()
    }
}
