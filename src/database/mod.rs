// ABOUTME: SQLite persistence layer for users, catalog, and cabinet state
// ABOUTME: Owns the connection pool, schema migrations, and user account queries
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Barkeep Project

//! # Database Layer
//!
//! SQLite-backed storage for the Barkeep server. The `Database` handle is
//! cheap to clone (it wraps a connection pool) and is injected into routes
//! and the matching engine rather than held as a process-wide global.
//!
//! Queries are split by domain:
//! - this module: pool, migrations, user accounts
//! - [`catalog`]: liquor and cocktail reference data
//! - [`cabinet`]: per-user owned liquors and achievable cocktails

pub mod cabinet;
pub mod catalog;

use crate::models::User;
use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use sqlx::{Row, SqlitePool};
use uuid::Uuid;

/// SQLite database handle
#[derive(Clone)]
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    /// Create a new database connection pool and run migrations
    ///
    /// # Errors
    ///
    /// Returns an error when the pool cannot be created or migrations fail.
    pub async fn new(database_url: &str) -> Result<Self> {
        let db = Self::connect(database_url).await?;
        db.migrate().await?;
        Ok(db)
    }

    /// Create a connection pool without running migrations
    ///
    /// # Errors
    ///
    /// Returns an error when the pool cannot be created.
    pub async fn connect(database_url: &str) -> Result<Self> {
        // Ensure SQLite creates the database file if it doesn't exist
        let connection_options = if database_url.starts_with("sqlite:")
            && !database_url.contains(":memory:")
        {
            format!("{database_url}?mode=rwc")
        } else {
            database_url.to_owned()
        };

        let pool = SqlitePool::connect(&connection_options)
            .await
            .context("Failed to connect to database")?;

        // Cascade deletes on user removal depend on this pragma
        sqlx::query("PRAGMA foreign_keys = ON")
            .execute(&pool)
            .await?;

        Ok(Self { pool })
    }

    /// Access the underlying pool
    #[must_use]
    pub const fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Human-readable backend description for startup logging
    #[must_use]
    pub const fn backend_info(&self) -> &'static str {
        "SQLite"
    }

    /// Check database connectivity (used by the readiness endpoint)
    ///
    /// # Errors
    ///
    /// Returns an error when the database is unreachable.
    pub async fn ping(&self) -> Result<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    /// Run database migrations
    ///
    /// # Errors
    ///
    /// Returns an error when a schema statement fails.
    pub async fn migrate(&self) -> Result<()> {
        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS users (
                id TEXT PRIMARY KEY,
                username TEXT UNIQUE NOT NULL,
                email TEXT UNIQUE NOT NULL,
                password_hash TEXT NOT NULL,
                created_at TEXT NOT NULL,
                last_active TEXT NOT NULL
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS liquor_types (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                type_name TEXT UNIQUE NOT NULL
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS liquors (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                liquor_name TEXT UNIQUE NOT NULL,
                type_id INTEGER REFERENCES liquor_types(id),
                image_url TEXT
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS cocktails (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                cocktail_name TEXT UNIQUE NOT NULL,
                image_url TEXT,
                glass_type TEXT,
                instructions TEXT
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS cocktail_ingredients (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                cocktail_id INTEGER NOT NULL REFERENCES cocktails(id) ON DELETE CASCADE,
                liquor_id INTEGER NOT NULL REFERENCES liquors(id),
                amount REAL NOT NULL,
                unit TEXT NOT NULL,
                UNIQUE(cocktail_id, liquor_id)
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS user_liquors (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                user_id TEXT NOT NULL REFERENCES users(id) ON DELETE CASCADE,
                liquor_id INTEGER NOT NULL REFERENCES liquors(id) ON DELETE CASCADE,
                added_at TEXT NOT NULL,
                UNIQUE(user_id, liquor_id)
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS user_cocktails (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                user_id TEXT NOT NULL REFERENCES users(id) ON DELETE CASCADE,
                cocktail_id INTEGER NOT NULL REFERENCES cocktails(id) ON DELETE CASCADE,
                discovered_at TEXT NOT NULL,
                UNIQUE(user_id, cocktail_id)
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    // ================================
    // User Management
    // ================================

    /// Create a new user account
    ///
    /// # Errors
    ///
    /// Returns an error when the insert fails (including unique-constraint
    /// violations on username or email).
    pub async fn create_user(&self, user: &User) -> Result<Uuid> {
        sqlx::query(
            r"
            INSERT INTO users (id, username, email, password_hash, created_at, last_active)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6)
            ",
        )
        .bind(user.id.to_string())
        .bind(&user.username)
        .bind(&user.email)
        .bind(&user.password_hash)
        .bind(user.created_at.to_rfc3339())
        .bind(user.last_active.to_rfc3339())
        .execute(&self.pool)
        .await?;

        Ok(user.id)
    }

    /// Get user by ID
    ///
    /// # Errors
    ///
    /// Returns an error on query failure or unparseable stored data.
    pub async fn get_user(&self, user_id: Uuid) -> Result<Option<User>> {
        let row = sqlx::query("SELECT * FROM users WHERE id = ?1")
            .bind(user_id.to_string())
            .fetch_optional(&self.pool)
            .await?;

        row.map(|row| Self::row_to_user(&row)).transpose()
    }

    /// Get user by email address
    ///
    /// # Errors
    ///
    /// Returns an error on query failure or unparseable stored data.
    pub async fn get_user_by_email(&self, email: &str) -> Result<Option<User>> {
        let row = sqlx::query("SELECT * FROM users WHERE email = ?1")
            .bind(email)
            .fetch_optional(&self.pool)
            .await?;

        row.map(|row| Self::row_to_user(&row)).transpose()
    }

    /// Get user by username
    ///
    /// # Errors
    ///
    /// Returns an error on query failure or unparseable stored data.
    pub async fn get_user_by_username(&self, username: &str) -> Result<Option<User>> {
        let row = sqlx::query("SELECT * FROM users WHERE username = ?1")
            .bind(username)
            .fetch_optional(&self.pool)
            .await?;

        row.map(|row| Self::row_to_user(&row)).transpose()
    }

    /// Update user's last active timestamp
    ///
    /// # Errors
    ///
    /// Returns an error on query failure.
    pub async fn update_last_active(&self, user_id: Uuid) -> Result<()> {
        sqlx::query("UPDATE users SET last_active = ?1 WHERE id = ?2")
            .bind(Utc::now().to_rfc3339())
            .bind(user_id.to_string())
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    /// Delete a user account; cabinet and achievable state cascade
    ///
    /// # Errors
    ///
    /// Returns an error on query failure.
    pub async fn delete_user(&self, user_id: Uuid) -> Result<bool> {
        let result = sqlx::query("DELETE FROM users WHERE id = ?1")
            .bind(user_id.to_string())
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    fn row_to_user(row: &sqlx::sqlite::SqliteRow) -> Result<User> {
        let id: String = row.try_get("id")?;
        let created_at: String = row.try_get("created_at")?;
        let last_active: String = row.try_get("last_active")?;

        Ok(User {
            id: Uuid::parse_str(&id)?,
            username: row.try_get("username")?,
            email: row.try_get("email")?,
            password_hash: row.try_get("password_hash")?,
            created_at: DateTime::parse_from_rfc3339(&created_at)?.with_timezone(&Utc),
            last_active: DateTime::parse_from_rfc3339(&last_active)?.with_timezone(&Utc),
        })
    }
}
