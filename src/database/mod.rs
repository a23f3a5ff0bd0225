// ABOUTME: Database connection management and schema migration
// ABOUTME: Wraps a SQLite pool behind the Database handle passed to every operation
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Async-IO.org

//! # Database Management
//!
//! This module provides the persistence layer for the exercise tracker.
//! Users are stored as one row per user with the exercise log embedded as a
//! JSON array column, mirroring a document-store collection. The handle is
//! injected into every operation; there is no module-level singleton.

mod users;

pub use users::UserSummaryWithCount;

use anyhow::Result;
use sqlx::{Pool, Sqlite, SqlitePool};

/// Database manager for user and exercise log storage
#[derive(Clone)]
pub struct Database {
    pool: Pool<Sqlite>,
}

impl Database {
    /// Create a new database connection and run migrations
    ///
    /// # Errors
    ///
    /// Returns an error if the connection or migration fails
    pub async fn new(database_url: &str) -> Result<Self> {
        // Ensure SQLite creates the database file if it doesn't exist
        let connection_options = if database_url.starts_with("sqlite:") {
            format!("{database_url}?mode=rwc")
        } else {
            database_url.to_string()
        };

        let pool = SqlitePool::connect(&connection_options).await?;

        let db = Self { pool };

        // Run migrations
        db.migrate().await?;

        Ok(db)
    }

    /// Get a reference to the database pool for advanced operations
    pub fn pool(&self) -> &Pool<Sqlite> {
        &self.pool
    }

    /// Verify the store is reachable, for readiness checks
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be queried
    pub async fn ping(&self) -> Result<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    /// Run database migrations
    ///
    /// # Errors
    ///
    /// Returns an error if table creation fails
    pub async fn migrate(&self) -> Result<()> {
        self.migrate_users().await?;
        Ok(())
    }
}
