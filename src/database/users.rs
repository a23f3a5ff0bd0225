// ABOUTME: User storage operations - registration, listing, log reads, atomic append
// ABOUTME: One row per user with the exercise log embedded as a JSON array column
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Async-IO.org

use super::Database;
use crate::models::{ExerciseEntry, User, UserSummary};
use anyhow::{anyhow, Result};
use sqlx::Row;
use uuid::Uuid;

impl Database {
    /// Create the users table
    ///
    /// # Errors
    ///
    /// Returns an error if table creation fails
    pub(super) async fn migrate_users(&self) -> Result<()> {
        // One row per user; the log is an embedded JSON array so the
        // count/log pair lives in a single row and can be updated in a
        // single atomic statement. No UNIQUE constraint on username:
        // duplicate usernames are permitted.
        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS users (
                id TEXT PRIMARY KEY,
                username TEXT NOT NULL,
                count INTEGER NOT NULL DEFAULT 0,
                log TEXT NOT NULL DEFAULT '[]',
                created_at DATETIME DEFAULT CURRENT_TIMESTAMP
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Create a new user
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails
    pub async fn create_user(&self, user: &User) -> Result<Uuid> {
        let log_json = serde_json::to_string(&user.log)?;

        sqlx::query(
            r"
            INSERT INTO users (id, username, count, log, created_at)
            VALUES ($1, $2, $3, $4, $5)
            ",
        )
        .bind(user.id.to_string())
        .bind(&user.username)
        .bind(user.count)
        .bind(log_json)
        .bind(user.created_at)
        .execute(&self.pool)
        .await?;

        Ok(user.id)
    }

    /// Get a user by ID, including the full embedded log
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails or the stored log is
    /// not valid JSON
    pub async fn get_user(&self, user_id: Uuid) -> Result<Option<User>> {
        let row = sqlx::query(
            r"
            SELECT id, username, count, log, created_at
            FROM users WHERE id = $1
            ",
        )
        .bind(user_id.to_string())
        .fetch_optional(&self.pool)
        .await?;

        if let Some(row) = row {
            let user = Self::row_to_user(&row)?;
            Ok(Some(user))
        } else {
            Ok(None)
        }
    }

    /// List all users, projected to id and username only
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails
    pub async fn list_users(&self) -> Result<Vec<UserSummary>> {
        // rowid order is insertion order
        let rows = sqlx::query("SELECT id, username FROM users ORDER BY rowid")
            .fetch_all(&self.pool)
            .await?;

        rows.iter()
            .map(|row| {
                let id: String = row.get("id");
                Ok(UserSummary {
                    id: Uuid::parse_str(&id)?,
                    username: row.get("username"),
                })
            })
            .collect()
    }

    /// Read the current log length for a user (the existence check step
    /// of the append protocol)
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails
    pub async fn get_log_length(&self, user_id: Uuid) -> Result<Option<i64>> {
        let length: Option<i64> = sqlx::query_scalar("SELECT json_array_length(log) FROM users WHERE id = $1")
            .bind(user_id.to_string())
            .fetch_optional(&self.pool)
            .await?;

        Ok(length)
    }

    /// Atomically increment the stored count and append an entry to the
    /// log.
    ///
    /// Both mutations happen in one UPDATE statement and the increment is
    /// computed in the store, so interleaving writers cannot lose an
    /// update and no reader can observe a state where count and log
    /// length disagree. Returns the updated user projected to id,
    /// username, count.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails or the user row
    /// no longer exists
    pub async fn append_exercise(
        &self,
        user_id: Uuid,
        entry: &ExerciseEntry,
    ) -> Result<UserSummaryWithCount> {
        let entry_json = serde_json::to_string(entry)?;

        let row = sqlx::query(
            r"
            UPDATE users
            SET count = count + 1, log = json_insert(log, '$[#]', json($1))
            WHERE id = $2
            RETURNING username, count
            ",
        )
        .bind(entry_json)
        .bind(user_id.to_string())
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| anyhow!("User row vanished during append: {user_id}"))?;

        Ok(UserSummaryWithCount {
            id: user_id,
            username: row.get("username"),
            count: row.get("count"),
        })
    }

    /// Convert a database row to a User struct
    fn row_to_user(row: &sqlx::sqlite::SqliteRow) -> Result<User> {
        let id: String = row.get("id");
        let username: String = row.get("username");
        let count: i64 = row.get("count");
        let log_json: String = row.get("log");
        let created_at: chrono::DateTime<chrono::Utc> = row.get("created_at");

        let log: Vec<ExerciseEntry> = serde_json::from_str(&log_json)?;

        Ok(User {
            id: Uuid::parse_str(&id)?,
            username,
            count,
            log,
            created_at,
        })
    }
}

/// Projection returned by the atomic append: id, username, updated count
#[derive(Debug, Clone)]
pub struct UserSummaryWithCount {
    /// User ID
    pub id: Uuid,
    /// Username
    pub username: String,
    /// Updated lifetime exercise count
    pub count: i64,
}
