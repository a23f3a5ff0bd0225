// ABOUTME: Data models for users and their embedded exercise logs
// ABOUTME: User, ExerciseEntry, and the response view types for each operation
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Async-IO.org

//! Domain models for the exercise tracker.
//!
//! A [`User`] owns an append-only, insertion-ordered log of
//! [`ExerciseEntry`] records plus a denormalized `count` that the append
//! protocol keeps equal to the log length. The `*View` types are the exact
//! response shapes of the HTTP surface.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A stored user record with its embedded exercise log
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    /// Unique user identifier
    pub id: Uuid,
    /// Username (required, duplicates permitted)
    pub username: String,
    /// Denormalized log length, maintained by the append protocol
    pub count: i64,
    /// Append-only exercise log, insertion-ordered
    pub log: Vec<ExerciseEntry>,
    /// When the user was created
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Create a new user with an empty log
    #[must_use]
    pub fn new(username: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            username,
            count: 0,
            log: Vec::new(),
            created_at: Utc::now(),
        }
    }
}

/// One exercise record embedded in a user's log.
///
/// Entries have no identity of their own and are immutable once appended.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExerciseEntry {
    /// What was done
    pub description: String,
    /// Duration as a positive integer
    pub duration: i64,
    /// Calendar date the exercise happened
    pub date: NaiveDate,
}

/// Sanitized user summary for registration and listing responses
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserSummary {
    /// User ID
    pub id: Uuid,
    /// Username
    pub username: String,
}

impl From<&User> for UserSummary {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            username: user.username.clone(),
        }
    }
}

/// One log entry as rendered in a logs query response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExerciseView {
    /// What was done
    pub description: String,
    /// Duration as a positive integer
    pub duration: i64,
    /// Calendar string rendering, e.g. `Thu Jan 05 2023`
    pub date: String,
}

/// Response shape of `GET /api/users/:id/logs`.
///
/// `count` here is view-local: the length of the filtered and limited log,
/// not the user's stored lifetime count.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogView {
    /// User ID
    pub id: Uuid,
    /// Username
    pub username: String,
    /// Number of entries in `log` after filtering and limiting
    pub count: usize,
    /// Filtered, bounded, formatted entries in insertion order
    pub log: Vec<ExerciseView>,
}

/// Response shape of `POST /api/users/:id/exercises`.
///
/// The just-appended entry is flat-merged at the top level rather than
/// nested under `log`; `count` is the updated lifetime count.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppendView {
    /// User ID
    pub id: Uuid,
    /// Username
    pub username: String,
    /// Updated lifetime exercise count
    pub count: i64,
    /// Description of the appended entry
    pub description: String,
    /// Duration of the appended entry
    pub duration: i64,
    /// Calendar string rendering of the appended entry's date
    pub date: String,
}
