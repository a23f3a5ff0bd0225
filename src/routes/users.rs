// ABOUTME: User and exercise log route handlers for the public REST API
// ABOUTME: Registration, listing, exercise append protocol, and log query endpoints
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Async-IO.org

//! User routes for the exercise tracker API.
//!
//! Endpoints:
//! - `POST /api/users` - register a user
//! - `GET /api/users` - list users (id and username only)
//! - `POST /api/users/:user_id/exercises` - append an exercise to a log
//! - `GET /api/users/:user_id/logs` - query a log with optional
//!   `from`/`to`/`limit` parameters
//!
//! POST bodies are accepted as JSON or form-encoded. Validation happens
//! before any store mutation and names the offending field or value.

use crate::{
    database::Database,
    errors::{AppError, AppResult},
    logbook,
    models::{AppendView, ExerciseEntry, LogView, User, UserSummary},
    server::ServerResources,
};
use axum::{
    async_trait,
    extract::{FromRequest, Path, Query, Request, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Form, Json, Router,
};
use serde::{Deserialize, Deserializer};
use std::sync::Arc;
use tracing::info;
use uuid::Uuid;

// ============================================================================
// Request Types
// ============================================================================

/// Request to register a new user
#[derive(Debug, Deserialize)]
pub struct CreateUserRequest {
    /// Username (required, non-empty)
    #[serde(default)]
    pub username: Option<String>,
}

/// Request to append an exercise to a user's log
#[derive(Debug, Deserialize)]
pub struct CreateExerciseRequest {
    /// Description of the exercise (required, non-empty)
    #[serde(default)]
    pub description: Option<String>,
    /// Duration; accepted as a number or numeric string, parsed explicitly
    #[serde(default, deserialize_with = "de_opt_string_or_number")]
    pub duration: Option<String>,
    /// Exercise date as `YYYY-MM-DD`; defaults to the current date
    #[serde(default)]
    pub date: Option<String>,
}

/// Query parameters for the logs endpoint.
///
/// All three are kept as raw strings here; parsing is explicit and total in
/// [`crate::logbook`] so a bad value never propagates as a sentinel.
#[derive(Debug, Default, Deserialize)]
pub struct LogsQuery {
    /// Exclusive lower date bound (`YYYY-MM-DD`)
    pub from: Option<String>,
    /// Exclusive upper date bound (`YYYY-MM-DD`)
    pub to: Option<String>,
    /// Maximum number of entries to return
    pub limit: Option<String>,
}

/// Deserialize an optional field that may arrive as a JSON number (JSON
/// body) or a string (form body) into its string representation
fn de_opt_string_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum StringOrNumber {
        String(String),
        Int(i64),
        Float(f64),
    }

    Ok(
        Option::<StringOrNumber>::deserialize(deserializer)?.map(|value| match value {
            StringOrNumber::String(s) => s,
            StringOrNumber::Int(i) => i.to_string(),
            StringOrNumber::Float(f) => f.to_string(),
        }),
    )
}

// ============================================================================
// Body Extraction
// ============================================================================

/// Extractor accepting either a JSON or a form-encoded request body,
/// dispatched on the `Content-Type` header
pub struct JsonOrForm<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for JsonOrForm<T>
where
    S: Send + Sync,
    T: serde::de::DeserializeOwned,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let is_json = req
            .headers()
            .get(http::header::CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .is_some_and(|value| value.starts_with("application/json"));

        if is_json {
            let Json(payload) = Json::<T>::from_request(req, state)
                .await
                .map_err(|e| AppError::invalid_input(format!("Malformed JSON body: {e}")))?;
            Ok(Self(payload))
        } else {
            let Form(payload) = Form::<T>::from_request(req, state)
                .await
                .map_err(|e| AppError::invalid_input(format!("Malformed form body: {e}")))?;
            Ok(Self(payload))
        }
    }
}

// ============================================================================
// User Routes
// ============================================================================

/// User routes handler
pub struct UserRoutes;

impl UserRoutes {
    /// Create all user and exercise log routes
    #[must_use]
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/api/users", post(Self::create_user))
            .route("/api/users", get(Self::list_users))
            .route("/api/users/:user_id/exercises", post(Self::append_exercise))
            .route("/api/users/:user_id/logs", get(Self::get_logs))
            .with_state(resources)
    }

    /// Parse a path segment into a user ID, distinct from NotFound:
    /// a malformed id is a format error, not a missing resource
    fn parse_user_id(raw: &str) -> AppResult<Uuid> {
        Uuid::parse_str(raw)
            .map_err(|e| AppError::invalid_format(format!("Invalid user ID format: {e}")))
    }

    /// Handle `POST /api/users`
    async fn create_user(
        State(resources): State<Arc<ServerResources>>,
        JsonOrForm(request): JsonOrForm<CreateUserRequest>,
    ) -> AppResult<impl IntoResponse> {
        let username = request
            .username
            .map(|name| name.trim().to_owned())
            .filter(|name| !name.is_empty())
            .ok_or_else(|| AppError::missing_field("username"))?;

        let user = User::new(username);
        resources.database.create_user(&user).await.map_err(|e| {
            AppError::database(format!("Failed to create user: {e}"))
        })?;

        info!(user_id = %user.id, "Registered user");

        Ok((StatusCode::CREATED, Json(UserSummary::from(&user))))
    }

    /// Handle `GET /api/users`
    async fn list_users(
        State(resources): State<Arc<ServerResources>>,
    ) -> AppResult<Json<Vec<UserSummary>>> {
        let users = resources
            .database
            .list_users()
            .await
            .map_err(|e| AppError::database(format!("Failed to list users: {e}")))?;

        Ok(Json(users))
    }

    /// Handle `POST /api/users/:user_id/exercises`.
    ///
    /// The append protocol: validate, check the user exists, then
    /// atomically bump the count and push the entry in one store update.
    async fn append_exercise(
        State(resources): State<Arc<ServerResources>>,
        Path(user_id): Path<String>,
        JsonOrForm(request): JsonOrForm<CreateExerciseRequest>,
    ) -> AppResult<Json<AppendView>> {
        let user_id = Self::parse_user_id(&user_id)?;

        // All validation happens before any store mutation
        let description = request
            .description
            .map(|d| d.trim().to_owned())
            .filter(|d| !d.is_empty())
            .ok_or_else(|| AppError::missing_field("description"))?;
        let duration = logbook::parse_duration(request.duration.as_deref())?;
        let date = logbook::parse_entry_date(request.date.as_deref())?;

        let entry = ExerciseEntry {
            description,
            duration,
            date,
        };

        let view = append_exercise_for_user(&resources.database, user_id, entry).await?;

        info!(user_id = %view.id, count = view.count, "Appended exercise");

        Ok(Json(view))
    }

    /// Handle `GET /api/users/:user_id/logs`
    async fn get_logs(
        State(resources): State<Arc<ServerResources>>,
        Path(user_id): Path<String>,
        Query(params): Query<LogsQuery>,
    ) -> AppResult<Json<LogView>> {
        let user_id = Self::parse_user_id(&user_id)?;

        // A non-numeric limit is an error; an unparsable date bound is not
        let limit = logbook::parse_limit(params.limit.as_deref())?;
        let from = logbook::parse_date_bound(params.from.as_deref());
        let to = logbook::parse_date_bound(params.to.as_deref());

        let user = resources
            .database
            .get_user(user_id)
            .await
            .map_err(|e| AppError::database(format!("Failed to fetch user: {e}")))?
            .ok_or_else(|| AppError::not_found("User"))?;

        Ok(Json(logbook::query_log(&user, from, to, limit)))
    }
}

/// Run the append protocol against the store: existence check, then the
/// atomic count-increment + log-append, then result shaping with the
/// just-appended entry flat-merged at the top level.
async fn append_exercise_for_user(
    database: &Database,
    user_id: Uuid,
    entry: ExerciseEntry,
) -> AppResult<AppendView> {
    // Step 1: existence check; NotFound if the id does not resolve
    database
        .get_log_length(user_id)
        .await
        .map_err(|e| AppError::database(format!("Failed to read log length: {e}")))?
        .ok_or_else(|| AppError::not_found("User"))?;

    // Step 2: atomic update; the store computes the increment so
    // interleaving appends cannot leave count behind the log
    let updated = database
        .append_exercise(user_id, &entry)
        .await
        .map_err(|e| AppError::database(format!("Failed to append exercise: {e}")))?;

    // Step 3: result shaping
    Ok(AppendView {
        id: updated.id,
        username: updated.username,
        count: updated.count,
        description: entry.description,
        duration: entry.duration,
        date: logbook::render_date(entry.date),
    })
}
