// ABOUTME: Health check route handlers for service monitoring and status endpoints
// ABOUTME: Provides liveness and database-backed readiness endpoints
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Async-IO.org

//! Health check routes for service monitoring
//!
//! `/health` reports liveness only. `/ready` additionally pings the
//! database, so load balancers stop routing when the store is unreachable.

use crate::server::ServerResources;
use axum::{
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use std::sync::Arc;

/// Health routes implementation
pub struct HealthRoutes;

impl HealthRoutes {
    /// Create all health check routes
    #[must_use]
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/health", get(Self::health_handler))
            .route("/ready", get(Self::ready_handler))
            .with_state(resources)
    }

    async fn health_handler() -> Json<serde_json::Value> {
        Json(serde_json::json!({
            "status": "healthy",
            "timestamp": chrono::Utc::now().to_rfc3339()
        }))
    }

    async fn ready_handler(
        State(resources): State<Arc<ServerResources>>,
    ) -> impl IntoResponse {
        match resources.database.ping().await {
            Ok(()) => (
                StatusCode::OK,
                Json(serde_json::json!({
                    "status": "ready",
                    "database": "connected",
                    "timestamp": chrono::Utc::now().to_rfc3339()
                })),
            ),
            Err(e) => (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(serde_json::json!({
                    "status": "not_ready",
                    "database": format!("unreachable: {e}"),
                    "timestamp": chrono::Utc::now().to_rfc3339()
                })),
            ),
        }
    }
}
