// ABOUTME: Server resources container and HTTP server assembly
// ABOUTME: Builds the axum router from per-domain routes and runs the serve loop
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Async-IO.org

//! # HTTP Server
//!
//! Centralized resource container for dependency injection plus router
//! assembly. The [`ServerResources`] handle (database + config) is shared
//! across handlers via `Arc`; there is no module-level mutable state.

use std::sync::Arc;

use anyhow::{Context, Result};
use axum::Router;
use tokio::net::TcpListener;
use tower_http::{cors::CorsLayer, services::ServeDir, trace::TraceLayer};
use tracing::info;

use crate::config::ServerConfig;
use crate::database::Database;
use crate::routes::{HealthRoutes, UserRoutes};

/// Centralized resource container for dependency injection
#[derive(Clone)]
pub struct ServerResources {
    /// Shared database handle
    pub database: Database,
    /// Server configuration
    pub config: ServerConfig,
}

impl ServerResources {
    /// Create new server resources
    #[must_use]
    pub fn new(database: Database, config: ServerConfig) -> Self {
        Self { database, config }
    }
}

/// Exercise tracker HTTP server
pub struct HttpServer {
    resources: Arc<ServerResources>,
}

impl HttpServer {
    /// Create a new server from shared resources
    #[must_use]
    pub fn new(resources: Arc<ServerResources>) -> Self {
        Self { resources }
    }

    /// Assemble the full application router.
    ///
    /// API routes are merged with health checks and the static landing
    /// page; CORS is permissive so the API is callable from any page.
    #[must_use]
    pub fn router(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .merge(UserRoutes::routes(resources.clone()))
            .merge(HealthRoutes::routes(resources))
            .fallback_service(ServeDir::new("static"))
            .layer(CorsLayer::permissive())
            .layer(TraceLayer::new_for_http())
    }

    /// Run the server until the listener fails
    ///
    /// # Errors
    ///
    /// Returns an error if binding the port or serving fails
    pub async fn run(self, port: u16) -> Result<()> {
        let app = Self::router(self.resources);

        let listener = TcpListener::bind(format!("0.0.0.0:{port}"))
            .await
            .with_context(|| format!("Failed to bind port {port}"))?;

        info!("HTTP server listening on http://0.0.0.0:{port}");

        axum::serve(listener, app)
            .await
            .context("HTTP server terminated")?;

        Ok(())
    }
}
