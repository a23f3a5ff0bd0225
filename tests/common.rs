// ABOUTME: Shared test utilities and setup functions for integration tests
// ABOUTME: Provides database and router creation helpers backed by temporary SQLite files
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Async-IO.org

#![allow(dead_code, clippy::unwrap_used, clippy::expect_used)]

//! Shared test utilities for `exercise_tracker`
//!
//! File-backed temporary databases are used rather than `sqlite::memory:`
//! because every pooled connection to an in-memory database gets its own
//! isolated instance. The `TempDir` must be held for the test's lifetime.

use std::sync::Arc;

use axum::Router;
use exercise_tracker::{
    config::ServerConfig,
    database::Database,
    server::{HttpServer, ServerResources},
};
use tempfile::TempDir;

/// Create an isolated test database backed by a temporary file
pub async fn create_test_db() -> (Database, TempDir) {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let url = format!("sqlite:{}/test.db", dir.path().display());
    let database = Database::new(&url).await.expect("Failed to create test db");
    (database, dir)
}

/// Create a full application router over an isolated test database
pub async fn create_test_app() -> (Router, TempDir) {
    let (database, dir) = create_test_db().await;
    let resources = Arc::new(ServerResources::new(database, ServerConfig::default()));
    (HttpServer::router(resources), dir)
}
