// ABOUTME: Route module organization for the exercise tracker HTTP endpoints
// ABOUTME: Each domain module contains route definitions and thin handler functions
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Async-IO.org

//! Route modules for the exercise tracker.
//!
//! Handlers are thin: they parse and validate the request, delegate to the
//! database layer and the log engine, and shape the response. All failures
//! go through the uniform error envelope in [`crate::errors`].

/// Health check and system status routes
pub mod health;
/// User registration, listing, exercise append, and log query routes
pub mod users;

pub use health::HealthRoutes;
pub use users::UserRoutes;
