// ABOUTME: Main library entry point for the exercise tracker REST API
// ABOUTME: Exposes the database, log engine, routes, and server modules
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Async-IO.org

#![deny(unsafe_code)]

//! # Exercise Tracker
//!
//! A minimal REST API that tracks users and their exercise logs: create a
//! user, list users, log an exercise for a user, and query a user's
//! exercise log with optional date-range and count filters.
//!
//! ## Architecture
//!
//! - **`database`**: SQLite persistence; users stored one row each with the
//!   exercise log embedded as a JSON array column, updated atomically
//! - **`logbook`**: the core query engine - date-window filtering, limit
//!   bounding, and explicit parsing of request parameters
//! - **`routes`**: thin axum handlers for the HTTP surface
//! - **`server`**: router assembly and the serve loop
//! - **`errors`**: uniform error envelope shared by every endpoint
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use exercise_tracker::config::ServerConfig;
//! use exercise_tracker::errors::AppResult;
//!
//! fn main() -> AppResult<()> {
//!     let config = ServerConfig::from_env()?;
//!     println!("Exercise tracker configured with port: {}", config.http_port);
//!     Ok(())
//! }
//! ```

/// Environment-driven server configuration
pub mod config;

/// `SQLite` storage for users and their embedded exercise logs
pub mod database;

/// Unified error handling and the JSON error envelope
pub mod errors;

/// Core exercise log query and parsing logic
pub mod logbook;

/// Logging configuration and setup
pub mod logging;

/// Domain models and response view types
pub mod models;

/// `HTTP` route handlers
pub mod routes;

/// Server resources and router assembly
pub mod server;
