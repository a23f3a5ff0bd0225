// ABOUTME: Environment configuration management for deployment-specific settings
// ABOUTME: Handles environment variables and runtime configuration parsing
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Async-IO.org

//! Environment-based configuration management.
//!
//! All configuration comes from environment variables; invalid values are
//! reported as configuration errors rather than panics.

use std::env;

use serde::{Deserialize, Serialize};

use crate::errors::{AppError, AppResult};

/// Default HTTP listen port
const DEFAULT_HTTP_PORT: u16 = 3000;

/// Default SQLite database location
const DEFAULT_DATABASE_URL: &str = "sqlite:./data/exercise_tracker.db";

/// Server configuration loaded from the environment
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// HTTP listen port
    pub http_port: u16,
    /// Database connection URL
    pub database_url: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            http_port: DEFAULT_HTTP_PORT,
            database_url: DEFAULT_DATABASE_URL.to_owned(),
        }
    }
}

impl ServerConfig {
    /// Load configuration from environment variables
    ///
    /// # Errors
    ///
    /// Returns a configuration error if `HTTP_PORT` is set but not a
    /// valid port number
    pub fn from_env() -> AppResult<Self> {
        let http_port = match env::var("HTTP_PORT").or_else(|_| env::var("PORT")) {
            Ok(raw) => raw
                .parse::<u16>()
                .map_err(|_| AppError::config(format!("Invalid HTTP_PORT value: {raw}")))?,
            Err(_) => DEFAULT_HTTP_PORT,
        };

        let database_url =
            env::var("DATABASE_URL").unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_owned());

        Ok(Self {
            http_port,
            database_url,
        })
    }

    /// Get a summary of the configuration for startup logging
    #[must_use]
    pub fn summary(&self) -> String {
        format!(
            "Exercise Tracker Configuration:\n\
             - HTTP Port: {}\n\
             - Database: {}",
            self.http_port, self.database_url
        )
    }
}
