// ABOUTME: Server binary for the exercise tracker REST API
// ABOUTME: Loads configuration, initializes logging and storage, runs the HTTP server
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Async-IO.org

//! # Exercise Tracker Server Binary
//!
//! Starts the exercise tracker REST API with SQLite-backed storage.

use anyhow::Result;
use clap::Parser;
use exercise_tracker::{
    config::ServerConfig,
    database::Database,
    logging,
    server::{HttpServer, ServerResources},
};
use std::sync::Arc;
use tracing::info;

#[derive(Parser)]
#[command(name = "exercise-tracker")]
#[command(about = "Exercise Tracker - REST API for users and their exercise logs")]
struct Args {
    /// Override HTTP port
    #[arg(long)]
    http_port: Option<u16>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Load configuration from environment
    let mut config = ServerConfig::from_env()?;

    // Override port if specified
    if let Some(http_port) = args.http_port {
        config.http_port = http_port;
    }

    // Initialize logging
    logging::init_from_env()?;

    info!("{}", config.summary());

    // Initialize database (creates the SQLite file if missing)
    let database = Database::new(&config.database_url).await?;
    info!("Database initialized: {}", config.database_url);

    let port = config.http_port;
    let resources = Arc::new(ServerResources::new(database, config));
    let server = HttpServer::new(resources);

    info!("Ready to serve exercise logs on port {port}");

    server.run(port).await
}
