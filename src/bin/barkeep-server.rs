// ABOUTME: Main server binary for the Barkeep cocktail cabinet API
// ABOUTME: Loads configuration, opens the database, and serves HTTP
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Barkeep Project

//! Barkeep server binary

use anyhow::Result;
use barkeep::auth::{generate_jwt_secret, AuthManager};
use barkeep::config::environment::ServerConfig;
use barkeep::database::Database;
use barkeep::logging;
use barkeep::resources::ServerResources;
use barkeep::server::HttpServer;
use clap::Parser;
use std::sync::Arc;
use tracing::{info, warn};

#[derive(Parser)]
#[command(
    name = "barkeep-server",
    about = "Barkeep - cocktail cabinet API server",
    version
)]
struct Args {
    /// Override the HTTP port from configuration
    #[arg(long)]
    http_port: Option<u16>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    logging::init_from_env()?;

    let mut config = ServerConfig::from_env()?;
    if let Some(port) = args.http_port {
        config.http_port = port;
    }

    info!("Starting Barkeep server");
    info!("{}", config.summary());

    let jwt_secret: Vec<u8> = match &config.auth.jwt_secret {
        Some(secret) => secret.clone().into_bytes(),
        None => {
            warn!("JWT_SECRET not set, generating an ephemeral secret; tokens will not survive a restart");
            generate_jwt_secret().to_vec()
        }
    };

    let database = if config.database.auto_migrate {
        Database::new(&config.database.url.to_connection_string()).await?
    } else {
        Database::connect(&config.database.url.to_connection_string()).await?
    };
    info!("Database ready: {}", database.backend_info());

    let auth_manager = AuthManager::new(jwt_secret, config.auth.jwt_expiry_hours);

    let port = config.http_port;
    let resources = Arc::new(ServerResources::new(
        database,
        auth_manager,
        Arc::new(config),
    ));

    HttpServer::new(resources).run(port).await
}
