// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Gameshelf API Server
//!
//! Serves a personal game library stored in a JSON file, plus trending and
//! search lookups against IGDB.

use gameshelf::{
    config::Config,
    db::LibraryStore,
    services::{IgdbClient, TokenCache},
    AppState,
};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize structured JSON logging
    init_logging();

    // Load configuration from environment
    let config = Config::from_env()?;
    tracing::info!(port = config.port, "Starting Gameshelf API");

    // Load library
    let library = LibraryStore::load_from_file(&config.library_path);
    tracing::info!(
        path = %config.library_path.display(),
        count = library.list().await.len(),
        "Library loaded"
    );

    // Initialize IGDB client with the process-wide token cache
    let http = reqwest::Client::new();
    let tokens = Arc::new(TokenCache::new(
        http.clone(),
        config.igdb_auth_url.clone(),
        config.igdb_client_id.clone(),
        config.igdb_client_secret.clone(),
    ));
    let igdb = IgdbClient::new(
        http,
        config.igdb_api_url.clone(),
        config.igdb_client_id.clone(),
        tokens,
    );

    // Build shared state
    let state = Arc::new(AppState {
        config: config.clone(),
        library,
        igdb,
    });

    // Build router
    let app = gameshelf::routes::create_router(state);

    // Start server
    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(address = %addr, "Server listening");

    axum::serve(listener, app).await?;
    Ok(())
}

/// Initialize structured JSON logging.
fn init_logging() {
    let format = tracing_subscriber::fmt::layer()
        .json()
        .with_target(false)
        .with_current_span(true)
        .flatten_event(true);

    let mut filter = tracing_subscriber::EnvFilter::from_default_env();
    for directive in ["gameshelf=debug", "info"] {
        if let Ok(directive) = directive.parse() {
            filter = filter.add_directive(directive);
        }
    }

    tracing_subscriber::registry().with(filter).with(format).init();
}
