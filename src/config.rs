// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Application configuration loaded from environment variables.
//!
//! A `.env` file in the working directory is honored for local runs.

use std::env;
use std::path::PathBuf;

pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_IGDB_AUTH_URL: &str = "https://id.twitch.tv/oauth2/token";
pub const DEFAULT_IGDB_API_URL: &str = "https://api.igdb.com/v4";

/// Application configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// IGDB (Twitch) client ID, also sent as the `Client-ID` header
    pub igdb_client_id: String,
    /// IGDB (Twitch) client secret
    pub igdb_client_secret: String,
    /// OAuth token endpoint used for the client-credentials exchange
    pub igdb_auth_url: String,
    /// Catalog base URL (`/games` is appended)
    pub igdb_api_url: String,
    /// JSON document holding the library
    pub library_path: PathBuf,
    /// Directory with the browser front-end
    pub public_dir: PathBuf,
    /// Origin allowed by CORS in addition to localhost
    pub frontend_url: String,
    /// Server port
    pub port: u16,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok(); // Load .env file if present

        let port = env::var("PORT")
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or(DEFAULT_PORT);

        Ok(Self {
            igdb_client_id: env::var("IGDB_CLIENT_ID")
                .map(|v| v.trim().to_string())
                .map_err(|_| ConfigError::Missing("IGDB_CLIENT_ID"))?,
            igdb_client_secret: env::var("IGDB_CLIENT_SECRET")
                .map(|v| v.trim().to_string())
                .map_err(|_| ConfigError::Missing("IGDB_CLIENT_SECRET"))?,
            igdb_auth_url: env::var("IGDB_AUTH_URL")
                .unwrap_or_else(|_| DEFAULT_IGDB_AUTH_URL.to_string()),
            igdb_api_url: env::var("IGDB_API_URL")
                .unwrap_or_else(|_| DEFAULT_IGDB_API_URL.to_string()),
            library_path: env::var("LIBRARY_PATH")
                .unwrap_or_else(|_| "games.json".to_string())
                .into(),
            public_dir: env::var("PUBLIC_DIR")
                .unwrap_or_else(|_| "public".to_string())
                .into(),
            frontend_url: env::var("FRONTEND_URL")
                .unwrap_or_else(|_| format!("http://localhost:{}", port)),
            port,
        })
    }

    /// Config for tests only. Points the IGDB URLs at an unroutable
    /// local address unless overridden.
    pub fn test_default() -> Self {
        Self {
            igdb_client_id: "test_client_id".to_string(),
            igdb_client_secret: "test_secret".to_string(),
            igdb_auth_url: "http://127.0.0.1:9/oauth2/token".to_string(),
            igdb_api_url: "http://127.0.0.1:9/v4".to_string(),
            library_path: "games.json".into(),
            public_dir: "public".into(),
            frontend_url: "http://localhost:3000".to_string(),
            port: DEFAULT_PORT,
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    Missing(&'static str),
}
