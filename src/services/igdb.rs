// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! IGDB catalog client.
//!
//! Handles:
//! - Apicalypse query building (trending, search, by-genre)
//! - Authenticated `POST /games` requests
//!
//! Results are returned as raw JSON values; shaping into `ExternalGame`
//! is left to the caller.

use crate::error::AppError;
use crate::services::TokenCache;
use serde_json::Value;
use std::sync::Arc;

/// Fields requested for every catalog query.
const GAME_FIELDS: &str = "fields name, rating, genres, platforms, release_dates;";

pub mod queries {
    //! Apicalypse query bodies for `/games`.

    use super::GAME_FIELDS;

    /// Pass-through default: first 10 games, unsorted.
    pub fn default_query() -> String {
        format!("{} limit 10;", GAME_FIELDS)
    }

    /// Highly rated games, best first.
    pub fn trending() -> String {
        format!("{} where rating > 80; sort rating desc; limit 20;", GAME_FIELDS)
    }

    /// Free-text name search.
    pub fn search(name: &str) -> String {
        format!(
            "{} search \"{}\"; limit 10;",
            GAME_FIELDS,
            escape_search_term(name)
        )
    }

    /// Games tagged with an IGDB genre ID, best rated first.
    pub fn by_genre(genre_id: u64) -> String {
        format!(
            "{} where genres = [{}]; sort rating desc; limit 15;",
            GAME_FIELDS, genre_id
        )
    }

    /// Escape a value for a double-quoted Apicalypse string.
    fn escape_search_term(term: &str) -> String {
        term.replace('\\', "\\\\").replace('"', "\\\"")
    }
}

/// IGDB API client.
#[derive(Clone)]
pub struct IgdbClient {
    http: reqwest::Client,
    base_url: String,
    client_id: String,
    tokens: Arc<TokenCache>,
}

impl IgdbClient {
    /// Create a client for `base_url` (e.g. `https://api.igdb.com/v4`).
    pub fn new(
        http: reqwest::Client,
        base_url: String,
        client_id: String,
        tokens: Arc<TokenCache>,
    ) -> Self {
        Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            client_id,
            tokens,
        }
    }

    /// Highly rated games.
    pub async fn trending(&self) -> Result<Vec<Value>, AppError> {
        self.fetch_games(Some(&queries::trending())).await
    }

    /// Search by game name.
    pub async fn search(&self, name: &str) -> Result<Vec<Value>, AppError> {
        self.fetch_games(Some(&queries::search(name))).await
    }

    /// Games in a genre.
    pub async fn by_genre(&self, genre_id: u64) -> Result<Vec<Value>, AppError> {
        self.fetch_games(Some(&queries::by_genre(genre_id))).await
    }

    /// Run a raw Apicalypse query against `/games`, or the default query.
    pub async fn fetch_games(&self, query: Option<&str>) -> Result<Vec<Value>, AppError> {
        let token = self.tokens.get_token().await?;
        let url = format!("{}/games", self.base_url);
        let body = query.map_or_else(queries::default_query, str::to_string);

        tracing::debug!(query = %body, "Querying IGDB");

        let response = self
            .http
            .post(&url)
            .header("Client-ID", &self.client_id)
            .bearer_auth(&token)
            .header(reqwest::header::CONTENT_TYPE, "text/plain")
            .body(body)
            .send()
            .await
            .map_err(|e| AppError::Fetch(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::Fetch(format!("HTTP {}: {}", status, body)));
        }

        response
            .json()
            .await
            .map_err(|e| AppError::Fetch(format!("JSON parse error: {}", e)))
    }
}
