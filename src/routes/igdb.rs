// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! IGDB catalog routes.

use crate::error::{AppError, Result};
use crate::models::ApiResponse;
use crate::AppState;
use axum::{
    extract::{rejection::PathRejection, Path, State},
    routing::get,
    Json, Router,
};
use serde_json::Value;
use std::sync::Arc;

/// Catalog routes.
pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/igdb/trending", get(trending))
        .route("/api/igdb/search/{name}", get(search))
        .route("/api/igdb/genre/{genre_id}", get(by_genre))
}

/// Trending (highly rated) games.
async fn trending(State(state): State<Arc<AppState>>) -> Result<Json<ApiResponse<Vec<Value>>>> {
    let games = state.igdb.trending().await?;
    Ok(Json(ApiResponse::with_message(
        games,
        "Trending games fetched from IGDB",
    )))
}

/// Search the catalog by name.
async fn search(
    State(state): State<Arc<AppState>>,
    path: std::result::Result<Path<String>, PathRejection>,
) -> Result<Json<ApiResponse<Vec<Value>>>> {
    let Path(name) = path?;
    let name = name.trim();
    if name.is_empty() {
        return Err(AppError::Validation("Game name is required".to_string()));
    }

    let games = state.igdb.search(name).await?;
    Ok(Json(ApiResponse::with_message(
        games,
        format!("Search results for \"{}\"", name),
    )))
}

/// Catalog games for an IGDB genre ID.
async fn by_genre(
    State(state): State<Arc<AppState>>,
    path: std::result::Result<Path<String>, PathRejection>,
) -> Result<Json<ApiResponse<Vec<Value>>>> {
    let Path(genre_id) = path?;
    let genre_id: u64 = genre_id
        .trim()
        .parse()
        .map_err(|_| AppError::Validation("Genre ID is required".to_string()))?;

    let games = state.igdb.by_genre(genre_id).await?;
    Ok(Json(ApiResponse::with_message(
        games,
        format!("Games fetched for genre ID: {}", genre_id),
    )))
}
