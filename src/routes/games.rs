// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Library CRUD routes.

use crate::error::{AppError, Result};
use crate::models::{ApiResponse, GameRecord, NewGame};
use crate::AppState;
use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    http::StatusCode,
    routing::{get, put},
    Json, Router,
};
use serde::Deserialize;
use serde_json::Value;
use std::sync::Arc;

/// Library routes.
pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/games", get(list_games).post(add_game))
        .route("/api/games/{id}", put(update_hours).delete(delete_game))
}

// ─── Request bodies ──────────────────────────────────────────

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct AddGameRequest {
    title: Option<String>,
    genre: Option<String>,
    /// Coerced by `parse_hours`
    hours_played: Option<Value>,
    price: Option<f64>,
    buy_link: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct UpdateHoursRequest {
    hours_played: Option<Value>,
}

// ─── Handlers ────────────────────────────────────────────────

/// List the whole library.
async fn list_games(State(state): State<Arc<AppState>>) -> Json<ApiResponse<Vec<GameRecord>>> {
    Json(ApiResponse::ok(state.library.list().await))
}

/// Add a game to the library.
async fn add_game(
    State(state): State<Arc<AppState>>,
    payload: std::result::Result<Json<AddGameRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<ApiResponse<GameRecord>>)> {
    let Json(req) = payload?;

    let new_game = NewGame {
        title: req.title,
        genre: req.genre,
        hours_played: parse_hours(req.hours_played.as_ref())?,
        price: req.price,
        buy_link: req.buy_link,
    };

    let game = state.library.add(new_game).await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::with_message(game, "Game added successfully")),
    ))
}

/// Remove a game from the library.
async fn delete_game(
    State(state): State<Arc<AppState>>,
    path: std::result::Result<Path<String>, PathRejection>,
) -> Result<Json<ApiResponse<GameRecord>>> {
    let Path(id) = path?;
    let id = parse_id(&id)?;
    let game = state.library.remove(id).await?;

    Ok(Json(ApiResponse::with_message(
        game,
        "Game deleted successfully",
    )))
}

/// Update hours played for a game.
async fn update_hours(
    State(state): State<Arc<AppState>>,
    path: std::result::Result<Path<String>, PathRejection>,
    payload: std::result::Result<Json<UpdateHoursRequest>, JsonRejection>,
) -> Result<Json<ApiResponse<GameRecord>>> {
    let Path(id) = path?;
    let id = parse_id(&id)?;
    let Json(req) = payload?;
    let hours_played = parse_hours(req.hours_played.as_ref())?;

    let game = state.library.update_hours(id, hours_played).await?;

    Ok(Json(ApiResponse::with_message(
        game,
        "Hours played updated successfully",
    )))
}

// ─── Input coercion ──────────────────────────────────────────

/// Parse a library ID path segment (positive integer).
fn parse_id(raw: &str) -> Result<u64> {
    raw.trim()
        .parse::<u64>()
        .ok()
        .filter(|id| *id > 0)
        .ok_or_else(|| AppError::Validation(format!("Invalid game ID: {}", raw)))
}

/// Coerce `hoursPlayed` to a whole number of hours.
///
/// Accepts non-negative integers, non-negative numbers (truncated), and
/// strings holding either. `null` and absent both mean "not given".
fn parse_hours(value: Option<&Value>) -> Result<Option<u64>> {
    let invalid = || {
        AppError::Validation("hoursPlayed must be a non-negative number".to_string())
    };

    match value {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Number(n)) => n
            .as_u64()
            .or_else(|| n.as_f64().and_then(truncate_hours))
            .map(Some)
            .ok_or_else(invalid),
        Some(Value::String(s)) => {
            let s = s.trim();
            s.parse::<u64>()
                .ok()
                .or_else(|| s.parse::<f64>().ok().and_then(truncate_hours))
                .map(Some)
                .ok_or_else(invalid)
        }
        Some(_) => Err(invalid()),
    }
}

fn truncate_hours(hours: f64) -> Option<u64> {
    (hours.is_finite() && hours >= 0.0).then(|| hours.trunc() as u64)
}
