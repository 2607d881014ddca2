// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! JSON-file-backed library store.
//!
//! The whole collection lives in memory and every mutation rewrites the
//! backing document in full. A failed write is logged and the in-memory
//! change is kept, so memory and disk may diverge until the next write.

use crate::error::AppError;
use crate::models::game::DEFAULT_BUY_LINK;
use crate::models::{GameRecord, NewGame};
use crate::time_utils::now_rfc3339;
use std::ffi::OsString;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::sync::Mutex;

/// Library store persisted as a single JSON array.
pub struct LibraryStore {
    path: PathBuf,
    /// Held across id computation, mutation and persist.
    games: Mutex<Vec<GameRecord>>,
}

impl LibraryStore {
    /// Load the library from `path`. A missing or unparseable document
    /// yields an empty library.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref().to_path_buf();

        let games = match std::fs::read_to_string(&path) {
            Ok(data) => match serde_json::from_str::<Vec<GameRecord>>(&data) {
                Ok(games) => games,
                Err(e) => {
                    tracing::warn!(
                        path = %path.display(),
                        error = %e,
                        "Library file is not a valid game list, starting empty"
                    );
                    Vec::new()
                }
            },
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::info!(path = %path.display(), "No library file yet, starting empty");
                Vec::new()
            }
            Err(e) => {
                tracing::warn!(
                    path = %path.display(),
                    error = %e,
                    "Failed to read library file, starting empty"
                );
                Vec::new()
            }
        };

        Self {
            path,
            games: Mutex::new(games),
        }
    }

    /// Path of the backing JSON document.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// All games, in insertion order.
    pub async fn list(&self) -> Vec<GameRecord> {
        self.games.lock().await.clone()
    }

    /// Add a game. `title`, `genre` and `price` are required.
    pub async fn add(&self, new_game: NewGame) -> Result<GameRecord, AppError> {
        let title = non_empty(new_game.title);
        let genre = non_empty(new_game.genre);
        let (Some(title), Some(genre), Some(price)) = (title, genre, new_game.price) else {
            return Err(AppError::Validation(
                "Missing required fields: title, genre, price".to_string(),
            ));
        };
        if !price.is_finite() {
            return Err(AppError::Validation("Price must be a number".to_string()));
        }

        let mut games = self.games.lock().await;

        let id = next_id(&games).ok_or_else(|| {
            AppError::Internal(anyhow::anyhow!(
                "No game ID left above the current maximum"
            ))
        })?;

        let record = GameRecord {
            id,
            title,
            genre,
            hours_played: new_game.hours_played.unwrap_or(0),
            price,
            buy_link: non_empty(new_game.buy_link)
                .unwrap_or_else(|| DEFAULT_BUY_LINK.to_string()),
            date_added: now_rfc3339(),
        };

        games.push(record.clone());
        self.persist_logged(&games).await;

        tracing::info!(id = record.id, title = %record.title, "Game added");
        Ok(record)
    }

    /// Remove a game by ID, returning the removed record.
    pub async fn remove(&self, id: u64) -> Result<GameRecord, AppError> {
        let mut games = self.games.lock().await;

        let index = games
            .iter()
            .position(|g| g.id == id)
            .ok_or_else(game_not_found)?;

        let removed = games.remove(index);
        self.persist_logged(&games).await;

        tracing::info!(id, "Game removed");
        Ok(removed)
    }

    /// Overwrite `hours_played` for a game. Nothing else changes.
    pub async fn update_hours(
        &self,
        id: u64,
        hours_played: Option<u64>,
    ) -> Result<GameRecord, AppError> {
        let hours_played = hours_played.ok_or_else(|| {
            AppError::Validation("Missing required field: hoursPlayed".to_string())
        })?;

        let mut games = self.games.lock().await;

        let game = games
            .iter_mut()
            .find(|g| g.id == id)
            .ok_or_else(game_not_found)?;
        game.hours_played = hours_played;
        let updated = game.clone();

        self.persist_logged(&games).await;

        tracing::debug!(id, hours_played, "Hours played updated");
        Ok(updated)
    }

    /// Persist, logging instead of failing.
    async fn persist_logged(&self, games: &[GameRecord]) {
        if let Err(e) = self.persist(games).await {
            tracing::error!(
                path = %self.path.display(),
                error = %e,
                "Failed to save library, in-memory state kept"
            );
        }
    }

    /// Write the full snapshot to a temp file, then rename it over the target.
    async fn persist(&self, games: &[GameRecord]) -> Result<(), StoreError> {
        let json = serde_json::to_string_pretty(games)?;

        let mut tmp: OsString = self.path.clone().into_os_string();
        tmp.push(".tmp");
        let tmp = PathBuf::from(tmp);

        tokio::fs::write(&tmp, json).await?;
        tokio::fs::rename(&tmp, &self.path).await?;
        Ok(())
    }
}

/// Next ID: one past the largest surviving ID, or 1 for an empty library.
/// `None` once the largest ID is `u64::MAX`.
fn next_id(games: &[GameRecord]) -> Option<u64> {
    match games.iter().map(|g| g.id).max() {
        Some(max) => max.checked_add(1),
        None => Some(1),
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

fn game_not_found() -> AppError {
    AppError::NotFound("Game not found".to_string())
}

/// Errors writing the library document.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Failed to write file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to serialize library: {0}")]
    Serialize(#[from] serde_json::Error),
}
