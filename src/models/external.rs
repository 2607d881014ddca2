// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Catalog game shape as returned by IGDB.

use super::game::{NewGame, DEFAULT_BUY_LINK};
use serde::{Deserialize, Serialize};

/// Title used for catalog entries without a name.
pub const UNKNOWN_TITLE: &str = "Unknown Game";

/// Price given to catalog games added to the library (IGDB has no pricing).
pub const DEFAULT_CATALOG_PRICE: f64 = 29.99;

/// Game from the IGDB catalog. Never persisted.
///
/// `genres`, `platforms` and `release_dates` are IGDB reference IDs
/// unless the query expands them.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ExternalGame {
    pub id: u64,
    pub name: String,
    pub rating: Option<f64>,
    pub genres: Vec<serde_json::Value>,
    pub platforms: Vec<serde_json::Value>,
    pub release_dates: Vec<serde_json::Value>,
}

impl ExternalGame {
    /// Reshape into a library add request with catalog defaults.
    pub fn into_new_game(self) -> NewGame {
        let genre = if self.genres.is_empty() {
            "Unknown".to_string()
        } else {
            self.genres
                .iter()
                .map(|g| match g {
                    serde_json::Value::String(s) => s.clone(),
                    other => other.to_string(),
                })
                .collect::<Vec<_>>()
                .join(", ")
        };

        let title = if self.name.trim().is_empty() {
            UNKNOWN_TITLE.to_string()
        } else {
            self.name
        };

        NewGame {
            title: Some(title),
            genre: Some(genre),
            hours_played: Some(0),
            price: Some(DEFAULT_CATALOG_PRICE),
            buy_link: Some(DEFAULT_BUY_LINK.to_string()),
        }
    }
}
