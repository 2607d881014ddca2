// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Library game model for storage and API.

use serde::{Deserialize, Serialize};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// Purchase link used when none is given.
pub const DEFAULT_BUY_LINK: &str = "#";

/// A game in the user's library, stored in the JSON document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "public/js/generated/")
)]
pub struct GameRecord {
    /// Library-local ID, assigned as max(existing) + 1
    #[cfg_attr(feature = "binding-generation", ts(type = "number"))]
    pub id: u64,
    pub title: String,
    pub genre: String,
    /// The only field that changes after creation
    #[cfg_attr(feature = "binding-generation", ts(type = "number"))]
    pub hours_played: u64,
    pub price: f64,
    pub buy_link: String,
    /// When the game was added (ISO 8601)
    pub date_added: String,
}

/// Fields supplied when adding a game. Optional fields take their
/// defaults in `LibraryStore::add`.
#[derive(Debug, Clone, Default)]
pub struct NewGame {
    pub title: Option<String>,
    pub genre: Option<String>,
    pub hours_played: Option<u64>,
    pub price: Option<f64>,
    pub buy_link: Option<String>,
}
