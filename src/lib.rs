// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Gameshelf: a personal game library tracker
//!
//! This crate provides the backend API for a JSON-file-backed game library
//! and for browsing trending and searchable titles from IGDB.

pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod time_utils;

use config::Config;
use db::LibraryStore;
use services::IgdbClient;

/// Shared application state.
pub struct AppState {
    pub config: Config,
    pub library: LibraryStore,
    pub igdb: IgdbClient,
}
