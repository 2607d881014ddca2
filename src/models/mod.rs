// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Data models for the application.

pub mod envelope;
pub mod external;
pub mod game;

pub use envelope::ApiResponse;
pub use external::ExternalGame;
pub use game::{GameRecord, NewGame};
