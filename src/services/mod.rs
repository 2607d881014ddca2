// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Services module - external API clients.

pub mod igdb;
pub mod token;

pub use igdb::IgdbClient;
pub use token::TokenCache;
