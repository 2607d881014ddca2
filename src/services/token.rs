// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! App access token for IGDB (Twitch client-credentials grant).
//!
//! One token is shared by the whole process. It is fetched lazily on first
//! use and again once it has expired; there is no proactive refresh.

use crate::error::AppError;
use chrono::{DateTime, Duration, Utc};
use serde::Deserialize;
use tokio::sync::Mutex;

/// Cached access token with expiry information.
#[derive(Clone)]
struct CachedToken {
    access_token: String,
    expires_at: DateTime<Utc>,
}

impl CachedToken {
    fn is_valid_at(&self, now: DateTime<Utc>) -> bool {
        now < self.expires_at
    }
}

/// Token response from the OAuth endpoint.
#[derive(Debug, Clone, Deserialize)]
struct TokenResponse {
    access_token: String,
    /// Lifetime in seconds
    expires_in: i64,
}

/// Process-wide IGDB token holder.
pub struct TokenCache {
    http: reqwest::Client,
    auth_url: String,
    client_id: String,
    client_secret: String,
    /// Held across the exchange so concurrent callers wait for one refresh.
    cached: Mutex<Option<CachedToken>>,
}

impl TokenCache {
    pub fn new(
        http: reqwest::Client,
        auth_url: String,
        client_id: String,
        client_secret: String,
    ) -> Self {
        Self {
            http,
            auth_url,
            client_id,
            client_secret,
            cached: Mutex::new(None),
        }
    }

    /// Return the cached token while it is valid, otherwise exchange
    /// credentials for a new one. Failures are returned, never retried.
    pub async fn get_token(&self) -> Result<String, AppError> {
        let mut cached = self.cached.lock().await;

        if let Some(token) = cached.as_ref() {
            if token.is_valid_at(Utc::now()) {
                return Ok(token.access_token.clone());
            }
        }

        let response = self.exchange().await?;
        let expires_at = Duration::try_seconds(response.expires_in)
            .and_then(|ttl| Utc::now().checked_add_signed(ttl))
            .ok_or_else(|| {
                AppError::Auth(format!(
                    "Invalid expires_in in token response: {}",
                    response.expires_in
                ))
            })?;

        *cached = Some(CachedToken {
            access_token: response.access_token.clone(),
            expires_at,
        });

        tracing::info!(expires_at = %expires_at, "IGDB token obtained");
        Ok(response.access_token)
    }

    async fn exchange(&self) -> Result<TokenResponse, AppError> {
        let response = self
            .http
            .post(&self.auth_url)
            .query(&[
                ("client_id", self.client_id.as_str()),
                ("client_secret", self.client_secret.as_str()),
                ("grant_type", "client_credentials"),
            ])
            .send()
            .await
            .map_err(|e| AppError::Auth(format!("Token request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            tracing::error!(status = %status, body = %body, "IGDB token exchange failed");
            return Err(AppError::Auth(format!(
                "Token exchange failed with status {}",
                status
            )));
        }

        response
            .json()
            .await
            .map_err(|e| AppError::Auth(format!("Failed to parse token response: {}", e)))
    }
}
