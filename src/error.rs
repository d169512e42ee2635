// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Application error types.

use std::path::PathBuf;

use crate::config::ConfigError;

/// Application error type. Every variant is fatal for the run.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Token store I/O error at {}: {source}", .path.display())]
    TokenStoreIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Token file {} is corrupt: {source}", .path.display())]
    TokenFormat {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Authorization failed: {0}")]
    Authorization(String),

    #[error("Strava token request ({grant}) failed with HTTP {status}: {body}")]
    AuthExchange {
        grant: &'static str,
        status: u16,
        body: String,
    },

    #[error("Strava API error: HTTP {status}: {body}")]
    StravaApi { status: u16, body: String },

    #[error("Strava request failed: {0}")]
    Transport(String),

    #[error("Failed to parse Strava response: {0}")]
    Decode(String),
}

impl AppError {
    /// HTTP status of a failed remote call, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            AppError::AuthExchange { status, .. } | AppError::StravaApi { status, .. } => {
                Some(*status)
            }
            _ => None,
        }
    }

    /// True when the failure came back from Strava as an HTTP error status.
    pub fn is_http(&self) -> bool {
        self.status().is_some()
    }

    /// True when Strava rejected the credential (HTTP 401).
    ///
    /// On refresh this usually means the refresh token was revoked; on the
    /// activity listing it means the access token is stale or invalid. Either
    /// way the user has to delete the token file and re-authorize.
    pub fn is_unauthorized(&self) -> bool {
        self.status() == Some(401)
    }

    /// True when Strava reported a rate limit (HTTP 429).
    pub fn is_rate_limited(&self) -> bool {
        self.status() == Some(429)
    }
}

/// Result type alias used across the crate
pub type Result<T> = std::result::Result<T, AppError>;
