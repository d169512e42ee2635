// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Application configuration loaded from environment variables.
//!
//! The resulting [`Config`] is built once at startup and handed to each
//! component at construction time.

use std::env;
use std::path::PathBuf;

/// Placeholder values shipped in setup docs; treated as unset.
const PLACEHOLDER_CLIENT_ID: &str = "YOUR_CLIENT_ID";
const PLACEHOLDER_CLIENT_SECRET: &str = "YOUR_CLIENT_SECRET";

/// Strava caps `per_page` at 200.
const MAX_PER_PAGE: u32 = 200;

pub const DEFAULT_REDIRECT_URI: &str = "http://localhost:8000/callback";
pub const DEFAULT_SCOPE: &str = "activity:read_all";
pub const DEFAULT_OAUTH_BASE_URL: &str = "https://www.strava.com/oauth";
pub const DEFAULT_API_BASE_URL: &str = "https://www.strava.com/api/v3";
pub const DEFAULT_PER_PAGE: u32 = 100;
pub const DEFAULT_MAX_PAGES: u32 = 10;

/// File name used under the home directory when no token path is given.
const TOKEN_FILE_NAME: &str = ".strava_tokens.json";

/// Application configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    // --- Identity (required) ---
    /// Strava OAuth client ID (public)
    pub strava_client_id: String,
    /// Strava OAuth client secret
    pub strava_client_secret: String,

    // --- OAuth ---
    /// Redirect target registered with the Strava application
    pub redirect_uri: String,
    /// Requested OAuth scope
    pub scope: String,
    /// Base URL for `/authorize` and `/token`
    pub oauth_base_url: String,
    /// Base URL for the REST API
    pub api_base_url: String,

    // --- Storage ---
    /// Where the credential bundle is persisted
    pub token_file: PathBuf,

    // --- Fetching ---
    /// Page size for the activity listing
    pub per_page: u32,
    /// Safety cap on the number of pages requested per fetch
    pub max_pages: u32,
}

impl Default for Config {
    /// Default config for testing only.
    fn default() -> Self {
        Self {
            strava_client_id: "test_client_id".to_string(),
            strava_client_secret: "test_secret".to_string(),
            redirect_uri: DEFAULT_REDIRECT_URI.to_string(),
            scope: DEFAULT_SCOPE.to_string(),
            oauth_base_url: DEFAULT_OAUTH_BASE_URL.to_string(),
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            token_file: PathBuf::from(TOKEN_FILE_NAME),
            per_page: DEFAULT_PER_PAGE,
            max_pages: DEFAULT_MAX_PAGES,
        }
    }
}

/// Command-line values that take precedence over the environment.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub token_file: Option<PathBuf>,
    pub max_pages: Option<u32>,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// A `.env` file in the working directory is honored if present.
    pub fn from_env(overrides: &ConfigOverrides) -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok(); // Load .env file if present

        Self::from_lookup(|name| env::var(name).ok(), overrides)
    }

    /// Build configuration from an arbitrary variable lookup.
    ///
    /// Overrides replace the matching variable before defaults are resolved
    /// and before validation.
    pub fn from_lookup<F>(lookup: F, overrides: &ConfigOverrides) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        // Identity is checked before anything else
        let strava_client_id = required(&lookup, "STRAVA_CLIENT_ID", PLACEHOLDER_CLIENT_ID)?;
        let strava_client_secret =
            required(&lookup, "STRAVA_CLIENT_SECRET", PLACEHOLDER_CLIENT_SECRET)?;

        let token_file = match overrides.token_file.clone().or_else(|| {
            lookup("STRAVA_TOKEN_FILE")
                .filter(|v| !v.trim().is_empty())
                .map(PathBuf::from)
        }) {
            Some(path) => path,
            None => default_token_file()?,
        };

        let max_pages = match overrides.max_pages {
            Some(max_pages) => max_pages,
            None => parse_u32(&lookup, "STRAVA_MAX_PAGES", DEFAULT_MAX_PAGES)?,
        };

        let config = Self {
            strava_client_id,
            strava_client_secret,
            redirect_uri: lookup("STRAVA_REDIRECT_URI")
                .unwrap_or_else(|| DEFAULT_REDIRECT_URI.to_string()),
            scope: lookup("STRAVA_SCOPE").unwrap_or_else(|| DEFAULT_SCOPE.to_string()),
            oauth_base_url: lookup("STRAVA_OAUTH_BASE_URL")
                .unwrap_or_else(|| DEFAULT_OAUTH_BASE_URL.to_string()),
            api_base_url: lookup("STRAVA_API_BASE_URL")
                .unwrap_or_else(|| DEFAULT_API_BASE_URL.to_string()),
            token_file,
            per_page: parse_u32(&lookup, "STRAVA_PER_PAGE", DEFAULT_PER_PAGE)?,
            max_pages,
        };

        config.validate()?;
        Ok(config)
    }

    /// Check the numeric bounds the fetcher relies on.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.per_page == 0 || self.per_page > MAX_PER_PAGE {
            return Err(ConfigError::Invalid {
                var: "STRAVA_PER_PAGE",
                reason: format!("must be between 1 and {}", MAX_PER_PAGE),
            });
        }
        if self.max_pages == 0 {
            return Err(ConfigError::Invalid {
                var: "STRAVA_MAX_PAGES",
                reason: "must be at least 1".to_string(),
            });
        }
        Ok(())
    }
}

fn required<F>(lookup: &F, name: &'static str, placeholder: &str) -> Result<String, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(name)
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty() && v != placeholder)
        .ok_or(ConfigError::Missing(name))
}

fn parse_u32<F>(lookup: &F, name: &'static str, default: u32) -> Result<u32, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(name) {
        None => Ok(default),
        Some(raw) => raw.trim().parse().map_err(|_| ConfigError::Invalid {
            var: name,
            reason: format!("expected a positive integer, got {:?}", raw),
        }),
    }
}

fn default_token_file() -> Result<PathBuf, ConfigError> {
    dirs::home_dir()
        .map(|home| home.join(TOKEN_FILE_NAME))
        .ok_or(ConfigError::NoHomeDir)
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    Missing(&'static str),

    #[error("Invalid value for {var}: {reason}")]
    Invalid { var: &'static str, reason: String },

    #[error("Could not determine home directory; set STRAVA_TOKEN_FILE")]
    NoHomeDir,
}
