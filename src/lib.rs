// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Strava-Weekly: summarize a week of runs from Strava
//!
//! This crate handles the Strava OAuth token lifecycle (authorize, exchange,
//! cache, refresh), fetches a week's activities page by page and formats a
//! running summary.

pub mod config;
pub mod error;
pub mod models;
pub mod report;
pub mod services;
pub mod time_utils;

use config::Config;
use services::{ActivityFetcher, AuthorizationPrompt, SessionManager, StravaClient, TokenStore};

/// Components wired from one [`Config`].
pub struct AppState {
    pub config: Config,
    pub session: SessionManager,
    pub fetcher: ActivityFetcher,
}

impl AppState {
    pub fn new(config: Config, prompt: Box<dyn AuthorizationPrompt>) -> Self {
        let client = StravaClient::new(&config);
        let store = TokenStore::new(config.token_file.clone());
        let session = SessionManager::new(client.clone(), store, prompt);
        let fetcher = ActivityFetcher::new(client, &config);

        Self {
            config,
            session,
            fetcher,
        }
    }
}
