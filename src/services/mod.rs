// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Services module - token lifecycle and Strava access.

pub mod fetcher;
pub mod prompt;
pub mod session;
pub mod strava;
pub mod token_store;

pub use fetcher::ActivityFetcher;
pub use prompt::{AuthorizationPrompt, TerminalPrompt};
pub use session::{CredentialState, SessionManager};
pub use strava::StravaClient;
pub use token_store::TokenStore;
