// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! OAuth session management: hands out an access token that is valid now.

use chrono::Utc;

use crate::error::AppError;
use crate::models::CredentialBundle;
use crate::services::prompt::AuthorizationPrompt;
use crate::services::strava::StravaClient;
use crate::services::token_store::TokenStore;

/// Where the stored credential stands relative to the current time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CredentialState {
    /// Nothing stored; interactive authorization required.
    Missing,
    /// Access token usable as-is.
    Valid(CredentialBundle),
    /// Expired (or no expiry recorded); refresh required.
    Expired(CredentialBundle),
}

impl CredentialState {
    pub fn classify(stored: Option<CredentialBundle>, now: i64) -> Self {
        match stored {
            None => CredentialState::Missing,
            Some(bundle) if bundle.is_valid_at(now) => CredentialState::Valid(bundle),
            Some(bundle) => CredentialState::Expired(bundle),
        }
    }
}

/// Owns the token lifecycle: authorize, exchange, persist, refresh.
pub struct SessionManager {
    client: StravaClient,
    store: TokenStore,
    prompt: Box<dyn AuthorizationPrompt>,
}

impl SessionManager {
    pub fn new(
        client: StravaClient,
        store: TokenStore,
        prompt: Box<dyn AuthorizationPrompt>,
    ) -> Self {
        Self {
            client,
            store,
            prompt,
        }
    }

    pub fn store(&self) -> &TokenStore {
        &self.store
    }

    /// Get a valid access token, authorizing or refreshing first if needed.
    ///
    /// Expiry is checked once against the wall clock; a token that lapses
    /// later in the run is not re-checked.
    pub async fn get_valid_access_token(&self) -> Result<String, AppError> {
        let now = Utc::now().timestamp();

        let bundle = match CredentialState::classify(self.store.load()?, now) {
            CredentialState::Valid(bundle) => {
                tracing::debug!(expires_at = ?bundle.expires_at, "Using cached access token");
                return Ok(bundle.access_token);
            }
            CredentialState::Expired(bundle) => self.refresh(&bundle).await?,
            CredentialState::Missing => self.authorize().await?,
        };

        Ok(bundle.access_token)
    }

    /// First-time flow: prompt for a code, exchange it, persist the result.
    async fn authorize(&self) -> Result<CredentialBundle, AppError> {
        let authorize_url = self.client.authorization_url();
        tracing::info!(
            path = %self.store.path().display(),
            "No stored tokens, starting Strava authorization"
        );

        let code = self.prompt.request_code(&authorize_url)?;
        let bundle = self.client.exchange_code(code).await?;
        self.store.save(&bundle)?;

        tracing::info!(expires_at = ?bundle.expires_at, "Authorization complete");
        Ok(bundle)
    }

    /// Swap the stored refresh token for a new bundle and persist it.
    ///
    /// On failure the stored bundle is left untouched.
    async fn refresh(&self, stale: &CredentialBundle) -> Result<CredentialBundle, AppError> {
        tracing::info!(expires_at = ?stale.expires_at, "Access token expired, refreshing");

        let bundle = self.client.refresh_token(&stale.refresh_token).await?;
        self.store.save(&bundle)?;

        tracing::info!(expires_at = ?bundle.expires_at, "Token refreshed");
        Ok(bundle)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bundle(expires_at: Option<i64>) -> CredentialBundle {
        CredentialBundle {
            access_token: "A".to_string(),
            refresh_token: "R".to_string(),
            expires_at,
        }
    }

    #[test]
    fn test_classify() {
        let now = 1_700_000_000;
        assert_eq!(CredentialState::classify(None, now), CredentialState::Missing);
        assert_eq!(
            CredentialState::classify(Some(bundle(Some(now + 60))), now),
            CredentialState::Valid(bundle(Some(now + 60)))
        );
        assert_eq!(
            CredentialState::classify(Some(bundle(Some(now))), now),
            CredentialState::Expired(bundle(Some(now)))
        );
        assert_eq!(
            CredentialState::classify(Some(bundle(None)), now),
            CredentialState::Expired(bundle(None))
        );
    }
}
