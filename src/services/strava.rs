// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Strava API client for OAuth token calls and activity listing.
//!
//! Handles:
//! - Authorization URL construction
//! - Code exchange and token refresh
//! - Paged activity listing within a time window
//! - Rate limit detection (logged, surfaced as an error)

use serde::Deserialize;

use crate::config::Config;
use crate::error::AppError;
use crate::models::{Activity, AuthorizationCode, CredentialBundle};
use crate::time_utils::TimeWindow;

const GRANT_AUTHORIZATION_CODE: &str = "authorization_code";
const GRANT_REFRESH_TOKEN: &str = "refresh_token";

/// Strava API client.
#[derive(Clone)]
pub struct StravaClient {
    http: reqwest::Client,
    api_base_url: String,
    oauth_base_url: String,
    client_id: String,
    client_secret: String,
    redirect_uri: String,
    scope: String,
}

impl StravaClient {
    /// Create a new Strava client from configuration.
    pub fn new(config: &Config) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_base_url: config.api_base_url.trim_end_matches('/').to_string(),
            oauth_base_url: config.oauth_base_url.trim_end_matches('/').to_string(),
            client_id: config.strava_client_id.clone(),
            client_secret: config.strava_client_secret.clone(),
            redirect_uri: config.redirect_uri.clone(),
            scope: config.scope.clone(),
        }
    }

    /// URL the user visits to grant access.
    pub fn authorization_url(&self) -> String {
        format!(
            "{}/authorize?\
             client_id={}&\
             redirect_uri={}&\
             response_type=code&\
             scope={}",
            self.oauth_base_url,
            urlencoding::encode(&self.client_id),
            urlencoding::encode(&self.redirect_uri),
            urlencoding::encode(&self.scope),
        )
    }

    /// Exchange a one-time authorization code for tokens.
    pub async fn exchange_code(&self, code: AuthorizationCode) -> Result<CredentialBundle, AppError> {
        let code = code.into_inner();
        self.token_request(
            GRANT_AUTHORIZATION_CODE,
            &[("code", code.as_str()), ("grant_type", GRANT_AUTHORIZATION_CODE)],
        )
        .await
    }

    /// Refresh an expired access token.
    pub async fn refresh_token(&self, refresh_token: &str) -> Result<CredentialBundle, AppError> {
        self.token_request(
            GRANT_REFRESH_TOKEN,
            &[
                ("refresh_token", refresh_token),
                ("grant_type", GRANT_REFRESH_TOKEN),
            ],
        )
        .await
    }

    /// List one page of the athlete's activities within `window`.
    pub async fn list_activities(
        &self,
        access_token: &str,
        window: TimeWindow,
        page: u32,
        per_page: u32,
    ) -> Result<Vec<Activity>, AppError> {
        let url = format!("{}/athlete/activities", self.api_base_url);

        let response = self
            .http
            .get(&url)
            .bearer_auth(access_token)
            .query(&[
                ("after", window.after.to_string()),
                ("before", window.before.to_string()),
                ("page", page.to_string()),
                ("per_page", per_page.to_string()),
            ])
            .send()
            .await
            .map_err(|e| AppError::Transport(e.to_string()))?;

        self.check_response_json(response).await
    }

    /// POST to the token endpoint with client credentials plus `params`.
    async fn token_request(
        &self,
        grant: &'static str,
        params: &[(&str, &str)],
    ) -> Result<CredentialBundle, AppError> {
        let mut form = vec![
            ("client_id", self.client_id.as_str()),
            ("client_secret", self.client_secret.as_str()),
        ];
        form.extend_from_slice(params);

        let response = self
            .http
            .post(format!("{}/token", self.oauth_base_url))
            .form(&form)
            .send()
            .await
            .map_err(|e| AppError::Transport(format!("Token {} request failed: {}", grant, e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = body_or_empty(response).await;
            tracing::error!(status = %status, grant, "Strava token request failed");
            if status.as_u16() == 429 {
                tracing::warn!("Strava rate limit hit (429)");
            }
            return Err(AppError::AuthExchange {
                grant,
                status: status.as_u16(),
                body,
            });
        }

        Self::parse_json::<TokenResponse>(response)
            .await
            .map(CredentialBundle::from)
    }

    /// Check response and parse JSON body.
    async fn check_response_json<T: for<'de> Deserialize<'de>>(
        &self,
        response: reqwest::Response,
    ) -> Result<T, AppError> {
        if !response.status().is_success() {
            let status = response.status();
            let body = body_or_empty(response).await;

            if status.as_u16() == 429 {
                tracing::warn!("Strava rate limit hit (429)");
            }

            return Err(AppError::StravaApi {
                status: status.as_u16(),
                body,
            });
        }

        Self::parse_json(response).await
    }

    /// Parse a successful JSON body.
    async fn parse_json<T: for<'de> Deserialize<'de>>(
        response: reqwest::Response,
    ) -> Result<T, AppError> {
        response
            .json()
            .await
            .map_err(|e| AppError::Decode(e.to_string()))
    }
}

/// Token endpoint response. Strava also returns `token_type`, `expires_in`
/// and an `athlete` object, which are ignored.
#[derive(Debug, Clone, Deserialize)]
struct TokenResponse {
    access_token: String,
    refresh_token: String,
    #[serde(default)]
    expires_at: Option<i64>,
}

impl From<TokenResponse> for CredentialBundle {
    fn from(response: TokenResponse) -> Self {
        Self {
            access_token: response.access_token,
            refresh_token: response.refresh_token,
            expires_at: response.expires_at,
        }
    }
}

async fn body_or_empty(response: reqwest::Response) -> String {
    response.text().await.unwrap_or_default()
}
