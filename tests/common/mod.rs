// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use strava_weekly::config::Config;
use strava_weekly::error::AppError;
use strava_weekly::models::{AuthorizationCode, CredentialBundle};
use strava_weekly::services::AuthorizationPrompt;

/// Config pointing every Strava endpoint at a mock server.
#[allow(dead_code)]
pub fn test_config(server_uri: &str, token_file: &Path) -> Config {
    Config {
        strava_client_id: "test_client_id".to_string(),
        strava_client_secret: "test_secret".to_string(),
        oauth_base_url: format!("{}/oauth", server_uri),
        api_base_url: format!("{}/api/v3", server_uri),
        token_file: token_file.to_path_buf(),
        ..Config::default()
    }
}

#[allow(dead_code)]
pub fn now() -> i64 {
    chrono::Utc::now().timestamp()
}

#[allow(dead_code)]
pub fn bundle(access: &str, refresh: &str, expires_at: i64) -> CredentialBundle {
    CredentialBundle {
        access_token: access.to_string(),
        refresh_token: refresh.to_string(),
        expires_at: Some(expires_at),
    }
}

/// Prompt that returns a fixed code and counts how often it was asked.
#[allow(dead_code)]
#[derive(Clone)]
pub struct CannedPrompt {
    code: String,
    calls: Arc<AtomicUsize>,
}

#[allow(dead_code)]
impl CannedPrompt {
    pub fn new(code: &str) -> Self {
        Self {
            code: code.to_string(),
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl AuthorizationPrompt for CannedPrompt {
    fn request_code(&self, authorize_url: &str) -> Result<AuthorizationCode, AppError> {
        assert!(authorize_url.contains("response_type=code"));
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(AuthorizationCode::new(self.code.clone()))
    }
}

/// Prompt that fails the test if the interactive path is taken.
#[allow(dead_code)]
pub struct PanicPrompt;

impl AuthorizationPrompt for PanicPrompt {
    fn request_code(&self, _authorize_url: &str) -> Result<AuthorizationCode, AppError> {
        panic!("interactive authorization should not be requested");
    }
}

/// A page of `count` run records as Strava would return them.
#[allow(dead_code)]
pub fn activity_page(start_id: u64, count: usize) -> serde_json::Value {
    let items: Vec<serde_json::Value> = (0..count as u64)
        .map(|i| {
            let id = start_id + i;
            serde_json::json!({
                "id": id,
                "name": format!("Run {}", id),
                "type": "Run",
                "sport_type": "Run",
                "distance": 5000.0,
                "moving_time": 1500,
                "total_elevation_gain": 12.5,
                "start_date": "2026-03-03T07:00:00Z"
            })
        })
        .collect();
    serde_json::Value::Array(items)
}
