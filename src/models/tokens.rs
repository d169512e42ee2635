// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! OAuth credential models.

use serde::{Deserialize, Serialize};

/// OAuth tokens as returned by the Strava token endpoint and persisted locally.
///
/// Stored at: `~/.strava_tokens.json` (overridable)
///
/// Always replaced as a whole; never patched field by field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CredentialBundle {
    /// Short-lived bearer token
    pub access_token: String,
    /// Long-lived token used to mint a new access token
    pub refresh_token: String,
    /// When the access token expires (unix seconds)
    #[serde(default)]
    pub expires_at: Option<i64>,
}

impl CredentialBundle {
    /// Whether the access token may be used at `now` (unix seconds).
    ///
    /// A missing expiry is treated as already expired.
    pub fn is_valid_at(&self, now: i64) -> bool {
        matches!(self.expires_at, Some(expires_at) if expires_at > now)
    }
}

/// One-time authorization code obtained from the user's consent redirect.
///
/// Consumed by value when exchanged for a [`CredentialBundle`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthorizationCode(String);

impl AuthorizationCode {
    pub fn new(code: impl Into<String>) -> Self {
        Self(code.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
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
    fn test_validity_boundary() {
        assert!(bundle(Some(1_001)).is_valid_at(1_000));
        // Expiring exactly now counts as expired
        assert!(!bundle(Some(1_000)).is_valid_at(1_000));
        assert!(!bundle(Some(900)).is_valid_at(1_000));
        assert!(!bundle(None).is_valid_at(1_000));
    }

    #[test]
    fn test_token_response_with_extra_fields_deserializes() {
        let json = r#"{
            "token_type": "Bearer",
            "access_token": "a9b723",
            "refresh_token": "b5c569",
            "expires_at": 1568775134,
            "expires_in": 20566,
            "athlete": {"id": 1234567890}
        }"#;

        let parsed: CredentialBundle = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.access_token, "a9b723");
        assert_eq!(parsed.refresh_token, "b5c569");
        assert_eq!(parsed.expires_at, Some(1568775134));
    }

    #[test]
    fn test_missing_expiry_deserializes_as_none() {
        let parsed: CredentialBundle =
            serde_json::from_str(r#"{"access_token":"a","refresh_token":"r"}"#).unwrap();
        assert_eq!(parsed.expires_at, None);
    }
}
