// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Token store persistence tests.

use strava_weekly::error::AppError;
use strava_weekly::models::CredentialBundle;
use strava_weekly::services::TokenStore;

mod common;

#[test]
fn test_load_absent_returns_none() {
    let dir = tempfile::tempdir().unwrap();
    let store = TokenStore::new(dir.path().join("tokens.json"));

    assert!(store.load().unwrap().is_none());
}

#[test]
fn test_save_then_load_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let store = TokenStore::new(dir.path().join("tokens.json"));
    let bundle = common::bundle("access", "refresh", 1_772_409_600);

    store.save(&bundle).unwrap();

    assert_eq!(store.load().unwrap(), Some(bundle));
}

#[test]
fn test_save_replaces_previous_bundle() {
    let dir = tempfile::tempdir().unwrap();
    let store = TokenStore::new(dir.path().join("tokens.json"));

    store.save(&common::bundle("A", "R", 100)).unwrap();
    store.save(&common::bundle("B", "R2", 200)).unwrap();

    assert_eq!(store.load().unwrap(), Some(common::bundle("B", "R2", 200)));
}

#[test]
fn test_save_leaves_no_temp_files_and_creates_parent() {
    let dir = tempfile::tempdir().unwrap();
    let nested = dir.path().join("nested").join("dir");
    let store = TokenStore::new(nested.join("tokens.json"));

    store.save(&common::bundle("A", "R", 100)).unwrap();

    let entries: Vec<_> = std::fs::read_dir(&nested)
        .unwrap()
        .map(|e| e.unwrap().file_name())
        .collect();
    assert_eq!(entries, vec![std::ffi::OsString::from("tokens.json")]);
}

#[test]
fn test_missing_expiry_round_trips() {
    let dir = tempfile::tempdir().unwrap();
    let store = TokenStore::new(dir.path().join("tokens.json"));
    let bundle = CredentialBundle {
        access_token: "A".to_string(),
        refresh_token: "R".to_string(),
        expires_at: None,
    };

    store.save(&bundle).unwrap();
    assert_eq!(store.load().unwrap(), Some(bundle));
}

#[test]
fn test_load_accepts_raw_token_response() {
    // Files written by older tooling hold the full token endpoint payload
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("tokens.json");
    std::fs::write(
        &path,
        r#"{"token_type":"Bearer","expires_at":1772409600,"expires_in":21600,
            "refresh_token":"R","access_token":"A","athlete":{"id":1}}"#,
    )
    .unwrap();

    let loaded = TokenStore::new(&path).load().unwrap();
    assert_eq!(loaded, Some(common::bundle("A", "R", 1_772_409_600)));
}

#[test]
fn test_corrupt_file_is_format_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("tokens.json");
    std::fs::write(&path, "{\"access_token\": \"A\", ").unwrap();

    let err = TokenStore::new(&path).load().unwrap_err();
    assert!(matches!(err, AppError::TokenFormat { .. }), "got {:?}", err);
}

#[test]
fn test_unreadable_location_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    // A directory where the file should be
    let path = dir.path().join("tokens.json");
    std::fs::create_dir(&path).unwrap();

    let store = TokenStore::new(&path);
    assert!(matches!(store.load(), Err(AppError::TokenStoreIo { .. })));
    assert!(matches!(
        store.save(&common::bundle("A", "R", 1)),
        Err(AppError::TokenStoreIo { .. })
    ));
}
