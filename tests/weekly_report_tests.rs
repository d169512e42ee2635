// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! End-to-end weekly report: refresh, fetch, filter, aggregate.

use chrono::NaiveDate;
use strava_weekly::report::build_weekly_report;
use strava_weekly::time_utils::week_window;
use strava_weekly::AppState;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

mod common;

#[tokio::test]
async fn test_weekly_report_after_refresh() {
    let server = MockServer::start().await;
    let now = common::now();
    let dir = tempfile::tempdir().unwrap();
    let config = common::test_config(&server.uri(), &dir.path().join("tokens.json"));

    Mock::given(method("POST"))
        .and(path("/oauth/token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "access_token": "fresh",
            "refresh_token": "R2",
            "expires_at": now + 3600
        })))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/v3/athlete/activities"))
        .and(header("authorization", "Bearer fresh"))
        .and(query_param("page", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            {"name": "Sunday long run", "type": "Run", "distance": 18000.0,
             "moving_time": 5940, "total_elevation_gain": 120.0,
             "start_date": "2026-03-08T15:00:00Z"},
            {"name": "Commute", "type": "Ride", "distance": 9000.0,
             "moving_time": 1500, "total_elevation_gain": 30.0,
             "start_date": "2026-03-04T16:00:00Z"},
            {"name": "Intervals", "type": "Run", "distance": 8000.0,
             "moving_time": 2460, "total_elevation_gain": 15.0,
             "start_date": "2026-03-03T13:30:00Z"}
        ])))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/v3/athlete/activities"))
        .and(query_param("page", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
        .expect(1)
        .mount(&server)
        .await;

    let state = AppState::new(config, Box::new(common::PanicPrompt));
    state
        .session
        .store()
        .save(&common::bundle("old", "R", now - 10))
        .unwrap();

    let week = week_window(
        NaiveDate::from_ymd_opt(2026, 3, 5)
            .unwrap()
            .and_hms_opt(10, 0, 0)
            .unwrap(),
        0,
    )
    .unwrap();
    let report = build_weekly_report(&state.session, &state.fetcher, week, "Run")
        .await
        .unwrap();

    assert_eq!(report.summary.count(), 2);
    assert_eq!(report.summary.total_distance_meters, 26000.0);
    assert_eq!(report.summary.total_moving_time_secs, 8400);
    assert_eq!(report.summary.total_elevation_meters, 135.0);
    assert_eq!(report.summary.runs[0].name, "Intervals");

    let text = report.to_string();
    assert!(text.contains("Total Runs: 2"));
    assert!(text.contains("Total Distance: 26.00 km"));
    assert!(text.contains("Total Time: 2h 20m 0s"));
    assert!(!text.contains("Commute"));

    assert_eq!(
        state.session.store().load().unwrap(),
        Some(common::bundle("fresh", "R2", now + 3600))
    );
}
