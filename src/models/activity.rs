// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Strava activity model as returned by the list endpoint.

use serde::{Deserialize, Serialize};

/// Summary activity from `GET /athlete/activities`.
///
/// Only the fields the weekly report reads are modeled; everything else in
/// the payload is ignored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Activity {
    /// Strava activity ID
    #[serde(default)]
    pub id: Option<u64>,
    /// Activity name/title
    #[serde(default = "default_name")]
    pub name: String,
    /// Legacy activity type (Run, Ride, Hike, etc.)
    #[serde(rename = "type", default)]
    pub activity_type: String,
    /// Sport type (Run, TrailRun, VirtualRun, etc.)
    #[serde(default)]
    pub sport_type: Option<String>,
    /// Start date/time (ISO 8601, UTC)
    #[serde(default)]
    pub start_date: String,
    /// Distance in meters
    #[serde(default)]
    pub distance: f64,
    /// Moving time in seconds
    #[serde(default)]
    pub moving_time: u64,
    /// Elevation gain in meters
    #[serde(default)]
    pub total_elevation_gain: f64,
}

fn default_name() -> String {
    "Untitled Run".to_string()
}

impl Activity {
    /// Whether this activity's `type` matches `sport` exactly.
    pub fn is_type(&self, sport: &str) -> bool {
        self.activity_type == sport
    }
}
