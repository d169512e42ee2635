//! Weekly aggregates over a set of activities.

use crate::models::Activity;

/// Totals for the activities of one sport type within a week.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RunSummary {
    /// Matching activities, sorted by start date (oldest first)
    pub runs: Vec<Activity>,
    /// Total distance (meters)
    pub total_distance_meters: f64,
    /// Total moving time (seconds)
    pub total_moving_time_secs: u64,
    /// Total elevation gain (meters)
    pub total_elevation_meters: f64,
}

impl RunSummary {
    /// Keep activities whose `type` equals `sport` and total them up.
    pub fn from_activities(activities: &[Activity], sport: &str) -> Self {
        let mut runs: Vec<Activity> = activities
            .iter()
            .filter(|a| a.is_type(sport))
            .cloned()
            .collect();
        // ISO 8601 UTC strings sort chronologically
        runs.sort_by(|a, b| a.start_date.cmp(&b.start_date));

        let total_distance_meters = runs.iter().map(|r| r.distance).sum();
        let total_moving_time_secs = runs.iter().map(|r| r.moving_time).sum();
        let total_elevation_meters = runs.iter().map(|r| r.total_elevation_gain).sum();

        Self {
            runs,
            total_distance_meters,
            total_moving_time_secs,
            total_elevation_meters,
        }
    }

    pub fn count(&self) -> usize {
        self.runs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.runs.is_empty()
    }
}
