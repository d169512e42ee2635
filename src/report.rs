// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Weekly report: ties the session, fetcher and aggregates together and
//! renders the result for the terminal.

use std::fmt;

use chrono::DateTime;

use crate::error::AppError;
use crate::models::{Activity, RunSummary};
use crate::services::{ActivityFetcher, SessionManager};
use crate::time_utils::WeekWindow;

const METERS_PER_MILE: f64 = 1609.344;
const FEET_PER_METER: f64 = 3.281;

/// Outcome of one weekly run.
#[derive(Debug, Clone)]
pub struct WeeklyReport {
    pub week: WeekWindow,
    pub sport: String,
    pub summary: RunSummary,
}

impl WeeklyReport {
    pub fn new(week: WeekWindow, sport: impl Into<String>, activities: &[Activity]) -> Self {
        let sport = sport.into();
        let summary = RunSummary::from_activities(activities, &sport);
        Self {
            week,
            sport,
            summary,
        }
    }
}

/// Obtain a token, fetch the week's activities and build the report.
pub async fn build_weekly_report(
    session: &SessionManager,
    fetcher: &ActivityFetcher,
    week: WeekWindow,
    sport: &str,
) -> Result<WeeklyReport, AppError> {
    let access_token = session.get_valid_access_token().await?;
    let activities = fetcher.fetch(&access_token, week.to_time_window()).await?;
    Ok(WeeklyReport::new(week, sport, &activities))
}

pub fn meters_to_km(meters: f64) -> f64 {
    meters / 1000.0
}

pub fn meters_to_miles(meters: f64) -> f64 {
    meters / METERS_PER_MILE
}

/// `1h 2m 3s`, or `2m 3s` under an hour.
pub fn format_duration(seconds: u64) -> String {
    let hours = seconds / 3600;
    let minutes = (seconds % 3600) / 60;
    let secs = seconds % 60;
    if hours > 0 {
        format!("{}h {}m {}s", hours, minutes, secs)
    } else {
        format!("{}m {}s", minutes, secs)
    }
}

/// Pace as `M:SS /km`; `N/A` for zero distance.
pub fn format_pace(distance_meters: f64, moving_secs: u64) -> String {
    if distance_meters <= 0.0 {
        return "N/A".to_string();
    }
    let secs_per_km = moving_secs as f64 / (distance_meters / 1000.0);
    let minutes = (secs_per_km / 60.0).floor() as u64;
    let seconds = (secs_per_km % 60.0).floor() as u64;
    format!("{}:{:02} /km", minutes, seconds)
}

fn format_start_date(raw: &str) -> String {
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.format("%A, %B %d at %I:%M %p").to_string())
        .unwrap_or_else(|_| raw.to_string())
}

/// Report wording for one sport type. `Run` keeps the running phrasing.
struct Labels {
    activity: String,
    plural: &'static str,
    sign_off: &'static str,
}

impl Labels {
    fn for_sport(sport: &str) -> Self {
        if sport.eq_ignore_ascii_case("run") {
            Self {
                activity: "running".to_string(),
                plural: "Runs",
                sign_off: "Keep running!",
            }
        } else {
            Self {
                activity: sport.to_string(),
                plural: "Activities",
                sign_off: "Keep moving!",
            }
        }
    }
}

impl fmt::Display for WeeklyReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let heavy = "=".repeat(50);
        let light = "-".repeat(50);
        let labels = Labels::for_sport(&self.sport);

        writeln!(
            f,
            "\n📅 Week: {} - {}",
            self.week.start.format("%B %d"),
            self.week.end.format("%B %d, %Y")
        )?;

        let summary = &self.summary;
        if summary.is_empty() {
            writeln!(f, "\n📊 No {} activities found this week.", labels.activity)?;
            return writeln!(f, "   Time to lace up those shoes! 👟");
        }

        let distance = summary.total_distance_meters;
        let elevation = summary.total_elevation_meters;

        writeln!(
            f,
            "\n{heavy}\n📊 WEEKLY {} SUMMARY\n{heavy}",
            labels.activity.to_uppercase()
        )?;
        writeln!(f, "\n🏃 Total {}: {}", labels.plural, summary.count())?;
        writeln!(
            f,
            "📏 Total Distance: {:.2} km ({:.2} mi)",
            meters_to_km(distance),
            meters_to_miles(distance)
        )?;
        writeln!(
            f,
            "⏱️  Total Time: {}",
            format_duration(summary.total_moving_time_secs)
        )?;
        writeln!(
            f,
            "⛰️  Total Elevation: {:.0} m ({:.0} ft)",
            elevation,
            elevation * FEET_PER_METER
        )?;
        writeln!(
            f,
            "⚡ Average Pace: {}",
            format_pace(distance, summary.total_moving_time_secs)
        )?;

        writeln!(
            f,
            "\n{light}\nINDIVIDUAL {}:\n{light}",
            labels.plural.to_uppercase()
        )?;
        for run in &summary.runs {
            writeln!(f, "\n  📌 {}", run.name)?;
            writeln!(f, "     Date: {}", format_start_date(&run.start_date))?;
            writeln!(
                f,
                "     Distance: {:.2} km | Time: {} | Pace: {}",
                meters_to_km(run.distance),
                format_duration(run.moving_time),
                format_pace(run.distance, run.moving_time)
            )?;
        }

        writeln!(f, "\n{heavy}\n{} 🎉\n{heavy}", labels.sign_off)
    }
}
