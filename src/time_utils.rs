// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Shared helpers for date/time windows and formatting.

use chrono::{
    DateTime, Datelike, Duration, Local, NaiveDateTime, NaiveTime, SecondsFormat, TimeZone, Utc,
};

use crate::config::ConfigError;

/// Format a UTC timestamp as RFC3339 using a `Z` suffix.
pub fn format_utc_rfc3339(date: DateTime<Utc>) -> String {
    date.to_rfc3339_opts(SecondsFormat::Secs, true)
}

/// Query bounds for the activity listing (unix seconds).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeWindow {
    pub after: i64,
    pub before: i64,
}

impl TimeWindow {
    /// Render both bounds as RFC3339 for logging.
    pub fn describe(&self) -> (String, String) {
        let fmt = |ts: i64| {
            DateTime::from_timestamp(ts, 0)
                .map(format_utc_rfc3339)
                .unwrap_or_else(|| ts.to_string())
        };
        (fmt(self.after), fmt(self.before))
    }
}

/// A Monday 00:00:00 through Sunday 23:59:59 span in local wall-clock time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WeekWindow {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

impl WeekWindow {
    /// Convert to unix-second bounds using the local timezone.
    pub fn to_time_window(&self) -> TimeWindow {
        TimeWindow {
            after: local_timestamp(self.start),
            before: local_timestamp(self.end),
        }
    }
}

/// Compute the Monday–Sunday week containing `now - weeks_ago` weeks.
///
/// Fails when the offset reaches outside chrono's representable range.
pub fn week_window(now: NaiveDateTime, weeks_ago: u32) -> Result<WeekWindow, ConfigError> {
    let out_of_range = || ConfigError::Invalid {
        var: "STRAVA_WEEKS_AGO",
        reason: format!("{} weeks back is outside the supported date range", weeks_ago),
    };

    let anchor = Duration::try_days(7 * i64::from(weeks_ago))
        .and_then(|back| now.checked_sub_signed(back))
        .ok_or_else(out_of_range)?;
    let monday = anchor
        .date()
        .checked_sub_signed(Duration::days(i64::from(
            anchor.weekday().num_days_from_monday(),
        )))
        .ok_or_else(out_of_range)?;
    let start = monday.and_time(NaiveTime::MIN);
    let end = start
        .checked_add_signed(Duration::days(7) - Duration::seconds(1))
        .ok_or_else(out_of_range)?;
    Ok(WeekWindow { start, end })
}

/// Week window relative to the current local time.
pub fn current_week_window(weeks_ago: u32) -> Result<WeekWindow, ConfigError> {
    week_window(Local::now().naive_local(), weeks_ago)
}

/// Interpret a naive local datetime as a unix timestamp.
///
/// Ambiguous times (DST fall-back) pick the earlier instant; nonexistent
/// times (DST spring-forward gap) fall back to UTC.
fn local_timestamp(naive: NaiveDateTime) -> i64 {
    Local
        .from_local_datetime(&naive)
        .earliest()
        .map(|dt| dt.timestamp())
        .unwrap_or_else(|| naive.and_utc().timestamp())
}
