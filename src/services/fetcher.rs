// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Paginated activity retrieval with a page-count safety cap.

use crate::config::Config;
use crate::error::AppError;
use crate::models::Activity;
use crate::services::strava::StravaClient;
use crate::time_utils::TimeWindow;

/// Fetches every activity in a window, one page at a time.
#[derive(Clone)]
pub struct ActivityFetcher {
    client: StravaClient,
    per_page: u32,
    max_pages: u32,
}

impl ActivityFetcher {
    pub fn new(client: StravaClient, config: &Config) -> Self {
        Self {
            client,
            per_page: config.per_page,
            max_pages: config.max_pages,
        }
    }

    /// Fetch all activities in `window`, in the order Strava returns them.
    ///
    /// Stops at the first empty page or after `max_pages` requests. Hitting
    /// the cap truncates silently (a warning is logged). Any HTTP error
    /// aborts the whole fetch.
    pub async fn fetch(
        &self,
        access_token: &str,
        window: TimeWindow,
    ) -> Result<Vec<Activity>, AppError> {
        let (after, before) = window.describe();
        tracing::info!(%after, %before, "Fetching activities from Strava");

        let mut activities = Vec::new();
        let mut exhausted = false;

        for page in 1..=self.max_pages {
            let batch = self
                .client
                .list_activities(access_token, window, page, self.per_page)
                .await?;

            if batch.is_empty() {
                exhausted = true;
                break;
            }

            tracing::debug!(page, count = batch.len(), "Fetched activity page");
            activities.extend(batch);
        }

        if !exhausted {
            tracing::warn!(
                max_pages = self.max_pages,
                fetched = activities.len(),
                "Page cap reached, results may be truncated"
            );
        }

        tracing::info!(count = activities.len(), "Activities fetched");
        Ok(activities)
    }
}
