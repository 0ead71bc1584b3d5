/*
 * Copyright (c) Meta Platforms, Inc. and affiliates.
 * All rights reserved.
 *
 * This source code is licensed under the BSD-style license found in the
 * LICENSE file in the root directory of this source tree.
 */

//! Runtime configuration for a cluster overview panel.

use std::time::Duration;

/// Default interval between snapshot fetches.
pub const DEFAULT_REFRESH_INTERVAL: Duration = Duration::from_millis(1000);

/// Settings shared by the panel and its snapshot feed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OverviewConfig {
    /// Address of the server this panel is attached to. Shown as the
    /// only server in standalone mode and used as the fallback
    /// selection.
    pub own_address: String,
    /// How often the feed polls its source.
    pub refresh_interval: Duration,
}

impl OverviewConfig {
    pub fn new(own_address: impl Into<String>) -> Self {
        Self {
            own_address: own_address.into(),
            refresh_interval: DEFAULT_REFRESH_INTERVAL,
        }
    }

    pub fn with_refresh_interval(mut self, refresh_interval: Duration) -> Self {
        self.refresh_interval = refresh_interval;
        self
    }

    /// Human-readable refresh interval (e.g. "1s", "250ms").
    pub fn refresh_interval_label(&self) -> String {
        let ms = self.refresh_interval.as_millis();
        if ms >= 1000 && ms % 1000 == 0 {
            format!("{}s", ms / 1000)
        } else {
            format!("{}ms", ms)
        }
    }
}
