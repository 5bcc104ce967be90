//! Search configuration for the route planner.

use chrono::{FixedOffset, Offset, Utc};

/// Configuration parameters for route search.
#[derive(Debug, Clone)]
pub struct SearchConfig {
    /// Minutes added when a route changes line.
    pub line_change_time_penalty: f64,

    /// Fare added when a route changes line.
    pub line_change_cost_penalty: f64,

    /// Maximum number of labels a single search may create.
    /// Searches that would exceed this fail instead of returning a route.
    pub max_labels: usize,

    /// Offset from UTC of the network's local time (minutes).
    /// Used when no departure time is given.
    pub utc_offset_mins: i32,
}

impl SearchConfig {
    /// Create a new configuration with the given parameters.
    pub fn new(
        line_change_time_penalty: f64,
        line_change_cost_penalty: f64,
        max_labels: usize,
        utc_offset_mins: i32,
    ) -> Self {
        Self {
            line_change_time_penalty,
            line_change_cost_penalty,
            max_labels,
            utc_offset_mins,
        }
    }

    /// Returns the local time offset.
    ///
    /// Offsets of a day or more are not valid and fall back to UTC.
    pub fn utc_offset(&self) -> FixedOffset {
        self.utc_offset_mins
            .checked_mul(60)
            .and_then(FixedOffset::east_opt)
            .unwrap_or_else(|| Utc.fix())
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            line_change_time_penalty: 5.0,
            line_change_cost_penalty: 10.0,
            max_labels: 100_000,
            utc_offset_mins: 330, // UTC+05:30
        }
    }
}
