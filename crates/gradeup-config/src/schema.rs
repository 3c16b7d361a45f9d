//! Raw preferences schema (serde-mapped)
//!
//! These structs mirror the JSON document stored under the
//! `scheduling-preferences` key. Every field defaults, so a partial or
//! empty document parses to the stock preferences.

use serde::{Deserialize, Serialize};

/// Raw scheduling preferences, exactly as persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawPreferences {
    /// Earliest slot of the study day, `HH:MM`
    pub start_time: String,

    /// End of the study day, `HH:MM`
    pub end_time: String,

    /// Longest allowed session, minutes
    pub max_session_duration: u32,

    /// Break between back-to-back sessions, minutes
    pub break_duration: u32,

    /// "adaptive", "easy-first", or "hard-first"
    pub preferred_difficulty: String,

    /// Prefer short, frequent sessions over long blocks
    pub study_bursts: bool,

    /// Whether new plans may be generated on weekends
    pub weekend_study: bool,

    pub notifications: bool,

    pub rollover_rules: RawRolloverRules,
}

impl Default for RawPreferences {
    fn default() -> Self {
        Self {
            start_time: "09:00".into(),
            end_time: "17:00".into(),
            max_session_duration: 90,
            break_duration: 15,
            preferred_difficulty: "adaptive".into(),
            study_bursts: false,
            weekend_study: true,
            notifications: true,
            rollover_rules: RawRolloverRules::default(),
        }
    }
}

/// Raw rollover policy knobs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawRolloverRules {
    pub enabled: bool,

    /// How many days back the daily reconciliation looks for unfinished
    /// sessions
    pub max_days: u32,

    /// "high", "medium", or "low"
    pub priority: String,

    /// "early", "normal", or "late"
    pub time_adjustment: String,

    /// Spread carried sessions over consecutive days instead of stacking
    /// them all on today
    pub auto_distribute: bool,

    /// Never land carried sessions on Saturday or Sunday
    pub skip_weekends: bool,
}

impl Default for RawRolloverRules {
    fn default() -> Self {
        Self {
            enabled: true,
            max_days: 3,
            priority: "medium".into(),
            time_adjustment: "normal".into(),
            auto_distribute: true,
            skip_weekends: false,
        }
    }
}
