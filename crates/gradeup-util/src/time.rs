//! Time utilities for gradeup
//!
//! Study plans are keyed by calendar date and sessions carry `HH:MM`
//! wall-clock slots, so everything here is local time.
//!
//! # Mock Time for Development
//!
//! In debug builds, the `GRADEUP_MOCK_TIME` environment variable can be set
//! to override the system time for all time-sensitive operations. This is
//! useful for testing the once-per-day rollover trigger and streak counting.
//!
//! Format: `YYYY-MM-DD HH:MM:SS` (e.g., `2026-01-05 08:00:00`)
//!
//! Example:
//! ```bash
//! GRADEUP_MOCK_TIME="2026-01-05 08:00:00" cargo run
//! ```

use chrono::{DateTime, Datelike, Local, NaiveDate, NaiveDateTime, TimeZone, Weekday};
use serde::de::Error as DeError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

/// Environment variable name for mock time (debug builds only)
pub const MOCK_TIME_ENV_VAR: &str = "GRADEUP_MOCK_TIME";

/// Cached mock time offset from the real time when the process started.
/// This allows mock time to advance naturally.
static MOCK_TIME_OFFSET: OnceLock<Option<chrono::Duration>> = OnceLock::new();

fn get_mock_time_offset() -> Option<chrono::Duration> {
    *MOCK_TIME_OFFSET.get_or_init(|| {
        #[cfg(debug_assertions)]
        {
            if let Ok(mock_time_str) = std::env::var(MOCK_TIME_ENV_VAR) {
                if let Ok(naive_dt) =
                    NaiveDateTime::parse_from_str(&mock_time_str, "%Y-%m-%d %H:%M:%S")
                {
                    if let Some(mock_dt) = Local.from_local_datetime(&naive_dt).single() {
                        let real_now = chrono::Local::now();
                        let offset = mock_dt.signed_duration_since(real_now);
                        tracing::info!(
                            mock_time = %mock_time_str,
                            offset_secs = offset.num_seconds(),
                            "Mock time enabled"
                        );
                        return Some(offset);
                    } else {
                        tracing::warn!(
                            mock_time = %mock_time_str,
                            "Failed to convert mock time to local timezone"
                        );
                    }
                } else {
                    tracing::warn!(
                        mock_time = %mock_time_str,
                        expected_format = "%Y-%m-%d %H:%M:%S",
                        "Invalid mock time format"
                    );
                }
            }
            None
        }
        #[cfg(not(debug_assertions))]
        {
            None
        }
    })
}

/// Returns whether mock time is currently active.
pub fn is_mock_time_active() -> bool {
    get_mock_time_offset().is_some()
}

/// Get the current local time, respecting mock time settings in debug builds.
///
/// In release builds, this always returns the real system time.
pub fn now() -> DateTime<Local> {
    let real_now = chrono::Local::now();

    if let Some(offset) = get_mock_time_offset() {
        real_now + offset
    } else {
        real_now
    }
}

/// Get today's local calendar date, respecting mock time.
pub fn today() -> NaiveDate {
    now().date_naive()
}

/// Whether a date falls on Saturday or Sunday.
pub fn is_weekend(date: NaiveDate) -> bool {
    matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

/// The given date, advanced to the next Monday if it falls on a weekend.
pub fn skip_weekend(date: NaiveDate) -> NaiveDate {
    let mut date = date;
    while is_weekend(date) {
        date = date.succ_opt().unwrap_or(date);
    }
    date
}

/// A `HH:MM` schedule slot, as stored on study sessions.
///
/// Serializes as the `"HH:MM"` string the plan records use on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WallClock {
    hour: u8,
    minute: u8,
}

impl WallClock {
    pub fn new(hour: u8, minute: u8) -> Option<Self> {
        if hour < 24 && minute < 60 {
            Some(Self { hour, minute })
        } else {
            None
        }
    }

    pub fn hour(&self) -> u8 {
        self.hour
    }

    pub fn minute(&self) -> u8 {
        self.minute
    }

    /// Returns minutes since midnight
    pub fn minutes_from_midnight(&self) -> u32 {
        (self.hour as u32) * 60 + self.minute as u32
    }

    /// Build from minutes since midnight, clamping at 23:59.
    pub fn from_minutes_from_midnight(minutes: u32) -> Self {
        let minutes = minutes.min(23 * 60 + 59);
        Self {
            hour: (minutes / 60) as u8,
            minute: (minutes % 60) as u8,
        }
    }

    /// This slot shifted forward by `minutes`, clamping at 23:59.
    pub fn plus_minutes(self, minutes: u32) -> Self {
        Self::from_minutes_from_midnight(self.minutes_from_midnight() + minutes)
    }

    /// This slot with a different hour, minutes unchanged. Hours above 23
    /// clamp to 23 so the slot stays well-formed.
    pub fn with_hour(self, hour: u32) -> Self {
        Self {
            hour: hour.min(23) as u8,
            minute: self.minute,
        }
    }
}

impl fmt::Display for WallClock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour, self.minute)
    }
}

impl FromStr for WallClock {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.split(':').collect();
        if parts.len() != 2 {
            return Err("Expected HH:MM format".into());
        }

        let hour: u8 = parts[0].parse().map_err(|_| "Invalid hour".to_string())?;
        let minute: u8 = parts[1].parse().map_err(|_| "Invalid minute".to_string())?;

        if hour >= 24 {
            return Err("Hour must be 0-23".into());
        }
        if minute >= 60 {
            return Err("Minute must be 0-59".into());
        }

        Ok(Self { hour, minute })
    }
}

impl Serialize for WallClock {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for WallClock {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(D::Error::custom)
    }
}

impl PartialOrd for WallClock {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for WallClock {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.minutes_from_midnight()
            .cmp(&other.minutes_from_midnight())
    }
}
