//! Preferences validation

use crate::schema::RawPreferences;
use gradeup_util::WallClock;
use thiserror::Error;

/// Validation error
#[derive(Debug, Clone, Error)]
pub enum ValidationError {
    #[error("Invalid time format for {field} ('{value}'): {message}")]
    InvalidTimeFormat {
        field: &'static str,
        value: String,
        message: String,
    },

    #[error("Start time {start} must be before end time {end}")]
    TimeOrder { start: String, end: String },

    #[error("{field} is {value}, must be between {min} and {max}")]
    OutOfRange {
        field: &'static str,
        value: u32,
        min: u32,
        max: u32,
    },

    #[error("Unknown {field} '{value}', expected one of: {allowed}")]
    UnknownVariant {
        field: &'static str,
        value: String,
        allowed: &'static str,
    },
}

pub const BREAK_DURATION_RANGE: (u32, u32) = (5, 60);
pub const MAX_SESSION_DURATION_RANGE: (u32, u32) = (15, 180);
pub const ROLLOVER_MAX_DAYS_RANGE: (u32, u32) = (1, 14);

/// Validate raw preferences. Returns all problems, not just the first.
pub fn validate_preferences(prefs: &RawPreferences) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    let start = check_time("startTime", &prefs.start_time, &mut errors);
    let end = check_time("endTime", &prefs.end_time, &mut errors);

    if let (Some(start), Some(end)) = (start, end)
        && start >= end
    {
        errors.push(ValidationError::TimeOrder {
            start: start.to_string(),
            end: end.to_string(),
        });
    }

    check_range(
        "breakDuration",
        prefs.break_duration,
        BREAK_DURATION_RANGE,
        &mut errors,
    );
    check_range(
        "maxSessionDuration",
        prefs.max_session_duration,
        MAX_SESSION_DURATION_RANGE,
        &mut errors,
    );
    check_range(
        "rolloverRules.maxDays",
        prefs.rollover_rules.max_days,
        ROLLOVER_MAX_DAYS_RANGE,
        &mut errors,
    );

    check_variant(
        "preferredDifficulty",
        &prefs.preferred_difficulty,
        &["adaptive", "easy-first", "hard-first"],
        "adaptive, easy-first, hard-first",
        &mut errors,
    );
    check_variant(
        "rolloverRules.priority",
        &prefs.rollover_rules.priority,
        &["high", "medium", "low"],
        "high, medium, low",
        &mut errors,
    );
    check_variant(
        "rolloverRules.timeAdjustment",
        &prefs.rollover_rules.time_adjustment,
        &["early", "normal", "late"],
        "early, normal, late",
        &mut errors,
    );

    errors
}

fn check_time(
    field: &'static str,
    value: &str,
    errors: &mut Vec<ValidationError>,
) -> Option<WallClock> {
    match value.parse::<WallClock>() {
        Ok(t) => Some(t),
        Err(message) => {
            errors.push(ValidationError::InvalidTimeFormat {
                field,
                value: value.to_string(),
                message,
            });
            None
        }
    }
}

fn check_range(
    field: &'static str,
    value: u32,
    (min, max): (u32, u32),
    errors: &mut Vec<ValidationError>,
) {
    if value < min || value > max {
        errors.push(ValidationError::OutOfRange {
            field,
            value,
            min,
            max,
        });
    }
}

fn check_variant(
    field: &'static str,
    value: &str,
    allowed: &[&str],
    allowed_desc: &'static str,
    errors: &mut Vec<ValidationError>,
) {
    if !allowed.contains(&value) {
        errors.push(ValidationError::UnknownVariant {
            field,
            value: value.to_string(),
            allowed: allowed_desc,
        });
    }
}
