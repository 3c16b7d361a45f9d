//! Scheduling preferences for gradeup
//!
//! Preferences live as a JSON document with:
//! - Study-day window, session and break durations
//! - Difficulty ordering for generated plans
//! - Rollover rules for carrying unfinished sessions forward
//! - Validation with clear error messages

mod preferences;
mod schema;
mod validation;

pub use preferences::*;
pub use schema::*;
pub use validation::*;

use std::path::Path;
use thiserror::Error;

/// Preferences errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read preferences file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse JSON: {0}")]
    ParseError(#[from] serde_json::Error),

    #[error("Validation failed: {errors:?}")]
    ValidationFailed { errors: Vec<ValidationError> },
}

pub type ConfigResult<T> = Result<T, ConfigError>;

/// Load and validate preferences from a JSON file.
pub fn load_preferences(path: impl AsRef<Path>) -> ConfigResult<Preferences> {
    let content = std::fs::read_to_string(path)?;
    parse_preferences(&content)
}

/// Parse and validate preferences from a JSON string.
pub fn parse_preferences(content: &str) -> ConfigResult<Preferences> {
    let raw: RawPreferences = serde_json::from_str(content)?;

    let errors = validate_preferences(&raw);
    if !errors.is_empty() {
        return Err(ConfigError::ValidationFailed { errors });
    }

    Ok(Preferences::from_raw(raw))
}
