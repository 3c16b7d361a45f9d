//! Default paths for gradeup components
//!
//! Paths are user-writable by default (no root required):
//! - Data: `$XDG_DATA_HOME/gradeup` or `~/.local/share/gradeup`

use std::path::PathBuf;

/// Environment variable for overriding the data directory
pub const GRADEUP_DATA_DIR_ENV: &str = "GRADEUP_DATA_DIR";

/// Application subdirectory name
const APP_DIR: &str = "gradeup";

/// Get the default data directory.
///
/// Order of precedence:
/// 1. `$GRADEUP_DATA_DIR` environment variable (if set)
/// 2. `$XDG_DATA_HOME/gradeup` (if XDG_DATA_HOME is set)
/// 3. `~/.local/share/gradeup` (fallback)
pub fn default_data_dir() -> PathBuf {
    if let Ok(path) = std::env::var(GRADEUP_DATA_DIR_ENV) {
        return PathBuf::from(path);
    }

    data_dir_without_env()
}

/// Get the data directory without checking GRADEUP_DATA_DIR env var.
/// Used for default values where the env var is checked separately.
pub fn data_dir_without_env() -> PathBuf {
    if let Ok(data_home) = std::env::var("XDG_DATA_HOME") {
        return PathBuf::from(data_home).join(APP_DIR);
    }

    if let Ok(home) = std::env::var("HOME") {
        return PathBuf::from(home)
            .join(".local")
            .join("share")
            .join(APP_DIR);
    }

    // Last resort
    PathBuf::from("/tmp").join(APP_DIR).join("data")
}

/// Default location of an exported/importable preferences file.
pub fn default_preferences_path() -> PathBuf {
    default_data_dir().join("preferences.json")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn data_dir_contains_gradeup() {
        let path = data_dir_without_env();
        assert!(path.to_string_lossy().contains("gradeup"));
    }

    #[test]
    fn preferences_path_is_inside_data_dir() {
        let path = default_preferences_path();
        assert!(path.to_string_lossy().ends_with("preferences.json"));
    }
}
