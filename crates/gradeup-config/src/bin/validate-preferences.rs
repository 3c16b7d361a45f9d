//! Preferences validation CLI tool
//!
//! Validates a gradeup preferences file and reports any errors.

use gradeup_util::default_preferences_path;
use std::path::PathBuf;
use std::process::ExitCode;

fn main() -> ExitCode {
    let args: Vec<String> = std::env::args().collect();

    let prefs_path = match args.get(1) {
        Some(path) => PathBuf::from(path),
        None => {
            let default_path = default_preferences_path();
            eprintln!("Usage: validate-preferences [preferences-file]");
            eprintln!();
            eprintln!("Validates a gradeup preferences file.");
            eprintln!();
            eprintln!("If no path is provided, uses: {}", default_path.display());
            eprintln!();
            eprintln!("Example:");
            eprintln!("  validate-preferences {}", default_path.display());
            eprintln!("  validate-preferences preferences.example.json");
            return ExitCode::from(2);
        }
    };

    if !prefs_path.exists() {
        eprintln!("Error: Preferences file not found: {}", prefs_path.display());
        return ExitCode::from(1);
    }

    match gradeup_config::load_preferences(&prefs_path) {
        Ok(prefs) => {
            println!("✓ Preferences are valid");
            println!();
            println!("Summary:");
            println!("  Study day: {} - {}", prefs.start_time, prefs.end_time);
            println!(
                "  Sessions: up to {} min, {} min breaks",
                prefs.max_session_duration, prefs.break_duration
            );
            println!("  Difficulty order: {}", prefs.preferred_difficulty.as_str());
            if prefs.rollover.enabled {
                println!(
                    "  Rollover: enabled ({} day lookback, {} priority, {} times)",
                    prefs.rollover.max_days,
                    prefs.rollover.priority.as_str(),
                    prefs.rollover.time_adjustment.as_str()
                );
            } else {
                println!("  Rollover: disabled");
            }

            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("✗ Preferences validation failed");
            eprintln!();
            match &e {
                gradeup_config::ConfigError::ReadError(io_err) => {
                    eprintln!("Failed to read file: {}", io_err);
                }
                gradeup_config::ConfigError::ParseError(parse_err) => {
                    eprintln!("JSON parse error:");
                    eprintln!("  {}", parse_err);
                }
                gradeup_config::ConfigError::ValidationFailed { errors } => {
                    eprintln!("Validation errors ({}):", errors.len());
                    for err in errors {
                        eprintln!("  - {}", err);
                    }
                }
            }
            ExitCode::from(1)
        }
    }
}
