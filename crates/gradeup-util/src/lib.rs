//! Shared utilities for gradeup
//!
//! This crate provides:
//! - ID types (SessionId)
//! - Wall-clock time (`HH:MM` schedule slots, mock-time support)
//! - Error types
//! - Default paths for the data directory

mod error;
mod ids;
mod paths;
mod time;

pub use error::*;
pub use ids::*;
pub use paths::*;
pub use time::*;
