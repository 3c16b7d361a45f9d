//! Typed records shared across gradeup
//!
//! These structs define the JSON shapes the store persists:
//! - Study sessions and per-date study plans
//! - The student profile captured at onboarding
//! - Quiz and wellness progress records
//!
//! Field names serialize in camelCase to stay compatible with the values
//! the application has always written.

mod plan;
mod profile;
mod progress;
mod session;

pub use plan::*;
pub use profile::*;
pub use progress::*;
pub use session::*;
