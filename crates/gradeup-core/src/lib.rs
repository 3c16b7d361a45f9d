//! Core planning engine for gradeup
//!
//! Pure scheduling logic (plan generation, rollover, reconciliation,
//! stats, achievements) plus the `PlannerEngine` that wires it to a
//! store. The pure functions never touch persistence; the engine owns
//! the load-compute-save cycle and the audit trail.

mod achievements;
mod engine;
mod planner;
mod reconcile;
mod rollover;
mod stats;

pub use achievements::*;
pub use engine::*;
pub use planner::*;
pub use reconcile::*;
pub use rollover::*;
pub use stats::*;
