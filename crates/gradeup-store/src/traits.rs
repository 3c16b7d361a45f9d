//! Store trait definitions

use chrono::NaiveDate;
use gradeup_config::Preferences;
use gradeup_model::{QuizRecord, StudentProfile, StudyPlan, WellnessLog};

use crate::{AuditEvent, StoreResult};

/// Main store trait
pub trait Store: Send + Sync {
    // Study plans

    /// Load all study plans
    fn load_plans(&self) -> StoreResult<Vec<StudyPlan>>;

    /// Replace all study plans
    fn save_plans(&self, plans: &[StudyPlan]) -> StoreResult<()>;

    // Preferences

    /// Load preferences, None if never saved
    fn load_preferences(&self) -> StoreResult<Option<Preferences>>;

    /// Save preferences (callers validate before saving)
    fn save_preferences(&self, prefs: &Preferences) -> StoreResult<()>;

    // Profile

    /// Load the onboarding profile, None before onboarding
    fn load_profile(&self) -> StoreResult<Option<StudentProfile>>;

    /// Save the onboarding profile
    fn save_profile(&self, profile: &StudentProfile) -> StoreResult<()>;

    // Progress records

    /// Load all recorded quiz attempts
    fn load_quiz_history(&self) -> StoreResult<Vec<QuizRecord>>;

    /// Append one quiz attempt
    fn record_quiz(&self, record: &QuizRecord) -> StoreResult<()>;

    /// Load the wellness record
    fn load_wellness(&self) -> StoreResult<WellnessLog>;

    /// Save the wellness record
    fn save_wellness(&self, log: &WellnessLog) -> StoreResult<()>;

    // Achievements

    /// IDs of achievements already earned
    fn earned_achievements(&self) -> StoreResult<Vec<String>>;

    /// Replace the earned-achievement IDs
    fn save_earned_achievements(&self, ids: &[String]) -> StoreResult<()>;

    // Rollover marker

    /// Date of the last daily reconciliation, None if never run
    fn last_rollover_check(&self) -> StoreResult<Option<NaiveDate>>;

    /// Record that the daily reconciliation ran on `date`
    fn set_last_rollover_check(&self, date: NaiveDate) -> StoreResult<()>;

    // Audit log

    /// Append an audit event
    fn append_audit(&self, event: AuditEvent) -> StoreResult<()>;

    /// Get recent audit events
    fn get_recent_audits(&self, limit: usize) -> StoreResult<Vec<AuditEvent>>;

    // Health

    /// Check if store is healthy
    fn is_healthy(&self) -> bool;
}
