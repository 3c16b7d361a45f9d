//! Audit event types

use chrono::{DateTime, Local, NaiveDate};
use gradeup_util::SessionId;
use serde::{Deserialize, Serialize};

/// Types of audit events
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AuditEventType {
    /// Plan generated for a date
    PlanGenerated {
        date: NaiveDate,
        session_count: usize,
    },

    /// Session marked completed
    SessionCompleted {
        date: NaiveDate,
        session_id: SessionId,
        subject: String,
    },

    /// Unfinished sessions carried forward
    SessionsRolledOver {
        source_date: NaiveDate,
        target_date: NaiveDate,
        count: usize,
    },

    /// Daily reconciliation pass finished
    DailyCheckCompleted {
        days_scanned: usize,
        sessions_rolled: usize,
    },

    /// Preferences saved
    PreferencesSaved,

    /// Profile saved
    ProfileSaved,

    /// Quiz result recorded
    QuizRecorded {
        subject: String,
        score: u32,
        total_questions: u32,
    },

    /// Achievement newly earned
    AchievementEarned { achievement_id: String },
}

/// Full audit event with metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditEvent {
    /// Unique event ID
    pub id: i64,

    /// Event timestamp
    pub timestamp: DateTime<Local>,

    /// Event type and details
    pub event: AuditEventType,
}

impl AuditEvent {
    pub fn new(event: AuditEventType) -> Self {
        Self {
            id: 0, // Will be set by store
            timestamp: gradeup_util::now(),
            event,
        }
    }
}
