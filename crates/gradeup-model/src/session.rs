//! Study session records

use gradeup_util::{SessionId, WallClock};
use serde::{Deserialize, Serialize};

/// Session difficulty, assigned from the learner's confidence score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

/// What kind of work a session schedules.
///
/// The source data carried two incompatible vocabularies for this field;
/// the one the plan generator produces is the canonical wire format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionKind {
    Review,
    New,
    Practice,
}

/// A single scheduled study session within a day's plan.
///
/// Lifecycle is pending -> completed, one way. `rolled_over` marks copies
/// produced by the rollover scheduler; it is provenance, not a state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudySession {
    pub id: SessionId,
    pub subject: String,
    pub topic: String,

    /// Minutes
    pub duration: u32,

    pub start_time: WallClock,
    pub end_time: WallClock,

    pub difficulty: Difficulty,

    #[serde(rename = "type")]
    pub kind: SessionKind,

    /// Learner's self-rated confidence (0-100) at plan creation
    pub confidence: u8,

    #[serde(default)]
    pub completed: bool,

    #[serde(default)]
    pub rolled_over: bool,

    /// Set on source sessions when the retire rollover strategy copies them
    /// forward. Omitted from JSON while false so existing records are
    /// untouched.
    #[serde(default, skip_serializing_if = "is_false")]
    pub superseded: bool,
}

fn is_false(b: &bool) -> bool {
    !*b
}

impl StudySession {
    /// Whether this session is still a rollover candidate.
    pub fn is_incomplete(&self) -> bool {
        !self.completed && !self.superseded
    }

    /// Mark the session done. One-way: completing twice is a no-op.
    pub fn complete(&mut self) {
        self.completed = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_session() -> StudySession {
        StudySession {
            id: SessionId::new(),
            subject: "Mathematics".into(),
            topic: "Algebra basics".into(),
            duration: 60,
            start_time: "09:00".parse().unwrap(),
            end_time: "10:00".parse().unwrap(),
            difficulty: Difficulty::Hard,
            kind: SessionKind::Review,
            confidence: 40,
            completed: false,
            rolled_over: false,
            superseded: false,
        }
    }

    #[test]
    fn wire_format_is_camel_case() {
        let json = serde_json::to_value(sample_session()).unwrap();

        assert_eq!(json["startTime"], "09:00");
        assert_eq!(json["endTime"], "10:00");
        assert_eq!(json["type"], "review");
        assert_eq!(json["difficulty"], "hard");
        assert_eq!(json["rolledOver"], false);
        // superseded is elided while false
        assert!(json.get("superseded").is_none());
    }

    #[test]
    fn completed_defaults_false_when_absent() {
        let json = r#"{
            "id": "8b4d7896-3a3e-4a6e-9e6a-1d2f3a4b5c6d",
            "subject": "Physics",
            "topic": "Waves",
            "duration": 45,
            "startTime": "10:15",
            "endTime": "11:00",
            "difficulty": "medium",
            "type": "practice",
            "confidence": 62
        }"#;

        let session: StudySession = serde_json::from_str(json).unwrap();
        assert!(!session.completed);
        assert!(!session.rolled_over);
        assert!(!session.superseded);
        assert!(session.is_incomplete());
    }

    #[test]
    fn complete_is_one_way() {
        let mut session = sample_session();
        session.complete();
        assert!(session.completed);
        session.complete();
        assert!(session.completed);
    }

    #[test]
    fn superseded_sessions_are_not_incomplete() {
        let mut session = sample_session();
        session.superseded = true;
        assert!(!session.is_incomplete());
    }
}
