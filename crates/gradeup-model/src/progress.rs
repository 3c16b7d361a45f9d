//! Quiz and wellness progress records

use serde::{Deserialize, Serialize};

/// One finished quiz attempt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizRecord {
    /// RFC 3339 timestamp of the attempt
    pub date: String,

    pub subject: String,

    pub score: u32,
    pub total_questions: u32,

    /// Seconds
    #[serde(default)]
    pub time_spent: u32,

    #[serde(default)]
    pub difficulty: String,
}

impl QuizRecord {
    /// Score as a fraction of the questions asked (0.0 for an empty quiz).
    pub fn fraction(&self) -> f64 {
        if self.total_questions == 0 {
            return 0.0;
        }
        self.score as f64 / self.total_questions as f64
    }

    pub fn is_perfect(&self) -> bool {
        self.total_questions > 0 && self.score == self.total_questions
    }
}

/// A self-reported stress level (1-10).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StressEntry {
    pub date: String,
    pub level: u8,
}

/// One guided breathing session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BreathingSession {
    pub date: String,
    pub cycles: u32,
    /// Seconds
    pub duration: u32,
}

/// The wellness record persisted as a single document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WellnessLog {
    #[serde(default)]
    pub stress_levels: Vec<StressEntry>,

    #[serde(default)]
    pub breathing_sessions: Vec<BreathingSession>,
}
