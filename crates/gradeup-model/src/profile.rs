//! Student profile captured at onboarding

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Confidence assumed for a subject the learner never rated.
pub const DEFAULT_CONFIDENCE: u8 = 50;

/// The onboarding profile: who the learner is, what they study, and how
/// confident they feel about each subject (0-100).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentProfile {
    #[serde(default)]
    pub name: String,

    #[serde(default)]
    pub subjects: Vec<String>,

    #[serde(default)]
    pub confidence: HashMap<String, u8>,

    #[serde(default)]
    pub goals: Vec<String>,
}

impl StudentProfile {
    /// Confidence for a subject, defaulting to 50 when unrated.
    pub fn confidence_for(&self, subject: &str) -> u8 {
        self.confidence
            .get(subject)
            .copied()
            .unwrap_or(DEFAULT_CONFIDENCE)
    }
}
