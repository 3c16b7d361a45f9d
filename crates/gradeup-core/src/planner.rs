//! Confidence-driven plan generation
//!
//! A deterministic mapping from per-subject confidence to session
//! parameters. Low confidence gets longer, harder review sessions while
//! the learner is fresh; high confidence gets short sessions on new
//! material.

use chrono::NaiveDate;
use gradeup_model::{Difficulty, SessionKind, StudentProfile, StudyPlan, StudySession};
use gradeup_util::{SessionId, WallClock};
use tracing::debug;

/// Subjects scheduled when the profile names none.
pub const DEFAULT_SUBJECTS: [&str; 3] = ["Mathematics", "Physics", "Chemistry"];

/// A plan schedules at most this many subjects.
pub const MAX_SUBJECTS_PER_PLAN: usize = 3;

/// Fixed break between generated sessions, minutes.
pub const BREAK_MINUTES: u32 = 15;

/// Subjects below this confidence become focus areas.
pub const FOCUS_THRESHOLD: u8 = 60;

/// Generate a study plan for `date` from the learner's profile.
pub fn generate_plan(profile: &StudentProfile, date: NaiveDate) -> StudyPlan {
    let subjects: Vec<String> = if profile.subjects.is_empty() {
        DEFAULT_SUBJECTS.iter().map(|s| s.to_string()).collect()
    } else {
        profile.subjects.clone()
    };

    let mut sessions = Vec::new();
    let mut start = WallClock::from_minutes_from_midnight(9 * 60);

    for subject in subjects.iter().take(MAX_SUBJECTS_PER_PLAN) {
        let confidence = profile.confidence_for(subject);
        let (duration, difficulty, kind) = session_parameters(confidence);
        let end = start.plus_minutes(duration);

        sessions.push(StudySession {
            id: SessionId::new(),
            subject: subject.clone(),
            topic: topic_for_subject(subject, kind),
            duration,
            start_time: start,
            end_time: end,
            difficulty,
            kind,
            confidence,
            completed: false,
            rolled_over: false,
            superseded: false,
        });

        start = end.plus_minutes(BREAK_MINUTES);
    }

    let mut focus_areas = Vec::new();
    for subject in &subjects {
        if profile.confidence_for(subject) < FOCUS_THRESHOLD && !focus_areas.contains(subject) {
            focus_areas.push(subject.clone());
        }
    }

    let plan = StudyPlan::new(date, sessions, focus_areas);
    debug!(
        date = %date,
        sessions = plan.sessions.len(),
        total_hours = plan.total_hours,
        "Plan generated"
    );
    plan
}

/// Duration, difficulty and kind for a confidence score.
fn session_parameters(confidence: u8) -> (u32, Difficulty, SessionKind) {
    if confidence < 50 {
        (60, Difficulty::Hard, SessionKind::Review)
    } else if confidence < 70 {
        (45, Difficulty::Medium, SessionKind::Practice)
    } else {
        (30, Difficulty::Easy, SessionKind::New)
    }
}

/// Deterministic topic for a (subject, kind) pair.
///
/// Subjects without a seeded topic table borrow the Mathematics one.
fn topic_for_subject(subject: &str, kind: SessionKind) -> String {
    let topic = match (subject, kind) {
        ("Mathematics", SessionKind::Review) => "Algebra basics",
        ("Mathematics", SessionKind::Practice) => "Calculus problems",
        ("Mathematics", SessionKind::New) => "Advanced integration",
        ("Physics", SessionKind::Review) => "Newton's laws",
        ("Physics", SessionKind::Practice) => "Thermodynamics problems",
        ("Physics", SessionKind::New) => "Quantum mechanics",
        ("Chemistry", SessionKind::Review) => "Atomic structure",
        ("Chemistry", SessionKind::Practice) => "Organic reactions",
        ("Chemistry", SessionKind::New) => "Advanced organic",
        (_, SessionKind::Review) => "Algebra basics",
        (_, SessionKind::Practice) => "Calculus problems",
        (_, SessionKind::New) => "Advanced integration",
    };
    topic.to_string()
}
