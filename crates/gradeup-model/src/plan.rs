//! Per-date study plans

use crate::StudySession;
use chrono::NaiveDate;
use gradeup_util::SessionId;
use serde::{Deserialize, Serialize};

/// A day's study plan. The date is the natural key: at most one plan per
/// calendar date.
///
/// `total_hours` is derived from the sessions and must never drift from
/// their sum; mutate sessions through the methods here so the recompute
/// always happens.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudyPlan {
    pub date: NaiveDate,
    pub sessions: Vec<StudySession>,
    pub total_hours: f64,
    pub focus_areas: Vec<String>,
}

impl StudyPlan {
    /// Build a plan, deriving `total_hours` from the sessions.
    pub fn new(date: NaiveDate, sessions: Vec<StudySession>, focus_areas: Vec<String>) -> Self {
        let mut plan = Self {
            date,
            sessions,
            total_hours: 0.0,
            focus_areas,
        };
        plan.recompute_total_hours();
        plan
    }

    /// Sum of session durations, in hours.
    pub fn computed_total_hours(&self) -> f64 {
        self.sessions.iter().map(|s| s.duration as f64 / 60.0).sum()
    }

    pub fn recompute_total_hours(&mut self) {
        self.total_hours = self.computed_total_hours();
    }

    /// Append sessions at the end of the schedule.
    pub fn append_sessions(&mut self, sessions: impl IntoIterator<Item = StudySession>) {
        self.sessions.extend(sessions);
        self.recompute_total_hours();
    }

    /// Insert sessions at the front of the schedule (high-priority rollover).
    pub fn prepend_sessions(&mut self, sessions: Vec<StudySession>) {
        self.sessions.splice(0..0, sessions);
        self.recompute_total_hours();
    }

    /// Sessions still pending (not completed, not superseded).
    pub fn incomplete_sessions(&self) -> impl Iterator<Item = &StudySession> {
        self.sessions.iter().filter(|s| s.is_incomplete())
    }

    pub fn has_incomplete_sessions(&self) -> bool {
        self.sessions.iter().any(|s| s.is_incomplete())
    }

    pub fn completed_count(&self) -> usize {
        self.sessions.iter().filter(|s| s.completed).count()
    }

    /// Percentage of sessions completed, 0.0 for an empty plan.
    pub fn completion_rate(&self) -> f64 {
        if self.sessions.is_empty() {
            return 0.0;
        }
        self.completed_count() as f64 / self.sessions.len() as f64 * 100.0
    }

    /// Mark a session completed by id. Returns false if the id is not in
    /// this plan (an informational no-op for callers, not an error).
    pub fn mark_completed(&mut self, id: SessionId) -> bool {
        match self.sessions.iter_mut().find(|s| s.id == id) {
            Some(session) => {
                session.complete();
                self.recompute_total_hours();
                true
            }
            None => false,
        }
    }
}

/// Find a plan by date within a collection.
pub fn plan_for_date(plans: &[StudyPlan], date: NaiveDate) -> Option<&StudyPlan> {
    plans.iter().find(|p| p.date == date)
}
