//! Progress aggregation
//!
//! Read-only summaries over plans, quiz history and wellness records.

use chrono::NaiveDate;
use gradeup_model::{plan_for_date, QuizRecord, StudentProfile, StudyPlan, WellnessLog};
use std::collections::HashMap;

/// Totals across every plan.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct OverallStats {
    pub total_plans: usize,
    pub total_sessions: usize,
    pub completed_sessions: usize,

    /// Scheduled hours across all plans
    pub total_hours: f64,

    /// Hours of completed sessions only
    pub completed_hours: f64,

    /// Completed sessions as a percentage of all scheduled sessions
    pub average_completion: f64,
}

pub fn overall_stats(plans: &[StudyPlan]) -> OverallStats {
    let total_sessions: usize = plans.iter().map(|p| p.sessions.len()).sum();
    let completed_sessions: usize = plans.iter().map(|p| p.completed_count()).sum();
    let total_hours = plans.iter().map(|p| p.total_hours).sum();
    let completed_hours = plans
        .iter()
        .flat_map(|p| &p.sessions)
        .filter(|s| s.completed)
        .map(|s| s.duration as f64 / 60.0)
        .sum();
    let average_completion = if total_sessions == 0 {
        0.0
    } else {
        completed_sessions as f64 / total_sessions as f64 * 100.0
    };

    OverallStats {
        total_plans: plans.len(),
        total_sessions,
        completed_sessions,
        total_hours,
        completed_hours,
        average_completion,
    }
}

/// Direction of the recent completion-rate movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trend {
    Up,
    Down,
    Neutral,
}

/// Completion trend across the plans before `today`.
///
/// Compares the most recent plan's completion rate against the one
/// before it, with a 5-point dead band. Fewer than two past plans is
/// always `Neutral`.
pub fn completion_trend(plans: &[StudyPlan], today: NaiveDate) -> Trend {
    let mut past: Vec<&StudyPlan> = plans.iter().filter(|p| p.date < today).collect();
    past.sort_by_key(|p| p.date);
    let recent: Vec<&StudyPlan> = past.into_iter().rev().take(2).collect();

    if recent.len() < 2 {
        return Trend::Neutral;
    }

    let latest = recent[0].completion_rate();
    let previous = recent[1].completion_rate();

    let diff = latest - previous;
    if diff > 5.0 {
        Trend::Up
    } else if diff < -5.0 {
        Trend::Down
    } else {
        Trend::Neutral
    }
}

/// Consecutive days with at least one completed session, counting back
/// from `today`. A day with no completions yet does not break a streak
/// that ends yesterday.
pub fn study_streak(plans: &[StudyPlan], today: NaiveDate) -> u32 {
    let has_completion =
        |date: NaiveDate| plan_for_date(plans, date).is_some_and(|p| p.completed_count() > 0);

    let mut day = if has_completion(today) {
        today
    } else {
        match today.pred_opt() {
            Some(yesterday) => yesterday,
            None => return 0,
        }
    };

    let mut streak = 0;
    while has_completion(day) {
        streak += 1;
        match day.pred_opt() {
            Some(prev) => day = prev,
            None => break,
        }
    }
    streak
}

/// Quiz aggregates.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct QuizStats {
    pub total_quizzes: usize,

    /// Mean score percentage, rounded to the nearest point; 0 with no
    /// quizzes taken
    pub average_score: u32,

    pub perfect_scores: usize,

    /// Rounded mean percentage per subject
    pub subject_averages: HashMap<String, u32>,
}

pub fn quiz_stats(history: &[QuizRecord]) -> QuizStats {
    let total_quizzes = history.len();
    let average_score = average_percent(history);
    let perfect_scores = history.iter().filter(|q| q.is_perfect()).count();

    let mut by_subject: HashMap<String, Vec<&QuizRecord>> = HashMap::new();
    for quiz in history {
        by_subject.entry(quiz.subject.clone()).or_default().push(quiz);
    }
    let subject_averages = by_subject
        .into_iter()
        .map(|(subject, quizzes)| {
            let avg = (quizzes.iter().map(|q| q.fraction()).sum::<f64>() / quizzes.len() as f64
                * 100.0)
                .round() as u32;
            (subject, avg)
        })
        .collect();

    QuizStats {
        total_quizzes,
        average_score,
        perfect_scores,
        subject_averages,
    }
}

fn average_percent(quizzes: &[QuizRecord]) -> u32 {
    if quizzes.is_empty() {
        return 0;
    }
    (quizzes.iter().map(|q| q.fraction()).sum::<f64>() / quizzes.len() as f64 * 100.0).round()
        as u32
}

/// Wellness aggregates.
#[derive(Debug, Clone, PartialEq)]
pub struct WellnessStats {
    /// Mean of the last 7 stress entries, one decimal. 10.0 with no
    /// entries: unknown stress is treated as worst-case.
    pub average_stress: f64,

    /// How many of the last 7 entries exist (0-7)
    pub recent_stress_entries: usize,

    pub breathing_sessions: usize,
}

pub fn wellness_stats(log: &WellnessLog) -> WellnessStats {
    let recent: Vec<_> = log.stress_levels.iter().rev().take(7).collect();
    let average_stress = if recent.is_empty() {
        10.0
    } else {
        let mean = recent.iter().map(|s| s.level as f64).sum::<f64>() / recent.len() as f64;
        (mean * 10.0).round() / 10.0
    };

    WellnessStats {
        average_stress,
        recent_stress_entries: recent.len(),
        breathing_sessions: log.breathing_sessions.len(),
    }
}

/// Largest quiz-average-over-initial-confidence gain across the
/// profile's subjects. Subjects without quizzes are ignored; never
/// negative.
pub fn max_improvement(profile: &StudentProfile, history: &[QuizRecord]) -> i32 {
    profile
        .subjects
        .iter()
        .filter_map(|subject| {
            let quizzes: Vec<QuizRecord> = history
                .iter()
                .filter(|q| &q.subject == subject)
                .cloned()
                .collect();
            if quizzes.is_empty() {
                return None;
            }
            let avg = average_percent(&quizzes) as i32;
            Some(avg - profile.confidence_for(subject) as i32)
        })
        .max()
        .unwrap_or(0)
        .max(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use gradeup_model::{Difficulty, SessionKind, StressEntry, StudySession};
    use gradeup_util::{SessionId, WallClock};

    fn session(duration: u32, completed: bool) -> StudySession {
        let start: WallClock = "09:00".parse().unwrap();
        StudySession {
            id: SessionId::new(),
            subject: "Math".into(),
            topic: "Topic".into(),
            duration,
            start_time: start,
            end_time: start.plus_minutes(duration),
            difficulty: Difficulty::Medium,
            kind: SessionKind::Practice,
            confidence: 55,
            completed,
            rolled_over: false,
            superseded: false,
        }
    }

    fn plan(date: &str, sessions: Vec<StudySession>) -> StudyPlan {
        StudyPlan::new(date.parse().unwrap(), sessions, vec![])
    }

    fn quiz(subject: &str, score: u32, total: u32) -> QuizRecord {
        QuizRecord {
            date: "2026-01-05T10:00:00Z".into(),
            subject: subject.into(),
            score,
            total_questions: total,
            time_spent: 60,
            difficulty: "medium".into(),
        }
    }

    fn date(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    #[test]
    fn overall_totals() {
        let plans = vec![
            plan("2026-01-05", vec![session(60, true), session(30, false)]),
            plan("2026-01-06", vec![session(60, true)]),
        ];

        let stats = overall_stats(&plans);
        assert_eq!(stats.total_plans, 2);
        assert_eq!(stats.total_sessions, 3);
        assert_eq!(stats.completed_sessions, 2);
        assert!((stats.total_hours - 2.5).abs() < f64::EPSILON);
        assert!((stats.completed_hours - 2.0).abs() < f64::EPSILON);
        // 2 of 3 sessions done, counted across plans rather than per plan
        assert!((stats.average_completion - 200.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn average_completion_weights_by_session_not_by_plan() {
        // A small finished plan must not outweigh a large unfinished one
        let plans = vec![
            plan(
                "2026-01-05",
                vec![session(60, true), session(60, false), session(60, false)],
            ),
            plan("2026-01-06", vec![session(60, true)]),
        ];
        assert!((overall_stats(&plans).average_completion - 50.0).abs() < 1e-9);
    }

    #[test]
    fn empty_plans_have_zero_stats() {
        assert_eq!(overall_stats(&[]), OverallStats::default());
    }

    #[test]
    fn trend_needs_two_past_plans() {
        let plans = vec![plan("2026-01-05", vec![session(60, true)])];
        assert_eq!(completion_trend(&plans, date("2026-01-06")), Trend::Neutral);
    }

    #[test]
    fn trend_up_when_latest_beats_the_previous() {
        let plans = vec![
            plan("2026-01-03", vec![session(60, false), session(30, false)]),
            plan("2026-01-04", vec![session(60, false), session(30, false)]),
            plan("2026-01-05", vec![session(60, true), session(30, true)]),
        ];
        assert_eq!(completion_trend(&plans, date("2026-01-06")), Trend::Up);
    }

    #[test]
    fn trend_down_when_latest_slips() {
        let plans = vec![
            plan("2026-01-03", vec![session(60, true)]),
            plan("2026-01-04", vec![session(60, true)]),
            plan("2026-01-05", vec![session(60, false)]),
        ];
        assert_eq!(completion_trend(&plans, date("2026-01-06")), Trend::Down);
    }

    #[test]
    fn trend_compares_only_the_last_two_plans() {
        // Older plans with very different rates must not pull the trend;
        // 50% vs 50% over the last two days is steady
        let plans = vec![
            plan("2026-01-02", vec![session(60, true)]),
            plan("2026-01-03", vec![session(60, true)]),
            plan("2026-01-04", vec![session(60, true), session(30, false)]),
            plan("2026-01-05", vec![session(60, true), session(30, false)]),
        ];
        assert_eq!(completion_trend(&plans, date("2026-01-06")), Trend::Neutral);
    }

    #[test]
    fn trend_ignores_today() {
        let plans = vec![
            plan("2026-01-05", vec![session(60, true)]),
            // Today's plan in progress should not drag the trend down
            plan("2026-01-06", vec![session(60, false)]),
        ];
        assert_eq!(completion_trend(&plans, date("2026-01-06")), Trend::Neutral);
    }

    #[test]
    fn streak_counts_back_from_today() {
        let plans = vec![
            plan("2026-01-03", vec![session(60, true)]),
            plan("2026-01-04", vec![session(60, true)]),
            plan("2026-01-05", vec![session(60, true)]),
        ];
        assert_eq!(study_streak(&plans, date("2026-01-05")), 3);
    }

    #[test]
    fn streak_survives_an_unfinished_today() {
        let plans = vec![
            plan("2026-01-04", vec![session(60, true)]),
            plan("2026-01-05", vec![session(60, false)]),
        ];
        assert_eq!(study_streak(&plans, date("2026-01-05")), 1);
    }

    #[test]
    fn streak_breaks_on_a_gap() {
        let plans = vec![
            plan("2026-01-02", vec![session(60, true)]),
            // Jan 3 missing
            plan("2026-01-04", vec![session(60, true)]),
            plan("2026-01-05", vec![session(60, true)]),
        ];
        assert_eq!(study_streak(&plans, date("2026-01-05")), 2);
    }

    #[test]
    fn streak_zero_without_completions() {
        assert_eq!(study_streak(&[], date("2026-01-05")), 0);
    }

    #[test]
    fn quiz_averages_round() {
        let history = vec![quiz("Math", 2, 3), quiz("Math", 3, 3)];
        let stats = quiz_stats(&history);

        assert_eq!(stats.total_quizzes, 2);
        // (0.667 + 1.0) / 2 = 83.3% -> 83
        assert_eq!(stats.average_score, 83);
        assert_eq!(stats.perfect_scores, 1);
        assert_eq!(stats.subject_averages["Math"], 83);
    }

    #[test]
    fn no_quizzes_average_zero() {
        let stats = quiz_stats(&[]);
        assert_eq!(stats.average_score, 0);
        assert!(stats.subject_averages.is_empty());
    }

    #[test]
    fn stress_average_uses_last_seven_entries() {
        let log = WellnessLog {
            stress_levels: (1..=10)
                .map(|level| StressEntry {
                    date: format!("2026-01-{:02}", level),
                    level,
                })
                .collect(),
            breathing_sessions: vec![],
        };

        let stats = wellness_stats(&log);
        // Last 7 entries are levels 4..=10, mean 7.0
        assert_eq!(stats.average_stress, 7.0);
        assert_eq!(stats.recent_stress_entries, 7);
    }

    #[test]
    fn empty_stress_log_reads_worst_case() {
        let stats = wellness_stats(&WellnessLog::default());
        assert_eq!(stats.average_stress, 10.0);
        assert_eq!(stats.recent_stress_entries, 0);
    }

    #[test]
    fn improvement_compares_quiz_average_to_confidence() {
        let profile = StudentProfile {
            name: "Ada".into(),
            subjects: vec!["Math".into(), "Physics".into()],
            confidence: [("Math".to_string(), 40u8), ("Physics".to_string(), 90u8)]
                .into_iter()
                .collect(),
            goals: vec![],
        };
        let history = vec![quiz("Math", 4, 5), quiz("Physics", 3, 5)];

        // Math: 80% vs 40 -> +40; Physics: 60% vs 90 -> -30
        assert_eq!(max_improvement(&profile, &history), 40);
    }

    #[test]
    fn improvement_never_negative() {
        let profile = StudentProfile {
            name: "Ada".into(),
            subjects: vec!["Math".into()],
            confidence: [("Math".to_string(), 90u8)].into_iter().collect(),
            goals: vec![],
        };
        let history = vec![quiz("Math", 1, 5)];
        assert_eq!(max_improvement(&profile, &history), 0);
    }
}
