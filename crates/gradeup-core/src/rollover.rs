//! Rollover scheduling
//!
//! Pure functions that carry unfinished sessions from one plan to
//! another. Callers pass the full plan list in and get a new list back;
//! nothing here touches the store.

use chrono::NaiveDate;
use gradeup_config::{RolloverPriority, RolloverRules, TimeAdjustment};
use gradeup_model::{plan_for_date, StudyPlan, StudySession};
use gradeup_util::{SessionId, WallClock};
use tracing::{debug, info};

/// What happens to the source plan's rolled sessions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RolloverStrategy {
    /// Leave the source untouched; rolled sessions are copies. Running
    /// the same rollover twice appends a second copy.
    #[default]
    Duplicate,

    /// Additionally mark the source sessions superseded, so a repeated
    /// rollover finds nothing left to carry.
    Retire,
}

/// Result of a rollover attempt.
#[derive(Debug, Clone, PartialEq)]
pub enum RolloverOutcome {
    /// Sessions were carried; `plans` is the updated plan list.
    Rolled {
        plans: Vec<StudyPlan>,
        count: usize,
    },

    /// Nothing incomplete on the source date. Informational, not an error.
    NothingToRollOver,

    /// Rollover rules are switched off (automatic path only).
    Disabled,
}

/// Automatic rollover: honors the `enabled` gate, then merges.
pub fn roll_over_auto(
    plans: &[StudyPlan],
    source_date: NaiveDate,
    target_date: NaiveDate,
    rules: &RolloverRules,
    strategy: RolloverStrategy,
) -> RolloverOutcome {
    if !rules.enabled {
        debug!(source = %source_date, "Rollover disabled by preferences");
        return RolloverOutcome::Disabled;
    }
    roll_over(plans, source_date, target_date, rules, strategy)
}

/// Carry the source date's incomplete sessions onto the target date.
///
/// The manual path: runs regardless of `rules.enabled`. Only `priority`
/// and `time_adjustment` are read from the rules here.
pub fn roll_over(
    plans: &[StudyPlan],
    source_date: NaiveDate,
    target_date: NaiveDate,
    rules: &RolloverRules,
    strategy: RolloverStrategy,
) -> RolloverOutcome {
    let Some(source) = plan_for_date(plans, source_date) else {
        return RolloverOutcome::NothingToRollOver;
    };

    let incomplete: Vec<StudySession> = source.incomplete_sessions().cloned().collect();
    if incomplete.is_empty() {
        return RolloverOutcome::NothingToRollOver;
    }

    let rolled: Vec<StudySession> = incomplete
        .iter()
        .enumerate()
        .map(|(i, session)| reschedule_session(session, i, rules.time_adjustment))
        .collect();
    let count = rolled.len();

    let mut plans = plans.to_vec();

    if strategy == RolloverStrategy::Retire
        && let Some(source) = plans.iter_mut().find(|p| p.date == source_date)
    {
        for session in &mut source.sessions {
            if session.is_incomplete() {
                session.superseded = true;
            }
        }
    }

    match plans.iter_mut().find(|p| p.date == target_date) {
        Some(target) => {
            // High priority puts carried work first; everything else
            // queues after the day's own sessions.
            if rules.priority == RolloverPriority::High {
                target.prepend_sessions(rolled);
            } else {
                target.append_sessions(rolled);
            }
        }
        None => {
            let focus_areas = distinct_subjects(&rolled);
            plans.push(StudyPlan::new(target_date, rolled, focus_areas));
        }
    }

    info!(
        source = %source_date,
        target = %target_date,
        count,
        "Sessions rolled over"
    );

    RolloverOutcome::Rolled { plans, count }
}

/// A carried copy of `session`, rescheduled for its new day.
///
/// The i-th carried session starts at hour base+i (capped at 23), where
/// the base keeps the original hour but floors it at 09:00 (`normal`),
/// re-anchors at 09:00 (`early`), or floors it at 13:00 (`late`).
/// Minutes are unchanged and the end time shifts with the start.
fn reschedule_session(
    session: &StudySession,
    index: usize,
    adjustment: TimeAdjustment,
) -> StudySession {
    let original_hour = session.start_time.hour() as u32;
    let base = match adjustment {
        TimeAdjustment::Early => 9,
        TimeAdjustment::Normal => original_hour.max(9),
        TimeAdjustment::Late => original_hour.max(13),
    };
    let start = session.start_time.with_hour(base + index as u32);

    let delta = start.minutes_from_midnight() as i64 - session.start_time.minutes_from_midnight() as i64;
    let end = shift_clock(session.end_time, delta);

    StudySession {
        id: SessionId::new(),
        start_time: start,
        end_time: end,
        rolled_over: true,
        completed: false,
        superseded: false,
        ..session.clone()
    }
}

fn shift_clock(clock: WallClock, delta_minutes: i64) -> WallClock {
    let minutes = clock.minutes_from_midnight() as i64 + delta_minutes;
    WallClock::from_minutes_from_midnight(minutes.clamp(0, 23 * 60 + 59) as u32)
}

fn distinct_subjects(sessions: &[StudySession]) -> Vec<String> {
    let mut subjects = Vec::new();
    for session in sessions {
        if !subjects.contains(&session.subject) {
            subjects.push(session.subject.clone());
        }
    }
    subjects
}

#[cfg(test)]
mod tests {
    use super::*;
    use gradeup_model::{Difficulty, SessionKind};

    fn session(subject: &str, start: &str, duration: u32, completed: bool) -> StudySession {
        let start_time: WallClock = start.parse().unwrap();
        StudySession {
            id: SessionId::new(),
            subject: subject.into(),
            topic: "Topic".into(),
            duration,
            start_time,
            end_time: start_time.plus_minutes(duration),
            difficulty: Difficulty::Medium,
            kind: SessionKind::Practice,
            confidence: 55,
            completed,
            rolled_over: false,
            superseded: false,
        }
    }

    fn date(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    fn rules() -> RolloverRules {
        RolloverRules::default()
    }

    #[test]
    fn all_complete_source_rolls_nothing() {
        let plans = vec![StudyPlan::new(
            date("2026-01-05"),
            vec![
                session("Math", "09:00", 60, true),
                session("Physics", "10:15", 45, true),
            ],
            vec![],
        )];

        let outcome = roll_over(
            &plans,
            date("2026-01-05"),
            date("2026-01-06"),
            &rules(),
            RolloverStrategy::Duplicate,
        );
        assert_eq!(outcome, RolloverOutcome::NothingToRollOver);
    }

    #[test]
    fn missing_source_rolls_nothing() {
        let outcome = roll_over(
            &[],
            date("2026-01-05"),
            date("2026-01-06"),
            &rules(),
            RolloverStrategy::Duplicate,
        );
        assert_eq!(outcome, RolloverOutcome::NothingToRollOver);
    }

    #[test]
    fn disabled_rules_gate_the_automatic_path_only() {
        let plans = vec![StudyPlan::new(
            date("2026-01-05"),
            vec![session("Math", "09:00", 60, false)],
            vec![],
        )];
        let rules = RolloverRules {
            enabled: false,
            ..rules()
        };

        let auto = roll_over_auto(
            &plans,
            date("2026-01-05"),
            date("2026-01-06"),
            &rules,
            RolloverStrategy::Duplicate,
        );
        assert_eq!(auto, RolloverOutcome::Disabled);

        let manual = roll_over(
            &plans,
            date("2026-01-05"),
            date("2026-01-06"),
            &rules,
            RolloverStrategy::Duplicate,
        );
        assert!(matches!(manual, RolloverOutcome::Rolled { count: 1, .. }));
    }

    #[test]
    fn merge_into_existing_target_appends_and_recomputes_hours() {
        let plans = vec![
            StudyPlan::new(
                date("2026-01-05"),
                vec![
                    session("Math", "09:00", 60, false),
                    session("Physics", "10:15", 45, false),
                    session("Chemistry", "11:15", 30, true),
                ],
                vec![],
            ),
            StudyPlan::new(
                date("2026-01-06"),
                vec![session("Biology", "09:00", 30, false)],
                vec!["Biology".into()],
            ),
        ];

        let RolloverOutcome::Rolled { plans, count } = roll_over(
            &plans,
            date("2026-01-05"),
            date("2026-01-06"),
            &rules(),
            RolloverStrategy::Duplicate,
        ) else {
            panic!("expected Rolled");
        };

        assert_eq!(count, 2);
        let target = plan_for_date(&plans, date("2026-01-06")).unwrap();
        assert_eq!(target.sessions.len(), 3);
        assert_eq!(target.sessions[0].subject, "Biology");
        assert!(target.sessions[1].rolled_over);
        assert!((target.total_hours - target.computed_total_hours()).abs() < f64::EPSILON);
        assert!((target.total_hours - (30.0 + 60.0 + 45.0) / 60.0).abs() < f64::EPSILON);
    }

    #[test]
    fn high_priority_puts_carried_sessions_first() {
        let plans = vec![
            StudyPlan::new(
                date("2026-01-05"),
                vec![session("Math", "09:00", 60, false)],
                vec![],
            ),
            StudyPlan::new(
                date("2026-01-06"),
                vec![session("Biology", "09:00", 30, false)],
                vec![],
            ),
        ];
        let rules = RolloverRules {
            priority: RolloverPriority::High,
            ..rules()
        };

        let RolloverOutcome::Rolled { plans, .. } = roll_over(
            &plans,
            date("2026-01-05"),
            date("2026-01-06"),
            &rules,
            RolloverStrategy::Duplicate,
        ) else {
            panic!("expected Rolled");
        };

        let target = plan_for_date(&plans, date("2026-01-06")).unwrap();
        assert_eq!(target.sessions[0].subject, "Math");
        assert!(target.sessions[0].rolled_over);
    }

    #[test]
    fn missing_target_creates_a_plan_with_rolled_focus_areas() {
        let plans = vec![StudyPlan::new(
            date("2026-01-05"),
            vec![
                session("Math", "09:00", 60, false),
                session("Math", "10:15", 45, false),
                session("Physics", "11:15", 30, false),
            ],
            vec![],
        )];

        let RolloverOutcome::Rolled { plans, count } = roll_over(
            &plans,
            date("2026-01-05"),
            date("2026-01-06"),
            &rules(),
            RolloverStrategy::Duplicate,
        ) else {
            panic!("expected Rolled");
        };

        assert_eq!(count, 3);
        assert_eq!(plans.len(), 2);
        let target = plan_for_date(&plans, date("2026-01-06")).unwrap();
        assert_eq!(target.sessions.len(), 3);
        assert_eq!(target.focus_areas, vec!["Math", "Physics"]);
        assert!(target.sessions.iter().all(|s| s.rolled_over && !s.completed));
    }

    #[test]
    fn rolled_sessions_get_fresh_ids() {
        let original = session("Math", "09:00", 60, false);
        let original_id = original.id;
        let plans = vec![StudyPlan::new(date("2026-01-05"), vec![original], vec![])];

        let RolloverOutcome::Rolled { plans, .. } = roll_over(
            &plans,
            date("2026-01-05"),
            date("2026-01-06"),
            &rules(),
            RolloverStrategy::Duplicate,
        ) else {
            panic!("expected Rolled");
        };

        let target = plan_for_date(&plans, date("2026-01-06")).unwrap();
        assert_ne!(target.sessions[0].id, original_id);
    }

    #[test]
    fn normal_adjustment_staggers_from_the_original_hour() {
        for (orig, index, expect) in [
            ("09:00", 0, "09:00"),
            ("09:00", 1, "10:00"),
            ("09:00", 2, "11:00"),
            ("14:30", 0, "14:30"),
            ("14:30", 1, "15:30"),
            ("14:30", 2, "16:30"),
            // Floor engages below 09:00
            ("07:45", 0, "09:45"),
            ("07:45", 1, "10:45"),
        ] {
            let rescheduled =
                reschedule_session(&session("Math", orig, 60, false), index, TimeAdjustment::Normal);
            assert_eq!(
                rescheduled.start_time.to_string(),
                expect,
                "orig={orig} index={index}"
            );
        }
    }

    #[test]
    fn early_adjustment_reanchors_at_nine() {
        let rescheduled =
            reschedule_session(&session("Math", "16:30", 60, false), 0, TimeAdjustment::Early);
        assert_eq!(rescheduled.start_time.to_string(), "09:30");
        assert_eq!(rescheduled.end_time.to_string(), "10:30");
    }

    #[test]
    fn late_adjustment_floors_at_thirteen() {
        let early =
            reschedule_session(&session("Math", "09:15", 45, false), 0, TimeAdjustment::Late);
        assert_eq!(early.start_time.to_string(), "13:15");

        let late =
            reschedule_session(&session("Math", "15:00", 45, false), 0, TimeAdjustment::Late);
        assert_eq!(late.start_time.to_string(), "15:00");
    }

    #[test]
    fn start_hour_caps_at_end_of_day() {
        let rescheduled =
            reschedule_session(&session("Math", "22:00", 60, false), 5, TimeAdjustment::Normal);
        assert_eq!(rescheduled.start_time.to_string(), "23:00");
    }

    #[test]
    fn duplicate_strategy_is_not_idempotent() {
        let plans = vec![StudyPlan::new(
            date("2026-01-05"),
            vec![session("Math", "09:00", 60, false)],
            vec![],
        )];

        let RolloverOutcome::Rolled { plans, .. } = roll_over(
            &plans,
            date("2026-01-05"),
            date("2026-01-06"),
            &rules(),
            RolloverStrategy::Duplicate,
        ) else {
            panic!("expected Rolled");
        };

        // The source is untouched, so a second call carries another copy.
        let RolloverOutcome::Rolled { plans, .. } = roll_over(
            &plans,
            date("2026-01-05"),
            date("2026-01-06"),
            &rules(),
            RolloverStrategy::Duplicate,
        ) else {
            panic!("expected Rolled");
        };

        let target = plan_for_date(&plans, date("2026-01-06")).unwrap();
        assert_eq!(target.sessions.len(), 2);
        assert_ne!(target.sessions[0].id, target.sessions[1].id);
    }

    #[test]
    fn retire_strategy_supersedes_the_source() {
        let plans = vec![StudyPlan::new(
            date("2026-01-05"),
            vec![session("Math", "09:00", 60, false)],
            vec![],
        )];

        let RolloverOutcome::Rolled { plans, .. } = roll_over(
            &plans,
            date("2026-01-05"),
            date("2026-01-06"),
            &rules(),
            RolloverStrategy::Retire,
        ) else {
            panic!("expected Rolled");
        };

        let source = plan_for_date(&plans, date("2026-01-05")).unwrap();
        assert!(source.sessions[0].superseded);
        assert!(!source.has_incomplete_sessions());

        // A repeated rollover is now a no-op.
        let again = roll_over(
            &plans,
            date("2026-01-05"),
            date("2026-01-06"),
            &rules(),
            RolloverStrategy::Retire,
        );
        assert_eq!(again, RolloverOutcome::NothingToRollOver);
    }

    #[test]
    fn completed_sessions_stay_behind() {
        let plans = vec![StudyPlan::new(
            date("2026-01-05"),
            vec![
                session("Math", "09:00", 60, true),
                session("Physics", "10:15", 45, false),
            ],
            vec![],
        )];

        let RolloverOutcome::Rolled { plans, count } = roll_over(
            &plans,
            date("2026-01-05"),
            date("2026-01-06"),
            &rules(),
            RolloverStrategy::Duplicate,
        ) else {
            panic!("expected Rolled");
        };

        assert_eq!(count, 1);
        let target = plan_for_date(&plans, date("2026-01-06")).unwrap();
        assert_eq!(target.sessions[0].subject, "Physics");
    }
}
