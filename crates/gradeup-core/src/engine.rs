//! Planner engine
//!
//! Owns the load-compute-save cycle around the pure scheduling
//! functions. Date-sensitive operations take the current date as a
//! parameter so callers (and tests) control the clock.

use chrono::NaiveDate;
use gradeup_config::Preferences;
use gradeup_model::{BreathingSession, QuizRecord, StressEntry, StudentProfile, StudyPlan, WellnessLog};
use gradeup_store::{AuditEvent, AuditEventType, Store, StoreError};
use gradeup_util::{GradeUpError, Result, SessionId};
use std::sync::Arc;
use tracing::{debug, info};

use crate::{
    daily_reconcile, evaluate_achievements, generate_plan, overall_stats, quiz_stats, roll_over,
    roll_over_auto, study_streak, wellness_stats, AchievementMetrics, completion_trend,
    DailyOutcome, OverallStats, QuizStats, RolloverOutcome, RolloverStrategy, Trend, WellnessStats,
};

/// Everything the progress views show at once.
#[derive(Debug, Clone, PartialEq)]
pub struct ProgressSummary {
    pub overall: OverallStats,
    pub trend: Trend,
    pub streak: u32,
    pub quiz: QuizStats,
    pub wellness: WellnessStats,
}

/// The planner engine
pub struct PlannerEngine {
    prefs: Preferences,
    store: Arc<dyn Store>,
}

impl PlannerEngine {
    pub fn new(prefs: Preferences, store: Arc<dyn Store>) -> Self {
        info!(
            rollover_enabled = prefs.rollover.enabled,
            max_days = prefs.rollover.max_days,
            "Planner engine initialized"
        );
        Self { prefs, store }
    }

    pub fn preferences(&self) -> &Preferences {
        &self.prefs
    }

    /// Persist new preferences and adopt them for subsequent operations.
    pub fn update_preferences(&mut self, prefs: Preferences) -> Result<()> {
        self.store
            .save_preferences(&prefs)
            .map_err(store_err)?;
        let _ = self
            .store
            .append_audit(AuditEvent::new(AuditEventType::PreferencesSaved));
        self.prefs = prefs;
        Ok(())
    }

    pub fn save_profile(&self, profile: &StudentProfile) -> Result<()> {
        self.store.save_profile(profile).map_err(store_err)?;
        let _ = self
            .store
            .append_audit(AuditEvent::new(AuditEventType::ProfileSaved));
        Ok(())
    }

    /// Generate a plan for `date`, replacing any existing plan on that
    /// date.
    pub fn generate_plan(&self, date: NaiveDate) -> Result<StudyPlan> {
        let profile = self.store.load_profile().map_err(store_err)?.unwrap_or_default();
        let plan = generate_plan(&profile, date);

        let mut plans = self.store.load_plans().map_err(store_err)?;
        plans.retain(|p| p.date != date);
        plans.push(plan.clone());
        self.store.save_plans(&plans).map_err(store_err)?;

        let _ = self
            .store
            .append_audit(AuditEvent::new(AuditEventType::PlanGenerated {
                date,
                session_count: plan.sessions.len(),
            }));

        Ok(plan)
    }

    /// Mark a session completed. Returns false (without error) when the
    /// date has no plan or the id is not in it.
    pub fn complete_session(&self, date: NaiveDate, session_id: SessionId) -> Result<bool> {
        let mut plans = self.store.load_plans().map_err(store_err)?;

        let Some(plan) = plans.iter_mut().find(|p| p.date == date) else {
            debug!(date = %date, "No plan for date; completion is a no-op");
            return Ok(false);
        };

        let subject = plan
            .sessions
            .iter()
            .find(|s| s.id == session_id)
            .map(|s| s.subject.clone());
        if !plan.mark_completed(session_id) {
            debug!(session_id = %session_id, "Unknown session id; completion is a no-op");
            return Ok(false);
        }

        self.store.save_plans(&plans).map_err(store_err)?;
        let _ = self
            .store
            .append_audit(AuditEvent::new(AuditEventType::SessionCompleted {
                date,
                session_id,
                subject: subject.unwrap_or_default(),
            }));

        Ok(true)
    }

    /// Carry unfinished sessions from `source_date` to `target_date`.
    ///
    /// `force` selects the manual path, which ignores the rollover
    /// enabled toggle.
    pub fn roll_over(
        &self,
        source_date: NaiveDate,
        target_date: NaiveDate,
        strategy: RolloverStrategy,
        force: bool,
    ) -> Result<RolloverOutcome> {
        let plans = self.store.load_plans().map_err(store_err)?;
        let rules = &self.prefs.rollover;

        let outcome = if force {
            roll_over(&plans, source_date, target_date, rules, strategy)
        } else {
            roll_over_auto(&plans, source_date, target_date, rules, strategy)
        };

        if let RolloverOutcome::Rolled { plans, count } = &outcome {
            self.store.save_plans(plans).map_err(store_err)?;
            let _ = self
                .store
                .append_audit(AuditEvent::new(AuditEventType::SessionsRolledOver {
                    source_date,
                    target_date,
                    count: *count,
                }));
        }

        Ok(outcome)
    }

    /// The once-per-day reconciliation pass. Safe to call on every
    /// startup; the persisted marker makes repeat calls no-ops.
    pub fn daily_check(&self, today: NaiveDate) -> Result<DailyOutcome> {
        let plans = self.store.load_plans().map_err(store_err)?;
        let last_check = self.store.last_rollover_check().map_err(store_err)?;

        let outcome = daily_reconcile(
            &plans,
            &self.prefs.rollover,
            RolloverStrategy::Duplicate,
            today,
            last_check,
        );

        match &outcome {
            DailyOutcome::AlreadyChecked => {}
            DailyOutcome::Disabled => {
                self.store.set_last_rollover_check(today).map_err(store_err)?;
            }
            DailyOutcome::Completed {
                plans,
                days_scanned,
                sessions_rolled,
            } => {
                self.store.save_plans(plans).map_err(store_err)?;
                self.store.set_last_rollover_check(today).map_err(store_err)?;
                let _ = self
                    .store
                    .append_audit(AuditEvent::new(AuditEventType::DailyCheckCompleted {
                        days_scanned: *days_scanned,
                        sessions_rolled: *sessions_rolled,
                    }));
            }
        }

        Ok(outcome)
    }

    pub fn record_quiz(&self, record: &QuizRecord) -> Result<()> {
        self.store.record_quiz(record).map_err(store_err)?;
        let _ = self
            .store
            .append_audit(AuditEvent::new(AuditEventType::QuizRecorded {
                subject: record.subject.clone(),
                score: record.score,
                total_questions: record.total_questions,
            }));
        Ok(())
    }

    pub fn save_wellness(&self, log: &WellnessLog) -> Result<()> {
        self.store.save_wellness(log).map_err(store_err)
    }

    /// Append a stress check-in (level 1-10).
    pub fn record_stress(&self, level: u8) -> Result<()> {
        if !(1..=10).contains(&level) {
            return Err(GradeUpError::validation(format!(
                "stress level must be 1-10, got {level}"
            )));
        }
        let mut log = self.store.load_wellness().map_err(store_err)?;
        log.stress_levels.push(StressEntry {
            date: gradeup_util::now().to_rfc3339(),
            level,
        });
        self.store.save_wellness(&log).map_err(store_err)
    }

    /// Append a finished breathing exercise.
    pub fn record_breathing(&self, cycles: u32, duration_secs: u32) -> Result<()> {
        let mut log = self.store.load_wellness().map_err(store_err)?;
        log.breathing_sessions.push(BreathingSession {
            date: gradeup_util::now().to_rfc3339(),
            cycles,
            duration: duration_secs,
        });
        self.store.save_wellness(&log).map_err(store_err)
    }

    pub fn plans(&self) -> Result<Vec<StudyPlan>> {
        self.store.load_plans().map_err(store_err)
    }

    pub fn earned_achievement_ids(&self) -> Result<Vec<String>> {
        self.store.earned_achievements().map_err(store_err)
    }

    /// Aggregate every progress view in one pass.
    pub fn progress(&self, today: NaiveDate) -> Result<ProgressSummary> {
        let plans = self.store.load_plans().map_err(store_err)?;
        let quiz_history = self.store.load_quiz_history().map_err(store_err)?;
        let wellness = self.store.load_wellness().map_err(store_err)?;

        Ok(ProgressSummary {
            overall: overall_stats(&plans),
            trend: completion_trend(&plans, today),
            streak: study_streak(&plans, today),
            quiz: quiz_stats(&quiz_history),
            wellness: wellness_stats(&wellness),
        })
    }

    /// Re-evaluate achievements and persist any newly earned ones.
    /// Returns only the new ids; the stored set never shrinks.
    pub fn refresh_achievements(&self, today: NaiveDate) -> Result<Vec<&'static str>> {
        let plans = self.store.load_plans().map_err(store_err)?;
        let quiz_history = self.store.load_quiz_history().map_err(store_err)?;
        let wellness = self.store.load_wellness().map_err(store_err)?;
        let profile = self.store.load_profile().map_err(store_err)?.unwrap_or_default();

        let metrics =
            AchievementMetrics::collect(&plans, &quiz_history, &wellness, &profile, today);
        let satisfied = evaluate_achievements(&metrics);

        let mut earned = self.store.earned_achievements().map_err(store_err)?;
        let newly_earned: Vec<&'static str> = satisfied
            .into_iter()
            .filter(|id| !earned.iter().any(|e| e == id))
            .collect();

        if !newly_earned.is_empty() {
            earned.extend(newly_earned.iter().map(|id| id.to_string()));
            self.store
                .save_earned_achievements(&earned)
                .map_err(store_err)?;
            for id in &newly_earned {
                info!(achievement = id, "Achievement earned");
                let _ = self
                    .store
                    .append_audit(AuditEvent::new(AuditEventType::AchievementEarned {
                        achievement_id: id.to_string(),
                    }));
            }
        }

        Ok(newly_earned)
    }
}

fn store_err(e: StoreError) -> GradeUpError {
    GradeUpError::store(e.to_string())
}
