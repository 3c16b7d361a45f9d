//! Daily reconciliation
//!
//! The automatic rollover pass that runs once per day: scan the recent
//! past for plans with unfinished sessions and carry them onto today's
//! schedule (or the next eligible days).

use chrono::{Days, NaiveDate};
use gradeup_config::RolloverRules;
use gradeup_model::StudyPlan;
use gradeup_util::skip_weekend;
use tracing::{debug, info};

use crate::{roll_over_auto, RolloverOutcome, RolloverStrategy};

/// Result of the daily reconciliation pass.
#[derive(Debug, Clone, PartialEq)]
pub enum DailyOutcome {
    /// The pass already ran today.
    AlreadyChecked,

    /// Rollover rules are switched off; nothing scanned.
    Disabled,

    /// The pass ran. `plans` is the updated plan list (unchanged when
    /// nothing needed carrying).
    Completed {
        plans: Vec<StudyPlan>,
        days_scanned: usize,
        sessions_rolled: usize,
    },
}

/// Run the daily reconciliation.
///
/// `last_check` is the guard persisted under `last-rollover-check`; the
/// caller updates it after a `Disabled` or `Completed` outcome.
pub fn daily_reconcile(
    plans: &[StudyPlan],
    rules: &RolloverRules,
    strategy: RolloverStrategy,
    today: NaiveDate,
    last_check: Option<NaiveDate>,
) -> DailyOutcome {
    if last_check == Some(today) {
        debug!(today = %today, "Reconciliation already ran today");
        return DailyOutcome::AlreadyChecked;
    }

    if !rules.enabled {
        return DailyOutcome::Disabled;
    }

    // Plans older than the lookback window are expired, not carried.
    let window_start = today
        .checked_sub_days(Days::new(rules.max_days as u64))
        .unwrap_or(today);

    let mut source_dates: Vec<NaiveDate> = plans
        .iter()
        .filter(|p| p.date >= window_start && p.date < today && p.has_incomplete_sessions())
        .map(|p| p.date)
        .collect();
    source_dates.sort();

    let days_scanned = source_dates.len();
    let mut plans = plans.to_vec();
    let mut sessions_rolled = 0;

    for (i, source_date) in source_dates.into_iter().enumerate() {
        // Without auto-distribution everything stacks onto today's plan;
        // with it, consecutive sources land on consecutive eligible days.
        let offset = if rules.auto_distribute { i } else { 0 };
        let target_date = nth_eligible_day(today, offset, rules.skip_weekends);

        match roll_over_auto(&plans, source_date, target_date, rules, strategy) {
            RolloverOutcome::Rolled {
                plans: updated,
                count,
            } => {
                plans = updated;
                sessions_rolled += count;
            }
            RolloverOutcome::NothingToRollOver | RolloverOutcome::Disabled => {}
        }
    }

    info!(days_scanned, sessions_rolled, "Daily reconciliation completed");

    DailyOutcome::Completed {
        plans,
        days_scanned,
        sessions_rolled,
    }
}

/// The n-th rollover target day on or after `base`.
fn nth_eligible_day(base: NaiveDate, n: usize, skip_weekends: bool) -> NaiveDate {
    let mut date = if skip_weekends { skip_weekend(base) } else { base };
    for _ in 0..n {
        date = date.succ_opt().unwrap_or(date);
        if skip_weekends {
            date = skip_weekend(date);
        }
    }
    date
}
