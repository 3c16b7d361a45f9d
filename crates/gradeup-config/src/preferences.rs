//! Validated preferences structures

use crate::schema::{RawPreferences, RawRolloverRules};
use gradeup_util::WallClock;

/// Validated scheduling preferences ready for use by the planner.
#[derive(Debug, Clone, PartialEq)]
pub struct Preferences {
    /// Earliest slot of the study day
    pub start_time: WallClock,

    /// End of the study day
    pub end_time: WallClock,

    /// Longest allowed session, minutes
    pub max_session_duration: u32,

    /// Break between back-to-back sessions, minutes
    pub break_duration: u32,

    pub preferred_difficulty: DifficultyOrder,

    pub study_bursts: bool,
    pub weekend_study: bool,
    pub notifications: bool,

    pub rollover: RolloverRules,
}

impl Preferences {
    /// Convert from raw preferences (after validation).
    ///
    /// Falls back to defaults for any field that fails to convert; callers
    /// are expected to have run `validate_preferences` first.
    pub fn from_raw(raw: RawPreferences) -> Self {
        let defaults = RawPreferences::default();
        Self {
            start_time: raw
                .start_time
                .parse()
                .or_else(|_| defaults.start_time.parse())
                .expect("stock default start time parses"),
            end_time: raw
                .end_time
                .parse()
                .or_else(|_| defaults.end_time.parse())
                .expect("stock default end time parses"),
            max_session_duration: raw.max_session_duration,
            break_duration: raw.break_duration,
            preferred_difficulty: DifficultyOrder::parse(&raw.preferred_difficulty)
                .or_else(|| DifficultyOrder::parse(&defaults.preferred_difficulty))
                .expect("stock default difficulty parses"),
            study_bursts: raw.study_bursts,
            weekend_study: raw.weekend_study,
            notifications: raw.notifications,
            rollover: RolloverRules::from_raw(raw.rollover_rules),
        }
    }

    /// Convert back to the wire representation for persistence.
    pub fn to_raw(&self) -> RawPreferences {
        RawPreferences {
            start_time: self.start_time.to_string(),
            end_time: self.end_time.to_string(),
            max_session_duration: self.max_session_duration,
            break_duration: self.break_duration,
            preferred_difficulty: self.preferred_difficulty.as_str().to_string(),
            study_bursts: self.study_bursts,
            weekend_study: self.weekend_study,
            notifications: self.notifications,
            rollover_rules: self.rollover.to_raw(),
        }
    }
}

impl Default for Preferences {
    fn default() -> Self {
        Self::from_raw(RawPreferences::default())
    }
}

/// How sessions are ordered within a generated plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DifficultyOrder {
    /// Hardest subjects while the learner is fresh
    Adaptive,
    EasyFirst,
    HardFirst,
}

impl DifficultyOrder {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "adaptive" => Some(Self::Adaptive),
            "easy-first" => Some(Self::EasyFirst),
            "hard-first" => Some(Self::HardFirst),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Adaptive => "adaptive",
            Self::EasyFirst => "easy-first",
            Self::HardFirst => "hard-first",
        }
    }
}

/// Where carried sessions land within the target day's schedule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RolloverPriority {
    /// Prepend: carried work comes first
    High,
    /// Append after existing sessions
    Medium,
    /// Append after existing sessions
    Low,
}

impl RolloverPriority {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "high" => Some(Self::High),
            "medium" => Some(Self::Medium),
            "low" => Some(Self::Low),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::High => "high",
            Self::Medium => "medium",
            Self::Low => "low",
        }
    }
}

/// How carried sessions' start hours shift on the target day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeAdjustment {
    /// Anchor at 09:00 regardless of the original slot
    Early,
    /// Keep the original hour, but no earlier than 09:00
    Normal,
    /// Keep the original hour, but no earlier than 13:00
    Late,
}

impl TimeAdjustment {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "early" => Some(Self::Early),
            "normal" => Some(Self::Normal),
            "late" => Some(Self::Late),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Early => "early",
            Self::Normal => "normal",
            Self::Late => "late",
        }
    }
}

/// Validated rollover policy.
#[derive(Debug, Clone, PartialEq)]
pub struct RolloverRules {
    pub enabled: bool,
    pub max_days: u32,
    pub priority: RolloverPriority,
    pub time_adjustment: TimeAdjustment,
    pub auto_distribute: bool,
    pub skip_weekends: bool,
}

impl RolloverRules {
    fn from_raw(raw: RawRolloverRules) -> Self {
        Self {
            enabled: raw.enabled,
            max_days: raw.max_days,
            priority: RolloverPriority::parse(&raw.priority).unwrap_or(RolloverPriority::Medium),
            time_adjustment: TimeAdjustment::parse(&raw.time_adjustment)
                .unwrap_or(TimeAdjustment::Normal),
            auto_distribute: raw.auto_distribute,
            skip_weekends: raw.skip_weekends,
        }
    }

    fn to_raw(&self) -> RawRolloverRules {
        RawRolloverRules {
            enabled: self.enabled,
            max_days: self.max_days,
            priority: self.priority.as_str().to_string(),
            time_adjustment: self.time_adjustment.as_str().to_string(),
            auto_distribute: self.auto_distribute,
            skip_weekends: self.skip_weekends,
        }
    }
}

impl Default for RolloverRules {
    fn default() -> Self {
        Self::from_raw(RawRolloverRules::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_stock_preferences() {
        let prefs = Preferences::default();
        assert_eq!(prefs.start_time.to_string(), "09:00");
        assert_eq!(prefs.end_time.to_string(), "17:00");
        assert_eq!(prefs.max_session_duration, 90);
        assert_eq!(prefs.break_duration, 15);
        assert_eq!(prefs.preferred_difficulty, DifficultyOrder::Adaptive);
        assert!(prefs.rollover.enabled);
        assert_eq!(prefs.rollover.max_days, 3);
        assert_eq!(prefs.rollover.priority, RolloverPriority::Medium);
        assert_eq!(prefs.rollover.time_adjustment, TimeAdjustment::Normal);
        assert!(prefs.rollover.auto_distribute);
        assert!(!prefs.rollover.skip_weekends);
    }

    #[test]
    fn raw_round_trip() {
        let raw = RawPreferences {
            start_time: "08:15".into(),
            preferred_difficulty: "hard-first".into(),
            rollover_rules: RawRolloverRules {
                priority: "high".into(),
                time_adjustment: "late".into(),
                ..Default::default()
            },
            ..Default::default()
        };

        let prefs = Preferences::from_raw(raw.clone());
        assert_eq!(prefs.preferred_difficulty, DifficultyOrder::HardFirst);
        assert_eq!(prefs.rollover.priority, RolloverPriority::High);
        assert_eq!(prefs.rollover.time_adjustment, TimeAdjustment::Late);
        assert_eq!(prefs.to_raw(), raw);
    }
}
