//! Achievement evaluation
//!
//! A fixed badge table evaluated against aggregate progress metrics.
//! The earned set only ever grows; evaluation itself is pure and the
//! engine merges new ids into the persisted set.

use chrono::NaiveDate;
use gradeup_model::{QuizRecord, StudentProfile, StudyPlan, WellnessLog};

use crate::{max_improvement, quiz_stats, study_streak, wellness_stats};

/// Badge tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tier {
    Bronze,
    Silver,
    Gold,
    Platinum,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    Study,
    Quiz,
    Wellness,
    Consistency,
    Improvement,
}

/// One badge definition.
pub struct Achievement {
    pub id: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    pub tier: Tier,
    pub category: Category,
    condition: fn(&AchievementMetrics) -> bool,
}

impl Achievement {
    pub fn is_earned(&self, metrics: &AchievementMetrics) -> bool {
        (self.condition)(metrics)
    }
}

/// The metrics badge conditions are written against.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AchievementMetrics {
    pub total_study_sessions: usize,
    pub total_study_hours: f64,
    pub total_quizzes: usize,
    pub average_score: u32,
    pub perfect_scores: usize,
    pub average_stress: f64,
    pub recent_stress_entries: usize,
    pub breathing_sessions: usize,
    pub study_streak: u32,
    pub max_improvement: i32,
}

impl AchievementMetrics {
    /// Aggregate all records into the metric set.
    pub fn collect(
        plans: &[StudyPlan],
        quiz_history: &[QuizRecord],
        wellness: &WellnessLog,
        profile: &StudentProfile,
        today: NaiveDate,
    ) -> Self {
        let quiz = quiz_stats(quiz_history);
        let well = wellness_stats(wellness);

        let total_study_sessions = plans.iter().map(|p| p.completed_count()).sum();
        let total_study_hours = plans
            .iter()
            .flat_map(|p| &p.sessions)
            .filter(|s| s.completed)
            .map(|s| s.duration as f64 / 60.0)
            .sum();

        Self {
            total_study_sessions,
            total_study_hours,
            total_quizzes: quiz.total_quizzes,
            average_score: quiz.average_score,
            perfect_scores: quiz.perfect_scores,
            average_stress: well.average_stress,
            recent_stress_entries: well.recent_stress_entries,
            breathing_sessions: well.breathing_sessions,
            study_streak: study_streak(plans, today),
            max_improvement: max_improvement(profile, quiz_history),
        }
    }
}

/// All badge definitions, in display order.
pub fn achievement_definitions() -> &'static [Achievement] {
    &ACHIEVEMENTS
}

static ACHIEVEMENTS: [Achievement; 14] = [
        Achievement {
            id: "first-steps",
            title: "First Steps",
            description: "Complete your first study session",
            tier: Tier::Bronze,
            category: Category::Study,
            condition: |m| m.total_study_sessions >= 1,
        },
        Achievement {
            id: "study-warrior",
            title: "Study Warrior",
            description: "Complete 25 study sessions",
            tier: Tier::Silver,
            category: Category::Study,
            condition: |m| m.total_study_sessions >= 25,
        },
        Achievement {
            id: "study-master",
            title: "Study Master",
            description: "Complete 100 study sessions",
            tier: Tier::Gold,
            category: Category::Study,
            condition: |m| m.total_study_sessions >= 100,
        },
        Achievement {
            id: "dedicated-learner",
            title: "Dedicated Learner",
            description: "Study for 20+ hours total",
            tier: Tier::Silver,
            category: Category::Study,
            condition: |m| m.total_study_hours >= 20.0,
        },
        Achievement {
            id: "scholar",
            title: "Scholar",
            description: "Study for 100+ hours total",
            tier: Tier::Platinum,
            category: Category::Study,
            condition: |m| m.total_study_hours >= 100.0,
        },
        Achievement {
            id: "quiz-starter",
            title: "Quiz Starter",
            description: "Complete your first quiz",
            tier: Tier::Bronze,
            category: Category::Quiz,
            condition: |m| m.total_quizzes >= 1,
        },
        Achievement {
            id: "quiz-master",
            title: "Quiz Master",
            description: "Achieve 80%+ average score",
            tier: Tier::Gold,
            category: Category::Quiz,
            condition: |m| m.average_score >= 80,
        },
        Achievement {
            id: "perfectionist",
            title: "Perfectionist",
            description: "Score 100% on any quiz",
            tier: Tier::Platinum,
            category: Category::Quiz,
            condition: |m| m.perfect_scores >= 1,
        },
        Achievement {
            id: "quiz-champion",
            title: "Quiz Champion",
            description: "Complete 50 quizzes",
            tier: Tier::Gold,
            category: Category::Quiz,
            condition: |m| m.total_quizzes >= 50,
        },
        Achievement {
            id: "stress-manager",
            title: "Stress Manager",
            description: "Maintain stress level below 5 for a week",
            tier: Tier::Silver,
            category: Category::Wellness,
            condition: |m| m.average_stress <= 5.0 && m.recent_stress_entries >= 7,
        },
        Achievement {
            id: "zen-master",
            title: "Zen Master",
            description: "Complete 20 breathing exercises",
            tier: Tier::Gold,
            category: Category::Wellness,
            condition: |m| m.breathing_sessions >= 20,
        },
        Achievement {
            id: "consistent-learner",
            title: "Consistent Learner",
            description: "Study for 7 consecutive days",
            tier: Tier::Silver,
            category: Category::Consistency,
            condition: |m| m.study_streak >= 7,
        },
        Achievement {
            id: "unstoppable",
            title: "Unstoppable",
            description: "Study for 30 consecutive days",
            tier: Tier::Platinum,
            category: Category::Consistency,
            condition: |m| m.study_streak >= 30,
        },
        Achievement {
            id: "rising-star",
            title: "Rising Star",
            description: "Improve average score by 20+ points",
            tier: Tier::Gold,
            category: Category::Improvement,
            condition: |m| m.max_improvement >= 20,
        },
    ];

/// Ids of every badge the metrics currently satisfy.
pub fn evaluate_achievements(metrics: &AchievementMetrics) -> Vec<&'static str> {
    achievement_definitions()
        .iter()
        .filter(|a| a.is_earned(metrics))
        .map(|a| a.id)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_metrics_earn_nothing() {
        // Default average_stress of 0.0 would wrongly satisfy the stress
        // badge without the entry-count requirement; make it explicit.
        let metrics = AchievementMetrics {
            average_stress: 10.0,
            ..Default::default()
        };
        assert!(evaluate_achievements(&metrics).is_empty());
    }

    #[test]
    fn first_completed_session_earns_first_steps() {
        let metrics = AchievementMetrics {
            total_study_sessions: 1,
            average_stress: 10.0,
            ..Default::default()
        };
        assert_eq!(evaluate_achievements(&metrics), vec!["first-steps"]);
    }

    #[test]
    fn stress_badge_needs_a_full_week_of_entries() {
        let calm_but_new = AchievementMetrics {
            average_stress: 3.0,
            recent_stress_entries: 4,
            ..Default::default()
        };
        assert!(!evaluate_achievements(&calm_but_new).contains(&"stress-manager"));

        let calm_week = AchievementMetrics {
            average_stress: 3.0,
            recent_stress_entries: 7,
            ..Default::default()
        };
        assert!(evaluate_achievements(&calm_week).contains(&"stress-manager"));
    }

    #[test]
    fn tier_progression_on_session_counts() {
        let metrics = AchievementMetrics {
            total_study_sessions: 100,
            average_stress: 10.0,
            ..Default::default()
        };
        let earned = evaluate_achievements(&metrics);
        assert!(earned.contains(&"first-steps"));
        assert!(earned.contains(&"study-warrior"));
        assert!(earned.contains(&"study-master"));
    }

    #[test]
    fn fourteen_definitions_with_unique_ids() {
        let defs = achievement_definitions();
        assert_eq!(defs.len(), 14);

        let mut ids: Vec<&str> = defs.iter().map(|a| a.id).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), 14);
    }
}
