//! gradeup - study planner command line
//!
//! Wires together the components:
//! - Preferences loading
//! - Store initialization
//! - Planner engine
//! - The once-per-day rollover check, run before every command

use anyhow::{bail, Context, Result};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use gradeup_core::{DailyOutcome, PlannerEngine, RolloverOutcome, RolloverStrategy, Trend};
use gradeup_model::{plan_for_date, QuizRecord, StudentProfile, StudyPlan};
use gradeup_store::{SqliteStore, Store};
use gradeup_util::{default_data_dir, SessionId};
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

/// gradeup - confidence-driven study planning
#[derive(Parser, Debug)]
#[command(name = "gradeup")]
#[command(about = "Confidence-driven study planning with rollover scheduling", long_about = None)]
struct Args {
    /// Data directory override (or set GRADEUP_DATA_DIR env var)
    #[arg(short, long, env = "GRADEUP_DATA_DIR")]
    data_dir: Option<PathBuf>,

    /// Log level
    #[arg(short, long, default_value = "warn")]
    log_level: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Generate a study plan from the saved profile
    Generate {
        /// Plan date (default: today)
        #[arg(long)]
        date: Option<NaiveDate>,
    },

    /// Show one plan
    Show {
        /// Plan date (default: today)
        #[arg(long)]
        date: Option<NaiveDate>,
    },

    /// List all plans
    List,

    /// Mark a session completed
    Complete {
        /// Session id (from `show`)
        session_id: SessionId,

        /// Plan date (default: today)
        #[arg(long)]
        date: Option<NaiveDate>,
    },

    /// Carry unfinished sessions from one date to another
    Rollover {
        /// Source date
        source: NaiveDate,

        /// Target date (default: today)
        #[arg(long)]
        to: Option<NaiveDate>,

        /// Run even when rollover is disabled in preferences
        #[arg(long)]
        force: bool,

        /// Mark the source sessions superseded instead of leaving copies
        #[arg(long)]
        retire: bool,
    },

    /// Set the onboarding profile
    Profile {
        /// Learner name
        #[arg(long)]
        name: String,

        /// Subject with optional confidence, e.g. "Mathematics=40"
        #[arg(long = "subject", required = true)]
        subjects: Vec<String>,

        /// Study goal (repeatable)
        #[arg(long = "goal")]
        goals: Vec<String>,
    },

    /// Record a quiz result
    Quiz {
        subject: String,
        score: u32,
        total_questions: u32,

        /// Seconds spent
        #[arg(long, default_value_t = 0)]
        time_spent: u32,

        #[arg(long, default_value = "medium")]
        difficulty: String,
    },

    /// Record a stress check-in (1-10)
    Stress { level: u8 },

    /// Record a finished breathing exercise
    Breathe {
        #[arg(long, default_value_t = 4)]
        cycles: u32,

        /// Seconds spent
        #[arg(long, default_value_t = 120)]
        duration: u32,
    },

    /// Show progress statistics
    Stats,

    /// Show achievements, evaluating for newly earned ones
    Achievements,

    /// Show active scheduling preferences
    Prefs,

    /// Import preferences from a JSON file (validated before saving)
    ImportPrefs { file: PathBuf },
}

fn main() -> Result<()> {
    let args = Args::parse();

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&args.log_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .init();

    let data_dir = args.data_dir.clone().unwrap_or_else(default_data_dir);
    std::fs::create_dir_all(&data_dir)
        .with_context(|| format!("Failed to create data directory {:?}", data_dir))?;

    let db_path = data_dir.join("gradeup.db");
    let store: Arc<dyn Store> = Arc::new(
        SqliteStore::open(&db_path)
            .with_context(|| format!("Failed to open database {:?}", db_path))?,
    );
    debug!(db_path = %db_path.display(), "Store initialized");

    let prefs = store
        .load_preferences()
        .context("Failed to load preferences")?
        .unwrap_or_default();
    let mut engine = PlannerEngine::new(prefs, store);

    let today = gradeup_util::today();

    // Reconcile before acting, the way the app did on startup.
    match engine.daily_check(today)? {
        DailyOutcome::Completed {
            sessions_rolled, ..
        } if sessions_rolled > 0 => {
            info!(sessions_rolled, "Carried unfinished sessions forward");
            println!("Rolled over {} unfinished session(s).", sessions_rolled);
        }
        _ => {}
    }

    run_command(&mut engine, args.command, today)
}

fn run_command(engine: &mut PlannerEngine, command: Command, today: NaiveDate) -> Result<()> {
    match command {
        Command::Generate { date } => {
            let date = date.unwrap_or(today);
            let plan = engine.generate_plan(date)?;
            println!("Generated plan for {}:", date);
            print_plan(&plan);
        }

        Command::Show { date } => {
            let date = date.unwrap_or(today);
            let plans = engine.plans()?;
            match plan_for_date(&plans, date) {
                Some(plan) => print_plan(plan),
                None => println!("No plan for {}.", date),
            }
        }

        Command::List => {
            let mut plans = engine.plans()?;
            plans.sort_by_key(|p| p.date);
            if plans.is_empty() {
                println!("No plans yet. Run `gradeup generate` to create one.");
            }
            for plan in &plans {
                println!(
                    "{}  {} session(s), {:.2}h, {:.0}% complete",
                    plan.date,
                    plan.sessions.len(),
                    plan.total_hours,
                    plan.completion_rate()
                );
            }
        }

        Command::Complete { session_id, date } => {
            let date = date.unwrap_or(today);
            if engine.complete_session(date, session_id)? {
                println!("Session completed.");
            } else {
                println!("No such session on {}.", date);
            }
        }

        Command::Rollover {
            source,
            to,
            force,
            retire,
        } => {
            let target = to.unwrap_or(today);
            let strategy = if retire {
                RolloverStrategy::Retire
            } else {
                RolloverStrategy::Duplicate
            };

            match engine.roll_over(source, target, strategy, force)? {
                RolloverOutcome::Rolled { count, .. } => {
                    println!("Rolled {} session(s) from {} to {}.", count, source, target);
                }
                RolloverOutcome::NothingToRollOver => {
                    println!("Nothing to roll over from {}.", source);
                }
                RolloverOutcome::Disabled => {
                    println!("Rollover is disabled in preferences (use --force to override).");
                }
            }
        }

        Command::Profile {
            name,
            subjects,
            goals,
        } => {
            let profile = parse_profile(name, &subjects, goals)?;
            engine.save_profile(&profile)?;
            println!(
                "Profile saved: {} ({} subject(s)).",
                profile.name,
                profile.subjects.len()
            );
        }

        Command::Quiz {
            subject,
            score,
            total_questions,
            time_spent,
            difficulty,
        } => {
            if total_questions == 0 || score > total_questions {
                bail!("score must be between 0 and total_questions");
            }
            let record = QuizRecord {
                date: gradeup_util::now().to_rfc3339(),
                subject,
                score,
                total_questions,
                time_spent,
                difficulty,
            };
            engine.record_quiz(&record)?;
            println!(
                "Recorded: {}/{} ({}%).",
                record.score,
                record.total_questions,
                (record.fraction() * 100.0).round()
            );
        }

        Command::Stress { level } => {
            engine.record_stress(level)?;
            println!("Stress check-in recorded ({}/10).", level);
        }

        Command::Breathe { cycles, duration } => {
            engine.record_breathing(cycles, duration)?;
            println!("Breathing exercise recorded ({} cycles).", cycles);
        }

        Command::Stats => {
            let progress = engine.progress(today)?;
            println!("Plans:      {}", progress.overall.total_plans);
            println!(
                "Sessions:   {} ({} completed)",
                progress.overall.total_sessions, progress.overall.completed_sessions
            );
            println!(
                "Hours:      {:.2} scheduled, {:.2} completed",
                progress.overall.total_hours, progress.overall.completed_hours
            );
            println!(
                "Completion: {:.0}% average, trending {}",
                progress.overall.average_completion,
                match progress.trend {
                    Trend::Up => "up",
                    Trend::Down => "down",
                    Trend::Neutral => "steady",
                }
            );
            println!("Streak:     {} day(s)", progress.streak);
            if progress.quiz.total_quizzes > 0 {
                println!(
                    "Quizzes:    {} taken, {}% average, {} perfect",
                    progress.quiz.total_quizzes,
                    progress.quiz.average_score,
                    progress.quiz.perfect_scores
                );
            }
            if progress.wellness.recent_stress_entries > 0 {
                println!(
                    "Stress:     {:.1} average over the last {} check-in(s)",
                    progress.wellness.average_stress, progress.wellness.recent_stress_entries
                );
            }
        }

        Command::Achievements => {
            let newly_earned = engine.refresh_achievements(today)?;
            for id in &newly_earned {
                println!("New achievement: {}!", id);
            }

            let earned = engine.earned_achievement_ids()?;
            println!(
                "Earned {} of {} achievements:",
                earned.len(),
                gradeup_core::achievement_definitions().len()
            );
            for def in gradeup_core::achievement_definitions() {
                let mark = if earned.iter().any(|e| e == def.id) {
                    "✓"
                } else {
                    " "
                };
                println!("  [{}] {} - {}", mark, def.title, def.description);
            }
        }

        Command::Prefs => {
            let prefs = engine.preferences();
            println!("Study day:  {} - {}", prefs.start_time, prefs.end_time);
            println!(
                "Sessions:   up to {} min, {} min breaks, {} order",
                prefs.max_session_duration,
                prefs.break_duration,
                prefs.preferred_difficulty.as_str()
            );
            if prefs.rollover.enabled {
                println!(
                    "Rollover:   enabled ({} day lookback, {} priority, {} times, distribute {}, weekends {})",
                    prefs.rollover.max_days,
                    prefs.rollover.priority.as_str(),
                    prefs.rollover.time_adjustment.as_str(),
                    if prefs.rollover.auto_distribute { "on" } else { "off" },
                    if prefs.rollover.skip_weekends { "skipped" } else { "allowed" },
                );
            } else {
                println!("Rollover:   disabled");
            }
        }

        Command::ImportPrefs { file } => {
            let prefs = gradeup_config::load_preferences(&file)
                .with_context(|| format!("Invalid preferences in {:?}", file))?;
            engine.update_preferences(prefs)?;
            println!("Preferences saved.");
        }
    }

    Ok(())
}

fn print_plan(plan: &StudyPlan) {
    println!(
        "{}: {:.2}h across {} session(s)",
        plan.date,
        plan.total_hours,
        plan.sessions.len()
    );
    if !plan.focus_areas.is_empty() {
        println!("Focus areas: {}", plan.focus_areas.join(", "));
    }
    for session in &plan.sessions {
        let mut flags = String::new();
        if session.completed {
            flags.push_str(" [done]");
        }
        if session.rolled_over {
            flags.push_str(" [rolled over]");
        }
        if session.superseded {
            flags.push_str(" [superseded]");
        }
        println!(
            "  {}-{}  {} - {} ({} min){}",
            session.start_time, session.end_time, session.subject, session.topic,
            session.duration, flags
        );
        println!("           id: {}", session.id);
    }
}

/// Parse `--subject Name=confidence` pairs into a profile.
fn parse_profile(name: String, subjects: &[String], goals: Vec<String>) -> Result<StudentProfile> {
    let mut subject_names = Vec::new();
    let mut confidence = HashMap::new();

    for spec in subjects {
        let (subject, conf) = match spec.split_once('=') {
            Some((subject, conf)) => {
                let conf: u8 = conf
                    .parse()
                    .with_context(|| format!("Invalid confidence in {:?}", spec))?;
                if conf > 100 {
                    bail!("confidence must be 0-100, got {}", conf);
                }
                (subject.to_string(), Some(conf))
            }
            None => (spec.clone(), None),
        };

        if !subject_names.contains(&subject) {
            subject_names.push(subject.clone());
        }
        if let Some(conf) = conf {
            confidence.insert(subject, conf);
        }
    }

    Ok(StudentProfile {
        name,
        subjects: subject_names,
        confidence,
        goals,
    })
}
