//! SQLite-based store implementation
//!
//! Everything except the audit log lives as JSON documents in a key-value
//! table, one key per record family. The keys match the original export
//! format of the app's records, so a dump of the kv table is directly
//! comparable to a data export.

use chrono::{DateTime, Local, NaiveDate};
use gradeup_config::{Preferences, RawPreferences};
use gradeup_model::{QuizRecord, StudentProfile, StudyPlan, WellnessLog};
use rusqlite::{params, Connection, OptionalExtension};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::path::Path;
use std::sync::Mutex;
use tracing::{debug, warn};

use crate::{AuditEvent, Store, StoreResult};

/// Well-known kv keys.
pub mod keys {
    pub const STUDY_PLANS: &str = "study-plans";
    pub const PREFERENCES: &str = "scheduling-preferences";
    pub const PROFILE: &str = "user-profile";
    pub const QUIZ_HISTORY: &str = "quiz-history";
    pub const WELLNESS: &str = "wellness-data";
    pub const EARNED_ACHIEVEMENTS: &str = "earned-achievements";
    pub const LAST_ROLLOVER_CHECK: &str = "last-rollover-check";
}

/// SQLite-based store
pub struct SqliteStore {
    conn: Mutex<Connection>,
}

impl SqliteStore {
    /// Open or create a store at the given path
    pub fn open(path: impl AsRef<Path>) -> StoreResult<Self> {
        let conn = Connection::open(path)?;
        let store = Self {
            conn: Mutex::new(conn),
        };
        store.init_schema()?;
        Ok(store)
    }

    /// Create an in-memory store (for testing)
    pub fn in_memory() -> StoreResult<Self> {
        let conn = Connection::open_in_memory()?;
        let store = Self {
            conn: Mutex::new(conn),
        };
        store.init_schema()?;
        Ok(store)
    }

    fn init_schema(&self) -> StoreResult<()> {
        let conn = self.conn.lock().unwrap();

        conn.execute_batch(
            r#"
            -- JSON documents, one per record family
            CREATE TABLE IF NOT EXISTS kv (
                key TEXT PRIMARY KEY,
                value_json TEXT NOT NULL
            );

            -- Audit log (append-only)
            CREATE TABLE IF NOT EXISTS audit_log (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                timestamp TEXT NOT NULL,
                event_json TEXT NOT NULL
            );

            CREATE INDEX IF NOT EXISTS idx_audit_timestamp ON audit_log(timestamp);
            "#,
        )?;

        debug!("Store schema initialized");
        Ok(())
    }

    fn get_json<T: DeserializeOwned>(&self, key: &str) -> StoreResult<Option<T>> {
        let conn = self.conn.lock().unwrap();

        let json: Option<String> = conn
            .query_row("SELECT value_json FROM kv WHERE key = ?", [key], |row| {
                row.get(0)
            })
            .optional()?;

        match json {
            Some(s) => Ok(Some(serde_json::from_str(&s)?)),
            None => Ok(None),
        }
    }

    fn put_json<T: Serialize>(&self, key: &str, value: &T) -> StoreResult<()> {
        let conn = self.conn.lock().unwrap();
        let json = serde_json::to_string(value)?;

        conn.execute(
            r#"
            INSERT INTO kv (key, value_json)
            VALUES (?, ?)
            ON CONFLICT(key)
            DO UPDATE SET value_json = excluded.value_json
            "#,
            params![key, json],
        )?;

        debug!(key, "Record saved");
        Ok(())
    }
}

impl Store for SqliteStore {
    fn load_plans(&self) -> StoreResult<Vec<StudyPlan>> {
        Ok(self.get_json(keys::STUDY_PLANS)?.unwrap_or_default())
    }

    fn save_plans(&self, plans: &[StudyPlan]) -> StoreResult<()> {
        self.put_json(keys::STUDY_PLANS, &plans)
    }

    fn load_preferences(&self) -> StoreResult<Option<Preferences>> {
        let raw: Option<RawPreferences> = self.get_json(keys::PREFERENCES)?;
        Ok(raw.map(Preferences::from_raw))
    }

    fn save_preferences(&self, prefs: &Preferences) -> StoreResult<()> {
        self.put_json(keys::PREFERENCES, &prefs.to_raw())
    }

    fn load_profile(&self) -> StoreResult<Option<StudentProfile>> {
        self.get_json(keys::PROFILE)
    }

    fn save_profile(&self, profile: &StudentProfile) -> StoreResult<()> {
        self.put_json(keys::PROFILE, profile)
    }

    fn load_quiz_history(&self) -> StoreResult<Vec<QuizRecord>> {
        Ok(self.get_json(keys::QUIZ_HISTORY)?.unwrap_or_default())
    }

    fn record_quiz(&self, record: &QuizRecord) -> StoreResult<()> {
        let mut history = self.load_quiz_history()?;
        history.push(record.clone());
        self.put_json(keys::QUIZ_HISTORY, &history)
    }

    fn load_wellness(&self) -> StoreResult<WellnessLog> {
        Ok(self.get_json(keys::WELLNESS)?.unwrap_or_default())
    }

    fn save_wellness(&self, log: &WellnessLog) -> StoreResult<()> {
        self.put_json(keys::WELLNESS, log)
    }

    fn earned_achievements(&self) -> StoreResult<Vec<String>> {
        Ok(self
            .get_json(keys::EARNED_ACHIEVEMENTS)?
            .unwrap_or_default())
    }

    fn save_earned_achievements(&self, ids: &[String]) -> StoreResult<()> {
        self.put_json(keys::EARNED_ACHIEVEMENTS, &ids)
    }

    fn last_rollover_check(&self) -> StoreResult<Option<NaiveDate>> {
        let date_str: Option<String> = self.get_json(keys::LAST_ROLLOVER_CHECK)?;
        Ok(date_str.and_then(|s| s.parse().ok()))
    }

    fn set_last_rollover_check(&self, date: NaiveDate) -> StoreResult<()> {
        self.put_json(keys::LAST_ROLLOVER_CHECK, &date.to_string())
    }

    fn append_audit(&self, mut event: AuditEvent) -> StoreResult<()> {
        let conn = self.conn.lock().unwrap();
        let event_json = serde_json::to_string(&event.event)?;

        conn.execute(
            "INSERT INTO audit_log (timestamp, event_json) VALUES (?, ?)",
            params![event.timestamp.to_rfc3339(), event_json],
        )?;

        event.id = conn.last_insert_rowid();
        debug!(event_id = event.id, "Audit event appended");

        Ok(())
    }

    fn get_recent_audits(&self, limit: usize) -> StoreResult<Vec<AuditEvent>> {
        let conn = self.conn.lock().unwrap();

        let mut stmt = conn
            .prepare("SELECT id, timestamp, event_json FROM audit_log ORDER BY id DESC LIMIT ?")?;

        let rows = stmt.query_map([limit], |row| {
            let id: i64 = row.get(0)?;
            let timestamp_str: String = row.get(1)?;
            let event_json: String = row.get(2)?;
            Ok((id, timestamp_str, event_json))
        })?;

        let mut events = Vec::new();
        for row in rows {
            let (id, timestamp_str, event_json) = row?;
            let timestamp = DateTime::parse_from_rfc3339(&timestamp_str)
                .map(|dt| dt.with_timezone(&Local))
                .unwrap_or_else(|_| gradeup_util::now());
            let event: crate::AuditEventType = serde_json::from_str(&event_json)?;

            events.push(AuditEvent {
                id,
                timestamp,
                event,
            });
        }

        Ok(events)
    }

    fn is_healthy(&self) -> bool {
        match self.conn.lock() {
            Ok(conn) => conn.query_row("SELECT 1", [], |_| Ok(())).is_ok(),
            Err(_) => {
                warn!("Store lock poisoned");
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::AuditEventType;
    use gradeup_model::{Difficulty, SessionKind, StudySession};
    use gradeup_util::SessionId;

    fn sample_plan(date: &str) -> StudyPlan {
        let session = StudySession {
            id: SessionId::new(),
            subject: "Mathematics".into(),
            topic: "Algebra basics".into(),
            duration: 60,
            start_time: "09:00".parse().unwrap(),
            end_time: "10:00".parse().unwrap(),
            difficulty: Difficulty::Medium,
            kind: SessionKind::Practice,
            confidence: 55,
            completed: false,
            rolled_over: false,
            superseded: false,
        };
        StudyPlan::new(date.parse().unwrap(), vec![session], vec!["Mathematics".into()])
    }

    #[test]
    fn test_in_memory_store() {
        let store = SqliteStore::in_memory().unwrap();
        assert!(store.is_healthy());
    }

    #[test]
    fn test_plans_round_trip() {
        let store = SqliteStore::in_memory().unwrap();
        assert!(store.load_plans().unwrap().is_empty());

        let plans = vec![sample_plan("2026-01-05"), sample_plan("2026-01-06")];
        store.save_plans(&plans).unwrap();

        let loaded = store.load_plans().unwrap();
        assert_eq!(loaded, plans);
    }

    #[test]
    fn test_preferences_default_until_saved() {
        let store = SqliteStore::in_memory().unwrap();
        assert!(store.load_preferences().unwrap().is_none());

        let mut prefs = Preferences::default();
        prefs.break_duration = 20;
        store.save_preferences(&prefs).unwrap();

        let loaded = store.load_preferences().unwrap().unwrap();
        assert_eq!(loaded.break_duration, 20);
    }

    #[test]
    fn test_quiz_history_appends() {
        let store = SqliteStore::in_memory().unwrap();

        let record = QuizRecord {
            date: "2026-01-05T10:00:00Z".into(),
            subject: "Physics".into(),
            score: 4,
            total_questions: 5,
            time_spent: 180,
            difficulty: "medium".into(),
        };

        store.record_quiz(&record).unwrap();
        store.record_quiz(&record).unwrap();

        assert_eq!(store.load_quiz_history().unwrap().len(), 2);
    }

    #[test]
    fn test_last_rollover_check() {
        let store = SqliteStore::in_memory().unwrap();
        assert!(store.last_rollover_check().unwrap().is_none());

        let date: NaiveDate = "2026-01-05".parse().unwrap();
        store.set_last_rollover_check(date).unwrap();
        assert_eq!(store.last_rollover_check().unwrap(), Some(date));

        // Overwrites, never accumulates
        let next: NaiveDate = "2026-01-06".parse().unwrap();
        store.set_last_rollover_check(next).unwrap();
        assert_eq!(store.last_rollover_check().unwrap(), Some(next));
    }

    #[test]
    fn test_audit_log() {
        let store = SqliteStore::in_memory().unwrap();

        let event = AuditEvent::new(AuditEventType::PlanGenerated {
            date: "2026-01-05".parse().unwrap(),
            session_count: 3,
        });
        store.append_audit(event).unwrap();

        let events = store.get_recent_audits(10).unwrap();
        assert_eq!(events.len(), 1);
        assert!(matches!(
            events[0].event,
            AuditEventType::PlanGenerated { session_count: 3, .. }
        ));
    }

    #[test]
    fn test_open_on_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("gradeup.db");

        {
            let store = SqliteStore::open(&path).unwrap();
            store.save_plans(&[sample_plan("2026-01-05")]).unwrap();
        }

        let store = SqliteStore::open(&path).unwrap();
        assert_eq!(store.load_plans().unwrap().len(), 1);
    }

    #[test]
    fn test_earned_achievements_round_trip() {
        let store = SqliteStore::in_memory().unwrap();
        assert!(store.earned_achievements().unwrap().is_empty());

        let ids = vec!["first-session".to_string(), "quiz-whiz".to_string()];
        store.save_earned_achievements(&ids).unwrap();
        assert_eq!(store.earned_achievements().unwrap(), ids);
    }
}
