//! SQLite-based persistence.
//!
//! Provides two things:
//! - A key-value table: the durable store behind [`crate::SatietyEngine`].
//!   Values are strings; callers own the encoding.
//! - A sessions table recording completed focus sessions, feeding the
//!   statistics views.

use chrono::{DateTime, Utc};
use rusqlite::{params, Connection};
use serde::{Deserialize, Serialize};

use super::data_dir;
use crate::error::DatabaseError;

/// A completed focus session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionRecord {
    pub id: i64,
    pub duration_min: u64,
    pub started_at: DateTime<Utc>,
    pub completed_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Stats {
    pub total_sessions: u64,
    pub total_focus_min: u64,
    pub today_sessions: u64,
    pub today_focus_min: u64,
}

/// SQLite database holding the kv store and session records.
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Open the database at `~/.config/purrdoro/purrdoro.db`.
    ///
    /// Creates the database file and schema if they don't exist.
    ///
    /// # Errors
    /// Returns an error if the database cannot be opened or migrated.
    pub fn open() -> Result<Self, DatabaseError> {
        let path = data_dir()
            .map_err(|e| DatabaseError::MigrationFailed(e.to_string()))?
            .join("purrdoro.db");
        let conn = Connection::open(&path).map_err(|source| DatabaseError::OpenFailed {
            path: path.clone(),
            source,
        })?;
        let db = Self { conn };
        db.migrate()?;
        Ok(db)
    }

    /// Open an in-memory database (for tests).
    pub fn open_memory() -> Result<Self, DatabaseError> {
        let conn = Connection::open_in_memory().map_err(|source| DatabaseError::OpenFailed {
            path: ":memory:".into(),
            source,
        })?;
        let db = Self { conn };
        db.migrate()?;
        Ok(db)
    }

    fn migrate(&self) -> Result<(), DatabaseError> {
        self.conn
            .execute_batch(
                "CREATE TABLE IF NOT EXISTS sessions (
                    id           INTEGER PRIMARY KEY AUTOINCREMENT,
                    duration_min INTEGER NOT NULL,
                    started_at   TEXT NOT NULL,
                    completed_at TEXT NOT NULL
                );
                CREATE TABLE IF NOT EXISTS kv (
                    key   TEXT PRIMARY KEY,
                    value TEXT NOT NULL
                );",
            )
            .map_err(|e| DatabaseError::MigrationFailed(e.to_string()))
    }

    /// Record a completed focus session.
    pub fn record_session(
        &self,
        duration_min: u64,
        started_at: DateTime<Utc>,
        completed_at: DateTime<Utc>,
    ) -> Result<i64, rusqlite::Error> {
        self.conn.execute(
            "INSERT INTO sessions (duration_min, started_at, completed_at)
             VALUES (?1, ?2, ?3)",
            params![
                duration_min,
                started_at.to_rfc3339(),
                completed_at.to_rfc3339(),
            ],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    /// Most recent sessions, newest first.
    pub fn recent_sessions(&self, limit: u32) -> Result<Vec<SessionRecord>, rusqlite::Error> {
        let mut stmt = self.conn.prepare(
            "SELECT id, duration_min, started_at, completed_at
             FROM sessions ORDER BY completed_at DESC LIMIT ?1",
        )?;
        let rows = stmt.query_map(params![limit], |row| {
            Ok((
                row.get::<_, i64>(0)?,
                row.get::<_, u64>(1)?,
                row.get::<_, String>(2)?,
                row.get::<_, String>(3)?,
            ))
        })?;

        let mut sessions = Vec::new();
        for row in rows {
            let (id, duration_min, started_at, completed_at) = row?;
            sessions.push(SessionRecord {
                id,
                duration_min,
                started_at: parse_timestamp(&started_at),
                completed_at: parse_timestamp(&completed_at),
            });
        }
        Ok(sessions)
    }

    /// All-time and today aggregates over recorded sessions.
    pub fn stats(&self) -> Result<Stats, rusqlite::Error> {
        let mut stats = Stats::default();

        let row = self.conn.query_row(
            "SELECT COUNT(*), COALESCE(SUM(duration_min), 0) FROM sessions",
            [],
            |row| Ok((row.get::<_, u64>(0)?, row.get::<_, u64>(1)?)),
        )?;
        stats.total_sessions = row.0;
        stats.total_focus_min = row.1;

        let today = Utc::now().format("%Y-%m-%d").to_string();
        let row = self.conn.query_row(
            "SELECT COUNT(*), COALESCE(SUM(duration_min), 0)
             FROM sessions WHERE completed_at >= ?1",
            params![format!("{today}T00:00:00+00:00")],
            |row| Ok((row.get::<_, u64>(0)?, row.get::<_, u64>(1)?)),
        )?;
        stats.today_sessions = row.0;
        stats.today_focus_min = row.1;

        Ok(stats)
    }

    /// Get a value from the kv store.
    pub fn kv_get(&self, key: &str) -> Result<Option<String>, rusqlite::Error> {
        let mut stmt = self.conn.prepare("SELECT value FROM kv WHERE key = ?1")?;
        let result = stmt.query_row(params![key], |row| row.get::<_, String>(0));
        match result {
            Ok(v) => Ok(Some(v)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// Set a value in the kv store.
    pub fn kv_set(&self, key: &str, value: &str) -> Result<(), rusqlite::Error> {
        self.conn.execute(
            "INSERT INTO kv (key, value) VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value",
            params![key, value],
        )?;
        Ok(())
    }
}

fn parse_timestamp(raw: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(raw)
        .map(|t| t.with_timezone(&Utc))
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn kv_store() {
        let db = Database::open_memory().unwrap();
        assert!(db.kv_get("test").unwrap().is_none());
        db.kv_set("test", "hello").unwrap();
        assert_eq!(db.kv_get("test").unwrap().unwrap(), "hello");
        db.kv_set("test", "world").unwrap();
        assert_eq!(db.kv_get("test").unwrap().unwrap(), "world");
    }

    #[test]
    fn record_and_read_sessions() {
        let db = Database::open_memory().unwrap();
        let now = Utc::now();
        db.record_session(25, now - Duration::minutes(25), now).unwrap();
        db.record_session(45, now - Duration::minutes(45), now).unwrap();

        let sessions = db.recent_sessions(10).unwrap();
        assert_eq!(sessions.len(), 2);

        let stats = db.stats().unwrap();
        assert_eq!(stats.total_sessions, 2);
        assert_eq!(stats.total_focus_min, 70);
        assert_eq!(stats.today_sessions, 2);
        assert_eq!(stats.today_focus_min, 70);
    }

    #[test]
    fn stats_on_empty_database() {
        let db = Database::open_memory().unwrap();
        let stats = db.stats().unwrap();
        assert_eq!(stats.total_sessions, 0);
        assert_eq!(stats.total_focus_min, 0);
    }
}
