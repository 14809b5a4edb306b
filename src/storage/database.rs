//! SQLite history cache

use anyhow::{Context, Result};
use chrono::{TimeZone, Utc};
use rusqlite::{params, Connection, OptionalExtension};
use std::path::Path;

use crate::config::Settings;
use crate::storage::models::{SessionSummary, StoredSet};

/// Database wrapper for reps
pub struct Database {
    conn: Connection,
}

const CURRENT_SCHEMA_VERSION: i64 = 1;

impl Database {
    /// Open or create the database
    pub fn open(settings: &Settings) -> Result<Self> {
        let db_path = settings.database_path();

        // Ensure parent directory exists
        if let Some(parent) = db_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        Self::open_path(&db_path)
    }

    /// Open database at a specific path (useful for testing)
    pub fn open_path(path: &Path) -> Result<Self> {
        let conn = Connection::open(path)
            .with_context(|| format!("Failed to open database: {}", path.display()))?;

        let db = Self { conn };
        db.initialize()?;

        Ok(db)
    }

    /// Open an in-memory database (for testing)
    #[cfg(test)]
    pub fn open_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        let db = Self { conn };
        db.initialize()?;
        Ok(db)
    }

    /// Initialize database schema
    fn initialize(&self) -> Result<()> {
        self.conn.execute_batch("PRAGMA foreign_keys = ON;")?;

        let current_version = self.schema_version()?;
        if current_version > CURRENT_SCHEMA_VERSION {
            anyhow::bail!(
                "Database schema version {} is newer than supported version {}",
                current_version,
                CURRENT_SCHEMA_VERSION
            );
        }

        if current_version < 1 {
            self.migrate_to_v1()?;
            self.set_schema_version(1)?;
        }

        Ok(())
    }

    /// Current schema version tracked in PRAGMA user_version.
    pub fn schema_version(&self) -> Result<i64> {
        Ok(self
            .conn
            .query_row("PRAGMA user_version;", [], |row| row.get(0))?)
    }

    fn set_schema_version(&self, version: i64) -> Result<()> {
        self.conn
            .execute(&format!("PRAGMA user_version = {}", version), [])?;
        Ok(())
    }

    fn migrate_to_v1(&self) -> Result<()> {
        self.conn.execute_batch(
            r#"
            CREATE TABLE IF NOT EXISTS sessions (
                id TEXT PRIMARY KEY,
                workout_name TEXT NOT NULL,
                recorded_at INTEGER NOT NULL,
                duration_secs INTEGER NOT NULL,
                total_sets INTEGER NOT NULL
            );

            CREATE INDEX IF NOT EXISTS idx_sessions_recorded_at
                ON sessions(recorded_at DESC);

            CREATE TABLE IF NOT EXISTS session_sets (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                session_id TEXT NOT NULL,
                exercise TEXT NOT NULL,
                reps INTEGER,
                weight REAL,
                duration_secs INTEGER,
                logged_at INTEGER NOT NULL,
                FOREIGN KEY (session_id) REFERENCES sessions(id) ON DELETE CASCADE
            );

            CREATE INDEX IF NOT EXISTS idx_sets_session_id
                ON session_sets(session_id);
            "#,
        )?;

        Ok(())
    }

    /// Insert a completed session
    pub fn insert_session(&self, session: &SessionSummary) -> Result<()> {
        self.conn.execute(
            r#"
            INSERT OR REPLACE INTO sessions (id, workout_name, recorded_at, duration_secs, total_sets)
            VALUES (?1, ?2, ?3, ?4, ?5)
            "#,
            params![
                session.id,
                session.workout_name,
                session.recorded_at.timestamp(),
                session.duration_secs,
                session.total_sets,
            ],
        )?;

        Ok(())
    }

    /// Insert the sets of a session in one transaction
    pub fn insert_sets(&self, sets: &[StoredSet]) -> Result<()> {
        let tx = self.conn.unchecked_transaction()?;

        for set in sets {
            tx.execute(
                r#"
                INSERT INTO session_sets (session_id, exercise, reps, weight, duration_secs, logged_at)
                VALUES (?1, ?2, ?3, ?4, ?5, ?6)
                "#,
                params![
                    set.session_id,
                    set.exercise,
                    set.reps,
                    set.weight,
                    set.duration_secs,
                    set.logged_at.timestamp(),
                ],
            )?;
        }

        tx.commit()?;
        Ok(())
    }

    /// Get a session by ID
    pub fn get_session(&self, id: &str) -> Result<Option<SessionSummary>> {
        let result = self
            .conn
            .query_row(
                "SELECT id, workout_name, recorded_at, duration_secs, total_sets
                 FROM sessions WHERE id = ?1",
                params![id],
                |row| Ok(Self::row_to_session(row)),
            )
            .optional()?;

        match result {
            Some(s) => Ok(Some(s?)),
            None => Ok(None),
        }
    }

    /// List sessions ordered by recording date
    pub fn list_sessions(&self, limit: usize) -> Result<Vec<SessionSummary>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, workout_name, recorded_at, duration_secs, total_sets
             FROM sessions
             ORDER BY recorded_at DESC
             LIMIT ?1",
        )?;

        let sessions = stmt
            .query_map(params![limit], |row| Ok(Self::row_to_session(row)))?
            .collect::<rusqlite::Result<Vec<_>>>()?
            .into_iter()
            .collect::<Result<Vec<_>>>()?;

        Ok(sessions)
    }

    /// Search sessions by workout name
    pub fn search_sessions(&self, query: &str, limit: usize) -> Result<Vec<SessionSummary>> {
        let pattern = format!("%{}%", query);

        let mut stmt = self.conn.prepare(
            "SELECT id, workout_name, recorded_at, duration_secs, total_sets
             FROM sessions
             WHERE workout_name LIKE ?1
             ORDER BY recorded_at DESC
             LIMIT ?2",
        )?;

        let sessions = stmt
            .query_map(params![pattern, limit], |row| Ok(Self::row_to_session(row)))?
            .collect::<rusqlite::Result<Vec<_>>>()?
            .into_iter()
            .collect::<Result<Vec<_>>>()?;

        Ok(sessions)
    }

    /// Get the sets of a session
    pub fn get_session_sets(&self, session_id: &str) -> Result<Vec<StoredSet>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, session_id, exercise, reps, weight, duration_secs, logged_at
             FROM session_sets
             WHERE session_id = ?1
             ORDER BY logged_at",
        )?;

        let sets = stmt
            .query_map(params![session_id], |row| {
                let logged_at: i64 = row.get(6)?;
                Ok(StoredSet {
                    id: row.get(0)?,
                    session_id: row.get(1)?,
                    exercise: row.get(2)?,
                    reps: row.get(3)?,
                    weight: row.get(4)?,
                    duration_secs: row.get(5)?,
                    logged_at: Utc.timestamp_opt(logged_at, 0).single().unwrap_or_default(),
                })
            })?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        Ok(sets)
    }

    /// Delete a session and its sets
    pub fn delete_session(&self, id: &str) -> Result<()> {
        self.conn
            .execute("DELETE FROM sessions WHERE id = ?1", params![id])?;
        Ok(())
    }

    fn row_to_session(row: &rusqlite::Row) -> Result<SessionSummary> {
        let recorded_at: i64 = row.get(2)?;

        Ok(SessionSummary {
            id: row.get(0)?,
            workout_name: row.get(1)?,
            recorded_at: Utc
                .timestamp_opt(recorded_at, 0)
                .single()
                .context("Invalid recorded_at timestamp")?,
            duration_secs: row.get(3)?,
            total_sets: row.get(4)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_and_list_sessions() -> Result<()> {
        let db = Database::open_memory()?;

        let session = SessionSummary::new("abc".to_string(), "Leg Day".to_string(), 1800, 12);
        db.insert_session(&session)?;

        let sessions = db.list_sessions(10)?;
        assert_eq!(sessions.len(), 1);
        assert_eq!(sessions[0].workout_name, "Leg Day");
        assert_eq!(sessions[0].duration_secs, 1800);

        Ok(())
    }

    #[test]
    fn sets_are_deleted_with_their_session() -> Result<()> {
        let db = Database::open_memory()?;

        let session = SessionSummary::new("abc".to_string(), "Push".to_string(), 600, 2);
        db.insert_session(&session)?;
        db.insert_sets(&[
            StoredSet::new(
                "abc".to_string(),
                "Bench".to_string(),
                Some(8),
                Some(60.0),
                None,
                Utc::now(),
            ),
            StoredSet::new(
                "abc".to_string(),
                "Bench".to_string(),
                Some(8),
                Some(60.0),
                None,
                Utc::now(),
            ),
        ])?;

        assert_eq!(db.get_session_sets("abc")?.len(), 2);

        db.delete_session("abc")?;
        assert!(db.get_session("abc")?.is_none());
        assert!(db.get_session_sets("abc")?.is_empty());

        Ok(())
    }

    #[test]
    fn search_matches_workout_name() -> Result<()> {
        let db = Database::open_memory()?;

        db.insert_session(&SessionSummary::new(
            "a".to_string(),
            "Upper Body".to_string(),
            600,
            4,
        ))?;
        db.insert_session(&SessionSummary::new(
            "b".to_string(),
            "Lower Body".to_string(),
            700,
            5,
        ))?;

        let results = db.search_sessions("upper", 10)?;
        // LIKE is case-insensitive for ASCII by default
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].id, "a");

        Ok(())
    }
}
