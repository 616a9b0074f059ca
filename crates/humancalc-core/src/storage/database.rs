//! In-memory SQLite session store.
//!
//! Holds everything a driver needs between discrete calls within one
//! process:
//! - Key-value bag for the serialized round engine
//! - Resolved rounds and the session summary shown on quit
//!
//! Nothing is written to disk; a new process starts a new session.

use chrono::{DateTime, Utc};
use rusqlite::{params, Connection};
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::quiz::{Question, Resolution, RoundEngine};

const ENGINE_KEY: &str = "round_engine";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoundRecord {
    pub id: i64,
    pub question: String,
    pub difficulty: String,
    pub expected_answer: String,
    pub outcome: String,
    pub points: u64,
    pub resolved_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct SessionSummary {
    pub rounds: u64,
    pub correct: u64,
    pub incorrect: u64,
    pub timeouts: u64,
    pub invalid: u64,
    pub points: u64,
}

/// Session store backed by an in-memory SQLite database.
pub struct SessionDb {
    conn: Connection,
}

impl SessionDb {
    /// Open a fresh, empty session store.
    ///
    /// # Errors
    /// Returns an error if SQLite cannot allocate the database or schema.
    pub fn open_memory() -> Result<Self, rusqlite::Error> {
        let conn = Connection::open_in_memory()?;
        let db = Self { conn };
        db.migrate()?;
        Ok(db)
    }

    fn migrate(&self) -> Result<(), rusqlite::Error> {
        self.conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS rounds (
                id              INTEGER PRIMARY KEY AUTOINCREMENT,
                question        TEXT NOT NULL,
                difficulty      TEXT NOT NULL,
                expected_answer TEXT NOT NULL,
                outcome         TEXT NOT NULL,
                points          INTEGER NOT NULL DEFAULT 0,
                resolved_at     TEXT NOT NULL
            );

            CREATE TABLE IF NOT EXISTS kv (
                key   TEXT PRIMARY KEY,
                value TEXT NOT NULL
            );",
        )
    }

    /// Append a resolved round.
    pub fn record_round(
        &self,
        question: &Question,
        resolution: &Resolution,
    ) -> Result<i64, rusqlite::Error> {
        self.conn.execute(
            "INSERT INTO rounds (question, difficulty, expected_answer, outcome, points, resolved_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                question.text(),
                question.difficulty().label(),
                resolution.expected_answer.to_string(),
                resolution.outcome.as_str(),
                resolution.points_awarded as i64,
                resolution.at.to_rfc3339(),
            ],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    /// All rounds of this session, oldest first.
    pub fn rounds(&self) -> Result<Vec<RoundRecord>, rusqlite::Error> {
        let mut stmt = self.conn.prepare(
            "SELECT id, question, difficulty, expected_answer, outcome, points, resolved_at
             FROM rounds ORDER BY id ASC",
        )?;
        let rows = stmt.query_map([], |row| {
            let resolved_at: String = row.get(6)?;
            let resolved_at = DateTime::parse_from_rfc3339(&resolved_at)
                .map(|dt| dt.with_timezone(&Utc))
                .map_err(|e| {
                    rusqlite::Error::FromSqlConversionFailure(
                        6,
                        rusqlite::types::Type::Text,
                        Box::new(e),
                    )
                })?;
            Ok(RoundRecord {
                id: row.get(0)?,
                question: row.get(1)?,
                difficulty: row.get(2)?,
                expected_answer: row.get(3)?,
                outcome: row.get(4)?,
                points: row.get::<_, i64>(5)? as u64,
                resolved_at,
            })
        })?;
        let records = rows.collect::<Result<Vec<_>, _>>()?;
        Ok(records)
    }

    /// Outcome counts and points for this session.
    pub fn summary(&self) -> Result<SessionSummary, rusqlite::Error> {
        self.conn.query_row(
            "SELECT COUNT(*),
                    COALESCE(SUM(outcome = 'correct'), 0),
                    COALESCE(SUM(outcome = 'incorrect'), 0),
                    COALESCE(SUM(outcome = 'timeout'), 0),
                    COALESCE(SUM(outcome = 'invalid_format'), 0),
                    COALESCE(SUM(points), 0)
             FROM rounds",
            [],
            |row| {
                Ok(SessionSummary {
                    rounds: row.get::<_, i64>(0)? as u64,
                    correct: row.get::<_, i64>(1)? as u64,
                    incorrect: row.get::<_, i64>(2)? as u64,
                    timeouts: row.get::<_, i64>(3)? as u64,
                    invalid: row.get::<_, i64>(4)? as u64,
                    points: row.get::<_, i64>(5)? as u64,
                })
            },
        )
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
            "INSERT OR REPLACE INTO kv (key, value) VALUES (?1, ?2)",
            params![key, value],
        )?;
        Ok(())
    }

    /// The session's round engine, or a fresh one if none was saved yet.
    pub fn load_engine(&self) -> Result<RoundEngine> {
        match self.kv_get(ENGINE_KEY)? {
            Some(json) => Ok(serde_json::from_str(&json)?),
            None => Ok(RoundEngine::new()),
        }
    }

    pub fn save_engine(&self, engine: &RoundEngine) -> Result<()> {
        let json = serde_json::to_string(engine)?;
        self.kv_set(ENGINE_KEY, &json)?;
        Ok(())
    }
}
