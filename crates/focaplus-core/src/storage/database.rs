//! SQLite-based session history and statistics.
//!
//! Provides persistent storage for:
//! - Finished study sessions, whether or not they reached the backend
//! - Study statistics (daily and all-time)
//! - Key-value store for application state, including the active timer

use chrono::{DateTime, Utc};
use rusqlite::{params, Connection};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::DatabaseError;
use crate::session::{ActivityType, SessionDraft, SessionMode};

use super::data_dir;

/// One finished session as stored locally.
///
/// `server_id` and `submitted` record whether the backend accepted the
/// session; the local row exists either way.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggedSession {
    pub id: String,
    pub server_id: Option<String>,
    pub discipline_instance_id: String,
    pub activity: ActivityType,
    pub mode: SessionMode,
    pub duration_seconds: u64,
    pub pomodoro_cycles: u32,
    pub points_earned: u32,
    pub started_at: DateTime<Utc>,
    pub ended_at: DateTime<Utc>,
    pub submitted: bool,
}

impl LoggedSession {
    pub fn from_draft(
        draft: &SessionDraft,
        discipline_instance_id: &str,
        server_id: Option<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            submitted: server_id.is_some(),
            server_id,
            discipline_instance_id: discipline_instance_id.to_string(),
            activity: draft.activity,
            mode: draft.mode,
            duration_seconds: draft.duration_seconds,
            pomodoro_cycles: draft.pomodoro_cycles,
            points_earned: draft.points_earned,
            started_at: draft.started_at,
            ended_at: draft.ended_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct StudyStats {
    pub total_sessions: u64,
    pub total_study_seconds: u64,
    pub total_points: u64,
    pub pomodoro_sessions: u64,
    pub pomodoro_cycles: u64,
    pub stopwatch_sessions: u64,
    pub today_sessions: u64,
    pub today_study_seconds: u64,
    pub today_points: u64,
}

/// SQLite database for session history.
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Get a reference to the underlying SQLite connection.
    pub fn conn(&self) -> &Connection {
        &self.conn
    }

    /// Open the database at `~/.config/focaplus/focaplus.db`.
    ///
    /// Creates the database file and schema if they don't exist.
    pub fn open() -> crate::error::Result<Self> {
        let path = data_dir()?.join("focaplus.db");
        let conn = Connection::open(&path).map_err(|e| DatabaseError::OpenFailed {
            path,
            message: e.to_string(),
        })?;
        let db = Self { conn };
        db.migrate()?;
        Ok(db)
    }

    /// Open an in-memory database (for tests).
    pub fn open_memory() -> crate::error::Result<Self> {
        let conn = Connection::open_in_memory().map_err(|e| DatabaseError::OpenFailed {
            path: ":memory:".into(),
            message: e.to_string(),
        })?;
        let db = Self { conn };
        db.migrate()?;
        Ok(db)
    }

    fn migrate(&self) -> Result<(), DatabaseError> {
        self.conn
            .execute_batch(
                "CREATE TABLE IF NOT EXISTS sessions (
                    id          TEXT PRIMARY KEY,
                    server_id   TEXT,
                    discipline_instance_id TEXT NOT NULL DEFAULT '',
                    activity    TEXT NOT NULL,
                    mode        TEXT NOT NULL,
                    duration_seconds INTEGER NOT NULL,
                    pomodoro_cycles  INTEGER NOT NULL DEFAULT 0,
                    points_earned    INTEGER NOT NULL,
                    started_at  TEXT NOT NULL,
                    ended_at    TEXT NOT NULL,
                    submitted   INTEGER NOT NULL DEFAULT 0
                );

                CREATE TABLE IF NOT EXISTS kv (
                    key   TEXT PRIMARY KEY,
                    value TEXT NOT NULL
                );

                -- Create indexes for common query patterns
                CREATE INDEX IF NOT EXISTS idx_sessions_ended_at ON sessions(ended_at);
                CREATE INDEX IF NOT EXISTS idx_sessions_mode ON sessions(mode);",
            )
            .map_err(|e| DatabaseError::MigrationFailed(e.to_string()))
    }

    /// Record a finished session.
    pub fn record_session(&self, session: &LoggedSession) -> Result<(), DatabaseError> {
        self.conn.execute(
            "INSERT INTO sessions (id, server_id, discipline_instance_id, activity, mode,
                                   duration_seconds, pomodoro_cycles, points_earned,
                                   started_at, ended_at, submitted)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)",
            params![
                session.id,
                session.server_id,
                session.discipline_instance_id,
                session.activity.wire_name(),
                session.mode.wire_name(),
                session.duration_seconds,
                session.pomodoro_cycles,
                session.points_earned,
                session.started_at.to_rfc3339(),
                session.ended_at.to_rfc3339(),
                session.submitted,
            ],
        )?;
        Ok(())
    }

    /// All recorded sessions, most recent first.
    pub fn list_sessions(&self) -> Result<Vec<LoggedSession>, DatabaseError> {
        let mut stmt = self.conn.prepare(
            "SELECT id, server_id, discipline_instance_id, activity, mode,
                    duration_seconds, pomodoro_cycles, points_earned,
                    started_at, ended_at, submitted
             FROM sessions
             ORDER BY ended_at DESC",
        )?;

        let rows = stmt.query_map([], |row| {
            Ok(LoggedSession {
                id: row.get(0)?,
                server_id: row.get(1)?,
                discipline_instance_id: row.get(2)?,
                activity: ActivityType::from_wire(&row.get::<_, String>(3)?)
                    .unwrap_or(ActivityType::StudyContent),
                mode: SessionMode::from_wire(&row.get::<_, String>(4)?)
                    .unwrap_or(SessionMode::Stopwatch),
                duration_seconds: row.get(5)?,
                pomodoro_cycles: row.get(6)?,
                points_earned: row.get(7)?,
                started_at: parse_timestamp(&row.get::<_, String>(8)?),
                ended_at: parse_timestamp(&row.get::<_, String>(9)?),
                submitted: row.get(10)?,
            })
        })?;

        rows.collect::<Result<Vec<_>, _>>().map_err(DatabaseError::from)
    }

    pub fn stats_today(&self) -> Result<StudyStats, DatabaseError> {
        let today = Utc::now().format("%Y-%m-%d").to_string();
        let mut stmt = self.conn.prepare(
            "SELECT mode, COUNT(*), COALESCE(SUM(duration_seconds), 0),
                    COALESCE(SUM(points_earned), 0), COALESCE(SUM(pomodoro_cycles), 0)
             FROM sessions
             WHERE ended_at >= ?1
             GROUP BY mode",
        )?;

        let mut stats = StudyStats::default();
        let rows = stmt.query_map(params![format!("{today}T00:00:00+00:00")], |row| {
            Ok((
                row.get::<_, String>(0)?,
                row.get::<_, u64>(1)?,
                row.get::<_, u64>(2)?,
                row.get::<_, u64>(3)?,
                row.get::<_, u64>(4)?,
            ))
        })?;

        for row in rows {
            let (mode, count, seconds, points, cycles) = row?;
            stats.total_sessions += count;
            stats.total_study_seconds += seconds;
            stats.total_points += points;
            stats.today_sessions += count;
            stats.today_study_seconds += seconds;
            stats.today_points += points;
            match mode.as_str() {
                "POMODORO" => {
                    stats.pomodoro_sessions += count;
                    stats.pomodoro_cycles += cycles;
                }
                "STOPWATCH" => {
                    stats.stopwatch_sessions += count;
                }
                _ => {}
            }
        }
        Ok(stats)
    }

    pub fn stats_all(&self) -> Result<StudyStats, DatabaseError> {
        let mut stmt = self.conn.prepare(
            "SELECT mode, COUNT(*), COALESCE(SUM(duration_seconds), 0),
                    COALESCE(SUM(points_earned), 0), COALESCE(SUM(pomodoro_cycles), 0)
             FROM sessions
             GROUP BY mode",
        )?;

        let today = Utc::now().format("%Y-%m-%d").to_string();
        let mut stats = StudyStats::default();
        let rows = stmt.query_map([], |row| {
            Ok((
                row.get::<_, String>(0)?,
                row.get::<_, u64>(1)?,
                row.get::<_, u64>(2)?,
                row.get::<_, u64>(3)?,
                row.get::<_, u64>(4)?,
            ))
        })?;

        for row in rows {
            let (mode, count, seconds, points, cycles) = row?;
            stats.total_sessions += count;
            stats.total_study_seconds += seconds;
            stats.total_points += points;
            match mode.as_str() {
                "POMODORO" => {
                    stats.pomodoro_sessions += count;
                    stats.pomodoro_cycles += cycles;
                }
                "STOPWATCH" => {
                    stats.stopwatch_sessions += count;
                }
                _ => {}
            }
        }

        // Today's sessions
        let mut stmt2 = self.conn.prepare(
            "SELECT COUNT(*), COALESCE(SUM(duration_seconds), 0), COALESCE(SUM(points_earned), 0)
             FROM sessions
             WHERE ended_at >= ?1",
        )?;
        let row = stmt2.query_row(params![format!("{today}T00:00:00+00:00")], |row| {
            Ok((
                row.get::<_, u64>(0)?,
                row.get::<_, u64>(1)?,
                row.get::<_, u64>(2)?,
            ))
        })?;
        stats.today_sessions = row.0;
        stats.today_study_seconds = row.1;
        stats.today_points = row.2;

        Ok(stats)
    }

    /// Get a value from the kv store.
    pub fn kv_get(&self, key: &str) -> Result<Option<String>, DatabaseError> {
        let mut stmt = self.conn.prepare("SELECT value FROM kv WHERE key = ?1")?;
        let result = stmt.query_row(params![key], |row| row.get::<_, String>(0));
        match result {
            Ok(v) => Ok(Some(v)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Set a value in the kv store.
    pub fn kv_set(&self, key: &str, value: &str) -> Result<(), DatabaseError> {
        self.conn.execute(
            "INSERT OR REPLACE INTO kv (key, value) VALUES (?1, ?2)",
            params![key, value],
        )?;
        Ok(())
    }

    /// Remove a value from the kv store. Missing keys are fine.
    pub fn kv_delete(&self, key: &str) -> Result<(), DatabaseError> {
        self.conn
            .execute("DELETE FROM kv WHERE key = ?1", params![key])?;
        Ok(())
    }
}

/// Timestamps are written by `to_rfc3339`; rows that predate that rule (or
/// were edited by hand) fall back to the epoch rather than failing the query.
fn parse_timestamp(raw: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Utc))
        .unwrap_or_default()
}
