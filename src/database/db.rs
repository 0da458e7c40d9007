//! SQLite persistence for learning records and the learner profile
//!
//! This sits on the caller's side of the scheduler: the scheduler works on a plain
//! [`RecordStore`], and these functions load it before a session and save it afterwards.
//! Timestamps are stored as epoch milliseconds.

use crate::error::{Result, SchedulerError};
use crate::models::{LearnerProfile, LearningRecord, RecordStore};
use chrono::{DateTime, Utc};
use rusqlite::{Connection, OptionalExtension, params};
use std::path::Path;

/// Opens (or creates) the database file and makes sure the tables exist
pub fn init_database<P: AsRef<Path>>(path: P) -> Result<Connection> {
    let conn = Connection::open(path.as_ref())?;
    create_schema(&conn)?;
    tracing::info!(path = %path.as_ref().display(), "opened learning database");
    Ok(conn)
}

/// Same schema in a throwaway in-memory database
pub fn open_in_memory() -> Result<Connection> {
    let conn = Connection::open_in_memory()?;
    create_schema(&conn)?;
    Ok(conn)
}

fn create_schema(conn: &Connection) -> Result<()> {
    conn.execute(
        "CREATE TABLE IF NOT EXISTS learning_records (
            item_id TEXT PRIMARY KEY,
            total_attempts INTEGER NOT NULL DEFAULT 0,
            correct_attempts INTEGER NOT NULL DEFAULT 0,
            total_time_spent_ms INTEGER NOT NULL DEFAULT 0,
            last_review_at INTEGER,
            review_count INTEGER NOT NULL DEFAULT 0,
            correct_rate REAL NOT NULL DEFAULT 0,
            average_response_time_ms REAL NOT NULL DEFAULT 0,
            frequency REAL NOT NULL DEFAULT 0,
            first_seen_at INTEGER NOT NULL
        )",
        (),
    )?;

    // Key/value table; the profile is stored as one JSON document
    conn.execute(
        "CREATE TABLE IF NOT EXISTS app_state (
            key TEXT PRIMARY KEY,
            value TEXT NOT NULL
        )",
        (),
    )?;

    Ok(())
}

fn to_millis(time: DateTime<Utc>) -> i64 {
    time.timestamp_millis()
}

fn from_millis(column: usize, millis: i64) -> rusqlite::Result<DateTime<Utc>> {
    DateTime::from_timestamp_millis(millis)
        .ok_or(rusqlite::Error::IntegralValueOutOfRange(column, millis))
}

/// Inserts or replaces one record
pub fn save_record(record: &LearningRecord, conn: &Connection) -> Result<()> {
    let total_time_spent_ms = i64::try_from(record.total_time_spent_ms).map_err(|_| {
        SchedulerError::InvalidInput(format!(
            "record '{}': total time {}ms does not fit the database",
            record.item_id, record.total_time_spent_ms
        ))
    })?;

    conn.execute(
        "INSERT OR REPLACE INTO learning_records (
            item_id, total_attempts, correct_attempts, total_time_spent_ms, last_review_at,
            review_count, correct_rate, average_response_time_ms, frequency, first_seen_at
         ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
        params![
            record.item_id,
            record.total_attempts,
            record.correct_attempts,
            total_time_spent_ms,
            record.last_review_at.map(to_millis),
            record.review_count,
            record.correct_rate,
            record.average_response_time_ms,
            record.frequency,
            to_millis(record.first_seen_at),
        ],
    )?;
    Ok(())
}

/// Saves every record of the store in one transaction
pub fn save_records(records: &RecordStore, conn: &mut Connection) -> Result<()> {
    let tx = conn.transaction()?;
    for record in records.values() {
        save_record(record, &tx)?;
    }
    tx.commit()?;
    tracing::debug!(count = records.len(), "saved learning records");
    Ok(())
}

/// Loads every record into a fresh store
///
/// Fails with `InvalidInput` if a stored record has inconsistent counters or a negative
/// total time.
pub fn load_records(conn: &Connection) -> Result<RecordStore> {
    let mut stmt = conn.prepare(
        "SELECT item_id, total_attempts, correct_attempts, total_time_spent_ms, last_review_at,
                review_count, correct_rate, average_response_time_ms, frequency, first_seen_at
         FROM learning_records",
    )?;

    let records = stmt
        .query_map([], |row| {
            let last_review_at = row
                .get::<_, Option<i64>>(4)?
                .map(|millis| from_millis(4, millis))
                .transpose()?;

            let item_id: String = row.get(0)?;
            let raw_time: i64 = row.get(3)?;
            let Ok(total_time_spent_ms) = u64::try_from(raw_time) else {
                return Ok(Err(SchedulerError::InvalidInput(format!(
                    "record '{item_id}': negative total time {raw_time}ms"
                ))));
            };

            Ok(Ok(LearningRecord {
                item_id,
                total_attempts: row.get(1)?,
                correct_attempts: row.get(2)?,
                total_time_spent_ms,
                last_review_at,
                review_count: row.get(5)?,
                correct_rate: row.get(6)?,
                average_response_time_ms: row.get(7)?,
                frequency: row.get(8)?,
                first_seen_at: from_millis(9, row.get(9)?)?,
            }))
        })?
        .collect::<rusqlite::Result<Vec<Result<LearningRecord>>>>()?;

    let mut store = RecordStore::new();
    for record in records {
        let record = record.inspect_err(|err| {
            tracing::warn!("rejecting stored record: {err}");
        })?;
        if let Err(err) = record.validate() {
            tracing::warn!(item_id = %record.item_id, "rejecting stored record: {err}");
            return Err(err);
        }
        store.insert(record.item_id.clone(), record);
    }
    Ok(store)
}

pub fn save_profile(profile: &LearnerProfile, conn: &Connection) -> Result<()> {
    let json = serde_json::to_string(profile)?;
    conn.execute(
        "INSERT OR REPLACE INTO app_state (key, value) VALUES ('learner_profile', ?1)",
        params![json],
    )?;
    Ok(())
}

/// Stored profile, or the default one if nothing was saved yet
pub fn load_profile(conn: &Connection) -> Result<LearnerProfile> {
    let json: Option<String> = conn
        .query_row(
            "SELECT value FROM app_state WHERE key = 'learner_profile'",
            [],
            |row| row.get(0),
        )
        .optional()?;

    match json {
        Some(json) => serde_json::from_str(&json).map_err(SchedulerError::from),
        None => Ok(LearnerProfile::default()),
    }
}

/// Removes all records and the profile
pub fn clear_all_data(conn: &Connection) -> Result<()> {
    conn.execute("DELETE FROM learning_records", ())?;
    conn.execute("DELETE FROM app_state WHERE key = 'learner_profile'", ())?;
    tracing::info!("cleared learning data");
    Ok(())
}
