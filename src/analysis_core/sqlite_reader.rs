//! SQLite-backed observation store
//!
//! Reads the `waves` table: one row per captured play-through of a floor.
//!
//! ```sql
//! CREATE TABLE waves (dungeon INTEGER, floor INTEGER, data TEXT)
//! ```

use crate::sqlite_pragma::apply_read_pragmas;
use rusqlite::types::ValueRef;
use rusqlite::{params, Connection, OpenFlags, ToSql};
use std::path::Path;

#[derive(Debug)]
pub enum ReaderError {
    Database(rusqlite::Error),
    InvalidData { row_id: i64, column_type: String },
}

impl From<rusqlite::Error> for ReaderError {
    fn from(err: rusqlite::Error) -> Self {
        ReaderError::Database(err)
    }
}

impl std::fmt::Display for ReaderError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReaderError::Database(e) => write!(f, "Database error: {}", e),
            ReaderError::InvalidData { row_id, column_type } => write!(
                f,
                "Observation {} has {} data, expected TEXT or BLOB",
                row_id, column_type
            ),
        }
    }
}

impl std::error::Error for ReaderError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ReaderError::Database(e) => Some(e),
            ReaderError::InvalidData { .. } => None,
        }
    }
}

/// One raw observation row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Observation {
    pub row_id: i64,
    pub dungeon: i64,
    pub floor: i64,
    pub data: Vec<u8>,
}

/// Query surface the corpus driver needs from an observation store
pub trait ObservationSource {
    /// Distinct dungeon ids, ascending
    fn dungeons(&self) -> Result<Vec<i64>, ReaderError>;

    /// Distinct floor ids of one dungeon, ascending
    fn floors(&self, dungeon: i64) -> Result<Vec<i64>, ReaderError>;

    /// Every observation of one floor, in storage order
    fn observations(&self, dungeon: i64, floor: i64) -> Result<Vec<Observation>, ReaderError>;
}

/// Read-only reader over `waves.sqlite3`
pub struct SqliteObservationReader {
    conn: Connection,
}

impl SqliteObservationReader {
    pub fn open(db_path: impl AsRef<Path>) -> Result<Self, ReaderError> {
        let db_path = db_path.as_ref();
        let conn = Connection::open_with_flags(
            db_path,
            OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )?;

        // Ends with query_only, so nothing below can write
        apply_read_pragmas(&conn)?;

        let rows: i64 = conn.query_row("SELECT COUNT(*) FROM waves", [], |row| row.get(0))?;
        log::info!(
            "📥 Observation store opened: {} ({} observations)",
            db_path.display(),
            rows
        );

        Ok(Self { conn })
    }

    fn query_ids(&self, sql: &str, params: &[&dyn ToSql]) -> Result<Vec<i64>, ReaderError> {
        let mut stmt = self.conn.prepare(sql)?;
        let rows = stmt.query_map(params, |row| row.get(0))?;

        let mut ids = Vec::new();
        for id in rows {
            ids.push(id?);
        }
        Ok(ids)
    }
}

impl ObservationSource for SqliteObservationReader {
    fn dungeons(&self) -> Result<Vec<i64>, ReaderError> {
        self.query_ids("SELECT DISTINCT dungeon FROM waves ORDER BY dungeon", params![])
    }

    fn floors(&self, dungeon: i64) -> Result<Vec<i64>, ReaderError> {
        self.query_ids(
            "SELECT DISTINCT floor FROM waves WHERE dungeon = ?1 ORDER BY floor",
            params![dungeon],
        )
    }

    fn observations(&self, dungeon: i64, floor: i64) -> Result<Vec<Observation>, ReaderError> {
        let mut stmt = self.conn.prepare(
            "SELECT rowid, dungeon, floor, data
             FROM waves
             WHERE dungeon = ?1 AND floor = ?2
             ORDER BY rowid ASC",
        )?;
        let mut rows = stmt.query(params![dungeon, floor])?;

        let mut observations = Vec::new();
        while let Some(row) = rows.next()? {
            let row_id: i64 = row.get(0)?;
            let data = match row.get_ref(3)? {
                ValueRef::Text(bytes) | ValueRef::Blob(bytes) => bytes.to_vec(),
                other => {
                    return Err(ReaderError::InvalidData {
                        row_id,
                        column_type: other.data_type().to_string(),
                    })
                }
            };

            observations.push(Observation {
                row_id,
                dungeon: row.get(1)?,
                floor: row.get(2)?,
                data,
            });
        }

        log::debug!(
            "📥 Read {} observations for dungeon {} floor {}",
            observations.len(),
            dungeon,
            floor
        );

        Ok(observations)
    }
}
