//! Connection PRAGMAs for the observation store
//!
//! The store is only ever scanned once per run, so the settings favour large
//! sequential reads over write concurrency.

use rusqlite::Connection;

/// Page cache size in KiB (negative value = KiB for SQLite)
const CACHE_SIZE_KIB: i64 = -64_000;

/// Memory-mapped I/O window in bytes
const MMAP_SIZE: i64 = 256 * 1024 * 1024;

pub fn apply_read_pragmas(conn: &Connection) -> rusqlite::Result<()> {
    conn.pragma_update(None, "temp_store", "MEMORY")?;
    conn.pragma_update(None, "cache_size", CACHE_SIZE_KIB)?;
    conn.pragma_update(None, "mmap_size", MMAP_SIZE)?;
    conn.pragma_update(None, "query_only", true)?;
    Ok(())
}
