// src/db/migrations.rs
//
// Database schema initialization and migrations
//
// PRINCIPLES:
// - Explicit schema versions
// - Upgrades are destructive: saved flags are a cache of user taps,
//   an older schema is dropped and recreated
// - Idempotent operations

use rusqlite::Connection;
use serde::Serialize;

use crate::error::{AppError, AppResult};

/// Current schema version
/// Increment this when the schema changes
const CURRENT_SCHEMA_VERSION: i32 = 2;

/// Tables owned by this schema, dropped on upgrade
const MANAGED_TABLES: [&str; 3] = ["movies", "shows", "schema_version"];

/// Initialize the database schema
///
/// - fresh database: apply schema
/// - older version: drop everything, apply schema
/// - newer version: refuse
///
/// Safe to call multiple times.
pub fn initialize_database(conn: &Connection) -> AppResult<()> {
    let current_version = get_schema_version(conn)?;

    if current_version == CURRENT_SCHEMA_VERSION {
        return Ok(());
    }

    if current_version > CURRENT_SCHEMA_VERSION {
        return Err(AppError::Other(format!(
            "Schema version {} is newer than supported {}. Update the application.",
            current_version, CURRENT_SCHEMA_VERSION
        )));
    }

    if current_version > 0 {
        log::warn!(
            "Schema version {} is outdated, recreating local store at version {}",
            current_version,
            CURRENT_SCHEMA_VERSION
        );
        drop_managed_tables(conn)?;
    }

    apply_schema(conn)?;
    set_schema_version(conn, CURRENT_SCHEMA_VERSION)?;

    Ok(())
}

/// Get current schema version
/// Returns 0 if schema_version table doesn't exist (fresh database)
fn get_schema_version(conn: &Connection) -> AppResult<i32> {
    let table_exists: bool = conn
        .query_row(
            "SELECT EXISTS(SELECT 1 FROM sqlite_master WHERE type='table' AND name='schema_version')",
            [],
            |row| row.get(0),
        )
        .map_err(AppError::Database)?;

    if !table_exists {
        return Ok(0);
    }

    let version: Option<i32> = conn
        .query_row("SELECT MAX(version) FROM schema_version", [], |row| row.get(0))
        .map_err(AppError::Database)?;

    Ok(version.unwrap_or(0))
}

fn set_schema_version(conn: &Connection, version: i32) -> AppResult<()> {
    conn.execute(
        "INSERT OR IGNORE INTO schema_version (version, applied_at) VALUES (?1, datetime('now'))",
        [version],
    )
    .map_err(AppError::Database)?;

    Ok(())
}

fn drop_managed_tables(conn: &Connection) -> AppResult<()> {
    for table in MANAGED_TABLES {
        conn.execute_batch(&format!("DROP TABLE IF EXISTS {};", table))
            .map_err(AppError::Database)?;
    }
    Ok(())
}

fn apply_schema(conn: &Connection) -> AppResult<()> {
    let schema = include_str!("../../schema.sql");

    conn.execute_batch(schema)
        .map_err(|e| AppError::Other(format!("Failed to apply schema: {}", e)))?;

    Ok(())
}

/// Verify database integrity
pub fn verify_database_integrity(conn: &Connection) -> AppResult<()> {
    let result: String = conn
        .query_row("PRAGMA integrity_check", [], |row| row.get(0))
        .map_err(AppError::Database)?;

    if result != "ok" {
        return Err(AppError::Other(format!(
            "Database integrity check failed: {}",
            result
        )));
    }

    Ok(())
}

/// Get database statistics
pub fn get_database_stats(conn: &Connection) -> AppResult<DatabaseStats> {
    let page_count: i64 = conn.query_row("PRAGMA page_count", [], |row| row.get(0))?;
    let page_size: i64 = conn.query_row("PRAGMA page_size", [], |row| row.get(0))?;

    let movie_count: i64 = conn.query_row("SELECT COUNT(*) FROM movies", [], |row| row.get(0))?;
    let show_count: i64 = conn.query_row("SELECT COUNT(*) FROM shows", [], |row| row.get(0))?;

    Ok(DatabaseStats {
        size_bytes: page_count * page_size,
        page_count,
        page_size,
        movie_count,
        show_count,
    })
}

/// Database statistics
#[derive(Debug, Clone, Serialize)]
pub struct DatabaseStats {
    pub size_bytes: i64,
    pub page_count: i64,
    pub page_size: i64,
    pub movie_count: i64,
    pub show_count: i64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::connection::create_test_connection;

    #[test]
    fn test_initialize_fresh_database() {
        let conn = create_test_connection().unwrap();
        assert_eq!(get_schema_version(&conn).unwrap(), 0);

        initialize_database(&conn).unwrap();
        assert_eq!(get_schema_version(&conn).unwrap(), CURRENT_SCHEMA_VERSION);

        let tables: i64 = conn
            .query_row(
                "SELECT COUNT(*) FROM sqlite_master WHERE type='table' AND name IN ('movies', 'shows')",
                [],
                |row| row.get(0),
            )
            .unwrap();
        assert_eq!(tables, 2);
    }

    #[test]
    fn test_initialize_idempotent() {
        let conn = create_test_connection().unwrap();
        initialize_database(&conn).unwrap();
        conn.execute(
            "INSERT INTO movies (id, title, is_favorite, is_in_watchlist, updated_at)
             VALUES (1, 'Kept', 1, 0, datetime('now'))",
            [],
        )
        .unwrap();

        initialize_database(&conn).unwrap();

        let count: i64 = conn
            .query_row("SELECT COUNT(*) FROM movies", [], |row| row.get(0))
            .unwrap();
        assert_eq!(count, 1);
    }

    #[test]
    fn test_outdated_schema_is_recreated() {
        let conn = create_test_connection().unwrap();
        conn.execute_batch(
            "CREATE TABLE schema_version (version INTEGER PRIMARY KEY, applied_at TEXT NOT NULL);
             INSERT INTO schema_version VALUES (1, datetime('now'));
             CREATE TABLE movies (id INTEGER PRIMARY KEY, title TEXT, favorite INTEGER);
             INSERT INTO movies VALUES (7, 'Old row', 1);",
        )
        .unwrap();

        initialize_database(&conn).unwrap();

        assert_eq!(get_schema_version(&conn).unwrap(), CURRENT_SCHEMA_VERSION);
        let count: i64 = conn
            .query_row("SELECT COUNT(*) FROM movies", [], |row| row.get(0))
            .unwrap();
        assert_eq!(count, 0);

        // New columns exist
        conn.execute(
            "INSERT INTO movies (id, title, is_favorite, is_in_watchlist, updated_at)
             VALUES (7, 'New row', 0, 1, datetime('now'))",
            [],
        )
        .unwrap();
    }

    #[test]
    fn test_newer_schema_is_rejected() {
        let conn = create_test_connection().unwrap();
        conn.execute_batch(
            "CREATE TABLE schema_version (version INTEGER PRIMARY KEY, applied_at TEXT NOT NULL);
             INSERT INTO schema_version VALUES (99, datetime('now'));",
        )
        .unwrap();

        assert!(initialize_database(&conn).is_err());
    }

    #[test]
    fn test_database_stats() {
        let conn = create_test_connection().unwrap();
        initialize_database(&conn).unwrap();

        let stats = get_database_stats(&conn).unwrap();
        assert!(stats.size_bytes > 0);
        assert_eq!(stats.movie_count, 0);
        assert_eq!(stats.show_count, 0);
    }

    #[test]
    fn test_integrity_check() {
        let conn = create_test_connection().unwrap();
        initialize_database(&conn).unwrap();
        verify_database_integrity(&conn).unwrap();
    }
}
