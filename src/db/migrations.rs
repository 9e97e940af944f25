// src/db/migrations.rs
//
// Database schema initialization and migrations
//
// PRINCIPLES:
// - Explicit schema versions
// - No automatic migrations
// - Clear error messages
// - Idempotent operations

use rusqlite::Connection;

use crate::domain::StandardArtifactType;
use crate::error::{AppError, AppResult};

/// Current schema version
/// Increment this when adding migrations
const CURRENT_SCHEMA_VERSION: i32 = 1;

/// Initialize the database schema
///
/// This function:
/// 1. Checks current schema version
/// 2. Applies necessary migrations
/// 3. Seeds the standard artifact types
/// 4. Updates version tracking
///
/// Safe to call multiple times (idempotent).
pub fn initialize_database(conn: &Connection) -> AppResult<()> {
    let current_version = get_schema_version(conn)?;

    if current_version == 0 {
        apply_initial_schema(conn)?;
        seed_standard_artifact_types(conn)?;
        set_schema_version(conn, 1)?;
    } else if current_version < CURRENT_SCHEMA_VERSION {
        return Err(AppError::Other(format!(
            "Schema version {} is outdated. Expected {}. Manual migration required.",
            current_version, CURRENT_SCHEMA_VERSION
        )));
    } else if current_version > CURRENT_SCHEMA_VERSION {
        return Err(AppError::Other(format!(
            "Schema version {} is newer than supported {}. Update the application.",
            current_version, CURRENT_SCHEMA_VERSION
        )));
    }

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

/// Apply initial schema (version 1) from the embedded schema.sql
fn apply_initial_schema(conn: &Connection) -> AppResult<()> {
    let schema = include_str!("../../schema.sql");

    conn.execute_batch(schema)
        .map_err(|e| AppError::Other(format!("Failed to apply initial schema: {}", e)))?;

    Ok(())
}

/// Insert the well-known artifact types with their fixed ids
fn seed_standard_artifact_types(conn: &Connection) -> AppResult<()> {
    let mut stmt = conn.prepare(
        "INSERT OR IGNORE INTO artifact_types (id, name, display_name) VALUES (?1, ?2, ?3)",
    )?;

    for artifact_type in StandardArtifactType::ALL {
        stmt.execute(rusqlite::params![
            artifact_type.type_id().0,
            artifact_type.name(),
            artifact_type.display_name(),
        ])?;
    }

    log::debug!(
        "Seeded {} standard artifact types",
        StandardArtifactType::ALL.len()
    );
    Ok(())
}

/// Verify database integrity
///
/// Runs SQLite's integrity check.
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
///
/// Returns row counts for the main case tables
pub fn get_database_stats(conn: &Connection) -> AppResult<DatabaseStats> {
    let page_count: i64 = conn.query_row("PRAGMA page_count", [], |row| row.get(0))?;
    let page_size: i64 = conn.query_row("PRAGMA page_size", [], |row| row.get(0))?;

    let count = |table: &str| -> AppResult<i64> {
        Ok(conn.query_row(&format!("SELECT COUNT(*) FROM {}", table), [], |row| row.get(0))?)
    };

    Ok(DatabaseStats {
        size_bytes: page_count * page_size,
        file_count: count("files")?,
        artifact_type_count: count("artifact_types")?,
        artifact_count: count("artifacts")?,
        attribute_count: count("artifact_attributes")?,
        indexed_artifact_count: count("artifact_index")?,
        report_count: count("reports")?,
    })
}

/// Database statistics
#[derive(Debug)]
pub struct DatabaseStats {
    pub size_bytes: i64,
    pub file_count: i64,
    pub artifact_type_count: i64,
    pub artifact_count: i64,
    pub attribute_count: i64,
    pub indexed_artifact_count: i64,
    pub report_count: i64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::connection::create_test_connection;

    #[test]
    fn test_initialize_fresh_database() {
        let conn = create_test_connection().unwrap();

        let version = get_schema_version(&conn).unwrap();
        assert_eq!(version, 0);

        initialize_database(&conn).unwrap();

        let version = get_schema_version(&conn).unwrap();
        assert_eq!(version, 1);

        let table_count: i64 = conn
            .query_row(
                "SELECT COUNT(*) FROM sqlite_master WHERE type='table' AND name NOT LIKE 'sqlite_%'",
                [],
                |row| row.get(0),
            )
            .unwrap();

        assert_eq!(table_count, 8, "Expected 8 tables, got {}", table_count);
    }

    #[test]
    fn test_initialize_idempotent() {
        let conn = create_test_connection().unwrap();

        initialize_database(&conn).unwrap();
        initialize_database(&conn).unwrap();

        let version = get_schema_version(&conn).unwrap();
        assert_eq!(version, 1);
    }

    #[test]
    fn test_standard_types_seeded() {
        let conn = create_test_connection().unwrap();
        initialize_database(&conn).unwrap();

        let name: String = conn
            .query_row(
                "SELECT name FROM artifact_types WHERE id = ?1",
                [StandardArtifactType::WebBookmark.type_id().0],
                |row| row.get(0),
            )
            .unwrap();
        assert_eq!(name, "TSK_WEB_BOOKMARK");

        let stats = get_database_stats(&conn).unwrap();
        assert_eq!(stats.artifact_type_count as usize, StandardArtifactType::ALL.len());
    }

    #[test]
    fn test_attribute_requires_exactly_one_value() {
        let conn = create_test_connection().unwrap();
        initialize_database(&conn).unwrap();

        conn.execute_batch(
            "INSERT INTO files (name, parent_path, created_at) VALUES ('a', '/', datetime('now'));
             INSERT INTO attribute_types (id, name, value_kind, display_name) VALUES (1, 'Note', 'String', 'Note');
             INSERT INTO artifacts (file_id, type_id, created_at) VALUES (1, 1, datetime('now'));",
        )
        .unwrap();

        let none_set = conn.execute(
            "INSERT INTO artifact_attributes (artifact_id, attribute_type_id, source_module) VALUES (1, 1, 'm')",
            [],
        );
        assert!(none_set.is_err(), "an attribute with no value must be rejected");

        let two_set = conn.execute(
            "INSERT INTO artifact_attributes (artifact_id, attribute_type_id, source_module, value_text, value_int32)
             VALUES (1, 1, 'm', 'x', 1)",
            [],
        );
        assert!(two_set.is_err(), "an attribute with two values must be rejected");
    }

    #[test]
    fn test_foreign_keys_enabled() {
        let conn = create_test_connection().unwrap();
        initialize_database(&conn).unwrap();

        let result = conn.execute(
            "INSERT INTO artifacts (file_id, type_id, created_at) VALUES (999, 1, datetime('now'))",
            [],
        );

        assert!(result.is_err(), "Foreign key constraint should have been violated");
    }

    #[test]
    fn test_database_stats_and_integrity() {
        let conn = create_test_connection().unwrap();
        initialize_database(&conn).unwrap();

        let stats = get_database_stats(&conn).unwrap();
        assert!(stats.size_bytes > 0);
        assert_eq!(stats.file_count, 0);
        assert_eq!(stats.artifact_count, 0);
        assert_eq!(stats.report_count, 0);

        verify_database_integrity(&conn).unwrap();
    }
}
