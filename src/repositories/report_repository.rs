// src/repositories/report_repository.rs
//
// Case report registry

use chrono::{DateTime, Utc};
use rusqlite::Row;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::db::{get_connection, ConnectionPool};
use crate::domain::report::Report;
use crate::error::AppResult;

// ---------------------------------------------------------------------
// Repository contract
// ---------------------------------------------------------------------
#[cfg_attr(test, mockall::automock)]
pub trait ReportRepository: Send + Sync {
    fn register_report(&self, path: &Path, source_module: &str, display_name: &str) -> AppResult<Report>;

    fn list(&self) -> AppResult<Vec<Report>>;
}

// ---------------------------------------------------------------------
// SQLite Implementation
// ---------------------------------------------------------------------
pub struct SqliteReportRepository {
    pool: Arc<ConnectionPool>,
}

impl SqliteReportRepository {
    pub fn new(pool: Arc<ConnectionPool>) -> Self {
        Self { pool }
    }

    fn row_to_report(row: &Row) -> rusqlite::Result<Report> {
        let created_at_str: String = row.get("created_at")?;
        let created_at = DateTime::parse_from_rfc3339(&created_at_str)
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(|e| {
                rusqlite::Error::FromSqlConversionFailure(
                    4,
                    rusqlite::types::Type::Text,
                    Box::new(std::io::Error::new(
                        std::io::ErrorKind::InvalidData,
                        format!("Invalid created_at timestamp '{}': {}", created_at_str, e),
                    )),
                )
            })?;

        Ok(Report {
            id: row.get("id")?,
            path: PathBuf::from(row.get::<_, String>("path")?),
            source_module: row.get("source_module")?,
            display_name: row.get("display_name")?,
            created_at,
        })
    }
}

impl ReportRepository for SqliteReportRepository {
    fn register_report(&self, path: &Path, source_module: &str, display_name: &str) -> AppResult<Report> {
        let conn = get_connection(&self.pool)?;
        let created_at = Utc::now();

        conn.execute(
            "INSERT INTO reports (path, source_module, display_name, created_at) VALUES (?1, ?2, ?3, ?4)",
            rusqlite::params![
                path.to_string_lossy().to_string(),
                source_module,
                display_name,
                created_at.to_rfc3339(),
            ],
        )?;

        Ok(Report {
            id: conn.last_insert_rowid(),
            path: path.to_path_buf(),
            source_module: source_module.to_string(),
            display_name: display_name.to_string(),
            created_at,
        })
    }

    fn list(&self) -> AppResult<Vec<Report>> {
        let conn = get_connection(&self.pool)?;
        let mut stmt = conn.prepare(
            "SELECT id, path, source_module, display_name, created_at FROM reports ORDER BY id",
        )?;

        let reports = stmt
            .query_map([], Self::row_to_report)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(reports)
    }
}
