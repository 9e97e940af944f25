// src/repositories/artifact_repository.rs
//
// Artifact repository
//
// Attributes are written in one transaction per call; each row fills exactly
// one typed value column.

use chrono::Utc;
use rusqlite::{OptionalExtension, Row};
use std::sync::Arc;

use crate::db::{get_connection, ConnectionPool};
use crate::domain::artifact::{
    ArtifactHandle, ArtifactTypeId, AttributeTypeId, TypedAttribute, TypedValue,
};
use crate::domain::file::FileEntry;
use crate::domain::DomainError;
use crate::error::AppResult;

// ---------------------------------------------------------------------
// Repository contract
// ---------------------------------------------------------------------
#[cfg_attr(test, mockall::automock)]
pub trait ArtifactRepository: Send + Sync {
    fn create_artifact(&self, file: &FileEntry, type_id: ArtifactTypeId) -> AppResult<ArtifactHandle>;

    fn attach_attributes(&self, artifact: &ArtifactHandle, attributes: &[TypedAttribute]) -> AppResult<()>;

    fn get_attributes(&self, artifact_id: i64) -> AppResult<Vec<TypedAttribute>>;

    fn list_for_file(&self, file_id: i64) -> AppResult<Vec<ArtifactHandle>>;
}

// ---------------------------------------------------------------------
// SQLite Implementation
// ---------------------------------------------------------------------
pub struct SqliteArtifactRepository {
    pool: Arc<ConnectionPool>,
}

/// Column values for one attribute row: (text, int32, int64, double, datetime)
type ValueColumns = (Option<String>, Option<i32>, Option<i64>, Option<f64>, Option<i64>);

impl SqliteArtifactRepository {
    pub fn new(pool: Arc<ConnectionPool>) -> Self {
        Self { pool }
    }

    fn value_columns(value: &TypedValue) -> ValueColumns {
        match value {
            TypedValue::Text(v) => (Some(v.clone()), None, None, None, None),
            TypedValue::Int32(v) => (None, Some(*v), None, None, None),
            TypedValue::Int64(v) => (None, None, Some(*v), None, None),
            TypedValue::Double(v) => (None, None, None, Some(*v), None),
            TypedValue::DateTime(v) => (None, None, None, None, Some(*v)),
        }
    }

    fn row_to_attribute(row: &Row) -> rusqlite::Result<TypedAttribute> {
        let value = if let Some(v) = row.get::<_, Option<String>>("value_text")? {
            TypedValue::Text(v)
        } else if let Some(v) = row.get::<_, Option<i32>>("value_int32")? {
            TypedValue::Int32(v)
        } else if let Some(v) = row.get::<_, Option<i64>>("value_int64")? {
            TypedValue::Int64(v)
        } else if let Some(v) = row.get::<_, Option<f64>>("value_double")? {
            TypedValue::Double(v)
        } else if let Some(v) = row.get::<_, Option<i64>>("value_datetime")? {
            TypedValue::DateTime(v)
        } else {
            return Err(rusqlite::Error::InvalidColumnType(
                4,
                "value_text".to_string(),
                rusqlite::types::Type::Null,
            ));
        };

        Ok(TypedAttribute {
            type_id: AttributeTypeId(row.get("attribute_type_id")?),
            source_module: row.get("source_module")?,
            value,
        })
    }

    fn row_to_handle(row: &Row) -> rusqlite::Result<ArtifactHandle> {
        Ok(ArtifactHandle {
            id: row.get("id")?,
            type_id: ArtifactTypeId(row.get("type_id")?),
            file_id: row.get("file_id")?,
            display_name: row.get("display_name")?,
        })
    }
}

impl ArtifactRepository for SqliteArtifactRepository {
    fn create_artifact(&self, file: &FileEntry, type_id: ArtifactTypeId) -> AppResult<ArtifactHandle> {
        let conn = get_connection(&self.pool)?;

        let display_name: String = conn
            .query_row(
                "SELECT display_name FROM artifact_types WHERE id = ?1",
                [type_id.0],
                |row| row.get(0),
            )
            .optional()?
            .ok_or_else(|| DomainError::NotFound(format!("artifact type {}", type_id)))?;

        conn.execute(
            "INSERT INTO artifacts (file_id, type_id, created_at) VALUES (?1, ?2, ?3)",
            rusqlite::params![file.id, type_id.0, Utc::now().to_rfc3339()],
        )?;

        Ok(ArtifactHandle {
            id: conn.last_insert_rowid(),
            type_id,
            file_id: file.id,
            display_name,
        })
    }

    fn attach_attributes(&self, artifact: &ArtifactHandle, attributes: &[TypedAttribute]) -> AppResult<()> {
        if attributes.is_empty() {
            return Ok(());
        }

        let mut conn = get_connection(&self.pool)?;
        let tx = conn.transaction()?;
        {
            let mut stmt = tx.prepare(
                "INSERT INTO artifact_attributes (
                    artifact_id, attribute_type_id, source_module,
                    value_text, value_int32, value_int64, value_double, value_datetime
                ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
            )?;

            for attribute in attributes {
                let (text, int32, int64, double, datetime) = Self::value_columns(&attribute.value);
                stmt.execute(rusqlite::params![
                    artifact.id,
                    attribute.type_id.0,
                    attribute.source_module,
                    text,
                    int32,
                    int64,
                    double,
                    datetime,
                ])?;
            }
        }
        tx.commit()?;
        Ok(())
    }

    fn get_attributes(&self, artifact_id: i64) -> AppResult<Vec<TypedAttribute>> {
        let conn = get_connection(&self.pool)?;
        let mut stmt = conn.prepare(
            "SELECT attribute_type_id, source_module,
                    value_text, value_int32, value_int64, value_double, value_datetime
             FROM artifact_attributes WHERE artifact_id = ?1 ORDER BY id",
        )?;

        let attributes = stmt
            .query_map([artifact_id], Self::row_to_attribute)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(attributes)
    }

    fn list_for_file(&self, file_id: i64) -> AppResult<Vec<ArtifactHandle>> {
        let conn = get_connection(&self.pool)?;
        let mut stmt = conn.prepare(
            "SELECT a.id, a.type_id, a.file_id, t.display_name
             FROM artifacts a
             JOIN artifact_types t ON t.id = a.type_id
             WHERE a.file_id = ?1
             ORDER BY a.id",
        )?;

        let artifacts = stmt
            .query_map([file_id], Self::row_to_handle)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(artifacts)
    }
}
