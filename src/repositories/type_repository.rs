// src/repositories/type_repository.rs
//
// Artifact and attribute type registry
//
// Types are append-only: once registered, an id is never reassigned.

use rusqlite::{OptionalExtension, Row};
use std::sync::Arc;

use crate::db::{get_connection, ConnectionPool};
use crate::domain::artifact::{ArtifactType, ArtifactTypeId, AttributeType, AttributeTypeId, ValueKind};
use crate::error::AppResult;

// ---------------------------------------------------------------------
// Repository contract
// ---------------------------------------------------------------------
#[cfg_attr(test, mockall::automock)]
pub trait TypeRepository: Send + Sync {
    fn get_artifact_type_id(&self, name: &str) -> AppResult<Option<ArtifactTypeId>>;

    fn register_artifact_type(&self, name: &str, display_name: &str) -> AppResult<ArtifactTypeId>;

    fn get_attribute_type_id(&self, name: &str) -> AppResult<Option<AttributeTypeId>>;

    fn register_attribute_type(
        &self,
        name: &str,
        value_kind: ValueKind,
        display_name: &str,
    ) -> AppResult<AttributeTypeId>;

    fn list_artifact_types(&self) -> AppResult<Vec<ArtifactType>>;

    fn list_attribute_types(&self) -> AppResult<Vec<AttributeType>>;
}

// ---------------------------------------------------------------------
// SQLite Implementation
// ---------------------------------------------------------------------
pub struct SqliteTypeRepository {
    pool: Arc<ConnectionPool>,
}

impl SqliteTypeRepository {
    pub fn new(pool: Arc<ConnectionPool>) -> Self {
        Self { pool }
    }

    fn row_to_attribute_type(row: &Row) -> rusqlite::Result<AttributeType> {
        let label: String = row.get("value_kind")?;
        let value_kind = ValueKind::from_store_label(&label).ok_or_else(|| {
            rusqlite::Error::FromSqlConversionFailure(
                2,
                rusqlite::types::Type::Text,
                Box::new(crate::domain::DomainError::UnknownValueKind(label.clone())),
            )
        })?;

        Ok(AttributeType {
            id: AttributeTypeId(row.get("id")?),
            name: row.get("name")?,
            value_kind,
            display_name: row.get("display_name")?,
        })
    }
}

impl TypeRepository for SqliteTypeRepository {
    fn get_artifact_type_id(&self, name: &str) -> AppResult<Option<ArtifactTypeId>> {
        let conn = get_connection(&self.pool)?;
        let id = conn
            .query_row("SELECT id FROM artifact_types WHERE name = ?1", [name], |row| {
                row.get::<_, i32>(0)
            })
            .optional()?;
        Ok(id.map(ArtifactTypeId))
    }

    fn register_artifact_type(&self, name: &str, display_name: &str) -> AppResult<ArtifactTypeId> {
        let conn = get_connection(&self.pool)?;
        conn.execute(
            "INSERT INTO artifact_types (name, display_name) VALUES (?1, ?2)",
            rusqlite::params![name, display_name],
        )?;
        Ok(ArtifactTypeId(conn.last_insert_rowid() as i32))
    }

    fn get_attribute_type_id(&self, name: &str) -> AppResult<Option<AttributeTypeId>> {
        let conn = get_connection(&self.pool)?;
        let id = conn
            .query_row("SELECT id FROM attribute_types WHERE name = ?1", [name], |row| {
                row.get::<_, i32>(0)
            })
            .optional()?;
        Ok(id.map(AttributeTypeId))
    }

    fn register_attribute_type(
        &self,
        name: &str,
        value_kind: ValueKind,
        display_name: &str,
    ) -> AppResult<AttributeTypeId> {
        let conn = get_connection(&self.pool)?;
        conn.execute(
            "INSERT INTO attribute_types (name, value_kind, display_name) VALUES (?1, ?2, ?3)",
            rusqlite::params![name, value_kind.store_label(), display_name],
        )?;
        Ok(AttributeTypeId(conn.last_insert_rowid() as i32))
    }

    fn list_artifact_types(&self) -> AppResult<Vec<ArtifactType>> {
        let conn = get_connection(&self.pool)?;
        let mut stmt = conn.prepare("SELECT id, name, display_name FROM artifact_types ORDER BY id")?;

        let types = stmt
            .query_map([], |row| {
                Ok(ArtifactType {
                    id: ArtifactTypeId(row.get("id")?),
                    name: row.get("name")?,
                    display_name: row.get("display_name")?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(types)
    }

    fn list_attribute_types(&self) -> AppResult<Vec<AttributeType>> {
        let conn = get_connection(&self.pool)?;
        let mut stmt = conn.prepare(
            "SELECT id, name, value_kind, display_name FROM attribute_types ORDER BY id",
        )?;

        let types = stmt
            .query_map([], Self::row_to_attribute_type)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(types)
    }
}
