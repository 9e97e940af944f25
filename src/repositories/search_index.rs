// src/repositories/search_index.rs
//
// Secondary keyword index over artifacts
//
// The index is allowed to lag the primary tables. A failed index write never
// removes the artifact it was about.

use chrono::Utc;
use std::sync::Arc;
use thiserror::Error;

use crate::db::{get_connection, ConnectionPool};
use crate::domain::artifact::ArtifactHandle;
use crate::error::{AppError, AppResult};

#[derive(Debug, Error)]
#[error("Unable to index artifact {artifact_id} ({display_name}): {reason}")]
pub struct IndexError {
    pub artifact_id: i64,
    pub display_name: String,
    pub reason: String,
}

impl IndexError {
    pub fn new(artifact: &ArtifactHandle, reason: impl Into<String>) -> Self {
        Self {
            artifact_id: artifact.id,
            display_name: artifact.display_name.clone(),
            reason: reason.into(),
        }
    }
}

// ---------------------------------------------------------------------
// Index contract
// ---------------------------------------------------------------------
#[cfg_attr(test, mockall::automock)]
pub trait SearchIndex: Send + Sync {
    fn index_artifact(&self, artifact: &ArtifactHandle) -> Result<(), IndexError>;

    /// Ids of indexed artifacts whose text contains `term`
    fn search(&self, term: &str) -> AppResult<Vec<i64>>;
}

// ---------------------------------------------------------------------
// SQLite Implementation
// ---------------------------------------------------------------------
pub struct SqliteSearchIndex {
    pool: Arc<ConnectionPool>,
}

impl SqliteSearchIndex {
    pub fn new(pool: Arc<ConnectionPool>) -> Self {
        Self { pool }
    }

    /// Display name followed by every attribute value, one per line
    fn build_content(&self, artifact: &ArtifactHandle) -> AppResult<String> {
        let conn = get_connection(&self.pool)?;
        let mut stmt = conn.prepare(
            "SELECT COALESCE(value_text, CAST(value_int32 AS TEXT), CAST(value_int64 AS TEXT),
                             CAST(value_double AS TEXT), CAST(value_datetime AS TEXT))
             FROM artifact_attributes WHERE artifact_id = ?1 ORDER BY id",
        )?;

        let values = stmt
            .query_map([artifact.id], |row| row.get::<_, String>(0))?
            .collect::<Result<Vec<_>, _>>()?;

        let mut content = artifact.display_name.clone();
        for value in values {
            content.push('\n');
            content.push_str(&value);
        }
        Ok(content)
    }

    fn write(&self, artifact: &ArtifactHandle) -> AppResult<()> {
        let content = self.build_content(artifact)?;
        let conn = get_connection(&self.pool)?;
        conn.execute(
            "INSERT OR REPLACE INTO artifact_index (artifact_id, content, indexed_at) VALUES (?1, ?2, ?3)",
            rusqlite::params![artifact.id, content, Utc::now().to_rfc3339()],
        )?;
        Ok(())
    }
}

impl SearchIndex for SqliteSearchIndex {
    fn index_artifact(&self, artifact: &ArtifactHandle) -> Result<(), IndexError> {
        self.write(artifact)
            .map_err(|e: AppError| IndexError::new(artifact, e.to_string()))
    }

    fn search(&self, term: &str) -> AppResult<Vec<i64>> {
        let conn = get_connection(&self.pool)?;
        let mut stmt = conn.prepare(
            "SELECT artifact_id FROM artifact_index
             WHERE instr(content, ?1) > 0
             ORDER BY artifact_id",
        )?;

        let ids = stmt
            .query_map([term], |row| row.get(0))?
            .collect::<Result<Vec<i64>, _>>()?;

        Ok(ids)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{create_memory_pool, initialize_database};
    use crate::domain::{ArtifactTypeId, StandardArtifactType, TypedAttribute, TypedValue, ValueKind};
    use crate::repositories::{
        ArtifactRepository, FileRepository, SqliteArtifactRepository, SqliteFileRepository,
        SqliteTypeRepository, TypeRepository,
    };

    #[test]
    fn test_indexed_values_are_searchable() {
        let pool = Arc::new(create_memory_pool().unwrap());
        initialize_database(&get_connection(&pool).unwrap()).unwrap();
        let files = SqliteFileRepository::new(pool.clone());
        let types = SqliteTypeRepository::new(pool.clone());
        let artifacts = SqliteArtifactRepository::new(pool.clone());
        let index = SqliteSearchIndex::new(pool);

        let file = files.add_entry("a.txt", "/img/", 1, true).unwrap();
        let handle = artifacts
            .create_artifact(&file, StandardArtifactType::KeywordHit.type_id())
            .unwrap();
        let note = types.register_attribute_type("Note", ValueKind::Text, "Note").unwrap();
        let count = types.register_attribute_type("Count", ValueKind::Int32, "Count").unwrap();
        artifacts
            .attach_attributes(
                &handle,
                &[
                    TypedAttribute::new(note, "ext", TypedValue::Text("secret plans".into())),
                    TypedAttribute::new(count, "ext", TypedValue::Int32(31337)),
                ],
            )
            .unwrap();

        index.index_artifact(&handle).unwrap();

        assert_eq!(index.search("secret").unwrap(), vec![handle.id]);
        assert_eq!(index.search("31337").unwrap(), vec![handle.id]);
        assert_eq!(index.search("Keyword Hits").unwrap(), vec![handle.id]);
        assert!(index.search("absent").unwrap().is_empty());
    }

    #[test]
    fn test_index_failure_is_reported_not_raised() {
        let pool = Arc::new(create_memory_pool().unwrap());
        initialize_database(&get_connection(&pool).unwrap()).unwrap();
        let index = SqliteSearchIndex::new(pool);

        // No such artifact row: the foreign key rejects the index entry
        let orphan = ArtifactHandle {
            id: 77,
            type_id: ArtifactTypeId(1),
            file_id: 1,
            display_name: "General Info".to_string(),
        };

        let error = index.index_artifact(&orphan).unwrap_err();
        assert_eq!(error.artifact_id, 77);
        assert!(error.to_string().contains("General Info"));
    }
}
