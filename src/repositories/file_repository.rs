// src/repositories/file_repository.rs
//
// File catalog repository
//
// Lookups return every match in catalog order; deciding what to do with
// duplicates is the caller's job.

use chrono::Utc;
use rusqlite::{OptionalExtension, Row};
use std::sync::Arc;

use crate::db::{get_connection, ConnectionPool};
use crate::domain::file::{DerivationInfo, FileEntry, FileTimes, KnownStatus, NewDerivedFile};
use crate::error::{AppError, AppResult};

const FILE_COLUMNS: &str = "id, name, parent_path, parent_id, size, ctime, crtime, atime, mtime,
     is_file, known_status, local_path, tool_name, tool_version, other_details, rederive_details";

// ---------------------------------------------------------------------
// Repository contract
// ---------------------------------------------------------------------
#[cfg_attr(test, mockall::automock)]
pub trait FileRepository: Send + Sync {
    /// All entries with exactly this name and parent path, ordered by id
    fn find_all_matching(&self, name: &str, parent_path: &str) -> AppResult<Vec<FileEntry>>;

    /// Registers a derived file as a child of `parent`
    fn register_derived_file(&self, file: &NewDerivedFile, parent: &FileEntry) -> AppResult<FileEntry>;

    /// Adds a plain catalog entry (data source content)
    fn add_entry(&self, name: &str, parent_path: &str, size: u64, is_file: bool) -> AppResult<FileEntry>;

    fn get_by_id(&self, id: i64) -> AppResult<Option<FileEntry>>;

    fn list_children(&self, parent_id: i64) -> AppResult<Vec<FileEntry>>;
}

// ---------------------------------------------------------------------
// SQLite Implementation
// ---------------------------------------------------------------------
pub struct SqliteFileRepository {
    pool: Arc<ConnectionPool>,
}

impl SqliteFileRepository {
    pub fn new(pool: Arc<ConnectionPool>) -> Self {
        Self { pool }
    }

    fn row_to_file(row: &Row) -> rusqlite::Result<FileEntry> {
        let known_str: String = row.get("known_status")?;
        let known = KnownStatus::parse(&known_str).ok_or_else(|| {
            rusqlite::Error::FromSqlConversionFailure(
                10,
                rusqlite::types::Type::Text,
                Box::new(std::io::Error::new(
                    std::io::ErrorKind::InvalidData,
                    format!("Invalid known_status '{}'", known_str),
                )),
            )
        })?;

        Ok(FileEntry {
            id: row.get("id")?,
            name: row.get("name")?,
            parent_path: row.get("parent_path")?,
            parent_id: row.get("parent_id")?,
            size: row.get::<_, i64>("size")? as u64,
            times: FileTimes {
                ctime: row.get("ctime")?,
                crtime: row.get("crtime")?,
                atime: row.get("atime")?,
                mtime: row.get("mtime")?,
            },
            is_file: row.get("is_file")?,
            known,
            local_path: row.get("local_path")?,
            derivation: DerivationInfo {
                tool_name: row.get("tool_name")?,
                tool_version: row.get("tool_version")?,
                other_details: row.get("other_details")?,
                rederive_details: row.get("rederive_details")?,
            },
        })
    }

    fn fetch(&self, id: i64) -> AppResult<Option<FileEntry>> {
        let conn = get_connection(&self.pool)?;
        let file = conn
            .query_row(
                &format!("SELECT {} FROM files WHERE id = ?1", FILE_COLUMNS),
                [id],
                Self::row_to_file,
            )
            .optional()?;
        Ok(file)
    }
}

impl FileRepository for SqliteFileRepository {
    fn find_all_matching(&self, name: &str, parent_path: &str) -> AppResult<Vec<FileEntry>> {
        let conn = get_connection(&self.pool)?;
        let mut stmt = conn.prepare(&format!(
            "SELECT {} FROM files WHERE name = ?1 AND parent_path = ?2 ORDER BY id",
            FILE_COLUMNS
        ))?;

        let files = stmt
            .query_map(rusqlite::params![name, parent_path], Self::row_to_file)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(files)
    }

    fn register_derived_file(&self, file: &NewDerivedFile, parent: &FileEntry) -> AppResult<FileEntry> {
        let id = {
            let conn = get_connection(&self.pool)?;
            conn.execute(
                "INSERT INTO files (
                    name, parent_path, parent_id, size, ctime, crtime, atime, mtime,
                    is_file, known_status, local_path,
                    tool_name, tool_version, other_details, rederive_details, created_at
                ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15, ?16)",
                rusqlite::params![
                    file.name,
                    parent.child_parent_path(),
                    parent.id,
                    file.size as i64,
                    file.times.ctime,
                    file.times.crtime,
                    file.times.atime,
                    file.times.mtime,
                    file.is_file,
                    file.known.as_str(),
                    file.relative_path,
                    file.derivation.tool_name,
                    file.derivation.tool_version,
                    file.derivation.other_details,
                    file.derivation.rederive_details,
                    Utc::now().to_rfc3339(),
                ],
            )?;
            conn.last_insert_rowid()
        };

        self.fetch(id)?.ok_or(AppError::NotFound)
    }

    fn add_entry(&self, name: &str, parent_path: &str, size: u64, is_file: bool) -> AppResult<FileEntry> {
        let id = {
            let conn = get_connection(&self.pool)?;
            conn.execute(
                "INSERT INTO files (name, parent_path, size, is_file, created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5)",
                rusqlite::params![name, parent_path, size as i64, is_file, Utc::now().to_rfc3339()],
            )?;
            conn.last_insert_rowid()
        };

        self.fetch(id)?.ok_or(AppError::NotFound)
    }

    fn get_by_id(&self, id: i64) -> AppResult<Option<FileEntry>> {
        self.fetch(id)
    }

    fn list_children(&self, parent_id: i64) -> AppResult<Vec<FileEntry>> {
        let conn = get_connection(&self.pool)?;
        let mut stmt = conn.prepare(&format!(
            "SELECT {} FROM files WHERE parent_id = ?1 ORDER BY id",
            FILE_COLUMNS
        ))?;

        let files = stmt
            .query_map([parent_id], Self::row_to_file)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(files)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{create_memory_pool, initialize_database};

    fn repository() -> SqliteFileRepository {
        let pool = create_memory_pool().unwrap();
        initialize_database(&get_connection(&pool).unwrap()).unwrap();
        SqliteFileRepository::new(Arc::new(pool))
    }

    #[test]
    fn test_find_all_matching_is_exact() {
        let repo = repository();
        repo.add_entry("a.txt", "/img/dir/", 3, true).unwrap();
        repo.add_entry("A.txt", "/img/dir/", 3, true).unwrap();
        repo.add_entry("a.txt", "/img/dir", 3, true).unwrap();

        let matches = repo.find_all_matching("a.txt", "/img/dir/").unwrap();

        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].full_path(), "/img/dir/a.txt");
    }

    #[test]
    fn test_duplicates_come_back_in_insertion_order() {
        let repo = repository();
        let first = repo.add_entry("dup", "/img/", 1, true).unwrap();
        let second = repo.add_entry("dup", "/img/", 2, true).unwrap();

        let matches = repo.find_all_matching("dup", "/img/").unwrap();

        assert_eq!(matches.iter().map(|f| f.id).collect::<Vec<_>>(), vec![first.id, second.id]);
    }

    #[test]
    fn test_register_derived_file_under_parent() {
        let repo = repository();
        let parent = repo.add_entry("dir", "/img/", 0, false).unwrap();

        let derived = repo
            .register_derived_file(&NewDerivedFile::from_external_tool("x.bin", "out/x.bin", 42), &parent)
            .unwrap();

        assert_eq!(derived.name, "x.bin");
        assert_eq!(derived.parent_path, "/img/dir/");
        assert_eq!(derived.parent_id, Some(parent.id));
        assert_eq!(derived.size, 42);
        assert_eq!(derived.times, FileTimes::unknown());
        assert_eq!(derived.local_path.as_deref(), Some("out/x.bin"));
        assert!(derived.derivation.is_empty());

        let children = repo.list_children(parent.id).unwrap();
        assert_eq!(children, vec![derived.clone()]);

        let found = repo.find_all_matching("x.bin", "/img/dir/").unwrap();
        assert_eq!(found, vec![derived]);
    }

    #[test]
    fn test_get_by_id_missing() {
        let repo = repository();
        assert!(repo.get_by_id(12345).unwrap().is_none());
    }
}
