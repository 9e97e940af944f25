// src/repositories/mod.rs
//
// Repository layer
//
// CRITICAL RULES:
// - Repositories are DUMB data mappers
// - NO import logic
// - NO event emission
// - NO cross-repository calls
// - Explicit SQL only

pub mod artifact_repository;
pub mod file_repository;
pub mod report_repository;
pub mod search_index;
pub mod type_repository;

pub use artifact_repository::{ArtifactRepository, SqliteArtifactRepository};
pub use file_repository::{FileRepository, SqliteFileRepository};
pub use report_repository::{ReportRepository, SqliteReportRepository};
pub use search_index::{IndexError, SearchIndex, SqliteSearchIndex};
pub use type_repository::{SqliteTypeRepository, TypeRepository};

use std::sync::Arc;

use crate::db::ConnectionPool;

/// The case store surface the importer talks to
#[derive(Clone)]
pub struct CaseStore {
    pub files: Arc<dyn FileRepository>,
    pub types: Arc<dyn TypeRepository>,
    pub artifacts: Arc<dyn ArtifactRepository>,
    pub reports: Arc<dyn ReportRepository>,
    pub index: Arc<dyn SearchIndex>,
}

impl CaseStore {
    /// All repositories backed by one SQLite pool
    pub fn sqlite(pool: Arc<ConnectionPool>) -> Self {
        Self {
            files: Arc::new(SqliteFileRepository::new(pool.clone())),
            types: Arc::new(SqliteTypeRepository::new(pool.clone())),
            artifacts: Arc::new(SqliteArtifactRepository::new(pool.clone())),
            reports: Arc::new(SqliteReportRepository::new(pool.clone())),
            index: Arc::new(SqliteSearchIndex::new(pool)),
        }
    }
}
