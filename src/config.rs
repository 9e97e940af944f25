// src/config.rs
//
// Case configuration
//
// A case is a directory on disk. Its SQLite database lives inside it unless
// a separate path is given, and derived files are catalogued relative to it.

use std::path::{Path, PathBuf};

use crate::error::{AppError, AppResult};

/// Database file name inside a case directory
pub const CASE_DATABASE_FILE: &str = "case.db";

const DEFAULT_POOL_MAX_SIZE: u32 = 4;
const DEFAULT_BUSY_TIMEOUT_MS: u32 = 5000;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaseConfig {
    /// Root directory of the case; case-relative paths resolve against it
    pub case_directory: PathBuf,

    /// SQLite database file
    pub database_path: PathBuf,

    /// Maximum pooled connections
    pub pool_max_size: u32,

    /// SQLite busy timeout
    pub busy_timeout_ms: u32,
}

impl CaseConfig {
    /// Configuration for a case rooted at `case_directory`, database inside it
    pub fn for_case(case_directory: impl Into<PathBuf>) -> Self {
        let case_directory = case_directory.into();
        let database_path = case_directory.join(CASE_DATABASE_FILE);
        Self {
            case_directory,
            database_path,
            pool_max_size: DEFAULT_POOL_MAX_SIZE,
            busy_timeout_ms: DEFAULT_BUSY_TIMEOUT_MS,
        }
    }

    pub fn with_database_path(mut self, database_path: impl Into<PathBuf>) -> Self {
        self.database_path = database_path.into();
        self
    }

    /// Default case directory: {APP_DATA}/extresults/case
    pub fn default_case_directory() -> AppResult<PathBuf> {
        let app_data_dir = dirs::data_dir()
            .ok_or_else(|| AppError::Config("Could not determine app data directory".to_string()))?;

        Ok(app_data_dir.join("extresults").join("case"))
    }

    pub fn validate(&self) -> AppResult<()> {
        if !self.case_directory.is_absolute() {
            return Err(AppError::Config(format!(
                "Case directory must be absolute: {}",
                self.case_directory.display()
            )));
        }

        if self.pool_max_size == 0 {
            return Err(AppError::Config("Pool size must be at least 1".to_string()));
        }

        Ok(())
    }

    /// Creates the case directory (and the database's directory) if missing
    pub fn ensure_directories(&self) -> AppResult<()> {
        std::fs::create_dir_all(&self.case_directory)?;
        if let Some(parent) = self.database_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        Ok(())
    }

    pub fn case_directory(&self) -> &Path {
        &self.case_directory
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_for_case_places_database_inside() {
        let config = CaseConfig::for_case("/cases/one");

        assert_eq!(config.database_path, PathBuf::from("/cases/one/case.db"));
        assert_eq!(config.pool_max_size, 4);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_relative_case_directory_is_rejected() {
        let config = CaseConfig::for_case("cases/one");
        assert!(matches!(config.validate(), Err(AppError::Config(_))));
    }

    #[test]
    fn test_zero_pool_size_is_rejected() {
        let mut config = CaseConfig::for_case("/cases/one");
        config.pool_max_size = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_ensure_directories_creates_case_dir() {
        let temp = tempfile::tempdir().unwrap();
        let config = CaseConfig::for_case(temp.path().join("nested").join("case"))
            .with_database_path(temp.path().join("db").join("case.db"));

        config.ensure_directories().unwrap();

        assert!(config.case_directory.is_dir());
        assert!(temp.path().join("db").is_dir());
    }
}
