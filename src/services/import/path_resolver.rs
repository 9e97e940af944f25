// src/services/import/path_resolver.rs
//
// File Path Resolver
//
// Resolves catalog paths ("/img/dir/x.bin") to catalog entries and local
// filesystem paths to paths relative to the case directory.
//
// RULES:
// - Catalog matching is exact: one split at the last '/', no normalization
// - "Not found" is a value, not an error
// - Several matches resolve to the first one and record one warning

use std::path::{Component, Path, PathBuf};
use std::sync::Arc;

use crate::domain::FileEntry;
use crate::error::{AppResult, ImportError, ImportErrors};
use crate::repositories::FileRepository;

const SOURCE: &str = module_path!();

/// Splits a catalog path into (name, parent_path).
///
/// The name is everything after the last '/', the parent path everything up
/// to and including it. A path without '/' has an empty parent path.
pub fn split_path(path: &str) -> (&str, &str) {
    match path.rfind('/') {
        Some(idx) => (&path[idx + 1..], &path[..=idx]),
        None => (path, ""),
    }
}

pub struct FilePathResolver {
    files: Arc<dyn FileRepository>,
    case_directory: PathBuf,
}

impl FilePathResolver {
    pub fn new(files: Arc<dyn FileRepository>, case_directory: impl Into<PathBuf>) -> Self {
        Self {
            files,
            case_directory: case_directory.into(),
        }
    }

    pub fn case_directory(&self) -> &Path {
        &self.case_directory
    }

    /// Finds the catalog entry for `path`.
    ///
    /// Returns `Ok(None)` when nothing matches. Only a failing catalog query
    /// is an `Err`.
    pub fn find_file(&self, path: &str, errors: &mut ImportErrors) -> AppResult<Option<FileEntry>> {
        let (name, parent_path) = split_path(path);
        let mut matches = self.files.find_all_matching(name, parent_path)?;

        if matches.len() > 1 {
            errors.record(ImportError::ambiguous_path(SOURCE, path, matches.len()));
        }

        if matches.is_empty() {
            Ok(None)
        } else {
            Ok(Some(matches.swap_remove(0)))
        }
    }

    /// Expresses an absolute local path relative to the case directory.
    ///
    /// Purely lexical: nothing is resolved on disk. A path outside the case
    /// directory climbs out with ".." segments.
    pub fn relative_to_case_folder(&self, local_path: &Path) -> Result<String, ImportError> {
        let display = local_path.display().to_string();
        let case_display = self.case_directory.display().to_string();

        if !local_path.is_absolute() {
            return Err(ImportError::not_absolute_path(SOURCE, &display, &case_display));
        }

        let local: Vec<Component> = local_path.components().collect();
        let case: Vec<Component> = self.case_directory.components().collect();

        let common = local
            .iter()
            .zip(case.iter())
            .take_while(|(a, b)| a == b)
            .count();

        if common == 0 {
            return Err(ImportError::path_not_under_case_root(SOURCE, &display, &case_display));
        }

        let mut segments: Vec<String> = Vec::new();
        segments.extend(std::iter::repeat("..".to_string()).take(case.len() - common));
        segments.extend(
            local[common..]
                .iter()
                .map(|c| c.as_os_str().to_string_lossy().into_owned()),
        );

        if segments.is_empty() {
            return Err(ImportError::path_not_under_case_root(SOURCE, &display, &case_display));
        }

        Ok(segments.join("/"))
    }
}
