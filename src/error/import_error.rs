// src/error/import_error.rs
//
// Per-record import errors and their accumulator.
//
// RULES:
// - Every error belongs to exactly one input record
// - Recording an error logs it; callers decide how to present the list
// - Nothing recorded here aborts an import

use serde::Serialize;
use std::fmt;

use super::types::AppError;

/// Error taxonomy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ImportErrorKind {
    /// File, parent or source could not be resolved in the catalog
    NotFound,
    /// More than one catalog entry matched a path
    Ambiguous,
    /// Bad path, unsupported value kind or malformed value
    InvalidInput,
    /// A backing store operation failed
    StoreFailure,
    /// An expected local file is absent
    LocalIoFailure,
}

/// One problem found while importing, with enough context to log and display it
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImportError {
    pub kind: ImportErrorKind,

    /// Component that detected the problem
    pub source: String,

    /// Human-readable description naming the offending record
    pub message: String,

    /// Rendered underlying failure, if any
    pub cause: Option<String>,
}

impl ImportError {
    pub fn new(kind: ImportErrorKind, source: &str, message: impl Into<String>) -> Self {
        Self {
            kind,
            source: source.to_string(),
            message: message.into(),
            cause: None,
        }
    }

    pub fn with_cause(mut self, cause: &AppError) -> Self {
        self.cause = Some(cause.to_string());
        self
    }

    // ------------------------------------------------------------------
    // Derived files
    // ------------------------------------------------------------------

    pub fn local_file_missing(source: &str, local_path: &str) -> Self {
        Self::new(
            ImportErrorKind::LocalIoFailure,
            source,
            format!("Could not import derived file at {}, file does not exist", local_path),
        )
    }

    pub fn local_file_unreadable(source: &str, local_path: &str, cause: &AppError) -> Self {
        Self::new(
            ImportErrorKind::LocalIoFailure,
            source,
            format!("Could not import derived file at {}, file cannot be read", local_path),
        )
        .with_cause(cause)
    }

    pub fn parent_not_found(source: &str, local_path: &str, parent_path: &str) -> Self {
        Self::new(
            ImportErrorKind::NotFound,
            source,
            format!(
                "Could not import derived file at {}, parent file {} not found in case database",
                local_path, parent_path
            ),
        )
    }

    pub fn file_registration_failed(source: &str, local_path: &str, cause: &AppError) -> Self {
        Self::new(
            ImportErrorKind::StoreFailure,
            source,
            format!("Error adding derived file {} to case database", local_path),
        )
        .with_cause(cause)
    }

    // ------------------------------------------------------------------
    // Path resolution
    // ------------------------------------------------------------------

    pub fn not_absolute_path(source: &str, local_path: &str, case_directory: &str) -> Self {
        Self::new(
            ImportErrorKind::InvalidInput,
            source,
            format!(
                "Path {} is not absolute, cannot make it relative to case directory {}",
                local_path, case_directory
            ),
        )
    }

    pub fn path_not_under_case_root(source: &str, local_path: &str, case_directory: &str) -> Self {
        Self::new(
            ImportErrorKind::InvalidInput,
            source,
            format!(
                "Cannot make path {} relative to case directory {}",
                local_path, case_directory
            ),
        )
    }

    pub fn ambiguous_path(source: &str, path: &str, match_count: usize) -> Self {
        Self::new(
            ImportErrorKind::Ambiguous,
            source,
            format!(
                "{} files in the case database match {}, using the first match",
                match_count, path
            ),
        )
    }

    // ------------------------------------------------------------------
    // Artifacts
    // ------------------------------------------------------------------

    pub fn source_file_not_found(source: &str, artifact_type: &str, source_file_path: &str) -> Self {
        Self::new(
            ImportErrorKind::NotFound,
            source,
            format!(
                "Could not import {} artifact, source file {} not found in case database",
                artifact_type, source_file_path
            ),
        )
    }

    pub fn unsupported_value_kind(
        source: &str,
        attribute_type: &str,
        value: &str,
        artifact_type: &str,
        source_file_path: &str,
        value_type: &str,
    ) -> Self {
        Self::new(
            ImportErrorKind::InvalidInput,
            source,
            format!(
                "Could not add {} attribute with value {} to {} artifact from {}, unsupported value type {}",
                attribute_type, value, artifact_type, source_file_path, value_type
            ),
        )
    }

    pub fn malformed_value(
        source: &str,
        attribute_type: &str,
        value: &str,
        value_type: &str,
        artifact_type: &str,
        source_file_path: &str,
    ) -> Self {
        Self::new(
            ImportErrorKind::InvalidInput,
            source,
            format!(
                "Could not add {} attribute to {} artifact from {}, value {} is not a valid {}",
                attribute_type, artifact_type, source_file_path, value, value_type
            ),
        )
    }

    pub fn artifact_import_failed(
        source: &str,
        artifact_type: &str,
        source_file_path: &str,
        cause: &AppError,
    ) -> Self {
        Self::new(
            ImportErrorKind::StoreFailure,
            source,
            format!(
                "Error importing {} artifact from {}",
                artifact_type, source_file_path
            ),
        )
        .with_cause(cause)
    }

    // ------------------------------------------------------------------
    // Reports
    // ------------------------------------------------------------------

    pub fn report_file_missing(source: &str, local_path: &str) -> Self {
        Self::new(
            ImportErrorKind::LocalIoFailure,
            source,
            format!("Report file at {} does not exist", local_path),
        )
    }

    pub fn report_registration_failed(source: &str, local_path: &str, cause: &AppError) -> Self {
        Self::new(
            ImportErrorKind::StoreFailure,
            source,
            format!("Error adding report at {} to case", local_path),
        )
        .with_cause(cause)
    }
}

impl fmt::Display for ImportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.cause {
            Some(cause) => write!(f, "{}: {} ({})", self.source, self.message, cause),
            None => write!(f, "{}: {}", self.source, self.message),
        }
    }
}

impl std::error::Error for ImportError {}

/// Ordered collection of import errors.
///
/// Each phase builds and returns its own; the coordinator concatenates them.
/// Parallel producers can each fill one and merge with `extend`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImportErrors {
    errors: Vec<ImportError>,
}

impl ImportErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Logs the error and appends it
    pub fn record(&mut self, error: ImportError) {
        match error.kind {
            ImportErrorKind::Ambiguous => log::warn!("{}", error),
            _ => log::error!("{}", error),
        }
        self.errors.push(error);
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ImportError> {
        self.errors.iter()
    }

    pub fn count_of(&self, kind: ImportErrorKind) -> usize {
        self.errors.iter().filter(|e| e.kind == kind).count()
    }

    pub fn into_vec(self) -> Vec<ImportError> {
        self.errors
    }
}

impl Extend<ImportError> for ImportErrors {
    fn extend<T: IntoIterator<Item = ImportError>>(&mut self, iter: T) {
        self.errors.extend(iter);
    }
}

impl IntoIterator for ImportErrors {
    type Item = ImportError;
    type IntoIter = std::vec::IntoIter<ImportError>;

    fn into_iter(self) -> Self::IntoIter {
        self.errors.into_iter()
    }
}

impl<'a> IntoIterator for &'a ImportErrors {
    type Item = &'a ImportError;
    type IntoIter = std::slice::Iter<'a, ImportError>;

    fn into_iter(self) -> Self::IntoIter {
        self.errors.iter()
    }
}
