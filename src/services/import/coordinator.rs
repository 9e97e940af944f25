// src/services/import/coordinator.rs
//
// Import Coordinator
//
// Runs the three import phases in a fixed order and hands back every
// problem found. Files come first so artifacts can use them as sources.
//
// CRITICAL RULES:
// - Never fails as a whole: all failure is an entry in the returned list
// - Each call starts with an empty error list
// - The type cache outlives a call; the error list does not

use std::path::PathBuf;
use std::sync::Arc;

use crate::domain::{ExternalResults, StandardArtifactTypes};
use crate::error::{ImportError, ImportErrors};
use crate::events::EventBus;
use crate::repositories::CaseStore;

use super::artifacts::ArtifactImporter;
use super::derived_files::DerivedFileImporter;
use super::path_resolver::FilePathResolver;
use super::reports::ReportImporter;
use super::type_registry::TypeRegistry;

/// Module name carried by data-availability notifications
pub const MODULE_NAME: &str = env!("CARGO_PKG_NAME");

pub struct ExternalResultsImporter {
    derived_files: DerivedFileImporter,
    artifacts: ArtifactImporter,
    reports: ReportImporter,
}

impl ExternalResultsImporter {
    pub fn new(
        store: CaseStore,
        event_bus: Arc<EventBus>,
        case_directory: impl Into<PathBuf>,
        standard_types: StandardArtifactTypes,
    ) -> Self {
        let resolver = Arc::new(FilePathResolver::new(store.files.clone(), case_directory));
        let registry = Arc::new(TypeRegistry::new(store.types.clone(), standard_types));

        Self {
            derived_files: DerivedFileImporter::new(
                store.files.clone(),
                Arc::clone(&resolver),
                Arc::clone(&event_bus),
            ),
            artifacts: ArtifactImporter::new(
                store.artifacts.clone(),
                store.index.clone(),
                registry,
                resolver,
                event_bus,
                MODULE_NAME,
            ),
            reports: ReportImporter::new(store.reports.clone()),
        }
    }

    /// Imports derived files, then artifacts, then reports.
    pub fn import_results(&self, results: &ExternalResults) -> Vec<ImportError> {
        log::info!(
            "Importing {} derived files, {} artifacts, {} reports",
            results.derived_files.len(),
            results.artifacts.len(),
            results.reports.len()
        );

        let mut errors = ImportErrors::new();
        errors.extend(self.derived_files.import(&results.derived_files));
        errors.extend(self.artifacts.import(&results.artifacts));
        errors.extend(self.reports.import(&results.reports));

        if errors.is_empty() {
            log::info!("Imported {} records without errors", results.record_count());
        } else {
            log::info!(
                "Imported {} records with {} errors",
                results.record_count(),
                errors.len()
            );
        }

        errors.into_vec()
    }
}
