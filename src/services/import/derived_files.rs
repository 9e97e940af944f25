// src/services/import/derived_files.rs
//
// Derived File Importer
//
// Adds files produced by an external tool to the catalog, each under an
// existing parent entry.
//
// RULES:
// - Records are independent: a failure skips that record only
// - No catalog entry without a local backing file and a resolved parent
// - Every registered file is announced with ModuleContentAdded

use std::fs;
use std::io;
use std::path::Path;
use std::sync::Arc;

use crate::domain::{validate_derived_file, DerivedFileData, NewDerivedFile};
use crate::error::{AppError, ImportError, ImportErrors};
use crate::events::{EventBus, ModuleContentAdded};
use crate::repositories::FileRepository;

use super::path_resolver::FilePathResolver;

const SOURCE: &str = module_path!();

pub struct DerivedFileImporter {
    files: Arc<dyn FileRepository>,
    resolver: Arc<FilePathResolver>,
    event_bus: Arc<EventBus>,
}

impl DerivedFileImporter {
    pub fn new(
        files: Arc<dyn FileRepository>,
        resolver: Arc<FilePathResolver>,
        event_bus: Arc<EventBus>,
    ) -> Self {
        Self {
            files,
            resolver,
            event_bus,
        }
    }

    /// Imports every record in order and returns what went wrong
    pub fn import(&self, records: &[DerivedFileData]) -> ImportErrors {
        let mut errors = ImportErrors::new();
        for record in records {
            self.import_one(record, &mut errors);
        }
        errors
    }

    fn import_one(&self, record: &DerivedFileData, errors: &mut ImportErrors) {
        let local_path = Path::new(&record.local_path);

        let size = match fs::metadata(local_path) {
            Ok(metadata) => metadata.len(),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                errors.record(ImportError::local_file_missing(SOURCE, &record.local_path));
                return;
            }
            Err(e) => {
                let cause = AppError::Io(e);
                errors.record(ImportError::local_file_unreadable(SOURCE, &record.local_path, &cause));
                return;
            }
        };

        let relative_path = match self.resolver.relative_to_case_folder(local_path) {
            Ok(path) => path,
            Err(error) => {
                errors.record(error);
                return;
            }
        };

        let parent = match self.resolver.find_file(&record.parent_path, errors) {
            Ok(Some(parent)) => parent,
            Ok(None) => {
                errors.record(ImportError::parent_not_found(
                    SOURCE,
                    &record.local_path,
                    &record.parent_path,
                ));
                return;
            }
            Err(e) => {
                errors.record(ImportError::file_registration_failed(SOURCE, &record.local_path, &e));
                return;
            }
        };

        let name = local_path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let new_file = NewDerivedFile::from_external_tool(name, relative_path, size);

        if let Err(e) = validate_derived_file(&new_file) {
            let cause = AppError::Domain(e);
            errors.record(ImportError::file_registration_failed(SOURCE, &record.local_path, &cause));
            return;
        }

        match self.files.register_derived_file(&new_file, &parent) {
            Ok(entry) => {
                log::debug!("Added derived file {} as {}", entry.full_path(), entry.id);
                self.event_bus.emit(ModuleContentAdded::new(entry));
            }
            Err(e) => {
                errors.record(ImportError::file_registration_failed(SOURCE, &record.local_path, &e));
            }
        }
    }
}
