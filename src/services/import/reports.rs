// src/services/import/reports.rs
//
// Report Importer

use std::path::Path;
use std::sync::Arc;

use crate::domain::ReportData;
use crate::error::{ImportError, ImportErrors};
use crate::repositories::ReportRepository;

const SOURCE: &str = module_path!();

pub struct ReportImporter {
    reports: Arc<dyn ReportRepository>,
}

impl ReportImporter {
    pub fn new(reports: Arc<dyn ReportRepository>) -> Self {
        Self { reports }
    }

    pub fn import(&self, records: &[ReportData]) -> ImportErrors {
        let mut errors = ImportErrors::new();

        for record in records {
            let path = Path::new(&record.local_path);
            if !path.exists() {
                errors.record(ImportError::report_file_missing(SOURCE, &record.local_path));
                continue;
            }

            match self
                .reports
                .register_report(path, &record.source_module_name, &record.report_name)
            {
                Ok(report) => log::debug!("Added report '{}' ({})", report.display_name, report.id),
                Err(e) => errors.record(ImportError::report_registration_failed(
                    SOURCE,
                    &record.local_path,
                    &e,
                )),
            }
        }

        errors
    }
}
