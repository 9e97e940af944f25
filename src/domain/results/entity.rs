// src/domain/results/entity.rs
//
// Canonical intermediate representation of results produced by an
// external analysis tool.
//
// CRITICAL RULES:
// - Records are read once per import and never mutated by the importer
// - Relationships are textual (paths and type names), resolved at import time
// - No validation here; the importer reports problems per record

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::AppResult;

/// A full batch of external results
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ExternalResults {
    pub derived_files: Vec<DerivedFileData>,
    pub artifacts: Vec<ArtifactData>,
    pub reports: Vec<ReportData>,
}

/// A file produced by the external tool, to be attached under a parent
/// already present in the file catalog
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DerivedFileData {
    /// Absolute path of the produced file on local disk
    pub local_path: String,

    /// Catalog path of the logical parent (e.g. "/img/dir/file.zip")
    pub parent_path: String,
}

/// An artifact to create on a catalog file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArtifactData {
    #[serde(rename = "type")]
    pub artifact_type: String,

    pub source_file_path: String,

    #[serde(default)]
    pub attributes: Vec<AttributeData>,
}

/// One loosely typed attribute of an artifact
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttributeData {
    #[serde(rename = "type")]
    pub attribute_type: String,

    /// Declared value kind: text, int32, int64, double or datetime.
    /// Kept as a string so unknown kinds reach the importer and get reported.
    pub value_type: String,

    pub value: String,

    pub source_module: String,
}

/// A report generated by the external tool
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportData {
    pub local_path: String,
    pub source_module_name: String,
    pub report_name: String,
}

impl ExternalResults {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_json_str(json: &str) -> AppResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_json_file(path: &Path) -> AppResult<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    pub fn add_derived_file(
        &mut self,
        local_path: impl Into<String>,
        parent_path: impl Into<String>,
    ) -> &mut DerivedFileData {
        self.derived_files.push(DerivedFileData {
            local_path: local_path.into(),
            parent_path: parent_path.into(),
        });
        let last = self.derived_files.len() - 1;
        &mut self.derived_files[last]
    }

    pub fn add_artifact(
        &mut self,
        artifact_type: impl Into<String>,
        source_file_path: impl Into<String>,
    ) -> &mut ArtifactData {
        self.artifacts.push(ArtifactData {
            artifact_type: artifact_type.into(),
            source_file_path: source_file_path.into(),
            attributes: Vec::new(),
        });
        let last = self.artifacts.len() - 1;
        &mut self.artifacts[last]
    }

    pub fn add_report(
        &mut self,
        local_path: impl Into<String>,
        source_module_name: impl Into<String>,
        report_name: impl Into<String>,
    ) -> &mut ReportData {
        self.reports.push(ReportData {
            local_path: local_path.into(),
            source_module_name: source_module_name.into(),
            report_name: report_name.into(),
        });
        let last = self.reports.len() - 1;
        &mut self.reports[last]
    }

    /// Total number of records across the three sections
    pub fn record_count(&self) -> usize {
        self.derived_files.len() + self.artifacts.len() + self.reports.len()
    }

    pub fn is_empty(&self) -> bool {
        self.record_count() == 0
    }
}

impl ArtifactData {
    pub fn add_attribute(
        &mut self,
        attribute_type: impl Into<String>,
        value_type: impl Into<String>,
        value: impl Into<String>,
        source_module: impl Into<String>,
    ) -> &mut Self {
        self.attributes.push(AttributeData {
            attribute_type: attribute_type.into(),
            value_type: value_type.into(),
            value: value.into(),
            source_module: source_module.into(),
        });
        self
    }
}
