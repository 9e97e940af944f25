pub mod entity;

pub use entity::{ArtifactData, AttributeData, DerivedFileData, ExternalResults, ReportData};
