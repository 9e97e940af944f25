// src/services/import/mod.rs
//
// External results import pipeline
//
// coordinator
//   -> derived_files -> path_resolver
//   -> artifacts     -> path_resolver, type_registry, coercion
//   -> reports

pub mod artifacts;
pub mod coercion;
pub mod coordinator;
pub mod derived_files;
pub mod path_resolver;
pub mod reports;
pub mod type_registry;

pub use artifacts::ArtifactImporter;
pub use coercion::{coerce, CoercionError};
pub use coordinator::{ExternalResultsImporter, MODULE_NAME};
pub use derived_files::DerivedFileImporter;
pub use path_resolver::{split_path, FilePathResolver};
pub use reports::ReportImporter;
pub use type_registry::{ResolvedArtifactType, TypeRegistry};
