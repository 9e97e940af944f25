// src/services/mod.rs
//
// Services Module - Orchestration Layer
//
// Services own the import workflow. They talk to the case store only through
// repository traits and announce what they added on the event bus.

pub mod import;

pub use import::{
    coerce,
    split_path,
    ArtifactImporter,
    CoercionError,
    DerivedFileImporter,
    ExternalResultsImporter,
    FilePathResolver,
    ReportImporter,
    ResolvedArtifactType,
    TypeRegistry,
    MODULE_NAME,
};
