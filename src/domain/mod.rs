// src/domain/mod.rs
//
// Domain Root - The Single Source of Truth for Domain API
//
// This file MUST declare all domain modules and re-export their public API.
// All other modules import from `crate::domain::*`

// ============================================================================
// MODULE DECLARATIONS
// ============================================================================

pub mod artifact;
pub mod file;
pub mod report;
pub mod results;

// ============================================================================
// PUBLIC API RE-EXPORTS
// ============================================================================

// External results (import input)
pub use results::{ArtifactData, AttributeData, DerivedFileData, ExternalResults, ReportData};

// File catalog
pub use file::{
    validate_derived_file, DerivationInfo, FileEntry, FileTimes, KnownStatus, NewDerivedFile,
};

// Artifacts
pub use artifact::{
    ArtifactHandle, ArtifactType, ArtifactTypeId, AttributeType, AttributeTypeId,
    StandardArtifactType, StandardArtifactTypes, TypedAttribute, TypedValue, ValueKind,
};

// Reports
pub use report::Report;

// ============================================================================
// DOMAIN ERROR TYPES
// ============================================================================

use thiserror::Error;

/// Domain-level errors
/// These represent violations of domain rules and invariants
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Invariant violation: {0}")]
    InvariantViolation(String),

    #[error("Unknown value kind label: {0}")]
    UnknownValueKind(String),

    #[error("Entity not found: {0}")]
    NotFound(String),
}

/// Domain result type
pub type DomainResult<T> = Result<T, DomainError>;
