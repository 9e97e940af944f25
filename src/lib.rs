// src/lib.rs
// extresults - imports results produced by external forensic tools into a case
//
// Architecture:
// - Domain-centric: input records, catalog entries and artifact types live in domain
// - Repository traits: the case store is reached only through Send + Sync contracts
// - Event-driven: new content and new data are announced on the event bus
// - Explicit: every per-record failure comes back as an ImportError

// ============================================================================
// FOUNDATION
// ============================================================================

pub mod config;
pub mod db;
pub mod domain;
pub mod error;
pub mod events;
pub mod repositories;
pub mod services;

// ============================================================================
// PUBLIC API - Domain
// ============================================================================

pub use domain::{
    ArtifactData,
    ArtifactHandle,
    ArtifactTypeId,
    AttributeData,
    AttributeTypeId,
    DerivedFileData,
    ExternalResults,
    FileEntry,
    NewDerivedFile,
    Report,
    ReportData,
    StandardArtifactType,
    StandardArtifactTypes,
    TypedAttribute,
    TypedValue,
    ValueKind,
};

// ============================================================================
// PUBLIC API - Errors
// ============================================================================

pub use error::{AppError, AppResult, ImportError, ImportErrorKind, ImportErrors};

// ============================================================================
// PUBLIC API - Events
// ============================================================================

pub use events::{
    create_event_bus,
    ArtifactIndexingFailed,
    DomainEvent,
    EventBus,
    EventLogEntry,
    ModuleContentAdded,
    ModuleDataAdded,
};

// ============================================================================
// PUBLIC API - Database & Configuration
// ============================================================================

pub use config::CaseConfig;
pub use db::{create_connection_pool, initialize_database, ConnectionPool};

// ============================================================================
// PUBLIC API - Repositories
// ============================================================================

pub use repositories::{
    ArtifactRepository,
    CaseStore,
    FileRepository,
    ReportRepository,
    SearchIndex,
    TypeRepository,
};

// ============================================================================
// PUBLIC API - Services
// ============================================================================

pub use services::ExternalResultsImporter;
