// src/events/types.rs
//
// Notifications emitted by the importer.
// Each event represents an immutable fact that has already occurred.
//
// CRITICAL RULES:
// - Events are facts, not commands
// - Events are immutable
// - Events carry only the data needed to react

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::{ArtifactTypeId, FileEntry};

/// Trait that all domain events must implement
pub trait DomainEvent: std::fmt::Debug + Clone {
    /// Unique identifier for this event instance
    fn event_id(&self) -> Uuid;

    /// When this event occurred
    fn occurred_at(&self) -> DateTime<Utc>;

    /// Human-readable event type name
    fn event_type(&self) -> &'static str;
}

// ============================================================================
// CONTENT EVENTS
// ============================================================================

/// Emitted for each derived file added to the catalog, so downstream
/// consumers (re-analysis) can pick it up
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModuleContentAdded {
    pub event_id: Uuid,
    pub occurred_at: DateTime<Utc>,
    pub file: FileEntry,
}

impl ModuleContentAdded {
    pub fn new(file: FileEntry) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            occurred_at: Utc::now(),
            file,
        }
    }
}

impl DomainEvent for ModuleContentAdded {
    fn event_id(&self) -> Uuid { self.event_id }
    fn occurred_at(&self) -> DateTime<Utc> { self.occurred_at }
    fn event_type(&self) -> &'static str { "ModuleContentAdded" }
}

// ============================================================================
// DATA EVENTS
// ============================================================================

/// Emitted when an artifact of a standard type was imported
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModuleDataAdded {
    pub event_id: Uuid,
    pub occurred_at: DateTime<Utc>,
    pub module_name: String,
    pub artifact_type_id: ArtifactTypeId,
    pub artifact_type_name: String,
}

impl ModuleDataAdded {
    pub fn new(module_name: String, artifact_type_id: ArtifactTypeId, artifact_type_name: String) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            occurred_at: Utc::now(),
            module_name,
            artifact_type_id,
            artifact_type_name,
        }
    }
}

impl DomainEvent for ModuleDataAdded {
    fn event_id(&self) -> Uuid { self.event_id }
    fn occurred_at(&self) -> DateTime<Utc> { self.occurred_at }
    fn event_type(&self) -> &'static str { "ModuleDataAdded" }
}

// ============================================================================
// USER NOTIFICATIONS
// ============================================================================

/// User-visible notice that an artifact exists but could not be indexed
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArtifactIndexingFailed {
    pub event_id: Uuid,
    pub occurred_at: DateTime<Utc>,
    pub artifact_id: i64,
    pub display_name: String,
    pub reason: String,
}

impl ArtifactIndexingFailed {
    pub fn new(artifact_id: i64, display_name: String, reason: String) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            occurred_at: Utc::now(),
            artifact_id,
            display_name,
            reason,
        }
    }
}

impl DomainEvent for ArtifactIndexingFailed {
    fn event_id(&self) -> Uuid { self.event_id }
    fn occurred_at(&self) -> DateTime<Utc> { self.occurred_at }
    fn event_type(&self) -> &'static str { "ArtifactIndexingFailed" }
}
