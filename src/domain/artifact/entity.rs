use serde::{Deserialize, Serialize};

use super::value::{TypedValue, ValueKind};

/// Identifier of an artifact type in the case store
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ArtifactTypeId(pub i32);

/// Identifier of an attribute type in the case store
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct AttributeTypeId(pub i32);

impl std::fmt::Display for ArtifactTypeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::fmt::Display for AttributeTypeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// An artifact type as the store knows it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArtifactType {
    pub id: ArtifactTypeId,
    pub name: String,
    pub display_name: String,
}

/// An attribute type as the store knows it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttributeType {
    pub id: AttributeTypeId,
    pub name: String,
    pub value_kind: ValueKind,
    pub display_name: String,
}

/// Reference to an artifact created in the case store
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArtifactHandle {
    pub id: i64,
    pub type_id: ArtifactTypeId,
    /// Catalog id of the file the artifact is attached to
    pub file_id: i64,
    /// Display name of the artifact's type
    pub display_name: String,
}

/// One attribute ready to be attached to an artifact
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TypedAttribute {
    pub type_id: AttributeTypeId,
    pub source_module: String,
    pub value: TypedValue,
}

impl TypedAttribute {
    pub fn new(type_id: AttributeTypeId, source_module: impl Into<String>, value: TypedValue) -> Self {
        Self {
            type_id,
            source_module: source_module.into(),
            value,
        }
    }

    pub fn value_kind(&self) -> ValueKind {
        self.value.kind()
    }
}
