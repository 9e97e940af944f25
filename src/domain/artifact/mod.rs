pub mod entity;
pub mod standard;
pub mod value;

pub use entity::{
    ArtifactHandle, ArtifactType, ArtifactTypeId, AttributeType, AttributeTypeId, TypedAttribute,
};
pub use standard::{StandardArtifactType, StandardArtifactTypes};
pub use value::{TypedValue, ValueKind};
