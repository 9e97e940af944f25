// src/services/import/type_registry.rs
//
// Type Registry Resolver
//
// Maps artifact/attribute type names to store ids, registering unknown names
// on first use with the name doubling as display label. Resolved ids are
// cached for the lifetime of the registry; the store is append-only so a
// cached id never goes stale.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use crate::domain::{ArtifactTypeId, AttributeTypeId, StandardArtifactTypes, ValueKind};
use crate::error::AppResult;
use crate::repositories::TypeRepository;

/// An artifact type id plus whether it is one of the standard types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedArtifactType {
    pub id: ArtifactTypeId,
    pub is_standard: bool,
}

pub struct TypeRegistry {
    types: Arc<dyn TypeRepository>,
    standard_types: StandardArtifactTypes,
    artifact_types: Mutex<HashMap<String, ArtifactTypeId>>,
    attribute_types: Mutex<HashMap<String, AttributeTypeId>>,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

impl TypeRegistry {
    pub fn new(types: Arc<dyn TypeRepository>, standard_types: StandardArtifactTypes) -> Self {
        Self {
            types,
            standard_types,
            artifact_types: Mutex::new(HashMap::new()),
            attribute_types: Mutex::new(HashMap::new()),
        }
    }

    pub fn resolve_artifact_type(&self, name: &str) -> AppResult<ResolvedArtifactType> {
        let mut cache = lock(&self.artifact_types);

        let id = match cache.get(name) {
            Some(id) => *id,
            None => {
                let id = match self.types.get_artifact_type_id(name)? {
                    Some(id) => id,
                    None => {
                        let id = self.types.register_artifact_type(name, name)?;
                        log::debug!("Registered artifact type '{}' as {}", name, id);
                        id
                    }
                };
                cache.insert(name.to_string(), id);
                id
            }
        };

        Ok(ResolvedArtifactType {
            id,
            is_standard: self.standard_types.contains(id),
        })
    }

    /// `value_kind` is only used when the type has to be registered
    pub fn resolve_attribute_type(&self, name: &str, value_kind: ValueKind) -> AppResult<AttributeTypeId> {
        let mut cache = lock(&self.attribute_types);

        if let Some(id) = cache.get(name) {
            return Ok(*id);
        }

        let id = match self.types.get_attribute_type_id(name)? {
            Some(id) => id,
            None => {
                let id = self.types.register_attribute_type(name, value_kind, name)?;
                log::debug!(
                    "Registered attribute type '{}' ({}) as {}",
                    name,
                    value_kind.store_label(),
                    id
                );
                id
            }
        };
        cache.insert(name.to_string(), id);
        Ok(id)
    }

    pub fn standard_types(&self) -> &StandardArtifactTypes {
        &self.standard_types
    }
}
