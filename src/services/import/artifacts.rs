// src/services/import/artifacts.rs
//
// Artifact Importer
//
// Creates one artifact per record, attached to its source file, with the
// attributes whose values could be coerced.
//
// RULES:
// - No artifact without a resolved source file
// - A bad attribute is skipped; its siblings are still attached
// - Index failures never undo the artifact
// - Only standard artifact types announce ModuleDataAdded

use std::sync::Arc;

use crate::domain::{ArtifactData, ArtifactHandle, TypedAttribute};
use crate::error::{AppError, AppResult, ImportError, ImportErrors};
use crate::events::{ArtifactIndexingFailed, EventBus, ModuleDataAdded};
use crate::repositories::{ArtifactRepository, SearchIndex};

use super::coercion::{coerce, CoercionError};
use super::path_resolver::FilePathResolver;
use super::type_registry::TypeRegistry;

const SOURCE: &str = module_path!();

pub struct ArtifactImporter {
    artifacts: Arc<dyn ArtifactRepository>,
    index: Arc<dyn SearchIndex>,
    registry: Arc<TypeRegistry>,
    resolver: Arc<FilePathResolver>,
    event_bus: Arc<EventBus>,
    module_name: String,
}

impl ArtifactImporter {
    pub fn new(
        artifacts: Arc<dyn ArtifactRepository>,
        index: Arc<dyn SearchIndex>,
        registry: Arc<TypeRegistry>,
        resolver: Arc<FilePathResolver>,
        event_bus: Arc<EventBus>,
        module_name: impl Into<String>,
    ) -> Self {
        Self {
            artifacts,
            index,
            registry,
            resolver,
            event_bus,
            module_name: module_name.into(),
        }
    }

    pub fn import(&self, records: &[ArtifactData]) -> ImportErrors {
        let mut errors = ImportErrors::new();
        for record in records {
            self.import_one(record, &mut errors);
        }
        errors
    }

    fn import_one(&self, record: &ArtifactData, errors: &mut ImportErrors) {
        let failed = |e: AppError| {
            ImportError::artifact_import_failed(SOURCE, &record.artifact_type, &record.source_file_path, &e)
        };

        let artifact_type = match self.registry.resolve_artifact_type(&record.artifact_type) {
            Ok(resolved) => resolved,
            Err(e) => {
                errors.record(failed(e));
                return;
            }
        };

        let source_file = match self.resolver.find_file(&record.source_file_path, errors) {
            Ok(Some(file)) => file,
            Ok(None) => {
                errors.record(ImportError::source_file_not_found(
                    SOURCE,
                    &record.artifact_type,
                    &record.source_file_path,
                ));
                return;
            }
            Err(e) => {
                errors.record(failed(e));
                return;
            }
        };

        let artifact = match self.artifacts.create_artifact(&source_file, artifact_type.id) {
            Ok(artifact) => artifact,
            Err(e) => {
                errors.record(failed(e));
                return;
            }
        };

        let attached = self
            .collect_attributes(record, errors)
            .and_then(|attributes| self.artifacts.attach_attributes(&artifact, &attributes));
        if let Err(e) = attached {
            errors.record(failed(e));
            return;
        }

        self.index(&artifact);

        if artifact_type.is_standard {
            self.event_bus.emit(ModuleDataAdded::new(
                self.module_name.clone(),
                artifact_type.id,
                record.artifact_type.clone(),
            ));
        }
    }

    /// Coerces each attribute and resolves its type.
    ///
    /// Coercion failures are recorded and skipped. A type registry failure
    /// is returned and aborts the artifact.
    fn collect_attributes(
        &self,
        record: &ArtifactData,
        errors: &mut ImportErrors,
    ) -> AppResult<Vec<TypedAttribute>> {
        let mut attributes = Vec::with_capacity(record.attributes.len());

        for attribute in &record.attributes {
            let value = match coerce(&attribute.value_type, &attribute.value) {
                Ok(value) => value,
                Err(CoercionError::UnsupportedValueKind(_)) => {
                    errors.record(ImportError::unsupported_value_kind(
                        SOURCE,
                        &attribute.attribute_type,
                        &attribute.value,
                        &record.artifact_type,
                        &record.source_file_path,
                        &attribute.value_type,
                    ));
                    continue;
                }
                Err(CoercionError::Malformed { .. }) => {
                    errors.record(ImportError::malformed_value(
                        SOURCE,
                        &attribute.attribute_type,
                        &attribute.value,
                        &attribute.value_type,
                        &record.artifact_type,
                        &record.source_file_path,
                    ));
                    continue;
                }
            };

            let type_id = self
                .registry
                .resolve_attribute_type(&attribute.attribute_type, value.kind())?;
            attributes.push(TypedAttribute::new(type_id, attribute.source_module.clone(), value));
        }

        Ok(attributes)
    }

    fn index(&self, artifact: &ArtifactHandle) {
        if let Err(e) = self.index.index_artifact(artifact) {
            log::error!("{}", e);
            self.event_bus.emit(ArtifactIndexingFailed::new(
                artifact.id,
                artifact.display_name.clone(),
                e.reason,
            ));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{
        ArtifactTypeId, AttributeData, AttributeTypeId, DerivationInfo, FileEntry, FileTimes,
        KnownStatus, StandardArtifactTypes, TypedValue, ValueKind,
    };
    use crate::error::ImportErrorKind;
    use crate::repositories::artifact_repository::MockArtifactRepository;
    use crate::repositories::file_repository::MockFileRepository;
    use crate::repositories::search_index::MockSearchIndex;
    use crate::repositories::type_repository::MockTypeRepository;
    use crate::repositories::{FileRepository, IndexError};
    use mockall::predicate::eq;
    use std::sync::atomic::{AtomicI32, Ordering};

    fn source_entry(name: &str, parent_path: &str) -> FileEntry {
        FileEntry {
            id: 11,
            name: name.to_string(),
            parent_path: parent_path.to_string(),
            parent_id: None,
            size: 10,
            times: FileTimes::unknown(),
            is_file: true,
            known: KnownStatus::Unknown,
            local_path: None,
            derivation: DerivationInfo::default(),
        }
    }

    fn handle(file: &FileEntry, type_id: ArtifactTypeId) -> ArtifactHandle {
        ArtifactHandle {
            id: 21,
            type_id,
            file_id: file.id,
            display_name: "Custom".to_string(),
        }
    }

    /// Catalog that knows exactly /img/a
    fn catalog() -> MockFileRepository {
        let mut files = MockFileRepository::new();
        files.expect_find_all_matching().returning(|name, parent| {
            if name == "a" && parent == "/img/" {
                Ok(vec![source_entry(name, parent)])
            } else {
                Ok(vec![])
            }
        });
        files
    }

    /// Type store where nothing exists yet and ids count up from 100
    fn empty_type_store() -> MockTypeRepository {
        let next = Arc::new(AtomicI32::new(100));
        let next_attr = Arc::clone(&next);

        let mut types = MockTypeRepository::new();
        types.expect_get_artifact_type_id().returning(|_| Ok(None));
        types
            .expect_register_artifact_type()
            .returning(move |_, _| Ok(ArtifactTypeId(next.fetch_add(1, Ordering::SeqCst))));
        types.expect_get_attribute_type_id().returning(|_| Ok(None));
        types
            .expect_register_attribute_type()
            .returning(move |_, _, _| Ok(AttributeTypeId(next_attr.fetch_add(1, Ordering::SeqCst))));
        types
    }

    fn indexer_ok() -> MockSearchIndex {
        let mut index = MockSearchIndex::new();
        index.expect_index_artifact().returning(|_| Ok(()));
        index
    }

    fn importer(
        types: MockTypeRepository,
        artifacts: MockArtifactRepository,
        index: MockSearchIndex,
        bus: Arc<EventBus>,
    ) -> ArtifactImporter {
        let files: Arc<dyn FileRepository> = Arc::new(catalog());
        let resolver = Arc::new(FilePathResolver::new(files, "/case/root"));
        let registry = Arc::new(TypeRegistry::new(Arc::new(types), StandardArtifactTypes::builtin()));
        ArtifactImporter::new(Arc::new(artifacts), Arc::new(index), registry, resolver, bus, "extresults")
    }

    fn attribute(attribute_type: &str, value_type: &str, value: &str) -> AttributeData {
        AttributeData {
            attribute_type: attribute_type.to_string(),
            value_type: value_type.to_string(),
            value: value.to_string(),
            source_module: "ext".to_string(),
        }
    }

    fn artifact(artifact_type: &str, source: &str, attributes: Vec<AttributeData>) -> ArtifactData {
        ArtifactData {
            artifact_type: artifact_type.to_string(),
            source_file_path: source.to_string(),
            attributes,
        }
    }

    #[test]
    fn test_custom_type_round_trip_has_no_errors() {
        let mut artifacts = MockArtifactRepository::new();
        artifacts
            .expect_create_artifact()
            .withf(|file, type_id| file.full_path() == "/img/a" && *type_id == ArtifactTypeId(100))
            .times(1)
            .returning(|file, type_id| Ok(handle(file, type_id)));
        artifacts
            .expect_attach_attributes()
            .withf(|_, attributes| {
                attributes.len() == 1
                    && attributes[0].value == TypedValue::Text("hello".to_string())
                    && attributes[0].source_module == "ext"
            })
            .times(1)
            .returning(|_, _| Ok(()));

        let bus = Arc::new(EventBus::new());
        let importer = importer(empty_type_store(), artifacts, indexer_ok(), bus.clone());

        let errors = importer.import(&[artifact(
            "CustomType",
            "/img/a",
            vec![attribute("Note", "text", "hello")],
        )]);

        assert!(errors.is_empty());
        assert_eq!(bus.emitted_count("ModuleDataAdded"), 0);
    }

    #[test]
    fn test_missing_source_file_creates_no_artifact() {
        let mut artifacts = MockArtifactRepository::new();
        artifacts.expect_create_artifact().never();
        artifacts.expect_attach_attributes().never();

        let importer = importer(empty_type_store(), artifacts, MockSearchIndex::new(), Arc::new(EventBus::new()));

        let errors = importer.import(&[artifact("CustomType", "/img/missing", vec![])]);

        assert_eq!(errors.len(), 1);
        let error = errors.iter().next().unwrap();
        assert_eq!(error.kind, ImportErrorKind::NotFound);
        assert!(error.message.contains("CustomType"));
        assert!(error.message.contains("/img/missing"));
    }

    #[test]
    fn test_malformed_int32_is_skipped_and_siblings_attached() {
        let mut artifacts = MockArtifactRepository::new();
        artifacts
            .expect_create_artifact()
            .returning(|file, type_id| Ok(handle(file, type_id)));
        artifacts
            .expect_attach_attributes()
            .withf(|_, attributes| {
                attributes.len() == 2
                    && attributes[0].value == TypedValue::Text("hello".to_string())
                    && attributes[1].value == TypedValue::Int64(42)
            })
            .times(1)
            .returning(|_, _| Ok(()));

        let importer = importer(empty_type_store(), artifacts, indexer_ok(), Arc::new(EventBus::new()));

        let errors = importer.import(&[artifact(
            "CustomType",
            "/img/a",
            vec![
                attribute("Note", "text", "hello"),
                attribute("Count", "int32", "not-a-number"),
                attribute("Total", "int64", "42"),
            ],
        )]);

        assert_eq!(errors.len(), 1);
        let error = errors.iter().next().unwrap();
        assert_eq!(error.kind, ImportErrorKind::InvalidInput);
        assert!(error.message.contains("Count"));
        assert!(error.message.contains("not-a-number"));
    }

    #[test]
    fn test_unsupported_value_kind_skips_attribute_but_keeps_artifact() {
        let mut types = MockTypeRepository::new();
        types.expect_get_artifact_type_id().returning(|_| Ok(Some(ArtifactTypeId(100))));
        types.expect_get_attribute_type_id().never();
        types.expect_register_attribute_type().never();

        let mut artifacts = MockArtifactRepository::new();
        artifacts
            .expect_create_artifact()
            .times(1)
            .returning(|file, type_id| Ok(handle(file, type_id)));
        artifacts
            .expect_attach_attributes()
            .withf(|_, attributes| attributes.is_empty())
            .times(1)
            .returning(|_, _| Ok(()));

        let importer = importer(types, artifacts, indexer_ok(), Arc::new(EventBus::new()));

        let errors = importer.import(&[artifact(
            "CustomType",
            "/img/a",
            vec![attribute("Blob", "bytes", "00ff")],
        )]);

        assert_eq!(errors.len(), 1);
        let error = errors.iter().next().unwrap();
        assert_eq!(error.kind, ImportErrorKind::InvalidInput);
        for part in ["Blob", "00ff", "CustomType", "/img/a", "bytes"] {
            assert!(error.message.contains(part), "missing {} in {}", part, error.message);
        }
    }

    #[test]
    fn test_attribute_types_registered_once_per_name() {
        let mut types = MockTypeRepository::new();
        types.expect_get_artifact_type_id().times(1).returning(|_| Ok(None));
        types
            .expect_register_artifact_type()
            .times(1)
            .returning(|_, _| Ok(ArtifactTypeId(100)));
        types
            .expect_get_attribute_type_id()
            .with(eq("Note"))
            .times(1)
            .returning(|_| Ok(None));
        types
            .expect_register_attribute_type()
            .with(eq("Note"), eq(ValueKind::Text), eq("Note"))
            .times(1)
            .returning(|_, _, _| Ok(AttributeTypeId(200)));

        let mut artifacts = MockArtifactRepository::new();
        artifacts
            .expect_create_artifact()
            .times(2)
            .returning(|file, type_id| Ok(handle(file, type_id)));
        artifacts.expect_attach_attributes().times(2).returning(|_, _| Ok(()));

        let importer = importer(types, artifacts, indexer_ok(), Arc::new(EventBus::new()));
        let record = artifact("CustomType", "/img/a", vec![attribute("Note", "text", "hello")]);

        let errors = importer.import(&[record.clone(), record]);

        assert!(errors.is_empty());
    }

    #[test]
    fn test_standard_type_emits_module_data_added() {
        let mut types = MockTypeRepository::new();
        types
            .expect_get_artifact_type_id()
            .with(eq("TSK_WEB_BOOKMARK"))
            .returning(|_| Ok(Some(ArtifactTypeId(2))));
        types.expect_register_artifact_type().never();

        let mut artifacts = MockArtifactRepository::new();
        artifacts
            .expect_create_artifact()
            .returning(|file, type_id| Ok(handle(file, type_id)));
        artifacts.expect_attach_attributes().returning(|_, _| Ok(()));

        let bus = Arc::new(EventBus::new());
        let announced = Arc::new(std::sync::Mutex::new(Vec::new()));
        let announced_clone = Arc::clone(&announced);
        bus.subscribe::<ModuleDataAdded, _>(move |event| {
            announced_clone
                .lock()
                .unwrap()
                .push((event.module_name.clone(), event.artifact_type_id));
        });

        let importer = importer(types, artifacts, indexer_ok(), bus);
        let errors = importer.import(&[artifact("TSK_WEB_BOOKMARK", "/img/a", vec![])]);

        assert!(errors.is_empty());
        assert_eq!(
            *announced.lock().unwrap(),
            vec![("extresults".to_string(), ArtifactTypeId(2))]
        );
    }

    #[test]
    fn test_index_failure_notifies_but_keeps_artifact() {
        let mut artifacts = MockArtifactRepository::new();
        artifacts
            .expect_create_artifact()
            .times(1)
            .returning(|file, type_id| Ok(handle(file, type_id)));
        artifacts.expect_attach_attributes().times(1).returning(|_, _| Ok(()));

        let mut index = MockSearchIndex::new();
        index
            .expect_index_artifact()
            .times(1)
            .returning(|artifact| Err(IndexError::new(artifact, "index offline")));

        let bus = Arc::new(EventBus::new());
        let importer = importer(empty_type_store(), artifacts, index, bus.clone());

        let errors = importer.import(&[artifact("CustomType", "/img/a", vec![])]);

        assert!(errors.is_empty());
        assert_eq!(bus.emitted_count("ArtifactIndexingFailed"), 1);
    }

    #[test]
    fn test_attach_failure_is_reported_with_cause() {
        let mut artifacts = MockArtifactRepository::new();
        artifacts
            .expect_create_artifact()
            .returning(|file, type_id| Ok(handle(file, type_id)));
        artifacts
            .expect_attach_attributes()
            .returning(|_, _| Err(AppError::Other("constraint failed".to_string())));

        let mut index = MockSearchIndex::new();
        index.expect_index_artifact().never();

        let importer = importer(empty_type_store(), artifacts, index, Arc::new(EventBus::new()));

        let errors = importer.import(&[artifact(
            "CustomType",
            "/img/a",
            vec![attribute("Note", "text", "hello")],
        )]);

        assert_eq!(errors.len(), 1);
        let error = errors.iter().next().unwrap();
        assert_eq!(error.kind, ImportErrorKind::StoreFailure);
        assert!(error.cause.as_deref().unwrap_or_default().contains("constraint failed"));
    }
}
