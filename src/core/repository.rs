//! In-memory record store.
//!
//! Serves as the reference persistence layer: every write goes through
//! validation and reference checks, updates use optimistic concurrency on a
//! per-record version, and deletion only marks records.

use crate::core::references::check_references;
use crate::core::transitions::TransitionPolicy;
use crate::core::validator::{ValidationOptions, Validator};
use crate::domain::entities::Device;
use crate::domain::enums::EntityKind;
use crate::domain::model::{fields_of, Entity, Record, ValidatedEntity};
use crate::domain::ports::ReferenceResolver;
use crate::domain::violation::{FieldError, ValidationReport, ViolationKind};
use crate::utils::error::{Result, SchemaError};
use async_trait::async_trait;
use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;
use serde_json::Value;
use std::collections::HashMap;
use tokio::sync::RwLock;
use uuid::Uuid;

/// Layout version stamped on every stored record.
pub const SCHEMA_VERSION: u32 = 1;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredRecord {
    pub entity: ValidatedEntity,
    pub version: u64,
    pub schema_version: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deleted_at: Option<DateTime<Utc>>,
}

impl StoredRecord {
    pub fn id(&self) -> &str {
        self.entity.id()
    }

    pub fn is_deleted(&self) -> bool {
        self.deleted_at.is_some()
    }

    pub fn as_entity<T: Entity>(&self) -> Option<&T> {
        T::from_validated(&self.entity)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeviceLookup<'a> {
    Id(&'a str),
    Serial {
        job_order_id: &'a str,
        serial_number: &'a str,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RepositoryOptions {
    pub validation: ValidationOptions,
    pub transitions: TransitionPolicy,
    pub check_references: bool,
}

impl Default for RepositoryOptions {
    fn default() -> Self {
        Self {
            validation: ValidationOptions::default(),
            transitions: TransitionPolicy::Permissive,
            check_references: true,
        }
    }
}

type Table = HashMap<String, StoredRecord>;

pub struct InMemoryRepository {
    validator: Validator,
    options: RepositoryOptions,
    tables: RwLock<HashMap<EntityKind, Table>>,
}

impl Default for InMemoryRepository {
    fn default() -> Self {
        Self::new(RepositoryOptions::default())
    }
}

fn now_token() -> Value {
    Value::String(Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true))
}

fn single_violation(kind: EntityKind, field: &str, message: String) -> SchemaError {
    let mut report = ValidationReport::default();
    report.push(FieldError::new(
        field,
        ViolationKind::ConstraintViolation,
        message,
    ));
    SchemaError::validation(kind, report)
}

impl InMemoryRepository {
    pub fn new(options: RepositoryOptions) -> Self {
        Self {
            validator: Validator::new(options.validation),
            options,
            tables: RwLock::new(HashMap::new()),
        }
    }

    pub fn options(&self) -> RepositoryOptions {
        self.options
    }

    async fn verify(&self, kind: EntityKind, record: &Record) -> Result<ValidatedEntity> {
        let entity = self.validator.check(kind, record)?;
        if self.options.check_references {
            let refs = check_references(&entity, Some(self)).await;
            if !refs.is_intact() {
                return Err(SchemaError::validation(kind, refs.to_violations()));
            }
        }
        Ok(entity)
    }

    fn ensure_unique_serial(
        table: Option<&Table>,
        device: &Device,
        ignore_id: Option<&str>,
    ) -> Result<()> {
        let clash = table
            .into_iter()
            .flat_map(|t| t.values())
            .filter(|r| !r.is_deleted() && Some(r.id()) != ignore_id)
            .filter_map(|r| r.as_entity::<Device>())
            .any(|d| {
                d.job_order_id == device.job_order_id && d.serial_number == device.serial_number
            });
        if clash {
            return Err(single_violation(
                EntityKind::Device,
                "serialNumber",
                format!(
                    "serial number '{}' is already registered on job order '{}'",
                    device.serial_number, device.job_order_id
                ),
            ));
        }
        Ok(())
    }

    /// Stores a new record. The identifier is always server-assigned and
    /// missing creation/update timestamps are stamped with the current time.
    pub async fn create(&self, kind: EntityKind, mut record: Record) -> Result<StoredRecord> {
        let id = Uuid::new_v4().to_string();
        if let Some(supplied) = record.insert("id", Value::String(id.clone())) {
            tracing::debug!("Discarding client supplied id {} for new {}", supplied, kind);
        }

        let fields = fields_of(kind);
        for stamp in ["createdAt", "updatedAt"] {
            if fields.contains(&stamp) && !record.contains(stamp) {
                record.insert(stamp, now_token());
            }
        }

        let entity = self.verify(kind, &record).await?;

        let mut tables = self.tables.write().await;
        if let ValidatedEntity::Device(device) = &entity {
            Self::ensure_unique_serial(tables.get(&EntityKind::Device), device, None)?;
        }

        let stored = StoredRecord {
            entity,
            version: 1,
            schema_version: SCHEMA_VERSION,
            deleted_at: None,
        };
        tables
            .entry(kind)
            .or_default()
            .insert(id.clone(), stored.clone());

        tracing::info!("✅ Created {} '{}'", kind, id);
        Ok(stored)
    }

    /// Replaces a record, provided nobody else changed it since `expected_version`.
    pub async fn update(
        &self,
        kind: EntityKind,
        id: &str,
        expected_version: u64,
        mut record: Record,
    ) -> Result<StoredRecord> {
        match record.get("id").and_then(Value::as_str) {
            Some(given) if given != id => {
                return Err(single_violation(
                    kind,
                    "id",
                    format!("identifier is immutable ('{}' cannot become '{}')", id, given),
                ));
            }
            _ => {}
        }
        record.insert("id", Value::String(id.to_string()));

        let current = self.get(kind, id).await?;
        let fields = fields_of(kind);
        if fields.contains(&"createdAt") {
            let original = current.entity.to_record()?;
            if let Some(created) = original.get("createdAt") {
                record.insert("createdAt", created.clone());
            }
        }
        if fields.contains(&"updatedAt") {
            record.insert("updatedAt", now_token());
        }

        let entity = self.verify(kind, &record).await?;

        let mut tables = self.tables.write().await;
        if let ValidatedEntity::Device(device) = &entity {
            Self::ensure_unique_serial(tables.get(&EntityKind::Device), device, Some(id))?;
        }

        let existing = tables
            .get_mut(&kind)
            .and_then(|t| t.get_mut(id))
            .filter(|r| !r.is_deleted())
            .ok_or_else(|| SchemaError::NotFound {
                kind,
                id: id.to_string(),
            })?;

        if existing.version != expected_version {
            tracing::warn!(
                "⚠️ Version conflict on {} '{}': expected {}, found {}",
                kind,
                id,
                expected_version,
                existing.version
            );
            return Err(SchemaError::VersionConflict {
                kind,
                id: id.to_string(),
                expected: expected_version,
                actual: existing.version,
            });
        }

        self.options.transitions.check(&existing.entity, &entity)?;

        existing.entity = entity;
        existing.version += 1;
        tracing::debug!("Updated {} '{}' to version {}", kind, id, existing.version);
        Ok(existing.clone())
    }

    /// Marks a record deleted. It stays in storage but disappears from reads.
    pub async fn soft_delete(
        &self,
        kind: EntityKind,
        id: &str,
        expected_version: u64,
    ) -> Result<StoredRecord> {
        let mut tables = self.tables.write().await;
        let existing = tables
            .get_mut(&kind)
            .and_then(|t| t.get_mut(id))
            .filter(|r| !r.is_deleted())
            .ok_or_else(|| SchemaError::NotFound {
                kind,
                id: id.to_string(),
            })?;

        if existing.version != expected_version {
            return Err(SchemaError::VersionConflict {
                kind,
                id: id.to_string(),
                expected: expected_version,
                actual: existing.version,
            });
        }

        existing.deleted_at = Some(Utc::now());
        existing.version += 1;
        tracing::info!("🗑️ Soft-deleted {} '{}'", kind, id);
        Ok(existing.clone())
    }

    pub async fn get(&self, kind: EntityKind, id: &str) -> Result<StoredRecord> {
        let tables = self.tables.read().await;
        tables
            .get(&kind)
            .and_then(|t| t.get(id))
            .filter(|r| !r.is_deleted())
            .cloned()
            .ok_or_else(|| SchemaError::NotFound {
                kind,
                id: id.to_string(),
            })
    }

    pub async fn get_typed<T: Entity>(&self, id: &str) -> Result<T> {
        let stored = self.get(T::KIND, id).await?;
        stored
            .as_entity::<T>()
            .cloned()
            .ok_or_else(|| SchemaError::NotFound {
                kind: T::KIND,
                id: id.to_string(),
            })
    }

    /// Live records of a kind, ordered by id.
    pub async fn list(&self, kind: EntityKind) -> Vec<StoredRecord> {
        let tables = self.tables.read().await;
        let mut out: Vec<StoredRecord> = tables
            .get(&kind)
            .into_iter()
            .flat_map(|t| t.values())
            .filter(|r| !r.is_deleted())
            .cloned()
            .collect();
        out.sort_by(|a, b| a.id().cmp(b.id()));
        out
    }

    pub async fn list_by_job_order(&self, kind: EntityKind, job_order_id: &str) -> Vec<StoredRecord> {
        self.list(kind)
            .await
            .into_iter()
            .filter(|r| r.entity.job_order_id() == Some(job_order_id))
            .collect()
    }

    pub async fn find_device(&self, lookup: DeviceLookup<'_>) -> Result<Device> {
        match lookup {
            DeviceLookup::Id(id) => self.get_typed::<Device>(id).await,
            DeviceLookup::Serial {
                job_order_id,
                serial_number,
            } => self
                .list(EntityKind::Device)
                .await
                .iter()
                .filter_map(|r| r.as_entity::<Device>())
                .find(|d| d.job_order_id == job_order_id && d.serial_number == serial_number)
                .cloned()
                .ok_or_else(|| SchemaError::NotFound {
                    kind: EntityKind::Device,
                    id: format!("{}/{}", job_order_id, serial_number),
                }),
        }
    }

    /// Every live work record mentioning a physical unit's serial number.
    pub async fn find_by_serial(&self, serial_number: &str) -> Vec<StoredRecord> {
        let kinds = [
            EntityKind::TaskEntry,
            EntityKind::ProductionWorkLog,
            EntityKind::TestLog,
            EntityKind::QualityInspection,
            EntityKind::TaskCompletion,
        ];
        let mut out = Vec::new();
        for kind in kinds {
            out.extend(
                self.list(kind)
                    .await
                    .into_iter()
                    .filter(|r| r.entity.serial_numbers().contains(&serial_number)),
            );
        }
        out
    }
}

#[async_trait]
impl ReferenceResolver for InMemoryRepository {
    async fn exists(&self, kind: EntityKind, id: &str) -> Result<bool> {
        let tables = self.tables.read().await;
        Ok(tables
            .get(&kind)
            .and_then(|t| t.get(id))
            .map(|r| !r.is_deleted())
            .unwrap_or(false))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn user(name: &str) -> Record {
        Record::from_value(json!({
            "name": name,
            "username": name.to_lowercase(),
            "role": "technician"
        }))
        .unwrap()
    }

    #[tokio::test]
    async fn test_create_assigns_id_and_version() {
        let repo = InMemoryRepository::default();
        let mut record = user("Alice");
        record.insert("id", json!("client-chosen"));

        let stored = repo.create(EntityKind::User, record).await.unwrap();
        assert_ne!(stored.id(), "client-chosen");
        assert_eq!(stored.version, 1);
        assert_eq!(stored.schema_version, SCHEMA_VERSION);
        assert!(repo.exists(EntityKind::User, stored.id()).await.unwrap());
    }

    #[tokio::test]
    async fn test_update_rejects_changed_id() {
        let repo = InMemoryRepository::default();
        let stored = repo.create(EntityKind::User, user("Bob")).await.unwrap();

        let mut record = user("Bobby");
        record.insert("id", json!("other"));
        let err = repo
            .update(EntityKind::User, stored.id(), 1, record)
            .await
            .unwrap_err();
        assert!(matches!(err, SchemaError::ValidationError { .. }));
    }

    #[tokio::test]
    async fn test_soft_deleted_records_are_hidden_but_kept() {
        let repo = InMemoryRepository::default();
        let stored = repo.create(EntityKind::User, user("Carol")).await.unwrap();
        let deleted = repo
            .soft_delete(EntityKind::User, stored.id(), 1)
            .await
            .unwrap();

        assert!(deleted.is_deleted());
        assert_eq!(deleted.version, 2);
        assert!(repo.get(EntityKind::User, stored.id()).await.is_err());
        assert!(!repo.exists(EntityKind::User, stored.id()).await.unwrap());
        assert_eq!(repo.tables.read().await[&EntityKind::User].len(), 1);
    }
}
