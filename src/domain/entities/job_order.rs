//! Job orders: the aggregation root every other production record points at.

use crate::core::reader::FieldReader;
use crate::domain::enums::{EntityKind, JobOrderStatus, Priority};
use crate::domain::model::{Entity, Reference, ValidatedEntity};
use crate::utils::error::{Result, SchemaError};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobOrder {
    pub id: String,
    pub title: String,
    pub status: JobOrderStatus,
    pub progress: f64,
    pub assigned_users: Vec<String>,
    /// Device identifiers produced under this order.
    pub devices: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub due_date: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<Priority>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assigned_supervisor: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assigned_technicians: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_devices: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed_devices: Option<u64>,
    /// Undeclared keys, carried through unchanged.
    #[serde(flatten)]
    extensions: BTreeMap<String, Value>,
}

impl JobOrder {
    pub fn extensions(&self) -> &BTreeMap<String, Value> {
        &self.extensions
    }

    pub fn extension(&self, key: &str) -> Option<&Value> {
        self.extensions.get(key)
    }

    /// Adds or replaces an extension value. Declared field names are refused
    /// so an extension can never shadow a typed field.
    pub fn set_extension(&mut self, key: impl Into<String>, value: Value) -> Result<Option<Value>> {
        let key = key.into();
        if Self::FIELDS.contains(&key.as_str()) {
            return Err(SchemaError::InvalidPayload {
                message: format!("'{}' is a declared job order field, not an extension", key),
            });
        }
        Ok(self.extensions.insert(key, value))
    }

    pub fn remove_extension(&mut self, key: &str) -> Option<Value> {
        self.extensions.remove(key)
    }
}

impl Entity for JobOrder {
    const KIND: EntityKind = EntityKind::JobOrder;
    const FIELDS: &'static [&'static str] = &[
        "id",
        "title",
        "status",
        "progress",
        "assignedUsers",
        "devices",
        "createdAt",
        "updatedAt",
        "dueDate",
        "priority",
        "assignedSupervisor",
        "assignedTechnicians",
        "totalDevices",
        "completedDevices",
    ];

    fn id(&self) -> &str {
        &self.id
    }

    fn read(reader: &mut FieldReader<'_>) -> Option<Self> {
        let id = reader.required_str("id");
        let title = reader.required_str("title");
        let status = reader.required_enum::<JobOrderStatus>("status");
        let progress = reader.required_quantity("progress");
        let assigned_users = reader.required_list("assignedUsers");
        let devices = reader.required_list("devices");
        let created_at = reader.required_timestamp("createdAt");
        let updated_at = reader.required_timestamp("updatedAt");
        let due_date = reader.required_timestamp("dueDate");
        let priority = reader.optional_enum::<Priority>("priority");
        let assigned_supervisor = reader.optional_id("assignedSupervisor");
        let assigned_technicians = reader.optional_list("assignedTechnicians");
        let total_devices = reader.optional_count("totalDevices");
        let completed_devices = reader.optional_count("completedDevices");

        let extensions: BTreeMap<String, Value> = reader
            .keys()
            .filter(|(key, _)| !Self::FIELDS.contains(&key.as_str()))
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect();

        Some(Self {
            id: id?,
            title: title?,
            status: status?,
            progress: progress?,
            assigned_users: assigned_users?,
            devices: devices?,
            created_at: created_at?,
            updated_at: updated_at?,
            due_date: due_date?,
            priority,
            assigned_supervisor,
            assigned_technicians,
            total_devices,
            completed_devices,
            extensions,
        })
    }

    fn references(&self) -> Vec<Reference> {
        let mut refs = Reference::list("assignedUsers", EntityKind::User, &self.assigned_users);
        refs.extend(Reference::list("devices", EntityKind::Device, &self.devices));
        if let Some(supervisor) = &self.assigned_supervisor {
            refs.push(Reference::new("assignedSupervisor", EntityKind::User, supervisor));
        }
        if let Some(technicians) = &self.assigned_technicians {
            refs.extend(Reference::list(
                "assignedTechnicians",
                EntityKind::User,
                technicians,
            ));
        }
        refs
    }

    fn job_order_id(&self) -> Option<&str> {
        Some(&self.id)
    }

    fn status_token(&self) -> Option<&'static str> {
        Some(self.status.as_str())
    }

    fn into_validated(self) -> ValidatedEntity {
        ValidatedEntity::JobOrder(self)
    }

    fn from_validated(entity: &ValidatedEntity) -> Option<&Self> {
        match entity {
            ValidatedEntity::JobOrder(order) => Some(order),
            _ => None,
        }
    }
}
