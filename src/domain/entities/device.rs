use crate::core::reader::FieldReader;
use crate::domain::enums::{DeviceStage, EntityKind, QualityStatus};
use crate::domain::model::{Entity, Reference, ValidatedEntity};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A physical unit. Logs and inspections usually find it through
/// `(jobOrderId, serialNumber)` rather than through `id`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Device {
    pub id: String,
    pub serial_number: String,
    pub job_order_id: String,
    pub current_stage: DeviceStage,
    pub quality_status: QualityStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assigned_users: Option<Vec<String>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Entity for Device {
    const KIND: EntityKind = EntityKind::Device;
    const FIELDS: &'static [&'static str] = &[
        "id",
        "serialNumber",
        "jobOrderId",
        "currentStage",
        "qualityStatus",
        "assignedUsers",
        "createdAt",
        "updatedAt",
    ];

    fn id(&self) -> &str {
        &self.id
    }

    fn read(reader: &mut FieldReader<'_>) -> Option<Self> {
        let id = reader.required_str("id");
        let serial_number = reader.required_str("serialNumber");
        let job_order_id = reader.required_str("jobOrderId");
        let current_stage = reader.required_enum::<DeviceStage>("currentStage");
        let quality_status = reader.required_enum::<QualityStatus>("qualityStatus");
        let assigned_users = reader.optional_list("assignedUsers");
        let created_at = reader.required_timestamp("createdAt");
        let updated_at = reader.required_timestamp("updatedAt");

        Some(Self {
            id: id?,
            serial_number: serial_number?,
            job_order_id: job_order_id?,
            current_stage: current_stage?,
            quality_status: quality_status?,
            assigned_users,
            created_at: created_at?,
            updated_at: updated_at?,
        })
    }

    fn references(&self) -> Vec<Reference> {
        let mut refs = vec![Reference::new(
            "jobOrderId",
            EntityKind::JobOrder,
            &self.job_order_id,
        )];
        if let Some(users) = &self.assigned_users {
            refs.extend(Reference::list("assignedUsers", EntityKind::User, users));
        }
        refs
    }

    fn job_order_id(&self) -> Option<&str> {
        Some(&self.job_order_id)
    }

    fn serial_numbers(&self) -> Vec<&str> {
        vec![self.serial_number.as_str()]
    }

    fn into_validated(self) -> ValidatedEntity {
        ValidatedEntity::Device(self)
    }

    fn from_validated(entity: &ValidatedEntity) -> Option<&Self> {
        match entity {
            ValidatedEntity::Device(device) => Some(device),
            _ => None,
        }
    }
}
