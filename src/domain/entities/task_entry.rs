use crate::core::reader::FieldReader;
use crate::domain::enums::{ApprovalStatus, EntityKind};
use crate::domain::model::{Entity, Reference, ValidatedEntity};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One operation performed by a technician against a job order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskEntry {
    pub id: String,
    pub job_order_id: String,
    pub operation_id: String,
    pub technician_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub serial_numbers: Option<Vec<String>>,
    pub start_time: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_time: Option<DateTime<Utc>>,
    pub standard_time: f64,
    pub actual_time: f64,
    pub notes: String,
    pub status: ApprovalStatus,
}

impl Entity for TaskEntry {
    const KIND: EntityKind = EntityKind::TaskEntry;
    const FIELDS: &'static [&'static str] = &[
        "id",
        "jobOrderId",
        "operationId",
        "technicianId",
        "serialNumbers",
        "startTime",
        "endTime",
        "standardTime",
        "actualTime",
        "notes",
        "status",
    ];

    fn id(&self) -> &str {
        &self.id
    }

    fn read(reader: &mut FieldReader<'_>) -> Option<Self> {
        let id = reader.required_str("id");
        let job_order_id = reader.required_str("jobOrderId");
        let operation_id = reader.required_str("operationId");
        let technician_id = reader.required_str("technicianId");
        let serial_numbers = reader.optional_list("serialNumbers");
        let start_time = reader.required_timestamp("startTime");
        let end_time = reader.optional_timestamp("endTime");
        let standard_time = reader.required_quantity("standardTime");
        let actual_time = reader.required_quantity("actualTime");
        let notes = reader.text("notes");
        let status = reader.required_enum::<ApprovalStatus>("status");

        Some(Self {
            id: id?,
            job_order_id: job_order_id?,
            operation_id: operation_id?,
            technician_id: technician_id?,
            serial_numbers,
            start_time: start_time?,
            end_time,
            standard_time: standard_time?,
            actual_time: actual_time?,
            notes: notes?,
            status: status?,
        })
    }

    fn references(&self) -> Vec<Reference> {
        vec![
            Reference::new("jobOrderId", EntityKind::JobOrder, &self.job_order_id),
            Reference::new("technicianId", EntityKind::User, &self.technician_id),
        ]
    }

    fn job_order_id(&self) -> Option<&str> {
        Some(&self.job_order_id)
    }

    fn serial_numbers(&self) -> Vec<&str> {
        self.serial_numbers
            .iter()
            .flatten()
            .map(String::as_str)
            .collect()
    }

    fn time_window(&self) -> Option<(DateTime<Utc>, DateTime<Utc>)> {
        self.end_time.map(|end| (self.start_time, end))
    }

    fn status_token(&self) -> Option<&'static str> {
        Some(self.status.as_str())
    }

    fn into_validated(self) -> ValidatedEntity {
        ValidatedEntity::TaskEntry(self)
    }

    fn from_validated(entity: &ValidatedEntity) -> Option<&Self> {
        match entity {
            ValidatedEntity::TaskEntry(entry) => Some(entry),
            _ => None,
        }
    }
}
