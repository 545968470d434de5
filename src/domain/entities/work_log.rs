use crate::core::reader::FieldReader;
use crate::domain::enums::{ApprovalStatus, EntityKind, WorkStage};
use crate::domain::model::{Entity, Reference, ValidatedEntity};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Work a production worker logged against a single unit at one stage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductionWorkLog {
    pub id: String,
    pub job_order_id: String,
    pub worker_id: String,
    pub stage: WorkStage,
    pub task_name: String,
    pub device_id: String,
    pub serial_number: String,
    pub start_time: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_time: Option<DateTime<Utc>>,
    pub standard_time: f64,
    pub actual_time: f64,
    pub notes: String,
    pub status: ApprovalStatus,
    pub created_at: DateTime<Utc>,
}

impl Entity for ProductionWorkLog {
    const KIND: EntityKind = EntityKind::ProductionWorkLog;
    const FIELDS: &'static [&'static str] = &[
        "id",
        "jobOrderId",
        "workerId",
        "stage",
        "taskName",
        "deviceId",
        "serialNumber",
        "startTime",
        "endTime",
        "standardTime",
        "actualTime",
        "notes",
        "status",
        "createdAt",
    ];

    fn id(&self) -> &str {
        &self.id
    }

    fn read(reader: &mut FieldReader<'_>) -> Option<Self> {
        let id = reader.required_str("id");
        let job_order_id = reader.required_str("jobOrderId");
        let worker_id = reader.required_str("workerId");
        let stage = reader.required_enum::<WorkStage>("stage");
        let task_name = reader.required_str("taskName");
        let device_id = reader.required_str("deviceId");
        let serial_number = reader.required_str("serialNumber");
        let start_time = reader.required_timestamp("startTime");
        let end_time = reader.optional_timestamp("endTime");
        let standard_time = reader.required_quantity("standardTime");
        let actual_time = reader.required_quantity("actualTime");
        let notes = reader.text("notes");
        let status = reader.required_enum::<ApprovalStatus>("status");
        let created_at = reader.required_timestamp("createdAt");

        Some(Self {
            id: id?,
            job_order_id: job_order_id?,
            worker_id: worker_id?,
            stage: stage?,
            task_name: task_name?,
            device_id: device_id?,
            serial_number: serial_number?,
            start_time: start_time?,
            end_time,
            standard_time: standard_time?,
            actual_time: actual_time?,
            notes: notes?,
            status: status?,
            created_at: created_at?,
        })
    }

    fn references(&self) -> Vec<Reference> {
        vec![
            Reference::new("jobOrderId", EntityKind::JobOrder, &self.job_order_id),
            Reference::new("workerId", EntityKind::User, &self.worker_id),
            Reference::new("deviceId", EntityKind::Device, &self.device_id),
        ]
    }

    fn job_order_id(&self) -> Option<&str> {
        Some(&self.job_order_id)
    }

    fn serial_numbers(&self) -> Vec<&str> {
        vec![self.serial_number.as_str()]
    }

    fn time_window(&self) -> Option<(DateTime<Utc>, DateTime<Utc>)> {
        self.end_time.map(|end| (self.start_time, end))
    }

    fn status_token(&self) -> Option<&'static str> {
        Some(self.status.as_str())
    }

    fn into_validated(self) -> ValidatedEntity {
        ValidatedEntity::ProductionWorkLog(self)
    }

    fn from_validated(entity: &ValidatedEntity) -> Option<&Self> {
        match entity {
            ValidatedEntity::ProductionWorkLog(log) => Some(log),
            _ => None,
        }
    }
}
