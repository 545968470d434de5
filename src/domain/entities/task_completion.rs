use crate::core::reader::FieldReader;
use crate::domain::enums::{CompletionStatus, EntityKind};
use crate::domain::model::{Entity, Reference, ValidatedEntity};
use crate::utils::validation::efficiency_percentage;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// An uploaded attachment. Only exists as part of its `TaskCompletion`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskCompletionFile {
    pub original_name: String,
    pub stored_name: String,
    pub path: String,
    /// Bytes.
    pub size: u64,
    pub uploaded_at: DateTime<Utc>,
}

impl TaskCompletionFile {
    pub const FIELDS: &'static [&'static str] =
        &["originalName", "storedName", "path", "size", "uploadedAt"];

    pub fn read(reader: &mut FieldReader<'_>) -> Option<Self> {
        let original_name = reader.required_str("originalName");
        let stored_name = reader.required_str("storedName");
        let path = reader.required_str("path");
        let size = reader.required_count("size");
        let uploaded_at = reader.required_timestamp("uploadedAt");

        Some(Self {
            original_name: original_name?,
            stored_name: stored_name?,
            path: path?,
            size: size?,
            uploaded_at: uploaded_at?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskCompletion {
    pub id: String,
    pub job_order_id: String,
    pub technician_id: String,
    pub operation: String,
    pub actual_time_minutes: f64,
    pub standard_time_minutes: f64,
    /// Derived from the two durations; absent when no actual time was spent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub efficiency_percentage: Option<f64>,
    pub serial_numbers: Vec<String>,
    pub notes: String,
    pub files: Vec<TaskCompletionFile>,
    pub status: CompletionStatus,
    pub created_at: DateTime<Utc>,
}

impl TaskCompletion {
    /// Re-derives `efficiency_percentage` after the durations were edited.
    pub fn recompute_efficiency(&mut self) {
        self.efficiency_percentage =
            efficiency_percentage(self.standard_time_minutes, self.actual_time_minutes);
    }

    pub fn total_file_size(&self) -> u64 {
        self.files.iter().map(|f| f.size).sum()
    }
}

impl Entity for TaskCompletion {
    const KIND: EntityKind = EntityKind::TaskCompletion;
    const FIELDS: &'static [&'static str] = &[
        "id",
        "jobOrderId",
        "technicianId",
        "operation",
        "actualTimeMinutes",
        "standardTimeMinutes",
        "efficiencyPercentage",
        "serialNumbers",
        "notes",
        "files",
        "status",
        "createdAt",
    ];

    fn id(&self) -> &str {
        &self.id
    }

    fn read(reader: &mut FieldReader<'_>) -> Option<Self> {
        let id = reader.required_str("id");
        let job_order_id = reader.required_str("jobOrderId");
        let technician_id = reader.required_str("technicianId");
        let operation = reader.required_str("operation");
        let actual = reader.required_quantity("actualTimeMinutes");
        let standard = reader.required_quantity("standardTimeMinutes");
        // 只檢查格式，數值一律重新計算
        let supplied_efficiency = reader.optional_quantity("efficiencyPercentage");
        let serial_numbers = reader.required_list("serialNumbers");
        let notes = reader.text("notes");
        let files = reader.required_objects("files", TaskCompletionFile::read);
        let status = reader.required_enum::<CompletionStatus>("status");
        let created_at = reader.required_timestamp("createdAt");

        let (actual, standard) = (actual?, standard?);
        let efficiency = efficiency_percentage(standard, actual);
        if supplied_efficiency.is_some() && supplied_efficiency != efficiency {
            tracing::debug!(
                "Replacing supplied efficiencyPercentage {:?} with derived {:?}",
                supplied_efficiency,
                efficiency
            );
        }

        Some(Self {
            id: id?,
            job_order_id: job_order_id?,
            technician_id: technician_id?,
            operation: operation?,
            actual_time_minutes: actual,
            standard_time_minutes: standard,
            efficiency_percentage: efficiency,
            serial_numbers: serial_numbers?,
            notes: notes?,
            files: files?,
            status: status?,
            created_at: created_at?,
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
        self.serial_numbers.iter().map(String::as_str).collect()
    }

    fn status_token(&self) -> Option<&'static str> {
        Some(self.status.as_str())
    }

    fn into_validated(self) -> ValidatedEntity {
        ValidatedEntity::TaskCompletion(self)
    }

    fn from_validated(entity: &ValidatedEntity) -> Option<&Self> {
        match entity {
            ValidatedEntity::TaskCompletion(completion) => Some(completion),
            _ => None,
        }
    }
}
