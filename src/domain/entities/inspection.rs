use crate::core::reader::FieldReader;
use crate::domain::enums::{EntityKind, InspectionPoint, InspectionResult};
use crate::domain::model::{Entity, Reference, ValidatedEntity};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QualityInspection {
    pub id: String,
    pub job_order_id: String,
    pub inspector_id: String,
    pub device_id: String,
    pub serial_number: String,
    pub inspection_point: InspectionPoint,
    pub result: InspectionResult,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub defects: Option<Vec<String>>,
    pub notes: String,
    pub inspection_date: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

impl Entity for QualityInspection {
    const KIND: EntityKind = EntityKind::QualityInspection;
    const FIELDS: &'static [&'static str] = &[
        "id",
        "jobOrderId",
        "inspectorId",
        "deviceId",
        "serialNumber",
        "inspectionPoint",
        "result",
        "defects",
        "notes",
        "inspectionDate",
        "createdAt",
    ];

    fn id(&self) -> &str {
        &self.id
    }

    fn read(reader: &mut FieldReader<'_>) -> Option<Self> {
        let id = reader.required_str("id");
        let job_order_id = reader.required_str("jobOrderId");
        let inspector_id = reader.required_str("inspectorId");
        let device_id = reader.required_str("deviceId");
        let serial_number = reader.required_str("serialNumber");
        let inspection_point = reader.required_enum::<InspectionPoint>("inspectionPoint");
        let result = reader.required_enum::<InspectionResult>("result");
        let defects = reader.optional_list("defects");
        let notes = reader.text("notes");
        let inspection_date = reader.required_timestamp("inspectionDate");
        let created_at = reader.required_timestamp("createdAt");

        Some(Self {
            id: id?,
            job_order_id: job_order_id?,
            inspector_id: inspector_id?,
            device_id: device_id?,
            serial_number: serial_number?,
            inspection_point: inspection_point?,
            result: result?,
            defects,
            notes: notes?,
            inspection_date: inspection_date?,
            created_at: created_at?,
        })
    }

    fn references(&self) -> Vec<Reference> {
        vec![
            Reference::new("jobOrderId", EntityKind::JobOrder, &self.job_order_id),
            Reference::new("inspectorId", EntityKind::User, &self.inspector_id),
            Reference::new("deviceId", EntityKind::Device, &self.device_id),
        ]
    }

    fn job_order_id(&self) -> Option<&str> {
        Some(&self.job_order_id)
    }

    fn serial_numbers(&self) -> Vec<&str> {
        vec![self.serial_number.as_str()]
    }

    fn into_validated(self) -> ValidatedEntity {
        ValidatedEntity::QualityInspection(self)
    }

    fn from_validated(entity: &ValidatedEntity) -> Option<&Self> {
        match entity {
            ValidatedEntity::QualityInspection(inspection) => Some(inspection),
            _ => None,
        }
    }
}
