use crate::core::reader::FieldReader;
use crate::domain::enums::{EntityKind, TestResult, TestType};
use crate::domain::model::{Entity, Reference, ValidatedEntity};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestLog {
    pub id: String,
    pub job_order_id: String,
    pub test_personnel_id: String,
    pub device_id: String,
    pub serial_number: String,
    pub test_type: TestType,
    pub result: TestResult,
    /// Instrument readings keyed by measurement name; values are not interpreted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub measurements: Option<Map<String, Value>>,
    pub notes: String,
    pub test_date: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

impl Entity for TestLog {
    const KIND: EntityKind = EntityKind::TestLog;
    const FIELDS: &'static [&'static str] = &[
        "id",
        "jobOrderId",
        "testPersonnelId",
        "deviceId",
        "serialNumber",
        "testType",
        "result",
        "measurements",
        "notes",
        "testDate",
        "createdAt",
    ];

    fn id(&self) -> &str {
        &self.id
    }

    fn read(reader: &mut FieldReader<'_>) -> Option<Self> {
        let id = reader.required_str("id");
        let job_order_id = reader.required_str("jobOrderId");
        let test_personnel_id = reader.required_str("testPersonnelId");
        let device_id = reader.required_str("deviceId");
        let serial_number = reader.required_str("serialNumber");
        let test_type = reader.required_enum::<TestType>("testType");
        let result = reader.required_enum::<TestResult>("result");
        let measurements = reader.optional_object("measurements");
        let notes = reader.text("notes");
        let test_date = reader.required_timestamp("testDate");
        let created_at = reader.required_timestamp("createdAt");

        Some(Self {
            id: id?,
            job_order_id: job_order_id?,
            test_personnel_id: test_personnel_id?,
            device_id: device_id?,
            serial_number: serial_number?,
            test_type: test_type?,
            result: result?,
            measurements,
            notes: notes?,
            test_date: test_date?,
            created_at: created_at?,
        })
    }

    fn references(&self) -> Vec<Reference> {
        vec![
            Reference::new("jobOrderId", EntityKind::JobOrder, &self.job_order_id),
            Reference::new("testPersonnelId", EntityKind::User, &self.test_personnel_id),
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
        ValidatedEntity::TestLog(self)
    }

    fn from_validated(entity: &ValidatedEntity) -> Option<&Self> {
        match entity {
            ValidatedEntity::TestLog(log) => Some(log),
            _ => None,
        }
    }
}
