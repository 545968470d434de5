use crate::core::reader::FieldReader;
use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

pub use crate::domain::enums::EntityKind;
use crate::domain::entities::{
    Device, JobOrder, ProductionWorkLog, QualityInspection, TaskCompletion, TaskEntry, TestLog,
    User,
};
use crate::utils::error::{Result, SchemaError};

/// A raw, not yet validated record as received from a producer.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record {
    pub data: Map<String, Value>,
}

impl Record {
    pub fn new(data: Map<String, Value>) -> Self {
        Self { data }
    }

    /// Accepts only JSON objects.
    pub fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::Object(data) => Ok(Self { data }),
            other => Err(SchemaError::InvalidPayload {
                message: format!("expected a JSON object, got {}", json_type_name(&other)),
            }),
        }
    }

    /// Splits a payload that is either a single object or an array of objects.
    pub fn many_from_value(value: Value) -> Result<Vec<Self>> {
        match value {
            Value::Array(items) => items.into_iter().map(Self::from_value).collect(),
            other => Ok(vec![Self::from_value(other)?]),
        }
    }

    pub fn get(&self, field: &str) -> Option<&Value> {
        self.data.get(field)
    }

    pub fn insert(&mut self, field: impl Into<String>, value: Value) -> Option<Value> {
        self.data.insert(field.into(), value)
    }

    pub fn contains(&self, field: &str) -> bool {
        self.data.get(field).map(|v| !v.is_null()).unwrap_or(false)
    }
}

impl From<Map<String, Value>> for Record {
    fn from(data: Map<String, Value>) -> Self {
        Self { data }
    }
}

pub(crate) fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// A weak, by-identifier link from one record to another.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Reference {
    pub field: String,
    pub target: EntityKind,
    pub id: String,
}

impl Reference {
    pub fn new(field: impl Into<String>, target: EntityKind, id: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            target,
            id: id.into(),
        }
    }

    pub(crate) fn list(field: &str, target: EntityKind, ids: &[String]) -> Vec<Self> {
        ids.iter()
            .enumerate()
            .map(|(i, id)| Self::new(format!("{}[{}]", field, i), target, id.clone()))
            .collect()
    }
}

/// Shared contract of every top-level record type.
pub trait Entity:
    Serialize + DeserializeOwned + Clone + fmt::Debug + PartialEq + Send + Sync + 'static
{
    const KIND: EntityKind;

    /// Wire names of every declared field.
    const FIELDS: &'static [&'static str];

    fn id(&self) -> &str;

    /// Reads every declared field, recording violations on the reader.
    /// Returns `None` when at least one field could not be produced.
    fn read(reader: &mut FieldReader<'_>) -> Option<Self>;

    fn references(&self) -> Vec<Reference> {
        Vec::new()
    }

    fn job_order_id(&self) -> Option<&str> {
        None
    }

    fn serial_numbers(&self) -> Vec<&str> {
        Vec::new()
    }

    /// Start and end of the recorded work, when both are known.
    fn time_window(&self) -> Option<(DateTime<Utc>, DateTime<Utc>)> {
        None
    }

    /// Lifecycle or review status as its wire token.
    fn status_token(&self) -> Option<&'static str> {
        None
    }

    fn into_validated(self) -> ValidatedEntity;

    fn from_validated(entity: &ValidatedEntity) -> Option<&Self>;
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ValidatedEntity {
    User(User),
    JobOrder(JobOrder),
    TaskEntry(TaskEntry),
    ProductionWorkLog(ProductionWorkLog),
    TestLog(TestLog),
    QualityInspection(QualityInspection),
    Device(Device),
    TaskCompletion(TaskCompletion),
}

macro_rules! each_entity {
    ($value:expr, $e:ident => $body:expr) => {
        match $value {
            ValidatedEntity::User($e) => $body,
            ValidatedEntity::JobOrder($e) => $body,
            ValidatedEntity::TaskEntry($e) => $body,
            ValidatedEntity::ProductionWorkLog($e) => $body,
            ValidatedEntity::TestLog($e) => $body,
            ValidatedEntity::QualityInspection($e) => $body,
            ValidatedEntity::Device($e) => $body,
            ValidatedEntity::TaskCompletion($e) => $body,
        }
    };
}

impl ValidatedEntity {
    pub fn kind(&self) -> EntityKind {
        match self {
            Self::User(_) => EntityKind::User,
            Self::JobOrder(_) => EntityKind::JobOrder,
            Self::TaskEntry(_) => EntityKind::TaskEntry,
            Self::ProductionWorkLog(_) => EntityKind::ProductionWorkLog,
            Self::TestLog(_) => EntityKind::TestLog,
            Self::QualityInspection(_) => EntityKind::QualityInspection,
            Self::Device(_) => EntityKind::Device,
            Self::TaskCompletion(_) => EntityKind::TaskCompletion,
        }
    }

    pub fn id(&self) -> &str {
        each_entity!(self, e => e.id())
    }

    pub fn references(&self) -> Vec<Reference> {
        each_entity!(self, e => e.references())
    }

    pub fn job_order_id(&self) -> Option<&str> {
        each_entity!(self, e => e.job_order_id())
    }

    pub fn serial_numbers(&self) -> Vec<&str> {
        each_entity!(self, e => e.serial_numbers())
    }

    pub fn status_token(&self) -> Option<&'static str> {
        each_entity!(self, e => e.status_token())
    }

    pub fn time_window(&self) -> Option<(DateTime<Utc>, DateTime<Utc>)> {
        each_entity!(self, e => e.time_window())
    }

    /// Serializes back into the flat wire record.
    pub fn to_record(&self) -> Result<Record> {
        Record::from_value(serde_json::to_value(self)?)
    }

    /// Strongly typed deserialization of a wire record, without collecting violations.
    pub fn from_wire(kind: EntityKind, record: &Record) -> Result<Self> {
        let value = Value::Object(record.data.clone());
        Ok(match kind {
            EntityKind::User => Self::User(serde_json::from_value(value)?),
            EntityKind::JobOrder => Self::JobOrder(serde_json::from_value(value)?),
            EntityKind::TaskEntry => Self::TaskEntry(serde_json::from_value(value)?),
            EntityKind::ProductionWorkLog => {
                Self::ProductionWorkLog(serde_json::from_value(value)?)
            }
            EntityKind::TestLog => Self::TestLog(serde_json::from_value(value)?),
            EntityKind::QualityInspection => {
                Self::QualityInspection(serde_json::from_value(value)?)
            }
            EntityKind::Device => Self::Device(serde_json::from_value(value)?),
            EntityKind::TaskCompletion => Self::TaskCompletion(serde_json::from_value(value)?),
        })
    }
}

/// Per-kind field layout, used when stamping server-side values.
pub fn fields_of(kind: EntityKind) -> &'static [&'static str] {
    match kind {
        EntityKind::User => User::FIELDS,
        EntityKind::JobOrder => JobOrder::FIELDS,
        EntityKind::TaskEntry => TaskEntry::FIELDS,
        EntityKind::ProductionWorkLog => ProductionWorkLog::FIELDS,
        EntityKind::TestLog => TestLog::FIELDS,
        EntityKind::QualityInspection => QualityInspection::FIELDS,
        EntityKind::Device => Device::FIELDS,
        EntityKind::TaskCompletion => TaskCompletion::FIELDS,
    }
}
