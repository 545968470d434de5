use crate::core::reader::FieldReader;
use crate::domain::entities::{
    Device, JobOrder, ProductionWorkLog, QualityInspection, TaskCompletion, TaskEntry, TestLog,
    User,
};
use crate::domain::enums::EntityKind;
use crate::domain::model::{Entity, Record, ValidatedEntity};
use crate::domain::violation::{FieldError, ValidationReport, ViolationKind};
use crate::utils::error::{Result, SchemaError};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ValidationOptions {
    /// Reject records whose `endTime` precedes `startTime`.
    pub enforce_time_order: bool,
}

/// Turns raw records into typed entities, collecting every violation.
#[derive(Debug, Clone, Copy, Default)]
pub struct Validator {
    options: ValidationOptions,
}

impl Validator {
    pub fn new(options: ValidationOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> ValidationOptions {
        self.options
    }

    pub fn validate<T: Entity>(&self, record: &Record) -> std::result::Result<T, ValidationReport> {
        let mut reader = FieldReader::new(&record.data);
        let parsed = T::read(&mut reader);
        let mut report = reader.into_report();

        if self.options.enforce_time_order {
            if let Some((start, end)) = parsed.as_ref().and_then(|e| e.time_window()) {
                if end < start {
                    report.push(FieldError::new(
                        "endTime",
                        ViolationKind::ConstraintViolation,
                        format!("ends at {} before it starts at {}", end, start),
                    ));
                }
            }
        }

        let result = report.into_result(|| parsed);
        if let Err(report) = &result {
            tracing::warn!(
                "❌ {} record rejected with {} violation(s): {}",
                T::KIND,
                report.len(),
                report
            );
        }
        result
    }

    pub fn validate_record(
        &self,
        kind: EntityKind,
        record: &Record,
    ) -> std::result::Result<ValidatedEntity, ValidationReport> {
        match kind {
            EntityKind::User => self.validate::<User>(record).map(Entity::into_validated),
            EntityKind::JobOrder => self.validate::<JobOrder>(record).map(Entity::into_validated),
            EntityKind::TaskEntry => self.validate::<TaskEntry>(record).map(Entity::into_validated),
            EntityKind::ProductionWorkLog => self
                .validate::<ProductionWorkLog>(record)
                .map(Entity::into_validated),
            EntityKind::TestLog => self.validate::<TestLog>(record).map(Entity::into_validated),
            EntityKind::QualityInspection => self
                .validate::<QualityInspection>(record)
                .map(Entity::into_validated),
            EntityKind::Device => self.validate::<Device>(record).map(Entity::into_validated),
            EntityKind::TaskCompletion => self
                .validate::<TaskCompletion>(record)
                .map(Entity::into_validated),
        }
    }

    /// Same as [`Validator::validate_record`] but folds the report into a `SchemaError`.
    pub fn check(&self, kind: EntityKind, record: &Record) -> Result<ValidatedEntity> {
        self.validate_record(kind, record)
            .map_err(|report| SchemaError::validation(kind, report))
    }
}

/// Validates with default options.
pub fn validate_record(
    kind: EntityKind,
    record: &Record,
) -> std::result::Result<ValidatedEntity, ValidationReport> {
    Validator::default().validate_record(kind, record)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn task_entry(end: &str) -> Record {
        Record::from_value(json!({
            "id": "te-1",
            "jobOrderId": "jo-1",
            "operationId": "op-7",
            "technicianId": "u-2",
            "startTime": "2024-05-01T09:00:00Z",
            "endTime": end,
            "standardTime": 30,
            "actualTime": 25,
            "notes": "",
            "status": "draft"
        }))
        .unwrap()
    }

    #[test]
    fn test_time_order_is_opt_in() {
        let record = task_entry("2024-05-01T08:00:00Z");
        assert!(Validator::default()
            .validate_record(EntityKind::TaskEntry, &record)
            .is_ok());

        let strict = Validator::new(ValidationOptions {
            enforce_time_order: true,
        });
        let report = strict
            .validate_record(EntityKind::TaskEntry, &record)
            .unwrap_err();
        assert!(report.has("endTime", ViolationKind::ConstraintViolation));
    }

    #[test]
    fn test_time_order_accepts_ordered_window() {
        let strict = Validator::new(ValidationOptions {
            enforce_time_order: true,
        });
        let record = task_entry("2024-05-01T09:25:00Z");
        assert!(strict.validate_record(EntityKind::TaskEntry, &record).is_ok());
    }

    #[test]
    fn test_check_wraps_report() {
        let record = Record::from_value(json!({"id": "u-1"})).unwrap();
        let err = Validator::default()
            .check(EntityKind::User, &record)
            .unwrap_err();
        match err {
            SchemaError::ValidationError { kind, report } => {
                assert_eq!(kind, EntityKind::User);
                assert_eq!(report.fields(), vec!["name", "username", "role"]);
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
