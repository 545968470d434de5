mod common;

use common::{fixture, record, with, without};
use prodtrack::{
    validate_record, Device, DeviceStage, Entity, EntityKind, QualityStatus, TestLog,
    ValidatedEntity, ViolationKind,
};
use serde_json::json;

/// 所有範例資料都必須通過驗證
#[test]
fn test_every_fixture_validates() {
    for kind in EntityKind::ALL {
        let result = validate_record(*kind, &record(fixture(*kind)));
        assert!(result.is_ok(), "{} fixture rejected: {:?}", kind, result.err());
        assert_eq!(result.unwrap().kind(), *kind);
    }
}

/// serialize → validate → deserialize 應得到相同的值
#[test]
fn test_round_trip_preserves_value() {
    for kind in EntityKind::ALL {
        let original = validate_record(*kind, &record(fixture(*kind))).unwrap();

        let wire = original.to_record().unwrap();
        let revalidated = validate_record(*kind, &wire).unwrap();
        assert_eq!(revalidated, original, "{} changed on re-validation", kind);

        let deserialized = ValidatedEntity::from_wire(*kind, &wire).unwrap();
        assert_eq!(deserialized, original, "{} changed on deserialization", kind);
    }
}

#[test]
fn test_enum_fields_reject_undeclared_tokens() {
    let enum_fields = [
        (EntityKind::User, "role"),
        (EntityKind::JobOrder, "status"),
        (EntityKind::JobOrder, "priority"),
        (EntityKind::TaskEntry, "status"),
        (EntityKind::ProductionWorkLog, "stage"),
        (EntityKind::ProductionWorkLog, "status"),
        (EntityKind::TestLog, "testType"),
        (EntityKind::TestLog, "result"),
        (EntityKind::QualityInspection, "inspectionPoint"),
        (EntityKind::QualityInspection, "result"),
        (EntityKind::Device, "currentStage"),
        (EntityKind::Device, "qualityStatus"),
        (EntityKind::TaskCompletion, "status"),
    ];

    for (kind, field) in enum_fields {
        for bogus in ["bogus", "", "IN_PROGRESS", "Pass "] {
            let report = validate_record(kind, &with(kind, field, json!(bogus))).unwrap_err();
            assert!(
                report.has(field, ViolationKind::InvalidEnumValue),
                "{}.{} accepted {:?}: {}",
                kind,
                field,
                bogus,
                report
            );
        }
    }
}

#[test]
fn test_enum_of_wrong_type_is_invalid_type() {
    let report =
        validate_record(EntityKind::Device, &with(EntityKind::Device, "currentStage", json!(3)))
            .unwrap_err();
    assert!(report.has("currentStage", ViolationKind::InvalidType));
}

#[test]
fn test_negative_numbers_are_constraint_violations() {
    let numeric_fields = [
        (EntityKind::JobOrder, "progress"),
        (EntityKind::JobOrder, "totalDevices"),
        (EntityKind::TaskEntry, "standardTime"),
        (EntityKind::TaskEntry, "actualTime"),
        (EntityKind::ProductionWorkLog, "standardTime"),
        (EntityKind::ProductionWorkLog, "actualTime"),
        (EntityKind::TaskCompletion, "actualTimeMinutes"),
        (EntityKind::TaskCompletion, "standardTimeMinutes"),
        (EntityKind::TaskCompletion, "efficiencyPercentage"),
    ];

    for (kind, field) in numeric_fields {
        let report = validate_record(kind, &with(kind, field, json!(-1))).unwrap_err();
        assert!(
            report.has(field, ViolationKind::ConstraintViolation),
            "{}.{}: {}",
            kind,
            field,
            report
        );
    }
}

#[test]
fn test_negative_file_size_is_constraint_violation() {
    let mut files = common::task_completion()["files"].clone();
    files[0]["size"] = json!(-5);
    let report = validate_record(
        EntityKind::TaskCompletion,
        &with(EntityKind::TaskCompletion, "files", files),
    )
    .unwrap_err();
    assert!(report.has("files[0].size", ViolationKind::ConstraintViolation));
}

#[test]
fn test_device_stage_examples() {
    let ok = validate_record(EntityKind::Device, &record(fixture(EntityKind::Device))).unwrap();
    let device = Device::from_validated(&ok).unwrap();
    assert_eq!(device.current_stage, DeviceStage::Testing);
    assert_eq!(device.quality_status, QualityStatus::Pass);

    let report = validate_record(
        EntityKind::Device,
        &with(EntityKind::Device, "currentStage", json!("shipped")),
    )
    .unwrap_err();
    assert_eq!(report.len(), 1);
    assert!(report.has("currentStage", ViolationKind::InvalidEnumValue));
}

#[test]
fn test_missing_technician_id_is_the_only_error() {
    let result = validate_record(
        EntityKind::TaskEntry,
        &without(EntityKind::TaskEntry, "technicianId"),
    );
    let report = result.unwrap_err();

    assert_eq!(report.len(), 1);
    assert_eq!(report.fields(), vec!["technicianId"]);
    assert!(report.has("technicianId", ViolationKind::MissingRequiredField));
}

#[test]
fn test_all_violations_are_collected() {
    let mut r = without(EntityKind::ProductionWorkLog, "workerId");
    r.insert("stage", json!("painting"));
    r.insert("actualTime", json!(-3));
    r.insert("startTime", json!("tomorrow morning"));
    r.insert("notes", json!(42));

    let report = validate_record(EntityKind::ProductionWorkLog, &r).unwrap_err();
    assert_eq!(report.len(), 5, "{}", report);
    assert!(report.has("workerId", ViolationKind::MissingRequiredField));
    assert!(report.has("stage", ViolationKind::InvalidEnumValue));
    assert!(report.has("actualTime", ViolationKind::ConstraintViolation));
    assert!(report.has("startTime", ViolationKind::ConstraintViolation));
    assert!(report.has("notes", ViolationKind::InvalidType));
}

#[test]
fn test_optional_fields_stay_absent() {
    let mut r = without(EntityKind::TaskEntry, "endTime");
    r.data.remove("serialNumbers");
    let entity = validate_record(EntityKind::TaskEntry, &r).unwrap();

    let wire = entity.to_record().unwrap();
    assert!(wire.get("endTime").is_none());
    assert!(wire.get("serialNumbers").is_none());
}

#[test]
fn test_null_optional_field_is_absent_and_empty_is_kept() {
    let mut r = with(EntityKind::User, "avatar", json!(null));
    let entity = validate_record(EntityKind::User, &r).unwrap();
    assert!(entity.to_record().unwrap().get("avatar").is_none());

    r.insert("avatar", json!(""));
    let entity = validate_record(EntityKind::User, &r).unwrap();
    assert_eq!(entity.to_record().unwrap().get("avatar"), Some(&json!("")));
}

#[test]
fn test_empty_identifier_is_missing() {
    let report = validate_record(EntityKind::Device, &with(EntityKind::Device, "id", json!("  ")))
        .unwrap_err();
    assert!(report.has("id", ViolationKind::MissingRequiredField));
}

#[test]
fn test_measurements_must_be_an_object() {
    let report = validate_record(
        EntityKind::TestLog,
        &with(EntityKind::TestLog, "measurements", json!([1, 2])),
    )
    .unwrap_err();
    assert!(report.has("measurements", ViolationKind::InvalidType));

    let entity = validate_record(EntityKind::TestLog, &record(fixture(EntityKind::TestLog))).unwrap();
    let log = TestLog::from_validated(&entity).unwrap();
    let measurements = log.measurements.as_ref().unwrap();
    assert_eq!(measurements["holdSeconds"], json!(300));
}

#[test]
fn test_offset_timestamps_normalise_to_utc() {
    let entity = validate_record(EntityKind::TestLog, &record(fixture(EntityKind::TestLog))).unwrap();
    let wire = entity.to_record().unwrap();
    assert_eq!(wire.get("testDate"), Some(&json!("2024-05-04T11:00:00Z")));
}

#[test]
fn test_serial_number_correlation() {
    let entity = validate_record(EntityKind::TaskEntry, &record(fixture(EntityKind::TaskEntry))).unwrap();
    assert_eq!(entity.serial_numbers(), vec!["SN-0001", "SN-0002"]);
    assert_eq!(entity.job_order_id(), Some("jo-1"));
}

#[test]
fn test_timestamp_without_offset_is_read_as_utc() {
    let r = with(EntityKind::TaskEntry, "startTime", json!("2024-05-03T09:00:00"));
    let entity = validate_record(EntityKind::TaskEntry, &r).unwrap();

    let wire = entity.to_record().unwrap();
    assert_eq!(wire.get("startTime"), Some(&json!("2024-05-03T09:00:00Z")));
}
