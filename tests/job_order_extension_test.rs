mod common;

use common::{record, with};
use prodtrack::{
    validate_record, Entity, EntityKind, JobOrder, Priority, SchemaError, ValidatedEntity,
    ViolationKind,
};
use serde_json::json;

fn job_order_with_extensions() -> JobOrder {
    let mut r = record(common::job_order());
    r.insert("customFlag", json!(true));
    r.insert("customerPo", json!({"number": "PO-7781", "lines": [1, 2]}));

    let entity = validate_record(EntityKind::JobOrder, &r).unwrap();
    JobOrder::from_validated(&entity).unwrap().clone()
}

#[test]
fn test_undeclared_keys_are_kept_as_extensions() {
    let order = job_order_with_extensions();

    assert_eq!(order.extensions().len(), 2);
    assert_eq!(order.extension("customFlag"), Some(&json!(true)));
    assert_eq!(order.extension("customerPo").unwrap()["number"], json!("PO-7781"));
    assert!(order.extension("title").is_none());
}

#[test]
fn test_extensions_survive_serialization() {
    let order = job_order_with_extensions();
    let wire = order.clone().into_validated().to_record().unwrap();

    assert_eq!(wire.get("customFlag"), Some(&json!(true)));
    assert_eq!(wire.get("title"), Some(&json!("Pump housings batch 12")));

    let back = ValidatedEntity::from_wire(EntityKind::JobOrder, &wire).unwrap();
    let back = JobOrder::from_validated(&back).unwrap();
    assert_eq!(back, &order);
    assert_eq!(back.extension("customFlag"), Some(&json!(true)));
}

#[test]
fn test_set_extension_refuses_declared_fields() {
    let mut order = job_order_with_extensions();

    let err = order.set_extension("status", json!("done")).unwrap_err();
    assert!(matches!(err, SchemaError::InvalidPayload { .. }));
    assert_eq!(order.extensions().len(), 2);

    let previous = order.set_extension("customFlag", json!(false)).unwrap();
    assert_eq!(previous, Some(json!(true)));
    assert_eq!(order.remove_extension("customerPo").unwrap()["lines"], json!([1, 2]));
    assert_eq!(order.extensions().len(), 1);
}

#[test]
fn test_extensions_do_not_relax_declared_fields() {
    let mut r = with(EntityKind::JobOrder, "progress", json!("forty"));
    r.insert("customFlag", json!(true));

    let report = validate_record(EntityKind::JobOrder, &r).unwrap_err();
    assert_eq!(report.len(), 1);
    assert!(report.has("progress", ViolationKind::InvalidType));
}

#[test]
fn test_optional_job_order_fields() {
    let order = job_order_with_extensions();
    assert_eq!(order.priority, Some(Priority::High));
    assert_eq!(order.assigned_supervisor.as_deref(), Some("u-3"));
    assert_eq!(order.total_devices, Some(12));
    assert_eq!(order.completed_devices, Some(4));
    assert!(order.assigned_technicians.is_none());

    let report = validate_record(
        EntityKind::JobOrder,
        &with(EntityKind::JobOrder, "priority", json!("high")),
    )
    .unwrap_err();
    assert!(report.has("priority", ViolationKind::InvalidEnumValue));

    let report = validate_record(
        EntityKind::JobOrder,
        &with(EntityKind::JobOrder, "completedDevices", json!(2.5)),
    )
    .unwrap_err();
    assert!(report.has("completedDevices", ViolationKind::InvalidType));
}

#[test]
fn test_job_order_references() {
    let entity = validate_record(EntityKind::JobOrder, &record(common::job_order())).unwrap();
    let fields: Vec<String> = entity.references().into_iter().map(|r| r.field).collect();

    assert_eq!(
        fields,
        vec![
            "assignedUsers[0]",
            "assignedUsers[1]",
            "devices[0]",
            "assignedSupervisor",
        ]
    );
}
