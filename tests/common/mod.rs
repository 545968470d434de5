#![allow(dead_code)]

use prodtrack::{EntityKind, Record};
use serde_json::{json, Value};

pub fn user() -> Value {
    json!({
        "id": "u-1",
        "name": "Ana Lee",
        "username": "alee",
        "role": "technician"
    })
}

pub fn job_order() -> Value {
    json!({
        "id": "jo-1",
        "title": "Pump housings batch 12",
        "status": "in_progress",
        "progress": 40,
        "assignedUsers": ["u-1", "u-2"],
        "devices": ["dev-1"],
        "createdAt": "2024-05-01T08:00:00Z",
        "updatedAt": "2024-05-02T08:00:00Z",
        "dueDate": "2024-06-01",
        "priority": "High",
        "assignedSupervisor": "u-3",
        "totalDevices": 12,
        "completedDevices": 4
    })
}

pub fn task_entry() -> Value {
    json!({
        "id": "te-1",
        "jobOrderId": "jo-1",
        "operationId": "op-torque",
        "technicianId": "u-1",
        "serialNumbers": ["SN-0001", "SN-0002"],
        "startTime": "2024-05-03T09:00:00Z",
        "endTime": "2024-05-03T09:40:00Z",
        "standardTime": 30,
        "actualTime": 40,
        "notes": "",
        "status": "submitted"
    })
}

pub fn work_log() -> Value {
    json!({
        "id": "wl-1",
        "jobOrderId": "jo-1",
        "workerId": "u-2",
        "stage": "installation",
        "taskName": "Fit impeller",
        "deviceId": "dev-1",
        "serialNumber": "SN-0001",
        "startTime": "2024-05-03T10:00:00Z",
        "standardTime": 15.5,
        "actualTime": 14,
        "notes": "gasket replaced",
        "status": "draft",
        "createdAt": "2024-05-03T10:20:00Z"
    })
}

pub fn test_log() -> Value {
    json!({
        "id": "tl-1",
        "jobOrderId": "jo-1",
        "testPersonnelId": "u-4",
        "deviceId": "dev-1",
        "serialNumber": "SN-0001",
        "testType": "nitrogen",
        "result": "pass",
        "measurements": {"pressureBar": 6.2, "leakRate": "0.01 ml/min", "holdSeconds": 300},
        "notes": "",
        "testDate": "2024-05-04T13:00:00+02:00",
        "createdAt": "2024-05-04T11:05:00Z"
    })
}

pub fn inspection() -> Value {
    json!({
        "id": "qi-1",
        "jobOrderId": "jo-1",
        "inspectorId": "u-5",
        "deviceId": "dev-1",
        "serialNumber": "SN-0001",
        "inspectionPoint": "after_test",
        "result": "rework_required",
        "defects": ["scratch on flange", "label misaligned"],
        "notes": "send back to final touch",
        "inspectionDate": "2024-05-05T08:30:00Z",
        "createdAt": "2024-05-05T08:45:00Z"
    })
}

pub fn device() -> Value {
    json!({
        "id": "dev-1",
        "serialNumber": "SN-0001",
        "jobOrderId": "jo-1",
        "currentStage": "testing",
        "qualityStatus": "pass",
        "assignedUsers": ["u-1"],
        "createdAt": "2024-05-01T09:00:00Z",
        "updatedAt": "2024-05-04T12:00:00Z"
    })
}

pub fn task_completion() -> Value {
    json!({
        "id": "tc-1",
        "jobOrderId": "jo-1",
        "technicianId": "u-1",
        "operation": "Final torque check",
        "actualTimeMinutes": 40,
        "standardTimeMinutes": 30,
        "serialNumbers": ["SN-0001"],
        "notes": "",
        "files": [{
            "originalName": "torque-sheet.pdf",
            "storedName": "9f1c2e.pdf",
            "path": "/uploads/2024/05/9f1c2e.pdf",
            "size": 20480,
            "uploadedAt": "2024-05-03T10:00:00Z"
        }],
        "status": "submitted",
        "createdAt": "2024-05-03T10:01:00Z"
    })
}

pub fn fixture(kind: EntityKind) -> Value {
    match kind {
        EntityKind::User => user(),
        EntityKind::JobOrder => job_order(),
        EntityKind::TaskEntry => task_entry(),
        EntityKind::ProductionWorkLog => work_log(),
        EntityKind::TestLog => test_log(),
        EntityKind::QualityInspection => inspection(),
        EntityKind::Device => device(),
        EntityKind::TaskCompletion => task_completion(),
    }
}

pub fn record(value: Value) -> Record {
    Record::from_value(value).unwrap()
}

/// Fixture with `field` replaced by `value`.
pub fn with(kind: EntityKind, field: &str, value: Value) -> Record {
    let mut r = record(fixture(kind));
    r.insert(field, value);
    r
}

/// Fixture with `field` removed.
pub fn without(kind: EntityKind, field: &str) -> Record {
    let mut r = record(fixture(kind));
    r.data.remove(field);
    r
}
