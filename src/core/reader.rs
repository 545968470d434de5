//! Field-by-field extraction of raw records.
//!
//! The reader never stops at the first problem: every accessor records its
//! violation on the shared report and returns `None`, so one pass over a
//! record yields the complete list of failing fields.

use crate::domain::enums::ClosedEnum;
use crate::domain::model::json_type_name;
use crate::domain::violation::{FieldError, ValidationReport, ViolationKind};
use crate::utils::validation::{is_valid_quantity, parse_timestamp};
use chrono::{DateTime, Utc};
use serde_json::{Map, Value};

pub struct FieldReader<'a> {
    data: &'a Map<String, Value>,
    prefix: String,
    report: ValidationReport,
}

impl<'a> FieldReader<'a> {
    pub fn new(data: &'a Map<String, Value>) -> Self {
        Self {
            data,
            prefix: String::new(),
            report: ValidationReport::default(),
        }
    }

    /// Reader for a nested object; its field names are reported as `prefix.field`.
    pub fn nested(data: &'a Map<String, Value>, prefix: impl Into<String>) -> Self {
        Self {
            data,
            prefix: prefix.into(),
            report: ValidationReport::default(),
        }
    }

    pub fn report(&self) -> &ValidationReport {
        &self.report
    }

    pub fn into_report(self) -> ValidationReport {
        self.report
    }

    pub fn keys(&self) -> impl Iterator<Item = (&'a String, &'a Value)> {
        self.data.iter()
    }

    pub fn path(&self, field: &str) -> String {
        if self.prefix.is_empty() {
            field.to_string()
        } else {
            format!("{}.{}", self.prefix, field)
        }
    }

    pub fn violation(&mut self, field: &str, kind: ViolationKind, message: impl Into<String>) {
        let path = self.path(field);
        self.report.push(FieldError::new(path, kind, message));
    }

    /// Present and not `null`.
    fn present(&self, field: &str) -> Option<&'a Value> {
        self.data.get(field).filter(|v| !v.is_null())
    }

    fn missing(&mut self, field: &str) {
        self.violation(field, ViolationKind::MissingRequiredField, "field is required");
    }

    fn wrong_type(&mut self, field: &str, expected: &str, found: &Value) {
        let message = format!("expected {}, found {}", expected, json_type_name(found));
        self.violation(field, ViolationKind::InvalidType, message);
    }

    fn string_value(&mut self, field: &str, value: &Value) -> Option<String> {
        match value.as_str() {
            Some(s) => Some(s.to_string()),
            None => {
                self.wrong_type(field, "string", value);
                None
            }
        }
    }

    /// Required string that must not be blank.
    pub fn required_str(&mut self, field: &str) -> Option<String> {
        let Some(value) = self.present(field) else {
            self.missing(field);
            return None;
        };
        let s = self.string_value(field, value)?;
        if s.trim().is_empty() {
            self.missing(field);
            return None;
        }
        Some(s)
    }

    /// Required free text; an empty string is a legitimate value.
    pub fn text(&mut self, field: &str) -> Option<String> {
        let Some(value) = self.present(field) else {
            self.missing(field);
            return None;
        };
        self.string_value(field, value)
    }

    /// Optional string kept verbatim, including the empty string.
    pub fn optional_str(&mut self, field: &str) -> Option<String> {
        let value = self.present(field)?;
        self.string_value(field, value)
    }

    /// Optional identifier; when given it must not be blank.
    pub fn optional_id(&mut self, field: &str) -> Option<String> {
        let value = self.present(field)?;
        let s = self.string_value(field, value)?;
        if s.trim().is_empty() {
            self.violation(
                field,
                ViolationKind::ConstraintViolation,
                "identifier cannot be empty",
            );
            return None;
        }
        Some(s)
    }

    fn enum_value<T: ClosedEnum>(&mut self, field: &str, value: &Value) -> Option<T> {
        let raw = self.string_value(field, value)?;
        match T::parse_token(&raw) {
            Ok(parsed) => Some(parsed),
            Err(err) => {
                self.violation(field, ViolationKind::InvalidEnumValue, err.to_string());
                None
            }
        }
    }

    pub fn required_enum<T: ClosedEnum>(&mut self, field: &str) -> Option<T> {
        let Some(value) = self.present(field) else {
            self.missing(field);
            return None;
        };
        self.enum_value(field, value)
    }

    pub fn optional_enum<T: ClosedEnum>(&mut self, field: &str) -> Option<T> {
        let value = self.present(field)?;
        self.enum_value(field, value)
    }

    fn quantity_value(&mut self, field: &str, value: &Value) -> Option<f64> {
        let Some(number) = value.as_f64() else {
            self.wrong_type(field, "number", value);
            return None;
        };
        if !is_valid_quantity(number) {
            self.violation(
                field,
                ViolationKind::ConstraintViolation,
                format!("must be a non-negative number, got {}", number),
            );
            return None;
        }
        Some(number)
    }

    /// Required non-negative number (durations, progress).
    pub fn required_quantity(&mut self, field: &str) -> Option<f64> {
        let Some(value) = self.present(field) else {
            self.missing(field);
            return None;
        };
        self.quantity_value(field, value)
    }

    pub fn optional_quantity(&mut self, field: &str) -> Option<f64> {
        let value = self.present(field)?;
        self.quantity_value(field, value)
    }

    fn count_value(&mut self, field: &str, value: &Value) -> Option<u64> {
        if let Some(count) = value.as_u64() {
            return Some(count);
        }
        match value.as_f64() {
            Some(n) if n < 0.0 => {
                self.violation(
                    field,
                    ViolationKind::ConstraintViolation,
                    format!("must be a non-negative integer, got {}", n),
                );
            }
            _ => self.wrong_type(field, "non-negative integer", value),
        }
        None
    }

    /// Required non-negative integer (byte sizes).
    pub fn required_count(&mut self, field: &str) -> Option<u64> {
        let Some(value) = self.present(field) else {
            self.missing(field);
            return None;
        };
        self.count_value(field, value)
    }

    pub fn optional_count(&mut self, field: &str) -> Option<u64> {
        let value = self.present(field)?;
        self.count_value(field, value)
    }

    fn timestamp_value(&mut self, field: &str, value: &Value) -> Option<DateTime<Utc>> {
        let raw = self.string_value(field, value)?;
        match parse_timestamp(&raw) {
            Some(ts) => Some(ts),
            None => {
                self.violation(
                    field,
                    ViolationKind::ConstraintViolation,
                    format!("'{}' is not an ISO-8601 date-time", raw),
                );
                None
            }
        }
    }

    pub fn required_timestamp(&mut self, field: &str) -> Option<DateTime<Utc>> {
        let Some(value) = self.present(field) else {
            self.missing(field);
            return None;
        };
        self.timestamp_value(field, value)
    }

    pub fn optional_timestamp(&mut self, field: &str) -> Option<DateTime<Utc>> {
        let value = self.present(field)?;
        self.timestamp_value(field, value)
    }

    fn string_list_value(&mut self, field: &str, value: &Value) -> Option<Vec<String>> {
        let Some(items) = value.as_array() else {
            self.wrong_type(field, "array of strings", value);
            return None;
        };
        let mut out = Vec::with_capacity(items.len());
        let mut ok = true;
        for (i, item) in items.iter().enumerate() {
            let element = format!("{}[{}]", field, i);
            match item.as_str() {
                Some(s) if !s.trim().is_empty() => out.push(s.to_string()),
                Some(_) => {
                    self.violation(
                        &element,
                        ViolationKind::ConstraintViolation,
                        "entries cannot be empty",
                    );
                    ok = false;
                }
                None => {
                    self.wrong_type(&element, "string", item);
                    ok = false;
                }
            }
        }
        ok.then_some(out)
    }

    /// Required array of non-empty strings; the array itself may be empty.
    pub fn required_list(&mut self, field: &str) -> Option<Vec<String>> {
        let Some(value) = self.present(field) else {
            self.missing(field);
            return None;
        };
        self.string_list_value(field, value)
    }

    pub fn optional_list(&mut self, field: &str) -> Option<Vec<String>> {
        let value = self.present(field)?;
        self.string_list_value(field, value)
    }

    /// Optional free-form JSON object (e.g. test measurements), kept as-is.
    pub fn optional_object(&mut self, field: &str) -> Option<Map<String, Value>> {
        let value = self.present(field)?;
        match value.as_object() {
            Some(obj) => Some(obj.clone()),
            None => {
                self.wrong_type(field, "object", value);
                None
            }
        }
    }

    /// Required array of objects, each read by `read_item` with its own nested reader.
    pub fn required_objects<T>(
        &mut self,
        field: &str,
        mut read_item: impl FnMut(&mut FieldReader<'a>) -> Option<T>,
    ) -> Option<Vec<T>> {
        let Some(value) = self.present(field) else {
            self.missing(field);
            return None;
        };
        let Some(items) = value.as_array() else {
            self.wrong_type(field, "array of objects", value);
            return None;
        };

        let mut out = Vec::with_capacity(items.len());
        let mut ok = true;
        for (i, item) in items.iter().enumerate() {
            let element = self.path(&format!("{}[{}]", field, i));
            let Some(obj) = item.as_object() else {
                self.report.push(FieldError::new(
                    element,
                    ViolationKind::InvalidType,
                    format!("expected object, found {}", json_type_name(item)),
                ));
                ok = false;
                continue;
            };
            let mut child = FieldReader::nested(obj, element);
            let parsed = read_item(&mut child);
            let child_report = child.into_report();
            match parsed {
                Some(v) if child_report.is_empty() => out.push(v),
                _ => ok = false,
            }
            self.report.extend(child_report);
        }
        ok.then_some(out)
    }
}
