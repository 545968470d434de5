use crate::utils::error::{Result, SchemaError};
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

/// Parses an ISO-8601 timestamp.
///
/// Full RFC 3339 date-times are accepted in any offset and normalised to UTC.
/// A date-time without an offset (`2024-03-01T09:00:00`) is taken as UTC.
/// A bare calendar date (`2024-03-01`) is read as midnight UTC, which is how
/// due dates and test dates usually arrive from date pickers.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Some(parsed.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(naive.and_utc());
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

/// Non-negative and finite.
pub fn is_valid_quantity(value: f64) -> bool {
    value.is_finite() && value >= 0.0
}

/// `standard / actual * 100`, absent when nothing was actually spent or the
/// ratio does not fit in a finite number.
pub fn efficiency_percentage(standard_minutes: f64, actual_minutes: f64) -> Option<f64> {
    if actual_minutes == 0.0 {
        return None;
    }
    Some(standard_minutes / actual_minutes * 100.0).filter(|v| v.is_finite())
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.is_empty() {
        return Err(SchemaError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path cannot be empty".to_string(),
        });
    }

    if path.contains('\0') {
        return Err(SchemaError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path contains null bytes".to_string(),
        });
    }

    Ok(())
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(SchemaError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}

pub fn validate_one_of(field_name: &str, value: &str, allowed: &[&str]) -> Result<()> {
    if allowed.contains(&value) {
        return Ok(());
    }
    Err(SchemaError::InvalidConfigValueError {
        field: field_name.to_string(),
        value: value.to_string(),
        reason: format!("Allowed values: {}", allowed.join(", ")),
    })
}
