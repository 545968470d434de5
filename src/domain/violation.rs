use serde::{Deserialize, Serialize};
use std::fmt;

/// Why a field was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ViolationKind {
    MissingRequiredField,
    InvalidEnumValue,
    InvalidType,
    InvalidReference,
    ConstraintViolation,
}

impl fmt::Display for ViolationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::MissingRequiredField => "MissingRequiredField",
            Self::InvalidEnumValue => "InvalidEnumValue",
            Self::InvalidType => "InvalidType",
            Self::InvalidReference => "InvalidReference",
            Self::ConstraintViolation => "ConstraintViolation",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    /// Wire name of the field, with `[index]` or `.key` suffixes for nested values.
    pub field: String,
    pub kind: ViolationKind,
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, kind: ViolationKind, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            kind,
            message: message.into(),
        }
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}): {}", self.field, self.kind, self.message)
    }
}

/// Every violation found in one record, in field order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationReport {
    errors: Vec<FieldError>,
}

impl ValidationReport {
    pub fn push(&mut self, error: FieldError) {
        self.errors.push(error);
    }

    pub fn extend(&mut self, other: ValidationReport) {
        self.errors.extend(other.errors);
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn errors(&self) -> &[FieldError] {
        &self.errors
    }

    pub fn fields(&self) -> Vec<&str> {
        self.errors.iter().map(|e| e.field.as_str()).collect()
    }

    pub fn has(&self, field: &str, kind: ViolationKind) -> bool {
        self.errors.iter().any(|e| e.field == field && e.kind == kind)
    }

    /// Wraps a value in `Ok` only when no violation was recorded.
    pub fn into_result<T>(self, value: impl FnOnce() -> Option<T>) -> Result<T, ValidationReport> {
        if !self.errors.is_empty() {
            return Err(self);
        }
        value().ok_or(self)
    }
}

impl fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self.errors.iter().map(|e| e.to_string()).collect();
        f.write_str(&parts.join("; "))
    }
}
