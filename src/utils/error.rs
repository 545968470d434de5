use crate::domain::model::EntityKind;
use crate::domain::violation::ValidationReport;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SchemaError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("{kind} record failed validation: {report}")]
    ValidationError {
        kind: EntityKind,
        report: ValidationReport,
    },

    #[error("Invalid payload: {message}")]
    InvalidPayload { message: String },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Configuration validation failed for '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("{kind} '{id}' not found")]
    NotFound { kind: EntityKind, id: String },

    #[error("{kind} '{id}' was modified concurrently (expected version {expected}, found {actual})")]
    VersionConflict {
        kind: EntityKind,
        id: String,
        expected: u64,
        actual: u64,
    },

    #[error("Illegal {kind} status transition: {from} -> {to}")]
    IllegalTransition {
        kind: EntityKind,
        from: String,
        to: String,
    },

    #[error("Unknown theme token: {token}")]
    UnknownThemeToken { token: String },

    #[error("Unknown entity kind: {value}")]
    UnknownEntityKind { value: String },

    #[error("Reference lookup unavailable: {message}")]
    LookupUnavailable { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Io,
    Data,
    Configuration,
    Persistence,
    Lookup,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl SchemaError {
    pub fn validation(kind: EntityKind, report: ValidationReport) -> Self {
        Self::ValidationError { kind, report }
    }

    pub fn config(message: impl Into<String>) -> Self {
        Self::ConfigError {
            message: message.into(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::IoError(_) => ErrorCategory::Io,
            Self::SerializationError(_)
            | Self::ValidationError { .. }
            | Self::InvalidPayload { .. }
            | Self::UnknownEntityKind { .. } => ErrorCategory::Data,
            Self::ConfigError { .. }
            | Self::ConfigValidationError { .. }
            | Self::InvalidConfigValueError { .. }
            | Self::UnknownThemeToken { .. } => ErrorCategory::Configuration,
            Self::NotFound { .. } | Self::VersionConflict { .. } | Self::IllegalTransition { .. } => {
                ErrorCategory::Persistence
            }
            Self::LookupUnavailable { .. } => ErrorCategory::Lookup,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            Self::LookupUnavailable { .. } => ErrorSeverity::Low,
            Self::VersionConflict { .. } => ErrorSeverity::Medium,
            Self::ValidationError { .. }
            | Self::SerializationError(_)
            | Self::InvalidPayload { .. }
            | Self::NotFound { .. }
            | Self::IllegalTransition { .. }
            | Self::UnknownEntityKind { .. } => ErrorSeverity::High,
            Self::IoError(_)
            | Self::ConfigError { .. }
            | Self::ConfigValidationError { .. }
            | Self::InvalidConfigValueError { .. }
            | Self::UnknownThemeToken { .. } => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> String {
        match self {
            Self::IoError(_) => "Check that the input path exists and is readable".to_string(),
            Self::SerializationError(_) | Self::InvalidPayload { .. } => {
                "Make sure the input is a JSON object or an array of JSON objects".to_string()
            }
            Self::ValidationError { report, .. } => {
                format!("Fix the listed fields: {}", report.fields().join(", "))
            }
            Self::ConfigError { .. }
            | Self::ConfigValidationError { .. }
            | Self::InvalidConfigValueError { .. } => {
                "Review the TOML configuration file".to_string()
            }
            Self::NotFound { .. } => "Verify the identifier and that the record was not deleted".to_string(),
            Self::VersionConflict { .. } => {
                "Reload the record and re-apply the change on the latest version".to_string()
            }
            Self::IllegalTransition { .. } => {
                "Move the record through the intermediate statuses or disable strict transitions"
                    .to_string()
            }
            Self::UnknownThemeToken { .. } => {
                "Only existing theme tokens can be overridden; run theme_tokens to list them"
                    .to_string()
            }
            Self::UnknownEntityKind { .. } => format!(
                "Use one of: {}",
                EntityKind::ALL
                    .iter()
                    .map(|k| k.as_str())
                    .collect::<Vec<_>>()
                    .join(", ")
            ),
            Self::LookupUnavailable { .. } => {
                "References were left unverified; retry when the lookup service is reachable"
                    .to_string()
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            Self::ValidationError { kind, report } => format!(
                "The {} record is invalid ({} problem(s))",
                kind,
                report.len()
            ),
            Self::VersionConflict { kind, id, .. } => {
                format!("Someone else changed {} '{}' in the meantime", kind, id)
            }
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, SchemaError>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::violation::{FieldError, ViolationKind};

    #[test]
    fn test_validation_error_lists_fields_in_suggestion() {
        let mut report = ValidationReport::default();
        report.push(FieldError::new(
            "technicianId",
            ViolationKind::MissingRequiredField,
            "field is required",
        ));
        let err = SchemaError::validation(EntityKind::TaskEntry, report);

        assert_eq!(err.category(), ErrorCategory::Data);
        assert_eq!(err.severity(), ErrorSeverity::High);
        assert!(err.recovery_suggestion().contains("technicianId"));
        assert!(err.user_friendly_message().contains("1 problem"));
    }

    #[test]
    fn test_version_conflict_is_retryable() {
        let err = SchemaError::VersionConflict {
            kind: EntityKind::Device,
            id: "dev-1".to_string(),
            expected: 1,
            actual: 2,
        };
        assert_eq!(err.severity(), ErrorSeverity::Medium);
        assert_eq!(err.category(), ErrorCategory::Persistence);
    }
}
