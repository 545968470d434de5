//! Best-effort referential integrity on top of schema validation.

use crate::core::validator::Validator;
use crate::domain::enums::EntityKind;
use crate::domain::model::{Record, Reference, ValidatedEntity};
use crate::domain::ports::ReferenceResolver;
use crate::domain::violation::{FieldError, ValidationReport, ViolationKind};
use serde::Serialize;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ReferenceReport {
    pub verified: Vec<Reference>,
    /// References that could not be looked up; they are not treated as errors.
    pub unverified: Vec<Reference>,
    pub dangling: Vec<Reference>,
}

impl ReferenceReport {
    pub fn is_intact(&self) -> bool {
        self.dangling.is_empty()
    }

    pub fn is_fully_verified(&self) -> bool {
        self.dangling.is_empty() && self.unverified.is_empty()
    }

    pub fn to_violations(&self) -> ValidationReport {
        let mut report = ValidationReport::default();
        for reference in &self.dangling {
            report.push(FieldError::new(
                reference.field.clone(),
                ViolationKind::InvalidReference,
                format!("{} '{}' does not exist", reference.target, reference.id),
            ));
        }
        report
    }
}

pub async fn check_references(
    entity: &ValidatedEntity,
    resolver: Option<&dyn ReferenceResolver>,
) -> ReferenceReport {
    let mut report = ReferenceReport::default();
    let references = entity.references();

    let Some(resolver) = resolver else {
        if !references.is_empty() {
            tracing::debug!(
                "No reference resolver configured; {} reference(s) on {} '{}' left unverified",
                references.len(),
                entity.kind(),
                entity.id()
            );
        }
        report.unverified = references;
        return report;
    };

    for reference in references {
        match resolver.exists(reference.target, &reference.id).await {
            Ok(true) => report.verified.push(reference),
            Ok(false) => report.dangling.push(reference),
            Err(e) => {
                tracing::warn!(
                    "⚠️ Could not verify {} -> {} '{}': {}",
                    reference.field,
                    reference.target,
                    reference.id,
                    e
                );
                report.unverified.push(reference);
            }
        }
    }
    report
}

/// Schema validation followed by reference checks. Dangling references are
/// reported as `InvalidReference`; unreachable lookups are not.
pub async fn validate_with_references(
    validator: &Validator,
    kind: EntityKind,
    record: &Record,
    resolver: Option<&dyn ReferenceResolver>,
) -> std::result::Result<(ValidatedEntity, ReferenceReport), ValidationReport> {
    let entity = validator.validate_record(kind, record)?;
    let references = check_references(&entity, resolver).await;
    if !references.is_intact() {
        return Err(references.to_violations());
    }
    Ok((entity, references))
}
