//! Optional status-transition rules.
//!
//! The record schema itself allows any status change; callers that want a
//! stricter workflow switch the policy to `Strict`.

use crate::domain::enums::{ApprovalStatus, CompletionStatus, EntityKind, JobOrderStatus};
use crate::domain::model::ValidatedEntity;
use crate::utils::error::{Result, SchemaError};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransitionPolicy {
    #[default]
    Permissive,
    Strict,
}

pub fn approval_allows(from: ApprovalStatus, to: ApprovalStatus) -> bool {
    use ApprovalStatus::*;
    from == to
        || matches!(
            (from, to),
            (Draft, Submitted)
                | (Submitted, Approved)
                | (Submitted, Rejected)
                | (Rejected, Draft)
                | (Rejected, Submitted)
        )
}

pub fn completion_allows(from: CompletionStatus, to: CompletionStatus) -> bool {
    use CompletionStatus::*;
    from == to
        || matches!(
            (from, to),
            (Submitted, Approved) | (Submitted, Rejected) | (Rejected, Submitted)
        )
}

pub fn job_order_allows(from: JobOrderStatus, to: JobOrderStatus) -> bool {
    use JobOrderStatus::*;
    from == to
        || matches!(
            (from, to),
            (Open, InProgress)
                | (Open, OnHold)
                | (InProgress, Completed)
                | (InProgress, OnHold)
                | (OnHold, Open)
                | (OnHold, InProgress)
        )
}

impl TransitionPolicy {
    /// Checks a replacement of `previous` by `next`. Kinds outside
    /// [`governed_kinds`] always pass.
    pub fn check(&self, previous: &ValidatedEntity, next: &ValidatedEntity) -> Result<()> {
        if !self.is_strict() || !governed_kinds().contains(&next.kind()) {
            return Ok(());
        }

        let allowed = match (previous, next) {
            (ValidatedEntity::JobOrder(a), ValidatedEntity::JobOrder(b)) => {
                job_order_allows(a.status, b.status)
            }
            (ValidatedEntity::TaskEntry(a), ValidatedEntity::TaskEntry(b)) => {
                approval_allows(a.status, b.status)
            }
            (ValidatedEntity::ProductionWorkLog(a), ValidatedEntity::ProductionWorkLog(b)) => {
                approval_allows(a.status, b.status)
            }
            (ValidatedEntity::TaskCompletion(a), ValidatedEntity::TaskCompletion(b)) => {
                completion_allows(a.status, b.status)
            }
            _ => true,
        };

        if allowed {
            return Ok(());
        }
        Err(SchemaError::IllegalTransition {
            kind: next.kind(),
            from: previous.status_token().unwrap_or_default().to_string(),
            to: next.status_token().unwrap_or_default().to_string(),
        })
    }

    pub fn is_strict(&self) -> bool {
        *self == TransitionPolicy::Strict
    }
}

/// Kinds whose status the strict policy governs.
pub fn governed_kinds() -> &'static [EntityKind] {
    &[
        EntityKind::JobOrder,
        EntityKind::TaskEntry,
        EntityKind::ProductionWorkLog,
        EntityKind::TaskCompletion,
    ]
}
