//! Closed enumerations used by the production-tracking records.
//!
//! Every enum is transmitted as its literal wire token (e.g. `"in_progress"`)
//! and parsing rejects anything outside the declared set.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Returned when a wire token is not part of a closed enumeration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownToken {
    pub value: String,
    pub allowed: &'static [&'static str],
}

impl fmt::Display for UnknownToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "'{}' is not one of: {}",
            self.value,
            self.allowed.join(", ")
        )
    }
}

impl std::error::Error for UnknownToken {}

/// Common surface of all closed enumerations, used by the field reader.
pub trait ClosedEnum: Sized + Copy + 'static {
    const TOKENS: &'static [&'static str];

    fn parse_token(raw: &str) -> Result<Self, UnknownToken>;

    fn token(&self) -> &'static str;
}

macro_rules! closed_enum {
    (
        $(#[$meta:meta])*
        pub enum $name:ident {
            $($variant:ident => $token:literal),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        pub enum $name {
            $(
                #[serde(rename = $token)]
                $variant,
            )+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $token,)+
                }
            }
        }

        impl ClosedEnum for $name {
            const TOKENS: &'static [&'static str] = &[$($token),+];

            fn parse_token(raw: &str) -> Result<Self, UnknownToken> {
                match raw {
                    $($token => Ok($name::$variant),)+
                    other => Err(UnknownToken {
                        value: other.to_string(),
                        allowed: Self::TOKENS,
                    }),
                }
            }

            fn token(&self) -> &'static str {
                self.as_str()
            }
        }

        impl std::str::FromStr for $name {
            type Err = UnknownToken;

            fn from_str(raw: &str) -> Result<Self, Self::Err> {
                <$name as ClosedEnum>::parse_token(raw)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

closed_enum! {
    /// The eight top-level record kinds.
    pub enum EntityKind {
        User => "user",
        JobOrder => "job_order",
        TaskEntry => "task_entry",
        ProductionWorkLog => "production_work_log",
        TestLog => "test_log",
        QualityInspection => "quality_inspection",
        Device => "device",
        TaskCompletion => "task_completion",
    }
}

closed_enum! {
    pub enum Role {
        Admin => "admin",
        ProductionWorker => "production_worker",
        Supervisor => "supervisor",
        PlanningEngineer => "planning_engineer",
        TestPersonnel => "test_personnel",
        QualityInspector => "quality_inspector",
        Technician => "technician",
    }
}

closed_enum! {
    /// Job order lifecycle. `OnHold` is a side state reachable from the active ones.
    pub enum JobOrderStatus {
        Open => "open",
        InProgress => "in_progress",
        Completed => "completed",
        OnHold => "on_hold",
    }
}

closed_enum! {
    pub enum Priority {
        Critical => "Critical",
        High => "High",
        Medium => "Medium",
        Low => "Low",
    }
}

closed_enum! {
    /// Review state shared by task entries and production work logs.
    pub enum ApprovalStatus {
        Draft => "draft",
        Submitted => "submitted",
        Approved => "approved",
        Rejected => "rejected",
    }
}

closed_enum! {
    /// Task completions are always created already submitted.
    pub enum CompletionStatus {
        Submitted => "submitted",
        Approved => "approved",
        Rejected => "rejected",
    }
}

closed_enum! {
    /// Stages a worker can log production work against.
    pub enum WorkStage {
        SubAssembly => "sub_assembly",
        Installation => "installation",
        FinalTouch => "final_touch",
        Packing => "packing",
    }
}

closed_enum! {
    /// Where a physical unit currently sits in the pipeline.
    pub enum DeviceStage {
        SubAssembly => "sub_assembly",
        Installation => "installation",
        Testing => "testing",
        FinalTouch => "final_touch",
        Packing => "packing",
        Completed => "completed",
    }
}

closed_enum! {
    pub enum QualityStatus {
        Pending => "pending",
        Pass => "pass",
        Fail => "fail",
        UnderReview => "under_review",
    }
}

closed_enum! {
    pub enum TestType {
        Nitrogen => "nitrogen",
        Immersion => "immersion",
        Ess => "ess",
        ControlUnit => "control_unit",
        Adjustment => "adjustment",
    }
}

closed_enum! {
    pub enum TestResult {
        Pass => "pass",
        Fail => "fail",
        NeedsReview => "needs_review",
    }
}

closed_enum! {
    pub enum InspectionPoint {
        AfterSubAssembly => "after_sub_assembly",
        AfterInstallation => "after_installation",
        AfterTest => "after_test",
        Final => "final",
    }
}

closed_enum! {
    pub enum InspectionResult {
        Pass => "pass",
        Fail => "fail",
        Rework => "rework_required",
        Pending => "pending",
    }
}
