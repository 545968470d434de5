pub mod config;
pub mod core;
pub mod domain;
pub mod theme;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use config::cli::LocalStorage;
pub use config::toml_config::SchemaConfig;
pub use core::references::{check_references, validate_with_references, ReferenceReport};
pub use core::repository::{DeviceLookup, InMemoryRepository, RepositoryOptions, StoredRecord};
pub use core::transitions::TransitionPolicy;
pub use core::validator::{validate_record, ValidationOptions, Validator};
pub use domain::entities::*;
pub use domain::enums::*;
pub use domain::model::{Entity, Record, Reference, ValidatedEntity};
pub use domain::violation::{FieldError, ValidationReport, ViolationKind};
pub use theme::ThemeConfig;
pub use utils::error::{Result, SchemaError};
