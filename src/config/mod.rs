pub mod cli;
pub mod toml_config;

#[cfg(feature = "cli")]
use crate::core::ConfigProvider;
#[cfg(feature = "cli")]
use crate::domain::enums::EntityKind;
#[cfg(feature = "cli")]
use crate::utils::error::{Result, SchemaError};
#[cfg(feature = "cli")]
use crate::utils::validation::{validate_path, Validate};
#[cfg(feature = "cli")]
use clap::Parser;
#[cfg(feature = "cli")]
use serde::{Deserialize, Serialize};

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Serialize, Deserialize, Parser)]
#[command(name = "prodtrack")]
#[command(about = "Validate production-tracking records against the domain schema")]
pub struct CliConfig {
    /// JSON file holding one record or an array of records
    #[arg(long)]
    pub input: String,

    /// Record kind, e.g. job_order, task_entry, device
    #[arg(long)]
    pub kind: String,

    /// Optional TOML configuration file
    #[arg(long)]
    pub config: Option<String>,

    /// Write a JSON validation report to this path
    #[arg(long)]
    pub report: Option<String>,

    #[arg(long, help = "Reject records whose endTime precedes startTime")]
    pub enforce_time_order: bool,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,
}

#[cfg(feature = "cli")]
impl CliConfig {
    pub fn parsed_kind(&self) -> Result<EntityKind> {
        self.entity_kind()
            .parse::<EntityKind>()
            .map_err(|_| SchemaError::UnknownEntityKind {
                value: self.kind.clone(),
            })
    }
}

#[cfg(feature = "cli")]
impl ConfigProvider for CliConfig {
    fn input_path(&self) -> &str {
        &self.input
    }

    fn entity_kind(&self) -> &str {
        &self.kind
    }

    fn report_path(&self) -> Option<&str> {
        self.report.as_deref()
    }
}

#[cfg(feature = "cli")]
impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validate_path("input", &self.input)?;
        if let Some(report) = &self.report {
            validate_path("report", report)?;
        }
        self.parsed_kind()?;
        Ok(())
    }
}

#[cfg(all(test, feature = "cli"))]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parsing_and_validation() {
        let config = CliConfig::parse_from([
            "prodtrack",
            "--input",
            "devices.json",
            "--kind",
            "device",
            "--enforce-time-order",
        ]);
        assert!(config.validate().is_ok());
        assert_eq!(config.parsed_kind().unwrap(), EntityKind::Device);
        assert!(config.enforce_time_order);
        assert_eq!(config.report_path(), None);
    }

    #[test]
    fn test_cli_rejects_unknown_kind() {
        let config =
            CliConfig::parse_from(["prodtrack", "--input", "x.json", "--kind", "widget"]);
        assert!(matches!(
            config.validate(),
            Err(SchemaError::UnknownEntityKind { .. })
        ));
    }
}
