use crate::core::repository::RepositoryOptions;
use crate::core::transitions::TransitionPolicy;
use crate::core::validator::ValidationOptions;
use crate::theme::{ThemeConfig, ThemeOverrides};
use crate::utils::error::{Result, SchemaError};
use crate::utils::validation::{validate_one_of, Validate};
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SchemaConfig {
    pub validation: Option<ValidationSection>,
    pub logging: Option<LoggingSection>,
    pub theme: Option<ThemeOverrides>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ValidationSection {
    pub enforce_time_order: Option<bool>,
    pub check_references: Option<bool>,
    pub transitions: Option<TransitionPolicy>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoggingSection {
    pub level: Option<String>,
    pub json: Option<bool>,
}

impl SchemaConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(SchemaError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| SchemaError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${THEME_PRIMARY})
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}")
            .map_err(|e| SchemaError::config(format!("env pattern: {}", e)))?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn validation_options(&self) -> ValidationOptions {
        ValidationOptions {
            enforce_time_order: self
                .validation
                .as_ref()
                .and_then(|v| v.enforce_time_order)
                .unwrap_or(false),
        }
    }

    pub fn transition_policy(&self) -> TransitionPolicy {
        self.validation
            .as_ref()
            .and_then(|v| v.transitions)
            .unwrap_or_default()
    }

    pub fn check_references(&self) -> bool {
        self.validation
            .as_ref()
            .and_then(|v| v.check_references)
            .unwrap_or(true)
    }

    pub fn repository_options(&self) -> RepositoryOptions {
        RepositoryOptions {
            validation: self.validation_options(),
            transitions: self.transition_policy(),
            check_references: self.check_references(),
        }
    }

    pub fn log_level(&self) -> &str {
        self.logging
            .as_ref()
            .and_then(|l| l.level.as_deref())
            .unwrap_or("info")
    }

    pub fn json_logs(&self) -> bool {
        self.logging.as_ref().and_then(|l| l.json).unwrap_or(false)
    }

    /// Built-in theme with this config's overrides applied.
    pub fn theme(&self) -> Result<ThemeConfig> {
        match &self.theme {
            Some(overrides) => ThemeConfig::with_overrides(overrides),
            None => Ok(ThemeConfig::default()),
        }
    }

    /// 驗證配置的合理性
    pub fn validate_config(&self) -> Result<()> {
        validate_one_of("logging.level", self.log_level(), LOG_LEVELS)?;
        self.theme()?;
        Ok(())
    }
}

impl Validate for SchemaConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
