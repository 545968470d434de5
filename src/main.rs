use clap::Parser;
use prodtrack::core::references::check_references;
use prodtrack::core::{ConfigProvider, Storage};
use prodtrack::utils::error::{ErrorSeverity, SchemaError};
use prodtrack::utils::{logger, validation::Validate};
use prodtrack::{
    CliConfig, LocalStorage, Record, SchemaConfig, ValidationOptions, ValidationReport, Validator,
};
use serde::Serialize;

#[derive(Debug, Serialize)]
struct RecordOutcome {
    index: usize,
    id: Option<String>,
    valid: bool,
    unverified_references: usize,
    errors: ValidationReport,
}

#[derive(Debug, Serialize)]
struct RunReport {
    kind: String,
    total: usize,
    valid: usize,
    invalid: usize,
    records: Vec<RecordOutcome>,
}

fn exit_code(e: &SchemaError) -> i32 {
    match e.severity() {
        ErrorSeverity::Low => 0,
        ErrorSeverity::Medium => 2,
        ErrorSeverity::High => 1,
        ErrorSeverity::Critical => 3,
    }
}

fn fail(e: SchemaError) -> ! {
    tracing::error!(
        "❌ {} (Category: {:?}, Severity: {:?})",
        e,
        e.category(),
        e.severity()
    );
    tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());
    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 {}", e.recovery_suggestion());
    std::process::exit(exit_code(&e).max(1));
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = CliConfig::parse();

    // 載入 TOML 配置（可選）
    let file_config = match &cli.config {
        Some(path) => SchemaConfig::from_file(path).unwrap_or_else(|e| fail(e)),
        None => SchemaConfig::default(),
    };

    let level = if cli.verbose {
        "debug"
    } else {
        file_config.log_level()
    };
    if file_config.json_logs() {
        logger::init_json_logger(level);
    } else {
        logger::init_cli_logger_with_level(level);
    }

    tracing::info!("🚀 Starting prodtrack validator");

    // 驗證配置
    if let Err(e) = cli.validate().and_then(|_| file_config.validate()) {
        fail(e);
    }
    let kind = cli.parsed_kind().unwrap_or_else(|e| fail(e));

    let storage = LocalStorage::new(".".to_string());
    let raw = storage
        .read_file(cli.input_path())
        .await
        .unwrap_or_else(|e| fail(e));
    let payload: serde_json::Value =
        serde_json::from_slice(&raw).unwrap_or_else(|e| fail(SchemaError::from(e)));
    let records = Record::many_from_value(payload).unwrap_or_else(|e| fail(e));
    tracing::info!("📁 Loaded {} {} record(s) from {}", records.len(), kind, cli.input_path());

    let validator = Validator::new(ValidationOptions {
        enforce_time_order: cli.enforce_time_order
            || file_config.validation_options().enforce_time_order,
    });

    let mut outcomes = Vec::with_capacity(records.len());
    for (index, record) in records.iter().enumerate() {
        let id = record
            .get("id")
            .and_then(|v| v.as_str())
            .map(str::to_string);
        let outcome = match validator.validate_record(kind, record) {
            Ok(entity) => {
                // 沒有外部查詢服務，參考一律標記為未驗證
                let refs = check_references(&entity, None).await;
                RecordOutcome {
                    index,
                    id,
                    valid: true,
                    unverified_references: refs.unverified.len(),
                    errors: ValidationReport::default(),
                }
            }
            Err(errors) => RecordOutcome {
                index,
                id,
                valid: false,
                unverified_references: 0,
                errors,
            },
        };
        outcomes.push(outcome);
    }

    let valid = outcomes.iter().filter(|o| o.valid).count();
    let report = RunReport {
        kind: kind.to_string(),
        total: outcomes.len(),
        valid,
        invalid: outcomes.len() - valid,
        records: outcomes,
    };

    for outcome in report.records.iter().filter(|o| !o.valid) {
        println!(
            "❌ #{} {}: {}",
            outcome.index,
            outcome.id.as_deref().unwrap_or("<no id>"),
            outcome.errors
        );
    }
    println!(
        "📊 {} record(s): {} valid, {} invalid",
        report.total, report.valid, report.invalid
    );

    if let Some(path) = cli.report_path() {
        let json = serde_json::to_vec_pretty(&report)?;
        storage
            .write_file(path, &json)
            .await
            .unwrap_or_else(|e| fail(e));
        tracing::info!("📁 Report saved to: {}", path);
    }

    if report.invalid > 0 {
        std::process::exit(1);
    }
    Ok(())
}
