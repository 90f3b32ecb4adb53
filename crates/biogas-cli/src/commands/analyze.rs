use biogas_core::biomethane::PurificationEfficiency;
use biogas_core::config::{builtin, load_config, CalculationConfig};
use biogas_core::error::BiogasError;
use biogas_core::ingest::ColumnMapping;
use rust_decimal::Decimal;
use std::num::NonZeroUsize;
use std::path::PathBuf;

use crate::output;

pub struct AnalyzeArgs {
    pub input_file: PathBuf,
    pub sheet: Option<String>,
    pub mapping: ColumnMapping,
    pub config_file: Option<PathBuf>,
    pub purification: Option<Decimal>,
    pub top_n: Option<usize>,
    pub output_format: String,
    pub out: Option<PathBuf>,
}

pub fn run(args: AnalyzeArgs) -> Result<(), BiogasError> {
    let config = resolve_config(&args)?;

    let efficiency = match args.purification {
        Some(percent) => PurificationEfficiency::from_percent(percent)?,
        None => config.default_purification,
    };

    // Determine input type by extension
    let is_json = args
        .input_file
        .extension()
        .map(|ext| ext.eq_ignore_ascii_case("json"))
        .unwrap_or(false);

    let report = if is_json {
        let json_bytes = std::fs::read(&args.input_file)?;
        biogas_core::analyze_json(&json_bytes, &config, efficiency)?
    } else {
        let xlsx_bytes = std::fs::read(&args.input_file)?;
        biogas_core::analyze_workbook(
            &xlsx_bytes,
            args.sheet.as_deref(),
            &args.mapping,
            &config,
            efficiency,
        )?
    };

    if let Some(path) = &args.out {
        let json = serde_json::to_string_pretty(&report)?;
        std::fs::write(path, json)?;
        eprintln!(
            "Analyzed {} record(s), written to {}",
            report.record_count,
            path.display()
        );
        if !report.warnings.is_empty() {
            eprintln!("  {} cell(s) or row(s) could not be used as-is", report.warnings.len());
        }
        return Ok(());
    }

    match args.output_format.as_str() {
        "json" => output::json::print(&report)?,
        _ => output::table::print(&report),
    }

    Ok(())
}

fn resolve_config(args: &AnalyzeArgs) -> Result<CalculationConfig, BiogasError> {
    let mut config = match &args.config_file {
        Some(path) => load_config(path)?,
        None => builtin::default_config()?,
    };

    if let Some(n) = args.top_n {
        config.top_n = NonZeroUsize::new(n)
            .ok_or_else(|| BiogasError::ConfigInvalid("--top-n must be at least 1".into()))?;
    }

    Ok(config)
}
