use biogas_core::error::BiogasError;
use biogas_core::AnalysisReport;

pub fn print(report: &AnalysisReport) -> Result<(), BiogasError> {
    let json = serde_json::to_string_pretty(report)?;
    println!("{json}");
    Ok(())
}
