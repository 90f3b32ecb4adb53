pub mod aggregate;
pub mod biogas;
pub mod biomethane;
pub mod bucket;
pub mod config;
pub mod error;
pub mod ingest;
pub mod model;
pub mod separation;

use rust_decimal::Decimal;
use serde::Serialize;

use aggregate::{aggregate_by_municipality, MunicipalAggregate};
use biogas::{biogas_breakdown, BiogasBreakdown};
use biomethane::{purify, BiomethaneBreakdown, PurificationEfficiency};
use bucket::{bucket_top_n, BucketedAggregate};
use config::CalculationConfig;
use error::BiogasError;
use ingest::{ColumnMapping, IngestWarning};
use model::{MaterialFraction, WasteCategory, WasteRecord};
use separation::{separate, Separation};

/// Everything computed for one survey upload, ready for presentation.
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisReport {
    pub record_count: usize,
    /// Quantity cells that were missing or not usable numbers.
    pub unknown_quantities: usize,
    pub total_waste: Decimal,
    pub domestic_public_total: Decimal,
    pub pruning_total: Decimal,
    pub separation: Separation,
    /// Share of the domestic+public stream that no fraction covers (0-1).
    pub unclassified_share: Decimal,
    pub biogas: BiogasBreakdown,
    pub purification: PurificationEfficiency,
    pub biomethane: BiomethaneBreakdown,
    pub domestic_public_by_municipality: MunicipalAggregate,
    pub pruning_by_municipality: MunicipalAggregate,
    pub domestic_public_top: BucketedAggregate,
    pub pruning_top: BucketedAggregate,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<IngestWarning>,
}

/// Run the full calculation over already-coerced records.
///
/// Records are expected to come from the `ingest` readers, which keep every
/// known quantity within `0..=ingest::values::MAX_QUANTITY`.
///
/// Separation uses the domestic+public sum over all records; pruning bypasses
/// separation and feeds the biogas step directly.
pub fn analyze(
    records: &[WasteRecord],
    config: &CalculationConfig,
    efficiency: PurificationEfficiency,
) -> AnalysisReport {
    let total_waste: Decimal = records.iter().map(|r| r.total.or_zero()).sum();
    let domestic_public_total: Decimal = records.iter().map(|r| r.domestic_public.or_zero()).sum();
    let pruning_total: Decimal = records.iter().map(|r| r.pruning.or_zero()).sum();
    let unknown_quantities: usize = records.iter().map(WasteRecord::unknown_count).sum();

    let separation = separate(domestic_public_total, &config.proportions);
    tracing::debug!(
        domestic_public_total = %domestic_public_total,
        separated = %separation.total(),
        "separated domestic+public waste"
    );

    let biogas = biogas_breakdown(
        separation.quantity(MaterialFraction::Organic),
        separation.quantity(MaterialFraction::PaperCardboard),
        pruning_total,
        &config.yield_factors,
    );
    tracing::debug!(total = %biogas.total(), "computed biogas volume");

    let biomethane = purify(&biogas, efficiency);
    tracing::debug!(
        efficiency = %efficiency,
        total = %biomethane.total(),
        "computed biomethane volume"
    );

    let domestic_public_by_municipality =
        aggregate_by_municipality(records, WasteCategory::DomesticPublic);
    let pruning_by_municipality = aggregate_by_municipality(records, WasteCategory::Pruning);
    let domestic_public_top = bucket_top_n(&domestic_public_by_municipality, config.top_n);
    let pruning_top = bucket_top_n(&pruning_by_municipality, config.top_n);
    tracing::debug!(
        municipalities = domestic_public_by_municipality.len(),
        top_n = config.top_n.get(),
        "aggregated waste by municipality"
    );

    AnalysisReport {
        record_count: records.len(),
        unknown_quantities,
        total_waste,
        domestic_public_total,
        pruning_total,
        separation,
        unclassified_share: config.proportions.unclassified(),
        biogas,
        purification: efficiency,
        biomethane,
        domestic_public_by_municipality,
        pruning_by_municipality,
        domestic_public_top,
        pruning_top,
        warnings: Vec::new(),
    }
}

/// Read a survey workbook and run the full calculation on it.
pub fn analyze_workbook(
    xlsx_bytes: &[u8],
    sheet: Option<&str>,
    mapping: &ColumnMapping,
    config: &CalculationConfig,
    efficiency: PurificationEfficiency,
) -> Result<AnalysisReport, BiogasError> {
    let dataset = ingest::xlsx::read_xlsx(xlsx_bytes, sheet, mapping)?;
    let mut report = analyze(&dataset.records, config, efficiency);
    report.warnings = dataset.warnings;
    Ok(report)
}

/// Read survey records from a JSON array and run the full calculation on them.
pub fn analyze_json(
    json_bytes: &[u8],
    config: &CalculationConfig,
    efficiency: PurificationEfficiency,
) -> Result<AnalysisReport, BiogasError> {
    let dataset = ingest::json::read_json_records(json_bytes)?;
    let mut report = analyze(&dataset.records, config, efficiency);
    report.warnings = dataset.warnings;
    Ok(report)
}
