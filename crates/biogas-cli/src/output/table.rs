use biogas_core::aggregate::MunicipalAggregate;
use biogas_core::biogas::GasBreakdown;
use biogas_core::bucket::BucketedAggregate;
use biogas_core::AnalysisReport;
use rust_decimal::Decimal;

const DISPLAY_DP: u32 = 2;

pub fn print(report: &AnalysisReport) {
    println!(
        "Records: {} ({} unknown quantity cell(s))\n",
        report.record_count, report.unknown_quantities
    );
    println!("  Total waste:       {} t", fmt(report.total_waste));
    println!("  Domestic+Public:   {} t", fmt(report.domestic_public_total));
    println!("  Pruning:           {} t\n", fmt(report.pruning_total));

    println!("=== Manual separation (t) ===\n");
    for (fraction, quantity) in report.separation.iter() {
        println!("  {:<18} {:>14}", fraction.to_string(), fmt(quantity));
    }
    if !report.unclassified_share.is_zero() {
        println!(
            "  {:<18} {:>13}%",
            "(unclassified)",
            fmt(report.unclassified_share * Decimal::ONE_HUNDRED)
        );
    }
    println!();

    println!("=== Biogas generation (m³) ===\n");
    print_breakdown(&report.biogas);

    println!(
        "=== Biomethane after purification at {} (m³) ===\n",
        report.purification
    );
    print_breakdown(&report.biomethane);

    print_aggregate(&report.domestic_public_by_municipality);
    print_buckets(&report.domestic_public_top);
    print_aggregate(&report.pruning_by_municipality);
    print_buckets(&report.pruning_top);

    if !report.warnings.is_empty() {
        println!("Warnings:");
        for w in &report.warnings {
            match &w.column {
                Some(col) => println!("  row {} [{}]: {}", w.row, col, w.message),
                None => println!("  row {}: {}", w.row, w.message),
            }
        }
        println!();
    }
}

fn print_breakdown(breakdown: &GasBreakdown) {
    for (source, volume) in breakdown.iter() {
        let share = breakdown
            .share(source)
            .map(|s| format!("{}%", fmt(s)))
            .unwrap_or_else(|| "-".into());
        println!(
            "  {:<18} {:>14}  {:>8}",
            source.to_string(),
            fmt(volume),
            share
        );
    }
    println!("  {:<18} {:>14}\n", "Total", fmt(breakdown.total()));
}

fn print_aggregate(aggregate: &MunicipalAggregate) {
    println!("=== {} waste by municipality (t) ===\n", aggregate.category());
    let width = aggregate
        .iter()
        .map(|(name, _)| name.chars().count())
        .max()
        .unwrap_or(12)
        .max(12);
    for (name, quantity) in aggregate.iter() {
        println!("  {:<width$}  {:>14}", name, fmt(quantity), width = width);
    }
    println!();
}

fn print_buckets(bucketed: &BucketedAggregate) {
    println!("{}", distribution_heading(bucketed));
    let shares = bucketed.shares();
    for (i, entry) in bucketed.entries().iter().enumerate() {
        let share = shares
            .as_ref()
            .map(|s| format!("{}%", fmt(s[i])))
            .unwrap_or_else(|| "-".into());
        println!(
            "    {:<24} {:>14}  {:>8}",
            entry.label.to_string(),
            fmt(entry.quantity),
            share
        );
    }
    println!();
}

fn distribution_heading(bucketed: &BucketedAggregate) -> String {
    format!("  Distribution (top {} + Other):", bucketed.top_n())
}

fn fmt(value: Decimal) -> String {
    value.round_dp(DISPLAY_DP).to_string()
}
