use biogas_core::config::{builtin, load_config};
use biogas_core::error::BiogasError;
use biogas_core::model::MaterialFraction;
use std::path::Path;

pub fn show() -> Result<(), BiogasError> {
    println!("{}", builtin::default_config_json()?);
    Ok(())
}

pub fn validate(file: &Path) -> Result<(), BiogasError> {
    let config = load_config(file)?;

    println!("Configuration '{}' is valid.", file.display());
    println!("  Separation proportions:");
    for fraction in MaterialFraction::ALL {
        println!("    {:<16} {}", fraction.to_string(), config.proportions.get(fraction));
    }
    println!(
        "    {:<16} {}",
        "(unclassified)",
        config.proportions.unclassified()
    );
    println!("  Yield factors:");
    println!("    {:<16} {}", "Organic", config.yield_factors.organic());
    println!("    {:<16} {}", "Paper/Cardboard", config.yield_factors.paper());
    println!("    {:<16} {}", "Pruning", config.yield_factors.pruning());
    println!("  Top N: {}", config.top_n);
    println!("  Default purification: {}", config.default_purification);

    Ok(())
}

pub fn schema() -> Result<(), BiogasError> {
    print!(
        r#"Configuration Schema
====================

A configuration file sets the constants used by `biogas analyze`.
Every field is optional; missing fields use the built-in defaults
(see `biogas config show`).

Fields:
  separation_proportions
                (array of 6 strings)  Fractions of the domestic+public
                                      stream, in this order: Organic,
                                      Plastic, Paper/Cardboard, Metal,
                                      Glass, Other. Each between 0 and 1;
                                      the sum may not exceed 1. Whatever
                                      is left is reported as unclassified.
  yield_factor_pruning
                (string)              Biogas per unit mass of pruning waste.
                                      Must be positive and at most 1000
                                      (as must the two factors below).
  yield_factor_organic
                (string)              Biogas per unit mass of organic waste.
  yield_factor_paper
                (string)              Biogas per unit mass of paper/cardboard.
  top_n         (integer)             Municipalities listed individually in
                                      summaries; the rest become "Other".
                                      Must be at least 1.
  purification_percent
                (string)              Biogas to biomethane efficiency used
                                      when --purification is not given,
                                      between 0 and 100.

Example:
{{
  "separation_proportions": ["0.5557", "0.1355", "0.0829", "0.02", "0.0209", "0.0067"],
  "yield_factor_pruning": "0.460",
  "yield_factor_organic": "0.215",
  "yield_factor_paper": "0.358",
  "top_n": 7,
  "purification_percent": "50"
}}

Note: decimal values must be quoted strings, not bare numbers,
to preserve exact decimal precision (e.g., "0.358" not 0.358).
"#
    );
    Ok(())
}
