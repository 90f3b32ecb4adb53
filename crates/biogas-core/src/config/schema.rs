use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Calculation settings as written in a configuration file.
///
/// Every field is optional in the file and falls back to the survey
/// defaults. Decimal values are quoted strings to keep exact precision.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigDef {
    /// Organic, Plastic, Paper/Cardboard, Metal, Glass, Other.
    #[serde(default = "default_separation_proportions")]
    pub separation_proportions: Vec<Decimal>,
    #[serde(default = "default_yield_factor_pruning")]
    pub yield_factor_pruning: Decimal,
    #[serde(default = "default_yield_factor_organic")]
    pub yield_factor_organic: Decimal,
    #[serde(default = "default_yield_factor_paper")]
    pub yield_factor_paper: Decimal,
    /// Number of municipalities shown before the rest is grouped as "Other".
    #[serde(default = "default_top_n")]
    pub top_n: usize,
    /// Purification efficiency used when none is given at runtime, in percent.
    #[serde(default = "default_purification_percent")]
    pub purification_percent: Decimal,
}

fn default_separation_proportions() -> Vec<Decimal> {
    vec![
        Decimal::new(5557, 4),
        Decimal::new(1355, 4),
        Decimal::new(829, 4),
        Decimal::new(2, 2),
        Decimal::new(209, 4),
        Decimal::new(67, 4),
    ]
}

fn default_yield_factor_pruning() -> Decimal {
    Decimal::new(460, 3)
}

fn default_yield_factor_organic() -> Decimal {
    Decimal::new(215, 3)
}

fn default_yield_factor_paper() -> Decimal {
    Decimal::new(358, 3)
}

fn default_top_n() -> usize {
    7
}

fn default_purification_percent() -> Decimal {
    Decimal::new(50, 0)
}

impl Default for ConfigDef {
    fn default() -> Self {
        Self {
            separation_proportions: default_separation_proportions(),
            yield_factor_pruning: default_yield_factor_pruning(),
            yield_factor_organic: default_yield_factor_organic(),
            yield_factor_paper: default_yield_factor_paper(),
            top_n: default_top_n(),
            purification_percent: default_purification_percent(),
        }
    }
}
