pub mod builtin;
pub mod schema;

use crate::biogas::YieldFactors;
use crate::biomethane::PurificationEfficiency;
use crate::error::BiogasError;
use crate::separation::SeparationProportions;
use schema::ConfigDef;
use std::num::NonZeroUsize;
use std::path::Path;

/// Validated, immutable calculation settings shared by every run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CalculationConfig {
    pub proportions: SeparationProportions,
    pub yield_factors: YieldFactors,
    pub top_n: NonZeroUsize,
    pub default_purification: PurificationEfficiency,
}

/// Load and validate a configuration from a JSON file.
pub fn load_config(path: &Path) -> Result<CalculationConfig, BiogasError> {
    let content = std::fs::read_to_string(path).map_err(|e| BiogasError::ConfigLoad {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    let config = parse_config(&content, path)?;
    tracing::info!(path = %path.display(), "loaded calculation configuration");
    Ok(config)
}

/// Parse a configuration from a JSON string read from `source`.
pub fn parse_config(json: &str, source: &Path) -> Result<CalculationConfig, BiogasError> {
    let def: ConfigDef = serde_json::from_str(json).map_err(|e| BiogasError::ConfigLoad {
        path: source.to_path_buf(),
        reason: e.to_string(),
    })?;
    validate_config(&def)
}

/// Parse a configuration from a JSON string (no file path context).
pub fn parse_config_str(json: &str) -> Result<CalculationConfig, BiogasError> {
    let def: ConfigDef = serde_json::from_str(json)
        .map_err(|e| BiogasError::ConfigInvalid(e.to_string()))?;
    validate_config(&def)
}

/// Validate a configuration definition. Nothing is corrected silently.
pub fn validate_config(def: &ConfigDef) -> Result<CalculationConfig, BiogasError> {
    let proportions = SeparationProportions::new(&def.separation_proportions)?;
    let yield_factors = YieldFactors::new(
        def.yield_factor_pruning,
        def.yield_factor_organic,
        def.yield_factor_paper,
    )?;
    let top_n = NonZeroUsize::new(def.top_n)
        .ok_or_else(|| BiogasError::ConfigInvalid("top_n must be at least 1".into()))?;
    let default_purification = PurificationEfficiency::from_percent(def.purification_percent)
        .map_err(|_| {
            BiogasError::ConfigInvalid(format!(
                "purification_percent must be between 0 and 100, got {}",
                def.purification_percent
            ))
        })?;

    Ok(CalculationConfig {
        proportions,
        yield_factors,
        top_n,
        default_purification,
    })
}
