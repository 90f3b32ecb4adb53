use crate::config::schema::ConfigDef;
use crate::config::{validate_config, CalculationConfig};
use crate::error::BiogasError;

/// Default separation proportions, yield factors and top-N setting.
pub fn default_config() -> Result<CalculationConfig, BiogasError> {
    validate_config(&ConfigDef::default())
}

/// The default configuration rendered as JSON, suitable as a starting file.
pub fn default_config_json() -> Result<String, BiogasError> {
    Ok(serde_json::to_string_pretty(&ConfigDef::default())?)
}
