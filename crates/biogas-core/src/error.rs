use rust_decimal::Decimal;
use std::fmt;
use std::path::PathBuf;

/// Pipeline stage an error is attributed to when reported to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Configuration,
    Input,
    Purification,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stage::Configuration => write!(f, "configuration"),
            Stage::Input => write!(f, "input"),
            Stage::Purification => write!(f, "purification"),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum BiogasError {
    #[error("failed to load configuration from {path}: {reason}")]
    ConfigLoad { path: PathBuf, reason: String },

    #[error("invalid configuration: {0}")]
    ConfigInvalid(String),

    #[error("failed to read workbook: {0}")]
    Workbook(String),

    #[error("column '{0}' not found in the sheet header")]
    ColumnNotFound(String),

    #[error("no waste records found in input")]
    NoRecords,

    #[error("purification efficiency {0}% is outside the range 0-100")]
    EfficiencyOutOfRange(Decimal),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl BiogasError {
    pub fn stage(&self) -> Stage {
        match self {
            BiogasError::ConfigLoad { .. } | BiogasError::ConfigInvalid(_) => Stage::Configuration,
            BiogasError::EfficiencyOutOfRange(_) => Stage::Purification,
            BiogasError::Workbook(_)
            | BiogasError::ColumnNotFound(_)
            | BiogasError::NoRecords
            | BiogasError::Io(_)
            | BiogasError::Json(_) => Stage::Input,
        }
    }
}
