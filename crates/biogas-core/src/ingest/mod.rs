pub mod json;
pub mod values;
pub mod xlsx;

use serde::{Deserialize, Serialize};

use crate::model::WasteRecord;

/// Header names of the four survey columns the pipeline reads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnMapping {
    pub municipality: String,
    pub total: String,
    pub domestic_public: String,
    pub pruning: String,
}

impl Default for ColumnMapping {
    fn default() -> Self {
        Self {
            municipality: "Municipality".into(),
            total: "Total".into(),
            domestic_public: "Domestic+Public".into(),
            pruning: "Pruning".into(),
        }
    }
}

/// A cell or row that could not be used as-is.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IngestWarning {
    /// 1-based spreadsheet row number, or 1-based position in a JSON array.
    pub row: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub column: Option<String>,
    pub message: String,
}

/// Records read from a survey sheet or JSON file, plus what was coerced or
/// skipped.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ParsedDataset {
    pub records: Vec<WasteRecord>,
    pub warnings: Vec<IngestWarning>,
}
