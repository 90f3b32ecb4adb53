use serde::Deserialize;
use serde_json::Value;

use crate::error::BiogasError;
use crate::ingest::values::coerce_text;
use crate::ingest::{IngestWarning, ParsedDataset};
use crate::model::{Quantity, WasteRecord};

/// One element of a JSON record array before coercion. Quantities may be
/// strings, numbers or null; missing fields are null.
#[derive(Debug, Deserialize)]
struct RawRecord {
    #[serde(default)]
    municipality: Option<String>,
    #[serde(default)]
    total: Value,
    #[serde(default)]
    domestic_public: Value,
    #[serde(default)]
    pruning: Value,
}

/// Read survey records from a JSON array of objects.
///
/// Applies the same rules as the workbook reader: records without a
/// municipality are skipped, and quantities that are not non-negative
/// numbers become unknown. Both are reported as warnings whose `row` is the
/// 1-based position in the array.
pub fn read_json_records(bytes: &[u8]) -> Result<ParsedDataset, BiogasError> {
    let raw: Vec<RawRecord> = serde_json::from_slice(bytes)?;
    let mut dataset = ParsedDataset::default();

    for (i, record) in raw.into_iter().enumerate() {
        let row_number = i + 1;

        let municipality = match record.municipality {
            Some(name) if !name.trim().is_empty() => name,
            _ => {
                tracing::warn!(row = row_number, "skipping record without municipality");
                dataset.warnings.push(IngestWarning {
                    row: row_number,
                    column: Some("municipality".into()),
                    message: "record has no municipality and was skipped".into(),
                });
                continue;
            }
        };

        let fields = [
            ("total", &record.total),
            ("domestic_public", &record.domestic_public),
            ("pruning", &record.pruning),
        ];
        let mut quantities = [Quantity::Unknown; 3];
        for (slot, (field, value)) in quantities.iter_mut().zip(fields) {
            *slot = value_as_quantity(value);
            if slot.is_unknown() {
                if let Some(raw) = value_as_string(value) {
                    tracing::debug!(row = row_number, column = field, raw = %raw, "value coerced to unknown");
                    dataset.warnings.push(IngestWarning {
                        row: row_number,
                        column: Some(field.to_string()),
                        message: format!("'{raw}' is not a non-negative number, treated as unknown"),
                    });
                }
            }
        }

        let [total, domestic_public, pruning] = quantities;
        dataset.records.push(WasteRecord {
            municipality,
            total,
            domestic_public,
            pruning,
        });
    }

    if dataset.records.is_empty() {
        return Err(BiogasError::NoRecords);
    }

    if !dataset.warnings.is_empty() {
        tracing::warn!(
            warnings = dataset.warnings.len(),
            records = dataset.records.len(),
            "some survey values could not be used as-is"
        );
    }

    Ok(dataset)
}

fn value_as_quantity(value: &Value) -> Quantity {
    match value {
        Value::String(s) => coerce_text(s),
        // The number's JSON text keeps its exact digits.
        Value::Number(n) => coerce_text(&n.to_string()),
        _ => Quantity::Unknown,
    }
}

fn value_as_string(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) if s.trim().is_empty() => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}
