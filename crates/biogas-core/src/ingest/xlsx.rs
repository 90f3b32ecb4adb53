use std::io::Cursor;

use calamine::{Data, Range, Reader, Xlsx};

use crate::error::BiogasError;
use crate::ingest::values::{coerce_integer, coerce_number, coerce_text};
use crate::ingest::{ColumnMapping, IngestWarning, ParsedDataset};
use crate::model::{Quantity, WasteRecord};

/// Names of all sheets in an xlsx workbook.
pub fn sheet_names(bytes: &[u8]) -> Result<Vec<String>, BiogasError> {
    let workbook = open_workbook(bytes)?;
    Ok(workbook.sheet_names())
}

/// Header row of a sheet (the first sheet when `sheet` is `None`).
pub fn list_columns(bytes: &[u8], sheet: Option<&str>) -> Result<Vec<String>, BiogasError> {
    let range = open_sheet(bytes, sheet)?;
    let header = match range.rows().next() {
        Some(row) => row,
        None => return Ok(Vec::new()),
    };
    Ok(header.iter().filter_map(cell_as_string).collect())
}

/// Read survey records from a sheet.
///
/// The first row is the header; `mapping` names the four columns to use.
/// Rows without a municipality are skipped, and cells that are not usable
/// numbers are kept as unknown. Both are reported as warnings.
pub fn read_xlsx(
    bytes: &[u8],
    sheet: Option<&str>,
    mapping: &ColumnMapping,
) -> Result<ParsedDataset, BiogasError> {
    let range = open_sheet(bytes, sheet)?;
    let first_row = range.start().map(|(row, _)| row as usize).unwrap_or(0);

    let mut rows = range.rows();
    let header: Vec<Option<String>> = match rows.next() {
        Some(row) => row.iter().map(cell_as_string).collect(),
        None => return Err(BiogasError::NoRecords),
    };

    let find = |name: &str| -> Result<usize, BiogasError> {
        header
            .iter()
            .position(|h| h.as_deref() == Some(name))
            .ok_or_else(|| BiogasError::ColumnNotFound(name.to_string()))
    };
    let municipality_col = find(&mapping.municipality)?;
    let quantity_cols = [
        (find(&mapping.total)?, mapping.total.as_str()),
        (find(&mapping.domestic_public)?, mapping.domestic_public.as_str()),
        (find(&mapping.pruning)?, mapping.pruning.as_str()),
    ];

    let mut dataset = ParsedDataset::default();

    for (i, row) in rows.enumerate() {
        // Header occupies the first row of the range; spreadsheet rows are 1-based.
        let row_number = first_row + i + 2;

        if row.iter().all(|c| matches!(c, Data::Empty)) {
            continue;
        }

        let municipality = match row.get(municipality_col).and_then(cell_as_string) {
            Some(name) => name,
            None => {
                tracing::warn!(row = row_number, "skipping row without municipality");
                dataset.warnings.push(IngestWarning {
                    row: row_number,
                    column: Some(mapping.municipality.clone()),
                    message: "row has no municipality and was skipped".into(),
                });
                continue;
            }
        };

        let mut quantities = [Quantity::Unknown; 3];
        for (slot, (col, col_name)) in quantities.iter_mut().zip(quantity_cols.iter()) {
            let cell = row.get(*col);
            *slot = cell_as_quantity(cell);
            if slot.is_unknown() {
                if let Some(raw) = cell.and_then(cell_as_string) {
                    tracing::debug!(row = row_number, column = %col_name, raw = %raw, "cell coerced to unknown");
                    dataset.warnings.push(IngestWarning {
                        row: row_number,
                        column: Some((*col_name).to_string()),
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
            "some survey cells could not be used as-is"
        );
    }

    Ok(dataset)
}

fn open_workbook(bytes: &[u8]) -> Result<Xlsx<Cursor<&[u8]>>, BiogasError> {
    let cursor = Cursor::new(bytes);
    calamine::open_workbook_from_rs(cursor)
        .map_err(|e: calamine::XlsxError| BiogasError::Workbook(format!("failed to open xlsx: {e}")))
}

fn open_sheet(bytes: &[u8], sheet: Option<&str>) -> Result<Range<Data>, BiogasError> {
    let mut workbook = open_workbook(bytes)?;
    match sheet {
        Some(name) => workbook
            .worksheet_range(name)
            .map_err(|e| BiogasError::Workbook(format!("sheet '{name}' not found: {e}"))),
        None => workbook
            .worksheet_range_at(0)
            .ok_or_else(|| BiogasError::Workbook("workbook has no sheets".into()))?
            .map_err(|e| BiogasError::Workbook(format!("failed to read first sheet: {e}"))),
    }
}

fn cell_as_string(cell: &Data) -> Option<String> {
    match cell {
        Data::String(s) => {
            if s.trim().is_empty() {
                None
            } else {
                Some(s.clone())
            }
        }
        Data::Float(f) => Some(f.to_string()),
        Data::Int(i) => Some(i.to_string()),
        Data::Empty => None,
        _ => Some(format!("{cell}")),
    }
}

fn cell_as_quantity(cell: Option<&Data>) -> Quantity {
    match cell {
        Some(Data::Float(f)) => coerce_number(*f),
        Some(Data::Int(i)) => coerce_integer(*i),
        Some(Data::String(s)) => coerce_text(s),
        _ => Quantity::Unknown,
    }
}
