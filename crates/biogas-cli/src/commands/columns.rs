use biogas_core::error::BiogasError;
use biogas_core::ingest::xlsx;
use std::path::Path;

pub fn run(input_file: &Path, sheet: Option<&str>) -> Result<(), BiogasError> {
    let bytes = std::fs::read(input_file)?;

    let sheets = xlsx::sheet_names(&bytes)?;
    println!("Sheets:");
    for name in &sheets {
        println!("  {name}");
    }

    let columns = xlsx::list_columns(&bytes, sheet)?;
    let shown = sheet
        .map(str::to_string)
        .or_else(|| sheets.first().cloned())
        .unwrap_or_default();
    println!("\nColumns in '{shown}':");
    for (i, col) in columns.iter().enumerate() {
        println!("  {:>2}. {col}", i + 1);
    }

    Ok(())
}
