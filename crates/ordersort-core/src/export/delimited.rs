use crate::error::OrderSortError;
use crate::export::{ExportSheet, ExportWorkbook};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Write one sheet as CSV: header row, then data rows.
pub fn write_sheet<W: Write>(writer: W, sheet: &ExportSheet) -> Result<(), OrderSortError> {
    let mut csv_writer = csv::WriterBuilder::new().flexible(true).from_writer(writer);
    csv_writer.write_record(&sheet.headers)?;
    for row in &sheet.rows {
        csv_writer.write_record(row.iter().map(|c| c.to_string()))?;
    }
    csv_writer.flush()?;
    Ok(())
}

/// Write every sheet to `<dir>/<sheet name>.csv`, creating `dir` if needed.
///
/// Returns the written paths in sheet order.
pub fn write_workbook_dir(dir: &Path, workbook: &ExportWorkbook) -> Result<Vec<PathBuf>, OrderSortError> {
    std::fs::create_dir_all(dir)?;
    let mut written = Vec::with_capacity(workbook.sheets.len());
    for sheet in &workbook.sheets {
        let path = dir.join(format!("{}.csv", file_stem(&sheet.name)));
        let file = std::fs::File::create(&path)?;
        write_sheet(file, sheet)?;
        tracing::debug!(path = %path.display(), rows = sheet.rows.len(), "wrote sheet");
        written.push(path);
    }
    Ok(written)
}

fn file_stem(sheet_name: &str) -> String {
    sheet_name
        .chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            c => c,
        })
        .collect()
}
