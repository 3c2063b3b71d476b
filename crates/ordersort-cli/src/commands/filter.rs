use ordersort_core::error::OrderSortError;
use ordersort_core::export::{delimited, ExportSheet, RESULT_SHEET};
use ordersort_core::extraction::reader_for_path;
use ordersort_core::filter::{filter_star_delivery, require_caution_column};
use std::path::PathBuf;

pub fn run(input_file: PathBuf, out: PathBuf) -> Result<(), OrderSortError> {
    let reader = reader_for_path(&input_file)?;
    let bytes = std::fs::read(&input_file)?;
    let table = reader.read_table(&bytes)?;

    // Nothing to filter on: refuse rather than write an unchanged copy
    let col = require_caution_column(&table)?;
    let (filtered, report) = filter_star_delivery(&table);

    let sheet = ExportSheet {
        name: RESULT_SHEET.to_string(),
        headers: filtered.headers,
        rows: filtered.rows,
    };
    let file = std::fs::File::create(&out)?;
    delimited::write_sheet(file, &sheet)?;

    eprintln!(
        "Removed {} of {} row(s) (column '{}'), written to {}",
        report.deleted,
        report.original_count,
        table.headers[col],
        out.display()
    );

    Ok(())
}
