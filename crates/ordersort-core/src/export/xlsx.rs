use crate::error::OrderSortError;
use crate::export::{ExportSheet, ExportWorkbook};
use crate::model::Cell;
use rust_xlsxwriter::{Workbook, Worksheet};
use std::path::Path;

/// Excel row limit, header row included.
const MAX_ROWS: usize = 1_048_576;
/// Excel column limit.
const MAX_COLS: usize = 16_384;

/// Write every sheet of `workbook` into one .xlsx file at `path`.
pub fn write_workbook(path: &Path, workbook: &ExportWorkbook) -> Result<(), OrderSortError> {
    let mut book = build(workbook)?;
    book.save(path)?;
    tracing::debug!(path = %path.display(), sheets = workbook.sheets.len(), "wrote xlsx workbook");
    Ok(())
}

/// Render `workbook` as .xlsx bytes.
pub fn workbook_bytes(workbook: &ExportWorkbook) -> Result<Vec<u8>, OrderSortError> {
    let mut book = build(workbook)?;
    Ok(book.save_to_buffer()?)
}

fn build(workbook: &ExportWorkbook) -> Result<Workbook, OrderSortError> {
    let mut book = Workbook::new();
    for sheet in &workbook.sheets {
        let worksheet = book.add_worksheet();
        worksheet.set_name(sheet.name.as_str())?;
        write_sheet(worksheet, sheet)?;
    }
    Ok(book)
}

fn write_sheet(worksheet: &mut Worksheet, sheet: &ExportSheet) -> Result<(), OrderSortError> {
    if sheet.rows.len() + 1 > MAX_ROWS {
        return Err(OrderSortError::Export(format!(
            "sheet '{}' has {} rows, more than a worksheet holds",
            sheet.name,
            sheet.rows.len()
        )));
    }
    let width = sheet
        .rows
        .iter()
        .map(Vec::len)
        .chain(std::iter::once(sheet.headers.len()))
        .max()
        .unwrap_or(0);
    if width > MAX_COLS {
        return Err(OrderSortError::Export(format!(
            "sheet '{}' has {} columns, more than a worksheet holds",
            sheet.name, width
        )));
    }

    for (col, header) in sheet.headers.iter().enumerate() {
        worksheet.write_string(0, col as u16, header.as_str())?;
    }
    for (i, cells) in sheet.rows.iter().enumerate() {
        let row = (i + 1) as u32;
        for (col, cell) in cells.iter().enumerate() {
            let col = col as u16;
            match cell {
                Cell::Empty => {}
                Cell::Bool(b) => {
                    worksheet.write_boolean(row, col, *b)?;
                }
                Cell::Int(v) => {
                    worksheet.write_number(row, col, *v as f64)?;
                }
                Cell::Float(v) => {
                    worksheet.write_number(row, col, *v)?;
                }
                Cell::Text(s) => {
                    worksheet.write_string(row, col, s.as_str())?;
                }
            }
        }
    }
    Ok(())
}
