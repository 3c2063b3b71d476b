use std::io::Cursor;

use calamine::{Data, Reader};

use crate::error::OrderSortError;
use crate::extraction::TableReader;
use crate::model::{Cell, OrderTable};

/// Spreadsheet reader for .xlsx/.xlsm/.xls order exports.
///
/// Reads the first worksheet; row 1 is the header row. Fully blank data rows
/// are dropped.
pub struct XlsxReader;

impl TableReader for XlsxReader {
    fn read_table(&self, bytes: &[u8]) -> Result<OrderTable, OrderSortError> {
        let cursor = Cursor::new(bytes);
        let mut workbook = calamine::open_workbook_auto_from_rs(cursor)
            .map_err(|e| OrderSortError::ParseError(format!("failed to open workbook: {e}")))?;

        let sheet = workbook
            .worksheet_range_at(0)
            .ok_or_else(|| OrderSortError::ParseError("workbook has no worksheets".into()))?
            .map_err(|e| OrderSortError::ParseError(format!("failed to read first sheet: {e}")))?;

        let mut rows = sheet.rows();
        let headers: Vec<String> = match rows.next() {
            Some(header_row) => header_row
                .iter()
                .map(|c| data_to_cell(c).to_string().trim().to_string())
                .collect(),
            None => {
                return Err(OrderSortError::ParseError(
                    "first sheet is empty (no header row)".into(),
                ))
            }
        };

        let mut data = Vec::new();
        for row in rows {
            let cells: Vec<Cell> = row.iter().map(data_to_cell).collect();
            if cells.iter().all(Cell::is_empty) {
                continue;
            }
            data.push(cells);
        }

        tracing::debug!(columns = headers.len(), rows = data.len(), "read xlsx sheet");

        Ok(OrderTable::new(headers, data))
    }

    fn backend_name(&self) -> &str {
        "calamine"
    }
}

fn data_to_cell(cell: &Data) -> Cell {
    match cell {
        Data::Empty => Cell::Empty,
        Data::String(s) => Cell::Text(s.clone()),
        Data::Int(i) => Cell::Int(*i),
        Data::Float(f) => Cell::Float(*f),
        Data::Bool(b) => Cell::Bool(*b),
        // Dates, durations and error cells keep their display text.
        other => Cell::Text(other.to_string()),
    }
}
