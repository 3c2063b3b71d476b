use csv::ReaderBuilder;

use crate::error::OrderSortError;
use crate::extraction::TableReader;
use crate::model::{Cell, OrderTable};

/// CSV reader. Every non-empty field is kept as text; numeric parsing happens
/// during preprocessing.
pub struct CsvReader;

impl TableReader for CsvReader {
    fn read_table(&self, bytes: &[u8]) -> Result<OrderTable, OrderSortError> {
        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(bytes);

        let headers: Vec<String> = reader
            .headers()?
            .iter()
            .map(|h| h.trim_start_matches('\u{feff}').trim().to_string())
            .collect();

        let mut rows = Vec::new();
        for record in reader.records() {
            let record = record?;
            let cells: Vec<Cell> = record
                .iter()
                .map(|v| {
                    if v.is_empty() {
                        Cell::Empty
                    } else {
                        Cell::Text(v.to_string())
                    }
                })
                .collect();
            if cells.iter().all(Cell::is_empty) {
                continue;
            }
            rows.push(cells);
        }

        tracing::debug!(columns = headers.len(), rows = rows.len(), "read csv sheet");

        Ok(OrderTable::new(headers, rows))
    }

    fn backend_name(&self) -> &str {
        "csv"
    }
}
