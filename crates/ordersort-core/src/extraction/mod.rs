pub mod delimited;
pub mod xlsx;

use crate::error::OrderSortError;
use crate::model::OrderTable;
use std::path::Path;

/// Trait for order sheet readers.
pub trait TableReader: Send + Sync {
    /// Read the file's bytes into a header row plus data rows.
    fn read_table(&self, bytes: &[u8]) -> Result<OrderTable, OrderSortError>;

    /// Name of this reader (for diagnostics).
    fn backend_name(&self) -> &str;
}

/// Pick a reader from the file extension.
pub fn reader_for_path(path: &Path) -> Result<Box<dyn TableReader>, OrderSortError> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase();

    match ext.as_str() {
        "xlsx" | "xls" | "xlsm" => Ok(Box::new(xlsx::XlsxReader)),
        "csv" => Ok(Box::new(delimited::CsvReader)),
        "" => Err(OrderSortError::UnsupportedInput(format!(
            "'{}' has no file extension",
            path.display()
        ))),
        other => Err(OrderSortError::UnsupportedInput(format!(".{other}"))),
    }
}
