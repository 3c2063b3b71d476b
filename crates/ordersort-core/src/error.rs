use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum OrderSortError {
    #[error("required column '{column}' not found in order sheet")]
    MissingColumn { column: String },

    #[error("failed to read order sheet: {0}")]
    ParseError(String),

    #[error("unsupported input: {0}. Supported formats are .xlsx, .xls, .xlsm and .csv")]
    UnsupportedInput(String),

    #[error("failed to load ruleset from {path}: {reason}")]
    RulesetLoad { path: PathBuf, reason: String },

    #[error("invalid ruleset: {0}")]
    RulesetInvalid(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("XLSX error: {0}")]
    Xlsx(#[from] rust_xlsxwriter::XlsxError),

    #[error("export failed: {0}")]
    Export(String),
}
