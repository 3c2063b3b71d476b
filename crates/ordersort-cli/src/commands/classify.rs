use ordersort_core::error::OrderSortError;
use ordersort_core::export::{self, ExportLayout, ExportOptions};
use ordersort_core::extraction::reader_for_path;
use ordersort_core::rules::builtin;
use ordersort_core::ClassifyOptions;
use std::path::{Path, PathBuf};

use crate::output;
use crate::Layout;

pub struct ClassifyArgs {
    pub input_file: PathBuf,
    pub settings: Option<PathBuf>,
    pub preset: String,
    pub filter_star: bool,
    pub output_format: String,
    pub export: Option<PathBuf>,
    pub layout: Layout,
    pub all_sheet: bool,
    pub keep_classification: bool,
}

pub fn run(args: ClassifyArgs) -> Result<(), OrderSortError> {
    // A settings file wins over the preset
    let ruleset = match &args.settings {
        Some(path) => ordersort_core::rules::load_ruleset(path)?,
        None => builtin::load_preset(&args.preset)?,
    };

    let reader = reader_for_path(&args.input_file)?;
    let bytes = std::fs::read(&args.input_file)?;
    let options = ClassifyOptions {
        filter_star_delivery: args.filter_star,
    };
    let result = ordersort_core::classify_bytes(&bytes, reader.as_ref(), &ruleset, &options)?;

    match args.output_format.as_str() {
        "json" => output::json::print(&result.stats)?,
        _ => output::table::print(&result.stats),
    }

    if let Some(path) = &args.export {
        let export_options = ExportOptions {
            layout: match args.layout {
                Layout::Single => ExportLayout::Single,
                Layout::PerWorker => ExportLayout::PerWorker {
                    include_all: args.all_sheet,
                },
            },
            include_classification: args.keep_classification,
        };
        let workbook = export::build_workbook(&result, &export_options);
        write_export(path, &workbook)?;
    }

    Ok(())
}

/// `.xlsx` and `.json` get the whole workbook, `.csv` the first sheet,
/// anything else is treated as a directory of per-sheet CSV files.
fn write_export(path: &Path, workbook: &export::ExportWorkbook) -> Result<(), OrderSortError> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_lowercase);

    match ext.as_deref() {
        Some("xlsx") => {
            export::xlsx::write_workbook(path, workbook)?;
            eprintln!(
                "Exported {} sheet(s) to {}",
                workbook.sheets.len(),
                path.display()
            );
        }
        Some("json") => {
            std::fs::write(path, serde_json::to_string_pretty(workbook)?)?;
            eprintln!(
                "Exported {} sheet(s) to {}",
                workbook.sheets.len(),
                path.display()
            );
        }
        Some("csv") => {
            if workbook.sheets.len() > 1 {
                tracing::warn!(
                    sheets = workbook.sheets.len(),
                    "csv export holds one sheet, writing only the first"
                );
            }
            if let Some(sheet) = workbook.sheets.first() {
                let file = std::fs::File::create(path)?;
                export::delimited::write_sheet(file, sheet)?;
                eprintln!("Exported {} row(s) to {}", sheet.rows.len(), path.display());
            }
        }
        _ => {
            let written = export::delimited::write_workbook_dir(path, workbook)?;
            eprintln!("Exported {} sheet(s) to {}", written.len(), path.display());
            for p in &written {
                eprintln!("  {}", p.display());
            }
        }
    }

    Ok(())
}
