pub mod delimited;
pub mod xlsx;

use crate::classify::outcome::{ClassificationResult, ClassifiedRow};
use crate::model::Cell;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Name of the single-sheet export, and of the all-rows sheet.
pub const RESULT_SHEET: &str = "분류결과";

/// Spreadsheet limit on sheet name length, in characters.
pub const MAX_SHEET_NAME: usize = 31;

pub const COL_ASSIGNED_WORKER: &str = "assigned_worker";
pub const COL_MATCH_REASON: &str = "match_reason";
pub const COL_CONFIDENCE: &str = "confidence";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExportLayout {
    /// Every row on one sheet, in priority order.
    #[default]
    Single,
    /// One sheet per worker with rows, optionally preceded by an all-rows sheet.
    PerWorker { include_all: bool },
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportOptions {
    pub layout: ExportLayout,
    /// Append assigned_worker / match_reason / confidence columns.
    pub include_classification: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportSheet {
    pub name: String,
    pub headers: Vec<String>,
    pub rows: Vec<Vec<Cell>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportWorkbook {
    pub sheets: Vec<ExportSheet>,
}

/// Shape classified rows into exportable sheets.
///
/// Rows carry only their source columns; working values such as brand and
/// the sort key never reach the sheet.
pub fn build_workbook(result: &ClassificationResult, options: &ExportOptions) -> ExportWorkbook {
    let headers = export_headers(&result.headers, options.include_classification);
    let sheet = |name: String, rows: Vec<&ClassifiedRow>| ExportSheet {
        name,
        headers: headers.clone(),
        rows: rows
            .into_iter()
            .map(|r| export_row(r, result.headers.len(), options.include_classification))
            .collect(),
    };

    let mut sheets = Vec::new();
    match options.layout {
        ExportLayout::Single => {
            sheets.push(sheet(RESULT_SHEET.to_string(), result.rows.iter().collect()));
        }
        ExportLayout::PerWorker { include_all } => {
            let mut used = HashSet::new();
            if include_all {
                used.insert(RESULT_SHEET.to_string());
                sheets.push(sheet(RESULT_SHEET.to_string(), result.rows.iter().collect()));
            }
            for worker in result.stats.workers.iter().filter(|w| w.count > 0) {
                let name = unique_sheet_name(&worker.name, &mut used);
                sheets.push(sheet(name, result.rows_for(&worker.name).collect()));
            }
        }
    }

    ExportWorkbook { sheets }
}

fn export_headers(source: &[String], include_classification: bool) -> Vec<String> {
    let mut headers = source.to_vec();
    if include_classification {
        headers.extend(
            [COL_ASSIGNED_WORKER, COL_MATCH_REASON, COL_CONFIDENCE].map(String::from),
        );
    }
    headers
}

fn export_row(r: &ClassifiedRow, width: usize, include_classification: bool) -> Vec<Cell> {
    let mut cells = r.row.cells.clone();
    cells.resize(width, Cell::Empty);
    if include_classification {
        cells.push(Cell::Text(r.assignment.worker.clone()));
        cells.push(Cell::Text(r.assignment.reason.clone()));
        cells.push(Cell::Float(r.assignment.confidence));
    }
    cells
}

/// Characters a spreadsheet rejects in sheet names.
const INVALID_SHEET_CHARS: &[char] = &['[', ']', ':', '*', '?', '/', '\\'];

/// Replace invalid characters, truncate to the sheet-name limit and resolve
/// collisions with a " (n)" suffix.
pub fn unique_sheet_name(worker: &str, used: &mut HashSet<String>) -> String {
    let worker: String = worker
        .chars()
        .map(|c| if INVALID_SHEET_CHARS.contains(&c) { '_' } else { c })
        .collect();
    let worker = worker.as_str();
    let base = truncate_chars(worker, MAX_SHEET_NAME);
    if used.insert(base.clone()) {
        return base;
    }
    let mut n = 2;
    loop {
        let suffix = format!(" ({n})");
        let candidate = format!(
            "{}{}",
            truncate_chars(worker, MAX_SHEET_NAME - suffix.chars().count()),
            suffix
        );
        if used.insert(candidate.clone()) {
            return candidate;
        }
        n += 1;
    }
}

fn truncate_chars(s: &str, max: usize) -> String {
    s.chars().take(max).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::outcome::Assignment;
    use crate::model::OrderRow;
    use crate::stats::{ClassificationStats, Summary, WorkerStats};
    use rust_decimal::Decimal;

    fn classified(worker: &str, name: &str) -> ClassifiedRow {
        ClassifiedRow {
            row: OrderRow {
                index: 0,
                product_name: name.into(),
                quantity: 1,
                order_option: String::new(),
                order_group_id: "0".into(),
                brand: String::new(),
                full_name: format!("{name} "),
                cells: vec![Cell::from(name)],
            },
            assignment: Assignment::matched(worker, "test"),
        }
    }

    fn worker_stats(name: &str, count: usize) -> WorkerStats {
        WorkerStats {
            name: name.into(),
            count,
            percentage: Decimal::ZERO,
            icon: String::new(),
            range: String::new(),
        }
    }

    fn make_result() -> ClassificationResult {
        let long = "a very long worker name that exceeds the limit";
        ClassificationResult {
            headers: vec!["상품명".into(), "주문수량".into()],
            rows: vec![
                classified("W1", "Acme Widget"),
                classified(long, "Zeta Gadget"),
            ],
            stats: ClassificationStats {
                workers: vec![
                    worker_stats("W1", 1),
                    worker_stats("W2", 0),
                    worker_stats(long, 1),
                ],
                summary: Summary {
                    total_orders: 2,
                    success_count: 2,
                    failed_count: 0,
                    auto_classification_rate: Decimal::ONE_HUNDRED,
                    star_filtered: false,
                    star_deleted: None,
                },
            },
        }
    }

    #[test]
    fn test_single_sheet_strips_classification_by_default() {
        let wb = build_workbook(&make_result(), &ExportOptions::default());
        assert_eq!(wb.sheets.len(), 1);
        let sheet = &wb.sheets[0];
        assert_eq!(sheet.name, "분류결과");
        assert_eq!(sheet.headers, vec!["상품명", "주문수량"]);
        // short source rows padded to header width
        assert_eq!(sheet.rows[0], vec![Cell::from("Acme Widget"), Cell::Empty]);
    }

    #[test]
    fn test_classification_columns_appended_on_request() {
        let options = ExportOptions {
            include_classification: true,
            ..Default::default()
        };
        let wb = build_workbook(&make_result(), &options);
        let sheet = &wb.sheets[0];
        assert_eq!(
            &sheet.headers[2..],
            &["assigned_worker", "match_reason", "confidence"]
        );
        assert_eq!(sheet.rows[0][2], Cell::from("W1"));
        assert_eq!(sheet.rows[0][4], Cell::Float(1.0));
    }

    #[test]
    fn test_per_worker_layout() {
        let options = ExportOptions {
            layout: ExportLayout::PerWorker { include_all: true },
            include_classification: false,
        };
        let wb = build_workbook(&make_result(), &options);
        let names: Vec<&str> = wb.sheets.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names.len(), 3);
        assert_eq!(names[0], "분류결과");
        assert_eq!(names[1], "W1");
        assert_eq!(names[2].chars().count(), 31);
        assert_eq!(wb.sheets[0].rows.len(), 2);
        assert_eq!(wb.sheets[2].rows.len(), 1);
    }

    #[test]
    fn test_sheet_names_truncate_by_character() {
        let mut used = HashSet::new();
        let name = unique_sheet_name(&"배".repeat(40), &mut used);
        assert_eq!(name.chars().count(), 31);
    }

    #[test]
    fn test_invalid_sheet_characters_replaced() {
        let mut used = HashSet::new();
        assert_eq!(unique_sheet_name("A/S [반품]?", &mut used), "A_S _반품__");
    }

    #[test]
    fn test_colliding_truncated_names_get_suffix() {
        let mut used = HashSet::new();
        let a = unique_sheet_name(&format!("{}A", "x".repeat(31)), &mut used);
        let b = unique_sheet_name(&format!("{}B", "x".repeat(31)), &mut used);
        assert_eq!(a, "x".repeat(31));
        assert_eq!(b, format!("{} (2)", "x".repeat(27)));
    }
}
