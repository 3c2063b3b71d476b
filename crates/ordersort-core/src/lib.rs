pub mod classify;
pub mod error;
pub mod export;
pub mod extraction;
pub mod filter;
pub mod model;
pub mod parsing;
pub mod rules;
pub mod stats;

use classify::outcome::ClassificationResult;
use error::OrderSortError;
use extraction::TableReader;
use model::OrderTable;
use rules::schema::RuleSetDef;

/// Options that control classification behavior.
#[derive(Debug, Clone, Default)]
pub struct ClassifyOptions {
    /// Remove star-delivery rows before classifying.
    pub filter_star_delivery: bool,
}

/// Main API entry point: classify an order sheet against a ruleset.
///
/// Pure batch transform: the ruleset is compiled once, then rows go through
/// preprocessing, the tier cascade, priority ordering and statistics. A
/// missing product-name column aborts the whole call; every other gap ends
/// up as a default value or in the fallback bucket.
pub fn classify_table(
    table: &OrderTable,
    ruleset: &RuleSetDef,
    options: &ClassifyOptions,
) -> Result<ClassificationResult, OrderSortError> {
    let policy = rules::compile(ruleset)?;

    let (table, star_report) = if options.filter_star_delivery {
        let (filtered, report) = filter::filter_star_delivery(table);
        if report.column.is_none() {
            tracing::warn!(
                expected = filter::CAUTION_COLUMN,
                "no caution-message column, star-delivery filter removed nothing"
            );
        }
        (std::borrow::Cow::Owned(filtered), Some(report))
    } else {
        (std::borrow::Cow::Borrowed(table), None)
    };

    let rows = parsing::preprocess(&table)?;
    let classified = classify::classify_rows(rows, &policy);
    let sorted = classify::sort_by_priority(classified, &policy);

    let mut stats = stats::compute_stats(&sorted, &policy, ruleset);
    if let Some(report) = star_report {
        stats.summary.star_filtered = true;
        stats.summary.star_deleted = Some(report.deleted);
    }

    tracing::info!(
        total = stats.summary.total_orders,
        failed = stats.summary.failed_count,
        rate = %stats.summary.auto_classification_rate,
        "classified orders"
    );

    Ok(ClassificationResult {
        headers: table.headers.clone(),
        rows: sorted,
        stats,
    })
}

/// Read an order sheet with `reader` and classify it.
pub fn classify_bytes(
    bytes: &[u8],
    reader: &dyn TableReader,
    ruleset: &RuleSetDef,
    options: &ClassifyOptions,
) -> Result<ClassificationResult, OrderSortError> {
    let table = reader.read_table(bytes)?;
    tracing::debug!(backend = reader.backend_name(), rows = table.len(), "read order sheet");
    classify_table(&table, ruleset, options)
}
