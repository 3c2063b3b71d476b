use crate::error::OrderSortError;
use crate::model::OrderTable;
use serde::{Deserialize, Serialize};

/// Caution-message prefix that marks seller-fulfilled ("star delivery") orders.
pub const STAR_DELIVERY_PREFIX: &str = "판매자 스타배송";

/// Header reported when a sheet has no caution-message column.
pub const CAUTION_COLUMN: &str = "주의메세지";

/// Outcome of the star-delivery pre-filter.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StarFilterReport {
    /// Header of the caution-message column, if the sheet has one.
    pub column: Option<String>,
    pub original_count: usize,
    pub deleted: usize,
}

/// The caution-message column: first header containing both "주의" and "메".
pub fn find_caution_column(table: &OrderTable) -> Option<usize> {
    table
        .headers
        .iter()
        .position(|h| h.contains("주의") && h.contains('메'))
}

/// Like [`find_caution_column`], but a missing column is an error.
pub fn require_caution_column(table: &OrderTable) -> Result<usize, OrderSortError> {
    find_caution_column(table).ok_or_else(|| OrderSortError::MissingColumn {
        column: CAUTION_COLUMN.to_string(),
    })
}

/// Drop rows whose caution message starts with the star-delivery prefix.
///
/// A sheet without a caution-message column passes through unchanged.
pub fn filter_star_delivery(table: &OrderTable) -> (OrderTable, StarFilterReport) {
    let original_count = table.len();
    let Some(col) = find_caution_column(table) else {
        return (
            table.clone(),
            StarFilterReport {
                column: None,
                original_count,
                deleted: 0,
            },
        );
    };

    let rows: Vec<_> = table
        .rows
        .iter()
        .enumerate()
        .filter(|(i, _)| !table.cell(*i, col).to_string().starts_with(STAR_DELIVERY_PREFIX))
        .map(|(_, r)| r.clone())
        .collect();
    let deleted = original_count - rows.len();

    tracing::info!(
        column = %table.headers[col],
        deleted,
        original = original_count,
        "star-delivery filter"
    );

    (
        OrderTable::new(table.headers.clone(), rows),
        StarFilterReport {
            column: Some(table.headers[col].clone()),
            original_count,
            deleted,
        },
    )
}
