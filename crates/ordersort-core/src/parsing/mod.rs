pub mod columns;
pub mod values;

use crate::error::OrderSortError;
use crate::model::{Cell, OrderRow, OrderTable};
use values::parse_quantity;

/// Turn a raw order sheet into fully populated order rows.
///
/// Only a structurally absent product-name column is fatal. Every other gap
/// is filled with a default:
/// - quantity column absent -> 1 for every row; unparseable cells -> 0
/// - option column absent -> empty string
/// - group id, per row: non-blank unique order id, else non-blank order
///   number, else the row index
pub fn preprocess(table: &OrderTable) -> Result<Vec<OrderRow>, OrderSortError> {
    let product_col =
        table
            .find_column(columns::PRODUCT_NAME)
            .ok_or_else(|| OrderSortError::MissingColumn {
                column: columns::product_name_label(),
            })?;
    let quantity_col = table.find_column(columns::QUANTITY);
    let option_col = table.find_column(columns::ORDER_OPTION);
    let unique_col = table.find_column(columns::ORDER_UNIQUE_ID);
    let number_col = table.find_column(columns::ORDER_NUMBER);

    let mut coerced = 0usize;
    let mut rows = Vec::with_capacity(table.len());

    for (index, cells) in table.rows.iter().enumerate() {
        let product_name = text_at(table, index, product_col);

        let quantity = match quantity_col {
            Some(col) => {
                let cell = table.cell(index, col);
                parse_quantity(cell).unwrap_or_else(|| {
                    coerced += 1;
                    tracing::debug!(row = index, value = %cell, "unparseable quantity coerced to 0");
                    0
                })
            }
            None => 1,
        };

        let order_option = option_col
            .map(|col| text_at(table, index, col))
            .unwrap_or_default();

        let order_group_id = [unique_col, number_col]
            .into_iter()
            .flatten()
            .map(|col| text_at(table, index, col).trim().to_string())
            .find(|id| !id.is_empty())
            .unwrap_or_else(|| index.to_string());

        let brand = extract_brand(&product_name);
        let full_name = format!("{product_name} {order_option}");

        rows.push(OrderRow {
            index,
            product_name,
            quantity,
            order_option,
            order_group_id,
            brand,
            full_name,
            cells: cells.clone(),
        });
    }

    if coerced > 0 {
        tracing::warn!(rows = coerced, "quantity values could not be parsed and were set to 0");
    }
    if unique_col.is_none() && number_col.is_none() {
        tracing::debug!("no order id column; every row is its own order");
    }

    Ok(rows)
}

/// First whitespace-delimited token of a product name.
pub fn extract_brand(product_name: &str) -> String {
    product_name
        .split_whitespace()
        .next()
        .unwrap_or_default()
        .to_string()
}

fn text_at(table: &OrderTable, row: usize, col: usize) -> String {
    match table.cell(row, col) {
        Cell::Empty => String::new(),
        cell => cell.to_string(),
    }
}
