//! Recognised column headers of an order sheet.
//!
//! The marketplace export uses Korean headers; the English names are accepted
//! for hand-made sheets and tests. Lookup is exact after trimming.

pub const PRODUCT_NAME: &[&str] = &["상품명", "product_name"];
pub const QUANTITY: &[&str] = &["주문수량", "quantity"];
pub const ORDER_OPTION: &[&str] = &["주문선택사항", "order_option"];
pub const ORDER_UNIQUE_ID: &[&str] = &["주문고유번호", "order_unique_id"];
pub const ORDER_NUMBER: &[&str] = &["주문번호", "order_number"];

/// Header reported in `MissingColumn` when no product-name column exists.
pub fn product_name_label() -> String {
    PRODUCT_NAME[0].to_string()
}
