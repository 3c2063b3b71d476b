use ordersort_core::error::OrderSortError;
use ordersort_core::stats::ClassificationStats;

pub fn print(stats: &ClassificationStats) -> Result<(), OrderSortError> {
    let json = serde_json::to_string_pretty(stats)?;
    println!("{json}");
    Ok(())
}
