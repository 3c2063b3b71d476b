use crate::classify::matcher::first_match;
use crate::classify::outcome::{Assignment, ClassifiedRow, REASON_BULK, REASON_CO_SHIPMENT};
use crate::model::OrderRow;
use crate::rules::Policy;
use std::collections::HashMap;

/// Assign every row to exactly one worker.
///
/// Tiers run in a fixed order and only touch rows still in the fallback
/// bucket, so an earlier tier's decision is never revisited:
/// 1. co-shipment: the row's order id is shared by two or more rows
/// 2. bulk: quantity at or above the threshold
/// 3. product rules: first matching rule in compiled order
pub fn classify_rows(rows: Vec<OrderRow>, policy: &Policy) -> Vec<ClassifiedRow> {
    let mut classified: Vec<ClassifiedRow> = rows
        .into_iter()
        .map(|row| ClassifiedRow {
            row,
            assignment: Assignment::unmatched(&policy.failed_worker),
        })
        .collect();

    if let Some(worker) = &policy.co_shipment_worker {
        let hits = assign_co_shipment(&mut classified, worker);
        tracing::debug!(worker = %worker, rows = hits, "co-shipment tier");
    }

    if let Some(worker) = &policy.bulk_worker {
        let hits = assign_bulk(&mut classified, worker, policy.quantity_threshold);
        tracing::debug!(worker = %worker, rows = hits, "bulk tier");
    }

    let hits = assign_product_rules(&mut classified, policy);
    tracing::debug!(rules = policy.rules.len(), rows = hits, "product rule tier");

    classified
}

fn assign_co_shipment(rows: &mut [ClassifiedRow], worker: &str) -> usize {
    let mut group_sizes: HashMap<&str, usize> = HashMap::new();
    for r in rows.iter() {
        *group_sizes.entry(r.row.order_group_id.as_str()).or_default() += 1;
    }
    let shared: Vec<bool> = rows
        .iter()
        .map(|r| group_sizes[r.row.order_group_id.as_str()] >= 2)
        .collect();

    let mut hits = 0;
    for (r, is_shared) in rows.iter_mut().zip(shared) {
        if is_shared && !r.assignment.is_matched() {
            r.assignment = Assignment::matched(worker, REASON_CO_SHIPMENT);
            hits += 1;
        }
    }
    hits
}

fn assign_bulk(rows: &mut [ClassifiedRow], worker: &str, threshold: i64) -> usize {
    let mut hits = 0;
    for r in rows.iter_mut() {
        if !r.assignment.is_matched() && r.row.quantity >= threshold {
            r.assignment = Assignment::matched(worker, REASON_BULK);
            hits += 1;
        }
    }
    hits
}

fn assign_product_rules(rows: &mut [ClassifiedRow], policy: &Policy) -> usize {
    if policy.rules.is_empty() {
        return 0;
    }
    let mut hits = 0;
    for r in rows.iter_mut().filter(|r| !r.assignment.is_matched()) {
        if let Some(rule) = first_match(&policy.rules, &r.row, policy.brand_match) {
            r.assignment = Assignment::matched(&rule.worker, &rule.reason);
            hits += 1;
        }
    }
    hits
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::outcome::REASON_NO_MATCH;
    use crate::parsing::extract_brand;
    use crate::rules::compile;
    use crate::rules::parse_ruleset_str;

    fn make_policy() -> Policy {
        let json = r#"{
            "worker_order": ["W1", "W2", "합배송", "복수주문", "분류실패"],
            "worker_config": {
                "W1": { "type": "product_specific", "products": [
                    { "brand": "Acme", "product_name": "Widget", "order_option": "All" }
                ]},
                "W2": { "type": "product_specific", "products": [
                    { "brand": "Acme", "product_name": "All", "order_option": "All" },
                    { "brand": "Zeta", "product_name": "All", "order_option": "All" }
                ]},
                "합배송": { "type": "mixed_products" },
                "복수주문": { "type": "multiple_quantity" },
                "분류실패": { "type": "failed" }
            },
            "quantity_threshold": 2
        }"#;
        compile(&parse_ruleset_str(json).unwrap()).unwrap()
    }

    fn row(index: usize, product_name: &str, quantity: i64, group: &str) -> OrderRow {
        OrderRow {
            index,
            product_name: product_name.into(),
            quantity,
            order_option: String::new(),
            order_group_id: group.into(),
            brand: extract_brand(product_name),
            full_name: format!("{product_name} "),
            cells: vec![],
        }
    }

    fn workers(rows: &[ClassifiedRow]) -> Vec<&str> {
        rows.iter().map(|r| r.assignment.worker.as_str()).collect()
    }

    #[test]
    fn test_shared_order_id_goes_to_co_shipment() {
        let rows = vec![
            row(0, "Acme Widget", 1, "O1"),
            row(1, "Zeta Gadget", 1, "O1"),
            row(2, "Acme Widget", 1, "O2"),
        ];
        let result = classify_rows(rows, &make_policy());
        assert_eq!(workers(&result), vec!["합배송", "합배송", "W1"]);
        assert_eq!(result[0].assignment.reason, "co-shipment");
        assert_eq!(result[0].assignment.confidence, 1.0);
    }

    #[test]
    fn test_single_row_with_high_quantity_is_bulk_not_co_shipment() {
        let rows = vec![row(0, "Acme Widget", 10, "O1")];
        let result = classify_rows(rows, &make_policy());
        assert_eq!(workers(&result), vec!["복수주문"]);
        assert_eq!(result[0].assignment.reason, "bulk order");
    }

    #[test]
    fn test_co_shipment_wins_over_bulk() {
        let rows = vec![row(0, "Acme Widget", 5, "O1"), row(1, "Acme Widget", 1, "O1")];
        let result = classify_rows(rows, &make_policy());
        assert_eq!(workers(&result), vec!["합배송", "합배송"]);
    }

    #[test]
    fn test_first_rule_in_worker_order_wins() {
        let rows = vec![
            row(0, "Acme Widget", 1, "O1"),
            row(1, "Acme Gadget", 1, "O2"),
            row(2, "Zeta Gadget", 1, "O3"),
        ];
        let result = classify_rows(rows, &make_policy());
        assert_eq!(workers(&result), vec!["W1", "W2", "W2"]);
        assert_eq!(result[0].assignment.reason, "matched: Acme Widget");
        assert_eq!(result[2].assignment.reason, "matched: Zeta All");
    }

    #[test]
    fn test_unmatched_rows_stay_in_fallback() {
        let rows = vec![row(0, "Nobody Knows", 1, "O1")];
        let result = classify_rows(rows, &make_policy());
        assert_eq!(workers(&result), vec!["분류실패"]);
        assert_eq!(result[0].assignment.reason, REASON_NO_MATCH);
        assert_eq!(result[0].assignment.confidence, 0.0);
    }

    #[test]
    fn test_threshold_boundary() {
        let rows = vec![row(0, "Nobody A", 2, "O1"), row(1, "Nobody B", 1, "O2")];
        let result = classify_rows(rows, &make_policy());
        assert_eq!(workers(&result), vec!["복수주문", "분류실패"]);
    }

    #[test]
    fn test_missing_system_tiers_are_skipped() {
        let json = r#"{
            "worker_order": ["W1", "분류실패"],
            "worker_config": {
                "W1": { "type": "product_specific", "products": [
                    { "brand": "Acme", "product_name": "All" }
                ]}
            }
        }"#;
        let policy = compile(&parse_ruleset_str(json).unwrap()).unwrap();
        let rows = vec![
            row(0, "Acme Widget", 9, "O1"),
            row(1, "Zeta Gadget", 1, "O1"),
        ];
        let result = classify_rows(rows, &policy);
        assert_eq!(workers(&result), vec!["W1", "분류실패"]);
    }
}
