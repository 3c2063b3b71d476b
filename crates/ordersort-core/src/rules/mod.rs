pub mod builtin;
pub mod policy;
pub mod schema;

use crate::error::OrderSortError;
use schema::{RuleSetDef, WorkerType};
use std::collections::HashSet;
use std::path::Path;

pub use policy::{compile, Policy};

/// Load a ruleset from a JSON file.
pub fn load_ruleset(path: &Path) -> Result<RuleSetDef, OrderSortError> {
    let content = std::fs::read_to_string(path).map_err(|e| OrderSortError::RulesetLoad {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    parse_ruleset(&content, path)
}

/// Parse a ruleset from a JSON string.
pub fn parse_ruleset(json: &str, source: &Path) -> Result<RuleSetDef, OrderSortError> {
    let ruleset: RuleSetDef =
        serde_json::from_str(json).map_err(|e| OrderSortError::RulesetLoad {
            path: source.to_path_buf(),
            reason: e.to_string(),
        })?;
    validate_ruleset(&ruleset)?;
    Ok(ruleset)
}

/// Parse a ruleset from a JSON string (no file path context).
pub fn parse_ruleset_str(json: &str) -> Result<RuleSetDef, OrderSortError> {
    let ruleset: RuleSetDef = serde_json::from_str(json).map_err(OrderSortError::Json)?;
    validate_ruleset(&ruleset)?;
    Ok(ruleset)
}

/// Validate that a ruleset is well-formed.
pub fn validate_ruleset(ruleset: &RuleSetDef) -> Result<(), OrderSortError> {
    if ruleset.worker_order.is_empty() {
        return Err(OrderSortError::RulesetInvalid(
            "worker_order must not be empty".into(),
        ));
    }

    let mut seen = HashSet::new();
    for name in &ruleset.worker_order {
        if name.trim().is_empty() {
            return Err(OrderSortError::RulesetInvalid(
                "worker names must not be empty".into(),
            ));
        }
        if !seen.insert(name.as_str()) {
            return Err(OrderSortError::RulesetInvalid(format!(
                "worker '{}' appears more than once in worker_order",
                name
            )));
        }
    }

    if ruleset.quantity_threshold < 1 {
        return Err(OrderSortError::RulesetInvalid(format!(
            "quantity_threshold must be at least 1, got {}",
            ruleset.quantity_threshold
        )));
    }

    for kind in [
        WorkerType::Failed,
        WorkerType::MixedProducts,
        WorkerType::MultipleQuantity,
    ] {
        let workers = ruleset.workers_of_type(kind);
        if workers.len() > 1 {
            return Err(OrderSortError::RulesetInvalid(format!(
                "only one '{}' worker is allowed, found: {}",
                kind.label(),
                workers.join(", ")
            )));
        }
        if let Some(name) = workers.first() {
            if !ruleset.worker_order.iter().any(|w| w == name) {
                return Err(OrderSortError::RulesetInvalid(format!(
                    "'{}' worker '{}' is missing from worker_order",
                    kind.label(),
                    name
                )));
            }
        }
    }

    let failed = ruleset.failed_worker();
    if !ruleset.worker_order.iter().any(|w| w == failed) {
        return Err(OrderSortError::RulesetInvalid(format!(
            "fallback worker '{}' must appear in worker_order",
            failed
        )));
    }

    for (name, config) in &ruleset.worker_config {
        if config.kind != WorkerType::ProductSpecific && !config.products.is_empty() {
            tracing::warn!(
                worker = %name,
                kind = config.kind.label(),
                "product rules on a system worker are ignored"
            );
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid_ruleset() {
        let json = r#"{
            "worker_order": ["W1", "합배송", "복수주문", "분류실패"],
            "worker_config": {
                "W1": { "type": "product_specific", "products": [
                    { "brand": "Acme", "product_name": "All", "order_option": "All" }
                ]},
                "합배송": { "type": "mixed_products" },
                "복수주문": { "type": "multiple_quantity" },
                "분류실패": { "type": "failed" }
            },
            "quantity_threshold": 3
        }"#;
        let rs = parse_ruleset_str(json).unwrap();
        assert_eq!(rs.worker_order.len(), 4);
        assert_eq!(rs.quantity_threshold, 3);
        assert_eq!(rs.worker_config["W1"].products.len(), 1);
        assert!(rs.worker_config["W1"].enabled);
    }

    #[test]
    fn test_legacy_keys_accepted() {
        let json = r#"{
            "work_order": ["분류실패"],
            "work_config": { "분류실패": { "type": "failed", "products": [] } },
            "auto_learn": true,
            "min_confidence": 1.0
        }"#;
        let rs = parse_ruleset_str(json).unwrap();
        assert_eq!(rs.worker_order, vec!["분류실패"]);
        assert_eq!(rs.quantity_threshold, 2);
    }

    #[test]
    fn test_option_defaults_to_wildcard() {
        let json = r#"{
            "worker_order": ["W1", "분류실패"],
            "worker_config": {
                "W1": { "type": "product_specific", "products": [{ "brand": "Acme" }] }
            }
        }"#;
        let rs = parse_ruleset_str(json).unwrap();
        let rule = &rs.worker_config["W1"].products[0];
        assert_eq!(rule.order_option, "All");
        assert_eq!(rule.product_name, "");
    }

    #[test]
    fn test_empty_worker_order_rejected() {
        assert!(parse_ruleset_str(r#"{ "worker_order": [] }"#).is_err());
    }

    #[test]
    fn test_duplicate_worker_rejected() {
        let json = r#"{ "worker_order": ["W1", "W1", "분류실패"] }"#;
        assert!(parse_ruleset_str(json).is_err());
    }

    #[test]
    fn test_two_failed_workers_rejected() {
        let json = r#"{
            "worker_order": ["F1", "F2"],
            "worker_config": {
                "F1": { "type": "failed" },
                "F2": { "type": "failed" }
            }
        }"#;
        assert!(parse_ruleset_str(json).is_err());
    }

    #[test]
    fn test_system_worker_missing_from_order_rejected() {
        let json = r#"{
            "worker_order": ["분류실패"],
            "worker_config": { "합배송": { "type": "mixed_products" } }
        }"#;
        assert!(parse_ruleset_str(json).is_err());
    }

    #[test]
    fn test_fallback_missing_from_order_rejected() {
        let json = r#"{ "worker_order": ["W1"] }"#;
        assert!(parse_ruleset_str(json).is_err());
    }

    #[test]
    fn test_zero_threshold_rejected() {
        let json = r#"{ "worker_order": ["분류실패"], "quantity_threshold": 0 }"#;
        assert!(parse_ruleset_str(json).is_err());
    }

    #[test]
    fn test_unknown_worker_type_rejected() {
        let json = r#"{
            "worker_order": ["W1", "분류실패"],
            "worker_config": { "W1": { "type": "robot" } }
        }"#;
        assert!(parse_ruleset_str(json).is_err());
    }
}
