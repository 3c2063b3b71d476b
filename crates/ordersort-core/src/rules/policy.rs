use crate::classify::matcher::CompiledRule;
use crate::error::OrderSortError;
use crate::rules::schema::{BrandMatch, RuleSetDef, WorkerType};
use crate::rules::validate_ruleset;
use std::collections::HashMap;

/// A validated ruleset in the shape the engine consumes.
///
/// Built once per classification call; matching never goes back to the
/// loosely shaped `RuleSetDef`.
#[derive(Debug, Clone)]
pub struct Policy {
    pub worker_order: Vec<String>,
    pub failed_worker: String,
    /// `None` when no enabled `mixed_products` worker exists.
    pub co_shipment_worker: Option<String>,
    /// `None` when no enabled `multiple_quantity` worker exists.
    pub bulk_worker: Option<String>,
    pub quantity_threshold: i64,
    pub brand_match: BrandMatch,
    /// Product rules in matching order.
    pub rules: Vec<CompiledRule>,
    priority: HashMap<String, usize>,
}

impl Policy {
    /// Position of `worker` in `worker_order`.
    pub fn priority(&self, worker: &str) -> Option<usize> {
        self.priority.get(worker).copied()
    }

    pub fn is_co_shipment(&self, worker: &str) -> bool {
        self.co_shipment_worker.as_deref() == Some(worker)
    }
}

/// Validate `ruleset` and compile its product rules.
pub fn compile(ruleset: &RuleSetDef) -> Result<Policy, OrderSortError> {
    validate_ruleset(ruleset)?;

    let system_worker = |kind: WorkerType| -> Option<String> {
        let name = ruleset.workers_of_type(kind).first().copied()?;
        let enabled = ruleset
            .worker_config
            .get(name)
            .map(|c| c.enabled)
            .unwrap_or(false);
        if !enabled {
            tracing::info!(worker = name, kind = kind.label(), "worker disabled, tier skipped");
            return None;
        }
        Some(name.to_string())
    };

    let co_shipment_worker = system_worker(WorkerType::MixedProducts);
    let bulk_worker = system_worker(WorkerType::MultipleQuantity);

    let mut rules = Vec::new();
    for worker in &ruleset.worker_order {
        let Some(config) = ruleset.worker_config.get(worker) else {
            tracing::warn!(worker = %worker, "worker has no configuration and receives no rules");
            continue;
        };
        if config.kind != WorkerType::ProductSpecific {
            continue;
        }
        if !config.enabled {
            tracing::debug!(worker = %worker, "worker disabled, product rules skipped");
            continue;
        }
        rules.extend(config.products.iter().map(|p| CompiledRule::new(worker, p)));
    }

    let priority = ruleset
        .worker_order
        .iter()
        .enumerate()
        .map(|(i, name)| (name.clone(), i))
        .collect();

    tracing::debug!(
        workers = ruleset.worker_order.len(),
        rules = rules.len(),
        co_shipment = co_shipment_worker.is_some(),
        bulk = bulk_worker.is_some(),
        "compiled ruleset"
    );

    Ok(Policy {
        worker_order: ruleset.worker_order.clone(),
        failed_worker: ruleset.failed_worker().to_string(),
        co_shipment_worker,
        bulk_worker,
        quantity_threshold: ruleset.quantity_threshold,
        brand_match: ruleset.brand_match,
        rules,
        priority,
    })
}
