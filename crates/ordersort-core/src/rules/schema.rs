use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Literal wildcard used at every level of a product rule.
pub const WILDCARD: &str = "All";

/// Worker name used for unmatched rows when no `failed` worker is declared.
pub const DEFAULT_FAILED_WORKER: &str = "분류실패";

fn default_threshold() -> i64 {
    2
}

fn default_true() -> bool {
    true
}

fn default_min_confidence() -> f64 {
    1.0
}

fn default_option() -> String {
    WILDCARD.to_string()
}

/// Classification settings: which workers exist, in which priority, and what
/// each of them is responsible for.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RuleSetDef {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    /// Worker priority: rule matching order and output grouping order.
    #[serde(alias = "work_order")]
    pub worker_order: Vec<String>,
    #[serde(alias = "work_config", default)]
    pub worker_config: BTreeMap<String, WorkerConfig>,
    /// Minimum quantity for a single row to count as a bulk order.
    #[serde(default = "default_threshold")]
    pub quantity_threshold: i64,
    #[serde(default)]
    pub brand_match: BrandMatch,
    /// Reserved for rule learning from failed rows; not used by the engine.
    #[serde(default = "default_true")]
    pub auto_learn: bool,
    /// Reserved together with `auto_learn`.
    #[serde(default = "default_min_confidence")]
    pub min_confidence: f64,
}

impl RuleSetDef {
    /// Workers of the given type, in `worker_order` sequence first, then any
    /// configured-but-unordered ones.
    pub fn workers_of_type(&self, kind: WorkerType) -> Vec<&str> {
        let ordered = self
            .worker_order
            .iter()
            .filter(|name| self.worker_config.get(*name).map(|c| c.kind) == Some(kind))
            .map(String::as_str);
        let unordered = self
            .worker_config
            .iter()
            .filter(|(name, c)| c.kind == kind && !self.worker_order.contains(*name))
            .map(|(name, _)| name.as_str());
        ordered.chain(unordered).collect()
    }

    /// Name of the bucket that receives unmatched rows.
    pub fn failed_worker(&self) -> &str {
        self.workers_of_type(WorkerType::Failed)
            .first()
            .copied()
            .unwrap_or(DEFAULT_FAILED_WORKER)
    }

    pub fn icon(&self, worker: &str) -> Option<&str> {
        self.worker_config.get(worker).and_then(|c| c.icon.as_deref())
    }

    pub fn total_products(&self) -> usize {
        self.worker_config.values().map(|c| c.products.len()).sum()
    }
}

/// Per-worker configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkerConfig {
    #[serde(rename = "type")]
    pub kind: WorkerType,
    #[serde(default)]
    pub products: Vec<ProductRule>,
    #[serde(default = "default_true")]
    pub enabled: bool,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub icon: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WorkerType {
    /// Receives rows matched by its product rules.
    ProductSpecific,
    /// Co-shipment bucket: orders with two or more rows.
    MixedProducts,
    /// Bulk bucket: single rows at or above the quantity threshold.
    MultipleQuantity,
    /// Fallback bucket for rows nothing else claimed.
    Failed,
}

impl WorkerType {
    pub fn label(&self) -> &'static str {
        match self {
            WorkerType::ProductSpecific => "product_specific",
            WorkerType::MixedProducts => "mixed_products",
            WorkerType::MultipleQuantity => "multiple_quantity",
            WorkerType::Failed => "failed",
        }
    }
}

/// How the brand level of a product rule is checked.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BrandMatch {
    /// Rule brand must be a substring of the row's first product-name token.
    #[default]
    Strict,
    /// Also accept the rule brand anywhere in the full product name.
    FullNameFallback,
}

/// A (brand, product name, option) substring triple owned by one worker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductRule {
    #[serde(default)]
    pub brand: String,
    #[serde(default)]
    pub product_name: String,
    #[serde(default = "default_option")]
    pub order_option: String,
}

impl ProductRule {
    pub fn new(brand: &str, product_name: &str, order_option: &str) -> Self {
        ProductRule {
            brand: brand.to_string(),
            product_name: product_name.to_string(),
            order_option: order_option.to_string(),
        }
    }
}
