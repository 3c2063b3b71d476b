use crate::classify::outcome::ClassifiedRow;
use crate::rules::schema::RuleSetDef;
use crate::rules::Policy;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

const DEFAULT_ICON: &str = "📋";

/// Row count and output position of one worker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkerStats {
    pub name: String,
    pub count: usize,
    /// Share of all rows, one decimal place.
    pub percentage: Decimal,
    pub icon: String,
    /// 1-based row span in the sorted output, e.g. "1 ~ 12", or "-".
    pub range: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    pub total_orders: usize,
    pub success_count: usize,
    pub failed_count: usize,
    pub auto_classification_rate: Decimal,
    /// Whether the star-delivery filter ran before classification.
    pub star_filtered: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub star_deleted: Option<usize>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassificationStats {
    pub workers: Vec<WorkerStats>,
    pub summary: Summary,
}

/// Per-worker counts and the overall summary for sorted rows.
///
/// Ranges are derived by walking `worker_order` and accumulating counts, so
/// they are only meaningful for rows in priority order.
pub fn compute_stats(
    rows: &[ClassifiedRow],
    policy: &Policy,
    ruleset: &RuleSetDef,
) -> ClassificationStats {
    let total = rows.len();
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for r in rows {
        *counts.entry(r.assignment.worker.as_str()).or_default() += 1;
    }

    let mut next_row = 1;
    let workers = policy
        .worker_order
        .iter()
        .map(|name| {
            let count = counts.get(name.as_str()).copied().unwrap_or(0);
            let range = if count > 0 {
                let start = next_row;
                let end = start + count - 1;
                next_row = end + 1;
                format!("{start} ~ {end}")
            } else {
                "-".to_string()
            };
            WorkerStats {
                name: name.clone(),
                count,
                percentage: percent(count, total),
                icon: ruleset.icon(name).unwrap_or(DEFAULT_ICON).to_string(),
                range,
            }
        })
        .collect();

    let failed_count = counts
        .get(policy.failed_worker.as_str())
        .copied()
        .unwrap_or(0);
    let success_count = total - failed_count;

    ClassificationStats {
        workers,
        summary: Summary {
            total_orders: total,
            success_count,
            failed_count,
            auto_classification_rate: percent(success_count, total),
            star_filtered: false,
            star_deleted: None,
        },
    }
}

/// `part / total * 100` rounded to one decimal (half to even); 0 when empty.
pub fn percent(part: usize, total: usize) -> Decimal {
    if total == 0 {
        return Decimal::ZERO;
    }
    (Decimal::from(part as u64) * Decimal::ONE_HUNDRED / Decimal::from(total as u64)).round_dp(1)
}
