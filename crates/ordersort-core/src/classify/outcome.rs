use crate::model::OrderRow;
use crate::stats::ClassificationStats;
use serde::{Deserialize, Serialize};

pub const REASON_NO_MATCH: &str = "no match";
pub const REASON_CO_SHIPMENT: &str = "co-shipment";
pub const REASON_BULK: &str = "bulk order";

/// Which worker a row went to, and why.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Assignment {
    pub worker: String,
    pub reason: String,
    /// 1.0 when a tier or rule claimed the row, 0.0 for the fallback bucket.
    pub confidence: f64,
}

impl Assignment {
    pub fn unmatched(failed_worker: &str) -> Self {
        Assignment {
            worker: failed_worker.to_string(),
            reason: REASON_NO_MATCH.to_string(),
            confidence: 0.0,
        }
    }

    pub fn matched(worker: &str, reason: &str) -> Self {
        Assignment {
            worker: worker.to_string(),
            reason: reason.to_string(),
            confidence: 1.0,
        }
    }

    pub fn is_matched(&self) -> bool {
        self.confidence > 0.0
    }
}

/// An order row together with its classification.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassifiedRow {
    pub row: OrderRow,
    pub assignment: Assignment,
}

/// Full result of one classification call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassificationResult {
    /// Source headers, in source order.
    pub headers: Vec<String>,
    /// Rows in final output order: grouped by worker priority.
    pub rows: Vec<ClassifiedRow>,
    pub stats: ClassificationStats,
}

impl ClassificationResult {
    /// Rows assigned to `worker`, in output order.
    pub fn rows_for<'a>(&'a self, worker: &'a str) -> impl Iterator<Item = &'a ClassifiedRow> + 'a {
        self.rows.iter().filter(move |r| r.assignment.worker == worker)
    }
}
