use crate::classify::outcome::ClassifiedRow;
use crate::rules::Policy;

/// Arrange classified rows into worker-priority groups.
///
/// Groups follow `worker_order`. Inside the co-shipment group rows are
/// ordered by order id so a multi-item order stays together; every other
/// group is ordered by `full_name`. Sorts are stable, so ties keep their
/// source order.
pub fn sort_by_priority(rows: Vec<ClassifiedRow>, policy: &Policy) -> Vec<ClassifiedRow> {
    let total = rows.len();
    let mut groups: Vec<Vec<ClassifiedRow>> = vec![Vec::new(); policy.worker_order.len()];
    let mut stray = Vec::new();

    for r in rows {
        match policy.priority(&r.assignment.worker) {
            Some(i) => groups[i].push(r),
            None => stray.push(r),
        }
    }

    if !stray.is_empty() {
        // Unreachable with a validated policy; keep the rows instead of dropping them.
        tracing::warn!(rows = stray.len(), "rows assigned outside worker_order appended last");
    }

    let mut sorted = Vec::with_capacity(total);
    for (worker, mut group) in policy.worker_order.iter().zip(groups) {
        if policy.is_co_shipment(worker) {
            group.sort_by(|a, b| a.row.order_group_id.cmp(&b.row.order_group_id));
        } else {
            group.sort_by(|a, b| a.row.full_name.cmp(&b.row.full_name));
        }
        sorted.extend(group);
    }
    sorted.extend(stray);

    sorted
}
