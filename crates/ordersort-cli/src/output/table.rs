use ordersort_core::stats::{ClassificationStats, WorkerStats};

pub fn print(stats: &ClassificationStats) {
    print!("{}", format_stats(stats));
}

pub fn format_stats(stats: &ClassificationStats) -> String {
    let mut out = String::new();
    let summary = &stats.summary;

    out.push_str(&format!("=== Classification ({} orders) ===\n\n", summary.total_orders));

    let max_name = stats
        .workers
        .iter()
        .map(|w| w.name.chars().count())
        .max()
        .unwrap_or(10);

    for w in &stats.workers {
        out.push_str(&format_worker(w, max_name));
    }
    out.push('\n');

    out.push_str(&format!(
        "  Classified: {} / {}  ({}%)\n",
        summary.success_count, summary.total_orders, summary.auto_classification_rate
    ));
    out.push_str(&format!("  Needs review: {}\n", summary.failed_count));
    if summary.star_filtered {
        out.push_str(&format!(
            "  Star-delivery rows removed: {}\n",
            summary.star_deleted.unwrap_or(0)
        ));
    }

    out
}

fn format_worker(w: &WorkerStats, width: usize) -> String {
    // pad by chars, not bytes
    let pad = width.saturating_sub(w.name.chars().count());
    format!(
        "  {} {}{}  {:>5}  {:>6}%  rows {}\n",
        w.icon,
        w.name,
        " ".repeat(pad),
        w.count,
        w.percentage,
        w.range
    )
}
