use ordersort_core::error::OrderSortError;
use ordersort_core::rules::builtin;
use ordersort_core::rules::schema::{BrandMatch, RuleSetDef, WorkerType};
use std::path::Path;

pub fn list() -> Result<(), OrderSortError> {
    println!("Available predefined settings:\n");
    for name in builtin::PRESETS {
        let rs = builtin::load_preset(name)?;
        println!(
            "  {:<10} {} ({} workers, {} product rules)",
            name,
            rs.name.as_deref().unwrap_or("(unnamed)"),
            rs.worker_order.len(),
            rs.total_products()
        );
        if let Some(ref desc) = rs.description {
            println!("             {}", desc);
        }
        println!();
    }
    Ok(())
}

pub fn explain(preset: &str) -> Result<(), OrderSortError> {
    let rs = builtin::load_preset(preset)?;
    print_explanation(&rs);
    Ok(())
}

fn print_explanation(rs: &RuleSetDef) {
    if let Some(ref name) = rs.name {
        println!("{}\n", name);
    }
    if let Some(ref desc) = rs.description {
        println!("{}\n", desc);
    }

    println!(
        "Rows are assigned in three passes, each only touching rows no earlier pass claimed:\n"
    );
    match rs.workers_of_type(WorkerType::MixedProducts).first() {
        Some(w) => println!("  1. Orders with two or more rows          -> {}", w),
        None => println!("  1. Co-shipment pass                      (disabled, no mixed_products worker)"),
    }
    match rs.workers_of_type(WorkerType::MultipleQuantity).first() {
        Some(w) => println!(
            "  2. Single rows with quantity >= {:<8} -> {}",
            rs.quantity_threshold, w
        ),
        None => println!("  2. Bulk pass                             (disabled, no multiple_quantity worker)"),
    }
    println!("  3. Product rules, first match in worker order");
    println!("     Anything left                          -> {}", rs.failed_worker());
    println!();

    let brand = match rs.brand_match {
        BrandMatch::Strict => "brand must appear in the first word of the product name",
        BrandMatch::FullNameFallback => "brand may appear anywhere in the product name",
    };
    println!("Brand matching: {}\n", brand);

    println!("Workers (output order):\n");
    let max_name = rs
        .worker_order
        .iter()
        .map(|w| w.chars().count())
        .max()
        .unwrap_or(10);

    for (i, worker) in rs.worker_order.iter().enumerate() {
        let Some(cfg) = rs.worker_config.get(worker) else {
            println!(
                "  {:>2}. {:<width$}  (no configuration)",
                i + 1,
                worker,
                width = max_name
            );
            continue;
        };
        let state = if cfg.enabled { "" } else { "  [disabled]" };
        println!(
            "  {:>2}. {} {:<width$}  {}{}",
            i + 1,
            cfg.icon.as_deref().unwrap_or("📋"),
            worker,
            cfg.kind.label(),
            state,
            width = max_name
        );
        if let Some(ref desc) = cfg.description {
            println!("        {}", desc);
        }
        for rule in &cfg.products {
            println!(
                "        brand={:?} product={:?} option={:?}",
                rule.brand, rule.product_name, rule.order_option
            );
        }
    }
    println!();
}

pub fn schema() -> Result<(), OrderSortError> {
    print!(
        r#"JSON Settings Schema
====================

A settings file lists the workers orders are sorted to, their priority,
and the product rules of each product worker. When you run
`ordersort classify`, every row of the order sheet ends up with exactly
one worker.

Top-level fields:
  name          (string, optional)  Human-readable name
  description   (string, optional)  What these settings are for
  worker_order  (array, required)   Worker names in priority order. Decides
                                    which product rule wins when several
                                    match, and the order of the output.
                                    Legacy key: "work_order".
  worker_config (object, optional)  Map of worker name to configuration
                                    (see below). Legacy key: "work_config".
  quantity_threshold
                (integer, optional) Minimum quantity for a single row to
                                    be a bulk order. Default: 2
  brand_match   (string, optional)  "strict" (default): rule brand must be
                                    in the first word of the product name.
                                    "full_name_fallback": also accept it
                                    anywhere in the product name.
  auto_learn, min_confidence        Accepted for compatibility, unused.

Each entry in "worker_config":
  type          (string, required)  One of:
                                      product_specific   claims rows by rules
                                      mixed_products     co-shipment bucket
                                      multiple_quantity  bulk order bucket
                                      failed             fallback bucket
                                    At most one of each of the last three.
  products      (array, optional)   Product rules (product_specific only)
  enabled       (bool, optional)    Default: true. A disabled worker claims
                                    no rows in its pass.
  description   (string, optional)  Shown by `ordersort rules explain`
  icon          (string, optional)  Shown in statistics. Default: 📋

Each product rule:
  brand         (string)  Substring of the product name's first word
  product_name  (string)  Substring of the product name
  order_option  (string)  Substring of the order option. Default: "All"
                "All" (or an empty string) matches anything.

Example:
{{
  "name": "Shop A",
  "worker_order": ["Kim", "Lee", "합배송", "복수주문", "분류실패"],
  "worker_config": {{
    "Kim": {{ "type": "product_specific", "icon": "🍧", "products": [
      {{ "brand": "Acme", "product_name": "All", "order_option": "All" }}
    ]}},
    "Lee": {{ "type": "product_specific", "products": [
      {{ "brand": "All", "product_name": "Cable", "order_option": "1m" }}
    ]}},
    "합배송": {{ "type": "mixed_products" }},
    "복수주문": {{ "type": "multiple_quantity" }},
    "분류실패": {{ "type": "failed" }}
  }},
  "quantity_threshold": 2
}}
"#
    );
    Ok(())
}

pub fn validate(file: &Path) -> Result<(), OrderSortError> {
    let rs = ordersort_core::rules::load_ruleset(file)?;
    // Compiling surfaces the same errors classify would hit
    let policy = ordersort_core::rules::compile(&rs)?;

    println!(
        "Settings '{}' are valid.",
        rs.name.as_deref().unwrap_or(&file.display().to_string())
    );
    println!("  Workers: {}", rs.worker_order.join(", "));
    println!("  Product rules: {}", policy.rules.len());
    println!("  Fallback worker: {}", policy.failed_worker);

    let mut warnings = Vec::new();
    for worker in &rs.worker_order {
        match rs.worker_config.get(worker) {
            None => warnings.push(format!("worker '{}' has no configuration", worker)),
            Some(cfg) if cfg.kind == WorkerType::ProductSpecific && cfg.products.is_empty() => {
                warnings.push(format!("worker '{}' has no product rules", worker))
            }
            Some(cfg) if !cfg.enabled => {
                warnings.push(format!("worker '{}' is disabled", worker))
            }
            _ => {}
        }
    }
    for name in rs.worker_config.keys() {
        if !rs.worker_order.contains(name) {
            warnings.push(format!(
                "worker '{}' is configured but missing from worker_order",
                name
            ));
        }
    }

    if !warnings.is_empty() {
        println!("\nWarnings:");
        for w in &warnings {
            println!("  - {}", w);
        }
    }

    Ok(())
}
