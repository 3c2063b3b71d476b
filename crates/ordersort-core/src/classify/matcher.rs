use crate::model::OrderRow;
use crate::rules::schema::{BrandMatch, ProductRule, WILDCARD};

/// One level of a product rule after compilation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Pattern {
    Any,
    Contains(String),
}

impl Pattern {
    /// `"All"` is the wildcard. An empty string constrains nothing either.
    pub fn compile(raw: &str) -> Pattern {
        if raw == WILDCARD || raw.is_empty() {
            Pattern::Any
        } else {
            Pattern::Contains(raw.to_string())
        }
    }

    pub fn matches(&self, haystack: &str) -> bool {
        match self {
            Pattern::Any => true,
            Pattern::Contains(needle) => haystack.contains(needle.as_str()),
        }
    }
}

/// A product rule bound to its worker, ready for matching.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompiledRule {
    pub worker: String,
    pub brand: Pattern,
    pub product_name: Pattern,
    pub order_option: Pattern,
    /// Human-readable reason recorded on rows this rule claims.
    pub reason: String,
}

impl CompiledRule {
    pub fn new(worker: &str, rule: &ProductRule) -> Self {
        CompiledRule {
            worker: worker.to_string(),
            brand: Pattern::compile(&rule.brand),
            product_name: Pattern::compile(&rule.product_name),
            order_option: Pattern::compile(&rule.order_option),
            reason: format!("matched: {} {}", rule.brand, rule.product_name),
        }
    }

    /// Brand, product name and option must all pass. Checks are
    /// case-sensitive substring tests.
    pub fn matches(&self, row: &OrderRow, brand_match: BrandMatch) -> bool {
        let brand_ok = match brand_match {
            BrandMatch::Strict => self.brand.matches(&row.brand),
            BrandMatch::FullNameFallback => {
                self.brand.matches(&row.brand) || self.brand.matches(&row.product_name)
            }
        };

        brand_ok
            && self.product_name.matches(&row.product_name)
            && self.order_option.matches(&row.order_option)
    }
}

/// First rule, in compiled order, that claims `row`.
pub fn first_match<'a>(
    rules: &'a [CompiledRule],
    row: &OrderRow,
    brand_match: BrandMatch,
) -> Option<&'a CompiledRule> {
    rules.iter().find(|r| r.matches(row, brand_match))
}
