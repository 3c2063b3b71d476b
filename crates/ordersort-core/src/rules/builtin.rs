use crate::error::OrderSortError;
use crate::rules::schema::RuleSetDef;

const DEFAULT_JSON: &str = include_str!("../../../../rules/default.json");

/// Available predefined rulesets.
pub const PRESETS: &[&str] = &["default"];

/// Load a predefined ruleset by name.
pub fn load_preset(name: &str) -> Result<RuleSetDef, OrderSortError> {
    match name {
        "default" => {
            let ruleset: RuleSetDef = serde_json::from_str(DEFAULT_JSON)?;
            Ok(ruleset)
        }
        _ => Err(OrderSortError::RulesetInvalid(format!(
            "unknown preset '{}'. Available: {}",
            name,
            PRESETS.join(", ")
        ))),
    }
}
