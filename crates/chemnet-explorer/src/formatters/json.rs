//! JSON output formatting.

use serde_json::{Value, json};

use crate::views::{FundingView, PanelView};

/// Serialize a panel view.
#[must_use]
pub fn panel_json(view: &PanelView) -> Value {
    serde_json::to_value(view).unwrap_or_default()
}

/// Serialize the funding table view.
#[must_use]
pub fn funding_json(view: &FundingView) -> Value {
    serde_json::to_value(view).unwrap_or_default()
}

/// Example names as a JSON document.
#[must_use]
pub fn examples_json(examples: &[String]) -> Value {
    json!({
        "count": examples.len(),
        "examples": examples,
    })
}

/// Pretty-print a JSON value for terminal output.
#[must_use]
pub fn to_pretty(value: &Value) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
}
