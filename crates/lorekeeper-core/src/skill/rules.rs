//! Declarative availability rules.
//!
//! Rule documents are opaque JSON; only these keys are read:
//!
//! ```json
//! {
//!   "attributes": {
//!     "agility": {"min": 8},
//!     "intellect": {"min": 3, "max": 10},
//!     "luck": {"equals": 7},
//!     "strength": 5
//!   },
//!   "customMessage": "Only the nimble may learn this."
//! }
//! ```
//!
//! A bare number is shorthand for `{"min": n}`. Everything else is ignored.
//! Malformed constraint values never raise; the attribute simply fails.

use std::collections::BTreeMap;

use serde_json::Value;

pub const ATTRIBUTES_KEY: &str = "attributes";
pub const CUSTOM_MESSAGE_KEY: &str = "customMessage";

/// Bound keys in the order they are checked.
const BOUND_KEYS: [&str; 3] = ["equals", "min", "max"];

/// Check a rules document's attribute constraints against a character.
///
/// Returns one reason per failing attribute, in document key order. When the
/// document carries a `customMessage` and anything failed, the reasons are
/// replaced by that single message.
pub fn check_attribute_rules(rules: &Value, attributes: &BTreeMap<String, Value>) -> Vec<String> {
    let reasons = match rules.get(ATTRIBUTES_KEY) {
        Some(constraints) => check_attributes(constraints, attributes),
        None => Vec::new(),
    };
    with_custom_message(rules, reasons)
}

/// Check an `attributes` constraint map, one reason per failing attribute.
///
/// A value that is not an object carries no constraints.
pub fn check_attributes(constraints: &Value, attributes: &BTreeMap<String, Value>) -> Vec<String> {
    let Some(constraints) = constraints.as_object() else {
        return Vec::new();
    };

    constraints
        .iter()
        .filter_map(|(name, constraint)| {
            let actual = attributes.get(name).and_then(Value::as_f64);
            check_range(&format!("attribute {name}"), constraint, actual)
        })
        .collect()
}

/// Replace non-empty `reasons` with the document's `customMessage`, if any.
pub fn with_custom_message(document: &Value, reasons: Vec<String>) -> Vec<String> {
    if reasons.is_empty() {
        return reasons;
    }
    match document.get(CUSTOM_MESSAGE_KEY).and_then(Value::as_str) {
        Some(message) => vec![message.to_string()],
        None => reasons,
    }
}

/// Check one `{equals?, min?, max?}` constraint (or bare-number minimum)
/// against a value, returning the first violation.
///
/// `label` names the checked quantity in the reason ("attribute agility",
/// "level", "gold"). A missing `actual` fails any numeric bound.
pub fn check_range(label: &str, constraint: &Value, actual: Option<f64>) -> Option<String> {
    let bounds = match constraint {
        Value::Number(_) => {
            let mut map = serde_json::Map::new();
            map.insert("min".to_string(), constraint.clone());
            map
        }
        Value::Object(map) => map.clone(),
        Value::Null => return None,
        _ => return Some(format!("{label} has an invalid constraint")),
    };

    for key in BOUND_KEYS {
        let Some(raw) = bounds.get(key) else {
            continue;
        };
        if raw.is_null() {
            continue;
        }
        let Some(bound) = raw.as_f64() else {
            return Some(format!("{label} has an invalid {key} constraint"));
        };

        let satisfied = actual.is_some_and(|value| match key {
            "equals" => value == bound,
            "min" => value >= bound,
            _ => value <= bound,
        });
        if satisfied {
            continue;
        }

        let expectation = match key {
            "equals" => format!("equal to {bound}"),
            "min" => format!("at least {bound}"),
            _ => format!("at most {bound}"),
        };
        let observed = match actual {
            Some(value) => format!("has {value}"),
            None => "missing".to_string(),
        };
        return Some(format!("{label} must be {expectation} ({observed})"));
    }

    None
}
