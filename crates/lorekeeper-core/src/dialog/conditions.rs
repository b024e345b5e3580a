//! Dialog choice conditions.
//!
//! A conditions document gates a dialog connection on the character's state:
//!
//! ```json
//! {
//!   "level": {"min": 5},
//!   "quests": {"completed": [10, 11]},
//!   "currency": {"gold": {"min": 100}},
//!   "attributes": {"charisma": {"min": 12}},
//!   "customMessage": "The guard ignores you."
//! }
//! ```
//!
//! Unknown keys are ignored. Missing currency counts as zero.

use serde_json::Value;

use lorekeeper_types::character::PlayerCharacter;
use lorekeeper_types::quest::QuestId;

use crate::skill::rules::{ATTRIBUTES_KEY, check_attributes, check_range, with_custom_message};

const LEVEL_KEY: &str = "level";
const QUESTS_KEY: &str = "quests";
const CURRENCY_KEY: &str = "currency";

/// Evaluate a conditions document against a character, returning every
/// unmet condition. An empty result means the choice is open.
pub fn evaluate_conditions(conditions: &Value, character: &PlayerCharacter) -> Vec<String> {
    let mut reasons = Vec::new();

    if let Some(level) = conditions.get(LEVEL_KEY) {
        reasons.extend(check_range("level", level, Some(f64::from(character.level))));
    }
    if let Some(quests) = conditions.get(QUESTS_KEY) {
        reasons.extend(check_quests(quests, character));
    }
    if let Some(currency) = conditions.get(CURRENCY_KEY) {
        reasons.extend(check_currency(currency, character));
    }
    if let Some(attributes) = conditions.get(ATTRIBUTES_KEY) {
        reasons.extend(check_attributes(attributes, &character.attributes));
    }

    with_custom_message(conditions, reasons)
}

fn check_quests(quests: &Value, character: &PlayerCharacter) -> Option<String> {
    let completed = match quests.get("completed") {
        None | Some(Value::Null) => return None,
        Some(Value::Array(ids)) => ids,
        Some(_) => return Some("quests has an invalid completed constraint".to_string()),
    };

    let mut missing = Vec::new();
    for id in completed {
        let Some(id) = id.as_i64() else {
            return Some("quests has an invalid completed constraint".to_string());
        };
        if !character.completed_quests.contains(&QuestId(id)) {
            missing.push(format!("Quest #{id}"));
        }
    }

    if missing.is_empty() {
        None
    } else {
        Some(format!("requires completed quests: {}", missing.join(", ")))
    }
}

fn check_currency(currency: &Value, character: &PlayerCharacter) -> Vec<String> {
    let Some(constraints) = currency.as_object() else {
        return vec!["currency has an invalid constraint".to_string()];
    };

    constraints
        .iter()
        .filter_map(|(name, constraint)| {
            let held = character.currency.get(name).copied().unwrap_or(0);
            check_range(&format!("currency {name}"), constraint, Some(held as f64))
        })
        .collect()
}
