//! Skill availability results.

use serde::{Deserialize, Serialize};

use crate::skill::SkillId;

/// Reason reported when the skill is already unlocked.
pub const ALREADY_UNLOCKED_REASON: &str = "skill already unlocked";

/// Outcome of evaluating one skill for one character.
///
/// `reasons` are human-readable and surfaced verbatim to clients, ordered
/// level, class, quests, prerequisites, rules.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Availability {
    pub can_unlock: bool,
    pub already_unlocked: bool,
    pub reasons: Vec<String>,
}

impl Availability {
    /// The short-circuit result for a skill the character already holds.
    pub fn already_unlocked() -> Self {
        Self {
            can_unlock: false,
            already_unlocked: true,
            reasons: vec![ALREADY_UNLOCKED_REASON.to_string()],
        }
    }

    /// Result built from accumulated blocking reasons.
    pub fn from_reasons(reasons: Vec<String>) -> Self {
        Self {
            can_unlock: reasons.is_empty(),
            already_unlocked: false,
            reasons,
        }
    }
}

/// Availability of one skill in a character-wide listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SkillAvailability {
    pub skill_id: SkillId,
    pub name: String,
    #[serde(flatten)]
    pub availability: Availability,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_availability_serializes_camel_case() {
        let json = serde_json::to_value(Availability::from_reasons(vec![])).unwrap();
        assert_eq!(json["canUnlock"], true);
        assert_eq!(json["alreadyUnlocked"], false);
        assert_eq!(json["reasons"], serde_json::json!([]));
    }

    #[test]
    fn test_already_unlocked_has_single_reason() {
        let a = Availability::already_unlocked();
        assert!(!a.can_unlock);
        assert!(a.already_unlocked);
        assert_eq!(a.reasons, vec![ALREADY_UNLOCKED_REASON.to_string()]);
    }

    #[test]
    fn test_skill_availability_flattens() {
        let entry = SkillAvailability {
            skill_id: SkillId(3),
            name: "Fireball".to_string(),
            availability: Availability::from_reasons(vec!["requires character level 5".into()]),
        };
        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json["skillId"], 3);
        assert_eq!(json["canUnlock"], false);
    }
}
