use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use crate::class::ClassId;
use crate::quest::QuestId;
use crate::skill::SkillId;

/// Identifier of a player character.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CharacterId(pub i64);

impl fmt::Display for CharacterId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A record that a character unlocked a skill.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UnlockedSkill {
    pub skill_id: SkillId,
    pub unlocked_at: DateTime<Utc>,
}

fn default_level() -> i32 {
    1
}

/// A player's in-game avatar, as seen by progression checks.
///
/// The character owns its unlock records and completed-quest set.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerCharacter {
    pub id: CharacterId,
    pub name: String,
    /// Clamped to >= 1 by whoever writes it.
    #[serde(default = "default_level")]
    pub level: i32,
    #[serde(default)]
    pub experience: i64,
    /// Free-form attributes (agility, intellect, ...). Values are expected to
    /// be numeric; anything else fails numeric rule checks.
    #[serde(default)]
    pub attributes: BTreeMap<String, serde_json::Value>,
    /// Currency balances keyed by currency name (e.g. "gold").
    #[serde(default)]
    pub currency: BTreeMap<String, i64>,
    pub class_id: ClassId,
    #[serde(default)]
    pub completed_quests: BTreeSet<QuestId>,
    #[serde(default)]
    pub unlocked_skills: Vec<UnlockedSkill>,
}

impl PlayerCharacter {
    /// A level-1 character of the given class with nothing completed.
    pub fn new(id: i64, name: impl Into<String>, class_id: ClassId) -> Self {
        Self {
            id: CharacterId(id),
            name: name.into(),
            level: 1,
            experience: 0,
            attributes: BTreeMap::new(),
            currency: BTreeMap::new(),
            class_id,
            completed_quests: BTreeSet::new(),
            unlocked_skills: Vec::new(),
        }
    }

    pub fn with_level(mut self, level: i32) -> Self {
        self.level = level;
        self
    }

    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<serde_json::Value>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }

    pub fn with_completed_quest(mut self, quest: QuestId) -> Self {
        self.completed_quests.insert(quest);
        self
    }

    /// Record an unlock at the current time.
    pub fn with_unlocked(mut self, skill: SkillId) -> Self {
        self.unlocked_skills.push(UnlockedSkill {
            skill_id: skill,
            unlocked_at: Utc::now(),
        });
        self
    }

    /// Whether an unlock record for `skill` exists.
    pub fn has_unlocked(&self, skill: SkillId) -> bool {
        self.unlocked_skills.iter().any(|u| u.skill_id == skill)
    }

    /// The set of unlocked skill ids.
    pub fn unlocked_skill_ids(&self) -> BTreeSet<SkillId> {
        self.unlocked_skills.iter().map(|u| u.skill_id).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_character_defaults() {
        let json = r#"{"id": 1, "name": "Elinor", "classId": 2}"#;
        let character: PlayerCharacter = serde_json::from_str(json).unwrap();
        assert_eq!(character.level, 1);
        assert_eq!(character.experience, 0);
        assert!(character.attributes.is_empty());
        assert!(character.unlocked_skills.is_empty());
    }

    #[test]
    fn test_has_unlocked() {
        let character = PlayerCharacter::new(1, "Roran", ClassId(1)).with_unlocked(SkillId(5));
        assert!(character.has_unlocked(SkillId(5)));
        assert!(!character.has_unlocked(SkillId(6)));
        assert_eq!(character.unlocked_skill_ids().len(), 1);
    }
}
