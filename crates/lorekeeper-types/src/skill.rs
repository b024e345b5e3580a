//! Skill graph domain types.
//!
//! Skills are nodes of a prerequisite DAG; `SkillLink`s are the directed
//! parent -> child edges. Ownership is unidirectional: skills never hold their
//! links, and reverse lookups are built on demand by the catalog in
//! `lorekeeper-core`.

use serde::{Deserialize, Serialize};

use std::fmt;

use crate::class::{ClassId, PlayerClass};
use crate::error::SkillGraphError;
use crate::graph::Position;
use crate::quest::{Quest, QuestId};

/// Identifier of a skill.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SkillId(pub i64);

impl fmt::Display for SkillId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A node in the skill DAG.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Skill {
    pub id: SkillId,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,
    /// Tier or category label ("core", "specialized", ...).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tier: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub required_level: Option<i32>,
    /// Declarative availability rules, e.g.
    /// `{"attributes": {"agility": {"min": 8}}, "customMessage": "..."}`.
    ///
    /// Opaque to everything but the rule checker, which only reads the keys it
    /// understands.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub availability_rules: Option<serde_json::Value>,
    /// Classes allowed to learn the skill; any one of them in the character's
    /// lineage is enough. Empty means unrestricted.
    #[serde(default)]
    pub required_classes: Vec<ClassId>,
    /// Quests that must all be completed. Empty means none.
    #[serde(default)]
    pub required_quests: Vec<QuestId>,
    /// Editor canvas position.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<Position>,
}

impl Skill {
    /// A skill with no requirements at all.
    pub fn new(id: i64, name: impl Into<String>) -> Self {
        Self {
            id: SkillId(id),
            name: name.into(),
            slug: None,
            tier: None,
            description: None,
            required_level: None,
            availability_rules: None,
            required_classes: Vec::new(),
            required_quests: Vec::new(),
            position: None,
        }
    }

    pub fn with_required_level(mut self, level: i32) -> Self {
        self.required_level = Some(level);
        self
    }

    pub fn with_required_class(mut self, class: ClassId) -> Self {
        self.required_classes.push(class);
        self
    }

    pub fn with_required_quest(mut self, quest: QuestId) -> Self {
        self.required_quests.push(quest);
        self
    }

    pub fn with_rules(mut self, rules: serde_json::Value) -> Self {
        self.availability_rules = Some(rules);
        self
    }
}

fn default_requires_all_parents() -> bool {
    true
}

/// Directed prerequisite edge `parent -> child`.
///
/// When `requires_all_parents` is true the child needs this specific parent
/// unlocked (AND across all such links). When false, the link joins the
/// child's optional group, of which at least one parent must be unlocked.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SkillLink {
    pub parent_id: SkillId,
    pub child_id: SkillId,
    #[serde(default = "default_requires_all_parents")]
    pub requires_all_parents: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<serde_json::Value>,
}

impl SkillLink {
    /// Create a link, rejecting self-loops.
    pub fn new(
        parent_id: SkillId,
        child_id: SkillId,
        requires_all_parents: bool,
    ) -> Result<Self, SkillGraphError> {
        if parent_id == child_id {
            return Err(SkillGraphError::SelfLoop(parent_id.0));
        }
        Ok(Self {
            parent_id,
            child_id,
            requires_all_parents,
            metadata: None,
        })
    }

    /// Shorthand for a link in the "all parents required" group.
    pub fn required(parent_id: SkillId, child_id: SkillId) -> Result<Self, SkillGraphError> {
        Self::new(parent_id, child_id, true)
    }

    /// Shorthand for a link in the "any parent" group.
    pub fn optional(parent_id: SkillId, child_id: SkillId) -> Result<Self, SkillGraphError> {
        Self::new(parent_id, child_id, false)
    }
}

/// Everything a skill tree needs in one document: the stored `skills.json`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SkillGraph {
    #[serde(default)]
    pub skills: Vec<Skill>,
    #[serde(default)]
    pub links: Vec<SkillLink>,
    #[serde(default)]
    pub classes: Vec<PlayerClass>,
    #[serde(default)]
    pub quests: Vec<Quest>,
}
