//! NPC dialog graph types.

use serde::{Deserialize, Serialize};

/// A single line or branch point in an NPC conversation.
///
/// `node_type` is one of "start", "dialog", "choice", "action", "end"; it is
/// kept as a plain string since only "start" carries behaviour.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DialogNode {
    pub id: i64,
    pub node_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub conditions: Option<serde_json::Value>,
}

/// A player choice leading from one dialog node to another.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DialogConnection {
    pub id: i64,
    pub source: i64,
    pub target: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub choice_text: Option<String>,
    /// Gate on the choice, e.g. `{"level": {"min": 5}}`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub conditions: Option<serde_json::Value>,
}

/// One NPC's conversation graph.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DialogGraph {
    #[serde(default)]
    pub nodes: Vec<DialogNode>,
    #[serde(default)]
    pub connections: Vec<DialogConnection>,
}

/// Result of validating a player's dialog choice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChoiceOutcome {
    pub valid: bool,
    pub message: Option<String>,
    pub next_node_id: Option<i64>,
    /// Individual failed conditions, when the choice was gated.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub unmet: Vec<String>,
}

impl ChoiceOutcome {
    pub fn rejected(message: impl Into<String>) -> Self {
        Self {
            valid: false,
            message: Some(message.into()),
            next_node_id: None,
            unmet: Vec::new(),
        }
    }

    pub fn accepted(next_node_id: i64) -> Self {
        Self {
            valid: true,
            message: None,
            next_node_id: Some(next_node_id),
            unmet: Vec::new(),
        }
    }
}
