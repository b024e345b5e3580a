use serde::{Deserialize, Serialize};

use std::fmt;

/// Identifier of a quest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct QuestId(pub i64);

impl fmt::Display for QuestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The slice of a quest that progression checks need: its identity and name.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Quest {
    pub id: QuestId,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Quest {
    pub fn new(id: i64, name: impl Into<String>) -> Self {
        Self {
            id: QuestId(id),
            name: name.into(),
            description: None,
        }
    }
}
