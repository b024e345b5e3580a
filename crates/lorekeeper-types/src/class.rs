use serde::{Deserialize, Serialize};

use std::fmt;

/// Identifier of a player class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ClassId(pub i64);

impl fmt::Display for ClassId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A node in the class-inheritance tree ("Fire Mage" -> "Mage").
///
/// Each class has at most one parent. Deleting a parent detaches its
/// children (their `parent_id` becomes `None`); it never cascades.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerClass {
    pub id: ClassId,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<ClassId>,
}

impl PlayerClass {
    /// Create a root class with no parent.
    pub fn new(id: i64, name: impl Into<String>) -> Self {
        Self {
            id: ClassId(id),
            name: name.into(),
            slug: None,
            description: None,
            parent_id: None,
        }
    }

    /// Attach this class under `parent`.
    pub fn with_parent(mut self, parent: ClassId) -> Self {
        self.parent_id = Some(parent);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_class_deserialize_without_parent() {
        let class: PlayerClass = serde_json::from_str(r#"{"id": 1, "name": "Mage"}"#).unwrap();
        assert_eq!(class.id, ClassId(1));
        assert!(class.parent_id.is_none());
    }

    #[test]
    fn test_class_parent_uses_camel_case() {
        let class = PlayerClass::new(2, "Fire Mage").with_parent(ClassId(1));
        let json = serde_json::to_value(&class).unwrap();
        assert_eq!(json["parentId"], 1);
        assert!(json.get("slug").is_none());
    }
}
