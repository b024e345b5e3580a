//! Class inheritance lineage.
//!
//! Classes form a tree through `parent_id`. A class's lineage is the class
//! itself followed by every ancestor up to the root. Authoring data is not
//! trusted to be acyclic, so walks are bounded both by a depth limit and by
//! revisit detection.

use std::collections::{HashMap, HashSet};

use lorekeeper_types::class::{ClassId, PlayerClass};
use lorekeeper_types::config::DEFAULT_MAX_LINEAGE_DEPTH;
use lorekeeper_types::error::CatalogError;

/// Id-keyed view of the class tree.
#[derive(Debug, Clone)]
pub struct ClassHierarchy {
    classes: HashMap<ClassId, PlayerClass>,
    max_depth: usize,
}

impl ClassHierarchy {
    pub fn new(classes: impl IntoIterator<Item = PlayerClass>) -> Self {
        Self {
            classes: classes.into_iter().map(|c| (c.id, c)).collect(),
            max_depth: DEFAULT_MAX_LINEAGE_DEPTH,
        }
    }

    /// Override the number of ancestors a lineage walk may follow.
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Display name for a class, falling back to `Class #id` for unknown ids.
    pub fn name_of(&self, id: ClassId) -> String {
        self.classes
            .get(&id)
            .map(|c| c.name.clone())
            .unwrap_or_else(|| format!("Class #{id}"))
    }

    /// The class followed by its ancestors, nearest first.
    ///
    /// A class missing from the hierarchy still has itself as lineage. The walk
    /// stops early (with a warning) on a repeated class or after `max_depth`
    /// ancestors.
    pub fn lineage(&self, class_id: ClassId) -> Vec<ClassId> {
        let mut lineage = vec![class_id];
        let mut seen = HashSet::from([class_id]);
        let mut current = self.classes.get(&class_id).and_then(|c| c.parent_id);

        while let Some(parent) = current {
            if lineage.len() > self.max_depth {
                tracing::warn!(
                    class = %class_id,
                    max_depth = self.max_depth,
                    "class lineage exceeds depth limit, truncating"
                );
                break;
            }
            if !seen.insert(parent) {
                tracing::warn!(class = %class_id, repeated = %parent, "class lineage contains a cycle");
                break;
            }
            lineage.push(parent);
            current = self.classes.get(&parent).and_then(|c| c.parent_id);
        }

        lineage
    }

    /// Check that every parent exists and no parent chain loops.
    ///
    /// Classes are checked in id order so the first reported problem is
    /// deterministic.
    pub fn validate(&self) -> Result<(), CatalogError> {
        let mut ids: Vec<ClassId> = self.classes.keys().copied().collect();
        ids.sort();

        for id in ids {
            let mut chain = vec![id];
            let mut current = self.classes.get(&id).and_then(|c| c.parent_id);

            while let Some(parent) = current {
                if !self.classes.contains_key(&parent) {
                    let child = *chain.last().unwrap_or(&id);
                    return Err(CatalogError::UnknownParentClass {
                        class: child.0,
                        parent: parent.0,
                    });
                }
                if let Some(start) = chain.iter().position(|c| *c == parent) {
                    let mut names: Vec<String> =
                        chain[start..].iter().map(|c| self.name_of(*c)).collect();
                    names.push(self.name_of(parent));
                    return Err(CatalogError::ClassCycle(names.join(" -> ")));
                }
                chain.push(parent);
                current = self.classes.get(&parent).and_then(|c| c.parent_id);
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mage_tree() -> ClassHierarchy {
        ClassHierarchy::new(vec![
            PlayerClass::new(1, "Mage"),
            PlayerClass::new(2, "Fire Mage").with_parent(ClassId(1)),
            PlayerClass::new(3, "Pyromancer").with_parent(ClassId(2)),
            PlayerClass::new(4, "Warrior"),
        ])
    }

    #[test]
    fn test_lineage_follows_parents_to_root() {
        let tree = mage_tree();
        assert_eq!(tree.lineage(ClassId(3)), vec![ClassId(3), ClassId(2), ClassId(1)]);
        assert_eq!(tree.lineage(ClassId(4)), vec![ClassId(4)]);
    }

    #[test]
    fn test_lineage_of_unknown_class_is_itself() {
        let tree = mage_tree();
        assert_eq!(tree.lineage(ClassId(99)), vec![ClassId(99)]);
    }

    #[test]
    fn test_lineage_terminates_on_cycle() {
        let tree = ClassHierarchy::new(vec![
            PlayerClass::new(1, "A").with_parent(ClassId(2)),
            PlayerClass::new(2, "B").with_parent(ClassId(1)),
        ]);
        assert_eq!(tree.lineage(ClassId(1)), vec![ClassId(1), ClassId(2)]);
    }

    #[test]
    fn test_lineage_respects_depth_limit() {
        let classes = (1..=10).map(|i| {
            let class = PlayerClass::new(i, format!("C{i}"));
            if i > 1 { class.with_parent(ClassId(i - 1)) } else { class }
        });
        let tree = ClassHierarchy::new(classes).with_max_depth(3);
        let lineage = tree.lineage(ClassId(10));
        assert_eq!(lineage, vec![ClassId(10), ClassId(9), ClassId(8), ClassId(7)]);
    }

    #[test]
    fn test_name_of_unknown_class() {
        let tree = mage_tree();
        assert_eq!(tree.name_of(ClassId(2)), "Fire Mage");
        assert_eq!(tree.name_of(ClassId(42)), "Class #42");
    }

    #[test]
    fn test_validate_accepts_tree() {
        assert!(mage_tree().validate().is_ok());
    }

    #[test]
    fn test_validate_reports_cycle() {
        let tree = ClassHierarchy::new(vec![
            PlayerClass::new(1, "A").with_parent(ClassId(3)),
            PlayerClass::new(2, "B").with_parent(ClassId(1)),
            PlayerClass::new(3, "C").with_parent(ClassId(2)),
        ]);
        let err = tree.validate().unwrap_err();
        assert_eq!(err.to_string(), "class inheritance cycle detected: A -> C -> B -> A");
    }

    #[test]
    fn test_validate_reports_unknown_parent() {
        let tree = ClassHierarchy::new(vec![PlayerClass::new(5, "Orphan").with_parent(ClassId(6))]);
        assert!(matches!(
            tree.validate(),
            Err(CatalogError::UnknownParentClass { class: 5, parent: 6 })
        ));
    }
}
