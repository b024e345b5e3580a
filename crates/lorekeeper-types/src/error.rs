use thiserror::Error;

/// Errors raised while authoring skill graph structure.
#[derive(Debug, Error)]
pub enum SkillGraphError {
    #[error("skill {0} cannot be linked to itself")]
    SelfLoop(i64),
}

/// Errors from skill catalog lookups and structural validation.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("skill {0} not found")]
    SkillNotFound(i64),

    #[error("link {parent} -> {child} references an unknown skill")]
    DanglingLink { parent: i64, child: i64 },

    #[error("skill link cycle detected: {0}")]
    CycleDetected(String),

    #[error("class {class} has unknown parent {parent}")]
    UnknownParentClass { class: i64, parent: i64 },

    #[error("class inheritance cycle detected: {0}")]
    ClassCycle(String),
}

/// Errors from repository operations (used by trait definitions in lorekeeper-core).
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("I/O error: {0}")]
    Io(String),

    #[error("malformed document: {0}")]
    Malformed(String),
}

/// Errors from applying progression changes to a character.
#[derive(Debug, Error)]
pub enum ProgressionError {
    #[error("character {0} not found")]
    CharacterNotFound(i64),

    #[error(transparent)]
    Catalog(#[from] CatalogError),

    #[error("skill {0} is already unlocked")]
    AlreadyUnlocked(i64),

    #[error("skill {skill} cannot be unlocked: {}", .reasons.join("; "))]
    Locked { skill: i64, reasons: Vec<String> },

    #[error("storage error: {0}")]
    Storage(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_error_display() {
        let err = CatalogError::DanglingLink { parent: 1, child: 9 };
        assert_eq!(err.to_string(), "link 1 -> 9 references an unknown skill");
    }

    #[test]
    fn test_locked_error_joins_reasons() {
        let err = ProgressionError::Locked {
            skill: 4,
            reasons: vec![
                "requires character level 5".to_string(),
                "requires completed quests: Collect Herbs".to_string(),
            ],
        };
        assert_eq!(
            err.to_string(),
            "skill 4 cannot be unlocked: requires character level 5; requires completed quests: Collect Herbs"
        );
    }

    #[test]
    fn test_repository_error_display() {
        let err = RepositoryError::Malformed("expected value at line 1".to_string());
        assert_eq!(err.to_string(), "malformed document: expected value at line 1");
    }
}
