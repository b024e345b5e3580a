//! Skill progression service.
//!
//! Loads a character and the authored skill graph, runs the availability
//! evaluator, and applies unlocks. The evaluator itself never mutates
//! anything; this is the only place an unlock record is written.

use chrono::Utc;

use lorekeeper_types::availability::{Availability, SkillAvailability};
use lorekeeper_types::character::{CharacterId, PlayerCharacter, UnlockedSkill};
use lorekeeper_types::config::DEFAULT_MAX_LINEAGE_DEPTH;
use lorekeeper_types::error::ProgressionError;
use lorekeeper_types::skill::SkillId;

use crate::repository::character::CharacterRepository;
use crate::repository::skill_graph::SkillGraphRepository;
use crate::skill::catalog::SkillCatalog;

/// Service wrapping evaluation and unlocking around the repositories.
pub struct ProgressionService<C: CharacterRepository, G: SkillGraphRepository> {
    characters: C,
    graphs: G,
    max_lineage_depth: usize,
}

impl<C: CharacterRepository, G: SkillGraphRepository> ProgressionService<C, G> {
    pub fn new(characters: C, graphs: G) -> Self {
        Self {
            characters,
            graphs,
            max_lineage_depth: DEFAULT_MAX_LINEAGE_DEPTH,
        }
    }

    pub fn with_max_lineage_depth(mut self, max_lineage_depth: usize) -> Self {
        self.max_lineage_depth = max_lineage_depth;
        self
    }

    async fn load_character(&self, id: CharacterId) -> Result<PlayerCharacter, ProgressionError> {
        self.characters
            .get(id)
            .await
            .map_err(|e| ProgressionError::Storage(e.to_string()))?
            .ok_or(ProgressionError::CharacterNotFound(id.0))
    }

    /// Build a catalog from the stored skill graph.
    pub async fn catalog(&self) -> Result<SkillCatalog, ProgressionError> {
        let graph = self
            .graphs
            .load()
            .await
            .map_err(|e| ProgressionError::Storage(e.to_string()))?;
        Ok(SkillCatalog::new(graph).with_max_lineage_depth(self.max_lineage_depth))
    }

    /// Evaluate one skill for a character without changing anything.
    pub async fn check(
        &self,
        character_id: CharacterId,
        skill_id: SkillId,
    ) -> Result<Availability, ProgressionError> {
        let character = self.load_character(character_id).await?;
        let catalog = self.catalog().await?;
        Ok(catalog.evaluate(skill_id, &character)?)
    }

    /// Unlock a skill if the character currently qualifies, then persist.
    pub async fn unlock(
        &self,
        character_id: CharacterId,
        skill_id: SkillId,
    ) -> Result<UnlockedSkill, ProgressionError> {
        let mut character = self.load_character(character_id).await?;
        let catalog = self.catalog().await?;
        let availability = catalog.evaluate(skill_id, &character)?;

        if availability.already_unlocked {
            return Err(ProgressionError::AlreadyUnlocked(skill_id.0));
        }
        if !availability.can_unlock {
            return Err(ProgressionError::Locked {
                skill: skill_id.0,
                reasons: availability.reasons,
            });
        }

        let record = UnlockedSkill {
            skill_id,
            unlocked_at: Utc::now(),
        };
        character.unlocked_skills.push(record.clone());
        self.characters
            .save(&character)
            .await
            .map_err(|e| ProgressionError::Storage(e.to_string()))?;

        tracing::info!(character = %character_id, skill = %skill_id, "skill unlocked");
        Ok(record)
    }

    /// Availability of every skill for a character.
    pub async fn list(
        &self,
        character_id: CharacterId,
    ) -> Result<Vec<SkillAvailability>, ProgressionError> {
        let character = self.load_character(character_id).await?;
        let catalog = self.catalog().await?;
        Ok(catalog.availability_for(&character))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::sync::Mutex;

    use lorekeeper_types::class::{ClassId, PlayerClass};
    use lorekeeper_types::error::{CatalogError, RepositoryError};
    use lorekeeper_types::skill::{Skill, SkillGraph, SkillLink};

    // --- In-memory repositories ---

    #[derive(Default)]
    struct MemoryCharacters {
        characters: Mutex<HashMap<CharacterId, PlayerCharacter>>,
    }

    impl MemoryCharacters {
        fn with(character: PlayerCharacter) -> Self {
            let store = Self::default();
            store.characters.lock().unwrap().insert(character.id, character);
            store
        }

        fn snapshot(&self, id: CharacterId) -> PlayerCharacter {
            self.characters.lock().unwrap()[&id].clone()
        }
    }

    impl CharacterRepository for MemoryCharacters {
        async fn get(&self, id: CharacterId) -> Result<Option<PlayerCharacter>, RepositoryError> {
            Ok(self.characters.lock().unwrap().get(&id).cloned())
        }

        async fn save(&self, character: &PlayerCharacter) -> Result<(), RepositoryError> {
            self.characters
                .lock()
                .unwrap()
                .insert(character.id, character.clone());
            Ok(())
        }
    }

    struct StaticGraph(SkillGraph);

    impl SkillGraphRepository for StaticGraph {
        async fn load(&self) -> Result<SkillGraph, RepositoryError> {
            Ok(self.0.clone())
        }

        async fn save(&self, _graph: &SkillGraph) -> Result<(), RepositoryError> {
            Err(RepositoryError::Io("read-only".to_string()))
        }
    }

    struct BrokenGraph;

    impl SkillGraphRepository for BrokenGraph {
        async fn load(&self) -> Result<SkillGraph, RepositoryError> {
            Err(RepositoryError::Malformed("expected `{` at line 1".to_string()))
        }

        async fn save(&self, _graph: &SkillGraph) -> Result<(), RepositoryError> {
            Ok(())
        }
    }

    // --- Fixtures ---

    fn warrior_tree() -> SkillGraph {
        SkillGraph {
            skills: vec![
                Skill::new(1, "Power Strike"),
                Skill::new(2, "Cleave").with_required_level(3),
            ],
            links: vec![SkillLink::required(SkillId(1), SkillId(2)).unwrap()],
            classes: vec![PlayerClass::new(1, "Warrior")],
            quests: vec![],
        }
    }

    fn service(
        character: PlayerCharacter,
    ) -> ProgressionService<MemoryCharacters, StaticGraph> {
        ProgressionService::new(MemoryCharacters::with(character), StaticGraph(warrior_tree()))
    }

    fn squire() -> PlayerCharacter {
        PlayerCharacter::new(1, "Squire", ClassId(1)).with_level(3)
    }

    // --- Tests ---

    #[tokio::test]
    async fn test_check_does_not_mutate() {
        let svc = service(squire());
        let result = svc.check(CharacterId(1), SkillId(1)).await.unwrap();
        assert!(result.can_unlock);
        assert!(svc.characters.snapshot(CharacterId(1)).unlocked_skills.is_empty());
    }

    #[tokio::test]
    async fn test_unlock_persists_record() {
        let svc = service(squire());
        let record = svc.unlock(CharacterId(1), SkillId(1)).await.unwrap();
        assert_eq!(record.skill_id, SkillId(1));

        let stored = svc.characters.snapshot(CharacterId(1));
        assert!(stored.has_unlocked(SkillId(1)));

        // The prerequisite is now satisfied.
        let cleave = svc.check(CharacterId(1), SkillId(2)).await.unwrap();
        assert!(cleave.can_unlock);
    }

    #[tokio::test]
    async fn test_double_unlock_refused() {
        let svc = service(squire().with_unlocked(SkillId(1)));
        let err = svc.unlock(CharacterId(1), SkillId(1)).await.unwrap_err();
        assert!(matches!(err, ProgressionError::AlreadyUnlocked(1)));
        assert_eq!(svc.characters.snapshot(CharacterId(1)).unlocked_skills.len(), 1);
    }

    #[tokio::test]
    async fn test_locked_unlock_reports_reasons() {
        let svc = service(squire().with_level(1));
        let err = svc.unlock(CharacterId(1), SkillId(2)).await.unwrap_err();
        match err {
            ProgressionError::Locked { skill, reasons } => {
                assert_eq!(skill, 2);
                assert_eq!(
                    reasons,
                    vec!["requires character level 3", "requires all parent skills: Power Strike"]
                );
            }
            other => panic!("expected Locked, got {other:?}"),
        }
        assert!(svc.characters.snapshot(CharacterId(1)).unlocked_skills.is_empty());
    }

    #[tokio::test]
    async fn test_unknown_character_and_skill() {
        let svc = service(squire());
        assert!(matches!(
            svc.check(CharacterId(9), SkillId(1)).await,
            Err(ProgressionError::CharacterNotFound(9))
        ));
        assert!(matches!(
            svc.check(CharacterId(1), SkillId(99)).await,
            Err(ProgressionError::Catalog(CatalogError::SkillNotFound(99)))
        ));
    }

    #[tokio::test]
    async fn test_list_covers_every_skill() {
        let svc = service(squire());
        let listing = svc.list(CharacterId(1)).await.unwrap();
        let names: Vec<&str> = listing.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["Cleave", "Power Strike"]);
        assert!(!listing[0].availability.can_unlock);
        assert!(listing[1].availability.can_unlock);
    }

    #[tokio::test]
    async fn test_storage_errors_surface() {
        let svc = ProgressionService::new(MemoryCharacters::with(squire()), BrokenGraph);
        let err = svc.list(CharacterId(1)).await.unwrap_err();
        assert_eq!(
            err.to_string(),
            "storage error: malformed document: expected `{` at line 1"
        );
    }
}
