//! JSON-file implementation of the character and skill graph repositories.

use std::path::{Path, PathBuf};

use serde::Serialize;
use serde::de::DeserializeOwned;

use lorekeeper_core::repository::character::CharacterRepository;
use lorekeeper_core::repository::skill_graph::SkillGraphRepository;
use lorekeeper_types::character::{CharacterId, PlayerCharacter};
use lorekeeper_types::error::RepositoryError;
use lorekeeper_types::skill::SkillGraph;

/// Repository backed by JSON documents in a data directory.
///
/// Each save rewrites the whole document through a temporary file followed
/// by a rename, so readers never observe a half-written file.
#[derive(Debug, Clone)]
pub struct JsonGameStore {
    data_dir: PathBuf,
}

impl JsonGameStore {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// `{data_dir}/skills.json`
    pub fn skills_path(&self) -> PathBuf {
        self.data_dir.join("skills.json")
    }

    /// `{data_dir}/characters/{id}.json`
    pub fn character_path(&self, id: CharacterId) -> PathBuf {
        self.data_dir.join("characters").join(format!("{id}.json"))
    }
}

async fn read_document<T: DeserializeOwned>(path: &Path) -> Result<Option<T>, RepositoryError> {
    let content = match tokio::fs::read_to_string(path).await {
        Ok(content) => content,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(err) => return Err(RepositoryError::Io(format!("{}: {err}", path.display()))),
    };

    serde_json::from_str(&content)
        .map(Some)
        .map_err(|err| RepositoryError::Malformed(format!("{}: {err}", path.display())))
}

async fn write_document<T: Serialize>(path: &Path, value: &T) -> Result<(), RepositoryError> {
    let io_err = |err: std::io::Error| RepositoryError::Io(format!("{}: {err}", path.display()));

    if let Some(parent) = path.parent() {
        tokio::fs::create_dir_all(parent).await.map_err(io_err)?;
    }

    let content = serde_json::to_string_pretty(value)
        .map_err(|err| RepositoryError::Malformed(err.to_string()))?;
    let tmp_path = path.with_extension("json.tmp");
    tokio::fs::write(&tmp_path, content).await.map_err(io_err)?;
    tokio::fs::rename(&tmp_path, path).await.map_err(io_err)?;

    tracing::debug!(path = %path.display(), "wrote document");
    Ok(())
}

impl CharacterRepository for JsonGameStore {
    async fn get(&self, id: CharacterId) -> Result<Option<PlayerCharacter>, RepositoryError> {
        read_document(&self.character_path(id)).await
    }

    async fn save(&self, character: &PlayerCharacter) -> Result<(), RepositoryError> {
        write_document(&self.character_path(character.id), character).await
    }
}

impl SkillGraphRepository for JsonGameStore {
    async fn load(&self) -> Result<SkillGraph, RepositoryError> {
        let path = self.skills_path();
        match read_document(&path).await? {
            Some(graph) => Ok(graph),
            None => {
                tracing::debug!("No skills.json at {}, using an empty skill graph", path.display());
                Ok(SkillGraph::default())
            }
        }
    }

    async fn save(&self, graph: &SkillGraph) -> Result<(), RepositoryError> {
        write_document(&self.skills_path(), graph).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lorekeeper_types::class::{ClassId, PlayerClass};
    use lorekeeper_types::quest::QuestId;
    use lorekeeper_types::skill::{Skill, SkillId, SkillLink};
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_missing_character_is_none() {
        let dir = tempdir().unwrap();
        let store = JsonGameStore::new(dir.path());
        assert!(store.get(CharacterId(4)).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_character_save_and_get() {
        let dir = tempdir().unwrap();
        let store = JsonGameStore::new(dir.path());
        let character = PlayerCharacter::new(4, "Brannoc", ClassId(2))
            .with_level(7)
            .with_completed_quest(QuestId(3))
            .with_unlocked(SkillId(1));

        CharacterRepository::save(&store, &character).await.unwrap();
        assert!(dir.path().join("characters").join("4.json").exists());
        assert!(!dir.path().join("characters").join("4.json.tmp").exists());

        let loaded = store.get(CharacterId(4)).await.unwrap().unwrap();
        assert_eq!(loaded.name, "Brannoc");
        assert_eq!(loaded.level, 7);
        assert!(loaded.completed_quests.contains(&QuestId(3)));
        assert!(loaded.has_unlocked(SkillId(1)));
    }

    #[tokio::test]
    async fn test_malformed_character_reports_path() {
        let dir = tempdir().unwrap();
        let store = JsonGameStore::new(dir.path());
        let path = store.character_path(CharacterId(1));
        tokio::fs::create_dir_all(path.parent().unwrap()).await.unwrap();
        tokio::fs::write(&path, "{not json").await.unwrap();

        let err = store.get(CharacterId(1)).await.unwrap_err();
        assert!(matches!(err, RepositoryError::Malformed(ref msg) if msg.contains("1.json")));
    }

    #[tokio::test]
    async fn test_missing_skill_graph_is_empty() {
        let dir = tempdir().unwrap();
        let graph = JsonGameStore::new(dir.path()).load().await.unwrap();
        assert!(graph.skills.is_empty());
        assert!(graph.links.is_empty());
    }

    #[tokio::test]
    async fn test_skill_graph_save_and_load() {
        let dir = tempdir().unwrap();
        let store = JsonGameStore::new(dir.path());
        let graph = SkillGraph {
            skills: vec![Skill::new(1, "Stone Skin"), Skill::new(2, "Iron Skin")],
            links: vec![SkillLink::required(SkillId(1), SkillId(2)).unwrap()],
            classes: vec![PlayerClass::new(1, "Warden")],
            quests: vec![],
        };

        SkillGraphRepository::save(&store, &graph).await.unwrap();
        let loaded = store.load().await.unwrap();
        assert_eq!(loaded.skills.len(), 2);
        assert_eq!(loaded.links[0].child_id, SkillId(2));
        assert_eq!(loaded.classes[0].name, "Warden");
    }

    #[tokio::test]
    async fn test_reads_hand_written_skill_graph() {
        let dir = tempdir().unwrap();
        tokio::fs::write(
            dir.path().join("skills.json"),
            r#"{
                "skills": [
                    {"id": 1, "name": "Shadow Step", "requiredLevel": 4, "requiredClasses": [3]},
                    {"id": 2, "name": "Vanish"}
                ],
                "links": [{"parentId": 1, "childId": 2}],
                "classes": [{"id": 3, "name": "Rogue"}]
            }"#,
        )
        .await
        .unwrap();

        let graph = JsonGameStore::new(dir.path()).load().await.unwrap();
        assert_eq!(graph.skills[0].required_level, Some(4));
        assert_eq!(graph.skills[0].required_classes, vec![ClassId(3)]);
        assert!(graph.links[0].requires_all_parents);
        assert!(graph.quests.is_empty());
    }
}
