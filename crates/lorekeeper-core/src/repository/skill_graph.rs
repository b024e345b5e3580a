//! Skill graph repository trait definition.

use lorekeeper_types::error::RepositoryError;
use lorekeeper_types::skill::SkillGraph;

/// Repository trait for the authored skill tree (skills, links, classes, quests).
pub trait SkillGraphRepository: Send + Sync {
    /// Load the whole skill graph. A store with nothing authored yet returns
    /// an empty graph.
    fn load(&self) -> impl std::future::Future<Output = Result<SkillGraph, RepositoryError>> + Send;

    /// Replace the stored skill graph.
    fn save(
        &self,
        graph: &SkillGraph,
    ) -> impl std::future::Future<Output = Result<(), RepositoryError>> + Send;
}
