//! Character repository trait definition.

use lorekeeper_types::character::{CharacterId, PlayerCharacter};
use lorekeeper_types::error::RepositoryError;

/// Repository trait for player character persistence.
///
/// Uses native async fn in traits (Rust 2024 edition, no async_trait macro).
pub trait CharacterRepository: Send + Sync {
    /// Get a character by id, or `None` if it does not exist.
    fn get(
        &self,
        id: CharacterId,
    ) -> impl std::future::Future<Output = Result<Option<PlayerCharacter>, RepositoryError>> + Send;

    /// Create or replace a character.
    fn save(
        &self,
        character: &PlayerCharacter,
    ) -> impl std::future::Future<Output = Result<(), RepositoryError>> + Send;
}
