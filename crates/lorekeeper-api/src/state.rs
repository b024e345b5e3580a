//! Application state wiring services together.
//!
//! The progression service is generic over repository traits; AppState pins
//! it to the JSON data directory store.

use std::path::PathBuf;
use std::sync::Arc;

use lorekeeper_core::service::progression::ProgressionService;
use lorekeeper_infra::config::load_global_config;
use lorekeeper_infra::filesystem::JsonGameStore;
use lorekeeper_types::config::GlobalConfig;

/// Concrete type alias for the service generics pinned to infra implementations.
pub type ConcreteProgressionService = ProgressionService<JsonGameStore, JsonGameStore>;

/// Shared application state used by CLI commands.
#[derive(Clone)]
pub struct AppState {
    pub progression: Arc<ConcreteProgressionService>,
    pub store: JsonGameStore,
    pub config: GlobalConfig,
}

impl AppState {
    /// Create the data directory if needed, load `config.toml`, and wire services.
    pub async fn from_data_dir(data_dir: PathBuf) -> anyhow::Result<Self> {
        tokio::fs::create_dir_all(&data_dir).await?;

        let config = load_global_config(&data_dir).await;
        let store = JsonGameStore::new(&data_dir);
        let progression = ProgressionService::new(store.clone(), store.clone())
            .with_max_lineage_depth(config.evaluator.max_lineage_depth);

        tracing::debug!(data_dir = %data_dir.display(), "application state initialized");

        Ok(Self {
            progression: Arc::new(progression),
            store,
            config,
        })
    }
}
