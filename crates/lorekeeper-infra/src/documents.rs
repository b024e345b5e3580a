//! Editor documents read from and written to arbitrary paths.
//!
//! Layout requests and dialog graphs are exported by the visual editor as
//! standalone JSON files rather than living in the data directory.

use std::path::Path;

use anyhow::Context;
use serde::Serialize;
use serde::de::DeserializeOwned;

use lorekeeper_types::dialog::DialogGraph;
use lorekeeper_types::graph::LayoutRequest;

/// Read and deserialize a JSON document.
pub async fn read_json<T: DeserializeOwned>(path: &Path) -> anyhow::Result<T> {
    let content = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("failed to read {}", path.display()))?;
    serde_json::from_str(&content).with_context(|| format!("failed to parse {}", path.display()))
}

/// Serialize a value as pretty JSON and write it, creating parent directories.
pub async fn write_json<T: Serialize>(path: &Path, value: &T) -> anyhow::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent)
            .await
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }
    let content = serde_json::to_string_pretty(value)?;
    tokio::fs::write(path, content)
        .await
        .with_context(|| format!("failed to write {}", path.display()))
}

/// Load an auto-layout request (`{nodes, edges, config?}`).
pub async fn load_layout_request(path: &Path) -> anyhow::Result<LayoutRequest> {
    read_json(path).await
}

/// Load an NPC dialog graph (`{nodes, connections}`).
pub async fn load_dialog_graph(path: &Path) -> anyhow::Result<DialogGraph> {
    read_json(path).await
}
