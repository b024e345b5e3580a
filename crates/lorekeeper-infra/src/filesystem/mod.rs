//! Filesystem adapters for Lorekeeper.
//!
//! The data directory holds the authored skill tree and one JSON file per
//! character:
//!
//! ```text
//! {data_dir}/
//!   config.toml
//!   skills.json          {skills, links, classes, quests}
//!   characters/
//!     1.json
//!     2.json
//! ```

pub mod store;

use std::path::PathBuf;

pub use store::JsonGameStore;

/// Environment variable overriding the data directory.
pub const DATA_DIR_ENV: &str = "LOREKEEPER_DATA_DIR";

/// Resolve the data directory from environment or platform defaults.
///
/// Priority:
/// 1. `LOREKEEPER_DATA_DIR` environment variable
/// 2. `~/.lorekeeper`
pub fn resolve_data_dir() -> PathBuf {
    if let Ok(dir) = std::env::var(DATA_DIR_ENV) {
        return PathBuf::from(dir);
    }

    if let Some(home) = dirs::home_dir() {
        return home.join(".lorekeeper");
    }

    // Last resort: current directory
    PathBuf::from(".lorekeeper")
}
