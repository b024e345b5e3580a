//! Global configuration types for Lorekeeper.
//!
//! `GlobalConfig` represents the top-level `config.toml` that tunes the
//! auto-layout engine and the availability evaluator.

use serde::{Deserialize, Serialize};

use crate::graph::LayoutConfig;

/// Default bound on class-lineage walks.
pub const DEFAULT_MAX_LINEAGE_DEPTH: usize = 64;

/// Top-level configuration for Lorekeeper.
///
/// Loaded from `~/.lorekeeper/config.toml`. All fields have sensible defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GlobalConfig {
    /// Auto-layout spacing and grid settings.
    #[serde(default)]
    pub layout: LayoutConfig,

    /// Availability evaluator settings.
    #[serde(default)]
    pub evaluator: EvaluatorConfig,
}

fn default_max_lineage_depth() -> usize {
    DEFAULT_MAX_LINEAGE_DEPTH
}

/// Evaluator guard rails.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvaluatorConfig {
    /// Maximum number of ancestors followed when computing a class lineage.
    #[serde(default = "default_max_lineage_depth")]
    pub max_lineage_depth: usize,
}

impl Default for EvaluatorConfig {
    fn default() -> Self {
        Self {
            max_lineage_depth: default_max_lineage_depth(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_global_config_default_values() {
        let config = GlobalConfig::default();
        assert_eq!(config.evaluator.max_lineage_depth, 64);
        assert_eq!(config.layout.grid_size, 10.0);
    }

    #[test]
    fn test_global_config_deserialize_with_defaults() {
        let config: GlobalConfig = toml::from_str("").unwrap();
        assert_eq!(config.evaluator.max_lineage_depth, 64);
        assert_eq!(config.layout.horizontal_spacing, 320.0);
    }

    #[test]
    fn test_global_config_deserialize_with_values() {
        let toml_str = r#"
[layout]
horizontal_spacing = 400.0
grid_size = 20.0

[evaluator]
max_lineage_depth = 8
"#;
        let config: GlobalConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.layout.horizontal_spacing, 400.0);
        assert_eq!(config.layout.grid_size, 20.0);
        assert_eq!(config.layout.vertical_spacing, 200.0);
        assert_eq!(config.evaluator.max_lineage_depth, 8);
    }
}
