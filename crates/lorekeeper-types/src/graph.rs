//! Editor graph types shared by dialog, quest, and skill graphs.
//!
//! The visual editor exchanges nodes and edges in one generic shape. Only the
//! fields the layout engine needs are typed; everything else rides along in
//! `extra` and is passed through untouched.

use serde::{Deserialize, Serialize};

/// Node type that seeds auto-layout.
pub const START_NODE_TYPE: &str = "start";

/// Canvas position coordinates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Position {
    #[serde(default)]
    pub x: f64,
    #[serde(default)]
    pub y: f64,
}

impl Position {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// A node on the editor canvas.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphNode {
    pub id: String,
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub node_type: Option<String>,
    #[serde(default)]
    pub position: Position,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl GraphNode {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            node_type: None,
            position: Position::default(),
            extra: serde_json::Map::new(),
        }
    }

    pub fn with_type(mut self, node_type: impl Into<String>) -> Self {
        self.node_type = Some(node_type.into());
        self
    }

    pub fn at(mut self, x: f64, y: f64) -> Self {
        self.position = Position::new(x, y);
        self
    }

    /// Whether this node is a declared start node.
    ///
    /// The editor stores the domain node type under `data.nodeType`, so that
    /// is honoured alongside the top-level `type`.
    pub fn is_start(&self) -> bool {
        if self.node_type.as_deref() == Some(START_NODE_TYPE) {
            return true;
        }
        self.extra
            .get("data")
            .and_then(|data| data.get("nodeType"))
            .and_then(|t| t.as_str())
            == Some(START_NODE_TYPE)
    }
}

/// A directed edge on the editor canvas.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphEdge {
    pub source: String,
    pub target: String,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl GraphEdge {
    pub fn new(source: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
            extra: serde_json::Map::new(),
        }
    }
}

fn default_horizontal_spacing() -> f64 {
    320.0
}

fn default_vertical_spacing() -> f64 {
    200.0
}

fn default_margin() -> f64 {
    80.0
}

fn default_grid_size() -> f64 {
    10.0
}

/// Auto-layout tuning. Every field is optional in serialized form.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutConfig {
    /// Distance between depth columns.
    #[serde(default = "default_horizontal_spacing", alias = "horizontal_spacing")]
    pub horizontal_spacing: f64,
    /// Minimum distance between siblings in a column.
    #[serde(default = "default_vertical_spacing", alias = "vertical_spacing")]
    pub vertical_spacing: f64,
    #[serde(default = "default_margin", alias = "horizontal_margin")]
    pub horizontal_margin: f64,
    #[serde(default = "default_margin", alias = "vertical_margin")]
    pub vertical_margin: f64,
    /// Snapping grid; values <= 1 snap to whole units.
    #[serde(default = "default_grid_size", alias = "grid_size")]
    pub grid_size: f64,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            horizontal_spacing: default_horizontal_spacing(),
            vertical_spacing: default_vertical_spacing(),
            horizontal_margin: default_margin(),
            vertical_margin: default_margin(),
            grid_size: default_grid_size(),
        }
    }
}

/// The editor's "auto-arrange" payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LayoutRequest {
    #[serde(default)]
    pub nodes: Vec<GraphNode>,
    #[serde(default)]
    pub edges: Vec<GraphEdge>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub config: Option<LayoutConfig>,
}
