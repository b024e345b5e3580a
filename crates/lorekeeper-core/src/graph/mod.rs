//! Editor graph utilities.
//!
//! Auto-layout for the node/edge graphs the visual editor shows (dialog,
//! quest, and skill trees all share the same shape).

pub mod layout;

pub use layout::{layout, snap};
