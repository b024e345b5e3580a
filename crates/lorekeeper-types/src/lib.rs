//! Shared domain types for Lorekeeper.
//!
//! Classes, quests, characters, skills and skill links, editor graph nodes,
//! dialog graphs, and their associated error types.
//!
//! Zero infrastructure dependencies -- only serde, chrono, thiserror.

pub mod availability;
pub mod character;
pub mod class;
pub mod config;
pub mod dialog;
pub mod error;
pub mod graph;
pub mod quest;
pub mod skill;
