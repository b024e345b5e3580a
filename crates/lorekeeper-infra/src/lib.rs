//! Infrastructure layer for Lorekeeper.
//!
//! Contains implementations of the repository traits defined in
//! `lorekeeper-core` (a JSON data directory), the `config.toml` loader, and
//! helpers for reading editor documents from disk.

pub mod config;
pub mod documents;
pub mod filesystem;
