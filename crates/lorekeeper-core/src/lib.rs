//! Business logic and repository trait definitions for Lorekeeper.
//!
//! The skill availability evaluator and the graph auto-layout engine are pure,
//! synchronous functions over in-memory snapshots. This crate also defines the
//! "ports" (repository traits) that the infrastructure layer implements; it
//! depends only on `lorekeeper-types` -- never on `lorekeeper-infra` or any
//! IO crate.

pub mod dialog;
pub mod graph;
pub mod repository;
pub mod service;
pub mod skill;
