//! Skill progression logic.
//!
//! Class lineage resolution, declarative availability-rule checks, the
//! id-indexed skill catalog, and the availability evaluator that combines
//! them. The domain types live in `lorekeeper-types::skill`.

pub mod availability;
pub mod catalog;
pub mod lineage;
pub mod rules;
