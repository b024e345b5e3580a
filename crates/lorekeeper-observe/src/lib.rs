//! Observability setup for Lorekeeper binaries.

pub mod tracing_setup;
