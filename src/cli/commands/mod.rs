//! CLI subcommand implementations

pub mod config;
pub mod diag;
pub mod events;
