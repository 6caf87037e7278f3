//! CLI module
//!
//! Command-line interface for the pipeline.
//!
//! # Commands
//!
//! - `extract` - Pull one entity's collection into the raw layer
//! - `transform` - Flatten one raw blob into a cleansed CSV
//! - `load` - Load one cleansed CSV into the warehouse
//! - `run` - Execute the full task graph

mod commands;
mod runner;

pub use commands::{Cli, Commands};
pub use runner::Runner;
