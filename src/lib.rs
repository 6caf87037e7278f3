// Allow common clippy pedantic lints that aren't critical for this codebase
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_lossless)]
#![allow(clippy::too_many_lines)]
#![allow(clippy::ref_option)]
#![allow(clippy::unused_self)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::items_after_statements)]
#![allow(clippy::unnecessary_wraps)]
#![allow(clippy::match_same_arms)]
#![allow(clippy::needless_pass_by_value)]
#![allow(clippy::unused_async)]

//! # Storefront ETL
//!
//! A batch ETL pipeline for storefront data: users, carts, and products.
//!
//! ## Stages
//!
//! - **Extract**: paginated REST API fetch, written to object storage as
//!   newline-delimited JSON under the `raw/` namespace
//! - **Transform**: entity-aware JSON flattening, audit columns, surrogate
//!   keys, written as quoted CSV under the `cleanse/` namespace
//! - **Load**: projection into a fixed target schema and a full-replace
//!   load into a DuckDB warehouse table
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use storefront_etl::config::PipelineConfig;
//! use storefront_etl::pipeline::{DagRunner, Pipeline};
//!
//! #[tokio::main]
//! async fn main() -> storefront_etl::Result<()> {
//!     let config = PipelineConfig::from_path("pipeline.yaml")?;
//!     let report = DagRunner::new(Pipeline::new(config)).run().await?;
//!     println!("{} tasks finished", report.tasks.len());
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! start ─▶ extract{users,carts,products} ─▶ transform{×3} ─▶ load{×3} ─▶ end
//!                (raw/*.json)              (cleanse/*.csv)   (DuckDB)
//! ```
//!
//! Each stage group runs its three entity tasks concurrently; group edges
//! are hard barriers. Any task failure routes to the failure-notification
//! path instead of `end`.

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Module declarations
// ============================================================================

/// Error types for the pipeline
pub mod error;

/// Common types and type aliases
pub mod types;

/// Pipeline configuration
pub mod config;

/// HTTP client with retry and rate limiting
pub mod http;

/// Paginated API fetcher
pub mod fetch;

/// Object storage blob layer
pub mod storage;

/// Raw-layer NDJSON writer
pub mod extract;

/// JSON flattening strategies
pub mod flatten;

/// Audit columns and surrogate keys
pub mod enrich;

/// CSV encoding and decoding of flat tables
pub mod tabular;

/// Declarative per-entity schema registry
pub mod schema;

/// Warehouse cleaning and full-replace loading
pub mod warehouse;

/// Stage runners and the fixed DAG
pub mod pipeline;

/// Command-line interface
pub mod cli;

// ============================================================================
// Re-exports
// ============================================================================

pub use error::{Error, Result};
pub use types::*;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
