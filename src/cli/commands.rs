//! CLI commands and argument parsing

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::types::EntityKind;

/// Storefront ETL pipeline CLI
#[derive(Parser, Debug)]
#[command(name = "storefront-etl")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Pipeline configuration file (YAML)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Extract one entity's collection into the raw layer
    Extract {
        /// Entity to extract
        #[arg(long, value_enum)]
        name: EntityKind,

        /// API base URL (entity endpoints are `<base>/<entity>`)
        #[arg(long)]
        url: Option<String>,

        /// Bucket URL or local directory for the raw blob
        #[arg(long)]
        bucket: Option<String>,
    },

    /// Flatten one raw blob into a cleansed CSV
    Transform {
        /// Entity strategy to apply; omitted means general flattening
        #[arg(long, value_enum)]
        data_type: Option<EntityKind>,

        /// Bucket URL or local directory holding both layers
        #[arg(long)]
        bucket: Option<String>,

        /// Source blob path inside the bucket (defaults to `raw/<entity>.json`)
        #[arg(long)]
        source_blob: Option<String>,

        /// Destination blob path inside the bucket (defaults to `cleanse/<entity>.csv`)
        #[arg(long)]
        destination_blob: Option<String>,
    },

    /// Load one cleansed CSV into the warehouse, replacing the table
    Load {
        /// Entity schema to load against
        #[arg(long, value_enum)]
        data_type: EntityKind,

        /// CSV location: a full blob URL, or a path inside the configured bucket
        #[arg(long)]
        input_file: Option<String>,

        /// Destination dataset (schema) name
        #[arg(long)]
        dataset_id: Option<String>,

        /// Warehouse database file
        #[arg(long)]
        warehouse: Option<String>,
    },

    /// Execute the full task graph: extract, transform, load
    Run,
}
