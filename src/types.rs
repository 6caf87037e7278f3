//! Common types used throughout the pipeline
//!
//! This module contains shared type definitions, type aliases,
//! and utility types used across multiple modules.

use serde::{Deserialize, Serialize};
use std::fmt;

// ============================================================================
// Type Aliases
// ============================================================================

/// JSON value type (re-exported from serde_json)
pub type JsonValue = serde_json::Value;

/// JSON object type
pub type JsonObject = serde_json::Map<String, JsonValue>;

// ============================================================================
// Entity Kind
// ============================================================================

/// The three entity types the pipeline moves, end to end.
///
/// Each entity owns one raw blob, one cleansed blob, and one warehouse
/// table; the three tracks within a stage are fully independent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    /// Storefront users
    Users,
    /// Shopping carts (fan out to one row per line item)
    Carts,
    /// Product catalog
    Products,
}

impl EntityKind {
    /// All entities, in DAG task order
    pub const ALL: [EntityKind; 3] = [EntityKind::Users, EntityKind::Carts, EntityKind::Products];

    /// Key under which the source API returns this entity's page items
    pub fn collection_key(&self) -> &'static str {
        match self {
            EntityKind::Users => "users",
            EntityKind::Carts => "carts",
            EntityKind::Products => "products",
        }
    }

    /// Blob path in the raw namespace
    pub fn raw_path(&self) -> String {
        format!("raw/{}.json", self.collection_key())
    }

    /// Blob path in the cleanse namespace
    pub fn cleanse_path(&self) -> String {
        format!("cleanse/{}.csv", self.collection_key())
    }

    /// Destination table name in the warehouse dataset
    pub fn table_name(&self) -> &'static str {
        match self {
            EntityKind::Users => "users_table",
            EntityKind::Carts => "carts_table",
            EntityKind::Products => "products_table",
        }
    }

    /// Parse from the string tag used on the CLI and in config
    pub fn parse(tag: &str) -> Option<Self> {
        match tag {
            "users" => Some(EntityKind::Users),
            "carts" => Some(EntityKind::Carts),
            "products" => Some(EntityKind::Products),
            _ => None,
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.collection_key())
    }
}

// ============================================================================
// Backoff Type
// ============================================================================

/// Type of backoff for retries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BackoffType {
    /// Constant delay between retries
    Constant,
    /// Linear increase in delay
    Linear,
    /// Exponential increase in delay
    #[default]
    Exponential,
}
