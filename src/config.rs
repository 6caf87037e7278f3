//! Pipeline configuration
//!
//! All pipeline settings live in one YAML file: source API, blob storage
//! location, warehouse destination, audit literals, and DAG retry policy.
//! CLI flags override individual fields per invocation.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

// ============================================================================
// Top-Level Pipeline Config
// ============================================================================

/// Complete pipeline configuration loaded from YAML
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Source API settings
    #[serde(default)]
    pub api: ApiConfig,

    /// Blob storage settings
    #[serde(default)]
    pub storage: StorageConfig,

    /// Warehouse settings
    #[serde(default)]
    pub warehouse: WarehouseConfig,

    /// Audit column literals
    #[serde(default)]
    pub audit: AuditConfig,

    /// DAG retry policy
    #[serde(default)]
    pub dag: DagConfig,
}

impl PipelineConfig {
    /// Load configuration from a YAML file
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::from_str(&content)
    }

    /// Parse configuration from a YAML string
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(content: &str) -> Result<Self> {
        let config: PipelineConfig = serde_yaml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate required fields
    pub fn validate(&self) -> Result<()> {
        if self.api.base_url.is_empty() {
            return Err(Error::missing_field("api.base_url"));
        }
        if self.storage.bucket_url.is_empty() {
            return Err(Error::missing_field("storage.bucket_url"));
        }
        if self.api.page_size == 0 {
            return Err(Error::config("api.page_size must be greater than zero"));
        }
        Ok(())
    }

    /// Source URL for one entity's collection endpoint
    pub fn entity_url(&self, entity: crate::types::EntityKind) -> String {
        format!(
            "{}/{}",
            self.api.base_url.trim_end_matches('/'),
            entity.collection_key()
        )
    }
}

// ============================================================================
// Source API
// ============================================================================

/// Source API settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL of the REST API (entity endpoints are `<base>/<entity>`)
    #[serde(default)]
    pub base_url: String,

    /// Page size for limit/skip pagination
    #[serde(default = "default_page_size")]
    pub page_size: u32,

    /// Delay between page requests, in milliseconds (rate-limit courtesy)
    #[serde(default = "default_page_delay_ms")]
    pub page_delay_ms: u64,

    /// Max retries per page request
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: String::new(),
            page_size: default_page_size(),
            page_delay_ms: default_page_delay_ms(),
            max_retries: default_max_retries(),
        }
    }
}

fn default_page_size() -> u32 {
    30
}

fn default_page_delay_ms() -> u64 {
    500
}

fn default_max_retries() -> u32 {
    3
}

// ============================================================================
// Blob Storage
// ============================================================================

/// Blob storage settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Bucket URL: `s3://bucket`, `gs://bucket`, `az://container`,
    /// or a local directory path
    #[serde(default)]
    pub bucket_url: String,
}

// ============================================================================
// Warehouse
// ============================================================================

/// Warehouse settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WarehouseConfig {
    /// Path to the DuckDB database file (`:memory:` for ephemeral)
    #[serde(default = "default_database")]
    pub database: String,

    /// Dataset (schema) that holds the destination tables
    #[serde(default = "default_dataset_id")]
    pub dataset_id: String,
}

impl Default for WarehouseConfig {
    fn default() -> Self {
        Self {
            database: default_database(),
            dataset_id: default_dataset_id(),
        }
    }
}

fn default_database() -> String {
    "warehouse.duckdb".to_string()
}

fn default_dataset_id() -> String {
    "ecommerce_data".to_string()
}

// ============================================================================
// Audit
// ============================================================================

/// Audit column literals, applied identically to every row of a run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditConfig {
    /// Value for `record_create_name` / `record_update_name`
    #[serde(default = "default_created_by")]
    pub created_by: String,

    /// Value for `source_system_code`
    #[serde(default = "default_source_system")]
    pub source_system: String,
}

impl Default for AuditConfig {
    fn default() -> Self {
        Self {
            created_by: default_created_by(),
            source_system: default_source_system(),
        }
    }
}

fn default_created_by() -> String {
    "storefront-etl".to_string()
}

fn default_source_system() -> String {
    "PUBLIC_STOREFRONT_API".to_string()
}

// ============================================================================
// DAG
// ============================================================================

/// DAG retry policy (in-process stand-in for the external scheduler)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DagConfig {
    /// Retries per task after the first attempt
    #[serde(default = "default_task_retries")]
    pub task_retries: u32,

    /// Fixed delay before a task retry, in seconds
    #[serde(default = "default_retry_delay_secs")]
    pub retry_delay_secs: u64,
}

impl Default for DagConfig {
    fn default() -> Self {
        Self {
            task_retries: default_task_retries(),
            retry_delay_secs: default_retry_delay_secs(),
        }
    }
}

fn default_task_retries() -> u32 {
    1
}

fn default_retry_delay_secs() -> u64 {
    120
}
