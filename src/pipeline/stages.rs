//! Per-entity stage implementations

use std::time::{Duration, Instant};

use bytes::Bytes;
use tracing::{info, warn};

use crate::config::PipelineConfig;
use crate::enrich::Enricher;
use crate::error::Result;
use crate::extract::RawWriter;
use crate::fetch::PaginationFetcher;
use crate::flatten::flatten_ndjson;
use crate::http::{HttpClient, HttpClientConfig};
use crate::schema::entity_schema;
use crate::storage::BlobStore;
use crate::tabular::{decode_csv, encode_csv};
use crate::types::EntityKind;
use crate::warehouse::{clean_table, Warehouse};

/// Outcome of one stage run
#[derive(Debug, Clone)]
pub struct StageReport {
    /// Task name, e.g. `extract_users`
    pub task: String,
    /// Rows (or records) the stage produced
    pub rows: usize,
    /// Pages fetched (extract only)
    pub pages: usize,
    /// Wall-clock duration in milliseconds
    pub duration_ms: u64,
}

impl StageReport {
    fn new(stage: &str, entity: EntityKind, rows: usize, pages: usize, start: Instant) -> Self {
        Self {
            task: format!("{stage}_{entity}"),
            rows,
            pages,
            duration_ms: start.elapsed().as_millis() as u64,
        }
    }
}

/// The three-stage pipeline over one configuration
#[derive(Debug, Clone)]
pub struct Pipeline {
    config: PipelineConfig,
}

impl Pipeline {
    pub fn new(config: PipelineConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    fn http_client(&self) -> HttpClient {
        let config = HttpClientConfig::builder()
            .max_retries(self.config.api.max_retries)
            .build();
        HttpClient::with_config(config)
    }

    /// Extract one entity's collection and write the raw NDJSON blob.
    ///
    /// A mid-run page failure keeps the pages already collected; the
    /// partial blob is still written and the interruption is logged.
    pub async fn run_extract(&self, entity: EntityKind) -> Result<StageReport> {
        let start = Instant::now();
        info!(entity = %entity, "Extract stage starting");

        let fetcher = PaginationFetcher::new(self.http_client())
            .with_page_size(self.config.api.page_size)
            .with_page_delay(Duration::from_millis(self.config.api.page_delay_ms));

        let outcome = fetcher.fetch_all(&self.config.entity_url(entity)).await?;
        if let Some(reason) = &outcome.interrupted {
            warn!(
                entity = %entity,
                rows = outcome.items.len(),
                "Extraction interrupted, keeping partial results: {reason}"
            );
        }

        let store = BlobStore::parse(&self.config.storage.bucket_url)?;
        let path = RawWriter::new(store).write(entity, &outcome.items).await?;

        info!(
            entity = %entity,
            rows = outcome.items.len(),
            pages = outcome.pages,
            path,
            "Extract stage finished"
        );
        Ok(StageReport::new(
            "extract",
            entity,
            outcome.items.len(),
            outcome.pages as usize,
            start,
        ))
    }

    /// Flatten one entity's raw blob, enrich it, and write the CSV.
    pub async fn run_transform(&self, entity: EntityKind) -> Result<StageReport> {
        let start = Instant::now();
        info!(entity = %entity, "Transform stage starting");

        let store = BlobStore::parse(&self.config.storage.bucket_url)?;
        let raw = store.get_text(&entity.raw_path()).await?;

        let mut table = flatten_ndjson(&raw, Some(entity));
        Enricher::new(&self.config.audit).enrich(&mut table, entity);

        let csv = encode_csv(&table)?;
        let path = store
            .put_bytes(&entity.cleanse_path(), Bytes::from(csv))
            .await?;

        info!(
            entity = %entity,
            rows = table.len(),
            path,
            "Transform stage finished"
        );
        Ok(StageReport::new("transform", entity, table.len(), 0, start))
    }

    /// Load one entity's cleansed CSV into the warehouse, full replace.
    pub async fn run_load(&self, entity: EntityKind) -> Result<StageReport> {
        let start = Instant::now();
        info!(entity = %entity, "Load stage starting");

        let store = BlobStore::parse(&self.config.storage.bucket_url)?;
        let csv = store.get_text(&entity.cleanse_path()).await?;

        let schema = entity_schema(entity);
        let cleaned = clean_table(&decode_csv(&csv)?, schema)?;

        let mut warehouse = Warehouse::open(&self.config.warehouse.database)?;
        let loaded =
            warehouse.load_full_replace(&self.config.warehouse.dataset_id, schema, &cleaned)?;

        info!(
            entity = %entity,
            rows = loaded,
            dataset = self.config.warehouse.dataset_id,
            "Load stage finished"
        );
        Ok(StageReport::new("load", entity, loaded, 0, start))
    }
}
