//! CLI runner - executes commands

use bytes::Bytes;
use tracing::info;

use crate::cli::commands::{Cli, Commands};
use crate::config::PipelineConfig;
use crate::enrich::Enricher;
use crate::error::{Error, Result};
use crate::flatten::flatten_ndjson;
use crate::pipeline::{DagRunner, Pipeline};
use crate::schema::entity_schema;
use crate::storage::BlobStore;
use crate::tabular::{decode_csv, encode_csv};
use crate::types::EntityKind;
use crate::warehouse::{clean_table, Warehouse};

/// CLI runner
pub struct Runner {
    cli: Cli,
}

impl Runner {
    /// Create a new runner
    pub fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Run the CLI command
    pub async fn run(&self) -> Result<()> {
        match &self.cli.command {
            Commands::Extract { name, url, bucket } => {
                self.extract(*name, url.as_deref(), bucket.as_deref()).await
            }
            Commands::Transform {
                data_type,
                bucket,
                source_blob,
                destination_blob,
            } => {
                self.transform(
                    *data_type,
                    bucket.as_deref(),
                    source_blob.as_deref(),
                    destination_blob.as_deref(),
                )
                .await
            }
            Commands::Load {
                data_type,
                input_file,
                dataset_id,
                warehouse,
            } => {
                self.load(
                    *data_type,
                    input_file.as_deref(),
                    dataset_id.as_deref(),
                    warehouse.as_deref(),
                )
                .await
            }
            Commands::Run => self.run_dag().await,
        }
    }

    /// Load the configuration, or start from defaults when no file is given
    fn load_config(&self) -> Result<PipelineConfig> {
        match &self.cli.config {
            Some(path) => PipelineConfig::from_path(path),
            None => Ok(PipelineConfig::default()),
        }
    }

    async fn extract(
        &self,
        entity: EntityKind,
        url: Option<&str>,
        bucket: Option<&str>,
    ) -> Result<()> {
        let mut config = self.load_config()?;
        if let Some(url) = url {
            config.api.base_url = url.to_string();
        }
        if let Some(bucket) = bucket {
            config.storage.bucket_url = bucket.to_string();
        }
        config.validate()?;

        let report = Pipeline::new(config).run_extract(entity).await?;
        info!(
            task = report.task,
            rows = report.rows,
            pages = report.pages,
            duration_ms = report.duration_ms,
            "Extract complete"
        );
        Ok(())
    }

    async fn transform(
        &self,
        entity: Option<EntityKind>,
        bucket: Option<&str>,
        source_blob: Option<&str>,
        destination_blob: Option<&str>,
    ) -> Result<()> {
        let mut config = self.load_config()?;
        if let Some(bucket) = bucket {
            config.storage.bucket_url = bucket.to_string();
        }
        if config.storage.bucket_url.is_empty() {
            return Err(Error::missing_field("storage.bucket_url"));
        }

        let source = match (source_blob, entity) {
            (Some(path), _) => path.to_string(),
            (None, Some(entity)) => entity.raw_path(),
            (None, None) => {
                return Err(Error::config(
                    "transform needs --source-blob or --data-type",
                ))
            }
        };
        let destination = match (destination_blob, entity) {
            (Some(path), _) => path.to_string(),
            (None, Some(entity)) => entity.cleanse_path(),
            (None, None) => {
                return Err(Error::config(
                    "transform needs --destination-blob or --data-type",
                ))
            }
        };

        let store = BlobStore::parse(&config.storage.bucket_url)?;
        let raw = store.get_text(&source).await?;

        let mut table = flatten_ndjson(&raw, entity);
        if let Some(entity) = entity {
            Enricher::new(&config.audit).enrich(&mut table, entity);
        }

        let csv = encode_csv(&table)?;
        let path = store.put_bytes(&destination, Bytes::from(csv)).await?;
        info!(rows = table.len(), path, "Transform complete");
        Ok(())
    }

    async fn load(
        &self,
        entity: EntityKind,
        input_file: Option<&str>,
        dataset_id: Option<&str>,
        warehouse: Option<&str>,
    ) -> Result<()> {
        let mut config = self.load_config()?;
        if let Some(dataset_id) = dataset_id {
            config.warehouse.dataset_id = dataset_id.to_string();
        }
        if let Some(warehouse) = warehouse {
            config.warehouse.database = warehouse.to_string();
        }

        // A full blob URL carries its own store; a bare path resolves
        // against the configured bucket
        let (store, path) = match input_file {
            Some(input) if input.contains("://") => BlobStore::parse_blob_url(input)?,
            Some(input) => {
                if config.storage.bucket_url.is_empty() {
                    BlobStore::parse_blob_url(input)?
                } else {
                    (BlobStore::parse(&config.storage.bucket_url)?, input.to_string())
                }
            }
            None => {
                if config.storage.bucket_url.is_empty() {
                    return Err(Error::missing_field("storage.bucket_url"));
                }
                (
                    BlobStore::parse(&config.storage.bucket_url)?,
                    entity.cleanse_path(),
                )
            }
        };

        let csv = store.get_text(&path).await?;
        let schema = entity_schema(entity);
        let cleaned = clean_table(&decode_csv(&csv)?, schema)?;

        let mut db = Warehouse::open(&config.warehouse.database)?;
        let loaded = db.load_full_replace(&config.warehouse.dataset_id, schema, &cleaned)?;
        info!(
            rows = loaded,
            dataset = config.warehouse.dataset_id,
            table = schema.entity.table_name(),
            "Load complete"
        );
        Ok(())
    }

    async fn run_dag(&self) -> Result<()> {
        let config = self.load_config()?;
        config.validate()?;

        let report = DagRunner::new(Pipeline::new(config)).run().await?;
        info!(
            tasks = report.tasks.len(),
            duration_ms = report.duration_ms,
            "Pipeline complete"
        );
        Ok(())
    }
}
