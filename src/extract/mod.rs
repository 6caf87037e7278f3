//! Raw-layer NDJSON writer
//!
//! Wraps each fetched record in an extraction envelope and writes the
//! whole collection as newline-delimited JSON into the `raw/` namespace.
//! One extraction timestamp per write call; every item in the run shares
//! it.

use crate::error::Result;
use crate::storage::BlobStore;
use crate::types::{EntityKind, JsonValue};
use bytes::Bytes;
use chrono::Utc;
use serde_json::json;
use tracing::info;

/// ISO-8601 timestamp for one extraction run
pub fn extraction_timestamp() -> String {
    Utc::now().format("%Y-%m-%dT%H:%M:%S%.6f").to_string()
}

/// Wrap one record in the extraction envelope
pub fn envelope(item: &JsonValue, timestamp: &str) -> JsonValue {
    json!({
        "metadata": { "extraction_timestamp": timestamp },
        "data": item,
    })
}

/// Serialize a collection as NDJSON, one envelope per line
pub fn encode_ndjson(items: &[JsonValue], timestamp: &str) -> Result<String> {
    let mut lines = Vec::with_capacity(items.len());
    for item in items {
        lines.push(serde_json::to_string(&envelope(item, timestamp))?);
    }
    Ok(lines.join("\n"))
}

/// Writes extracted collections into the raw namespace
pub struct RawWriter {
    store: BlobStore,
}

impl RawWriter {
    /// Create a writer over the given store
    pub fn new(store: BlobStore) -> Self {
        Self { store }
    }

    /// Envelope, serialize, and overwrite `raw/<entity>.json`.
    ///
    /// Upload failures propagate; the caller (orchestrator) decides
    /// whether to retry the whole task.
    pub async fn write(&self, entity: EntityKind, items: &[JsonValue]) -> Result<String> {
        let timestamp = extraction_timestamp();
        let ndjson = encode_ndjson(items, &timestamp)?;
        let path = entity.raw_path();
        let full_path = self.store.put_bytes(&path, Bytes::from(ndjson)).await?;
        info!("Wrote {} raw {entity} records to {full_path}", items.len());
        Ok(full_path)
    }
}

#[cfg(test)]
mod tests;
