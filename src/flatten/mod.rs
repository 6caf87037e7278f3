//! JSON flattening
//!
//! Converts the raw NDJSON layer into a flat in-memory table. Each line
//! holds an extraction envelope (`metadata` + `data`); the `data` object
//! is flattened by an entity-specific strategy, and the envelope metadata
//! is merged into every emitted row under a `metadata_` prefix.
//!
//! Malformed lines and lines whose `data` is not an object are skipped
//! with a logged warning; a single bad line never aborts the run.

mod strategies;
mod types;

pub use strategies::{flatten_carts, flatten_general, flatten_prefixed};
pub use types::{FlatRow, FlatTable};

use crate::types::{EntityKind, JsonValue};
use tracing::warn;

/// Flatten one NDJSON stream into a table.
///
/// `entity` selects the strategy; `None` falls back to the general
/// recursive flattening of the whole envelope.
pub fn flatten_ndjson(text: &str, entity: Option<EntityKind>) -> FlatTable {
    let mut table = FlatTable::new();

    for line in text.lines() {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }

        let parsed: JsonValue = match serde_json::from_str(trimmed) {
            Ok(value) => value,
            Err(e) => {
                warn!("Skipping line with invalid JSON: {e}");
                continue;
            }
        };

        if !parsed.get("data").is_some_and(JsonValue::is_object) {
            warn!("Skipping line - 'data' is not an object");
            continue;
        }

        let mut rows = flatten_record(&parsed, entity);

        // Envelope metadata rides along on every emitted row
        if let Some(metadata) = parsed.get("metadata").and_then(JsonValue::as_object) {
            for row in &mut rows {
                for (key, value) in metadata {
                    row.insert(format!("metadata_{key}"), value.clone());
                }
            }
        }

        for row in rows {
            table.push_row(row);
        }
    }

    table
}

/// Flatten one parsed envelope by the entity's strategy
fn flatten_record(envelope: &JsonValue, entity: Option<EntityKind>) -> Vec<FlatRow> {
    // Presence of an object `data` field is checked by the caller
    let Some(data) = envelope.get("data").and_then(JsonValue::as_object) else {
        return Vec::new();
    };

    match entity {
        Some(EntityKind::Users) => vec![flatten_prefixed(data, "user")],
        Some(EntityKind::Products) => vec![flatten_prefixed(data, "product")],
        Some(EntityKind::Carts) => flatten_carts(data),
        None => vec![flatten_general(envelope, "_")],
    }
}

#[cfg(test)]
mod tests;
