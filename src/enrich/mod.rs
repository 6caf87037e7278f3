//! Audit columns and surrogate keys
//!
//! Runs after flattening, before the CSV write. Appends the five audit
//! columns (shared timestamp per call, update mirrors create on a full
//! refresh) and the entity's md5 surrogate key derived from its natural
//! keys.

use chrono::Utc;
use md5::{Digest, Md5};

use crate::config::AuditConfig;
use crate::flatten::{FlatRow, FlatTable};
use crate::schema::{entity_schema, AUDIT_COLUMNS};
use crate::types::{EntityKind, JsonValue};

/// Appends audit metadata and surrogate keys to flat tables
#[derive(Debug, Clone)]
pub struct Enricher {
    created_by: String,
    source_system: String,
}

impl Enricher {
    pub fn new(audit: &AuditConfig) -> Self {
        Self {
            created_by: audit.created_by.clone(),
            source_system: audit.source_system.clone(),
        }
    }

    /// Append the audit columns and the entity's surrogate key in place.
    ///
    /// All rows in one call share the same audit timestamp.
    pub fn enrich(&self, table: &mut FlatTable, entity: EntityKind) {
        self.append_audit_columns(table);
        append_surrogate_key(table, entity);
    }

    fn append_audit_columns(&self, table: &mut FlatTable) {
        let timestamp = Utc::now().format("%Y-%m-%dT%H:%M:%S%.6f").to_string();

        let values: [(&str, String); 5] = [
            (AUDIT_COLUMNS[0], self.created_by.clone()),
            (AUDIT_COLUMNS[1], timestamp.clone()),
            (AUDIT_COLUMNS[2], self.created_by.clone()),
            (AUDIT_COLUMNS[3], timestamp),
            (AUDIT_COLUMNS[4], self.source_system.clone()),
        ];

        for (column, value) in values {
            table.append_column(column, move |_| JsonValue::String(value.clone()));
        }
    }
}

/// Append the schema's surrogate key column to every row
fn append_surrogate_key(table: &mut FlatTable, entity: EntityKind) {
    let spec = entity_schema(entity).surrogate_key;
    table.append_column(spec.column, |row| {
        JsonValue::String(surrogate_key(row, spec.natural_keys))
    });
}

/// md5 hex digest over the concatenated natural-key renderings,
/// in order, with no separator
pub fn surrogate_key(row: &FlatRow, natural_keys: &[&str]) -> String {
    let mut concatenated = String::new();
    for key in natural_keys {
        if let Some(value) = row.get(key) {
            concatenated.push_str(&scalar_text(value));
        }
    }
    md5_hex(&concatenated)
}

/// Render a JSON scalar the way it prints: `7` stays `7`, not `7.0`.
/// Null renders empty so a missing key and a null key hash alike.
pub fn scalar_text(value: &JsonValue) -> String {
    match value {
        JsonValue::Null => String::new(),
        JsonValue::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn md5_hex(text: &str) -> String {
    let digest = Md5::digest(text.as_bytes());
    format!("{digest:x}")
}

#[cfg(test)]
mod tests;
