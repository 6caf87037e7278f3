//! Schema-driven table cleaning
//!
//! Projects a decoded CSV table onto the entity schema: every required
//! source column must exist (a missing column is a hard error, not a
//! silent null), columns are renamed to their warehouse names, numeric
//! columns are coerced (unparseable values become null), and the
//! entity's row filter runs last.

use tracing::debug;

use crate::error::{Error, Result};
use crate::flatten::{FlatRow, FlatTable};
use crate::schema::{ColumnType, EntitySchema};
use crate::types::JsonValue;

/// Project, rename, coerce, and filter one table against a schema
pub fn clean_table(table: &FlatTable, schema: &EntitySchema) -> Result<FlatTable> {
    let sources = schema.required_sources();
    let targets = schema.target_columns();
    let types = schema.column_types();

    for source in &sources {
        if !table.has_column(source) {
            return Err(Error::missing_column(
                *source,
                schema.entity.table_name(),
            ));
        }
    }

    let mut cleaned = FlatTable::new();
    let mut dropped = 0usize;

    for row in table.rows() {
        let mut projected = FlatRow::new();
        for ((source, target), ty) in sources.iter().zip(&targets).zip(&types) {
            let value = row.get(source).cloned().unwrap_or(JsonValue::Null);
            projected.insert(*target, coerce(value, *ty));
        }

        if schema.filter.keep(&projected) {
            cleaned.push_row(projected);
        } else {
            dropped += 1;
        }
    }

    if dropped > 0 {
        debug!(
            table = schema.entity.table_name(),
            dropped, "Rows removed by entity filter"
        );
    }

    Ok(cleaned)
}

/// Coerce one cell to its column type.
///
/// Text columns pass through. Numeric columns accept numbers and
/// number-shaped strings; anything else becomes null.
fn coerce(value: JsonValue, ty: ColumnType) -> JsonValue {
    match ty {
        ColumnType::Text => match value {
            JsonValue::Null | JsonValue::String(_) => value,
            other => JsonValue::String(other.to_string()),
        },
        ColumnType::Integer => as_i64(&value).map_or(JsonValue::Null, JsonValue::from),
        ColumnType::Double => as_f64(&value).map_or(JsonValue::Null, JsonValue::from),
    }
}

fn as_i64(value: &JsonValue) -> Option<i64> {
    match value {
        JsonValue::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().filter(|f| f.fract() == 0.0).map(|f| f as i64)),
        JsonValue::String(s) => {
            let trimmed = s.trim();
            trimmed.parse::<i64>().ok().or_else(|| {
                trimmed
                    .parse::<f64>()
                    .ok()
                    .filter(|f| f.fract() == 0.0)
                    .map(|f| f as i64)
            })
        }
        _ => None,
    }
}

fn as_f64(value: &JsonValue) -> Option<f64> {
    match value {
        JsonValue::Number(n) => n.as_f64(),
        JsonValue::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
}
