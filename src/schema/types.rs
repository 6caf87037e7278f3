//! Schema descriptor types

use crate::flatten::FlatRow;
use crate::types::{EntityKind, JsonValue};

/// Audit columns appended to every cleansed table, in output order
pub const AUDIT_COLUMNS: [&str; 5] = [
    "record_create_name",
    "record_create_datetime",
    "record_update_name",
    "record_update_datetime",
    "source_system_code",
];

/// Warehouse column type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnType {
    Text,
    Integer,
    Double,
}

impl ColumnType {
    /// DDL type name
    pub fn sql(&self) -> &'static str {
        match self {
            Self::Text => "VARCHAR",
            Self::Integer => "BIGINT",
            Self::Double => "DOUBLE",
        }
    }

    /// True for columns that go through numeric coercion
    pub fn is_numeric(&self) -> bool {
        matches!(self, Self::Integer | Self::Double)
    }
}

/// One cleansed column: source name, warehouse name, type
#[derive(Debug, Clone, Copy)]
pub struct ColumnMapping {
    pub source: &'static str,
    pub target: &'static str,
    pub ty: ColumnType,
}

impl ColumnMapping {
    pub const fn new(source: &'static str, target: &'static str, ty: ColumnType) -> Self {
        Self { source, target, ty }
    }
}

/// How the entity's surrogate key is derived: md5 over the concatenated
/// text renderings of the natural-key columns, in order, no separator.
#[derive(Debug, Clone, Copy)]
pub struct SurrogateKeySpec {
    pub column: &'static str,
    pub natural_keys: &'static [&'static str],
}

/// Entity-specific row filter, applied after rename and coercion
#[derive(Debug, Clone, Copy)]
pub enum RowFilter {
    /// Drop rows where any listed target column is null
    RequireNonNull { columns: &'static [&'static str] },
    /// Keep rows where the column is strictly greater than the floor
    PriceAbove { column: &'static str, floor: f64 },
}

impl RowFilter {
    /// True when the row survives the filter
    pub fn keep(&self, row: &FlatRow) -> bool {
        match self {
            Self::RequireNonNull { columns } => columns.iter().all(|column| {
                row.get(column)
                    .is_some_and(|value| !matches!(value, JsonValue::Null))
            }),
            Self::PriceAbove { column, floor } => row
                .get(column)
                .and_then(JsonValue::as_f64)
                .is_some_and(|price| price > *floor),
        }
    }
}

/// Everything the load path needs to know about one entity
#[derive(Debug, Clone, Copy)]
pub struct EntitySchema {
    pub entity: EntityKind,
    pub surrogate_key: SurrogateKeySpec,
    pub business: &'static [ColumnMapping],
    pub filter: RowFilter,
}

impl EntitySchema {
    /// Source column names required in the cleansed CSV, in output order:
    /// surrogate key, business columns, audit columns.
    pub fn required_sources(&self) -> Vec<&'static str> {
        let mut sources = Vec::with_capacity(1 + self.business.len() + AUDIT_COLUMNS.len());
        sources.push(self.surrogate_key.column);
        sources.extend(self.business.iter().map(|m| m.source));
        sources.extend(AUDIT_COLUMNS);
        sources
    }

    /// Warehouse column names in the same order as `required_sources`
    pub fn target_columns(&self) -> Vec<&'static str> {
        let mut targets = Vec::with_capacity(1 + self.business.len() + AUDIT_COLUMNS.len());
        targets.push(self.surrogate_key.column);
        targets.extend(self.business.iter().map(|m| m.target));
        targets.extend(AUDIT_COLUMNS);
        targets
    }

    /// Warehouse column types, parallel to `target_columns`
    pub fn column_types(&self) -> Vec<ColumnType> {
        let mut types = Vec::with_capacity(1 + self.business.len() + AUDIT_COLUMNS.len());
        types.push(ColumnType::Text);
        types.extend(self.business.iter().map(|m| m.ty));
        types.extend(std::iter::repeat(ColumnType::Text).take(AUDIT_COLUMNS.len()));
        types
    }

    /// Target column names that receive numeric coercion
    pub fn numeric_targets(&self) -> Vec<&'static str> {
        self.business
            .iter()
            .filter(|m| m.ty.is_numeric())
            .map(|m| m.target)
            .collect()
    }
}
