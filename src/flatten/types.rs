//! Flat row and table types
//!
//! A `FlatRow` is an insertion-ordered mapping from column name to a JSON
//! scalar. A `FlatTable` collects rows and tracks the union of their
//! columns in first-appearance order, which becomes the CSV header order.

use crate::types::JsonValue;

/// One flat row: insertion-ordered column → value pairs.
///
/// Rows are small (tens of columns), so lookups scan linearly.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FlatRow {
    cells: Vec<(String, JsonValue)>,
}

impl FlatRow {
    /// Create an empty row
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a value, replacing any existing value for the column
    pub fn insert(&mut self, column: impl Into<String>, value: JsonValue) {
        let column = column.into();
        if let Some(cell) = self.cells.iter_mut().find(|(c, _)| *c == column) {
            cell.1 = value;
        } else {
            self.cells.push((column, value));
        }
    }

    /// Get a value by column name
    pub fn get(&self, column: &str) -> Option<&JsonValue> {
        self.cells
            .iter()
            .find(|(c, _)| c == column)
            .map(|(_, v)| v)
    }

    /// Iterate cells in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &JsonValue)> {
        self.cells.iter().map(|(c, v)| (c.as_str(), v))
    }

    /// Number of cells
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// True when the row has no cells
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

impl FromIterator<(String, JsonValue)> for FlatRow {
    fn from_iter<T: IntoIterator<Item = (String, JsonValue)>>(iter: T) -> Self {
        let mut row = Self::new();
        for (column, value) in iter {
            row.insert(column, value);
        }
        row
    }
}

/// An in-memory flat table: ordered columns plus rows
#[derive(Debug, Clone, Default)]
pub struct FlatTable {
    columns: Vec<String>,
    rows: Vec<FlatRow>,
}

impl FlatTable {
    /// Create an empty table
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a table from rows
    pub fn from_rows(rows: impl IntoIterator<Item = FlatRow>) -> Self {
        let mut table = Self::new();
        for row in rows {
            table.push_row(row);
        }
        table
    }

    /// Append a row, registering unseen columns in first-appearance order
    pub fn push_row(&mut self, row: FlatRow) {
        for (column, _) in row.iter() {
            if !self.columns.iter().any(|c| c == column) {
                self.columns.push(column.to_string());
            }
        }
        self.rows.push(row);
    }

    /// Append a computed column to every row
    pub fn append_column<F>(&mut self, column: impl Into<String>, f: F)
    where
        F: Fn(&FlatRow) -> JsonValue,
    {
        let column = column.into();
        for row in &mut self.rows {
            let value = f(row);
            row.insert(column.clone(), value);
        }
        if !self.columns.contains(&column) {
            self.columns.push(column);
        }
    }

    /// Column names in header order
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// The rows
    pub fn rows(&self) -> &[FlatRow] {
        &self.rows
    }

    /// Number of rows
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// True when there are no rows
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// True when the table has a column of this name
    pub fn has_column(&self, column: &str) -> bool {
        self.columns.iter().any(|c| c == column)
    }
}
