//! CSV encoding and decoding
//!
//! The cleansed layer is quoted CSV: every non-numeric field is quoted,
//! numeric fields are written bare. Decoding keeps every field as text
//! (empty fields become null); typing happens later against the entity
//! schema in the load path.

use csv::{QuoteStyle, ReaderBuilder, WriterBuilder};

use crate::error::{Error, Result};
use crate::flatten::{FlatRow, FlatTable};
use crate::types::JsonValue;

/// Encode a table as CSV with a header row.
///
/// Cells render as their scalar text; null renders empty, and any
/// non-scalar leftovers render as compact JSON.
pub fn encode_csv(table: &FlatTable) -> Result<String> {
    // A table with no columns has nothing to head the file with
    if table.columns().is_empty() {
        return Ok(String::new());
    }

    let mut writer = WriterBuilder::new()
        .quote_style(QuoteStyle::NonNumeric)
        .from_writer(vec![]);

    writer.write_record(table.columns())?;

    for row in table.rows() {
        let record: Vec<String> = table
            .columns()
            .iter()
            .map(|column| cell_text(row.get(column)))
            .collect();
        writer.write_record(&record)?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| Error::Other(format!("CSV writer flush failed: {e}")))?;
    String::from_utf8(bytes).map_err(|e| Error::Other(format!("CSV output is not UTF-8: {e}")))
}

/// Decode CSV back into a table.
///
/// All values come back as strings except empty fields, which become
/// null. Numeric typing is the load path's job.
pub fn decode_csv(text: &str) -> Result<FlatTable> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(false)
        .from_reader(text.as_bytes());

    let headers: Vec<String> = reader
        .headers()?
        .iter()
        .map(std::string::ToString::to_string)
        .collect();

    let mut table = FlatTable::new();
    for record in reader.records() {
        let record = record?;
        let mut row = FlatRow::new();
        for (column, field) in headers.iter().zip(record.iter()) {
            let value = if field.is_empty() {
                JsonValue::Null
            } else {
                JsonValue::String(field.to_string())
            };
            row.insert(column.clone(), value);
        }
        table.push_row(row);
    }
    Ok(table)
}

/// Render one cell for CSV output
fn cell_text(value: Option<&JsonValue>) -> String {
    match value {
        None | Some(JsonValue::Null) => String::new(),
        Some(JsonValue::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}
