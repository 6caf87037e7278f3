//! Warehouse load path
//!
//! Two halves: `clean` projects a cleansed CSV table onto an entity
//! schema (required-column check, renames, numeric coercion, row
//! filters), and `Warehouse` performs full-replace loads into DuckDB.

mod clean;
mod loader;

pub use clean::clean_table;
pub use loader::Warehouse;
