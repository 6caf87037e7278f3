//! DuckDB full-replace loader

use duckdb::{params_from_iter, Connection};
use tracing::info;

use crate::error::{Error, Result};
use crate::flatten::FlatTable;
use crate::schema::EntitySchema;
use crate::types::JsonValue;

/// Connection to the target warehouse database
pub struct Warehouse {
    conn: Connection,
}

impl Warehouse {
    /// Open (or create) a warehouse database file.
    ///
    /// `:memory:` opens an in-memory database.
    pub fn open(database: &str) -> Result<Self> {
        let conn = if database == ":memory:" {
            Connection::open_in_memory()?
        } else {
            Connection::open(database)?
        };
        Ok(Self { conn })
    }

    /// Replace the target table with the cleaned rows.
    ///
    /// Creates the dataset schema if needed, recreates the table with
    /// the entity's typed columns, and inserts every row inside one
    /// transaction. Any failure rolls back, leaving no partial load.
    pub fn load_full_replace(
        &mut self,
        dataset: &str,
        schema: &EntitySchema,
        table: &FlatTable,
    ) -> Result<usize> {
        let table_name = schema.entity.table_name();
        let targets = schema.target_columns();
        let types = schema.column_types();

        let column_defs: Vec<String> = targets
            .iter()
            .zip(&types)
            .map(|(name, ty)| format!("\"{name}\" {}", ty.sql()))
            .collect();

        let ddl = format!(
            "CREATE SCHEMA IF NOT EXISTS \"{dataset}\";\n\
             CREATE OR REPLACE TABLE \"{dataset}\".\"{table_name}\" ({});",
            column_defs.join(", ")
        );

        let placeholders: Vec<&str> = std::iter::repeat("?").take(targets.len()).collect();
        let quoted: Vec<String> = targets.iter().map(|t| format!("\"{t}\"")).collect();
        let insert_sql = format!(
            "INSERT INTO \"{dataset}\".\"{table_name}\" ({}) VALUES ({})",
            quoted.join(", "),
            placeholders.join(", ")
        );

        let tx = self.conn.transaction()?;
        tx.execute_batch(&ddl)?;
        {
            let mut stmt = tx.prepare(&insert_sql)?;
            for row in table.rows() {
                let values = targets
                    .iter()
                    .map(|target| to_db_value(row.get(target)))
                    .collect::<Result<Vec<_>>>()?;
                stmt.execute(params_from_iter(values))?;
            }
        }
        tx.commit()?;

        info!(
            dataset,
            table = table_name,
            rows = table.len(),
            "Table replaced"
        );
        Ok(table.len())
    }

    /// Row count of a loaded table
    pub fn count_rows(&self, dataset: &str, table_name: &str) -> Result<usize> {
        let sql = format!("SELECT COUNT(*) FROM \"{dataset}\".\"{table_name}\"");
        let count: i64 = self.conn.query_row(&sql, [], |row| row.get(0))?;
        Ok(count as usize)
    }

    /// Run a scalar text query, for spot checks
    pub fn query_text(&self, sql: &str) -> Result<Option<String>> {
        let value: duckdb::types::Value = self.conn.query_row(sql, [], |row| row.get(0))?;
        Ok(match value {
            duckdb::types::Value::Null => None,
            duckdb::types::Value::Text(s) => Some(s),
            other => Some(format!("{other:?}")),
        })
    }
}

/// Map a JSON cell to a DuckDB parameter value
fn to_db_value(value: Option<&JsonValue>) -> Result<duckdb::types::Value> {
    use duckdb::types::Value as Db;
    Ok(match value {
        None | Some(JsonValue::Null) => Db::Null,
        Some(JsonValue::Bool(b)) => Db::Boolean(*b),
        Some(JsonValue::String(s)) => Db::Text(s.clone()),
        Some(JsonValue::Number(n)) => {
            if let Some(i) = n.as_i64() {
                Db::BigInt(i)
            } else if let Some(f) = n.as_f64() {
                Db::Double(f)
            } else {
                return Err(Error::load(format!("Unrepresentable number: {n}")));
            }
        }
        Some(other) => Db::Text(other.to_string()),
    })
}
