//! DuckDB connection wrapper owning the card and pack tables.
//!
//! Every component borrows this handle instead of reaching for a global
//! client. The schema is created on open, so a fresh in-memory database is
//! immediately usable.

use crate::config;
use crate::error::Result;
use duckdb::{types::ValueRef, Connection as DuckDbConnection, Params};
use serde::de::DeserializeOwned;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

/// A row as returned by [`Connection::execute`], keyed by column name.
pub type Row = HashMap<String, serde_json::Value>;

/// Wraps a DuckDB connection holding the `cards` and `packs` tables.
pub struct Connection {
    conn: DuckDbConnection,
    path: Option<PathBuf>,
}

impl Connection {
    /// Open (or create) a file-backed database at `path`.
    ///
    /// Parent directories are created as needed.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let conn = DuckDbConnection::open(&path)?;
        tracing::debug!(path = %path.display(), "opened pack database");
        Self::with_schema(conn, Some(path))
    }

    /// Open a private in-memory database. Contents vanish on drop.
    pub fn open_in_memory() -> Result<Self> {
        let conn = DuckDbConnection::open_in_memory()?;
        Self::with_schema(conn, None)
    }

    fn with_schema(conn: DuckDbConnection, path: Option<PathBuf>) -> Result<Self> {
        conn.execute_batch(config::schema_sql())?;
        Ok(Self { conn, path })
    }

    /// The database file, or `None` for an in-memory database.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Execute a query and return every row as a column-name map.
    ///
    /// DuckDB values are converted to `serde_json::Value`; integers stay
    /// numbers, text stays strings and NULL becomes `Value::Null`.
    pub fn execute<P: Params>(&self, sql: &str, params: P) -> Result<Vec<Row>> {
        let mut stmt = self.conn.prepare(sql)?;
        let mut rows_result = stmt.query(params)?;

        // Column metadata is only available once the query has run.
        let column_names: Vec<String> = rows_result
            .as_ref()
            .map(|s| s.column_names().into_iter().map(|c| c.to_string()).collect())
            .unwrap_or_default();

        let mut out: Vec<Row> = Vec::new();
        while let Some(row) = rows_result.next()? {
            let mut map = HashMap::with_capacity(column_names.len());
            for (i, name) in column_names.iter().enumerate() {
                map.insert(name.clone(), convert_value_ref(row.get_ref(i)?));
            }
            out.push(map);
        }

        Ok(out)
    }

    /// Execute a query and deserialize each row into `T`.
    pub fn execute_into<T: DeserializeOwned, P: Params>(
        &self,
        sql: &str,
        params: P,
    ) -> Result<Vec<T>> {
        let rows = self.execute(sql, params)?;
        let mut results = Vec::with_capacity(rows.len());
        for row in rows {
            let value = serde_json::Value::Object(row.into_iter().collect());
            results.push(serde_json::from_value(value)?);
        }
        Ok(results)
    }

    /// Execute a query and return the first column of the first row.
    pub fn execute_scalar<P: Params>(
        &self,
        sql: &str,
        params: P,
    ) -> Result<Option<serde_json::Value>> {
        let mut stmt = self.conn.prepare(sql)?;
        let mut rows = stmt.query(params)?;

        if let Some(row) = rows.next()? {
            Ok(Some(convert_value_ref(row.get_ref(0)?)))
        } else {
            Ok(None)
        }
    }

    /// Execute an INSERT/UPDATE/DELETE and return the number of affected rows.
    pub fn execute_update<P: Params>(&self, sql: &str, params: P) -> Result<usize> {
        Ok(self.conn.execute(sql, params)?)
    }

    /// Run one or more statements without parameters.
    pub fn execute_batch(&self, sql: &str) -> Result<()> {
        self.conn.execute_batch(sql)?;
        Ok(())
    }

    /// Access the underlying DuckDB connection for advanced usage.
    pub fn raw(&self) -> &DuckDbConnection {
        &self.conn
    }
}

fn convert_value_ref(val: ValueRef<'_>) -> serde_json::Value {
    match val {
        ValueRef::Null => serde_json::Value::Null,
        ValueRef::Boolean(b) => serde_json::Value::Bool(b),
        ValueRef::TinyInt(n) => serde_json::Value::Number(n.into()),
        ValueRef::SmallInt(n) => serde_json::Value::Number(n.into()),
        ValueRef::Int(n) => serde_json::Value::Number(n.into()),
        ValueRef::BigInt(n) => serde_json::Value::Number(n.into()),
        ValueRef::HugeInt(n) => match i64::try_from(n) {
            Ok(i) => serde_json::Value::Number(i.into()),
            Err(_) => serde_json::Value::String(n.to_string()),
        },
        ValueRef::Double(f) => serde_json::Number::from_f64(f)
            .map(serde_json::Value::Number)
            .unwrap_or(serde_json::Value::Null),
        ValueRef::Text(bytes) => {
            serde_json::Value::String(String::from_utf8_lossy(bytes).into_owned())
        }
        // Neither table uses other column types.
        _ => serde_json::Value::Null,
    }
}
