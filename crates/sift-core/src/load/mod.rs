//! Conflict-replace upserts into the destination store.

mod memory;
mod mysql;

use polars::prelude::{AnyValue, DataFrame};

use crate::{RunError, SiftResult};

pub use memory::MemoryStore;
pub use mysql::{upsert_query, MySqlStore, MAX_PLACEHOLDERS};

/// One cleaned table bound for one destination table.
#[derive(Debug, Clone)]
pub struct TableBatch {
    pub table: String,
    /// Unique key of the destination table; every other column is replaced
    /// on conflict.
    pub key_columns: Vec<String>,
    pub frame: DataFrame,
}

impl TableBatch {
    pub fn new(table: &str, key_columns: &[&str], frame: DataFrame) -> Self {
        Self {
            table: table.to_string(),
            key_columns: key_columns.iter().map(|name| name.to_string()).collect(),
            frame,
        }
    }

    pub fn columns(&self) -> Vec<String> {
        self.frame
            .get_column_names()
            .iter()
            .map(|name| name.to_string())
            .collect()
    }

    pub fn update_columns(&self) -> Vec<String> {
        self.columns()
            .into_iter()
            .filter(|name| !self.key_columns.contains(name))
            .collect()
    }
}

/// A destination for cleaned tables.
///
/// All batches passed to one `upsert` call are committed together or not at
/// all. Returns the rows affected per batch, in order.
pub trait RecordStore {
    fn upsert(&mut self, batches: &[TableBatch]) -> SiftResult<Vec<u64>>;
}

#[derive(Debug, Clone, PartialEq)]
pub enum SqlValue {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
}

impl From<AnyValue<'_>> for SqlValue {
    fn from(value: AnyValue<'_>) -> Self {
        match value {
            AnyValue::Null => Self::Null,
            AnyValue::Boolean(v) => Self::Bool(v),
            AnyValue::Int32(v) => Self::Int(i64::from(v)),
            AnyValue::Int64(v) => Self::Int(v),
            AnyValue::UInt32(v) => Self::Int(i64::from(v)),
            AnyValue::UInt64(v) => match i64::try_from(v) {
                Ok(v) => Self::Int(v),
                Err(_) => Self::Text(v.to_string()),
            },
            AnyValue::Float32(v) => Self::Float(f64::from(v)),
            AnyValue::Float64(v) => Self::Float(v),
            AnyValue::String(v) => Self::Text(v.to_string()),
            AnyValue::StringOwned(v) => Self::Text(v.to_string()),
            other => Self::Text(other.to_string()),
        }
    }
}

/// Row-major copy of `df` ready for parameter binding.
pub fn frame_rows(df: &DataFrame) -> SiftResult<Vec<Vec<SqlValue>>> {
    let columns = df.get_columns();
    let mut rows = Vec::with_capacity(df.height());
    for row_idx in 0..df.height() {
        let mut row = Vec::with_capacity(columns.len());
        for column in columns {
            let value = column.get(row_idx).map_err(|err| {
                Box::new(RunError(format!(
                    "column {} read failed: {err}",
                    column.name()
                )))
            })?;
            row.push(SqlValue::from(value));
        }
        rows.push(row);
    }
    Ok(rows)
}
