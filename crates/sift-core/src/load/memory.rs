use std::collections::BTreeMap;

use super::{frame_rows, RecordStore, SqlValue, TableBatch};
use crate::{LoadError, SiftResult};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct MemoryTable {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<SqlValue>>,
}

/// In-process store with the same replace-on-conflict contract as the
/// database. Used for dry runs and tests.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    tables: BTreeMap<String, MemoryTable>,
    fail_on: Option<String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store that rejects any call touching `table`.
    pub fn failing_on(table: &str) -> Self {
        Self {
            tables: BTreeMap::new(),
            fail_on: Some(table.to_string()),
        }
    }

    pub fn table(&self, name: &str) -> Option<&MemoryTable> {
        self.tables.get(name)
    }

    pub fn row_count(&self, name: &str) -> usize {
        self.tables.get(name).map(|table| table.rows.len()).unwrap_or(0)
    }
}

impl RecordStore for MemoryStore {
    fn upsert(&mut self, batches: &[TableBatch]) -> SiftResult<Vec<u64>> {
        let mut staged = self.tables.clone();
        let mut affected = Vec::with_capacity(batches.len());
        for batch in batches {
            if self.fail_on.as_deref() == Some(batch.table.as_str()) {
                return Err(Box::new(LoadError(format!(
                    "upsert failed: table {} rejected the batch",
                    batch.table
                ))));
            }
            let columns = batch.columns();
            let table = staged.entry(batch.table.clone()).or_default();
            if table.columns.is_empty() {
                table.columns = columns.clone();
            } else if table.columns != columns {
                return Err(Box::new(LoadError(format!(
                    "upsert failed: column mismatch for table {}",
                    batch.table
                ))));
            }
            let key_positions = columns
                .iter()
                .enumerate()
                .filter(|(_, name)| batch.key_columns.contains(name))
                .map(|(idx, _)| idx)
                .collect::<Vec<_>>();

            let mut written = 0u64;
            for row in frame_rows(&batch.frame)? {
                let existing = if key_positions.is_empty() {
                    None
                } else {
                    table.rows.iter().position(|stored| {
                        key_positions.iter().all(|idx| stored[*idx] == row[*idx])
                    })
                };
                match existing {
                    Some(idx) => table.rows[idx] = row,
                    None => table.rows.push(row),
                }
                written += 1;
            }
            affected.push(written);
        }
        self.tables = staged;
        Ok(affected)
    }
}
