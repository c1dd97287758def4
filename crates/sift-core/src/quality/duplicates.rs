use std::collections::HashSet;

use polars::prelude::{BooleanChunked, DataFrame, NewChunkedArray};

use crate::{RunError, SiftResult};

const KEY_SEPARATOR: char = '\u{1f}';

/// One key per row built from the chosen columns, or every column when
/// `subset` is `None`. Nulls compare equal to each other.
fn row_keys(df: &DataFrame, subset: Option<&[String]>) -> SiftResult<Vec<String>> {
    let names: Vec<String> = match subset {
        Some(names) => names.to_vec(),
        None => df
            .get_column_names()
            .iter()
            .map(|name| name.to_string())
            .collect(),
    };
    let mut columns = Vec::with_capacity(names.len());
    for name in &names {
        let column = df.column(name).map_err(|err| {
            Box::new(RunError(format!("duplicate key column {name} not found: {err}")))
        })?;
        columns.push(column);
    }

    let mut keys = Vec::with_capacity(df.height());
    for row_idx in 0..df.height() {
        let mut key = String::new();
        for (name, column) in names.iter().zip(columns.iter()) {
            let value = column.get(row_idx).map_err(|err| {
                Box::new(RunError(format!("column {name} read failed: {err}")))
            })?;
            key.push_str(&format!("{value:?}"));
            key.push(KEY_SEPARATOR);
        }
        keys.push(key);
    }
    Ok(keys)
}

/// `true` for rows seen for the first time, `false` for repeats.
pub fn first_occurrence_mask(df: &DataFrame, subset: Option<&[String]>) -> SiftResult<Vec<bool>> {
    let mut seen = HashSet::new();
    Ok(row_keys(df, subset)?
        .into_iter()
        .map(|key| seen.insert(key))
        .collect())
}

/// Rows that repeat an earlier row across all columns.
pub fn duplicate_count(df: &DataFrame) -> SiftResult<u64> {
    let mask = first_occurrence_mask(df, None)?;
    Ok(mask.iter().filter(|first| !**first).count() as u64)
}

/// Keeps the first occurrence of every row (or key), preserving order.
pub fn drop_duplicates(df: &DataFrame, subset: Option<&[String]>) -> SiftResult<DataFrame> {
    let mask = first_occurrence_mask(df, subset)?;
    if mask.iter().all(|first| *first) {
        return Ok(df.clone());
    }
    let keep = BooleanChunked::from_slice("sift_keep".into(), &mask);
    let filtered = df.filter(&keep).map_err(|err| {
        Box::new(RunError(format!("duplicate filter failed: {err}")))
    })?;
    Ok(filtered)
}
