use polars::prelude::{DataFrame, FillNullStrategy};

use crate::report::ColumnNulls;
use crate::{RunError, SiftResult};

/// Columns with at least one missing value, in column order.
pub fn null_counts(df: &DataFrame) -> Vec<ColumnNulls> {
    df.get_columns()
        .iter()
        .filter(|column| column.null_count() > 0)
        .map(|column| ColumnNulls {
            column: column.name().to_string(),
            missing: column.null_count() as u64,
        })
        .collect()
}

/// Carries the last non-missing value down each column. A leading missing
/// value has nothing to carry and stays missing.
pub fn forward_fill(df: &DataFrame) -> SiftResult<DataFrame> {
    let mut columns = Vec::with_capacity(df.width());
    for column in df.get_columns() {
        if column.null_count() == 0 {
            columns.push(column.clone());
            continue;
        }
        let filled = column
            .as_materialized_series()
            .fill_null(FillNullStrategy::Forward(None))
            .map_err(|err| {
                Box::new(RunError(format!(
                    "forward fill failed for column {}: {err}",
                    column.name()
                )))
            })?;
        columns.push(filled.into());
    }
    let filled = DataFrame::new(columns)
        .map_err(|err| Box::new(RunError(format!("forward fill rebuild failed: {err}"))))?;
    Ok(filled)
}
