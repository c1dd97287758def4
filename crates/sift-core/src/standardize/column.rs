use polars::prelude::{DataFrame, DataType, NamedFrom, Series};

use crate::{RunError, SiftResult};

/// Rewrites `name` as a string column, passing each present value through
/// `f`. Missing values stay missing; `f` returning `None` makes one missing.
pub(crate) fn map_string_column<F>(df: &mut DataFrame, name: &str, mut f: F) -> SiftResult<()>
where
    F: FnMut(&str) -> Option<String>,
{
    let column = df
        .column(name)
        .map_err(|err| Box::new(RunError(format!("column {name} not found: {err}"))))?;
    let as_text = column.cast(&DataType::String).map_err(|err| {
        Box::new(RunError(format!("column {name} cannot be read as text: {err}")))
    })?;
    let values: Vec<Option<String>> = as_text
        .str()
        .map_err(|err| Box::new(RunError(format!("column {name} is not utf8: {err}"))))?
        .into_iter()
        .map(|value| value.and_then(&mut f))
        .collect();
    df.with_column(Series::new(name.into(), values))
        .map_err(|err| Box::new(RunError(format!("column {name} replace failed: {err}"))))?;
    Ok(())
}

pub(crate) fn has_column(df: &DataFrame, name: &str) -> bool {
    df.get_column_names().iter().any(|column| column.as_str() == name)
}
