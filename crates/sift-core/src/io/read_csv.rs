use std::path::Path;

use polars::prelude::{CsvReadOptions, DataFrame, SerReader};

use crate::{IoError, SiftResult};

/// Loads a headered CSV into memory. Empty fields become nulls.
pub fn read_csv_file(input_path: &Path) -> SiftResult<DataFrame> {
    if !input_path.is_file() {
        return Err(Box::new(IoError(format!(
            "file not found: {}",
            input_path.display()
        ))));
    }

    let reader = CsvReadOptions::default()
        .with_has_header(true)
        .try_into_reader_with_file_path(Some(input_path.to_path_buf()))
        .map_err(|err| {
            Box::new(IoError(format!(
                "failed to open csv at {}: {err}",
                input_path.display()
            ))) as Box<dyn std::error::Error + Send + Sync>
        })?;
    let df = reader.finish().map_err(|err| {
        Box::new(IoError(format!(
            "csv read failed for {}: {err}",
            input_path.display()
        ))) as Box<dyn std::error::Error + Send + Sync>
    })?;
    tracing::debug!(
        path = %input_path.display(),
        rows = df.height(),
        columns = df.width(),
        "read csv"
    );
    Ok(df)
}
