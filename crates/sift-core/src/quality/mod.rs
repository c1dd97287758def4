//! Profiling and generic cleaning shared by every dataset.

mod duplicates;
mod nulls;

use polars::prelude::DataFrame;

use crate::report::{NullSummary, QualityReport};
use crate::SiftResult;

pub use duplicates::{drop_duplicates, duplicate_count, first_occurrence_mask};
pub use nulls::{forward_fill, null_counts};

/// Profiles `df`, then removes exact duplicates and forward-fills gaps.
///
/// Counts in the report are taken from the table as given. The cleaned table
/// is deduplicated again after filling, since a filled row can become a copy
/// of its predecessor; this keeps the output free of identical rows.
pub fn normalize(df: &DataFrame, label: &str) -> SiftResult<(DataFrame, QualityReport)> {
    let duplicate_rows = duplicate_count(df)?;
    normalize_with_duplicates(df, label, duplicate_rows)
}

/// Same as [`normalize`], but reports `duplicate_rows` measured by the caller
/// on the table as it was read, before any field rewrite.
pub fn normalize_with_duplicates(
    df: &DataFrame,
    label: &str,
    duplicate_rows: u64,
) -> SiftResult<(DataFrame, QualityReport)> {
    let record_count = df.height() as u64;
    let null_summary = NullSummary::from_counts(null_counts(df));

    let deduped = drop_duplicates(df, None)?;
    let filled = forward_fill(&deduped)?;
    let cleaned = drop_duplicates(&filled, None)?;

    let report = QualityReport {
        dataset: label.to_string(),
        record_count,
        duplicate_rows,
        null_summary,
        insert_count: cleaned.height() as u64,
    };
    tracing::info!(
        dataset = label,
        records = report.record_count,
        duplicates = report.duplicate_rows,
        inserted = report.insert_count,
        "normalized dataset"
    );
    Ok((cleaned, report))
}
