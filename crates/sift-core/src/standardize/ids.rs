use polars::prelude::DataFrame;

use super::column::map_string_column;
use crate::SiftResult;

/// Keeps only the ASCII digits of an identifier: `"CUST-001"` becomes `"001"`.
pub fn canon_id(raw: &str) -> String {
    raw.chars().filter(|ch| ch.is_ascii_digit()).collect()
}

/// Applies [`canon_id`] to a column. Identifiers without any digit become
/// missing rather than an empty key.
pub fn canonicalize_id_column(df: &mut DataFrame, name: &str) -> SiftResult<()> {
    map_string_column(df, name, |raw| {
        let digits = canon_id(raw);
        if digits.is_empty() {
            None
        } else {
            Some(digits)
        }
    })
}
