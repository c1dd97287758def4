//! Dataset-specific field transforms applied around the generic cleaning pass.

pub mod category;
mod column;
pub mod dates;
pub mod ids;
pub mod phone;

use phonenumber::country;
use polars::prelude::DataFrame;

use crate::quality::drop_duplicates;
use crate::report::ColumnNulls;
use crate::{warnings, SiftResult};

pub use category::{title_case, title_case_column};
pub use dates::{canonical_date, canonicalize_date_column, parse_date_day_first};
pub use ids::{canon_id, canonicalize_id_column};
pub use phone::{parse_region, standardize_phone_column, to_e164};

pub const PHONE_COLUMN: &str = "phone";
pub const CATEGORY_COLUMN: &str = "category";

#[derive(Debug, Clone, Copy)]
pub struct Standardizer {
    region: country::Id,
}

impl Standardizer {
    pub fn new(region: &str) -> SiftResult<Self> {
        Ok(Self {
            region: parse_region(region)?,
        })
    }

    /// Canonicalizes each declared date column that exists in `df`. Returns
    /// per-column counts of values that had to be dropped.
    pub fn dates(&self, df: &mut DataFrame, columns: &[String]) -> SiftResult<Vec<ColumnNulls>> {
        let mut coerced = Vec::new();
        for name in columns {
            if !column::has_column(df, name) {
                warnings::emit(&format!("declared date column `{name}` not present, skipped"));
                continue;
            }
            let invalid = canonicalize_date_column(df, name)?;
            if invalid > 0 {
                coerced.push(ColumnNulls {
                    column: name.clone(),
                    missing: invalid,
                });
            }
        }
        Ok(coerced)
    }

    pub fn customers(&self, mut df: DataFrame, id_column: &str) -> SiftResult<DataFrame> {
        if column::has_column(&df, PHONE_COLUMN) {
            standardize_phone_column(&mut df, PHONE_COLUMN, self.region)?;
        }
        canonicalize_id_column(&mut df, id_column)?;
        dedupe_by_key(&df, id_column)
    }

    pub fn products(&self, mut df: DataFrame, id_column: &str) -> SiftResult<DataFrame> {
        canonicalize_id_column(&mut df, id_column)?;
        if column::has_column(&df, CATEGORY_COLUMN) {
            title_case_column(&mut df, CATEGORY_COLUMN)?;
        }
        dedupe_by_key(&df, id_column)
    }
}

/// Drops rows repeating an earlier identifier, keeping the first.
pub fn dedupe_by_key(df: &DataFrame, key: &str) -> SiftResult<DataFrame> {
    let subset = vec![key.to_string()];
    let deduped = drop_duplicates(df, Some(&subset))?;
    let dropped = df.height() - deduped.height();
    if dropped > 0 {
        tracing::info!(key, dropped, "dropped rows with repeated identifier");
    }
    Ok(deduped)
}
