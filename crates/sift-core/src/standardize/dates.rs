use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime};
use polars::prelude::DataFrame;

use super::column::map_string_column;
use crate::{warnings, SiftResult};

/// Tried in order; day-first layouts precede their month-first twins so an
/// ambiguous `01/02/2023` reads as 1 February. `%Y` also matches two digits,
/// so short years are rejected here and picked up by [`SHORT_YEAR_FORMATS`].
const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%d/%m/%Y",
    "%d-%m-%Y",
    "%d.%m.%Y",
    "%Y/%m/%d",
    "%Y.%m.%d",
    "%Y%m%d",
    "%m/%d/%Y",
    "%m-%d-%Y",
    "%d %b %Y",
    "%d-%b-%Y",
    "%d %B %Y",
    "%b %d, %Y",
    "%b %d %Y",
    "%B %d, %Y",
    "%B %d %Y",
];

const SHORT_YEAR_FORMATS: &[&str] = &[
    "%d/%m/%y",
    "%d-%m-%y",
    "%d.%m.%y",
    "%d-%b-%y",
    "%m/%d/%y",
];

/// Years below this are read as a truncated year, never as a real one.
const MIN_FULL_YEAR: i32 = 1000;

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%d/%m/%Y %H:%M:%S",
    "%d/%m/%Y %H:%M",
    "%d-%m-%Y %H:%M:%S",
];

pub fn parse_date_day_first(raw: &str) -> Option<NaiveDate> {
    let value = raw.trim();
    if value.is_empty() {
        return None;
    }
    let full_year = DATE_FORMATS
        .iter()
        .filter_map(|format| NaiveDate::parse_from_str(value, format).ok())
        .chain(
            DATETIME_FORMATS
                .iter()
                .filter_map(|format| NaiveDateTime::parse_from_str(value, format).ok())
                .map(|datetime| datetime.date()),
        )
        .find(|date| date.year() >= MIN_FULL_YEAR);
    if full_year.is_some() {
        return full_year;
    }
    SHORT_YEAR_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(value, format).ok())
        .or_else(|| {
            DateTime::parse_from_rfc3339(value)
                .ok()
                .map(|datetime| datetime.date_naive())
        })
}

/// `YYYY-MM-DD`, or `None` when the value is not a recognizable date.
pub fn canonical_date(raw: &str) -> Option<String> {
    parse_date_day_first(raw).map(|date| date.format("%Y-%m-%d").to_string())
}

/// Rewrites a date column in place and returns how many present values were
/// unparseable and set to missing.
pub fn canonicalize_date_column(df: &mut DataFrame, name: &str) -> SiftResult<u64> {
    let mut invalid = 0u64;
    map_string_column(df, name, |raw| {
        let canonical = canonical_date(raw);
        if canonical.is_none() {
            invalid += 1;
        }
        canonical
    })?;
    warnings::emit_count(invalid, "invalid dates", name);
    Ok(invalid)
}
