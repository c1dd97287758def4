use phonenumber::{country, Mode};
use polars::prelude::DataFrame;

use super::column::map_string_column;
use crate::{warnings, ConfigError, SiftResult};

pub fn parse_region(region: &str) -> SiftResult<country::Id> {
    region
        .trim()
        .to_ascii_uppercase()
        .parse::<country::Id>()
        .map_err(|_| {
            Box::new(ConfigError(format!("unsupported phone region: {region}")))
                as Box<dyn std::error::Error + Send + Sync>
        })
}

/// Formats a phone number as E.164 (`+<country code><national number>`),
/// reading numbers without a country prefix in `region`.
pub fn to_e164(raw: &str, region: country::Id) -> Option<String> {
    let number = phonenumber::parse(Some(region), raw.trim()).ok()?;
    Some(number.format().mode(Mode::E164).to_string())
}

/// Rewrites a phone column in place and returns how many present values
/// could not be parsed and were set to missing.
pub fn standardize_phone_column(
    df: &mut DataFrame,
    name: &str,
    region: country::Id,
) -> SiftResult<u64> {
    let mut rejected = 0u64;
    map_string_column(df, name, |raw| {
        let formatted = to_e164(raw, region);
        if formatted.is_none() {
            rejected += 1;
        }
        formatted
    })?;
    warnings::emit_count(rejected, "unparseable phone numbers", name);
    Ok(rejected)
}
