use polars::prelude::DataFrame;

use super::column::map_string_column;
use crate::SiftResult;

/// Upper-cases the first letter of every alphabetic run and lower-cases the
/// rest, so `"ELECTRONICS"` and `"electronics"` both become `"Electronics"`.
pub fn title_case(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut in_word = false;
    for ch in value.trim().chars() {
        if ch.is_alphabetic() {
            if in_word {
                out.extend(ch.to_lowercase());
            } else {
                out.extend(ch.to_uppercase());
            }
            in_word = true;
        } else {
            out.push(ch);
            in_word = false;
        }
    }
    out
}

pub fn title_case_column(df: &mut DataFrame, name: &str) -> SiftResult<()> {
    map_string_column(df, name, |raw| Some(title_case(raw)))
}
