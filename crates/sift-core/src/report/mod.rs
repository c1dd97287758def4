use std::fmt;

use serde::{Deserialize, Serialize};
use time::{format_description::well_known::Rfc3339, OffsetDateTime};

pub mod output;

pub use output::{write_quality_report, write_summary_json};

const RULE_WIDTH: usize = 60;

/// Per-dataset profile taken before cleaning, plus the post-clean row count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct QualityReport {
    pub dataset: String,
    pub record_count: u64,
    pub duplicate_rows: u64,
    pub null_summary: NullSummary,
    pub insert_count: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct ColumnNulls {
    pub column: String,
    pub missing: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NullSummary {
    None,
    Columns(Vec<ColumnNulls>),
}

impl NullSummary {
    pub fn from_counts(counts: Vec<ColumnNulls>) -> Self {
        if counts.is_empty() {
            Self::None
        } else {
            Self::Columns(counts)
        }
    }

    pub fn total(&self) -> u64 {
        match self {
            Self::None => 0,
            Self::Columns(columns) => columns.iter().map(|entry| entry.missing).sum(),
        }
    }
}

impl fmt::Display for NullSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::None => write!(f, "None"),
            Self::Columns(columns) => {
                let parts = columns
                    .iter()
                    .map(|entry| format!("{}: {}", entry.column, entry.missing))
                    .collect::<Vec<_>>();
                write!(f, "{}", parts.join(", "))
            }
        }
    }
}

pub trait ReportFormatter {
    fn format(&self, reports: &[QualityReport], generated_on: &str) -> String;
}

/// The fixed block layout of `data_quality_report.txt`.
pub struct TextReportFormatter;

impl ReportFormatter for TextReportFormatter {
    fn format(&self, reports: &[QualityReport], generated_on: &str) -> String {
        let mut out = String::new();
        out.push_str("DATA QUALITY REPORT\n");
        out.push_str(&"=".repeat(RULE_WIDTH));
        out.push('\n');
        out.push_str(&format!("Generated On: {generated_on}\n\n"));

        for (idx, report) in reports.iter().enumerate() {
            out.push_str(&format!("Dataset #{}: {}\n", idx + 1, report.dataset));
            out.push_str(&format!("Records Processed      : {}\n", report.record_count));
            out.push_str(&format!("Duplicates Removed     : {}\n", report.duplicate_rows));
            out.push_str(&format!("Missing Values Handled : {}\n", report.null_summary));
            out.push_str(&format!("Records Loaded         : {}\n", report.insert_count));
            out.push_str(&"-".repeat(RULE_WIDTH));
            out.push('\n');
        }
        out
    }
}

pub fn now_rfc3339() -> String {
    OffsetDateTime::now_utc()
        .format(&Rfc3339)
        .unwrap_or_else(|_| "1970-01-01T00:00:00Z".to_string())
}
