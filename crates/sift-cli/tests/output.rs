#[path = "../src/output.rs"]
mod output;

use std::path::PathBuf;

use sift_core::report::{ColumnNulls, NullSummary, QualityReport};
use sift_core::{DatasetOutcome, RunOutcome};

fn sample_outcome() -> RunOutcome {
    RunOutcome {
        datasets: vec![
            DatasetOutcome {
                report: QualityReport {
                    dataset: "Customers".to_string(),
                    record_count: 10,
                    duplicate_rows: 2,
                    null_summary: NullSummary::Columns(vec![ColumnNulls {
                        column: "email".to_string(),
                        missing: 1,
                    }]),
                    insert_count: 8,
                },
                coerced_dates: vec![ColumnNulls {
                    column: "registration_date".to_string(),
                    missing: 1,
                }],
                loaded: vec![("customers".to_string(), 8)],
                elapsed_ms: 12,
            },
            DatasetOutcome {
                report: QualityReport {
                    dataset: "Sales".to_string(),
                    record_count: 5,
                    duplicate_rows: 0,
                    null_summary: NullSummary::None,
                    insert_count: 5,
                },
                coerced_dates: Vec::new(),
                loaded: vec![("orders".to_string(), 4), ("order_items".to_string(), 4)],
                elapsed_ms: 7,
            },
        ],
        report_path: PathBuf::from("/tmp/data_quality_report.txt"),
        summary_path: None,
    }
}

#[test]
fn format_run_output_default_mode() {
    let output = output::format_run_output(&sample_outcome(), output::OutputMode::Default, false);
    let expected = [
        "==> Customers records=10 duplicates=2 cleaned=8 elapsed_ms=12",
        "==> Sales records=5 duplicates=0 cleaned=5 elapsed_ms=7",
        "Totals: datasets=2 records=15 cleaned=13",
        "Report: /tmp/data_quality_report.txt",
    ]
    .join("\n");

    assert_eq!(output, expected);
}

#[test]
fn format_run_output_verbose_lists_tables() {
    let output = output::format_run_output(&sample_outcome(), output::OutputMode::Verbose, true);

    assert!(output.starts_with("dry run: nothing written to the database\n"));
    assert!(output.contains("  missing: email: 1\n"));
    assert!(output.contains("  invalid dates: registration_date: 1\n"));
    assert!(output.contains("  table order_items: rows_affected=4\n"));
}

#[test]
fn format_run_output_quiet_only_prints_totals() {
    let output = output::format_run_output(&sample_outcome(), output::OutputMode::Quiet, false);
    let expected = [
        "Totals: datasets=2 records=15 cleaned=13",
        "Report: /tmp/data_quality_report.txt",
    ]
    .join("\n");

    assert_eq!(output, expected);
}
