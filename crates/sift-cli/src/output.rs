use sift_core::{DatasetOutcome, RunOutcome};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    Default,
    Quiet,
    Verbose,
}

pub fn format_run_output(outcome: &RunOutcome, mode: OutputMode, dry_run: bool) -> String {
    let mut lines = Vec::new();

    if mode != OutputMode::Quiet {
        if dry_run {
            lines.push("dry run: nothing written to the database".to_string());
        }
        for dataset in &outcome.datasets {
            lines.extend(format_dataset_output(dataset, mode));
        }
    }

    let records: u64 = outcome
        .datasets
        .iter()
        .map(|dataset| dataset.report.record_count)
        .sum();
    let cleaned: u64 = outcome
        .datasets
        .iter()
        .map(|dataset| dataset.report.insert_count)
        .sum();
    lines.push(format!(
        "Totals: datasets={} records={} cleaned={}",
        outcome.datasets.len(),
        records,
        cleaned
    ));
    lines.push(format!("Report: {}", outcome.report_path.display()));
    if let Some(summary_path) = &outcome.summary_path {
        lines.push(format!("Summary: {}", summary_path.display()));
    }
    lines.join("\n")
}

fn format_dataset_output(dataset: &DatasetOutcome, mode: OutputMode) -> Vec<String> {
    let report = &dataset.report;
    let mut lines = vec![format!(
        "==> {} records={} duplicates={} cleaned={} elapsed_ms={}",
        report.dataset,
        report.record_count,
        report.duplicate_rows,
        report.insert_count,
        dataset.elapsed_ms
    )];

    if mode == OutputMode::Verbose {
        lines.push(format!("  missing: {}", report.null_summary));
        for coerced in &dataset.coerced_dates {
            lines.push(format!(
                "  invalid dates: {}: {}",
                coerced.column, coerced.missing
            ));
        }
        for (table, rows) in &dataset.loaded {
            lines.push(format!("  table {table}: rows_affected={rows}"));
        }
    }
    lines
}
