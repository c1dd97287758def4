use std::path::PathBuf;
use std::time::Instant;

use crate::config::PipelineConfig;
use crate::io::read_csv_file;
use crate::load::RecordStore;
use crate::report::{write_quality_report, write_summary_json, ColumnNulls, QualityReport};
use crate::standardize::Standardizer;
use crate::SiftResult;

pub mod dataset;

pub use dataset::{prepare_dataset, PreparedDataset};

#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    pub pipeline: PipelineConfig,
}

#[derive(Debug, Clone)]
pub struct DatasetOutcome {
    pub report: QualityReport,
    pub coerced_dates: Vec<ColumnNulls>,
    /// `(table, rows affected)` for each destination table.
    pub loaded: Vec<(String, u64)>,
    pub elapsed_ms: u64,
}

#[derive(Debug, Clone)]
pub struct RunOutcome {
    pub datasets: Vec<DatasetOutcome>,
    pub report_path: PathBuf,
    pub summary_path: Option<PathBuf>,
}

impl RunOutcome {
    pub fn reports(&self) -> Vec<QualityReport> {
        self.datasets
            .iter()
            .map(|dataset| dataset.report.clone())
            .collect()
    }
}

/// Processes every configured dataset in order, loading each into `store`,
/// then writes the quality report. Any failure stops the run before the
/// report is written.
pub fn run(options: &RunOptions, store: &mut dyn RecordStore) -> SiftResult<RunOutcome> {
    let pipeline = &options.pipeline;
    pipeline.validate()?;
    let standardizer = Standardizer::new(&pipeline.region)?;

    let mut datasets = Vec::with_capacity(pipeline.datasets.len());
    for dataset in &pipeline.datasets {
        let started = Instant::now();
        let input_path = pipeline.input_path(dataset);
        tracing::info!(dataset = %dataset.label, path = %input_path.display(), "processing dataset");

        let raw = read_csv_file(&input_path)?;
        let prepared = prepare_dataset(raw, dataset, &standardizer)?;
        let affected = store.upsert(&prepared.batches)?;
        let loaded = prepared
            .batches
            .iter()
            .map(|batch| batch.table.clone())
            .zip(affected)
            .collect();

        datasets.push(DatasetOutcome {
            report: prepared.report,
            coerced_dates: prepared.coerced_dates,
            loaded,
            elapsed_ms: started.elapsed().as_millis() as u64,
        });
    }

    let outcome = RunOutcome {
        datasets,
        report_path: pipeline.report_path.clone(),
        summary_path: pipeline.summary_path.clone(),
    };
    let reports = outcome.reports();
    write_quality_report(&reports, &outcome.report_path)?;
    if let Some(summary_path) = &outcome.summary_path {
        write_summary_json(&reports, summary_path)?;
    }
    tracing::info!("pipeline completed");
    Ok(outcome)
}
