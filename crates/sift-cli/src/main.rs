use std::path::PathBuf;

use clap::Parser;
use sift_core::config::{
    DatabaseConfig, PipelineConfig, DEFAULT_DATA_DIR, DEFAULT_REGION, DEFAULT_REPORT_FILE,
};
use sift_core::load::{MemoryStore, MySqlStore, RecordStore};
use sift_core::{run, RunOptions, SiftResult};
use tracing_subscriber::EnvFilter;

mod output;

use output::OutputMode;

#[derive(Parser, Debug)]
#[command(
    name = "sift",
    version = env!("SIFT_VERSION"),
    about = "Clean the customers, products and sales extracts and load them into MySQL"
)]
struct Cli {
    /// Directory holding customers_raw.csv, products_raw.csv and sales_raw.csv
    #[arg(long, default_value = DEFAULT_DATA_DIR)]
    data_dir: PathBuf,
    #[arg(long, default_value = DEFAULT_REPORT_FILE)]
    report: PathBuf,
    /// Also write the quality reports as JSON
    #[arg(long)]
    summary_json: Option<PathBuf>,
    /// Region assumed for phone numbers without a country code
    #[arg(long, default_value = DEFAULT_REGION)]
    region: String,
    /// Load into an in-memory store instead of the database
    #[arg(long)]
    dry_run: bool,
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> SiftResult<()> {
    let cli = Cli::parse();
    let mode = if cli.quiet {
        OutputMode::Quiet
    } else if cli.verbose {
        OutputMode::Verbose
    } else {
        OutputMode::Default
    };
    init_logging(mode);

    let options = RunOptions {
        pipeline: PipelineConfig {
            data_dir: cli.data_dir,
            report_path: cli.report,
            summary_path: cli.summary_json,
            region: cli.region,
            ..PipelineConfig::default()
        },
    };

    let mut store: Box<dyn RecordStore> = if cli.dry_run {
        Box::new(MemoryStore::new())
    } else {
        Box::new(MySqlStore::new(DatabaseConfig::from_env()?))
    };

    let outcome = run(&options, store.as_mut())?;
    println!("{}", output::format_run_output(&outcome, mode, cli.dry_run));
    Ok(())
}

fn default_filter(mode: OutputMode) -> &'static str {
    match mode {
        OutputMode::Quiet => "sift=warn,sift_core=warn",
        OutputMode::Default => "sift=info,sift_core=info",
        OutputMode::Verbose => "sift=debug,sift_core=debug",
    }
}

fn init_logging(mode: OutputMode) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter(mode)));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
