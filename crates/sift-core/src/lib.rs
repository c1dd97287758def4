//! Batch cleaning and loading for the customers, products and sales extracts.
//!
//! A run reads each raw CSV, profiles and cleans it, standardizes the
//! dataset-specific fields, upserts the result into the relational store and
//! finally writes a plain-text data-quality report.

pub mod config;
pub mod errors;
pub mod io;
pub mod load;
pub mod quality;
pub mod report;
pub mod reshape;
pub mod run;
pub mod standardize;
mod warnings;

pub use errors::{ConfigError, IoError, LoadError, RunError};
pub use run::{run, DatasetOutcome, RunOptions, RunOutcome};

pub type SiftResult<T> = Result<T, Box<dyn std::error::Error + Send + Sync>>;
