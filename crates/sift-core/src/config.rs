use std::collections::HashSet;
use std::fmt;
use std::path::PathBuf;

use crate::{ConfigError, SiftResult};

pub const DEFAULT_REGION: &str = "IN";
pub const DEFAULT_REPORT_FILE: &str = "data_quality_report.txt";
pub const DEFAULT_DATA_DIR: &str = "data";

/// Connection parameters for the destination store.
///
/// Built once at process start and handed to the loader by reference.
#[derive(Clone, PartialEq, Eq)]
pub struct DatabaseConfig {
    pub host: String,
    pub port: u16,
    pub user: String,
    pub password: String,
    pub database: String,
}

impl DatabaseConfig {
    /// Reads `MYSQL_*` variables, loading a `.env` file first when present.
    pub fn from_env() -> SiftResult<Self> {
        dotenv::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> SiftResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let host = lookup("MYSQL_HOST")
            .filter(|value| !value.trim().is_empty())
            .unwrap_or_else(|| "127.0.0.1".to_string());
        let port = match lookup("MYSQL_PORT") {
            Some(raw) if !raw.trim().is_empty() => raw.trim().parse::<u16>().map_err(|err| {
                Box::new(ConfigError(format!("MYSQL_PORT must be a port number, got {raw:?}: {err}")))
            })?,
            _ => 3306,
        };
        Ok(Self {
            host,
            port,
            user: required(&lookup, "MYSQL_USER")?,
            password: lookup("MYSQL_PASSWORD").unwrap_or_default(),
            database: required(&lookup, "MYSQL_DATABASE")?,
        })
    }
}

impl fmt::Debug for DatabaseConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DatabaseConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("user", &self.user)
            .field("password", &"***")
            .field("database", &self.database)
            .finish()
    }
}

fn required<F>(lookup: &F, key: &str) -> SiftResult<String>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        Some(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(Box::new(ConfigError(format!(
            "environment variable {key} is required"
        )))),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DatasetKind {
    Customers,
    Products,
    Sales,
}

/// Static description of one input extract.
#[derive(Debug, Clone)]
pub struct DatasetSpec {
    pub kind: DatasetKind,
    pub label: String,
    pub file_name: String,
    pub id_column: String,
    /// Columns parsed as calendar dates, by raw header name.
    pub date_columns: Vec<String>,
}

impl DatasetSpec {
    fn new(kind: DatasetKind, label: &str, file_name: &str, id_column: &str, dates: &[&str]) -> Self {
        Self {
            kind,
            label: label.to_string(),
            file_name: file_name.to_string(),
            id_column: id_column.to_string(),
            date_columns: dates.iter().map(|name| name.to_string()).collect(),
        }
    }
}

pub fn default_datasets() -> Vec<DatasetSpec> {
    vec![
        DatasetSpec::new(
            DatasetKind::Customers,
            "Customers",
            "customers_raw.csv",
            "customer_id",
            &["registration_date"],
        ),
        DatasetSpec::new(
            DatasetKind::Products,
            "Products",
            "products_raw.csv",
            "product_id",
            &[],
        ),
        DatasetSpec::new(
            DatasetKind::Sales,
            "Sales",
            "sales_raw.csv",
            "transaction_id",
            &["transaction_date"],
        ),
    ]
}

#[derive(Debug, Clone)]
pub struct PipelineConfig {
    pub data_dir: PathBuf,
    pub report_path: PathBuf,
    pub summary_path: Option<PathBuf>,
    pub region: String,
    pub datasets: Vec<DatasetSpec>,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            report_path: PathBuf::from(DEFAULT_REPORT_FILE),
            summary_path: None,
            region: DEFAULT_REGION.to_string(),
            datasets: default_datasets(),
        }
    }
}

impl PipelineConfig {
    pub fn input_path(&self, dataset: &DatasetSpec) -> PathBuf {
        self.data_dir.join(&dataset.file_name)
    }

    pub fn validate(&self) -> SiftResult<()> {
        if self.datasets.is_empty() {
            return Err(Box::new(ConfigError(
                "at least one dataset is required".to_string(),
            )));
        }
        let mut seen = HashSet::new();
        for dataset in &self.datasets {
            if dataset.label.trim().is_empty() {
                return Err(Box::new(ConfigError(
                    "dataset label cannot be empty".to_string(),
                )));
            }
            if !seen.insert(dataset.label.as_str()) {
                return Err(Box::new(ConfigError(format!(
                    "duplicate dataset label: {}",
                    dataset.label
                ))));
            }
        }
        crate::standardize::phone::parse_region(&self.region)?;
        Ok(())
    }
}
