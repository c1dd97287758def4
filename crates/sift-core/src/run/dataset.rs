use polars::prelude::DataFrame;

use crate::config::{DatasetKind, DatasetSpec};
use crate::load::TableBatch;
use crate::quality::{duplicate_count, normalize_with_duplicates};
use crate::report::{ColumnNulls, QualityReport};
use crate::reshape::reshape_sales;
use crate::standardize::Standardizer;
use crate::SiftResult;

pub const CUSTOMERS_TABLE: &str = "customers";
pub const PRODUCTS_TABLE: &str = "products";
pub const ORDERS_TABLE: &str = "orders";
pub const ORDER_ITEMS_TABLE: &str = "order_items";

/// A dataset after cleaning, ready to hand to the store.
#[derive(Debug, Clone)]
pub struct PreparedDataset {
    pub report: QualityReport,
    /// Date values that could not be parsed and were set to missing.
    pub coerced_dates: Vec<ColumnNulls>,
    pub batches: Vec<TableBatch>,
}

/// Runs every in-memory stage for one dataset: duplicate profiling on the raw
/// table, date canonicalization, cleaning, then the dataset's own field
/// transforms. Coerced dates show up in the null summary.
pub fn prepare_dataset(
    raw: DataFrame,
    dataset: &DatasetSpec,
    standardizer: &Standardizer,
) -> SiftResult<PreparedDataset> {
    let duplicate_rows = duplicate_count(&raw)?;
    let mut raw = raw;
    let coerced_dates = standardizer.dates(&mut raw, &dataset.date_columns)?;
    let (cleaned, report) = normalize_with_duplicates(&raw, &dataset.label, duplicate_rows)?;

    let batches = match dataset.kind {
        DatasetKind::Customers => {
            let customers = standardizer.customers(cleaned, &dataset.id_column)?;
            vec![TableBatch::new(
                CUSTOMERS_TABLE,
                &[dataset.id_column.as_str()],
                customers,
            )]
        }
        DatasetKind::Products => {
            let products = standardizer.products(cleaned, &dataset.id_column)?;
            vec![TableBatch::new(
                PRODUCTS_TABLE,
                &[dataset.id_column.as_str()],
                products,
            )]
        }
        DatasetKind::Sales => {
            let tables = reshape_sales(&cleaned, &dataset.id_column)?;
            vec![
                TableBatch::new(ORDERS_TABLE, &["order_id"], tables.orders),
                TableBatch::new(
                    ORDER_ITEMS_TABLE,
                    &["order_id", "product_id"],
                    tables.order_items,
                ),
            ]
        }
    };

    Ok(PreparedDataset {
        report,
        coerced_dates,
        batches,
    })
}
