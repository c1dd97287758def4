//! Splits the cleaned sales extract into `orders` and `order_items`.

use polars::prelude::{
    BooleanChunked, DataFrame, DataType, NamedFrom, NewChunkedArray, Series,
};

use crate::standardize::{canonicalize_id_column, dedupe_by_key};
use crate::{RunError, SiftResult};

/// Placeholder left behind by upstream missing-value defaults.
pub const UNKNOWN_SENTINEL: &str = "Unknown";

pub const ORDER_COLUMNS: [&str; 5] = [
    "order_id",
    "customer_id",
    "order_date",
    "total_amount",
    "status",
];
pub const ORDER_ITEM_COLUMNS: [&str; 4] = ["product_id", "order_id", "quantity", "unit_price"];

#[derive(Debug, Clone)]
pub struct SalesTables {
    pub orders: DataFrame,
    pub order_items: DataFrame,
    pub dropped_unknown: u64,
}

/// Removes every row where any text column holds [`UNKNOWN_SENTINEL`].
pub fn drop_unknown_rows(df: &DataFrame) -> SiftResult<(DataFrame, u64)> {
    let mut keep = vec![true; df.height()];
    for column in df.get_columns() {
        if column.dtype() != &DataType::String {
            continue;
        }
        let values = column.str().map_err(|err| {
            Box::new(RunError(format!(
                "column {} is not utf8: {err}",
                column.name()
            )))
        })?;
        for (row_idx, value) in values.into_iter().enumerate() {
            if value == Some(UNKNOWN_SENTINEL) {
                keep[row_idx] = false;
            }
        }
    }
    let dropped = keep.iter().filter(|kept| !**kept).count() as u64;
    if dropped == 0 {
        return Ok((df.clone(), 0));
    }
    let mask = BooleanChunked::from_slice("sift_known".into(), &keep);
    let filtered = df
        .filter(&mask)
        .map_err(|err| Box::new(RunError(format!("unknown-row filter failed: {err}"))))?;
    Ok((filtered, dropped))
}

/// `quantity * unit_price` as a float column named `total_amount`.
pub fn line_totals(df: &DataFrame) -> SiftResult<Series> {
    let quantity = float_values(df, "quantity")?;
    let unit_price = float_values(df, "unit_price")?;
    let totals: Vec<Option<f64>> = quantity
        .into_iter()
        .zip(unit_price)
        .map(|(qty, price)| Some(qty? * price?))
        .collect();
    Ok(Series::new("total_amount".into(), totals))
}

fn float_values(df: &DataFrame, name: &str) -> SiftResult<Vec<Option<f64>>> {
    let column = df
        .column(name)
        .map_err(|err| Box::new(RunError(format!("column {name} not found: {err}"))))?
        .cast(&DataType::Float64)
        .map_err(|err| Box::new(RunError(format!("column {name} is not numeric: {err}"))))?;
    let values = column
        .f64()
        .map_err(|err| Box::new(RunError(format!("column {name} is not numeric: {err}"))))?
        .into_iter()
        .collect();
    Ok(values)
}

/// `id_column` names the transaction identifier that becomes `order_id`.
pub fn reshape_sales(df: &DataFrame, id_column: &str) -> SiftResult<SalesTables> {
    let (mut sales, dropped_unknown) = drop_unknown_rows(df)?;
    if dropped_unknown > 0 {
        tracing::info!(dropped = dropped_unknown, "dropped sales rows holding `Unknown`");
    }

    let totals = line_totals(&sales)?;
    sales
        .with_column(totals)
        .map_err(|err| Box::new(RunError(format!("total_amount append failed: {err}"))))?;

    for name in [id_column, "customer_id", "product_id"] {
        canonicalize_id_column(&mut sales, name)?;
    }
    for (from, to) in [(id_column, "order_id"), ("transaction_date", "order_date")] {
        if from == to {
            continue;
        }
        sales.rename(from, to.into()).map_err(|err| {
            Box::new(RunError(format!("rename {from} -> {to} failed: {err}")))
        })?;
    }
    let sales = dedupe_by_key(&sales, "order_id")?;

    let orders = project(&sales, &ORDER_COLUMNS)?;
    let order_items = project(&sales, &ORDER_ITEM_COLUMNS)?;
    Ok(SalesTables {
        orders,
        order_items,
        dropped_unknown,
    })
}

fn project(df: &DataFrame, columns: &[&str]) -> SiftResult<DataFrame> {
    df.select(columns.iter().copied()).map_err(|err| {
        Box::new(RunError(format!(
            "projection to [{}] failed: {err}",
            columns.join(", ")
        ))) as Box<dyn std::error::Error + Send + Sync>
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use polars::df;

    fn two_sales() -> DataFrame {
        df!(
            "transaction_id" => &["T1", "T2"],
            "customer_id" => &["C1", "C9"],
            "product_id" => &["P1", "P9"],
            "quantity" => &[2i64, 3],
            "unit_price" => &[5.0f64, 4.0],
            "transaction_date" => &["2023-03-14", "2023-03-15"],
            "status" => &["Unknown", "Shipped"]
        )
        .expect("create df")
    }

    #[test]
    fn drop_unknown_rows_counts_dropped() {
        let (kept, dropped) = drop_unknown_rows(&two_sales()).expect("drop");
        assert_eq!(dropped, 1);
        assert_eq!(kept.height(), 1);
    }

    #[test]
    fn line_totals_multiplies_quantity_and_price() {
        let totals = line_totals(&two_sales()).expect("totals");
        let values = totals.f64().expect("f64").into_iter().collect::<Vec<_>>();
        assert_eq!(values, vec![Some(10.0), Some(12.0)]);
    }

    #[test]
    fn reshape_sales_projects_orders_and_items() {
        let tables = reshape_sales(&two_sales(), "transaction_id").expect("reshape");

        let order_columns = tables
            .orders
            .get_column_names()
            .iter()
            .map(|name| name.to_string())
            .collect::<Vec<_>>();
        assert_eq!(order_columns, ORDER_COLUMNS.to_vec());
        let item_columns = tables
            .order_items
            .get_column_names()
            .iter()
            .map(|name| name.to_string())
            .collect::<Vec<_>>();
        assert_eq!(item_columns, ORDER_ITEM_COLUMNS.to_vec());

        assert_eq!(tables.orders.height(), 1);
        let order_ids = tables
            .orders
            .column("order_id")
            .expect("order_id")
            .str()
            .expect("utf8")
            .into_iter()
            .collect::<Vec<_>>();
        assert_eq!(order_ids, vec![Some("2")]);
    }

    #[test]
    fn reshape_sales_uses_the_declared_id_column() {
        let mut sales = two_sales();
        sales
            .rename("transaction_id", "invoice_no".into())
            .expect("rename");

        let tables = reshape_sales(&sales, "invoice_no").expect("reshape");

        let order_ids = tables
            .orders
            .column("order_id")
            .expect("order_id")
            .str()
            .expect("utf8")
            .into_iter()
            .collect::<Vec<_>>();
        assert_eq!(order_ids, vec![Some("2")]);
        assert!(reshape_sales(&sales, "transaction_id").is_err());
    }

    #[test]
    fn reshape_sales_requires_price_columns() {
        let df = df!("transaction_id" => &["T1"]).expect("create df");
        assert!(reshape_sales(&df, "transaction_id").is_err());
    }
}
