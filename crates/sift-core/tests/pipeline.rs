use std::fs;
use std::path::Path;

use polars::df;
use polars::prelude::DataFrame;
use sift_core::config::{default_datasets, DatasetKind, PipelineConfig};
use sift_core::load::{MemoryStore, SqlValue};
use sift_core::report::ColumnNulls;
use sift_core::run::prepare_dataset;
use sift_core::standardize::Standardizer;
use sift_core::{run, RunOptions};

const CUSTOMERS: &str = "\
customer_id,name,email,phone,city,registration_date
CUST-001,Asha,asha@example.com,9876543210,Pune,15/01/2023
CUST-002,Ravi,,9123456780,Delhi,2023-02-20
CUST-001,Asha,asha@example.com,9876543210,Pune,15/01/2023
CUST-003,Meena,meena@example.com,9988776655,Agra,not-a-date
";

const PRODUCTS: &str = "\
product_id,product_name,category,price
P001,Phone,electronics,19999.0
P002,Lamp,HOME DECOR,899.5
P003,Cable,Electronics,299.0
";

const SALES: &str = "\
transaction_id,customer_id,product_id,quantity,unit_price,transaction_date,status
T001,CUST-001,P001,1,19999.0,15/03/2023,Delivered
T002,CUST-002,P002,2,899.5,16/03/2023,Unknown
T003,CUST-003,P003,3,299.0,2023-03-17,Shipped
";

fn write_inputs(dir: &Path) {
    fs::write(dir.join("customers_raw.csv"), CUSTOMERS).expect("write customers");
    fs::write(dir.join("products_raw.csv"), PRODUCTS).expect("write products");
    fs::write(dir.join("sales_raw.csv"), SALES).expect("write sales");
}

fn options_for(dir: &Path) -> RunOptions {
    RunOptions {
        pipeline: PipelineConfig {
            data_dir: dir.to_path_buf(),
            report_path: dir.join("out").join("data_quality_report.txt"),
            summary_path: Some(dir.join("out").join("summary.json")),
            ..PipelineConfig::default()
        },
    }
}

fn text_column(df: &DataFrame, name: &str) -> Vec<Option<String>> {
    df.column(name)
        .expect("column")
        .str()
        .expect("utf8")
        .into_iter()
        .map(|value| value.map(str::to_string))
        .collect()
}

#[test]
fn sales_rows_with_unknown_are_not_loaded() {
    let sales = df!(
        "transaction_id" => &["T1", "T2"],
        "customer_id" => &["C1", "C9"],
        "product_id" => &["P1", "P9"],
        "quantity" => &[2i64, 3],
        "unit_price" => &[5.0f64, 4.0],
        "transaction_date" => &["14/03/2023", "15/03/2023"],
        "status" => &["Unknown", "Shipped"]
    )
    .expect("sales df");
    let dataset = default_datasets()
        .into_iter()
        .find(|dataset| dataset.kind == DatasetKind::Sales)
        .expect("sales dataset");
    let standardizer = Standardizer::new("IN").expect("standardizer");

    let prepared = prepare_dataset(sales, &dataset, &standardizer).expect("prepare");

    let orders = &prepared.batches[0].frame;
    assert_eq!(prepared.batches[0].table, "orders");
    assert_eq!(orders.height(), 1);
    assert_eq!(text_column(orders, "order_id"), vec![Some("2".to_string())]);
    assert_eq!(
        text_column(orders, "order_date"),
        vec![Some("2023-03-15".to_string())]
    );
    assert_eq!(text_column(orders, "customer_id"), vec![Some("9".to_string())]);
    let totals = orders
        .column("total_amount")
        .expect("total_amount")
        .f64()
        .expect("f64")
        .into_iter()
        .collect::<Vec<_>>();
    assert_eq!(totals, vec![Some(12.0)]);

    let items = &prepared.batches[1].frame;
    assert_eq!(prepared.batches[1].table, "order_items");
    assert_eq!(text_column(items, "product_id"), vec![Some("9".to_string())]);
}

#[test]
fn duplicates_are_counted_before_dates_are_rewritten() {
    let customers = df!(
        "customer_id" => &["CUST-001", "CUST-001"],
        "email" => &["asha@example.com", "asha@example.com"],
        "registration_date" => &["15/01/2023", "2023-01-15"]
    )
    .expect("customers df");
    let dataset = default_datasets()
        .into_iter()
        .find(|dataset| dataset.kind == DatasetKind::Customers)
        .expect("customers dataset");
    let standardizer = Standardizer::new("IN").expect("standardizer");

    let prepared = prepare_dataset(customers, &dataset, &standardizer).expect("prepare");

    assert_eq!(prepared.report.record_count, 2);
    assert_eq!(prepared.report.duplicate_rows, 0);
    assert!(prepared.coerced_dates.is_empty());
    assert_eq!(prepared.batches[0].frame.height(), 1);
}

#[test]
fn run_loads_every_table_and_writes_reports() {
    let dir = tempfile::tempdir().expect("temp dir");
    write_inputs(dir.path());
    let options = options_for(dir.path());
    let mut store = MemoryStore::new();

    let outcome = run(&options, &mut store).expect("run");

    let reports = outcome.reports();
    assert_eq!(reports.len(), 3);
    assert_eq!(reports[0].dataset, "Customers");
    assert_eq!(reports[0].record_count, 4);
    assert_eq!(reports[0].duplicate_rows, 1);
    assert_eq!(
        reports[0].null_summary.to_string(),
        "email: 1, registration_date: 1"
    );
    assert_eq!(reports[0].insert_count, 3);
    assert_eq!(
        outcome.datasets[0].coerced_dates,
        vec![ColumnNulls {
            column: "registration_date".to_string(),
            missing: 1,
        }]
    );

    assert_eq!(store.row_count("customers"), 3);
    assert_eq!(store.row_count("products"), 3);
    assert_eq!(store.row_count("orders"), 2);
    assert_eq!(store.row_count("order_items"), 2);
    assert_eq!(
        outcome.datasets[2].loaded,
        vec![("orders".to_string(), 2), ("order_items".to_string(), 2)]
    );

    let products = store.table("products").expect("products table");
    let category_idx = products
        .columns
        .iter()
        .position(|name| name == "category")
        .expect("category column");
    assert_eq!(
        products.rows[1][category_idx],
        SqlValue::Text("Home Decor".to_string())
    );

    let customers = store.table("customers").expect("customers table");
    let phone_idx = customers
        .columns
        .iter()
        .position(|name| name == "phone")
        .expect("phone column");
    assert_eq!(
        customers.rows[0][phone_idx],
        SqlValue::Text("+919876543210".to_string())
    );

    let report = fs::read_to_string(&outcome.report_path).expect("read report");
    assert!(report.starts_with("DATA QUALITY REPORT\n"));
    assert!(report.contains("Dataset #1: Customers\nRecords Processed      : 4\n"));
    assert!(report.contains("Missing Values Handled : email: 1, registration_date: 1\n"));
    assert!(report.contains("Dataset #3: Sales\n"));

    let summary_path = outcome.summary_path.expect("summary path");
    let summary = fs::read_to_string(summary_path).expect("read summary");
    assert!(summary.contains("\"dataset\": \"Products\""));
}

#[test]
fn rerunning_replaces_rows_instead_of_duplicating() {
    let dir = tempfile::tempdir().expect("temp dir");
    write_inputs(dir.path());
    let options = options_for(dir.path());
    let mut store = MemoryStore::new();

    run(&options, &mut store).expect("first run");
    run(&options, &mut store).expect("second run");

    assert_eq!(store.row_count("customers"), 3);
    assert_eq!(store.row_count("orders"), 2);
}

#[test]
fn missing_input_aborts_without_report() {
    let dir = tempfile::tempdir().expect("temp dir");
    fs::write(dir.path().join("customers_raw.csv"), CUSTOMERS).expect("write customers");
    let options = options_for(dir.path());
    let mut store = MemoryStore::new();

    let err = run(&options, &mut store).expect_err("products file is missing");

    assert!(err.to_string().contains("file not found"));
    assert!(err.to_string().contains("products_raw.csv"));
    assert_eq!(store.row_count("customers"), 3);
    assert!(!options.pipeline.report_path.exists());
}

#[test]
fn order_items_failure_rolls_back_orders() {
    let dir = tempfile::tempdir().expect("temp dir");
    write_inputs(dir.path());
    let options = options_for(dir.path());
    let mut store = MemoryStore::failing_on("order_items");

    let err = run(&options, &mut store).expect_err("order_items rejected");

    assert!(err.to_string().contains("order_items"));
    assert_eq!(store.row_count("customers"), 3);
    assert_eq!(store.row_count("orders"), 0);
}
