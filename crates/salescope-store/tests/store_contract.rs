// SPDX-License-Identifier: Apache-2.0

use std::path::Path;

use rusqlite::Connection;
use salescope_store::{SalesStore, StoreConfig, StoreError};

const FACT_DDL: &str = "CREATE TABLE cleaned_sales_data (
    order_id TEXT, customer_id TEXT, customer_name TEXT, order_date TEXT,
    product TEXT, product_category TEXT, region TEXT, city TEXT, segment TEXT,
    sales REAL, profit REAL, aging INTEGER, ship_mode TEXT, shipping_cost REAL
);";

const ONE_ROW: &str =
    "INSERT INTO cleaned_sales_data (order_id, customer_id, sales) VALUES ('o1', 'c1', 5.0);";

fn write_db(path: &Path, ddl: &str) {
    let conn = Connection::open(path).expect("create db");
    conn.execute_batch(ddl).expect("ddl");
}

#[test]
fn missing_file_is_not_initialized() {
    let dir = tempfile::tempdir().expect("tmp");
    let err =
        SalesStore::open(StoreConfig::new(dir.path().join("nope.db"))).expect_err("missing");
    assert!(matches!(err, StoreError::NotInitialized(_)));
    assert!(err.to_string().contains("nope.db"));
}

#[test]
fn missing_fact_table_is_not_initialized() {
    let dir = tempfile::tempdir().expect("tmp");
    let path = dir.path().join("empty.db");
    write_db(&path, "CREATE TABLE other (x INTEGER);");
    let err = SalesStore::open(StoreConfig::new(&path)).expect_err("no fact table");
    assert!(matches!(err, StoreError::NotInitialized(ref m) if m.contains("cleaned_sales_data")));
}

#[test]
fn missing_column_is_not_initialized() {
    let dir = tempfile::tempdir().expect("tmp");
    let path = dir.path().join("partial.db");
    write_db(&path, "CREATE TABLE cleaned_sales_data (order_id TEXT, sales REAL);");
    let err = SalesStore::open(StoreConfig::new(&path)).expect_err("partial schema");
    assert!(matches!(err, StoreError::NotInitialized(ref m) if m.contains("customer_id")));
}

#[test]
fn empty_fact_table_is_not_initialized() {
    let dir = tempfile::tempdir().expect("tmp");
    let path = dir.path().join("empty_rows.db");
    write_db(&path, FACT_DDL);
    let err = SalesStore::open(StoreConfig::new(&path)).expect_err("no rows");
    assert_eq!(
        err,
        StoreError::NotInitialized("fact table cleaned_sales_data is empty".to_string())
    );
}

#[test]
fn explicit_path_overrides_environment() {
    let dir = tempfile::tempdir().expect("tmp");
    let path = dir.path().join("ok.db");
    write_db(&path, &format!("{FACT_DDL}\n{ONE_ROW}"));
    let config = StoreConfig::from_env(Some(&path));
    assert_eq!(config.path, path);
    assert_eq!(config.query_timeout, StoreConfig::DEFAULT_QUERY_TIMEOUT);
    let store = SalesStore::open(config).expect("open");
    assert_eq!(store.row_count().expect("rows"), 1);
}

#[test]
fn garbage_file_fails_to_open() {
    let dir = tempfile::tempdir().expect("tmp");
    let path = dir.path().join("garbage.db");
    std::fs::write(&path, b"this is not a sqlite database at all, just bytes").expect("write");
    let err = SalesStore::open(StoreConfig::new(&path)).expect_err("garbage");
    assert!(matches!(err, StoreError::Open(_)));
}

#[test]
fn sessions_are_read_only() {
    let dir = tempfile::tempdir().expect("tmp");
    let path = dir.path().join("ok.db");
    write_db(&path, &format!("{FACT_DDL}\n{ONE_ROW}"));
    let store = SalesStore::open(StoreConfig::new(&path)).expect("open");
    let session = store.session().expect("session");
    let err = session
        .connection()
        .execute("DELETE FROM cleaned_sales_data", [])
        .expect_err("read-only");
    assert!(err.to_string().to_lowercase().contains("readonly")
        || err.to_string().to_lowercase().contains("read-only")
        || err.to_string().to_lowercase().contains("read only"));
}

#[test]
fn inspection_reports_tables_rows_and_version() {
    let dir = tempfile::tempdir().expect("tmp");
    let path = dir.path().join("ok.db");
    write_db(
        &path,
        &format!(
            "{FACT_DDL}
            INSERT INTO cleaned_sales_data (order_id, sales) VALUES ('o1', 1.0), ('o1', 2.0);
            PRAGMA user_version = 1;"
        ),
    );
    let store = SalesStore::open(StoreConfig::new(&path)).expect("open");
    assert_eq!(store.tables().expect("tables"), vec!["cleaned_sales_data".to_string()]);
    assert_eq!(store.row_count().expect("rows"), 2);
    assert_eq!(store.schema_version().expect("version"), 1);
}

#[test]
fn with_session_propagates_closure_errors() {
    let dir = tempfile::tempdir().expect("tmp");
    let path = dir.path().join("ok.db");
    write_db(&path, &format!("{FACT_DDL}\n{ONE_ROW}"));
    let store = SalesStore::open(StoreConfig::new(&path)).expect("open");
    let out: Result<(), StoreError> =
        store.with_session(|_| Err(StoreError::Sql("boom".to_string())));
    assert_eq!(out, Err(StoreError::Sql("boom".to_string())));
}
