// SPDX-License-Identifier: Apache-2.0

use std::path::{Path, PathBuf};

use rusqlite::Connection;
use salescope_ingest::{
    ingest_csv, ingest_folder, inspect_csv, IngestOptions, IngestStage, InferredType,
    StrictnessMode, SCHEMA_VERSION,
};

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures")
        .join(name)
}

fn fact_rows(db: &Path) -> Vec<(String, String, String, f64)> {
    let conn = Connection::open(db).expect("open");
    let mut stmt = conn
        .prepare(
            "SELECT order_id, product, order_date, sales FROM cleaned_sales_data ORDER BY rowid",
        )
        .expect("prepare");
    stmt.query_map([], |r| Ok((r.get(0)?, r.get(1)?, r.get(2)?, r.get(3)?)))
        .expect("query")
        .collect::<Result<_, _>>()
        .expect("rows")
}

#[test]
fn single_csv_loads_with_cleaned_headers_and_iso_dates() {
    let dir = tempfile::tempdir().expect("tmp");
    let db = dir.path().join("db/ecommerce.db");
    let result = ingest_csv(&IngestOptions::new(fixture("orders_a.csv"), &db)).expect("ingest");
    assert_eq!(result.rows_loaded, 3);
    assert_eq!(result.rows_skipped, 0);

    let rows = fact_rows(&db);
    assert_eq!(rows.len(), 3);
    assert_eq!(rows[2].0, "O-2");
    assert_eq!(rows[2].2, "2024-03-20");

    let conn = Connection::open(&db).expect("open");
    let version: i64 = conn
        .query_row("PRAGMA user_version", [], |r| r.get(0))
        .expect("version");
    assert_eq!(version, SCHEMA_VERSION);
}

#[test]
fn strict_mode_fails_on_first_bad_row_and_leaves_store_untouched() {
    let dir = tempfile::tempdir().expect("tmp");
    let db = dir.path().join("ecommerce.db");
    ingest_csv(&IngestOptions::new(fixture("orders_a.csv"), &db)).expect("seed");

    let err = ingest_csv(&IngestOptions::new(fixture("orders_b.csv"), &db)).expect_err("strict");
    assert!(err.0.contains("line 3"), "{}", err.0);
    assert!(err.0.contains("order_date"), "{}", err.0);
    assert_eq!(fact_rows(&db).len(), 3);
}

#[test]
fn lenient_mode_skips_and_records_anomalies() {
    let dir = tempfile::tempdir().expect("tmp");
    let db = dir.path().join("ecommerce.db");
    let result = ingest_csv(
        &IngestOptions::new(fixture("orders_b.csv"), &db).with_strictness(StrictnessMode::Lenient),
    )
    .expect("lenient");
    assert_eq!(result.rows_loaded, 1);
    assert_eq!(result.rows_skipped, 1);
    assert_eq!(result.anomalies[0].line, 3);
    assert_eq!(fact_rows(&db)[0].2, "2024-02-11");
}

#[test]
fn folder_loads_files_in_name_order_within_one_table() {
    let dir = tempfile::tempdir().expect("tmp");
    let input = dir.path().join("csv");
    std::fs::create_dir_all(&input).expect("mkdir");
    std::fs::copy(fixture("orders_b.csv"), input.join("b.csv")).expect("copy b");
    std::fs::copy(fixture("orders_a.csv"), input.join("a.csv")).expect("copy a");
    std::fs::write(input.join("readme.txt"), "ignored").expect("write txt");
    let db = dir.path().join("ecommerce.db");

    let result = ingest_folder(
        &IngestOptions::new(&input, &db).with_strictness(StrictnessMode::Lenient),
    )
    .expect("folder");
    assert_eq!(result.files.len(), 2);
    assert!(result.files[0].ends_with("a.csv"));
    assert_eq!(result.rows_loaded, 4);

    let orders: Vec<String> = fact_rows(&db).into_iter().map(|r| r.0).collect();
    assert_eq!(orders, vec!["O-1", "O-1", "O-2", "O-3"]);

    let stages: Vec<&IngestStage> = result.events.iter().map(|e| &e.stage).collect();
    assert_eq!(stages.first(), Some(&&IngestStage::Prepare));
    assert_eq!(stages.last(), Some(&&IngestStage::Finalize));
    assert!(result
        .events
        .iter()
        .any(|e| e.name == "ingest.decode.file"
            && e.fields.get("sha256").is_some_and(|h| h.len() == 64)));
}

#[test]
fn empty_folder_is_an_error() {
    let dir = tempfile::tempdir().expect("tmp");
    let err = ingest_folder(&IngestOptions::new(dir.path(), dir.path().join("x.db")))
        .expect_err("empty");
    assert!(err.0.contains("no CSV files"));
}

#[test]
fn missing_required_column_is_reported() {
    let dir = tempfile::tempdir().expect("tmp");
    let csv = dir.path().join("thin.csv");
    std::fs::write(&csv, "order_id,sales\nO-1,1.0\n").expect("write");
    let err = ingest_csv(&IngestOptions::new(&csv, dir.path().join("x.db"))).expect_err("thin");
    assert!(err.0.contains("missing required columns"));
}

#[test]
fn inspect_profiles_columns_and_duplicates() {
    let dir = tempfile::tempdir().expect("tmp");
    let csv = dir.path().join("p.csv");
    std::fs::write(
        &csv,
        "Order Date,Qty,Price,Name\n2024-01-01,1,1.5,a\n2024-01-01,1,1.5,a\n01/02/2024,,2,b\n",
    )
    .expect("write");
    let profile = inspect_csv(&csv).expect("inspect");
    assert_eq!(profile.rows, 3);
    assert_eq!(profile.duplicate_rows, 1);
    assert_eq!(profile.missing_values(), 1);

    let kinds: Vec<InferredType> = profile.columns.iter().map(|c| c.inferred).collect();
    assert_eq!(
        kinds,
        vec![
            InferredType::Date,
            InferredType::Integer,
            InferredType::Real,
            InferredType::Text
        ]
    );
    assert_eq!(profile.columns[0].cleaned_name, "order_date");
    assert_eq!(profile.columns[1].nulls, 1);
    assert_eq!(profile.columns[3].distinct, 2);
}
