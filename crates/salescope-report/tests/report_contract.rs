// SPDX-License-Identifier: Apache-2.0

use std::fs;
use std::path::Path;

use salescope_model::{SalesRecord, Tier};
use salescope_policies::AnalyticsPolicy;
use salescope_query::{QueryErrorCode, SalesAnalytics};
use salescope_report::{ReportError, ReportExporter, ReportManifest, MANIFEST_FILE};
use salescope_store::{SalesStore, StoreConfig};

fn line(order: &str, customer: &str, product: &str, sales: f64, profit: f64) -> SalesRecord {
    SalesRecord {
        order_id: order.to_string(),
        customer_id: customer.to_string(),
        customer_name: format!("Name {customer}"),
        order_date: "2024-02-10".to_string(),
        product: product.to_string(),
        product_category: "General".to_string(),
        region: "North".to_string(),
        city: "Oslo".to_string(),
        segment: "Consumer".to_string(),
        sales,
        profit,
        aging: 3,
        ship_mode: "Standard".to_string(),
        shipping_cost: 2.0,
    }
}

fn fixture_records() -> Vec<SalesRecord> {
    (0..15)
        .map(|i| {
            line(
                &format!("O{i}"),
                &format!("C{}", i % 12),
                &format!("P{i:02}"),
                100.0 + f64::from(i),
                f64::from(i) - 3.0,
            )
        })
        .collect()
}

fn write_db(dir: &Path) -> std::path::PathBuf {
    let path = dir.join("ecommerce.db");
    salescope_ingest::write_store(&path, &fixture_records()).expect("write store");
    path
}

fn read_manifest(dir: &Path) -> ReportManifest {
    let raw = fs::read_to_string(dir.join(MANIFEST_FILE)).expect("manifest");
    serde_json::from_str(&raw).expect("manifest json")
}

#[test]
fn descriptive_report_writes_one_csv_per_operation() {
    let tmp = tempfile::tempdir().expect("tmp");
    let store = SalesStore::open(StoreConfig::new(write_db(tmp.path()))).expect("open");
    let out = tmp.path().join("reports");
    let exporter = ReportExporter::new(&out);

    let manifest = store
        .with_session(|session| {
            let analytics = SalesAnalytics::for_session(session, &AnalyticsPolicy::default());
            exporter.export_tier(&analytics, Tier::Descriptive)
        })
        .expect("export");

    let dir = out.join("Descriptive_Analysis_report");
    assert_eq!(exporter.report_dir(Tier::Descriptive), dir);
    assert_eq!(manifest.sheets.len(), 11);
    assert_eq!(read_manifest(&dir), manifest);

    let top = manifest
        .sheets
        .iter()
        .find(|s| s.operation == "best-products")
        .expect("best-products sheet");
    assert_eq!(top.sheet, "Top Products");
    assert_eq!(top.rows, 10, "ranked sheets use the report row limit");

    for sheet in &manifest.sheets {
        let bytes = fs::read(dir.join(&sheet.file)).expect("sheet file");
        assert_eq!(salescope_core::sha256_hex(&bytes), sheet.sha256);
        let lines = String::from_utf8(bytes).expect("utf8").lines().count();
        assert_eq!(lines, sheet.rows + 1, "{} has a header plus its rows", sheet.file);
    }
    assert!(!out.join(".Descriptive_Analysis_report.tmp").exists());
}

#[test]
fn bundle_operations_split_into_labelled_sheets() {
    let tmp = tempfile::tempdir().expect("tmp");
    let store = SalesStore::open(StoreConfig::new(write_db(tmp.path()))).expect("open");
    let exporter = ReportExporter::new(tmp.path().join("reports"));

    let manifest = store
        .with_session(|session| {
            let analytics = SalesAnalytics::for_session(session, &AnalyticsPolicy::default());
            exporter.export_tier(&analytics, Tier::Predictive)
        })
        .expect("export");

    let names: Vec<&str> = manifest.sheets.iter().map(|s| s.sheet.as_str()).collect();
    assert!(names.contains(&"RFM Signals_Recency"));
    assert!(names.contains(&"RFM Signals_Frequency"));
    assert!(names.contains(&"RFM Signals_Monetary"));
    assert!(names.contains(&"High risk order_L_Profit"));
    assert!(names.contains(&"High risk order_H_Aging"));
    assert_eq!(manifest.sheets.len(), 8);

    let recency = manifest
        .sheets
        .iter()
        .find(|s| s.sheet == "RFM Signals_Recency")
        .expect("recency");
    assert_eq!(recency.label.as_deref(), Some("Recency"));
    assert_eq!(recency.rows, 12);
}

#[test]
fn export_all_writes_every_tier() {
    let tmp = tempfile::tempdir().expect("tmp");
    let store = SalesStore::open(StoreConfig::new(write_db(tmp.path()))).expect("open");
    let out = tmp.path().join("reports");
    let exporter = ReportExporter::new(&out).with_row_limit(3);

    let manifests = store
        .with_session(|session| {
            let analytics = SalesAnalytics::for_session(session, &AnalyticsPolicy::default());
            exporter.export_all(&analytics)
        })
        .expect("export");

    assert_eq!(manifests.len(), 3);
    for tier in Tier::ALL {
        assert!(out.join(ReportManifest::directory_name(tier)).join(MANIFEST_FILE).is_file());
    }
    assert!(manifests.iter().all(|m| m.row_limit == 3));
}

#[test]
fn failing_operation_aborts_without_manifest() {
    let tmp = tempfile::tempdir().expect("tmp");
    let db = write_db(tmp.path());
    let conn = rusqlite::Connection::open(&db).expect("conn");
    conn.execute_batch("ALTER TABLE cleaned_sales_data DROP COLUMN shipping_cost;")
        .expect("drop column");

    let out = tmp.path().join("reports");
    let exporter = ReportExporter::new(&out);
    let analytics = SalesAnalytics::new(&conn, &AnalyticsPolicy::default());

    let err = exporter
        .export_tier(&analytics, Tier::Predictive)
        .expect_err("high-risk orders needs shipping_cost");
    match err {
        ReportError::Query(e) => assert_eq!(e.code, QueryErrorCode::StoreUnavailable),
        other => panic!("unexpected error {other}"),
    }
    assert!(!out.join("Predictive_Analysis_report").exists());

    exporter
        .export_tier(&analytics, Tier::Descriptive)
        .expect("descriptive does not read shipping_cost");
}

#[test]
fn rerun_replaces_previous_report() {
    let tmp = tempfile::tempdir().expect("tmp");
    let store = SalesStore::open(StoreConfig::new(write_db(tmp.path()))).expect("open");
    let out = tmp.path().join("reports");
    let dir = out.join("Prescriptive_Analysis_report");
    fs::create_dir_all(&dir).expect("mkdir");
    fs::write(dir.join("stale.csv"), "old").expect("stale");

    let exporter = ReportExporter::new(&out);
    let first = store
        .with_session(|session| {
            let analytics = SalesAnalytics::for_session(session, &AnalyticsPolicy::default());
            exporter.export_tier(&analytics, Tier::Prescriptive)
        })
        .expect("export");
    let second = store
        .with_session(|session| {
            let analytics = SalesAnalytics::for_session(session, &AnalyticsPolicy::default());
            exporter.export_tier(&analytics, Tier::Prescriptive)
        })
        .expect("export");

    assert_eq!(first, second);
    assert!(!dir.join("stale.csv").exists());
    assert_eq!(first.sheets.len(), 6);
}
