// SPDX-License-Identifier: Apache-2.0

use std::fs;
use std::path::Path;

use rusqlite::{params, Connection};
use salescope_model::SalesRecord;

use crate::IngestError;

pub const SCHEMA_VERSION: i64 = 1;

/// Replaces the fact table, its lookup indexes and the schema version.
pub fn create_schema(conn: &Connection) -> Result<(), IngestError> {
    conn.execute_batch(
        "
        DROP TABLE IF EXISTS cleaned_sales_data;
        CREATE TABLE cleaned_sales_data (
          order_id TEXT NOT NULL,
          customer_id TEXT NOT NULL,
          customer_name TEXT NOT NULL,
          order_date TEXT NOT NULL,
          product TEXT NOT NULL,
          product_category TEXT NOT NULL,
          region TEXT NOT NULL,
          city TEXT NOT NULL,
          segment TEXT NOT NULL,
          sales REAL NOT NULL,
          profit REAL NOT NULL,
          aging INTEGER NOT NULL,
          ship_mode TEXT NOT NULL,
          shipping_cost REAL NOT NULL
        );
        CREATE INDEX idx_sales_product ON cleaned_sales_data(product);
        CREATE INDEX idx_sales_customer_id ON cleaned_sales_data(customer_id);
        CREATE INDEX idx_sales_order_date ON cleaned_sales_data(order_date);
        ",
    )
    .map_err(|e| IngestError(format!("create schema failed: {e}")))?;
    conn.execute_batch(&format!("PRAGMA user_version={SCHEMA_VERSION};"))
        .map_err(|e| IngestError(e.to_string()))
}

pub fn insert_records(conn: &Connection, records: &[SalesRecord]) -> Result<usize, IngestError> {
    let mut stmt = conn
        .prepare_cached(
            "INSERT INTO cleaned_sales_data (
              order_id, customer_id, customer_name, order_date, product, product_category,
              region, city, segment, sales, profit, aging, ship_mode, shipping_cost
             ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14)",
        )
        .map_err(|e| IngestError(e.to_string()))?;
    for r in records {
        stmt.execute(params![
            r.order_id,
            r.customer_id,
            r.customer_name,
            r.order_date,
            r.product,
            r.product_category,
            r.region,
            r.city,
            r.segment,
            r.sales,
            r.profit,
            r.aging,
            r.ship_mode,
            r.shipping_cost,
        ])
        .map_err(|e| IngestError(format!("insert order {} failed: {e}", r.order_id)))?;
    }
    Ok(records.len())
}

/// Creates (or replaces) a store file holding exactly `records`.
pub fn write_store(path: &Path, records: &[SalesRecord]) -> Result<usize, IngestError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| IngestError(e.to_string()))?;
    }
    let mut conn = Connection::open(path).map_err(|e| IngestError(e.to_string()))?;
    let tx = conn.transaction().map_err(|e| IngestError(e.to_string()))?;
    create_schema(&tx)?;
    let n = insert_records(&tx, records)?;
    tx.commit().map_err(|e| IngestError(e.to_string()))?;
    Ok(n)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn schema_is_replaceable_and_versioned() {
        let conn = Connection::open_in_memory().expect("mem");
        create_schema(&conn).expect("first");
        conn.execute_batch(
            "INSERT INTO cleaned_sales_data VALUES \
             ('o','c','n','2024-01-01','p','pc','r','ci','s',1,1,1,'m',1);",
        )
        .expect("insert");
        create_schema(&conn).expect("second");
        let rows: i64 = conn
            .query_row("SELECT COUNT(*) FROM cleaned_sales_data", [], |r| r.get(0))
            .expect("count");
        assert_eq!(rows, 0);
        let version: i64 = conn
            .query_row("PRAGMA user_version", [], |r| r.get(0))
            .expect("version");
        assert_eq!(version, SCHEMA_VERSION);
    }

    #[test]
    fn lookup_indexes_exist() {
        let conn = Connection::open_in_memory().expect("mem");
        create_schema(&conn).expect("schema");
        let mut stmt = conn
            .prepare("SELECT name FROM sqlite_master WHERE type='index' ORDER BY name")
            .expect("prepare");
        let names: Vec<String> = stmt
            .query_map([], |r| r.get(0))
            .expect("query")
            .collect::<Result<_, _>>()
            .expect("rows");
        assert_eq!(
            names,
            vec![
                "idx_sales_customer_id".to_string(),
                "idx_sales_order_date".to_string(),
                "idx_sales_product".to_string(),
            ]
        );
    }
}
