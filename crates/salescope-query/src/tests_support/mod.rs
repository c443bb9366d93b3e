// SPDX-License-Identifier: Apache-2.0

use rusqlite::Connection;
use salescope_model::{Cell, SalesRecord, Table};

type Line = (
    &'static str,
    &'static str,
    &'static str,
    &'static str,
    &'static str,
    &'static str,
    &'static str,
    &'static str,
    &'static str,
    f64,
    f64,
    i64,
    &'static str,
    f64,
);

// order, customer, name, date, product, category, region, city, segment,
// sales, profit, aging, ship mode, shipping cost
#[rustfmt::skip]
const LINES: [Line; 5] = [
    ("O1", "C1", "Ada", "2024-01-05", "Desk", "Furniture", "West", "Austin", "Consumer", 100.0, -10.0, 3, "Standard", 5.0),
    ("O1", "C1", "Ada", "2024-01-05", "Lamp", "Office", "West", "Austin", "Consumer", 50.0, 5.0, 3, "Standard", 2.0),
    ("O2", "C1", "Ada", "2024-03-20", "Desk", "Furniture", "West", "Austin", "Consumer", 200.0, 20.0, 12, "Express", 9.0),
    ("O3", "C2", "Grace", "2023-11-11", "Chair", "Furniture", "East", "Boston", "Corporate", 10000.0, 2000.0, 1, "Express", 30.0),
    ("O4", "C3", "Linus", "2024-03-02", "Pen", "Office", "East", "Boston", "Home Office", 5.0, -1.0, 15, "Standard", 1.0),
];

pub(crate) fn record(line: &Line) -> SalesRecord {
    SalesRecord {
        order_id: line.0.to_string(),
        customer_id: line.1.to_string(),
        customer_name: line.2.to_string(),
        order_date: line.3.to_string(),
        product: line.4.to_string(),
        product_category: line.5.to_string(),
        region: line.6.to_string(),
        city: line.7.to_string(),
        segment: line.8.to_string(),
        sales: line.9,
        profit: line.10,
        aging: line.11,
        ship_mode: line.12.to_string(),
        shipping_cost: line.13,
    }
}

pub(crate) fn setup_db() -> Connection {
    let conn = Connection::open_in_memory().expect("open memory db");
    salescope_ingest::create_schema(&conn).expect("schema");
    let records: Vec<SalesRecord> = LINES.iter().map(record).collect();
    salescope_ingest::insert_records(&conn, &records).expect("insert");
    conn
}

/// Fact table with `n` synthetic rows, large enough to trip a progress handler.
pub(crate) fn setup_large_db(n: i64) -> Connection {
    let conn = Connection::open_in_memory().expect("open memory db");
    salescope_ingest::create_schema(&conn).expect("schema");
    conn.execute(
        "WITH RECURSIVE seq(i) AS (SELECT 1 UNION ALL SELECT i + 1 FROM seq WHERE i < ?1)
         INSERT INTO cleaned_sales_data
         SELECT 'O' || i, 'C' || (i % 97), 'N' || (i % 97), '2024-01-01', 'P' || (i % 31),
                'Cat' || (i % 7), 'R', 'City', 'S', i * 1.0, 1.0, i % 20, 'M', 1.0
         FROM seq",
        [n],
    )
    .expect("bulk insert");
    conn
}

pub(crate) fn texts(table: &Table, column: &str) -> Vec<String> {
    table
        .column_values(column)
        .expect("column")
        .into_iter()
        .map(|c| c.as_str().expect("text cell").to_string())
        .collect()
}

pub(crate) fn reals(table: &Table, column: &str) -> Vec<f64> {
    table
        .column_values(column)
        .expect("column")
        .into_iter()
        .map(|c| c.as_f64().expect("numeric cell"))
        .collect()
}

pub(crate) fn first(table: &Table, column: &str) -> Cell {
    table.cell(0, column).cloned().expect("first row")
}
