// SPDX-License-Identifier: Apache-2.0

use criterion::{criterion_group, criterion_main, Criterion};
use rusqlite::Connection;
use salescope_model::SalesRecord;
use salescope_policies::AnalyticsPolicy;
use salescope_query::{OperationRequest, SalesAnalytics, CATALOG};

fn setup_db(rows: usize) -> Connection {
    let conn = Connection::open_in_memory().expect("open memory db");
    salescope_ingest::create_schema(&conn).expect("schema");
    let records: Vec<SalesRecord> = (0..rows)
        .map(|i| SalesRecord {
            order_id: format!("O{}", i / 3),
            customer_id: format!("C{}", i % 500),
            customer_name: format!("Customer {}", i % 500),
            order_date: format!("{}-{:02}-{:02}", 2021 + i % 4, 1 + i % 12, 1 + i % 28),
            product: format!("P{}", i % 800),
            product_category: format!("Category {}", i % 9),
            region: format!("Region {}", i % 5),
            city: format!("City {}", i % 60),
            segment: format!("Segment {}", i % 3),
            sales: (i % 997) as f64 * 1.25,
            profit: (i % 211) as f64 - 90.0,
            aging: (i % 17) as i64,
            ship_mode: format!("Mode {}", i % 4),
            shipping_cost: (i % 31) as f64 * 0.5,
        })
        .collect();
    salescope_ingest::insert_records(&conn, &records).expect("insert");
    conn
}

fn bench_catalog(c: &mut Criterion) {
    let conn = setup_db(50_000);
    let analytics = SalesAnalytics::new(&conn, &AnalyticsPolicy::default());

    for desc in &CATALOG {
        let req = OperationRequest::new(desc.id);
        c.bench_function(&format!("catalog_{}", desc.name), |b| {
            b.iter(|| {
                let result = analytics.run(&req).expect("run");
                criterion::black_box(result.row_count());
            });
        });
    }

    c.bench_function("catalog_full_sweep", |b| {
        b.iter(|| {
            for desc in &CATALOG {
                let result = analytics
                    .run(&OperationRequest::new(desc.id))
                    .expect("run");
                criterion::black_box(result.row_count());
            }
        });
    });
}

criterion_group!(benches, bench_catalog);
criterion_main!(benches);
