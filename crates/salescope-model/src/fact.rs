// SPDX-License-Identifier: Apache-2.0

use serde::{Deserialize, Serialize};

use crate::table::{Cell, Column, ColumnType};

pub const FACT_TABLE: &str = "cleaned_sales_data";

/// Column order of the fact table. Ingestion creates it in this order and full
/// row projections return it in this order.
pub const FACT_SCHEMA: [(&str, ColumnType); 14] = [
    ("order_id", ColumnType::Text),
    ("customer_id", ColumnType::Text),
    ("customer_name", ColumnType::Text),
    ("order_date", ColumnType::Date),
    ("product", ColumnType::Text),
    ("product_category", ColumnType::Text),
    ("region", ColumnType::Text),
    ("city", ColumnType::Text),
    ("segment", ColumnType::Text),
    ("sales", ColumnType::Real),
    ("profit", ColumnType::Real),
    ("aging", ColumnType::Integer),
    ("ship_mode", ColumnType::Text),
    ("shipping_cost", ColumnType::Real),
];

#[must_use]
pub fn fact_columns() -> Vec<Column> {
    FACT_SCHEMA
        .iter()
        .map(|(name, kind)| Column::new(*name, *kind))
        .collect()
}

/// One order line item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SalesRecord {
    pub order_id: String,
    pub customer_id: String,
    pub customer_name: String,
    /// ISO `YYYY-MM-DD`.
    pub order_date: String,
    pub product: String,
    pub product_category: String,
    pub region: String,
    pub city: String,
    pub segment: String,
    pub sales: f64,
    pub profit: f64,
    pub aging: i64,
    pub ship_mode: String,
    pub shipping_cost: f64,
}

impl SalesRecord {
    /// Cells in `FACT_SCHEMA` order.
    #[must_use]
    pub fn to_cells(&self) -> Vec<Cell> {
        vec![
            Cell::Text(self.order_id.clone()),
            Cell::Text(self.customer_id.clone()),
            Cell::Text(self.customer_name.clone()),
            Cell::Text(self.order_date.clone()),
            Cell::Text(self.product.clone()),
            Cell::Text(self.product_category.clone()),
            Cell::Text(self.region.clone()),
            Cell::Text(self.city.clone()),
            Cell::Text(self.segment.clone()),
            Cell::Real(self.sales),
            Cell::Real(self.profit),
            Cell::Integer(self.aging),
            Cell::Text(self.ship_mode.clone()),
            Cell::Real(self.shipping_cost),
        ]
    }
}
