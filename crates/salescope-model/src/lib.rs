// SPDX-License-Identifier: Apache-2.0

#![forbid(unsafe_code)]
//! Salescope model SSOT: the fact-table schema every crate agrees on and the
//! typed tables that catalog operations return.

mod chart;
mod fact;
mod result;
mod series;
mod table;

pub use chart::{CategoryAxis, ChartPoint, ChartSpec};
pub use fact::{fact_columns, SalesRecord, FACT_SCHEMA, FACT_TABLE};
pub use result::{HighRiskOrders, QueryResult, RfmSignals, Tier};
pub use series::{trailing_moving_average, with_moving_average};
pub use table::{Cell, Column, ColumnType, Table, TableError};

pub const CRATE_NAME: &str = "salescope-model";
