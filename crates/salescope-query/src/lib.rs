// SPDX-License-Identifier: Apache-2.0

#![forbid(unsafe_code)]
//! Fixed catalog of read-only aggregation queries over `cleaned_sales_data`,
//! split into descriptive, predictive and prescriptive tiers.
//!
//! Callers pick an [`OperationId`], optionally pass a row limit, and get back a
//! [`QueryResult`]: one table, or a fixed-label bundle of tables.

mod analytics;
mod catalog;
mod descriptive;
mod executor;
mod limits;
mod predictive;
mod prescriptive;
mod query_error;
mod sql;

pub use analytics::SalesAnalytics;
pub use catalog::{
    tier_operations, OperationDescriptor, OperationId, OperationRequest, ParamSchema,
    ResultShape, CATALOG,
};
pub use limits::QueryLimits;
pub use query_error::{QueryError, QueryErrorCode};
pub use salescope_model::{HighRiskOrders, QueryResult, RfmSignals, Table, Tier};

pub const CRATE_NAME: &str = "salescope-query";

#[cfg(test)]
mod tests_support;
