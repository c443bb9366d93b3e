// SPDX-License-Identifier: Apache-2.0

pub const DEFAULT_ROW_LIMIT: u32 = 5;
pub const DEFAULT_MAX_LIMIT: u32 = 1_000;
pub const MAX_LIMIT_HARD: u32 = 100_000;
pub const DEFAULT_BUSY_TIMEOUT_MS: u64 = 5_000;
pub const DEFAULT_QUERY_TIMEOUT_MS: u64 = 30_000;

pub(crate) const DISCOUNT_MAX_SALES: f64 = 500.0;
pub(crate) const DISCOUNT_MAX_PROFIT: f64 = 0.0;
pub(crate) const PROMOTE_MIN_SALES: f64 = 5_000.0;
pub(crate) const PROMOTE_MIN_PROFIT: f64 = 1_000.0;
pub(crate) const LOYALTY_MIN_SALES: f64 = 5_000.0;
pub(crate) const LOYALTY_MIN_ORDERS: i64 = 15;
pub(crate) const RISK_MIN_AGING_DAYS: i64 = 10;
