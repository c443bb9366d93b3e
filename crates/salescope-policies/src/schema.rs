// SPDX-License-Identifier: Apache-2.0

use serde::{Deserialize, Serialize};

use crate::limits::{
    DEFAULT_BUSY_TIMEOUT_MS, DEFAULT_MAX_LIMIT, DEFAULT_QUERY_TIMEOUT_MS, DEFAULT_ROW_LIMIT,
    DISCOUNT_MAX_PROFIT, DISCOUNT_MAX_SALES, LOYALTY_MIN_ORDERS, LOYALTY_MIN_SALES,
    PROMOTE_MIN_PROFIT, PROMOTE_MIN_SALES, RISK_MIN_AGING_DAYS,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[non_exhaustive]
pub enum PolicySchemaVersion {
    #[serde(rename = "1")]
    V1,
}

impl PolicySchemaVersion {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::V1 => "1",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AnalyticsPolicy {
    pub schema_version: PolicySchemaVersion,
    pub thresholds: Thresholds,
    pub query_limits: QueryLimitsPolicy,
}

impl Default for AnalyticsPolicy {
    fn default() -> Self {
        Self {
            schema_version: PolicySchemaVersion::V1,
            thresholds: Thresholds::default(),
            query_limits: QueryLimitsPolicy::default(),
        }
    }
}

/// Fixed business cut-offs for the prescriptive and risk queries. Comparisons
/// are strict: discount is `sales < discount_max_sales AND profit <
/// discount_max_profit`, promote is `sales > .. AND profit > ..`, loyalty is
/// `sales > .. OR orders > ..`, risk is `aging > risk_min_aging_days`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Thresholds {
    pub discount_max_sales: f64,
    pub discount_max_profit: f64,
    pub promote_min_sales: f64,
    pub promote_min_profit: f64,
    pub loyalty_min_sales: f64,
    pub loyalty_min_orders: i64,
    pub risk_min_aging_days: i64,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            discount_max_sales: DISCOUNT_MAX_SALES,
            discount_max_profit: DISCOUNT_MAX_PROFIT,
            promote_min_sales: PROMOTE_MIN_SALES,
            promote_min_profit: PROMOTE_MIN_PROFIT,
            loyalty_min_sales: LOYALTY_MIN_SALES,
            loyalty_min_orders: LOYALTY_MIN_ORDERS,
            risk_min_aging_days: RISK_MIN_AGING_DAYS,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct QueryLimitsPolicy {
    pub max_limit: u32,
    pub default_limit: u32,
    pub busy_timeout_ms: u64,
    pub query_timeout_ms: u64,
}

impl Default for QueryLimitsPolicy {
    fn default() -> Self {
        Self {
            max_limit: DEFAULT_MAX_LIMIT,
            default_limit: DEFAULT_ROW_LIMIT,
            busy_timeout_ms: DEFAULT_BUSY_TIMEOUT_MS,
            query_timeout_ms: DEFAULT_QUERY_TIMEOUT_MS,
        }
    }
}
