// SPDX-License-Identifier: Apache-2.0

#![forbid(unsafe_code)]

mod limits;
mod schema;
mod validate;

pub use limits::{
    DEFAULT_BUSY_TIMEOUT_MS, DEFAULT_ROW_LIMIT, DEFAULT_MAX_LIMIT, DEFAULT_QUERY_TIMEOUT_MS,
    MAX_LIMIT_HARD,
};
pub use schema::{AnalyticsPolicy, PolicySchemaVersion, QueryLimitsPolicy, Thresholds};
pub use validate::{
    canonical_policy_json, load_policy, load_policy_or_default, parse_policy_json,
    validate_policy, PolicyValidationError,
};

pub const CRATE_NAME: &str = "salescope-policies";
