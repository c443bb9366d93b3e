// SPDX-License-Identifier: Apache-2.0

use std::fs;
use std::path::Path;

use crate::limits::MAX_LIMIT_HARD;
use crate::schema::AnalyticsPolicy;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PolicyValidationError(pub String);

impl std::fmt::Display for PolicyValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::error::Error for PolicyValidationError {}

pub fn parse_policy_json(raw: &str) -> Result<AnalyticsPolicy, PolicyValidationError> {
    let policy: AnalyticsPolicy = serde_json::from_str(raw)
        .map_err(|e| PolicyValidationError(format!("policy decode failed: {e}")))?;
    validate_policy(&policy)?;
    Ok(policy)
}

pub fn load_policy(path: &Path) -> Result<AnalyticsPolicy, PolicyValidationError> {
    let raw = fs::read_to_string(path).map_err(|e| {
        PolicyValidationError(format!("read policy {} failed: {e}", path.display()))
    })?;
    parse_policy_json(&raw)
}

pub fn load_policy_or_default(
    path: Option<&Path>,
) -> Result<AnalyticsPolicy, PolicyValidationError> {
    match path {
        Some(p) => load_policy(p),
        None => Ok(AnalyticsPolicy::default()),
    }
}

pub fn validate_policy(policy: &AnalyticsPolicy) -> Result<(), PolicyValidationError> {
    let limits = &policy.query_limits;
    if limits.max_limit == 0 || limits.max_limit > MAX_LIMIT_HARD {
        return Err(PolicyValidationError(format!(
            "query_limits.max_limit must be between 1 and {MAX_LIMIT_HARD}"
        )));
    }
    if limits.default_limit == 0 || limits.default_limit > limits.max_limit {
        return Err(PolicyValidationError(
            "query_limits.default_limit must be between 1 and max_limit".to_string(),
        ));
    }
    if limits.query_timeout_ms == 0 {
        return Err(PolicyValidationError(
            "query_limits.query_timeout_ms must be > 0".to_string(),
        ));
    }

    let t = &policy.thresholds;
    let reals = [
        ("discount_max_sales", t.discount_max_sales),
        ("discount_max_profit", t.discount_max_profit),
        ("promote_min_sales", t.promote_min_sales),
        ("promote_min_profit", t.promote_min_profit),
        ("loyalty_min_sales", t.loyalty_min_sales),
    ];
    for (name, value) in reals {
        if !value.is_finite() {
            return Err(PolicyValidationError(format!(
                "thresholds.{name} must be finite"
            )));
        }
    }
    if t.loyalty_min_orders < 0 {
        return Err(PolicyValidationError(
            "thresholds.loyalty_min_orders must be >= 0".to_string(),
        ));
    }
    if t.risk_min_aging_days < 0 {
        return Err(PolicyValidationError(
            "thresholds.risk_min_aging_days must be >= 0".to_string(),
        ));
    }
    // Overlapping bands would put one product in both discount and promote.
    if t.promote_min_sales <= t.discount_max_sales {
        return Err(PolicyValidationError(
            "thresholds.promote_min_sales must exceed discount_max_sales".to_string(),
        ));
    }
    Ok(())
}

pub fn canonical_policy_json(policy: &AnalyticsPolicy) -> Result<String, PolicyValidationError> {
    serde_json::to_string_pretty(policy).map_err(|e| PolicyValidationError(e.to_string()))
}
