// SPDX-License-Identifier: Apache-2.0

use salescope_policies::AnalyticsPolicy;
use serde::{Deserialize, Serialize};

use crate::catalog::{OperationDescriptor, ParamSchema};
use crate::query_error::QueryError;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct QueryLimits {
    pub max_limit: i64,
    pub default_limit: i64,
}

impl Default for QueryLimits {
    fn default() -> Self {
        Self::from_policy(&AnalyticsPolicy::default())
    }
}

impl QueryLimits {
    #[must_use]
    pub fn from_policy(policy: &AnalyticsPolicy) -> Self {
        Self {
            max_limit: i64::from(policy.query_limits.max_limit),
            default_limit: i64::from(policy.query_limits.default_limit),
        }
    }

    pub fn check_row_limit(&self, limit: i64) -> Result<i64, QueryError> {
        if limit <= 0 {
            return Err(QueryError::invalid_parameter(format!(
                "limit must be a positive integer, got {limit}"
            )));
        }
        if limit > self.max_limit {
            return Err(QueryError::invalid_parameter(format!(
                "limit {limit} exceeds max_limit {}",
                self.max_limit
            )));
        }
        Ok(limit)
    }

    /// Effective limit for a request against `desc`, or `None` for
    /// operations that take no parameter.
    pub fn resolve(
        &self,
        desc: &OperationDescriptor,
        requested: Option<i64>,
    ) -> Result<Option<i64>, QueryError> {
        match (desc.param, requested) {
            (ParamSchema::None, None) => Ok(None),
            (ParamSchema::None, Some(_)) => Err(QueryError::invalid_parameter(format!(
                "operation {} takes no limit",
                desc.name
            ))),
            (ParamSchema::RowLimit { .. }, None) => Ok(Some(self.default_limit)),
            (ParamSchema::RowLimit { .. }, Some(n)) => self.check_row_limit(n).map(Some),
        }
    }
}
