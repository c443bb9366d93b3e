// SPDX-License-Identifier: Apache-2.0

use rusqlite::types::Value;
use salescope_model::Table;

use crate::analytics::SalesAnalytics;
use crate::catalog::OperationId;
use crate::query_error::QueryError;
use crate::sql;

impl SalesAnalytics<'_> {
    pub fn products_to_discount(&self) -> Result<Table, QueryError> {
        let t = &self.thresholds;
        self.fetch(
            OperationId::ProductsToDiscount,
            &sql::PRODUCTS_TO_DISCOUNT,
            &[
                Value::Real(t.discount_max_sales),
                Value::Real(t.discount_max_profit),
            ],
        )
    }

    pub fn products_to_promote(&self) -> Result<Table, QueryError> {
        let t = &self.thresholds;
        self.fetch(
            OperationId::ProductsToPromote,
            &sql::PRODUCTS_TO_PROMOTE,
            &[
                Value::Real(t.promote_min_sales),
                Value::Real(t.promote_min_profit),
            ],
        )
    }

    pub fn loyal_customers(&self) -> Result<Table, QueryError> {
        let t = &self.thresholds;
        self.fetch(
            OperationId::LoyalCustomers,
            &sql::LOYAL_CUSTOMERS,
            &[
                Value::Real(t.loyalty_min_sales),
                Value::Integer(t.loyalty_min_orders),
            ],
        )
    }

    /// Whole customer base, stalest last order first. Risk is the rank, not
    /// a filter.
    pub fn churning_customers(&self) -> Result<Table, QueryError> {
        self.fetch(OperationId::ChurningCustomers, &sql::CHURNING_CUSTOMERS, &[])
    }

    pub fn logistics_improvement_by_city(&self) -> Result<Table, QueryError> {
        self.fetch(
            OperationId::LogisticsImprovementByCity,
            &sql::LOGISTICS_BY_CITY,
            &[],
        )
    }

    pub fn shipping_mode_optimization(&self) -> Result<Table, QueryError> {
        self.fetch(
            OperationId::ShippingModeOptimization,
            &sql::SHIPPING_MODE_OPTIMIZATION,
            &[],
        )
    }
}
