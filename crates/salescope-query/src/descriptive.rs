// SPDX-License-Identifier: Apache-2.0

use rusqlite::types::Value;
use salescope_model::Table;

use crate::analytics::SalesAnalytics;
use crate::catalog::OperationId;
use crate::query_error::QueryError;
use crate::sql;

impl SalesAnalytics<'_> {
    /// Counts fact rows. Line items sharing an order are each counted.
    pub fn total_orders(&self) -> Result<Table, QueryError> {
        self.fetch(OperationId::TotalOrders, &sql::TOTAL_ORDERS, &[])
    }

    pub fn sales_and_profit(&self) -> Result<Table, QueryError> {
        self.fetch(OperationId::SalesAndProfit, &sql::SALES_AND_PROFIT, &[])
    }

    pub fn sales_by_category(&self) -> Result<Table, QueryError> {
        self.fetch(OperationId::SalesByCategory, &sql::SALES_BY_CATEGORY, &[])
    }

    pub fn sales_by_region(&self) -> Result<Table, QueryError> {
        self.fetch(OperationId::SalesByRegion, &sql::SALES_BY_REGION, &[])
    }

    /// Calendar month names in month order. Months without orders are absent.
    pub fn monthly_sales(&self) -> Result<Table, QueryError> {
        self.fetch(OperationId::MonthlySales, &sql::MONTHLY_SALES, &[])
    }

    pub fn yearly_sales(&self) -> Result<Table, QueryError> {
        self.fetch(OperationId::YearlySales, &sql::YEARLY_SALES, &[])
    }

    pub fn best_products(&self, limit: i64) -> Result<Table, QueryError> {
        let limit = self.limits.check_row_limit(limit)?;
        self.fetch(
            OperationId::BestProducts,
            &sql::BEST_PRODUCTS,
            &[Value::Integer(limit)],
        )
    }

    pub fn worst_products(&self, limit: i64) -> Result<Table, QueryError> {
        let limit = self.limits.check_row_limit(limit)?;
        self.fetch(
            OperationId::WorstProducts,
            &sql::WORST_PRODUCTS,
            &[Value::Integer(limit)],
        )
    }

    pub fn top_customers(&self, limit: i64) -> Result<Table, QueryError> {
        let limit = self.limits.check_row_limit(limit)?;
        self.fetch(
            OperationId::TopCustomers,
            &sql::TOP_CUSTOMERS,
            &[Value::Integer(limit)],
        )
    }

    pub fn profit_by_product(&self) -> Result<Table, QueryError> {
        self.fetch(OperationId::ProfitByProduct, &sql::PROFIT_BY_PRODUCT, &[])
    }

    pub fn profit_by_segment(&self) -> Result<Table, QueryError> {
        self.fetch(OperationId::ProfitBySegment, &sql::PROFIT_BY_SEGMENT, &[])
    }
}
