// SPDX-License-Identifier: Apache-2.0

use std::time::Duration;

use rusqlite::types::Value;
use rusqlite::Connection;
use salescope_model::{QueryResult, Table};
use salescope_policies::{AnalyticsPolicy, Thresholds};
use salescope_store::StoreSession;

use crate::catalog::{OperationId, OperationRequest};
use crate::executor::fetch_table;
use crate::limits::QueryLimits;
use crate::query_error::QueryError;
use crate::sql::TableQuery;

/// The query catalog bound to one read connection. Holds no state between
/// calls; every method is a pure read.
pub struct SalesAnalytics<'c> {
    pub(crate) conn: &'c Connection,
    pub(crate) thresholds: Thresholds,
    pub(crate) limits: QueryLimits,
    pub(crate) query_timeout: Option<Duration>,
}

impl<'c> SalesAnalytics<'c> {
    #[must_use]
    pub fn new(conn: &'c Connection, policy: &AnalyticsPolicy) -> Self {
        Self {
            conn,
            thresholds: policy.thresholds.clone(),
            limits: QueryLimits::from_policy(policy),
            query_timeout: None,
        }
    }

    /// Binds to a store session and adopts its query timeout.
    #[must_use]
    pub fn for_session(session: &'c StoreSession, policy: &AnalyticsPolicy) -> Self {
        Self::new(session.connection(), policy).with_query_timeout(session.query_timeout())
    }

    #[must_use]
    pub fn with_query_timeout(mut self, timeout: Duration) -> Self {
        self.query_timeout = Some(timeout);
        self
    }

    /// Dispatches a request through its descriptor. Limits are validated
    /// before any SQL runs.
    pub fn run(&self, request: &OperationRequest) -> Result<QueryResult, QueryError> {
        let desc = request.id.descriptor();
        // Only row-limited operations resolve to `Some`.
        let limit = self.limits.resolve(desc, request.limit)?;
        let n = limit.unwrap_or(self.limits.default_limit);
        let table = |t: Result<Table, QueryError>| t.map(QueryResult::Table);
        match request.id {
            OperationId::TotalOrders => table(self.total_orders()),
            OperationId::SalesAndProfit => table(self.sales_and_profit()),
            OperationId::SalesByCategory => table(self.sales_by_category()),
            OperationId::SalesByRegion => table(self.sales_by_region()),
            OperationId::MonthlySales => table(self.monthly_sales()),
            OperationId::YearlySales => table(self.yearly_sales()),
            OperationId::ProfitByProduct => table(self.profit_by_product()),
            OperationId::ProfitBySegment => table(self.profit_by_segment()),
            OperationId::BestProducts => table(self.best_products(n)),
            OperationId::WorstProducts => table(self.worst_products(n)),
            OperationId::TopCustomers => table(self.top_customers(n)),
            OperationId::RfmSignals => self.rfm_signals().map(QueryResult::Rfm),
            OperationId::SeasonalDemand => table(self.seasonal_demand()),
            OperationId::ProductPerformanceTrend => table(self.product_performance_trend()),
            OperationId::MonthlySalesForecastInput => {
                table(self.monthly_sales_forecast_input())
            }
            OperationId::HighRiskOrders => self.high_risk_orders().map(QueryResult::HighRisk),
            OperationId::ProductsToDiscount => table(self.products_to_discount()),
            OperationId::ProductsToPromote => table(self.products_to_promote()),
            OperationId::LoyalCustomers => table(self.loyal_customers()),
            OperationId::ChurningCustomers => table(self.churning_customers()),
            OperationId::LogisticsImprovementByCity => {
                table(self.logistics_improvement_by_city())
            }
            OperationId::ShippingModeOptimization => table(self.shipping_mode_optimization()),
        }
    }

    pub(crate) fn fetch(
        &self,
        id: OperationId,
        query: &TableQuery,
        params: &[Value],
    ) -> Result<Table, QueryError> {
        fetch_table(self.conn, id.name(), query, params, self.query_timeout)
    }
}
