// SPDX-License-Identifier: Apache-2.0

use rusqlite::types::Value;
use salescope_model::{HighRiskOrders, RfmSignals, Table};

use crate::analytics::SalesAnalytics;
use crate::catalog::OperationId;
use crate::query_error::QueryError;
use crate::sql;

impl SalesAnalytics<'_> {
    /// Three per-customer tables, left unjoined.
    pub fn rfm_signals(&self) -> Result<RfmSignals, QueryError> {
        let id = OperationId::RfmSignals;
        Ok(RfmSignals {
            recency: self.fetch(id, &sql::RFM_RECENCY, &[])?,
            frequency: self.fetch(id, &sql::RFM_FREQUENCY, &[])?,
            monetary: self.fetch(id, &sql::RFM_MONETARY, &[])?,
        })
    }

    /// Orders and sales per calendar month, busiest month first.
    pub fn seasonal_demand(&self) -> Result<Table, QueryError> {
        self.fetch(OperationId::SeasonalDemand, &sql::SEASONAL_DEMAND, &[])
    }

    pub fn product_performance_trend(&self) -> Result<Table, QueryError> {
        self.fetch(
            OperationId::ProductPerformanceTrend,
            &sql::PRODUCT_PERFORMANCE_TREND,
            &[],
        )
    }

    /// One aggregate `YYYY-MM` series; smoothing happens outside the catalog.
    pub fn monthly_sales_forecast_input(&self) -> Result<Table, QueryError> {
        self.fetch(
            OperationId::MonthlySalesForecastInput,
            &sql::MONTHLY_SALES_FORECAST_INPUT,
            &[],
        )
    }

    /// Literal line items, not summaries. The two tables may overlap.
    pub fn high_risk_orders(&self) -> Result<HighRiskOrders, QueryError> {
        let id = OperationId::HighRiskOrders;
        Ok(HighRiskOrders {
            low_profit: self.fetch(id, &sql::HIGH_RISK_LOW_PROFIT, &[])?,
            high_aging: self.fetch(
                id,
                &sql::HIGH_RISK_HIGH_AGING,
                &[Value::Integer(self.thresholds.risk_min_aging_days)],
            )?,
        })
    }
}
