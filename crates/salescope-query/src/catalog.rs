// SPDX-License-Identifier: Apache-2.0

use salescope_model::{HighRiskOrders, RfmSignals, Tier};
use salescope_policies::DEFAULT_ROW_LIMIT;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OperationId {
    TotalOrders,
    SalesAndProfit,
    SalesByCategory,
    SalesByRegion,
    MonthlySales,
    YearlySales,
    ProfitByProduct,
    ProfitBySegment,
    BestProducts,
    WorstProducts,
    TopCustomers,
    RfmSignals,
    SeasonalDemand,
    ProductPerformanceTrend,
    MonthlySalesForecastInput,
    HighRiskOrders,
    ProductsToDiscount,
    ProductsToPromote,
    LoyalCustomers,
    ChurningCustomers,
    LogisticsImprovementByCity,
    ShippingModeOptimization,
}

/// Declared parameter of an operation. Replaces inspecting call arity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ParamSchema {
    None,
    RowLimit { default: u32 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "labels", rename_all = "snake_case")]
pub enum ResultShape {
    Table,
    Bundle(&'static [&'static str]),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct OperationDescriptor {
    pub id: OperationId,
    pub name: &'static str,
    pub title: &'static str,
    pub tier: Tier,
    pub param: ParamSchema,
    pub shape: ResultShape,
}

const fn table(
    id: OperationId,
    name: &'static str,
    title: &'static str,
    tier: Tier,
) -> OperationDescriptor {
    OperationDescriptor {
        id,
        name,
        title,
        tier,
        param: ParamSchema::None,
        shape: ResultShape::Table,
    }
}

const fn ranked(
    id: OperationId,
    name: &'static str,
    title: &'static str,
) -> OperationDescriptor {
    OperationDescriptor {
        id,
        name,
        title,
        tier: Tier::Descriptive,
        param: ParamSchema::RowLimit {
            default: DEFAULT_ROW_LIMIT,
        },
        shape: ResultShape::Table,
    }
}

/// Every operation, grouped by tier in report order.
pub static CATALOG: [OperationDescriptor; 22] = [
    table(OperationId::TotalOrders, "total-orders", "Total Orders", Tier::Descriptive),
    table(OperationId::SalesAndProfit, "sales-and-profit", "Profit Generated", Tier::Descriptive),
    table(
        OperationId::SalesByCategory,
        "sales-by-category",
        "Categorical Sales",
        Tier::Descriptive,
    ),
    table(OperationId::SalesByRegion, "sales-by-region", "Regional Sales", Tier::Descriptive),
    table(OperationId::MonthlySales, "monthly-sales", "Monthly Sales", Tier::Descriptive),
    table(OperationId::YearlySales, "yearly-sales", "Yearly Sales", Tier::Descriptive),
    table(
        OperationId::ProfitByProduct,
        "profit-by-product",
        "Profit Per Product",
        Tier::Descriptive,
    ),
    table(
        OperationId::ProfitBySegment,
        "profit-by-segment",
        "Profit Per Segment",
        Tier::Descriptive,
    ),
    ranked(OperationId::BestProducts, "best-products", "Top Products"),
    ranked(OperationId::WorstProducts, "worst-products", "Worst Products"),
    ranked(OperationId::TopCustomers, "top-customers", "Best Customers"),
    OperationDescriptor {
        id: OperationId::RfmSignals,
        name: "rfm-signals",
        title: "RFM Signals",
        tier: Tier::Predictive,
        param: ParamSchema::None,
        shape: ResultShape::Bundle(&RfmSignals::LABELS),
    },
    table(OperationId::SeasonalDemand, "seasonal-demand", "Seasonal Demands", Tier::Predictive),
    table(
        OperationId::ProductPerformanceTrend,
        "product-performance-trend",
        "Products Performance Trends",
        Tier::Predictive,
    ),
    table(
        OperationId::MonthlySalesForecastInput,
        "monthly-sales-forecast-input",
        "Monthly Sales For Forecasting",
        Tier::Predictive,
    ),
    OperationDescriptor {
        id: OperationId::HighRiskOrders,
        name: "high-risk-orders",
        title: "High risk orders",
        tier: Tier::Predictive,
        param: ParamSchema::None,
        shape: ResultShape::Bundle(&HighRiskOrders::LABELS),
    },
    table(
        OperationId::ProductsToDiscount,
        "products-to-discount",
        "Products to discount",
        Tier::Prescriptive,
    ),
    table(
        OperationId::ProductsToPromote,
        "products-to-promote",
        "Products to Promote",
        Tier::Prescriptive,
    ),
    table(OperationId::LoyalCustomers, "loyal-customers", "Customer Loyalty", Tier::Prescriptive),
    table(
        OperationId::ChurningCustomers,
        "churning-customers",
        "Customer Churning",
        Tier::Prescriptive,
    ),
    table(
        OperationId::LogisticsImprovementByCity,
        "logistics-improvement-by-city",
        "Cities Needing Logistic Improving",
        Tier::Prescriptive,
    ),
    table(
        OperationId::ShippingModeOptimization,
        "shipping-mode-optimization",
        "Ship Modes To Improve",
        Tier::Prescriptive,
    ),
];

impl OperationId {
    #[must_use]
    pub fn descriptor(self) -> &'static OperationDescriptor {
        // CATALOG is declared in variant order.
        &CATALOG[self as usize]
    }

    #[must_use]
    pub fn name(self) -> &'static str {
        self.descriptor().name
    }

    /// Accepts the kebab-case name or its snake_case spelling.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        let wanted = name.trim().replace('_', "-").to_ascii_lowercase();
        CATALOG.iter().find(|d| d.name == wanted).map(|d| d.id)
    }
}

/// Descriptors of one tier, in catalog order.
pub fn tier_operations(tier: Tier) -> impl Iterator<Item = &'static OperationDescriptor> {
    CATALOG.iter().filter(move |d| d.tier == tier)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OperationRequest {
    pub id: OperationId,
    pub limit: Option<i64>,
}

impl OperationRequest {
    #[must_use]
    pub fn new(id: OperationId) -> Self {
        Self { id, limit: None }
    }

    #[must_use]
    pub fn with_limit(id: OperationId, limit: i64) -> Self {
        Self {
            id,
            limit: Some(limit),
        }
    }
}
