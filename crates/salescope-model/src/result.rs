// SPDX-License-Identifier: Apache-2.0

use serde::{Deserialize, Serialize};

use crate::table::Table;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tier {
    Descriptive,
    Predictive,
    Prescriptive,
}

impl Tier {
    pub const ALL: [Tier; 3] = [Self::Descriptive, Self::Predictive, Self::Prescriptive];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Descriptive => "descriptive",
            Self::Predictive => "predictive",
            Self::Prescriptive => "prescriptive",
        }
    }

    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::Descriptive => "Descriptive",
            Self::Predictive => "Predictive",
            Self::Prescriptive => "Prescriptive",
        }
    }
}

/// Per-customer recency, frequency and monetary signals, kept as three
/// independent tables.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RfmSignals {
    #[serde(rename = "Recency")]
    pub recency: Table,
    #[serde(rename = "Frequency")]
    pub frequency: Table,
    #[serde(rename = "Monetary")]
    pub monetary: Table,
}

impl RfmSignals {
    pub const LABELS: [&'static str; 3] = ["Recency", "Frequency", "Monetary"];

    #[must_use]
    pub fn sections(&self) -> [(&'static str, &Table); 3] {
        [
            (Self::LABELS[0], &self.recency),
            (Self::LABELS[1], &self.frequency),
            (Self::LABELS[2], &self.monetary),
        ]
    }
}

/// Literal risky line items: negative profit, and aging above the threshold.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct HighRiskOrders {
    #[serde(rename = "L_Profit")]
    pub low_profit: Table,
    #[serde(rename = "H_Aging")]
    pub high_aging: Table,
}

impl HighRiskOrders {
    pub const LABELS: [&'static str; 2] = ["L_Profit", "H_Aging"];

    #[must_use]
    pub fn sections(&self) -> [(&'static str, &Table); 2] {
        [
            (Self::LABELS[0], &self.low_profit),
            (Self::LABELS[1], &self.high_aging),
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum QueryResult {
    Table(Table),
    Rfm(RfmSignals),
    HighRisk(HighRiskOrders),
}

impl QueryResult {
    #[must_use]
    pub fn as_table(&self) -> Option<&Table> {
        match self {
            Self::Table(t) => Some(t),
            Self::Rfm(_) | Self::HighRisk(_) => None,
        }
    }

    /// Labelled tables in a fixed order. A plain table is labelled `title`.
    #[must_use]
    pub fn sections<'a>(&'a self, title: &'a str) -> Vec<(&'a str, &'a Table)> {
        match self {
            Self::Table(t) => vec![(title, t)],
            Self::Rfm(b) => b.sections().to_vec(),
            Self::HighRisk(b) => b.sections().to_vec(),
        }
    }

    #[must_use]
    pub fn row_count(&self) -> usize {
        self.sections("").iter().map(|(_, t)| t.len()).sum()
    }
}
