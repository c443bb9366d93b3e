// SPDX-License-Identifier: Apache-2.0

use salescope_model::Tier;
use serde::{Deserialize, Serialize};

pub const MANIFEST_FILE: &str = "manifest.json";
pub const MANIFEST_SCHEMA_VERSION: &str = "1";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SheetEntry {
    pub sheet: String,
    pub operation: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    pub file: String,
    pub rows: usize,
    pub sha256: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ReportManifest {
    pub schema_version: String,
    pub tier: Tier,
    pub row_limit: i64,
    pub sheets: Vec<SheetEntry>,
}

impl ReportManifest {
    #[must_use]
    pub fn directory_name(tier: Tier) -> String {
        format!("{}_Analysis_report", tier.title())
    }

    #[must_use]
    pub fn total_rows(&self) -> usize {
        self.sheets.iter().map(|s| s.rows).sum()
    }
}
