// SPDX-License-Identifier: Apache-2.0

use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

use salescope_core::{canonical, sha256_hex};
use salescope_model::{QueryResult, Tier};
use salescope_query::{
    tier_operations, OperationDescriptor, OperationRequest, ParamSchema, SalesAnalytics,
};
use tracing::{debug, info};

use crate::manifest::{ReportManifest, SheetEntry, MANIFEST_FILE, MANIFEST_SCHEMA_VERSION};
use crate::sheet::{sheet_file_name, sheet_name, table_to_csv};
use crate::ReportError;

/// Row limit applied to ranked operations in reports.
pub const REPORT_ROW_LIMIT: i64 = 10;

#[derive(Debug, Clone)]
pub struct ReportExporter {
    out_dir: PathBuf,
    row_limit: i64,
}

struct RenderedSheet {
    entry: SheetEntry,
    bytes: Vec<u8>,
}

impl ReportExporter {
    #[must_use]
    pub fn new(out_dir: impl Into<PathBuf>) -> Self {
        Self {
            out_dir: out_dir.into(),
            row_limit: REPORT_ROW_LIMIT,
        }
    }

    #[must_use]
    pub fn with_row_limit(mut self, row_limit: i64) -> Self {
        self.row_limit = row_limit;
        self
    }

    #[must_use]
    pub fn report_dir(&self, tier: Tier) -> PathBuf {
        self.out_dir.join(ReportManifest::directory_name(tier))
    }

    /// Runs every operation of `tier` and publishes the report directory.
    /// All queries run before anything is written, and the directory is
    /// swapped in whole, so a failure leaves any earlier report untouched.
    pub fn export_tier(
        &self,
        analytics: &SalesAnalytics<'_>,
        tier: Tier,
    ) -> Result<ReportManifest, ReportError> {
        let mut rendered = Vec::new();
        for desc in tier_operations(tier) {
            let result = analytics.run(&self.request_for(desc))?;
            rendered.extend(render_operation(desc, &result)?);
        }

        let mut seen = BTreeSet::new();
        for sheet in &rendered {
            if !seen.insert(sheet.entry.file.clone()) {
                return Err(ReportError::Write(format!(
                    "duplicate sheet file {}",
                    sheet.entry.file
                )));
            }
        }

        let manifest = ReportManifest {
            schema_version: MANIFEST_SCHEMA_VERSION.to_string(),
            tier,
            row_limit: self.row_limit,
            sheets: rendered.iter().map(|s| s.entry.clone()).collect(),
        };
        let final_dir = self.report_dir(tier);
        publish(&final_dir, &rendered, &manifest)?;
        info!(
            tier = tier.as_str(),
            sheets = manifest.sheets.len(),
            rows = manifest.total_rows(),
            dir = %final_dir.display(),
            "report written"
        );
        Ok(manifest)
    }

    pub fn export_all(
        &self,
        analytics: &SalesAnalytics<'_>,
    ) -> Result<Vec<ReportManifest>, ReportError> {
        Tier::ALL
            .iter()
            .map(|tier| self.export_tier(analytics, *tier))
            .collect()
    }

    fn request_for(&self, desc: &OperationDescriptor) -> OperationRequest {
        match desc.param {
            ParamSchema::None => OperationRequest::new(desc.id),
            ParamSchema::RowLimit { .. } => OperationRequest::with_limit(desc.id, self.row_limit),
        }
    }
}

fn render_operation(
    desc: &OperationDescriptor,
    result: &QueryResult,
) -> Result<Vec<RenderedSheet>, ReportError> {
    let bundled = !matches!(result, QueryResult::Table(_));
    result
        .sections(desc.title)
        .into_iter()
        .map(|(label, table)| {
            let label = bundled.then(|| label.to_string());
            let sheet = sheet_name(desc.title, label.as_deref());
            let bytes = table_to_csv(table)?;
            debug!(operation = desc.name, sheet = %sheet, rows = table.len(), "sheet rendered");
            Ok(RenderedSheet {
                entry: SheetEntry {
                    file: sheet_file_name(&sheet),
                    sheet,
                    operation: desc.name.to_string(),
                    label,
                    rows: table.len(),
                    sha256: sha256_hex(&bytes),
                },
                bytes,
            })
        })
        .collect()
}

fn publish(
    final_dir: &Path,
    sheets: &[RenderedSheet],
    manifest: &ReportManifest,
) -> Result<(), ReportError> {
    let write_err = |e: std::io::Error| ReportError::Write(e.to_string());
    let parent = final_dir
        .parent()
        .ok_or_else(|| ReportError::Write("report directory has no parent".to_string()))?;
    fs::create_dir_all(parent).map_err(write_err)?;

    let file_name = final_dir
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| ReportError::Write("report directory name is not utf-8".to_string()))?;
    let staging = parent.join(format!(".{file_name}.tmp"));
    if staging.exists() {
        fs::remove_dir_all(&staging).map_err(write_err)?;
    }
    fs::create_dir_all(&staging).map_err(write_err)?;

    for sheet in sheets {
        fs::write(staging.join(&sheet.entry.file), &sheet.bytes).map_err(write_err)?;
    }
    let manifest_json =
        canonical::stable_json_pretty(manifest).map_err(|e| ReportError::Write(e.to_string()))?;
    fs::write(staging.join(MANIFEST_FILE), manifest_json).map_err(write_err)?;

    if final_dir.exists() {
        fs::remove_dir_all(final_dir).map_err(write_err)?;
    }
    fs::rename(&staging, final_dir).map_err(write_err)
}
