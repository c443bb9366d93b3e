// SPDX-License-Identifier: Apache-2.0

#![forbid(unsafe_code)]
//! Writes one report directory per tier: a CSV file per sheet plus a
//! `manifest.json` with row counts and checksums.

mod export;
mod manifest;
mod sheet;

use std::fmt::{Display, Formatter};

use salescope_query::QueryError;
use salescope_store::StoreError;

pub use export::{ReportExporter, REPORT_ROW_LIMIT};
pub use manifest::{ReportManifest, SheetEntry, MANIFEST_FILE, MANIFEST_SCHEMA_VERSION};
pub use sheet::{sheet_file_name, sheet_name, table_to_csv};

pub const CRATE_NAME: &str = "salescope-report";

#[derive(Debug)]
#[non_exhaustive]
pub enum ReportError {
    /// A catalog operation failed; nothing was written.
    Query(QueryError),
    Write(String),
}

impl Display for ReportError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Query(e) => write!(f, "report query failed: {e}"),
            Self::Write(msg) => write!(f, "report write failed: {msg}"),
        }
    }
}

impl std::error::Error for ReportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Query(e) => Some(e),
            Self::Write(_) => None,
        }
    }
}

impl From<QueryError> for ReportError {
    fn from(value: QueryError) -> Self {
        Self::Query(value)
    }
}

impl From<StoreError> for ReportError {
    fn from(value: StoreError) -> Self {
        Self::Query(QueryError::from(value))
    }
}
