// SPDX-License-Identifier: Apache-2.0

#![forbid(unsafe_code)]
//! Loads order line items from CSV into the `cleaned_sales_data` fact table.

mod columns;
mod decode;
mod job;
mod logging;
mod profile;
mod schema;

use std::fmt::{Display, Formatter};
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

pub use columns::{clean_column_name, HeaderMap};
pub use decode::{decode_record, parse_order_date, DATE_FORMATS};
pub use job::{ingest_csv, ingest_folder, list_csv_files};
pub use logging::{IngestEvent, IngestLog, IngestStage};
pub use profile::{inspect_csv, ColumnProfile, CsvProfile, InferredType};
pub use schema::{create_schema, insert_records, write_store, SCHEMA_VERSION};

pub const CRATE_NAME: &str = "salescope-ingest";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IngestError(pub String);

impl Display for IngestError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::error::Error for IngestError {}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StrictnessMode {
    /// First undecodable row aborts the load.
    #[default]
    Strict,
    /// Undecodable rows are skipped and recorded as anomalies.
    Lenient,
}

impl StrictnessMode {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Strict => "strict",
            Self::Lenient => "lenient",
        }
    }
}

#[derive(Debug, Clone)]
pub struct IngestOptions {
    /// A CSV file for [`ingest_csv`], a directory for [`ingest_folder`].
    pub input: PathBuf,
    pub db_path: PathBuf,
    pub strictness: StrictnessMode,
}

impl IngestOptions {
    #[must_use]
    pub fn new(input: impl Into<PathBuf>, db_path: impl Into<PathBuf>) -> Self {
        Self {
            input: input.into(),
            db_path: db_path.into(),
            strictness: StrictnessMode::Strict,
        }
    }

    #[must_use]
    pub fn with_strictness(mut self, strictness: StrictnessMode) -> Self {
        self.strictness = strictness;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RowAnomaly {
    pub file: String,
    pub line: u64,
    pub reason: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct IngestResult {
    pub db_path: PathBuf,
    pub files: Vec<PathBuf>,
    pub rows_loaded: usize,
    pub rows_skipped: usize,
    pub anomalies: Vec<RowAnomaly>,
    pub events: Vec<IngestEvent>,
}
