// SPDX-License-Identifier: Apache-2.0

use std::collections::{BTreeSet, HashSet};
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::columns::clean_column_name;
use crate::decode::parse_order_date;
use crate::IngestError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InferredType {
    Empty,
    Integer,
    Real,
    Date,
    Text,
}

impl InferredType {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Empty => "empty",
            Self::Integer => "integer",
            Self::Real => "real",
            Self::Date => "date",
            Self::Text => "text",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ColumnProfile {
    pub raw_name: String,
    pub cleaned_name: String,
    pub nulls: usize,
    pub distinct: usize,
    pub inferred: InferredType,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CsvProfile {
    pub path: PathBuf,
    pub size_bytes: u64,
    pub rows: usize,
    pub duplicate_rows: usize,
    pub columns: Vec<ColumnProfile>,
}

impl CsvProfile {
    #[must_use]
    pub fn missing_values(&self) -> usize {
        self.columns.iter().map(|c| c.nulls).sum()
    }
}

#[derive(Default)]
struct ColumnStats {
    nulls: usize,
    values: BTreeSet<String>,
    all_int: bool,
    all_real: bool,
    all_date: bool,
}

impl ColumnStats {
    fn new() -> Self {
        Self {
            all_int: true,
            all_real: true,
            all_date: true,
            ..Self::default()
        }
    }

    fn observe(&mut self, value: &str) {
        if value.is_empty() {
            self.nulls += 1;
            return;
        }
        self.all_int &= value.parse::<i64>().is_ok();
        self.all_real &= value.parse::<f64>().is_ok_and(f64::is_finite);
        self.all_date &= parse_order_date(value).is_ok();
        self.values.insert(value.to_string());
    }

    fn inferred(&self) -> InferredType {
        if self.values.is_empty() {
            InferredType::Empty
        } else if self.all_int {
            InferredType::Integer
        } else if self.all_real {
            InferredType::Real
        } else if self.all_date {
            InferredType::Date
        } else {
            InferredType::Text
        }
    }
}

/// Structure and data-quality summary of a CSV file, without loading it.
pub fn inspect_csv(path: &Path) -> Result<CsvProfile, IngestError> {
    let bytes =
        fs::read(path).map_err(|e| IngestError(format!("read {} failed: {e}", path.display())))?;
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(bytes.as_slice());
    let headers: Vec<String> = reader
        .headers()
        .map_err(|e| IngestError(format!("failed to read header: {e}")))?
        .iter()
        .map(str::to_string)
        .collect();

    let mut stats: Vec<ColumnStats> = headers.iter().map(|_| ColumnStats::new()).collect();
    let mut seen: HashSet<Vec<String>> = HashSet::new();
    let mut rows = 0usize;
    let mut duplicate_rows = 0usize;
    for result in reader.records() {
        let record = result.map_err(|e| IngestError(e.to_string()))?;
        rows += 1;
        let fields: Vec<String> = (0..headers.len())
            .map(|i| record.get(i).unwrap_or("").to_string())
            .collect();
        for (stat, value) in stats.iter_mut().zip(&fields) {
            stat.observe(value);
        }
        if !seen.insert(fields) {
            duplicate_rows += 1;
        }
    }

    let columns = headers
        .iter()
        .zip(&stats)
        .map(|(raw, stat)| ColumnProfile {
            raw_name: raw.clone(),
            cleaned_name: clean_column_name(raw),
            nulls: stat.nulls,
            distinct: stat.values.len(),
            inferred: stat.inferred(),
        })
        .collect();

    Ok(CsvProfile {
        path: path.to_path_buf(),
        size_bytes: bytes.len() as u64,
        rows,
        duplicate_rows,
        columns,
    })
}
