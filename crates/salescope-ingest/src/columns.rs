// SPDX-License-Identifier: Apache-2.0

use salescope_model::FACT_SCHEMA;

use crate::IngestError;

/// Trim, turn spaces into `_`, drop anything outside `[A-Za-z0-9_]`, lowercase.
#[must_use]
pub fn clean_column_name(raw: &str) -> String {
    raw.trim()
        .replace(' ', "_")
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '_')
        .collect::<String>()
        .to_ascii_lowercase()
}

/// Position of every fact column within a CSV header row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderMap {
    positions: [usize; FACT_SCHEMA.len()],
    width: usize,
}

impl HeaderMap {
    pub fn resolve<'a>(headers: impl IntoIterator<Item = &'a str>) -> Result<Self, IngestError> {
        let cleaned: Vec<String> = headers.into_iter().map(clean_column_name).collect();
        let mut positions = [0usize; FACT_SCHEMA.len()];
        let mut missing = Vec::new();
        for (slot, (name, _)) in positions.iter_mut().zip(FACT_SCHEMA.iter()) {
            match cleaned.iter().position(|c| c == name) {
                Some(idx) => *slot = idx,
                None => missing.push(*name),
            }
        }
        if !missing.is_empty() {
            return Err(IngestError(format!(
                "csv header is missing required columns: {}",
                missing.join(", ")
            )));
        }
        Ok(Self {
            positions,
            width: cleaned.len(),
        })
    }

    /// Header position of the fact column at `schema_index`.
    #[must_use]
    pub fn position(&self, schema_index: usize) -> usize {
        self.positions[schema_index]
    }

    #[must_use]
    pub fn width(&self) -> usize {
        self.width
    }
}
