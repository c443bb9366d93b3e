// SPDX-License-Identifier: Apache-2.0

use salescope_model::Table;

use crate::ReportError;

const MAX_SHEET_CHARS: usize = 31;
const BUNDLE_TITLE_CHARS: usize = 15;
const BUNDLE_LABEL_CHARS: usize = 10;

fn truncate_chars(s: &str, n: usize) -> &str {
    s.char_indices().nth(n).map_or(s, |(idx, _)| &s[..idx])
}

/// Spreadsheet-style sheet name: the title cut to 31 characters, or
/// `{title[..15]}_{label[..10]}` for a bundle section.
#[must_use]
pub fn sheet_name(title: &str, label: Option<&str>) -> String {
    match label {
        None => truncate_chars(title, MAX_SHEET_CHARS).to_string(),
        Some(label) => format!(
            "{}_{}",
            truncate_chars(title, BUNDLE_TITLE_CHARS),
            truncate_chars(label, BUNDLE_LABEL_CHARS)
        ),
    }
}

/// File name for a sheet. Characters outside `[A-Za-z0-9 _-]` become `_`.
#[must_use]
pub fn sheet_file_name(sheet: &str) -> String {
    let stem: String = sheet
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, ' ' | '_' | '-') {
                c
            } else {
                '_'
            }
        })
        .collect();
    format!("{stem}.csv")
}

/// Header row of column names, then one record per row. Nulls are empty.
pub fn table_to_csv(table: &Table) -> Result<Vec<u8>, ReportError> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer
        .write_record(table.column_names())
        .map_err(|e| ReportError::Write(e.to_string()))?;
    for row in table.rows() {
        writer
            .write_record(row.iter().map(ToString::to_string))
            .map_err(|e| ReportError::Write(e.to_string()))?;
    }
    writer
        .into_inner()
        .map_err(|e| ReportError::Write(e.to_string()))
}
