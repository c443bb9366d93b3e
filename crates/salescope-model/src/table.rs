// SPDX-License-Identifier: Apache-2.0

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum TableError {
    ArityMismatch { expected: usize, actual: usize },
    UnknownColumn(String),
    NotNumeric(String),
    InvalidWindow(usize),
}

impl Display for TableError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ArityMismatch { expected, actual } => {
                write!(f, "row has {actual} cells, table has {expected} columns")
            }
            Self::UnknownColumn(name) => write!(f, "unknown column `{name}`"),
            Self::NotNumeric(name) => write!(f, "column `{name}` is not numeric"),
            Self::InvalidWindow(w) => write!(f, "window must be >= 1, got {w}"),
        }
    }
}

impl std::error::Error for TableError {}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColumnType {
    Text,
    Integer,
    Real,
    /// ISO `YYYY-MM-DD` text, or a `YYYY`/`YYYY-MM` bucket derived from one.
    Date,
}

impl ColumnType {
    #[must_use]
    pub const fn is_numeric(self) -> bool {
        matches!(self, Self::Integer | Self::Real)
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Integer => "integer",
            Self::Real => "real",
            Self::Date => "date",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Column {
    pub name: String,
    pub kind: ColumnType,
}

impl Column {
    #[must_use]
    pub fn new(name: impl Into<String>, kind: ColumnType) -> Self {
        Self {
            name: name.into(),
            kind,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Cell {
    Null,
    Integer(i64),
    Real(f64),
    Text(String),
}

impl Cell {
    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Integer(v) => Some(*v as f64),
            Self::Real(v) => Some(*v),
            Self::Null | Self::Text(_) => None,
        }
    }

    #[must_use]
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Integer(v) => Some(*v),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Text(v) => Some(v),
            _ => None,
        }
    }

    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }
}

impl Display for Cell {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Null => Ok(()),
            Self::Integer(v) => write!(f, "{v}"),
            Self::Real(v) => write!(f, "{v}"),
            Self::Text(v) => f.write_str(v),
        }
    }
}

/// An ordered result table. Rows always have exactly one cell per column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Table {
    columns: Vec<Column>,
    rows: Vec<Vec<Cell>>,
}

impl Table {
    #[must_use]
    pub fn new(columns: Vec<Column>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
        }
    }

    pub fn push_row(&mut self, row: Vec<Cell>) -> Result<(), TableError> {
        if row.len() != self.columns.len() {
            return Err(TableError::ArityMismatch {
                expected: self.columns.len(),
                actual: row.len(),
            });
        }
        self.rows.push(row);
        Ok(())
    }

    #[must_use]
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    #[must_use]
    pub fn rows(&self) -> &[Vec<Cell>] {
        &self.rows
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    #[must_use]
    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }

    #[must_use]
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c.name == name)
    }

    #[must_use]
    pub fn cell(&self, row: usize, column: &str) -> Option<&Cell> {
        let idx = self.column_index(column)?;
        self.rows.get(row).and_then(|r| r.get(idx))
    }

    pub fn column_values(&self, column: &str) -> Result<Vec<&Cell>, TableError> {
        let idx = self
            .column_index(column)
            .ok_or_else(|| TableError::UnknownColumn(column.to_string()))?;
        Ok(self.rows.iter().map(|r| &r[idx]).collect())
    }

    /// Numeric view of a column; nulls stay `None`.
    pub fn numeric_column(&self, column: &str) -> Result<Vec<Option<f64>>, TableError> {
        let idx = self
            .column_index(column)
            .ok_or_else(|| TableError::UnknownColumn(column.to_string()))?;
        if !self.columns[idx].kind.is_numeric() {
            return Err(TableError::NotNumeric(column.to_string()));
        }
        Ok(self.rows.iter().map(|r| r[idx].as_f64()).collect())
    }

    /// Appends a column. `values` must have one entry per existing row.
    pub fn with_column(mut self, column: Column, values: Vec<Cell>) -> Result<Self, TableError> {
        if values.len() != self.rows.len() {
            return Err(TableError::ArityMismatch {
                expected: self.rows.len(),
                actual: values.len(),
            });
        }
        self.columns.push(column);
        for (row, value) in self.rows.iter_mut().zip(values) {
            row.push(value);
        }
        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_columns() -> Table {
        Table::new(vec![
            Column::new("product", ColumnType::Text),
            Column::new("sales", ColumnType::Real),
        ])
    }

    #[test]
    fn push_row_rejects_wrong_arity() {
        let mut t = two_columns();
        let err = t.push_row(vec![Cell::Null]).expect_err("arity");
        assert_eq!(
            err,
            TableError::ArityMismatch {
                expected: 2,
                actual: 1
            }
        );
        assert!(t.is_empty());
    }

    #[test]
    fn numeric_column_rejects_text() {
        let t = two_columns();
        assert_eq!(
            t.numeric_column("product"),
            Err(TableError::NotNumeric("product".to_string()))
        );
        assert_eq!(t.numeric_column("sales"), Ok(Vec::new()));
    }

    #[test]
    fn cell_display_leaves_null_blank() {
        assert_eq!(Cell::Null.to_string(), "");
        assert_eq!(Cell::Integer(7).to_string(), "7");
        assert_eq!(Cell::Text("x".into()).to_string(), "x");
    }
}
