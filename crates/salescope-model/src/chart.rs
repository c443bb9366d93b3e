// SPDX-License-Identifier: Apache-2.0

use serde::{Deserialize, Serialize};

use crate::table::Table;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CategoryAxis {
    Column(String),
    RowIndex,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartPoint {
    pub label: String,
    pub value: f64,
}

/// Axis choice for auto-charting a result table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ChartSpec {
    pub value_column: String,
    pub category: CategoryAxis,
}

impl ChartSpec {
    /// First numeric column is the value axis; first non-numeric column is the
    /// category axis, falling back to the row index. `None` when nothing is
    /// numeric.
    #[must_use]
    pub fn infer(table: &Table) -> Option<Self> {
        let value = table.columns().iter().find(|c| c.kind.is_numeric())?;
        let category = table
            .columns()
            .iter()
            .find(|c| !c.kind.is_numeric())
            .map_or(CategoryAxis::RowIndex, |c| CategoryAxis::Column(c.name.clone()));
        Some(Self {
            value_column: value.name.clone(),
            category,
        })
    }

    /// Rows with a null value are skipped.
    #[must_use]
    pub fn points(&self, table: &Table) -> Vec<ChartPoint> {
        let Some(value_idx) = table.column_index(&self.value_column) else {
            return Vec::new();
        };
        let category_idx = match &self.category {
            CategoryAxis::Column(name) => table.column_index(name),
            CategoryAxis::RowIndex => None,
        };
        table
            .rows()
            .iter()
            .enumerate()
            .filter_map(|(i, row)| {
                let value = row[value_idx].as_f64()?;
                let label = category_idx.map_or_else(|| i.to_string(), |c| row[c].to_string());
                Some(ChartPoint { label, value })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::{Cell, Column, ColumnType};

    #[test]
    fn picks_first_numeric_and_first_text() {
        let mut t = Table::new(vec![
            Column::new("total", ColumnType::Integer),
            Column::new("region", ColumnType::Text),
            Column::new("sales", ColumnType::Real),
        ]);
        t.push_row(vec![Cell::Integer(3), Cell::Text("West".into()), Cell::Real(1.5)])
            .expect("row");
        let spec = ChartSpec::infer(&t).expect("chartable");
        assert_eq!(spec.value_column, "total");
        assert_eq!(spec.category, CategoryAxis::Column("region".into()));
        assert_eq!(
            spec.points(&t),
            vec![ChartPoint {
                label: "West".into(),
                value: 3.0
            }]
        );
    }

    #[test]
    fn falls_back_to_row_index() {
        let mut t = Table::new(vec![
            Column::new("total_sales", ColumnType::Real),
            Column::new("total_profit", ColumnType::Real),
        ]);
        t.push_row(vec![Cell::Real(10.0), Cell::Real(1.0)]).expect("row");
        t.push_row(vec![Cell::Null, Cell::Real(1.0)]).expect("row");
        let spec = ChartSpec::infer(&t).expect("chartable");
        assert_eq!(spec.category, CategoryAxis::RowIndex);
        let points = spec.points(&t);
        assert_eq!(points.len(), 1);
        assert_eq!(points[0].label, "0");
    }

    #[test]
    fn date_only_table_is_not_chartable() {
        let t = Table::new(vec![Column::new("last_order", ColumnType::Date)]);
        assert!(ChartSpec::infer(&t).is_none());
    }
}
