// SPDX-License-Identifier: Apache-2.0

use crate::table::{Cell, Column, ColumnType, Table, TableError};

/// Trailing mean over `window` points. A position is `None` until the window is
/// full or while any value inside it is missing.
#[must_use]
pub fn trailing_moving_average(values: &[Option<f64>], window: usize) -> Vec<Option<f64>> {
    if window == 0 {
        return vec![None; values.len()];
    }
    (0..values.len())
        .map(|i| {
            if i + 1 < window {
                return None;
            }
            let slice = &values[i + 1 - window..=i];
            let sum = slice.iter().copied().sum::<Option<f64>>()?;
            Some(sum / window as f64)
        })
        .collect()
}

/// Appends `<value_column>_ma<window>` to a time-series table.
pub fn with_moving_average(
    table: Table,
    value_column: &str,
    window: usize,
) -> Result<Table, TableError> {
    if window == 0 {
        return Err(TableError::InvalidWindow(window));
    }
    let values = table.numeric_column(value_column)?;
    let averaged = trailing_moving_average(&values, window)
        .into_iter()
        .map(|v| v.map_or(Cell::Null, Cell::Real))
        .collect();
    table.with_column(
        Column::new(format!("{value_column}_ma{window}"), ColumnType::Real),
        averaged,
    )
}
