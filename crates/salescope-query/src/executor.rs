// SPDX-License-Identifier: Apache-2.0

use std::time::{Duration, Instant};

use rusqlite::types::{Value, ValueRef};
use rusqlite::{params_from_iter, Connection};
use salescope_model::{Cell, Column, ColumnType, Table};
use salescope_store::QueryDeadline;
use tracing::debug;

use crate::query_error::{QueryError, QueryErrorCode};
use crate::sql::TableQuery;

/// Decodes a SQLite value by the column's declared type. Aggregates over an
/// empty set come back as NULL and stay `Cell::Null`.
fn decode_cell(value: ValueRef<'_>, kind: ColumnType) -> Cell {
    match (value, kind) {
        (ValueRef::Null, _) => Cell::Null,
        (ValueRef::Integer(i), ColumnType::Real) => Cell::Real(i as f64),
        (ValueRef::Integer(i), _) => Cell::Integer(i),
        (ValueRef::Real(f), ColumnType::Integer) if f.fract() == 0.0 => Cell::Integer(f as i64),
        (ValueRef::Real(f), _) => Cell::Real(f),
        (ValueRef::Text(t), _) | (ValueRef::Blob(t), _) => {
            Cell::Text(String::from_utf8_lossy(t).into_owned())
        }
    }
}

pub(crate) fn fetch_table(
    conn: &Connection,
    operation: &str,
    query: &TableQuery,
    params: &[Value],
    timeout: Option<Duration>,
) -> Result<Table, QueryError> {
    let started = Instant::now();
    debug!(operation, params = params.len(), "query start");
    let _deadline = timeout.map(|t| QueryDeadline::arm(conn, t));

    let columns: Vec<Column> = query
        .columns
        .iter()
        .map(|(name, kind)| Column::new(*name, *kind))
        .collect();
    let mut table = Table::new(columns);

    let mut stmt = conn
        .prepare_cached(query.sql)
        .map_err(|e| QueryError::from_sqlite(operation, &e))?;
    if stmt.column_count() != query.columns.len() {
        return Err(QueryError::new(
            QueryErrorCode::QueryExecution,
            format!(
                "{operation}: statement yields {} columns, {} declared",
                stmt.column_count(),
                query.columns.len()
            ),
        ));
    }
    let mut rows = stmt
        .query(params_from_iter(params.iter()))
        .map_err(|e| QueryError::from_sqlite(operation, &e))?;
    while let Some(row) = rows
        .next()
        .map_err(|e| QueryError::from_sqlite(operation, &e))?
    {
        let mut cells = Vec::with_capacity(query.columns.len());
        for (idx, (_, kind)) in query.columns.iter().enumerate() {
            let value = row
                .get_ref(idx)
                .map_err(|e| QueryError::from_sqlite(operation, &e))?;
            cells.push(decode_cell(value, *kind));
        }
        table.push_row(cells).map_err(|e| {
            QueryError::new(QueryErrorCode::QueryExecution, format!("{operation}: {e}"))
        })?;
    }

    debug!(
        operation,
        rows = table.len(),
        elapsed_us = started.elapsed().as_micros() as u64,
        "query end"
    );
    Ok(table)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn integer_aggregates_widen_into_real_columns() {
        assert_eq!(decode_cell(ValueRef::Integer(3), ColumnType::Real), Cell::Real(3.0));
        assert_eq!(decode_cell(ValueRef::Integer(3), ColumnType::Integer), Cell::Integer(3));
        assert_eq!(decode_cell(ValueRef::Null, ColumnType::Real), Cell::Null);
        assert_eq!(
            decode_cell(ValueRef::Text(b"2024-01-05"), ColumnType::Date),
            Cell::Text("2024-01-05".to_string())
        );
    }
}
