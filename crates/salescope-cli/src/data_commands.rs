// SPDX-License-Identifier: Apache-2.0

use std::path::{Path, PathBuf};

use salescope_ingest::{ingest_csv, ingest_folder, inspect_csv, IngestOptions, StrictnessMode};
use salescope_model::{Cell, Column, ColumnType, Table};
use serde_json::json;

use crate::helpers::{db_path, emit_ok, load_policy, open_store};
use crate::render::render_grid;
use crate::{CliError, GlobalOptions, OutputMode};

pub(crate) fn ingest(
    globals: &GlobalOptions,
    csv: Option<PathBuf>,
    folder: Option<PathBuf>,
    strictness: StrictnessMode,
    output_mode: OutputMode,
) -> Result<(), CliError> {
    let db = db_path(globals);
    let result = match (csv, folder) {
        (Some(file), None) => {
            ingest_csv(&IngestOptions::new(file, db).with_strictness(strictness))?
        }
        (None, Some(dir)) => {
            ingest_folder(&IngestOptions::new(dir, db).with_strictness(strictness))?
        }
        _ => return Err(CliError::usage("pass exactly one of --csv or --folder")),
    };
    emit_ok(
        output_mode,
        &json!({
            "command": "ingest",
            "status": "ok",
            "db": result.db_path,
            "files": result.files,
            "strictness": strictness.as_str(),
            "rows_loaded": result.rows_loaded,
            "rows_skipped": result.rows_skipped,
            "anomalies": result.anomalies,
        }),
    )
}

pub(crate) fn inspect_csv_file(path: &Path, output_mode: OutputMode) -> Result<(), CliError> {
    let profile = inspect_csv(path)?;
    if output_mode.json {
        return emit_ok(output_mode, &profile);
    }

    let mut table = Table::new(vec![
        Column::new("column", ColumnType::Text),
        Column::new("cleaned", ColumnType::Text),
        Column::new("type", ColumnType::Text),
        Column::new("nulls", ColumnType::Integer),
        Column::new("distinct", ColumnType::Integer),
    ]);
    for col in &profile.columns {
        table
            .push_row(vec![
                Cell::Text(col.raw_name.clone()),
                Cell::Text(col.cleaned_name.clone()),
                Cell::Text(col.inferred.as_str().to_string()),
                Cell::Integer(i64::try_from(col.nulls).unwrap_or(i64::MAX)),
                Cell::Integer(i64::try_from(col.distinct).unwrap_or(i64::MAX)),
            ])
            .map_err(|e| CliError::internal(e.to_string()))?;
    }
    println!("file: {}", profile.path.display());
    println!("size_bytes: {}", profile.size_bytes);
    println!("rows: {}", profile.rows);
    println!("duplicate_rows: {}", profile.duplicate_rows);
    println!("missing_values: {}", profile.missing_values());
    print!("{}", render_grid(&table));
    Ok(())
}

pub(crate) fn inspect_db(
    globals: &GlobalOptions,
    output_mode: OutputMode,
) -> Result<(), CliError> {
    let policy = load_policy(globals)?;
    let store = open_store(globals, &policy)?;
    emit_ok(
        output_mode,
        &json!({
            "command": "inspect-db",
            "db": store.path(),
            "schema_version": store.schema_version()?,
            "tables": store.tables()?,
            "rows": store.row_count()?,
        }),
    )
}
