// SPDX-License-Identifier: Apache-2.0

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use rusqlite::Connection;
use salescope_core::sha256_hex;
use salescope_model::SalesRecord;
use tracing::{info, warn};

use crate::columns::HeaderMap;
use crate::decode::decode_record;
use crate::logging::{IngestLog, IngestStage};
use crate::schema::{create_schema, insert_records};
use crate::{IngestError, IngestOptions, IngestResult, RowAnomaly, StrictnessMode};

struct Decoded {
    records: Vec<SalesRecord>,
    anomalies: Vec<RowAnomaly>,
}

/// Replaces the fact table with the rows of one CSV file.
pub fn ingest_csv(opts: &IngestOptions) -> Result<IngestResult, IngestError> {
    if !opts.input.is_file() {
        return Err(IngestError(format!(
            "csv file not found: {}",
            opts.input.display()
        )));
    }
    load(opts, vec![opts.input.clone()])
}

/// Replaces the fact table with the rows of every `*.csv` in a folder, in
/// file-name order.
pub fn ingest_folder(opts: &IngestOptions) -> Result<IngestResult, IngestError> {
    let files = list_csv_files(&opts.input)?;
    if files.is_empty() {
        return Err(IngestError(format!(
            "no CSV files found in: {}",
            opts.input.display()
        )));
    }
    load(opts, files)
}

pub fn list_csv_files(dir: &Path) -> Result<Vec<PathBuf>, IngestError> {
    let entries = fs::read_dir(dir)
        .map_err(|e| IngestError(format!("read folder {} failed: {e}", dir.display())))?;
    let mut files = Vec::new();
    for entry in entries {
        let path = entry.map_err(|e| IngestError(e.to_string()))?.path();
        let is_csv = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case("csv"));
        if is_csv && path.is_file() {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

fn load(opts: &IngestOptions, files: Vec<PathBuf>) -> Result<IngestResult, IngestError> {
    let started = Instant::now();
    let mut log = IngestLog::default();
    log.emit_with(
        IngestStage::Prepare,
        "ingest.start",
        [
            ("db_path", opts.db_path.display().to_string()),
            ("files", files.len().to_string()),
            ("strictness", opts.strictness.as_str().to_string()),
        ],
    );
    info!(db = %opts.db_path.display(), files = files.len(), "ingest start");

    let mut records = Vec::new();
    let mut anomalies = Vec::new();
    for file in &files {
        let bytes = fs::read(file)
            .map_err(|e| IngestError(format!("read {} failed: {e}", file.display())))?;
        let decoded = decode_file(file, &bytes, opts.strictness)?;
        log.emit_with(
            IngestStage::Decode,
            "ingest.decode.file",
            [
                ("file", file.display().to_string()),
                ("sha256", sha256_hex(&bytes)),
                ("rows", decoded.records.len().to_string()),
                ("skipped", decoded.anomalies.len().to_string()),
            ],
        );
        info!(
            file = %file.display(),
            rows = decoded.records.len(),
            skipped = decoded.anomalies.len(),
            "csv decoded"
        );
        records.extend(decoded.records);
        anomalies.extend(decoded.anomalies);
    }

    if let Some(parent) = opts.db_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| IngestError(e.to_string()))?;
    }
    let mut conn = Connection::open(&opts.db_path).map_err(|e| IngestError(e.to_string()))?;
    let tx = conn.transaction().map_err(|e| IngestError(e.to_string()))?;
    log.emit(IngestStage::Persist, "ingest.persist.begin", Default::default());
    create_schema(&tx)?;
    let rows_loaded = insert_records(&tx, &records)?;
    tx.commit().map_err(|e| IngestError(e.to_string()))?;
    log.emit_with(
        IngestStage::Finalize,
        "ingest.persist.complete",
        [
            ("rows_loaded", rows_loaded.to_string()),
            ("rows_skipped", anomalies.len().to_string()),
            ("elapsed_ms", started.elapsed().as_millis().to_string()),
        ],
    );
    info!(rows = rows_loaded, skipped = anomalies.len(), "ingest complete");

    Ok(IngestResult {
        db_path: opts.db_path.clone(),
        files,
        rows_loaded,
        rows_skipped: anomalies.len(),
        anomalies,
        events: log.into_events(),
    })
}

fn decode_file(
    file: &Path,
    bytes: &[u8],
    strictness: StrictnessMode,
) -> Result<Decoded, IngestError> {
    let file_label = file.display().to_string();
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(bytes);
    let headers = reader
        .headers()
        .map_err(|e| IngestError(format!("{file_label}: failed to read header: {e}")))?
        .clone();
    let map = HeaderMap::resolve(headers.iter())
        .map_err(|e| IngestError(format!("{file_label}: {}", e.0)))?;

    let mut out = Decoded {
        records: Vec::new(),
        anomalies: Vec::new(),
    };
    for (idx, result) in reader.records().enumerate() {
        // Header is line 1.
        let fallback_line = idx as u64 + 2;
        let outcome = match result {
            Ok(record) => {
                let line = record.position().map_or(fallback_line, |p| p.line());
                decode_record(&record, &map).map_err(|reason| (line, reason))
            }
            Err(e) => Err((fallback_line, e.to_string())),
        };
        let (line, reason) = match outcome {
            Ok(record) => {
                out.records.push(record);
                continue;
            }
            Err(failure) => failure,
        };
        match strictness {
            StrictnessMode::Strict => {
                return Err(IngestError(format!("{file_label}: line {line}: {reason}")));
            }
            StrictnessMode::Lenient => {
                warn!(file = %file_label, line, reason = %reason, "skipping csv row");
                out.anomalies.push(RowAnomaly {
                    file: file_label.clone(),
                    line,
                    reason,
                });
            }
        }
    }
    Ok(out)
}
