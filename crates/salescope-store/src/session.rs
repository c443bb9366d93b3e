// SPDX-License-Identifier: Apache-2.0

use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use rusqlite::{Connection, OpenFlags, OptionalExtension};
use salescope_model::{FACT_SCHEMA, FACT_TABLE};
use tracing::{debug, info};

use crate::error::StoreError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    pub path: PathBuf,
    pub busy_timeout: Duration,
    pub query_timeout: Duration,
}

impl StoreConfig {
    pub const DEFAULT_BUSY_TIMEOUT: Duration = Duration::from_millis(5_000);
    pub const DEFAULT_QUERY_TIMEOUT: Duration = Duration::from_millis(30_000);

    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            busy_timeout: Self::DEFAULT_BUSY_TIMEOUT,
            query_timeout: Self::DEFAULT_QUERY_TIMEOUT,
        }
    }

    /// Resolves the path from `SALESCOPE_DB` or the default location.
    #[must_use]
    pub fn from_env(explicit: Option<&Path>) -> Self {
        Self::new(salescope_core::resolve_db_path(explicit))
    }

    #[must_use]
    pub fn with_timeouts(mut self, busy_timeout: Duration, query_timeout: Duration) -> Self {
        self.busy_timeout = busy_timeout;
        self.query_timeout = query_timeout;
        self
    }
}

/// Handle to an initialised fact store. Holds no open connection.
#[derive(Debug, Clone)]
pub struct SalesStore {
    config: StoreConfig,
}

impl SalesStore {
    pub fn open(config: StoreConfig) -> Result<Self, StoreError> {
        if !config.path.is_file() {
            return Err(StoreError::NotInitialized(format!(
                "database not found at {}",
                config.path.display()
            )));
        }
        let store = Self { config };
        store.with_session(|session| verify_fact_schema(session.connection()))?;
        info!(path = %store.config.path.display(), "store opened");
        Ok(store)
    }

    #[must_use]
    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.config.path
    }

    pub fn session(&self) -> Result<StoreSession, StoreError> {
        let conn = Connection::open_with_flags(
            &self.config.path,
            OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )
        .map_err(|e| StoreError::Open(e.to_string()))?;
        conn.busy_timeout(self.config.busy_timeout)
            .map_err(|e| StoreError::Open(e.to_string()))?;
        conn.execute_batch("PRAGMA query_only=ON; PRAGMA temp_store=MEMORY;")
            .map_err(|e| StoreError::Open(e.to_string()))?;
        debug!(path = %self.config.path.display(), "store session opened");
        Ok(StoreSession {
            conn,
            query_timeout: self.config.query_timeout,
            opened_at: Instant::now(),
        })
    }

    /// Runs `f` against a fresh session. The session is closed on every exit
    /// path, including when `f` fails.
    pub fn with_session<T, E, F>(&self, f: F) -> Result<T, E>
    where
        E: From<StoreError>,
        F: FnOnce(&StoreSession) -> Result<T, E>,
    {
        let session = self.session()?;
        f(&session)
    }

    pub fn tables(&self) -> Result<Vec<String>, StoreError> {
        self.with_session(|s| {
            let mut stmt = s
                .connection()
                .prepare("SELECT name FROM sqlite_master WHERE type = 'table' ORDER BY name")
                .map_err(|e| StoreError::Sql(e.to_string()))?;
            let rows = stmt
                .query_map([], |row| row.get::<_, String>(0))
                .map_err(|e| StoreError::Sql(e.to_string()))?;
            rows.collect::<Result<Vec<_>, _>>()
                .map_err(|e| StoreError::Sql(e.to_string()))
        })
    }

    pub fn row_count(&self) -> Result<u64, StoreError> {
        self.with_session(|s| {
            let n: i64 = s
                .connection()
                .query_row(&format!("SELECT COUNT(*) FROM {FACT_TABLE}"), [], |r| r.get(0))
                .map_err(|e| StoreError::Sql(e.to_string()))?;
            Ok(u64::try_from(n).unwrap_or(0))
        })
    }

    pub fn schema_version(&self) -> Result<i64, StoreError> {
        self.with_session(|s| {
            s.connection()
                .query_row("PRAGMA user_version", [], |r| r.get(0))
                .map_err(|e| StoreError::Sql(e.to_string()))
        })
    }
}

/// One read-only connection, closed when dropped.
pub struct StoreSession {
    conn: Connection,
    query_timeout: Duration,
    opened_at: Instant,
}

impl StoreSession {
    #[must_use]
    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    #[must_use]
    pub fn query_timeout(&self) -> Duration {
        self.query_timeout
    }
}

impl Drop for StoreSession {
    fn drop(&mut self) {
        debug!(
            elapsed_ms = self.opened_at.elapsed().as_millis() as u64,
            "store session closed"
        );
    }
}

fn verify_fact_schema(conn: &Connection) -> Result<(), StoreError> {
    let present: Option<String> = conn
        .query_row(
            "SELECT name FROM sqlite_master WHERE type = 'table' AND name = ?1",
            [FACT_TABLE],
            |r| r.get(0),
        )
        .optional()
        .map_err(|e| StoreError::Open(e.to_string()))?;
    if present.is_none() {
        return Err(StoreError::NotInitialized(format!(
            "fact table {FACT_TABLE} is missing"
        )));
    }

    let mut stmt = conn
        .prepare(&format!("PRAGMA table_info({FACT_TABLE})"))
        .map_err(|e| StoreError::Open(e.to_string()))?;
    let columns = stmt
        .query_map([], |row| row.get::<_, String>(1))
        .map_err(|e| StoreError::Open(e.to_string()))?
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| StoreError::Open(e.to_string()))?;
    for (name, _) in FACT_SCHEMA {
        if !columns.iter().any(|c| c == name) {
            return Err(StoreError::NotInitialized(format!(
                "fact table {FACT_TABLE} is missing column {name}"
            )));
        }
    }

    let populated: Option<i64> = conn
        .query_row(&format!("SELECT 1 FROM {FACT_TABLE} LIMIT 1"), [], |r| r.get(0))
        .optional()
        .map_err(|e| StoreError::Open(e.to_string()))?;
    if populated.is_none() {
        return Err(StoreError::NotInitialized(format!(
            "fact table {FACT_TABLE} is empty"
        )));
    }
    Ok(())
}
