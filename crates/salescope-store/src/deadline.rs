// SPDX-License-Identifier: Apache-2.0

use std::time::{Duration, Instant};

use rusqlite::Connection;

const PROGRESS_OPS: i32 = 1_000;

/// Installs a progress-handler deadline on a connection and removes it on drop.
/// A statement still running past the deadline fails with SQLITE_INTERRUPT.
pub struct QueryDeadline<'c> {
    conn: &'c Connection,
}

impl<'c> QueryDeadline<'c> {
    #[must_use]
    pub fn arm(conn: &'c Connection, timeout: Duration) -> Self {
        let deadline = Instant::now() + timeout;
        conn.progress_handler(PROGRESS_OPS, Some(move || Instant::now() > deadline));
        Self { conn }
    }
}

impl Drop for QueryDeadline<'_> {
    fn drop(&mut self) {
        self.conn.progress_handler(PROGRESS_OPS, None::<fn() -> bool>);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SLOW_SQL: &str = "WITH RECURSIVE n(x) AS \
        (SELECT 1 UNION ALL SELECT x + 1 FROM n WHERE x < 50000000) \
        SELECT COUNT(*) FROM n";

    #[test]
    fn expired_deadline_interrupts_statement() {
        let conn = Connection::open_in_memory().expect("mem");
        let _guard = QueryDeadline::arm(&conn, Duration::ZERO);
        let err = conn
            .query_row(SLOW_SQL, [], |r| r.get::<_, i64>(0))
            .expect_err("interrupted");
        assert!(err.to_string().to_lowercase().contains("interrupt"));
    }

    #[test]
    fn dropping_guard_clears_handler() {
        let conn = Connection::open_in_memory().expect("mem");
        drop(QueryDeadline::arm(&conn, Duration::ZERO));
        let n: i64 = conn
            .query_row("SELECT COUNT(*) FROM (SELECT 1 UNION ALL SELECT 2)", [], |r| r.get(0))
            .expect("runs without deadline");
        assert_eq!(n, 2);
    }
}
