// SPDX-License-Identifier: Apache-2.0

use rusqlite::ErrorCode;
use salescope_store::StoreError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum QueryErrorCode {
    /// Store missing, unreachable, or its schema does not match.
    StoreUnavailable,
    /// Caller-supplied limit rejected before any SQL ran.
    InvalidParameter,
    /// Statement failed inside the store, including timeouts.
    QueryExecution,
}

impl QueryErrorCode {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::StoreUnavailable => "store_unavailable",
            Self::InvalidParameter => "invalid_parameter",
            Self::QueryExecution => "query_execution",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryError {
    pub code: QueryErrorCode,
    pub message: String,
}

impl QueryError {
    #[must_use]
    pub fn new(code: QueryErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    #[must_use]
    pub fn invalid_parameter(message: impl Into<String>) -> Self {
        Self::new(QueryErrorCode::InvalidParameter, message)
    }

    /// Classifies a SQLite failure raised while `operation` ran.
    #[must_use]
    pub fn from_sqlite(operation: &str, err: &rusqlite::Error) -> Self {
        let text = err.to_string();
        let code = match err {
            rusqlite::Error::SqliteFailure(e, _) => match e.code {
                ErrorCode::OperationInterrupted => {
                    return Self::new(
                        QueryErrorCode::QueryExecution,
                        format!("{operation}: query timed out ({text})"),
                    );
                }
                ErrorCode::CannotOpen
                | ErrorCode::NotADatabase
                | ErrorCode::DatabaseBusy
                | ErrorCode::DatabaseLocked => QueryErrorCode::StoreUnavailable,
                _ => classify_message(&text),
            },
            _ => classify_message(&text),
        };
        Self::new(code, format!("{operation}: {text}"))
    }
}

fn classify_message(text: &str) -> QueryErrorCode {
    if text.contains("no such table") || text.contains("no such column") {
        QueryErrorCode::StoreUnavailable
    } else {
        QueryErrorCode::QueryExecution
    }
}

impl std::fmt::Display for QueryError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.code.as_str(), self.message)
    }
}

impl std::error::Error for QueryError {}

impl From<StoreError> for QueryError {
    fn from(value: StoreError) -> Self {
        match value {
            StoreError::Sql(msg) => Self::new(QueryErrorCode::QueryExecution, msg),
            other => Self::new(QueryErrorCode::StoreUnavailable, other.to_string()),
        }
    }
}
