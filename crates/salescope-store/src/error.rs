// SPDX-License-Identifier: Apache-2.0

use std::fmt::{Display, Formatter};

#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum StoreError {
    /// File missing, fact table absent, or a required column missing.
    NotInitialized(String),
    Open(String),
    Sql(String),
}

impl StoreError {
    #[must_use]
    pub fn message(&self) -> &str {
        match self {
            Self::NotInitialized(m) | Self::Open(m) | Self::Sql(m) => m,
        }
    }
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotInitialized(m) => write!(f, "store not initialized: {m}"),
            Self::Open(m) => write!(f, "store open failed: {m}"),
            Self::Sql(m) => write!(f, "store sql failed: {m}"),
        }
    }
}

impl std::error::Error for StoreError {}
