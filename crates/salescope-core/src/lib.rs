// SPDX-License-Identifier: Apache-2.0

#![forbid(unsafe_code)]

pub mod canonical;
mod domain;
mod errors;

pub use domain::config::{
    resolve_db_path, resolve_policy_path, DEFAULT_DB_PATH, WORKSPACE_POLICY_PATH,
};
pub use errors::{ExitCode, MachineError};

pub const CRATE_NAME: &str = "salescope-core";

pub const ENV_SALESCOPE_LOG_LEVEL: &str = "SALESCOPE_LOG_LEVEL";
pub const ENV_SALESCOPE_LOG_JSON: &str = "SALESCOPE_LOG_JSON";
pub const ENV_SALESCOPE_DB: &str = "SALESCOPE_DB";
pub const ENV_SALESCOPE_POLICY: &str = "SALESCOPE_POLICY";

#[must_use]
pub fn sha256_hex(bytes: &[u8]) -> String {
    canonical::stable_hash_hex(bytes)
}
