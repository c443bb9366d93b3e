// SPDX-License-Identifier: Apache-2.0

use std::path::PathBuf;
use std::time::Duration;

use salescope_core::{canonical, resolve_db_path, resolve_policy_path};
use salescope_policies::{load_policy_or_default, AnalyticsPolicy};
use salescope_store::{SalesStore, StoreConfig};
use serde::Serialize;
use tracing::debug;

use crate::{CliError, GlobalOptions, OutputMode};

/// Canonical compact JSON in `--json` mode, pretty JSON otherwise.
pub(crate) fn emit_ok<T: Serialize>(
    output_mode: OutputMode,
    payload: &T,
) -> Result<(), CliError> {
    if output_mode.json {
        let bytes =
            canonical::stable_json_bytes(payload).map_err(|e| CliError::internal(e.to_string()))?;
        let text = String::from_utf8(bytes).map_err(|e| CliError::internal(e.to_string()))?;
        println!("{text}");
    } else {
        let text =
            canonical::stable_json_pretty(payload).map_err(|e| CliError::internal(e.to_string()))?;
        println!("{text}");
    }
    Ok(())
}

pub(crate) fn db_path(globals: &GlobalOptions) -> PathBuf {
    resolve_db_path(globals.db.as_deref())
}

pub(crate) fn load_policy(globals: &GlobalOptions) -> Result<AnalyticsPolicy, CliError> {
    let workspace_root = std::env::current_dir().map_err(|e| CliError::internal(e.to_string()))?;
    let path = resolve_policy_path(globals.policy.as_deref(), &workspace_root);
    debug!(policy = ?path, "resolved policy path");
    Ok(load_policy_or_default(path.as_deref())?)
}

/// Opens the store with the busy and query timeouts from `policy`.
pub(crate) fn open_store(
    globals: &GlobalOptions,
    policy: &AnalyticsPolicy,
) -> Result<SalesStore, CliError> {
    let config = StoreConfig::from_env(globals.db.as_deref()).with_timeouts(
        Duration::from_millis(policy.query_limits.busy_timeout_ms),
        Duration::from_millis(policy.query_limits.query_timeout_ms),
    );
    Ok(SalesStore::open(config)?)
}
