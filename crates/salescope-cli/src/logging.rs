// SPDX-License-Identifier: Apache-2.0

use salescope_core::{ENV_SALESCOPE_LOG_JSON, ENV_SALESCOPE_LOG_LEVEL};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::LogFlags;

const DEFAULT_FILTER: &str = "warn";

fn env_non_empty(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn env_bool(key: &str) -> bool {
    env_non_empty(key)
        .is_some_and(|v| matches!(v.to_ascii_lowercase().as_str(), "1" | "true" | "yes"))
}

/// Flags win over `SALESCOPE_LOG_LEVEL`, which wins over `RUST_LOG`.
pub(crate) fn filter_directive(flags: LogFlags) -> String {
    if flags.trace {
        return "trace".to_string();
    }
    if flags.verbose > 0 {
        return "debug".to_string();
    }
    if flags.quiet {
        return "error".to_string();
    }
    env_non_empty(ENV_SALESCOPE_LOG_LEVEL)
        .or_else(|| env_non_empty("RUST_LOG"))
        .unwrap_or_else(|| DEFAULT_FILTER.to_string())
}

pub(crate) fn init_tracing(flags: LogFlags, json: bool) {
    let filter = EnvFilter::try_new(filter_directive(flags))
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    // A subscriber may already be installed when the CLI is driven in-process.
    if json || env_bool(ENV_SALESCOPE_LOG_JSON) {
        let _ = tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .try_init();
    } else {
        let _ = tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .try_init();
    }
}
