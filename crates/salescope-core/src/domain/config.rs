// SPDX-License-Identifier: Apache-2.0

use std::path::{Path, PathBuf};

pub const DEFAULT_DB_PATH: &str = "database/ecommerce.db";
pub const WORKSPACE_POLICY_PATH: &str = "configs/policy/analytics.json";

fn non_empty_env(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Explicit flag, then `SALESCOPE_DB`, then the conventional relative path.
#[must_use]
pub fn resolve_db_path(explicit: Option<&Path>) -> PathBuf {
    if let Some(path) = explicit {
        return path.to_path_buf();
    }
    if let Some(from_env) = non_empty_env(crate::ENV_SALESCOPE_DB) {
        return PathBuf::from(from_env);
    }
    PathBuf::from(DEFAULT_DB_PATH)
}

/// Explicit flag, then `SALESCOPE_POLICY`, then the workspace policy file if it
/// exists. `None` means built-in defaults apply.
#[must_use]
pub fn resolve_policy_path(explicit: Option<&Path>, workspace_root: &Path) -> Option<PathBuf> {
    if let Some(path) = explicit {
        return Some(path.to_path_buf());
    }
    if let Some(from_env) = non_empty_env(crate::ENV_SALESCOPE_POLICY) {
        return Some(PathBuf::from(from_env));
    }
    let workspace = workspace_root.join(WORKSPACE_POLICY_PATH);
    workspace.is_file().then_some(workspace)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_db_path_wins() {
        let p = resolve_db_path(Some(Path::new("/tmp/x.db")));
        assert_eq!(p, PathBuf::from("/tmp/x.db"));
    }

    #[test]
    fn explicit_policy_path_wins() {
        let p = resolve_policy_path(Some(Path::new("p.json")), Path::new("/nonexistent"));
        assert_eq!(p, Some(PathBuf::from("p.json")));
    }

    #[test]
    fn workspace_policy_is_used_only_when_present() {
        let root = tempfile::tempdir().expect("tmp");
        assert_eq!(resolve_policy_path(None, root.path()), None);

        let policy = root.path().join(WORKSPACE_POLICY_PATH);
        std::fs::create_dir_all(policy.parent().expect("parent")).expect("mkdir");
        std::fs::write(&policy, b"{}").expect("write");
        assert_eq!(resolve_policy_path(None, root.path()), Some(policy));
    }
}
