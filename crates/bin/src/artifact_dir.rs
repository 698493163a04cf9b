//! Locating the artifact directory.

use std::path::{Path, PathBuf};

/// Directory name checked relative to the working directory.
pub(crate) const LOCAL_ARTIFACTS: &str = "artifacts";

/// Platform data directory for artifacts.
///
/// - Linux: `~/.local/share/superstore/`
/// - macOS: `~/Library/Application Support/superstore/`
/// - Windows: `%APPDATA%\superstore\`
pub(crate) fn default_data_dir() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("superstore")
}

/// Pick the artifact directory: the explicit one, else `./artifacts` if it
/// exists under `cwd`, else the platform data directory.
pub(crate) fn resolve(explicit: Option<PathBuf>, cwd: &Path) -> PathBuf {
    if let Some(dir) = explicit {
        return dir;
    }
    let local = cwd.join(LOCAL_ARTIFACTS);
    if local.is_dir() {
        local
    } else {
        default_data_dir()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_explicit_wins() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join(LOCAL_ARTIFACTS)).unwrap();
        let explicit = PathBuf::from("/opt/models");
        assert_eq!(resolve(Some(explicit.clone()), dir.path()), explicit);
    }

    #[test]
    fn test_local_directory() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join(LOCAL_ARTIFACTS)).unwrap();
        assert_eq!(resolve(None, dir.path()), dir.path().join(LOCAL_ARTIFACTS));
    }

    #[test]
    fn test_falls_back_to_data_dir() {
        let dir = tempfile::tempdir().unwrap();
        let resolved = resolve(None, dir.path());
        assert_eq!(resolved, default_data_dir());
        assert!(resolved.ends_with("superstore"));
    }
}
