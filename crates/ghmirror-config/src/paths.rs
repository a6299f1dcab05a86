//! Filesystem path discovery: config file, per-repository database path,
//! tilde expansion. No `dirs`-style crate -- direct `HOME` lookup, matching
//! a general preference for direct env access over a dedicated path crate.

use std::path::PathBuf;

use ghmirror_core::RepoRef;

use crate::error::{ConfigError, Result};

const APP_NAME: &str = "ghmirror";
const CONFIG_ENV: &str = "GHMIRROR_CONFIG";

fn home_dir() -> Result<PathBuf> {
    std::env::var_os("HOME")
        .map(PathBuf::from)
        .filter(|p| !p.as_os_str().is_empty())
        .ok_or(ConfigError::NoHomeDir)
}

/// `~/.config/<app>/config.toml`, or the `GHMIRROR_CONFIG` override if set.
pub fn config_path() -> Result<PathBuf> {
    if let Ok(p) = std::env::var(CONFIG_ENV) {
        if !p.is_empty() {
            return Ok(PathBuf::from(p));
        }
    }
    Ok(home_dir()?.join(".config").join(APP_NAME).join("config.toml"))
}

/// `~/.local/share/<app>/<owner>_<repo>.db`.
pub fn database_path(repo: &RepoRef) -> Result<PathBuf> {
    Ok(home_dir()?
        .join(".local")
        .join("share")
        .join(APP_NAME)
        .join(format!("{}.db", repo.slug())))
}

/// Creates the parent directory of `path` with mode `0755` if it does not
/// already exist.
#[cfg(unix)]
pub fn ensure_parent_dir(path: &std::path::Path) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;

    let Some(parent) = path.parent() else {
        return Ok(());
    };
    if parent.as_os_str().is_empty() {
        return Ok(());
    }
    std::fs::create_dir_all(parent).map_err(|e| ConfigError::Write {
        path: parent.display().to_string(),
        source: e,
    })?;
    std::fs::set_permissions(parent, std::fs::Permissions::from_mode(0o755)).map_err(|e| {
        ConfigError::Write { path: parent.display().to_string(), source: e }
    })?;
    Ok(())
}

#[cfg(not(unix))]
pub fn ensure_parent_dir(path: &std::path::Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| ConfigError::Write {
            path: parent.display().to_string(),
            source: e,
        })?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_env_override_wins() {
        // SAFETY: test-local env mutation, no other test reads this var concurrently
        // in a way that matters (each test process run is single-threaded per test
        // binary invocation here since the var is process-global but this test
        // restores it immediately).
        unsafe {
            std::env::set_var(CONFIG_ENV, "/tmp/custom-config.toml");
        }
        let path = config_path().unwrap();
        unsafe {
            std::env::remove_var(CONFIG_ENV);
        }
        assert_eq!(path, PathBuf::from("/tmp/custom-config.toml"));
    }

    #[test]
    fn database_path_uses_repo_slug() {
        unsafe {
            std::env::remove_var(CONFIG_ENV);
        }
        let repo = RepoRef::new("rust-lang", "rust");
        let path = database_path(&repo).unwrap();
        assert!(path.ends_with("rust-lang_rust.db"));
    }
}
