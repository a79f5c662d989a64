//! Config file discovery and loading.
//!
//! The search order is:
//!
//! 1. `$XDG_CONFIG_HOME/sshgrid/config.toml`
//! 2. `~/.config/sshgrid/config.toml`
//!
//! A config at the default location is optional; one named explicitly with
//! `--config` must exist.

use crate::config::Config;
use crate::error::{GridError, Result};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Determine the config file path.
///
/// Returns `$XDG_CONFIG_HOME/sshgrid/config.toml` if that file exists,
/// otherwise `~/.config/sshgrid/config.toml` whether or not it exists.
///
/// # Errors
///
/// Returns [`GridError::NoConfigDir`] if the home directory cannot be determined.
pub fn default_config_path() -> Result<PathBuf> {
    if let Ok(xdg) = std::env::var("XDG_CONFIG_HOME") {
        let path = PathBuf::from(xdg).join("sshgrid").join("config.toml");
        if path.exists() {
            return Ok(path);
        }
    }

    dirs::home_dir()
        .map(|home| home.join(".config").join("sshgrid").join("config.toml"))
        .ok_or(GridError::NoConfigDir)
}

/// Load and parse a config file from the given path.
///
/// # Errors
///
/// - [`GridError::ConfigNotFound`] if the file doesn't exist
/// - [`GridError::IoError`] if reading fails
/// - [`GridError::ParseError`] if TOML parsing fails
pub fn load_config(path: &Path) -> Result<Config> {
    if !path.exists() {
        return Err(GridError::ConfigNotFound(path.to_path_buf()));
    }
    let contents = std::fs::read_to_string(path)?;
    let config = Config::from_str(&contents)?;
    debug!(path = %path.display(), clusters = config.clusters.len(), "loaded config");
    Ok(config)
}

/// Load the config named on the command line, or the default one if present.
///
/// A missing default config yields an empty [`Config`].
pub fn load(explicit: Option<&Path>) -> Result<Config> {
    if let Some(path) = explicit {
        return load_config(path);
    }

    let path = default_config_path()?;
    if path.exists() {
        load_config(&path)
    } else {
        debug!(path = %path.display(), "no config file, using defaults");
        Ok(Config::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_load_config() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[clusters]\nweb = [\"web1\"]\n").unwrap();

        let config = load(Some(path.as_path())).unwrap();
        assert_eq!(config.list_clusters(), vec!["web"]);
    }

    #[test]
    fn test_missing_explicit_config() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nope.toml");
        assert!(matches!(load(Some(path.as_path())), Err(GridError::ConfigNotFound(p)) if p == path));
    }

    #[test]
    fn test_malformed_config() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[clusters\n").unwrap();
        assert!(matches!(load_config(&path), Err(GridError::ParseError(_))));
    }
}
