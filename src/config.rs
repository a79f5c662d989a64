//! Configuration types for sshgrid.
//!
//! The config file is optional. It can set defaults that apply to every
//! destination and name clusters of destinations.
//!
//! # Config Format
//!
//! ```toml
//! [defaults]
//! user = "admin"
//! port = 2222
//! jump = "bastion.example.com"
//! options = "-o StrictHostKeyChecking=no"
//! columns = 3
//! shell = "/bin/zsh"
//! spacer = "cat"
//!
//! [clusters]
//! web = ["web1", "web2", "@db"]
//! db = ["admin@[2001:db8::1]:5432"]
//! ```

use serde::Deserialize;
use std::collections::HashMap;

/// Global default settings applied when not overridden on the command line.
#[derive(Debug, Deserialize, Default, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Defaults {
    /// Login user for destinations without `user@`.
    pub user: Option<String>,
    /// Port for destinations without `:port`.
    pub port: Option<u16>,
    /// Jump host (`ssh -J`).
    pub jump: Option<String>,
    /// Extra ssh options, passed verbatim.
    pub options: Option<String>,
    /// Maximum number of grid columns.
    pub columns: Option<u32>,
    /// Login shell wrapping each ssh command.
    pub shell: Option<String>,
    /// Command run in spacer panes.
    pub spacer: Option<String>,
}

/// Top-level configuration structure.
///
/// Parsed from `~/.config/sshgrid/config.toml` (or XDG equivalent).
#[derive(Debug, Deserialize, Default, Clone)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Global default settings.
    #[serde(default)]
    pub defaults: Defaults,
    /// Named lists of destinations: `name` -> destinations or `@refs`.
    #[serde(default)]
    pub clusters: HashMap<String, Vec<String>>,
}

impl Config {
    /// Parse config from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns `toml::de::Error` if the TOML is malformed or doesn't match
    /// the expected structure.
    pub fn from_str(toml_str: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(toml_str)
    }

    /// Get a cluster by name.
    pub fn get_cluster(&self, name: &str) -> Option<&[String]> {
        self.clusters.get(name).map(Vec::as_slice)
    }

    /// List all cluster names, sorted alphabetically.
    pub fn list_clusters(&self) -> Vec<String> {
        let mut result: Vec<_> = self.clusters.keys().cloned().collect();
        result.sort();
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config() {
        let config = Config::from_str("").unwrap();
        assert_eq!(config.defaults, Defaults::default());
        assert!(config.clusters.is_empty());
    }

    #[test]
    fn test_full_config() {
        let config = Config::from_str(
            r#"
            [defaults]
            user = "admin"
            port = 2222
            jump = "bastion"
            options = "-A"
            columns = 3
            shell = "/bin/zsh"
            spacer = "sleep infinity"

            [clusters]
            web = ["web1", "web2"]
            db = ["db1"]
            "#,
        )
        .unwrap();

        assert_eq!(config.defaults.user.as_deref(), Some("admin"));
        assert_eq!(config.defaults.port, Some(2222));
        assert_eq!(config.defaults.jump.as_deref(), Some("bastion"));
        assert_eq!(config.defaults.options.as_deref(), Some("-A"));
        assert_eq!(config.defaults.columns, Some(3));
        assert_eq!(config.defaults.shell.as_deref(), Some("/bin/zsh"));
        assert_eq!(config.defaults.spacer.as_deref(), Some("sleep infinity"));
        assert_eq!(
            config.get_cluster("web"),
            Some(&["web1".to_string(), "web2".to_string()][..])
        );
        assert_eq!(config.list_clusters(), vec!["db", "web"]);
    }

    #[test]
    fn test_unknown_key_is_rejected() {
        assert!(Config::from_str("[defaults]\nusr = \"x\"").is_err());
    }

    #[test]
    fn test_bad_port_is_rejected() {
        assert!(Config::from_str("[defaults]\nport = 70000").is_err());
    }
}
