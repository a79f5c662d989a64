//! Cluster reference resolution.
//!
//! Handles the `@name` syntax that expands a named cluster from the config
//! into its destinations. Clusters may reference other clusters; references
//! are expanded recursively with cycle detection.
//!
//! # Example
//!
//! ```toml
//! [clusters]
//! web = ["web1", "web2"]
//! db = ["db1"]
//! all = ["@web", "@db", "cache1"]   # web1, web2, db1, cache1
//! ```

use crate::config::Config;
use crate::error::{GridError, Result};
use std::collections::HashSet;

/// A parsed command-line or cluster entry.
#[derive(Debug, Clone, PartialEq)]
pub enum Entry {
    /// A destination string, passed on to the parser.
    Destination(String),
    /// Reference to a cluster: `@name`
    ClusterRef(String),
}

/// Parse a string into an [`Entry`].
///
/// Strings starting with `@` followed by a name are cluster references;
/// everything else is a destination.
pub fn parse_entry(s: &str) -> Entry {
    match s.strip_prefix('@') {
        Some(name) if !name.is_empty() => Entry::ClusterRef(name.to_string()),
        _ => Entry::Destination(s.to_string()),
    }
}

/// Expand every `@cluster` in `entries`, keeping order.
///
/// # Errors
///
/// - [`GridError::ClusterNotFound`] if a referenced cluster doesn't exist
/// - [`GridError::CircularRef`] if references form a cycle
pub fn resolve_destinations<S: AsRef<str>>(config: &Config, entries: &[S]) -> Result<Vec<String>> {
    let mut visited = HashSet::new();
    let mut result = Vec::new();
    for entry in entries {
        resolve_entry(config, entry.as_ref(), &mut visited, &mut result)?;
    }
    Ok(result)
}

fn resolve_entry(
    config: &Config,
    entry: &str,
    visited: &mut HashSet<String>,
    result: &mut Vec<String>,
) -> Result<()> {
    match parse_entry(entry) {
        Entry::Destination(dest) => result.push(dest),
        Entry::ClusterRef(name) => {
            if visited.contains(&name) {
                return Err(GridError::CircularRef(name));
            }
            let members = config
                .get_cluster(&name)
                .ok_or_else(|| GridError::ClusterNotFound(name.clone()))?;

            visited.insert(name.clone());
            for member in members {
                resolve_entry(config, member, visited, result)?;
            }
            visited.remove(&name);
        }
    }
    Ok(())
}
