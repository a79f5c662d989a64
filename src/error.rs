//! Error types for sshgrid.
//!
//! All errors in sshgrid are represented by [`GridError`], which covers
//! destination parsing, configuration issues, shell discovery, and terminal
//! failures. Every variant is fatal: nothing is retried or rolled back.

use std::path::PathBuf;
use thiserror::Error;

/// All possible errors that can occur in sshgrid.
#[derive(Error, Debug)]
pub enum GridError {
    /// A destination did not contain a hostname.
    #[error("No hostname in destination: '{0}'")]
    MissingHostname(String),

    /// The port part of a destination is not a valid TCP port.
    #[error("Invalid port '{port}' in destination: '{spec}'")]
    InvalidPort {
        /// The destination as given by the user.
        spec: String,
        /// The offending port text.
        port: String,
    },

    /// A destination is malformed in some other way (e.g. unclosed `[`).
    #[error("Invalid destination '{spec}': {reason}")]
    InvalidDestination {
        /// The destination as given by the user.
        spec: String,
        /// What is wrong with it.
        reason: String,
    },

    /// Neither the config, `$SHELL`, nor `PATH` yielded a login shell.
    #[error("No usable login shell found (set $SHELL)")]
    NoShellAvailable,

    /// The terminal could not be reached or one of its commands failed.
    #[error("Terminal error: {0}")]
    CapabilityUnavailable(String),

    /// Nothing to launch.
    #[error("No destinations given")]
    NoDestinations,

    /// The layout has fewer cells than there are destinations.
    #[error("Layout has {cells} cells but {destinations} destinations were given")]
    LayoutTooSmall {
        /// `columns * rows` of the plan.
        cells: u32,
        /// Number of launch commands.
        destinations: usize,
    },

    /// Requested cluster does not exist in config.
    #[error("Cluster not found: {0}")]
    ClusterNotFound(String),

    /// Cluster references form a cycle (a -> b -> a).
    #[error("Circular cluster reference detected: {0}")]
    CircularRef(String),

    /// Config file does not exist at the given path.
    #[error("Config file not found: {0}")]
    ConfigNotFound(PathBuf),

    /// Could not determine the user's config directory.
    #[error("Could not determine config directory")]
    NoConfigDir,

    /// Failed to read a file from disk.
    #[error("Failed to read config: {0}")]
    IoError(#[from] std::io::Error),

    /// TOML parsing failed.
    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),
}

/// Convenient Result type alias for sshgrid operations.
pub type Result<T> = std::result::Result<T, GridError>;
