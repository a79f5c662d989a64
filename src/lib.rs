//! # sshgrid
//!
//! Open SSH sessions to many hosts in one tmux window, laid out as a grid,
//! with keyboard input synchronized across all of them.
//!
//! ## Features
//!
//! - **Destinations**: `[user@]host[:port]`, IPv6 hosts as `[addr]:port`
//! - **Grid layout**: near-square, columns capped at the square root of the
//!   host count; leftover cells get inert spacer panes
//! - **Broadcast**: input typed in any session pane reaches every session
//!   pane, never the spacers
//! - **Clusters**: named host lists in the config, expanded with `@name`
//!
//! ## Quick Example
//!
//! ```toml
//! # ~/.config/sshgrid/config.toml
//!
//! [defaults]
//! user = "admin"
//! jump = "bastion.example.com"
//!
//! [clusters]
//! web = ["web1", "web2", "web3", "web4"]
//! ```
//!
//! ```bash
//! sshgrid @web alice@db1:2222
//! ```
//!
//! ## Architecture
//!
//! - [`destination`]: destination string parsing
//! - [`ssh`]: ssh launch command construction
//! - [`layout`]: grid dimension planning
//! - [`grid`]: pane creation in split order
//! - [`broadcast`]: synchronized input across session panes
//! - [`terminal`]: the terminal automation trait
//! - [`tmux`]: tmux implementation of [`terminal::Terminal`]
//! - [`dry_run`]: recording implementation of [`terminal::Terminal`]
//! - [`launcher`]: the full pipeline
//! - [`shell`]: login shell discovery
//! - [`config`], [`loader`]: TOML config and its discovery
//! - [`resolver`]: `@cluster` expansion
//! - [`cli`]: command-line argument parsing with clap
//! - [`error`]: error types

pub mod broadcast;
pub mod cli;
pub mod config;
pub mod destination;
pub mod dry_run;
pub mod error;
pub mod grid;
pub mod launcher;
pub mod layout;
pub mod loader;
pub mod resolver;
pub mod shell;
pub mod ssh;
pub mod terminal;
pub mod tmux;

pub use config::{Config, Defaults};
pub use destination::Destination;
pub use error::{GridError, Result};
pub use grid::{BroadcastSet, Grid};
pub use layout::LayoutPlan;
pub use terminal::{Orientation, PaneHandle, Terminal};
