//! Command-line interface for sshgrid.
//!
//! Parses arguments using clap and provides the [`Cli`] struct containing
//! all user-specified options.

use crate::config::Defaults;
use crate::ssh::SshDefaults;
use clap::Parser;
use std::path::PathBuf;

/// Command-line arguments for sshgrid.
///
/// # Examples
///
/// ```bash
/// # Four hosts in a 2x2 grid
/// sshgrid web1 web2 alice@db1:2222 [2001:db8::1]
///
/// # A cluster from the config, through a bastion
/// sshgrid -J bastion @web
///
/// # Show what would be sent to tmux
/// sshgrid --dry-run web{1..10}
/// ```
#[derive(Parser, Debug)]
#[command(name = "sshgrid")]
#[command(version)]
#[command(about = "Open SSH sessions in a tmux grid with synchronized input")]
#[command(long_about = "sshgrid opens one SSH session per destination in a single tmux window,\n\
    arranged as a near-square grid, and synchronizes keyboard input across all sessions.\n\n\
    Destinations are [user@]host[:port]; wrap IPv6 hosts in brackets: [::1]:2222.\n\
    Use @name to expand a cluster defined in the config file.")]
pub struct Cli {
    /// Destinations (`[user@]host[:port]`) or cluster references (`@name`).
    #[arg(value_name = "DESTINATION")]
    pub destinations: Vec<String>,

    /// Default login user for destinations without `user@`.
    #[arg(short = 'l', long, value_name = "USER")]
    pub user: Option<String>,

    /// Default port for destinations without `:port`.
    #[arg(short, long, value_name = "PORT", value_parser = clap::value_parser!(u16).range(1..))]
    pub port: Option<u16>,

    /// Jump host passed to `ssh -J`.
    #[arg(short = 'J', long, value_name = "HOST")]
    pub jump: Option<String>,

    /// Extra options passed verbatim to ssh.
    #[arg(short, long, value_name = "OPTIONS", allow_hyphen_values = true)]
    pub options: Option<String>,

    /// Maximum number of columns (never more than the square root of the host count).
    #[arg(short, long, value_name = "COUNT", value_parser = clap::value_parser!(u32).range(1..))]
    pub columns: Option<u32>,

    /// Name of the tmux window (and session, outside tmux).
    #[arg(short, long, value_name = "NAME", default_value = "sshgrid")]
    pub name: String,

    /// Config file (default: ~/.config/sshgrid/config.toml).
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Print the tmux operations instead of running them.
    #[arg(long)]
    pub dry_run: bool,

    /// Outside tmux, create the session without attaching to it.
    #[arg(long)]
    pub no_attach: bool,

    /// Enable debug logging.
    #[arg(short, long)]
    pub debug: bool,

    /// List the clusters defined in the config.
    #[arg(long)]
    pub list: bool,
}

impl Cli {
    /// Merge ssh flags over the config `[defaults]`.
    ///
    /// Precedence: CLI flag > config > absent. `shell` is resolved by the
    /// caller (see [`crate::shell::resolve_login_shell`]).
    pub fn ssh_defaults(&self, config: &Defaults, shell: String) -> SshDefaults {
        SshDefaults {
            user: self.user.clone().or_else(|| config.user.clone()),
            port: self.port.or(config.port),
            jump: self.jump.clone().or_else(|| config.jump.clone()),
            options: self.options.clone().or_else(|| config.options.clone()),
            shell,
        }
    }

    /// Column hint from `-c` or the config.
    pub fn column_hint(&self, config: &Defaults) -> Option<u32> {
        self.columns.or(config.columns)
    }
}
