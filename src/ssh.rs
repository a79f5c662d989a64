//! SSH launch command construction.
//!
//! Each destination becomes one shell command that runs `ssh` inside the
//! user's login shell, so shell startup files and the working directory are
//! the user's own. Nothing here touches the network; it only builds strings.
//!
//! # Example
//!
//! ```
//! use sshgrid::destination::parse_destination;
//! use sshgrid::ssh::{build_command, SshDefaults};
//!
//! let defaults = SshDefaults {
//!     port: Some(2222),
//!     ..SshDefaults::new("/bin/bash")
//! };
//! let dest = parse_destination("alice@web1").unwrap();
//! assert_eq!(
//!     build_command(&dest, &defaults),
//!     "/bin/bash -l -c 'ssh -p 2222 -l alice -- web1'"
//! );
//! ```

use crate::destination::Destination;

/// Process-wide settings applied to every destination unless it overrides them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SshDefaults {
    /// User for destinations without `user@`.
    pub user: Option<String>,
    /// Port for destinations without `:port`.
    pub port: Option<u16>,
    /// Jump host passed to `ssh -J`.
    pub jump: Option<String>,
    /// Extra ssh options, inserted verbatim.
    pub options: Option<String>,
    /// Login shell that wraps the ssh invocation.
    pub shell: String,
}

impl SshDefaults {
    /// Defaults with only the login shell set.
    pub fn new(shell: impl Into<String>) -> Self {
        Self {
            user: None,
            port: None,
            jump: None,
            options: None,
            shell: shell.into(),
        }
    }
}

/// A ready-to-run command for one grid cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaunchCommand {
    /// Pane title.
    pub title: String,
    /// Shell command line executed by the terminal.
    pub command: String,
}

/// Build the `ssh` argument line for a destination.
///
/// Order: raw options, `-J`, `-p`, `-l`, then `--` and the hostname, so a
/// hostname starting with `-` is never read as an option. Values on the
/// destination win over `defaults`; absent values drop their flag.
pub fn ssh_invocation(dest: &Destination, defaults: &SshDefaults) -> String {
    let mut parts = vec!["ssh".to_string()];

    if let Some(ref options) = defaults.options {
        let options = options.trim();
        if !options.is_empty() {
            parts.push(options.to_string());
        }
    }
    if let Some(ref jump) = defaults.jump {
        parts.push(format!("-J {}", quote(jump)));
    }
    if let Some(port) = dest.port.or(defaults.port) {
        parts.push(format!("-p {}", port));
    }
    if let Some(user) = dest.user.as_ref().or(defaults.user.as_ref()) {
        parts.push(format!("-l {}", quote(user)));
    }
    parts.push("--".to_string());
    parts.push(quote(&dest.hostname));

    parts.join(" ")
}

/// Build the full login-shell command for a destination.
pub fn build_command(dest: &Destination, defaults: &SshDefaults) -> String {
    format!(
        "{} -l -c {}",
        quote(&defaults.shell),
        quote(&ssh_invocation(dest, defaults))
    )
}

/// Build one [`LaunchCommand`] per destination, in input order.
pub fn launch_commands(dests: &[Destination], defaults: &SshDefaults) -> Vec<LaunchCommand> {
    dests
        .iter()
        .map(|dest| LaunchCommand {
            title: dest.to_string(),
            command: build_command(dest, defaults),
        })
        .collect()
}

/// Quote a word for a POSIX shell, leaving plain words untouched.
pub fn quote(word: &str) -> String {
    let plain = !word.is_empty()
        && word
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || "@%+=:,./_-".contains(c));
    if plain {
        word.to_string()
    } else {
        format!("'{}'", word.replace('\'', r"'\''"))
    }
}
