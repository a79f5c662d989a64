//! Tmux as the host terminal.
//!
//! Implements [`Terminal`] by shelling out to the `tmux` binary. Inside a
//! tmux session the grid goes into a new window; outside, a new detached
//! session is created, sized like the invoking terminal, and can be attached
//! afterwards.
//!
//! # Pane Ids
//!
//! Every pane-creating command is run with `-P -F '#{pane_id}'` so tmux
//! prints the id (`%N`) of the pane it just made. Ids are stable for the life
//! of the pane, unlike pane indices, which shift as panes are added.
//!
//! # Sizing
//!
//! Splits use `-l N%`, so each row and column gets its even share when it is
//! created. Nothing is re-tiled afterwards: `select-layout tiled` would
//! reorder the panes by its own rules and lose the planned grid.
//!
//! # Broadcasting
//!
//! `synchronize-panes` is set per pane (tmux 3.2+), so keys typed in any
//! synchronized pane go to every other synchronized pane of the window and
//! spacers stay out of it.

use crate::error::{GridError, Result};
use crate::terminal::{Orientation, PaneHandle, Terminal};
use std::path::PathBuf;
use std::process::Command;
use tracing::debug;

const PANE_ID_FORMAT: &str = "#{pane_id}";

/// Session size used when the invoking terminal's size is unknown.
pub const FALLBACK_SIZE: (u16, u16) = (200, 50);

/// Check if we're running inside a tmux session.
///
/// Checks for the `TMUX` environment variable, which tmux sets when active.
pub fn in_tmux() -> bool {
    std::env::var("TMUX").is_ok()
}

/// Columns and lines of the invoking terminal, or [`FALLBACK_SIZE`].
pub fn client_size() -> (u16, u16) {
    match crossterm::terminal::size() {
        Ok((cols, rows)) if cols > 0 && rows > 0 => (cols, rows),
        _ => FALLBACK_SIZE,
    }
}

/// Handle to a reachable tmux server.
#[derive(Debug)]
pub struct TmuxTerminal {
    binary: PathBuf,
    name: String,
    inside: bool,
    size: (u16, u16),
    socket: Option<String>,
}

impl TmuxTerminal {
    /// Locate tmux and prepare to build a grid named `name`.
    ///
    /// # Errors
    ///
    /// [`GridError::CapabilityUnavailable`] if `tmux` is not on `PATH`.
    pub fn connect(name: &str) -> Result<Self> {
        let binary = find_tmux()?;
        let inside = in_tmux();
        let size = client_size();
        debug!(binary = %binary.display(), inside, ?size, "found tmux");
        Ok(Self {
            binary,
            name: name.to_string(),
            inside,
            size,
            socket: None,
        })
    }

    /// Use a private tmux server on `socket` (`tmux -L`), ignoring the
    /// user's tmux config, with a detached session of `size` columns and
    /// lines.
    pub fn on_socket(socket: &str, name: &str, size: (u16, u16)) -> Result<Self> {
        Ok(Self {
            binary: find_tmux()?,
            name: name.to_string(),
            inside: false,
            size,
            socket: Some(socket.to_string()),
        })
    }

    /// True when the grid is built inside the current tmux client.
    pub fn is_inside(&self) -> bool {
        self.inside
    }

    /// Session name used when running outside tmux.
    pub fn session_name(&self) -> &str {
        &self.name
    }

    /// Attach the current terminal to the new session.
    ///
    /// Blocks until the user detaches. Does nothing inside tmux, where the
    /// new window is already visible.
    pub fn attach(&self) -> Result<()> {
        if self.inside {
            return Ok(());
        }
        self.run(&attach_args(&self.name))
    }

    fn command(&self, args: &[String]) -> Command {
        debug!(?args, "tmux");
        let mut cmd = Command::new(&self.binary);
        if let Some(ref socket) = self.socket {
            cmd.args(["-L", socket.as_str(), "-f", "/dev/null"]);
        }
        cmd.args(args);
        cmd
    }

    fn run(&self, args: &[String]) -> Result<()> {
        let status = self
            .command(args)
            .status()
            .map_err(|e| GridError::CapabilityUnavailable(e.to_string()))?;

        if !status.success() {
            return Err(GridError::CapabilityUnavailable(format!(
                "{} failed",
                args.first().map(String::as_str).unwrap_or("tmux")
            )));
        }

        Ok(())
    }

    fn run_for_pane(&self, args: &[String]) -> Result<PaneHandle> {
        let output = self
            .command(args)
            .output()
            .map_err(|e| GridError::CapabilityUnavailable(e.to_string()))?;

        if !output.status.success() {
            return Err(GridError::CapabilityUnavailable(format!(
                "{} failed: {}",
                args.first().map(String::as_str).unwrap_or("tmux"),
                String::from_utf8_lossy(&output.stderr).trim()
            )));
        }

        parse_pane_id(&String::from_utf8_lossy(&output.stdout))
    }

    fn set_title(&self, pane: &PaneHandle, title: &str) -> Result<()> {
        self.run(&title_args(pane, title))
    }
}

fn find_tmux() -> Result<PathBuf> {
    which::which("tmux")
        .map_err(|e| GridError::CapabilityUnavailable(format!("tmux not found: {}", e)))
}

impl Terminal for TmuxTerminal {
    fn create_window(&mut self, command: &str, title: &str) -> Result<PaneHandle> {
        let args = if self.inside {
            new_window_args(&self.name, command)
        } else {
            new_session_args(&self.name, self.size, command)
        };
        let pane = self.run_for_pane(&args)?;
        self.set_title(&pane, title)?;
        Ok(pane)
    }

    fn split_pane(
        &mut self,
        existing: &PaneHandle,
        orientation: Orientation,
        percent: u32,
        command: &str,
        title: &str,
    ) -> Result<PaneHandle> {
        let pane = self.run_for_pane(&split_args(existing, orientation, percent, command))?;
        self.set_title(&pane, title)?;
        Ok(pane)
    }

    fn set_broadcast_groups(&mut self, groups: &[Vec<PaneHandle>]) -> Result<()> {
        if groups.len() > 1 {
            return Err(GridError::CapabilityUnavailable(format!(
                "tmux supports one broadcast group per window, got {}",
                groups.len()
            )));
        }
        for pane in groups.iter().flatten() {
            self.run(&synchronize_args(pane))?;
        }
        Ok(())
    }

    /// Proportional splits already leave rows and columns even; any tmux
    /// layout command would rebuild the tree and scramble the grid.
    fn arrange_evenly(&mut self) -> Result<()> {
        debug!("panes already evenly split");
        Ok(())
    }

    fn activate_pane(&mut self, pane: &PaneHandle) -> Result<()> {
        self.run(&select_window_args(pane))?;
        self.run(&select_pane_args(pane))
    }
}

/// Parse the pane id printed by `-P -F '#{pane_id}'`.
pub fn parse_pane_id(stdout: &str) -> Result<PaneHandle> {
    let id = stdout.trim();
    if id.starts_with('%') && id.len() > 1 {
        Ok(PaneHandle::new(id))
    } else {
        Err(GridError::CapabilityUnavailable(format!(
            "unexpected pane id from tmux: '{}'",
            id
        )))
    }
}

fn strings(args: &[&str]) -> Vec<String> {
    args.iter().map(|s| s.to_string()).collect()
}

fn new_window_args(name: &str, command: &str) -> Vec<String> {
    strings(&["new-window", "-P", "-F", PANE_ID_FORMAT, "-n", name, command])
}

fn new_session_args(name: &str, size: (u16, u16), command: &str) -> Vec<String> {
    let (width, height) = (size.0.to_string(), size.1.to_string());
    strings(&[
        "new-session", "-d", "-P", "-F", PANE_ID_FORMAT, "-x", &width, "-y", &height, "-s",
        name, "-n", name, command,
    ])
}

fn split_args(
    existing: &PaneHandle,
    orientation: Orientation,
    percent: u32,
    command: &str,
) -> Vec<String> {
    let flag = match orientation {
        Orientation::Horizontal => "-h",
        Orientation::Vertical => "-v",
    };
    let size = format!("{}%", percent);
    strings(&[
        "split-window", flag, "-l", &size, "-t", existing.as_str(), "-P", "-F",
        PANE_ID_FORMAT, command,
    ])
}

fn title_args(pane: &PaneHandle, title: &str) -> Vec<String> {
    strings(&["select-pane", "-t", pane.as_str(), "-T", title])
}

fn synchronize_args(pane: &PaneHandle) -> Vec<String> {
    strings(&["set-option", "-p", "-t", pane.as_str(), "synchronize-panes", "on"])
}

fn select_window_args(pane: &PaneHandle) -> Vec<String> {
    strings(&["select-window", "-t", pane.as_str()])
}

fn select_pane_args(pane: &PaneHandle) -> Vec<String> {
    strings(&["select-pane", "-t", pane.as_str()])
}

fn attach_args(name: &str) -> Vec<String> {
    strings(&["attach-session", "-t", name])
}
