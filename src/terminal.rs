//! The terminal automation surface sshgrid drives.
//!
//! A [`Terminal`] can only create a fresh window or split a pane that already
//! exists; there is no way to place a pane at a grid coordinate directly.
//! Calls are blocking and issued strictly one after another.

use crate::error::Result;
use std::fmt;

/// Opaque reference to a pane owned by the terminal (tmux: `%12`).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PaneHandle(String);

impl PaneHandle {
    /// Wrap a terminal-specific pane id.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The terminal-specific pane id.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PaneHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Where a split places the new pane relative to the existing one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    /// New pane appears beside the existing one.
    Horizontal,
    /// New pane appears below the existing one.
    Vertical,
}

/// Operations sshgrid needs from a host terminal.
pub trait Terminal {
    /// Open a new window whose only pane runs `command`.
    fn create_window(&mut self, command: &str, title: &str) -> Result<PaneHandle>;

    /// Split `existing` and run `command` in the new pane.
    ///
    /// The new pane takes `percent` of the space `existing` had.
    fn split_pane(
        &mut self,
        existing: &PaneHandle,
        orientation: Orientation,
        percent: u32,
        command: &str,
        title: &str,
    ) -> Result<PaneHandle>;

    /// Replicate keyboard input across the panes of each group.
    fn set_broadcast_groups(&mut self, groups: &[Vec<PaneHandle>]) -> Result<()>;

    /// Make every row and column of the window the same size.
    fn arrange_evenly(&mut self) -> Result<()>;

    /// Focus a pane (and its window).
    fn activate_pane(&mut self, pane: &PaneHandle) -> Result<()>;
}
