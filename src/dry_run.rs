//! A [`Terminal`] that records operations instead of executing them.
//!
//! Used by `--dry-run` to show what would be sent to tmux, and by tests to
//! inspect the exact call sequence. Handles are synthetic: `%0`, `%1`, ...

use crate::error::{GridError, Result};
use crate::terminal::{Orientation, PaneHandle, Terminal};

/// One recorded terminal call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operation {
    /// A window was created.
    CreateWindow {
        /// Handle of the new pane.
        pane: PaneHandle,
        /// Command run in it.
        command: String,
        /// Pane title.
        title: String,
    },
    /// An existing pane was split.
    SplitPane {
        /// Pane that was split.
        existing: PaneHandle,
        /// Direction of the split.
        orientation: Orientation,
        /// Share of `existing` given to the new pane.
        percent: u32,
        /// Handle of the new pane.
        pane: PaneHandle,
        /// Command run in it.
        command: String,
        /// Pane title.
        title: String,
    },
    /// Broadcast groups were set.
    SetBroadcastGroups(Vec<Vec<PaneHandle>>),
    /// Panes were arranged evenly.
    ArrangeEvenly,
    /// A pane was focused.
    ActivatePane(PaneHandle),
}

/// Recording terminal.
#[derive(Debug, Default)]
pub struct DryRunTerminal {
    operations: Vec<Operation>,
    next_id: u32,
    fail_after: Option<usize>,
}

impl DryRunTerminal {
    /// A terminal where every call succeeds.
    pub fn new() -> Self {
        Self::default()
    }

    /// A terminal that fails every call after the first `count` succeed.
    pub fn failing_after(count: usize) -> Self {
        Self {
            fail_after: Some(count),
            ..Self::default()
        }
    }

    /// Calls recorded so far, in order.
    pub fn operations(&self) -> &[Operation] {
        &self.operations
    }

    /// Print each recorded call as one line on stdout.
    pub fn print(&self) {
        for op in &self.operations {
            println!("{}", describe(op));
        }
    }

    fn record(&mut self, op: Operation) -> Result<()> {
        if self.fail_after.is_some_and(|n| self.operations.len() >= n) {
            return Err(GridError::CapabilityUnavailable(format!(
                "dry run refused: {}",
                describe(&op)
            )));
        }
        self.operations.push(op);
        Ok(())
    }

    fn next_handle(&mut self) -> PaneHandle {
        let handle = PaneHandle::new(format!("%{}", self.next_id));
        self.next_id += 1;
        handle
    }
}

fn describe(op: &Operation) -> String {
    match op {
        Operation::CreateWindow {
            pane,
            command,
            title,
        } => format!("create-window {} [{}] {}", pane, title, command),
        Operation::SplitPane {
            existing,
            orientation,
            percent,
            pane,
            command,
            title,
        } => {
            let flag = match orientation {
                Orientation::Horizontal => "-h",
                Orientation::Vertical => "-v",
            };
            format!(
                "split-pane {} -l {}% {} -> {} [{}] {}",
                flag, percent, existing, pane, title, command
            )
        }
        Operation::SetBroadcastGroups(groups) => {
            let groups: Vec<String> = groups
                .iter()
                .map(|g| {
                    g.iter()
                        .map(|h| h.to_string())
                        .collect::<Vec<_>>()
                        .join(",")
                })
                .collect();
            format!("broadcast {}", groups.join(" | "))
        }
        Operation::ArrangeEvenly => "arrange-evenly".to_string(),
        Operation::ActivatePane(pane) => format!("activate {}", pane),
    }
}

impl Terminal for DryRunTerminal {
    fn create_window(&mut self, command: &str, title: &str) -> Result<PaneHandle> {
        let pane = self.next_handle();
        self.record(Operation::CreateWindow {
            pane: pane.clone(),
            command: command.to_string(),
            title: title.to_string(),
        })?;
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
        let pane = self.next_handle();
        self.record(Operation::SplitPane {
            existing: existing.clone(),
            orientation,
            percent,
            pane: pane.clone(),
            command: command.to_string(),
            title: title.to_string(),
        })?;
        Ok(pane)
    }

    fn set_broadcast_groups(&mut self, groups: &[Vec<PaneHandle>]) -> Result<()> {
        self.record(Operation::SetBroadcastGroups(groups.to_vec()))
    }

    fn arrange_evenly(&mut self) -> Result<()> {
        self.record(Operation::ArrangeEvenly)
    }

    fn activate_pane(&mut self, pane: &PaneHandle) -> Result<()> {
        self.record(Operation::ActivatePane(pane.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_handles_are_sequential() {
        let mut term = DryRunTerminal::new();
        let a = term.create_window("ssh a", "a").unwrap();
        let b = term
            .split_pane(&a, Orientation::Vertical, 50, "ssh b", "b")
            .unwrap();
        assert_eq!(a.as_str(), "%0");
        assert_eq!(b.as_str(), "%1");
    }

    #[test]
    fn test_describe() {
        let op = Operation::SplitPane {
            existing: PaneHandle::new("%0"),
            orientation: Orientation::Horizontal,
            percent: 66,
            pane: PaneHandle::new("%1"),
            command: "ssh b".into(),
            title: "b".into(),
        };
        assert_eq!(describe(&op), "split-pane -h -l 66% %0 -> %1 [b] ssh b");
        assert_eq!(
            describe(&Operation::SetBroadcastGroups(vec![vec![
                PaneHandle::new("%0"),
                PaneHandle::new("%2"),
            ]])),
            "broadcast %0,%2"
        );
    }

    #[test]
    fn test_failing_after() {
        let mut term = DryRunTerminal::failing_after(1);
        assert!(term.arrange_evenly().is_ok());
        assert!(matches!(
            term.arrange_evenly(),
            Err(GridError::CapabilityUnavailable(_))
        ));
        assert_eq!(term.operations().len(), 1);
    }
}
