//! Pane orchestration.
//!
//! Builds the session grid one split at a time. Because a [`Terminal`] can
//! only split panes that already exist, the order is fixed:
//!
//! 1. Create the window with the first command (row 0, column 0).
//! 2. Fill row 0 by splitting the previous column's pane horizontally.
//! 3. For each later row, split the bottom pane of every column vertically,
//!    running the next command or, once they run out, a spacer.
//!
//! Each split hands the new pane everything but one cell's worth of the pane
//! being split, so every row and column ends up the same size and the
//! terminal never has to rearrange the grid.
//!
//! Created panes live in an arena indexed by creation order; a per-column
//! tail index tracks the bottom pane of each column.

use crate::error::{GridError, Result};
use crate::layout::LayoutPlan;
use crate::ssh::LaunchCommand;
use crate::terminal::{Orientation, PaneHandle, Terminal};
use tracing::debug;

/// Command run in cells that have no destination.
pub const SPACER_COMMAND: &str = "cat >/dev/null";

/// Title given to spacer panes.
pub const SPACER_TITLE: &str = "spacer";

/// What a pane is for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaneRole {
    /// Runs a launch command and receives broadcast input.
    Session,
    /// Placeholder that keeps the grid rectangular.
    Spacer,
}

/// A pane created while building the grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pane {
    /// Terminal handle.
    pub handle: PaneHandle,
    /// Session or spacer.
    pub role: PaneRole,
    /// Grid row, 0-based.
    pub row: u32,
    /// Grid column, 0-based.
    pub column: u32,
}

/// The finished grid: every pane in creation order.
#[derive(Debug, Clone)]
pub struct Grid {
    panes: Vec<Pane>,
}

/// Session panes that form the input broadcast group, in creation order.
///
/// Only obtainable from [`Grid::sessions`], so it never holds a spacer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BroadcastSet(Vec<PaneHandle>);

impl BroadcastSet {
    /// The session pane handles.
    pub fn handles(&self) -> &[PaneHandle] {
        &self.0
    }

    /// First session pane, the one to focus.
    pub fn first(&self) -> Option<&PaneHandle> {
        self.0.first()
    }

    /// Number of session panes.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True if there are no session panes.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Grid {
    /// All panes in creation order.
    pub fn panes(&self) -> &[Pane] {
        &self.panes
    }

    /// The very first pane (row 0, column 0).
    pub fn first(&self) -> &PaneHandle {
        &self.panes[0].handle
    }

    /// Session panes for broadcasting.
    pub fn sessions(&self) -> BroadcastSet {
        BroadcastSet(
            self.panes
                .iter()
                .filter(|p| p.role == PaneRole::Session)
                .map(|p| p.handle.clone())
                .collect(),
        )
    }

    /// Number of spacer panes.
    pub fn spacer_count(&self) -> usize {
        self.panes
            .iter()
            .filter(|p| p.role == PaneRole::Spacer)
            .count()
    }
}

/// Create every pane of the grid through `terminal`.
///
/// `commands` are consumed in order; cells past the last command run
/// `spacer_command`. The first terminal failure aborts the run and the
/// partially built window is left as is.
///
/// # Errors
///
/// - [`GridError::NoDestinations`] if `commands` is empty
/// - [`GridError::LayoutTooSmall`] if `plan` has fewer cells than commands
/// - whatever the terminal returns
pub fn build_grid<T: Terminal>(
    terminal: &mut T,
    commands: &[LaunchCommand],
    plan: LayoutPlan,
    spacer_command: &str,
) -> Result<Grid> {
    let first = commands.first().ok_or(GridError::NoDestinations)?;
    if (plan.cells() as usize) < commands.len() {
        return Err(GridError::LayoutTooSmall {
            cells: plan.cells(),
            destinations: commands.len(),
        });
    }

    let mut pending = commands[1..].iter();
    let mut panes: Vec<Pane> = Vec::with_capacity(plan.cells() as usize);
    let mut column_tails: Vec<usize> = Vec::with_capacity(plan.columns as usize);

    let handle = terminal.create_window(&first.command, &first.title)?;
    debug!(pane = %handle, title = %first.title, "created window");
    panes.push(Pane {
        handle,
        role: PaneRole::Session,
        row: 0,
        column: 0,
    });
    column_tails.push(0);

    for column in 1..plan.columns {
        let left = &panes[column_tails[column as usize - 1]].handle;
        let (role, command, title) = next_cell(&mut pending, spacer_command);
        let percent = split_share(plan.columns - column + 1);
        let handle =
            terminal.split_pane(left, Orientation::Horizontal, percent, command, title)?;
        debug!(pane = %handle, row = 0, column, percent, ?role, "split beside");
        panes.push(Pane {
            handle,
            role,
            row: 0,
            column,
        });
        column_tails.push(panes.len() - 1);
    }

    for row in 1..plan.rows {
        for column in 0..plan.columns {
            let above = &panes[column_tails[column as usize]].handle;
            let (role, command, title) = next_cell(&mut pending, spacer_command);
            let percent = split_share(plan.rows - row + 1);
            let handle =
                terminal.split_pane(above, Orientation::Vertical, percent, command, title)?;
            debug!(pane = %handle, row, column, percent, ?role, "split below");
            panes.push(Pane {
                handle,
                role,
                row,
                column,
            });
            column_tails[column as usize] = panes.len() - 1;
        }
    }

    Ok(Grid { panes })
}

/// Share of a pane to give away when it currently spans `remaining` grid
/// cells and must keep exactly one of them.
fn split_share(remaining: u32) -> u32 {
    100 * (remaining - 1) / remaining
}

fn next_cell<'r, 'c: 'r>(
    pending: &mut std::slice::Iter<'c, LaunchCommand>,
    spacer_command: &'r str,
) -> (PaneRole, &'r str, &'r str) {
    match pending.next() {
        Some(cmd) => (PaneRole::Session, &cmd.command, &cmd.title),
        None => (PaneRole::Spacer, spacer_command, SPACER_TITLE),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dry_run::{DryRunTerminal, Operation};
    use crate::layout::plan;
    use std::collections::HashMap;

    fn commands(n: usize) -> Vec<LaunchCommand> {
        (0..n)
            .map(|i| LaunchCommand {
                title: format!("host{}", i),
                command: format!("ssh host{}", i),
            })
            .collect()
    }

    #[test]
    fn test_single_destination() {
        let mut term = DryRunTerminal::new();
        let grid = build_grid(&mut term, &commands(1), plan(1, None), SPACER_COMMAND).unwrap();
        assert_eq!(grid.panes().len(), 1);
        assert_eq!(grid.sessions().len(), 1);
        assert_eq!(grid.first(), &PaneHandle::new("%0"));
        assert_eq!(
            term.operations(),
            &[Operation::CreateWindow {
                pane: PaneHandle::new("%0"),
                command: "ssh host0".into(),
                title: "host0".into(),
            }]
        );
    }

    #[test]
    fn test_pane_counts() {
        for n in 1..=30usize {
            let p = plan(n as u32, None);
            let mut term = DryRunTerminal::new();
            let grid = build_grid(&mut term, &commands(n), p, SPACER_COMMAND).unwrap();
            assert_eq!(grid.panes().len() as u32, p.cells());
            assert_eq!(grid.sessions().len(), n);
            assert_eq!(grid.spacer_count(), p.cells() as usize - n);
            assert_eq!(term.operations().len() as u32, p.cells());
        }
    }

    #[test]
    fn test_broadcast_set_excludes_spacers() {
        let mut term = DryRunTerminal::new();
        let grid = build_grid(&mut term, &commands(5), plan(5, None), SPACER_COMMAND).unwrap();
        let spacers: Vec<_> = grid
            .panes()
            .iter()
            .filter(|p| p.role == PaneRole::Spacer)
            .map(|p| p.handle.clone())
            .collect();
        assert_eq!(spacers.len(), 1);
        assert!(grid.sessions().handles().iter().all(|h| !spacers.contains(h)));
    }

    #[test]
    fn test_row_zero_is_all_sessions() {
        for n in 1..=30usize {
            let mut term = DryRunTerminal::new();
            let grid =
                build_grid(&mut term, &commands(n), plan(n as u32, None), SPACER_COMMAND).unwrap();
            assert!(
                grid.panes()
                    .iter()
                    .filter(|p| p.row == 0)
                    .all(|p| p.role == PaneRole::Session)
            );
        }
    }

    #[test]
    fn test_split_order_for_five() {
        // 2 columns x 3 rows, one spacer at the bottom right.
        let mut term = DryRunTerminal::new();
        build_grid(&mut term, &commands(5), plan(5, None), SPACER_COMMAND).unwrap();

        let splits: Vec<(String, Orientation, u32, String)> = term
            .operations()
            .iter()
            .filter_map(|op| match op {
                Operation::SplitPane {
                    existing,
                    orientation,
                    percent,
                    command,
                    ..
                } => Some((existing.to_string(), *orientation, *percent, command.clone())),
                _ => None,
            })
            .collect();

        assert_eq!(
            splits,
            vec![
                ("%0".into(), Orientation::Horizontal, 50, "ssh host1".into()),
                ("%0".into(), Orientation::Vertical, 66, "ssh host2".into()),
                ("%1".into(), Orientation::Vertical, 66, "ssh host3".into()),
                ("%2".into(), Orientation::Vertical, 50, "ssh host4".into()),
                ("%3".into(), Orientation::Vertical, 50, SPACER_COMMAND.into()),
            ]
        );
    }

    #[test]
    fn test_commands_follow_grid_order() {
        let mut term = DryRunTerminal::new();
        let grid = build_grid(&mut term, &commands(9), plan(9, None), SPACER_COMMAND).unwrap();
        let coords: Vec<(u32, u32)> = grid.panes().iter().map(|p| (p.row, p.column)).collect();
        assert_eq!(
            coords,
            vec![(0, 0), (0, 1), (0, 2), (1, 0), (1, 1), (1, 2), (2, 0), (2, 1), (2, 2)]
        );
    }

    #[test]
    fn test_hinted_layout_fills_remainder_with_spacers() {
        let mut term = DryRunTerminal::new();
        let grid = build_grid(&mut term, &commands(10), plan(10, Some(3)), SPACER_COMMAND).unwrap();
        assert_eq!(grid.panes().len(), 12);
        assert_eq!(grid.spacer_count(), 2);
        let last_row: Vec<PaneRole> = grid
            .panes()
            .iter()
            .filter(|p| p.row == 3)
            .map(|p| p.role)
            .collect();
        assert_eq!(last_row, vec![PaneRole::Session, PaneRole::Spacer, PaneRole::Spacer]);
    }

    #[test]
    fn test_empty_commands() {
        let mut term = DryRunTerminal::new();
        assert!(matches!(
            build_grid(&mut term, &[], plan(1, None), SPACER_COMMAND),
            Err(GridError::NoDestinations)
        ));
        assert!(term.operations().is_empty());
    }

    #[test]
    fn test_layout_too_small() {
        let mut term = DryRunTerminal::new();
        let layout = LayoutPlan { columns: 2, rows: 1 };
        assert!(matches!(
            build_grid(&mut term, &commands(3), layout, SPACER_COMMAND),
            Err(GridError::LayoutTooSmall { cells: 2, destinations: 3 })
        ));
        assert!(term.operations().is_empty());
    }

    #[test]
    fn test_terminal_failure_aborts() {
        let mut term = DryRunTerminal::failing_after(3);
        let result = build_grid(&mut term, &commands(6), plan(6, None), SPACER_COMMAND);
        assert!(matches!(result, Err(GridError::CapabilityUnavailable(_))));
        assert_eq!(term.operations().len(), 3);
    }

    #[derive(Debug, Clone, Copy)]
    struct Rect {
        x: u32,
        y: u32,
        w: u32,
        h: u32,
    }

    /// Replay the recorded splits the way tmux sizes them: the new pane gets
    /// `size * percent / 100`, the old one keeps the rest minus a border.
    fn replay(ops: &[Operation], width: u32, height: u32) -> HashMap<PaneHandle, Rect> {
        let mut rects = HashMap::new();
        for op in ops {
            match op {
                Operation::CreateWindow { pane, .. } => {
                    rects.insert(pane.clone(), Rect { x: 0, y: 0, w: width, h: height });
                }
                Operation::SplitPane {
                    existing,
                    orientation,
                    percent,
                    pane,
                    ..
                } => {
                    let old = rects[existing];
                    let (kept, new) = match orientation {
                        Orientation::Horizontal => {
                            let size = old.w * percent / 100;
                            assert!(size >= 1 && old.w > size + 1, "no space for new pane");
                            let kept = Rect { w: old.w - size - 1, ..old };
                            (kept, Rect { x: old.x + kept.w + 1, w: size, ..old })
                        }
                        Orientation::Vertical => {
                            let size = old.h * percent / 100;
                            assert!(size >= 1 && old.h > size + 1, "no space for new pane");
                            let kept = Rect { h: old.h - size - 1, ..old };
                            (kept, Rect { y: old.y + kept.h + 1, h: size, ..old })
                        }
                    };
                    rects.insert(existing.clone(), kept);
                    rects.insert(pane.clone(), new);
                }
                _ => {}
            }
        }
        rects
    }

    fn assert_even_grid(count: u32, hint: Option<u32>, width: u32, height: u32) {
        let layout = plan(count, hint);
        let mut term = DryRunTerminal::new();
        let grid =
            build_grid(&mut term, &commands(count as usize), layout, SPACER_COMMAND).unwrap();
        let rects = replay(term.operations(), width, height);

        let mut lefts: Vec<u32> = rects.values().map(|r| r.x).collect();
        let mut tops: Vec<u32> = rects.values().map(|r| r.y).collect();
        lefts.sort();
        lefts.dedup();
        tops.sort();
        tops.dedup();
        assert_eq!(lefts.len() as u32, layout.columns);
        assert_eq!(tops.len() as u32, layout.rows);

        for pane in grid.panes() {
            let rect = rects[&pane.handle];
            assert_eq!(lefts[pane.column as usize], rect.x, "{:?}", pane);
            assert_eq!(tops[pane.row as usize], rect.y, "{:?}", pane);
        }

        let widths: Vec<u32> = rects.values().map(|r| r.w).collect();
        let heights: Vec<u32> = rects.values().map(|r| r.h).collect();
        assert!(widths.iter().max().unwrap() - widths.iter().min().unwrap() <= 2);
        assert!(heights.iter().max().unwrap() - heights.iter().min().unwrap() <= 2);
    }

    #[test]
    fn test_grid_geometry_matches_plan() {
        assert_even_grid(3, None, 80, 23);
        assert_even_grid(5, None, 80, 23);
        assert_even_grid(10, Some(2), 80, 23);
        assert_even_grid(25, None, 160, 47);
        assert_even_grid(30, None, 200, 59);
    }

    #[test]
    fn test_split_share() {
        assert_eq!(split_share(2), 50);
        assert_eq!(split_share(3), 66);
        assert_eq!(split_share(5), 80);
    }
}
