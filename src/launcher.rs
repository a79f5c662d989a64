//! End-to-end launch: destinations in, synchronized grid out.
//!
//! [`prepare`] does everything that cannot fail halfway through a window:
//! it parses every destination, builds the commands, and plans the layout.
//! [`launch`] then drives the terminal.

use crate::broadcast;
use crate::destination;
use crate::error::{GridError, Result};
use crate::grid::{self, Grid};
use crate::layout::{self, LayoutPlan};
use crate::ssh::{self, LaunchCommand, SshDefaults};
use crate::terminal::Terminal;
use tracing::info;

/// Everything needed to build the grid, validated up front.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Launch {
    /// One command per destination, in input order.
    pub commands: Vec<LaunchCommand>,
    /// Grid dimensions.
    pub layout: LayoutPlan,
    /// Command for spacer panes.
    pub spacer: String,
}

/// Parse destinations, build commands, and plan the layout.
///
/// # Errors
///
/// - [`GridError::NoDestinations`] if `destinations` is empty
/// - any destination parse error, before anything is launched
pub fn prepare<S: AsRef<str>>(
    destinations: &[S],
    defaults: &SshDefaults,
    column_hint: Option<u32>,
    spacer: Option<&str>,
) -> Result<Launch> {
    if destinations.is_empty() {
        return Err(GridError::NoDestinations);
    }

    let dests = destination::parse_all(destinations)?;
    let commands = ssh::launch_commands(&dests, defaults);
    let layout = layout::plan(commands.len() as u32, column_hint);

    Ok(Launch {
        commands,
        layout,
        spacer: spacer.unwrap_or(grid::SPACER_COMMAND).to_string(),
    })
}

/// Build the grid and enable broadcasting.
pub fn launch<T: Terminal>(plan: &Launch, terminal: &mut T) -> Result<Grid> {
    let grid = grid::build_grid(terminal, &plan.commands, plan.layout, &plan.spacer)?;
    broadcast::enable(&grid.sessions(), terminal)?;

    info!(
        sessions = plan.commands.len(),
        spacers = grid.spacer_count(),
        columns = plan.layout.columns,
        rows = plan.layout.rows,
        "grid ready"
    );
    Ok(grid)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prepare() {
        let launch = prepare(&["a", "b", "c", "d", "e"], &SshDefaults::new("sh"), None, None).unwrap();
        assert_eq!(launch.commands.len(), 5);
        assert_eq!(launch.layout, LayoutPlan { columns: 2, rows: 3 });
        assert_eq!(launch.spacer, grid::SPACER_COMMAND);
    }

    #[test]
    fn test_prepare_rejects_any_bad_destination() {
        assert!(matches!(
            prepare(&["a", "b:nope"], &SshDefaults::new("sh"), None, None),
            Err(GridError::InvalidPort { .. })
        ));
    }

    #[test]
    fn test_prepare_empty() {
        let none: [&str; 0] = [];
        assert!(matches!(
            prepare(&none, &SshDefaults::new("sh"), None, None),
            Err(GridError::NoDestinations)
        ));
    }
}
