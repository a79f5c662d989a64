//! Input broadcasting across session panes.

use crate::error::{GridError, Result};
use crate::grid::BroadcastSet;
use crate::terminal::Terminal;
use tracing::debug;

/// Register `sessions` as one broadcast group, even out the grid, and focus
/// the first session pane.
///
/// The group is all session panes or nothing; spacers are never part of it.
pub fn enable<T: Terminal>(sessions: &BroadcastSet, terminal: &mut T) -> Result<()> {
    let first = sessions.first().ok_or(GridError::NoDestinations)?;

    debug!(panes = sessions.len(), "enabling broadcast group");
    terminal.set_broadcast_groups(&[sessions.handles().to_vec()])?;
    terminal.arrange_evenly()?;
    terminal.activate_pane(first)?;

    Ok(())
}
