//! Grid layout planning.
//!
//! The grid is kept close to square: the column count never exceeds the
//! integer square root of the destination count, and rows are the minimum
//! needed to hold every destination. Cells left over in the last row become
//! spacer panes.

use tracing::debug;

/// Column and row counts for the session grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LayoutPlan {
    /// Number of columns, at least 1.
    pub columns: u32,
    /// Number of rows, at least 1.
    pub rows: u32,
}

impl LayoutPlan {
    /// Total number of grid cells.
    pub fn cells(&self) -> u32 {
        self.columns * self.rows
    }
}

/// Compute the grid for `count` destinations.
///
/// A `column_hint` is honored only when it is between 1 and the natural
/// column count (`isqrt(count)`); larger hints are ignored.
///
/// # Examples
///
/// ```
/// use sshgrid::layout::{plan, LayoutPlan};
///
/// assert_eq!(plan(10, None), LayoutPlan { columns: 3, rows: 4 });
/// assert_eq!(plan(10, Some(2)), LayoutPlan { columns: 2, rows: 5 });
/// assert_eq!(plan(10, Some(5)), LayoutPlan { columns: 3, rows: 4 });
/// ```
pub fn plan(count: u32, column_hint: Option<u32>) -> LayoutPlan {
    let count = count.max(1);
    let natural = count.isqrt().max(1);

    let columns = match column_hint {
        Some(hint) if (1..=natural).contains(&hint) => hint,
        Some(hint) => {
            debug!(hint, natural, "column hint exceeds square root, ignoring");
            natural
        }
        None => natural,
    };
    let rows = count.div_ceil(columns);

    debug!(count, columns, rows, "planned layout");
    LayoutPlan { columns, rows }
}
