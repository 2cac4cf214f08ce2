//! Edge treatment applied after a step has been fully combined.

use crate::grid::GridField;

/// What happens to the outermost rows and columns after each step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum BoundaryPolicy {
    /// Zero-gradient edges: each border copies its adjacent interior line.
    #[default]
    Neumann,
    /// Leave the toroidal result as computed.
    Periodic,
}

impl BoundaryPolicy {
    pub fn apply<T: Copy>(self, field: &mut GridField<T>) {
        match self {
            BoundaryPolicy::Neumann => apply_neumann(field),
            BoundaryPolicy::Periodic => {}
        }
    }
}

/// Overwrites row 0 with row 1, row `H-1` with row `H-2`, then column 0 with
/// column 1 and column `W-1` with column `W-2`.
///
/// Axes shorter than two cells have no interior line and are left alone.
pub fn apply_neumann<T: Copy>(field: &mut GridField<T>) {
    let (width, height) = (field.width(), field.height());
    let cells = field.as_mut_slice();

    if height >= 2 {
        cells.copy_within(width..2 * width, 0);
        cells.copy_within((height - 2) * width..(height - 1) * width, (height - 1) * width);
    }

    if width >= 2 {
        for row in cells.chunks_exact_mut(width) {
            row[0] = row[1];
            row[width - 1] = row[width - 2];
        }
    }
}
