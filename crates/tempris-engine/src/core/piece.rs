use super::{
    grid::Grid,
    shape::{ShapeKind, ShapeMatrix},
};

/// The currently falling shape instance: a kind, its current rotation
/// matrix, and a signed anchor position on the grid.
///
/// Pieces are value types: movement and rotation build candidate instances
/// via [`Self::shifted`] and [`Self::rotated_clockwise`], and the session
/// commits a candidate only after checking it against the grid. A rejected
/// candidate is simply dropped, so failed moves leave no observable change.
///
/// # Example
///
/// ```
/// use tempris_engine::{ActivePiece, Grid, ShapeKind};
///
/// let grid = Grid::new(20, 10);
/// let piece = ActivePiece::spawn(ShapeKind::T, grid.cols());
/// let dropped = piece.shifted(1, 0);
/// assert!(!grid.is_colliding(&dropped));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActivePiece {
    kind: ShapeKind,
    matrix: ShapeMatrix,
    row: i32,
    col: i32,
}

impl ActivePiece {
    /// Creates a piece at spawn position: anchor on the top row,
    /// horizontally centered (`cols / 2 - width / 2`, integer division).
    #[must_use]
    pub fn spawn(kind: ShapeKind, grid_cols: usize) -> Self {
        let matrix = kind.matrix();
        let cols = i32::try_from(grid_cols).unwrap_or(i32::MAX);
        let width = i32::try_from(matrix.width()).unwrap_or(i32::MAX);
        Self {
            kind,
            matrix,
            row: 0,
            col: cols / 2 - width / 2,
        }
    }

    /// The kind tag this piece locks into the grid.
    #[must_use]
    pub fn kind(&self) -> ShapeKind {
        self.kind
    }

    /// The current rotation matrix.
    #[must_use]
    pub fn matrix(&self) -> &ShapeMatrix {
        &self.matrix
    }

    /// Anchor row of the matrix's top-left corner.
    #[must_use]
    pub fn row(&self) -> i32 {
        self.row
    }

    /// Anchor column of the matrix's top-left corner.
    #[must_use]
    pub fn col(&self) -> i32 {
        self.col
    }

    /// Returns an iterator over the absolute grid coordinates of the
    /// piece's occupied cells, as `(row, col)` pairs.
    pub fn occupied_cells(&self) -> impl Iterator<Item = (i32, i32)> + '_ {
        self.matrix.occupied_offsets().map(|(d_row, d_col)| {
            // Local offsets fit a 4x4 bounding box; the conversion cannot fail.
            let d_row = i32::try_from(d_row).unwrap_or_default();
            let d_col = i32::try_from(d_col).unwrap_or_default();
            (self.row + d_row, self.col + d_col)
        })
    }

    /// Returns the piece shifted by the given row and column deltas.
    #[must_use]
    pub fn shifted(&self, d_row: i32, d_col: i32) -> Self {
        Self {
            kind: self.kind,
            matrix: self.matrix.clone(),
            row: self.row + d_row,
            col: self.col + d_col,
        }
    }

    /// Returns the piece rotated 90 degrees clockwise around the same
    /// anchor. No wall or floor kicks: the caller either accepts the
    /// rotation in place or discards it.
    #[must_use]
    pub fn rotated_clockwise(&self) -> Self {
        Self {
            kind: self.kind,
            matrix: self.matrix.rotated_clockwise(),
            row: self.row,
            col: self.col,
        }
    }
}
