use rand::{Rng, distr::StandardUniform, prelude::Distribution};
use serde::{Deserialize, Serialize};

/// Enum representing the kind of shape.
///
/// The seven tetromino kinds double as the opaque display tag carried by
/// locked grid cells: the engine never interprets them beyond equality, and
/// the frontend maps each kind to whatever style it likes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[repr(u8)]
pub enum ShapeKind {
    /// I-shape.
    I = 0,
    /// O-shape.
    O = 1,
    /// T-shape.
    T = 2,
    /// S-shape.
    S = 3,
    /// Z-shape.
    Z = 4,
    /// J-shape.
    J = 5,
    /// L-shape.
    L = 6,
}

/// Allows drawing a uniformly random shape kind with `rng.random()`.
impl Distribution<ShapeKind> for StandardUniform {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> ShapeKind {
        match rng.random_range(0..=6) {
            0 => ShapeKind::I,
            1 => ShapeKind::O,
            2 => ShapeKind::T,
            3 => ShapeKind::S,
            4 => ShapeKind::Z,
            5 => ShapeKind::J,
            _ => ShapeKind::L,
        }
    }
}

impl ShapeKind {
    /// Number of shape kinds (7).
    pub const LEN: usize = 7;

    /// All shape kinds, in catalog order.
    pub const ALL: [Self; Self::LEN] = [
        ShapeKind::I,
        ShapeKind::O,
        ShapeKind::T,
        ShapeKind::S,
        ShapeKind::Z,
        ShapeKind::J,
        ShapeKind::L,
    ];

    /// Returns the canonical spawn-orientation occupancy matrix of this kind.
    ///
    /// The catalog is a pure lookup: every call builds a fresh matrix, so
    /// rotating the result never affects subsequent lookups.
    #[must_use]
    pub fn matrix(self) -> ShapeMatrix {
        const C: bool = true;
        const E: bool = false;
        let rows: &[&[bool]] = match self {
            ShapeKind::I => &[&[C, C, C, C]],
            ShapeKind::O => &[&[C, C], &[C, C]],
            ShapeKind::T => &[&[E, C, E], &[C, C, C]],
            ShapeKind::S => &[&[E, C, C], &[C, C, E]],
            ShapeKind::Z => &[&[C, C, E], &[E, C, C]],
            ShapeKind::J => &[&[C, E, E], &[C, C, C]],
            ShapeKind::L => &[&[E, E, C], &[C, C, C]],
        };
        ShapeMatrix::from_rows(rows)
    }

    /// Returns the single character representation of this shape kind.
    ///
    /// # Examples
    ///
    /// ```
    /// use tempris_engine::ShapeKind;
    ///
    /// assert_eq!(ShapeKind::I.as_char(), 'I');
    /// assert_eq!(ShapeKind::T.as_char(), 'T');
    /// ```
    #[must_use]
    pub const fn as_char(self) -> char {
        match self {
            ShapeKind::I => 'I',
            ShapeKind::O => 'O',
            ShapeKind::T => 'T',
            ShapeKind::S => 'S',
            ShapeKind::Z => 'Z',
            ShapeKind::J => 'J',
            ShapeKind::L => 'L',
        }
    }

    /// Parses a shape kind from a single character.
    ///
    /// # Examples
    ///
    /// ```
    /// use tempris_engine::ShapeKind;
    ///
    /// assert_eq!(ShapeKind::from_char('S'), Some(ShapeKind::S));
    /// assert_eq!(ShapeKind::from_char('X'), None);
    /// ```
    #[must_use]
    pub const fn from_char(c: char) -> Option<Self> {
        match c {
            'I' => Some(ShapeKind::I),
            'O' => Some(ShapeKind::O),
            'T' => Some(ShapeKind::T),
            'S' => Some(ShapeKind::S),
            'Z' => Some(ShapeKind::Z),
            'J' => Some(ShapeKind::J),
            'L' => Some(ShapeKind::L),
            _ => None,
        }
    }
}

/// Rectangular local-frame occupancy matrix of a shape.
///
/// Invariant: at least one row, and every row has the same non-zero width.
/// The matrix is a value type; [`Self::rotated_clockwise`] returns a new
/// matrix and never mutates the original.
///
/// # Examples
///
/// ```
/// use tempris_engine::ShapeKind;
///
/// let matrix = ShapeKind::I.matrix();
/// assert_eq!((matrix.height(), matrix.width()), (1, 4));
///
/// let rotated = matrix.rotated_clockwise();
/// assert_eq!((rotated.height(), rotated.width()), (4, 1));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShapeMatrix {
    rows: Vec<Vec<bool>>,
}

impl ShapeMatrix {
    fn from_rows(rows: &[&[bool]]) -> Self {
        let rows: Vec<Vec<bool>> = rows.iter().map(|row| row.to_vec()).collect();
        debug_assert!(!rows.is_empty() && !rows[0].is_empty());
        debug_assert!(rows.iter().all(|row| row.len() == rows[0].len()));
        Self { rows }
    }

    /// Number of rows in the local frame.
    #[must_use]
    pub fn height(&self) -> usize {
        self.rows.len()
    }

    /// Number of columns in the local frame.
    #[must_use]
    pub fn width(&self) -> usize {
        self.rows[0].len()
    }

    /// Returns whether the local-frame cell at (row, col) is occupied.
    #[must_use]
    pub fn is_set(&self, row: usize, col: usize) -> bool {
        self.rows[row][col]
    }

    /// Returns an iterator over the occupied local-frame offsets as
    /// `(row, col)` pairs, in row-major order.
    pub fn occupied_offsets(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.rows.iter().enumerate().flat_map(|(d_row, row)| {
            row.iter()
                .enumerate()
                .filter_map(move |(d_col, &cell)| cell.then_some((d_row, d_col)))
        })
    }

    /// Returns the matrix rotated 90 degrees clockwise.
    ///
    /// Transposes the cells and reverses the row order, so the dimensions
    /// swap for non-square matrices. Applying the rotation four times
    /// restores the original matrix bit for bit; square symmetric shapes
    /// such as O come back unchanged after a single turn without any
    /// special-casing.
    #[must_use]
    pub fn rotated_clockwise(&self) -> Self {
        let rows = (0..self.width())
            .map(|col| self.rows.iter().rev().map(|row| row[col]).collect())
            .collect();
        Self { rows }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn occupied_count(matrix: &ShapeMatrix) -> usize {
        matrix.occupied_offsets().count()
    }

    #[test]
    fn test_catalog_patterns() {
        // Every catalog entry is a tetromino: exactly four occupied cells.
        for kind in ShapeKind::ALL {
            assert_eq!(occupied_count(&kind.matrix()), 4, "{kind:?}");
        }

        // Spot-check the literal patterns.
        let i = ShapeKind::I.matrix();
        assert_eq!((i.height(), i.width()), (1, 4));
        assert!((0..4).all(|col| i.is_set(0, col)));

        let t = ShapeKind::T.matrix();
        assert_eq!((t.height(), t.width()), (2, 3));
        assert!(!t.is_set(0, 0) && t.is_set(0, 1) && !t.is_set(0, 2));
        assert!((0..3).all(|col| t.is_set(1, col)));
    }

    #[test]
    fn test_rotation_swaps_dimensions() {
        let i = ShapeKind::I.matrix();
        let rotated = i.rotated_clockwise();
        assert_eq!((rotated.height(), rotated.width()), (4, 1));
        assert!((0..4).all(|row| rotated.is_set(row, 0)));
        assert_eq!(occupied_count(&rotated), 4);
    }

    #[test]
    fn test_rotation_turns_t_nub_to_the_right() {
        // T: nub on top -> after one clockwise turn the nub points right.
        let rotated = ShapeKind::T.matrix().rotated_clockwise();
        assert_eq!((rotated.height(), rotated.width()), (3, 2));
        assert!(rotated.is_set(0, 0) && !rotated.is_set(0, 1));
        assert!(rotated.is_set(1, 0) && rotated.is_set(1, 1));
        assert!(rotated.is_set(2, 0) && !rotated.is_set(2, 1));
    }

    #[test]
    fn test_rotation_round_trip() {
        for kind in ShapeKind::ALL {
            let original = kind.matrix();
            let mut matrix = original.clone();
            for _ in 0..4 {
                matrix = matrix.rotated_clockwise();
            }
            assert_eq!(matrix, original, "{kind:?}");
        }
    }

    #[test]
    fn test_o_is_rotation_invariant() {
        let o = ShapeKind::O.matrix();
        assert_eq!(o.rotated_clockwise(), o);
    }

    #[test]
    fn test_rotation_preserves_cell_count() {
        for kind in ShapeKind::ALL {
            let mut matrix = kind.matrix();
            for _ in 0..4 {
                matrix = matrix.rotated_clockwise();
                assert_eq!(occupied_count(&matrix), 4, "{kind:?}");
            }
        }
    }

    #[test]
    fn test_kind_char_conversion() {
        for kind in ShapeKind::ALL {
            assert_eq!(ShapeKind::from_char(kind.as_char()), Some(kind));
        }
        assert_eq!(ShapeKind::from_char('x'), None);
    }

    #[test]
    fn test_uniform_draws_cover_all_kinds() {
        use rand::SeedableRng as _;

        let mut rng = rand_pcg::Pcg32::from_seed([42; 16]);
        let mut seen = [false; ShapeKind::LEN];
        for _ in 0..200 {
            let kind: ShapeKind = rng.random();
            seen[kind as usize] = true;
        }
        assert!(seen.iter().all(|&s| s), "all kinds should appear: {seen:?}");
    }
}
