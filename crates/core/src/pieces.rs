//! Pieces module - shape matrices and clockwise rotation
//!
//! Every piece is a square N×N occupancy matrix (N = 2 for O, 4 for I, 3 for
//! the rest). Rotation turns the whole matrix about its own center, so the
//! padding rows/columns keep pieces roughly in place without re-centering.
//! There are no kick tables: a rotation either fits where it is or is
//! rejected by the caller.

use crate::types::{PieceKind, BOARD_WIDTH};

/// Largest matrix side in the catalog (the I piece).
pub const MAX_SHAPE_SIZE: usize = 4;

/// Square occupancy matrix of a piece in its local frame.
///
/// Storage is a fixed 4×4 array; cells outside `size × size` are always
/// `false`, so derived equality compares shapes exactly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ShapeMatrix {
    size: u8,
    rows: [[bool; MAX_SHAPE_SIZE]; MAX_SHAPE_SIZE],
}

impl ShapeMatrix {
    /// Build an N×N matrix from 0/1 rows.
    ///
    /// # Panics
    ///
    /// Panics if N is 0 or larger than 4. The catalog only feeds it
    /// constants.
    pub fn from_rows<const N: usize>(rows: [[u8; N]; N]) -> Self {
        assert!(
            (1..=MAX_SHAPE_SIZE).contains(&N),
            "shape size {} out of range",
            N
        );

        let mut out = [[false; MAX_SHAPE_SIZE]; MAX_SHAPE_SIZE];
        for (y, row) in rows.iter().enumerate() {
            for (x, &v) in row.iter().enumerate() {
                out[y][x] = v != 0;
            }
        }

        Self {
            size: N as u8,
            rows: out,
        }
    }

    /// Side length N.
    pub fn size(&self) -> u8 {
        self.size
    }

    /// Occupancy at local column `x`, row `y`. Out of range reads as empty.
    pub fn get(&self, x: usize, y: usize) -> bool {
        x < self.size as usize && y < self.size as usize && self.rows[y][x]
    }

    /// Occupied cells as local `(x, y)` offsets, row-major.
    pub fn cells(&self) -> impl Iterator<Item = (i8, i8)> + '_ {
        let n = self.size as usize;
        (0..n).flat_map(move |y| {
            (0..n).filter_map(move |x| self.rows[y][x].then_some((x as i8, y as i8)))
        })
    }

    /// Number of occupied cells.
    pub fn cell_count(&self) -> usize {
        self.cells().count()
    }

    /// Rotate 90° clockwise about the matrix center.
    ///
    /// Returns a new matrix with `out[x][n-1-y] = self[y][x]`; `self` is
    /// untouched. Four turns give back the input.
    pub fn rotate_cw(&self) -> Self {
        let n = self.size as usize;
        let mut out = [[false; MAX_SHAPE_SIZE]; MAX_SHAPE_SIZE];
        for y in 0..n {
            for x in 0..n {
                out[x][n - 1 - y] = self.rows[y][x];
            }
        }
        Self {
            size: self.size,
            rows: out,
        }
    }
}

/// Free-function form of [`ShapeMatrix::rotate_cw`].
pub fn rotate_cw(shape: &ShapeMatrix) -> ShapeMatrix {
    shape.rotate_cw()
}

/// Get the canonical spawn-orientation matrix for a piece kind
pub fn shape_of(kind: PieceKind) -> ShapeMatrix {
    match kind {
        PieceKind::I => ShapeMatrix::from_rows([
            [0, 0, 0, 0],
            [1, 1, 1, 1],
            [0, 0, 0, 0],
            [0, 0, 0, 0],
        ]),
        PieceKind::O => ShapeMatrix::from_rows([[1, 1], [1, 1]]),
        PieceKind::T => ShapeMatrix::from_rows([[0, 1, 0], [1, 1, 1], [0, 0, 0]]),
        PieceKind::S => ShapeMatrix::from_rows([[0, 1, 1], [1, 1, 0], [0, 0, 0]]),
        PieceKind::Z => ShapeMatrix::from_rows([[1, 1, 0], [0, 1, 1], [0, 0, 0]]),
        PieceKind::J => ShapeMatrix::from_rows([[1, 0, 0], [1, 1, 1], [0, 0, 0]]),
        PieceKind::L => ShapeMatrix::from_rows([[0, 0, 1], [1, 1, 1], [0, 0, 0]]),
    }
}

/// Horizontal spawn column for a matrix of the given side: `floor((W - N) / 2)`.
pub fn spawn_x(size: u8) -> i8 {
    ((BOARD_WIDTH - size) / 2) as i8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_sizes() {
        assert_eq!(shape_of(PieceKind::I).size(), 4);
        assert_eq!(shape_of(PieceKind::O).size(), 2);
        for kind in [PieceKind::T, PieceKind::S, PieceKind::Z, PieceKind::J, PieceKind::L] {
            assert_eq!(shape_of(kind).size(), 3, "{:?}", kind);
        }
    }

    #[test]
    fn test_every_piece_has_four_cells() {
        for kind in PieceKind::ALL {
            assert_eq!(shape_of(kind).cell_count(), 4, "{:?}", kind);
        }
    }

    #[test]
    fn test_t_rotates_pointing_right() {
        let east = shape_of(PieceKind::T).rotate_cw();
        assert_eq!(
            east,
            ShapeMatrix::from_rows([[0, 1, 0], [0, 1, 1], [0, 1, 0]])
        );
    }

    #[test]
    fn test_i_rotates_to_vertical_column_two() {
        let vertical = shape_of(PieceKind::I).rotate_cw();
        let cells: Vec<_> = vertical.cells().collect();
        assert_eq!(cells, vec![(2, 0), (2, 1), (2, 2), (2, 3)]);
    }

    #[test]
    fn test_rotate_does_not_mutate_input() {
        let s = shape_of(PieceKind::S);
        let before = s;
        let _ = rotate_cw(&s);
        assert_eq!(s, before);
    }

    #[test]
    fn test_spawn_x_centers() {
        assert_eq!(spawn_x(4), 3);
        assert_eq!(spawn_x(3), 3);
        assert_eq!(spawn_x(2), 4);
    }

    #[test]
    fn test_get_out_of_range_is_empty() {
        let o = shape_of(PieceKind::O);
        assert!(o.get(1, 1));
        assert!(!o.get(2, 0));
        assert!(!o.get(0, 3));
    }
}
