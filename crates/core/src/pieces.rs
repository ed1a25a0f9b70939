//! Pieces module - tetromino shape matrices, rotation and the active piece
//!
//! A shape is a small boolean matrix (at most 4x4). Rotation is a pure
//! transform of that matrix: no rotation states, no wall kicks. A rotated
//! shape is only committed when it fits at the current anchor.

use arrayvec::ArrayVec;

use crate::grid::Grid;
use crate::types::{Color, PieceKind, GRID_COLS};

/// Largest side of any shape matrix
pub const MAX_SHAPE_DIM: usize = 4;

/// Absolute grid cells covered by a piece
pub type PieceCells = ArrayVec<(i8, i8), 16>;

/// Fixed shape table, indexed by `PieceKind::index()`.
const SHAPE_TABLE: [Shape; 7] = [
    Shape::build(4, 1, [[1, 1, 1, 1], [0; 4], [0; 4], [0; 4]]),
    Shape::build(3, 2, [[1, 1, 1, 0], [0, 1, 0, 0], [0; 4], [0; 4]]),
    Shape::build(3, 2, [[1, 1, 0, 0], [0, 1, 1, 0], [0; 4], [0; 4]]),
    Shape::build(3, 2, [[0, 1, 1, 0], [1, 1, 0, 0], [0; 4], [0; 4]]),
    Shape::build(2, 2, [[1, 1, 0, 0], [1, 1, 0, 0], [0; 4], [0; 4]]),
    Shape::build(3, 2, [[1, 1, 1, 0], [0, 0, 1, 0], [0; 4], [0; 4]]),
    Shape::build(3, 2, [[1, 1, 1, 0], [1, 0, 0, 0], [0; 4], [0; 4]]),
];

/// Rectangular boolean cell matrix.
///
/// Only the top-left `height x width` corner of `cells` is meaningful; the
/// rest stays `false` so equality compares patterns, not padding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Shape {
    width: u8,
    height: u8,
    cells: [[bool; MAX_SHAPE_DIM]; MAX_SHAPE_DIM],
}

impl Shape {
    const fn build(width: u8, height: u8, rows: [[u8; MAX_SHAPE_DIM]; MAX_SHAPE_DIM]) -> Self {
        let mut cells = [[false; MAX_SHAPE_DIM]; MAX_SHAPE_DIM];
        let mut r = 0;
        while r < MAX_SHAPE_DIM {
            let mut c = 0;
            while c < MAX_SHAPE_DIM {
                cells[r][c] = rows[r][c] != 0;
                c += 1;
            }
            r += 1;
        }
        Self {
            width,
            height,
            cells,
        }
    }

    /// Build a shape from rows of 0/1 values.
    ///
    /// Returns None for empty, ragged or oversized input.
    pub fn from_rows(rows: &[&[u8]]) -> Option<Self> {
        let height = rows.len();
        let width = rows.first()?.len();
        if height > MAX_SHAPE_DIM || width == 0 || width > MAX_SHAPE_DIM {
            return None;
        }

        let mut cells = [[false; MAX_SHAPE_DIM]; MAX_SHAPE_DIM];
        for (r, row) in rows.iter().enumerate() {
            if row.len() != width {
                return None;
            }
            for (c, &v) in row.iter().enumerate() {
                cells[r][c] = v != 0;
            }
        }

        Some(Self {
            width: width as u8,
            height: height as u8,
            cells,
        })
    }

    /// The spawn shape of a kind.
    pub fn of(kind: PieceKind) -> Self {
        SHAPE_TABLE[kind.index()]
    }

    pub fn width(&self) -> u8 {
        self.width
    }

    pub fn height(&self) -> u8 {
        self.height
    }

    pub fn is_filled(&self, col: usize, row: usize) -> bool {
        row < self.height as usize && col < self.width as usize && self.cells[row][col]
    }

    /// Offsets (col, row) of the filled cells, row-major.
    pub fn filled(&self) -> impl Iterator<Item = (i8, i8)> + '_ {
        (0..self.height as usize).flat_map(move |r| {
            (0..self.width as usize)
                .filter(move |&c| self.cells[r][c])
                .map(move |c| (c as i8, r as i8))
        })
    }

    /// Rotate 90° clockwise.
    ///
    /// New row `i` is old column `i` read bottom to top, so the result is
    /// `height` wide and `width` tall.
    pub fn rotated_cw(&self) -> Self {
        let (w, h) = (self.width as usize, self.height as usize);
        let mut cells = [[false; MAX_SHAPE_DIM]; MAX_SHAPE_DIM];
        for (i, new_row) in cells.iter_mut().enumerate().take(w) {
            for (j, cell) in new_row.iter_mut().enumerate().take(h) {
                *cell = self.cells[h - 1 - j][i];
            }
        }
        Self {
            width: self.height,
            height: self.width,
            cells,
        }
    }

    /// Render as rows of 0/1, mostly for assertions.
    pub fn to_rows(&self) -> Vec<Vec<u8>> {
        (0..self.height as usize)
            .map(|r| {
                (0..self.width as usize)
                    .map(|c| self.cells[r][c] as u8)
                    .collect()
            })
            .collect()
    }
}

/// Spawn anchor for a shape: horizontally centered, top row.
pub fn spawn_position(shape: &Shape) -> (i8, i8) {
    let x = (GRID_COLS / 2) as i8 - (shape.width() / 2) as i8;
    (x, 0)
}

/// Whether `shape` anchored at (x, y) hits a wall, the floor or a locked cell.
pub fn shape_collides(grid: &Grid, shape: &Shape, x: i8, y: i8) -> bool {
    shape
        .filled()
        .any(|(dx, dy)| grid.is_occupied(x + dx, y + dy))
}

/// The active falling piece.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    pub kind: PieceKind,
    pub shape: Shape,
    pub x: i8,
    pub y: i8,
}

impl Piece {
    /// Create a piece of `kind` at its spawn position
    pub fn new(kind: PieceKind) -> Self {
        let shape = Shape::of(kind);
        let (x, y) = spawn_position(&shape);
        Self { kind, shape, x, y }
    }

    pub fn color(&self) -> Color {
        self.kind.color()
    }

    /// Absolute grid coordinates of the filled cells
    pub fn cells(&self) -> PieceCells {
        self.shape
            .filled()
            .map(|(dx, dy)| (self.x + dx, self.y + dy))
            .collect()
    }

    /// Would the piece collide after translating by (dx, dy)?
    pub fn collides(&self, grid: &Grid, dx: i8, dy: i8) -> bool {
        shape_collides(grid, &self.shape, self.x + dx, self.y + dy)
    }

    /// Translate by (dx, dy) if the destination is free.
    pub fn try_move(&mut self, grid: &Grid, dx: i8, dy: i8) -> bool {
        if self.collides(grid, dx, dy) {
            return false;
        }
        self.x += dx;
        self.y += dy;
        true
    }

    /// The clockwise-rotated shape, if it fits at the current anchor.
    pub fn rotation_candidate(&self, grid: &Grid) -> Option<Shape> {
        let rotated = self.shape.rotated_cw();
        (!shape_collides(grid, &rotated, self.x, self.y)).then_some(rotated)
    }

    /// Rotate clockwise in place; a blocked rotation leaves the piece untouched.
    pub fn try_rotate(&mut self, grid: &Grid) -> bool {
        match self.rotation_candidate(grid) {
            Some(shape) => {
                self.shape = shape;
                true
            }
            None => false,
        }
    }

    /// Write this piece's color into the grid.
    pub fn lock(&self, grid: &mut Grid) {
        grid.lock(&self.cells(), self.color());
    }
}
