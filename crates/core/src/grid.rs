//! Grid module - the playfield of locked cells
//!
//! The grid is a fixed 10x20 matrix where each cell is empty or holds the color
//! of the piece that locked into it. Storage is a flat row-major array, so the
//! grid never allocates and its dimensions cannot change after construction.
//!
//! Coordinates: (x, y) where x ranges 0..9 (left to right), y ranges 0..19 (top to bottom).

use crate::types::{Cell, Color, GRID_COLS, GRID_ROWS};

const COLS: usize = GRID_COLS as usize;
const ROWS: usize = GRID_ROWS as usize;

/// Total number of cells on the grid
const GRID_SIZE: usize = COLS * ROWS;

/// The playfield - 10 columns x 20 rows using flat array storage
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Grid {
    /// Flat array of cells, row-major order (y * COLS + x)
    cells: [Cell; GRID_SIZE],
}

impl Grid {
    /// Create a new empty grid
    pub fn new() -> Self {
        Self {
            cells: [None; GRID_SIZE],
        }
    }

    #[inline(always)]
    fn index(x: i8, y: i8) -> Option<usize> {
        if !Self::in_bounds(x, y) {
            return None;
        }
        Some((y as usize) * COLS + (x as usize))
    }

    #[inline(always)]
    fn in_bounds(x: i8, y: i8) -> bool {
        x >= 0 && (x as usize) < COLS && y >= 0 && (y as usize) < ROWS
    }

    pub fn width(&self) -> u8 {
        GRID_COLS
    }

    pub fn height(&self) -> u8 {
        GRID_ROWS
    }

    /// Get cell at position (x, y)
    /// Returns None if out of bounds
    pub fn get(&self, x: i8, y: i8) -> Option<Cell> {
        Self::index(x, y).map(|idx| self.cells[idx])
    }

    /// Set cell at position (x, y)
    /// Returns false if out of bounds
    pub fn set(&mut self, x: i8, y: i8, cell: Cell) -> bool {
        match Self::index(x, y) {
            Some(idx) => {
                self.cells[idx] = cell;
                true
            }
            None => false,
        }
    }

    /// Check if a position blocks a piece.
    ///
    /// Out-of-bounds positions count as occupied, so a single query covers
    /// both wall and stack collisions.
    pub fn is_occupied(&self, x: i8, y: i8) -> bool {
        !matches!(self.get(x, y), Some(None))
    }

    /// Write `color` into every given cell.
    ///
    /// Cells are expected to have passed a collision check; out-of-bounds
    /// coordinates are skipped.
    pub fn lock(&mut self, cells: &[(i8, i8)], color: Color) {
        for &(x, y) in cells {
            self.set(x, y, Some(color));
        }
    }

    /// Check if a row is completely filled
    pub fn is_row_full(&self, y: usize) -> bool {
        self.row(y)
            .map(|row| row.iter().all(|cell| cell.is_some()))
            .unwrap_or(false)
    }

    /// Check if a row has no filled cell
    pub fn is_row_empty(&self, y: usize) -> bool {
        self.row(y)
            .map(|row| row.iter().all(|cell| cell.is_none()))
            .unwrap_or(false)
    }

    /// Borrow one row of cells
    pub fn row(&self, y: usize) -> Option<&[Cell]> {
        if y >= ROWS {
            return None;
        }
        let start = y * COLS;
        Some(&self.cells[start..start + COLS])
    }

    /// Remove every full row and return how many were removed.
    ///
    /// Rows are scanned bottom to top. Each full row is dropped, the rows above
    /// it shift down by one, and an empty row appears at the top. Non-full rows
    /// keep their relative order. Single compacting pass with a read cursor
    /// and a write cursor.
    pub fn clear_full_rows(&mut self) -> usize {
        let mut cleared = 0;
        let mut write_y = ROWS;

        for read_y in (0..ROWS).rev() {
            if self.is_row_full(read_y) {
                cleared += 1;
                continue;
            }
            write_y -= 1;
            if write_y != read_y {
                let src = read_y * COLS;
                self.cells.copy_within(src..src + COLS, write_y * COLS);
            }
        }

        // Everything above the write cursor is the freshly inserted empty rows.
        self.cells[..write_y * COLS].fill(None);
        cleared
    }

    /// Reset every cell to empty
    pub fn clear(&mut self) {
        self.cells.fill(None);
    }

    /// Number of filled cells
    pub fn filled_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_some()).count()
    }

    /// Get a reference to the internal cells array (row-major)
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Copy the grid into a row-major 2D array (used by snapshots)
    pub fn write_rows(&self, out: &mut [[Cell; COLS]; ROWS]) {
        for (y, row) in out.iter_mut().enumerate() {
            let start = y * COLS;
            row.copy_from_slice(&self.cells[start..start + COLS]);
        }
    }

    /// Build a grid from an ASCII picture, one string per row from the top.
    ///
    /// `.` (or space) is empty; any other character is filled with `color`.
    /// Missing rows at the top are empty, so short pictures describe the
    /// bottom of the grid. Returns None if the picture does not fit.
    pub fn from_ascii(rows: &[&str], color: Color) -> Option<Self> {
        if rows.len() > ROWS {
            return None;
        }
        let mut grid = Self::new();
        let offset = ROWS - rows.len();
        for (i, line) in rows.iter().enumerate() {
            if line.chars().count() > COLS {
                return None;
            }
            for (x, ch) in line.chars().enumerate() {
                if ch != '.' && ch != ' ' {
                    grid.set(x as i8, (offset + i) as i8, Some(color));
                }
            }
        }
        Some(grid)
    }
}

impl Default for Grid {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fill_row(grid: &mut Grid, y: i8, color: Color) {
        for x in 0..GRID_COLS as i8 {
            grid.set(x, y, Some(color));
        }
    }

    #[test]
    fn test_grid_index_calculation() {
        assert_eq!(Grid::index(0, 0), Some(0));
        assert_eq!(Grid::index(9, 0), Some(9));
        assert_eq!(Grid::index(0, 1), Some(10));
        assert_eq!(Grid::index(9, 19), Some(199));
        assert_eq!(Grid::index(-1, 0), None);
        assert_eq!(Grid::index(10, 0), None);
        assert_eq!(Grid::index(0, 20), None);
    }

    #[test]
    fn test_out_of_bounds_is_occupied() {
        let grid = Grid::new();
        assert!(grid.is_occupied(-1, 5));
        assert!(grid.is_occupied(10, 5));
        assert!(grid.is_occupied(3, 20));
        assert!(!grid.is_occupied(3, 19));
    }

    #[test]
    fn test_lock_writes_color() {
        let mut grid = Grid::new();
        grid.lock(&[(0, 19), (1, 19)], Color::Red);
        assert_eq!(grid.get(0, 19), Some(Some(Color::Red)));
        assert_eq!(grid.get(1, 19), Some(Some(Color::Red)));
        assert_eq!(grid.filled_count(), 2);
    }

    #[test]
    fn test_clear_adjacent_full_rows() {
        let mut grid = Grid::new();
        fill_row(&mut grid, 18, Color::Cyan);
        fill_row(&mut grid, 19, Color::Yellow);
        grid.set(0, 17, Some(Color::Purple));

        assert_eq!(grid.clear_full_rows(), 2);
        assert_eq!(grid.get(0, 19), Some(Some(Color::Purple)));
        assert_eq!(grid.filled_count(), 1);
    }

    #[test]
    fn test_clear_full_rows_on_empty_grid() {
        let mut grid = Grid::new();
        assert_eq!(grid.clear_full_rows(), 0);
        assert_eq!(grid, Grid::new());
    }

    #[test]
    fn test_clear_entire_grid() {
        let mut grid = Grid::new();
        for y in 0..GRID_ROWS as i8 {
            fill_row(&mut grid, y, Color::Blue);
        }
        assert_eq!(grid.clear_full_rows(), GRID_ROWS as usize);
        assert_eq!(grid.filled_count(), 0);
    }

    #[test]
    fn test_from_ascii_aligns_to_bottom() {
        let grid = Grid::from_ascii(&["#.........", "##########"], Color::Green).unwrap();
        assert!(grid.is_row_full(19));
        assert_eq!(grid.get(0, 18), Some(Some(Color::Green)));
        assert_eq!(grid.get(1, 18), Some(None));
        assert!(grid.is_row_empty(17));

        assert!(Grid::from_ascii(&["###########"], Color::Green).is_none());
    }

    #[test]
    fn test_write_rows() {
        let mut grid = Grid::new();
        grid.set(4, 7, Some(Color::Orange));
        let mut rows = [[None; COLS]; ROWS];
        grid.write_rows(&mut rows);
        assert_eq!(rows[7][4], Some(Color::Orange));
        assert_eq!(rows[7][5], None);
    }
}
