use crate::pieces::{Piece, PieceCells};
use crate::scoring::fall_interval_ms;
use crate::types::{Cell, Color, GameStatus, PieceKind, GRID_COLS, GRID_ROWS, START_LEVEL};

/// Color grid as rows from the top
pub type GridRows = [[Cell; GRID_COLS as usize]; GRID_ROWS as usize];

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ActiveSnapshot {
    pub kind: PieceKind,
    pub color: Color,
    pub x: i8,
    pub y: i8,
    pub width: u8,
    pub height: u8,
    /// Absolute grid cells
    pub cells: PieceCells,
}

impl From<&Piece> for ActiveSnapshot {
    fn from(value: &Piece) -> Self {
        Self {
            kind: value.kind,
            color: value.color(),
            x: value.x,
            y: value.y,
            width: value.shape.width(),
            height: value.shape.height(),
            cells: value.cells(),
        }
    }
}

/// Read-only view of everything the presentation layer draws.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct GameSnapshot {
    pub grid: GridRows,
    pub active: Option<ActiveSnapshot>,
    pub score: u32,
    pub level: u32,
    pub lines: u32,
    pub fall_interval_ms: u32,
    pub status: GameStatus,
    pub soft_drop: bool,
}

impl GameSnapshot {
    pub fn paused(&self) -> bool {
        self.status == GameStatus::Paused
    }

    pub fn game_over(&self) -> bool {
        self.status == GameStatus::GameOver
    }

    pub fn playable(&self) -> bool {
        self.status == GameStatus::Running
    }

    /// Color at (x, y) with the active piece drawn over the locked cells.
    pub fn composed_cell(&self, x: i8, y: i8) -> Cell {
        if let Some(active) = &self.active {
            if active.cells.contains(&(x, y)) {
                return Some(active.color);
            }
        }
        if x < 0 || y < 0 {
            return None;
        }
        self.grid
            .get(y as usize)
            .and_then(|row| row.get(x as usize))
            .copied()
            .flatten()
    }
}

impl Default for GameSnapshot {
    fn default() -> Self {
        Self {
            grid: [[None; GRID_COLS as usize]; GRID_ROWS as usize],
            active: None,
            score: 0,
            level: START_LEVEL,
            lines: 0,
            fall_interval_ms: fall_interval_ms(START_LEVEL),
            status: GameStatus::Running,
            soft_drop: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_composed_cell_prefers_active_piece() {
        let mut snap = GameSnapshot::default();
        snap.grid[19][0] = Some(Color::Red);
        snap.active = Some(ActiveSnapshot::from(&Piece::new(PieceKind::O)));

        assert_eq!(snap.composed_cell(4, 0), Some(Color::Yellow));
        assert_eq!(snap.composed_cell(0, 19), Some(Color::Red));
        assert_eq!(snap.composed_cell(0, 0), None);
        assert_eq!(snap.composed_cell(-1, 0), None);
        assert_eq!(snap.composed_cell(0, 20), None);
    }

    #[test]
    fn test_default_matches_fresh_game() {
        let snap = GameSnapshot::default();
        assert_eq!(snap.level, START_LEVEL);
        assert_eq!(snap.level, 1);
        assert_eq!(snap.fall_interval_ms, 500);
        assert_eq!(snap.status, GameStatus::Running);
        assert!(snap.active.is_none());

        let mut fresh = GameSnapshot::default();
        crate::GameState::new(3).snapshot_into(&mut fresh);
        assert_eq!(fresh.level, snap.level);
        assert_eq!(fresh.fall_interval_ms, snap.fall_interval_ms);
        assert_eq!(fresh.score, snap.score);
        assert_eq!(fresh.lines, snap.lines);
    }
}
