//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the workspace.
//! All types are pure data with no external dependencies, so they can be used
//! by the game core, the input layer and the terminal view alike.
//!
//! # Grid Dimensions
//!
//! - **Columns**: 10 (indexed 0-9, left to right)
//! - **Rows**: 20 (indexed 0-19, top to bottom)
//!
//! # Timing Constants
//!
//! Timing values are in milliseconds:
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `TICK_MS` | 16 | Frame tick used by the terminal loop (~60 FPS) |
//! | `BASE_FALL_INTERVAL_MS` | 500 | Gravity interval at level 1 |
//! | `FALL_INTERVAL_STEP_MS` | 50 | Interval reduction per level |
//! | `MIN_FALL_INTERVAL_MS` | 50 | Gravity never gets faster than this |
//! | `SOFT_DROP_INTERVAL_MS` | 50 | Fast-drop cadence while soft drop is held |
//! | `KEY_RELEASE_TIMEOUT_MS` | 150 | Held-key timeout for terminals without release events |
//!
//! # Examples
//!
//! ```
//! use blockfall_types::{Color, PieceKind, GRID_COLS, GRID_ROWS};
//!
//! assert_eq!(PieceKind::I.color(), Color::Cyan);
//! assert_eq!(PieceKind::L.index(), 6);
//!
//! assert_eq!(GRID_COLS, 10);
//! assert_eq!(GRID_ROWS, 20);
//! ```

/// Grid width in cells (10 columns)
pub const GRID_COLS: u8 = 10;

/// Grid height in cells (20 rows)
pub const GRID_ROWS: u8 = 20;

/// Terminal columns used to draw one grid cell.
///
/// 2x1 compensates for the usual terminal glyph aspect ratio.
pub const CELL_WIDTH: u16 = 2;

/// Terminal rows used to draw one grid cell.
pub const CELL_HEIGHT: u16 = 1;

/// Frame tick interval in milliseconds (16ms ≈ 60 FPS)
pub const TICK_MS: u32 = 16;

/// Gravity interval at level 1
pub const BASE_FALL_INTERVAL_MS: u32 = 500;

/// Gravity interval reduction per level gained
pub const FALL_INTERVAL_STEP_MS: u32 = 50;

/// Lower clamp for the gravity interval
pub const MIN_FALL_INTERVAL_MS: u32 = 50;

/// Fast-drop cadence while soft drop is held
pub const SOFT_DROP_INTERVAL_MS: u32 = 50;

/// Lines needed per level
pub const LINES_PER_LEVEL: u32 = 10;

/// Points awarded per cleared line
pub const POINTS_PER_LINE: u32 = 50;

/// Level at game start
pub const START_LEVEL: u32 = 1;

/// How long a held key survives without a repeat/release on terminals that
/// never report key releases.
pub const KEY_RELEASE_TIMEOUT_MS: u32 = 150;

/// Colors a locked cell or piece can carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Color {
    Cyan,
    Purple,
    Red,
    Green,
    Yellow,
    Orange,
    Blue,
}

impl Color {
    /// 24-bit color used by the terminal view.
    pub fn rgb(&self) -> (u8, u8, u8) {
        match self {
            Color::Cyan => (80, 220, 220),
            Color::Purple => (170, 90, 220),
            Color::Red => (220, 80, 80),
            Color::Green => (100, 220, 120),
            Color::Yellow => (240, 220, 80),
            Color::Orange => (255, 165, 0),
            Color::Blue => (80, 120, 230),
        }
    }
}

/// The seven tetromino kinds.
///
/// Declaration order is the order of the fixed shape table:
/// - **I**: Cyan, horizontal bar
/// - **T**: Purple
/// - **Z**: Red
/// - **S**: Green (mirror of Z)
/// - **O**: Yellow, 2x2 square
/// - **J**: Orange
/// - **L**: Blue (mirror of J)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    I,
    T,
    Z,
    S,
    O,
    J,
    L,
}

impl PieceKind {
    /// All kinds in table order.
    pub const ALL: [PieceKind; 7] = [
        PieceKind::I,
        PieceKind::T,
        PieceKind::Z,
        PieceKind::S,
        PieceKind::O,
        PieceKind::J,
        PieceKind::L,
    ];

    pub fn index(&self) -> usize {
        match self {
            PieceKind::I => 0,
            PieceKind::T => 1,
            PieceKind::Z => 2,
            PieceKind::S => 3,
            PieceKind::O => 4,
            PieceKind::J => 5,
            PieceKind::L => 6,
        }
    }

    /// Fixed color of this kind.
    pub fn color(&self) -> Color {
        match self {
            PieceKind::I => Color::Cyan,
            PieceKind::T => Color::Purple,
            PieceKind::Z => Color::Red,
            PieceKind::S => Color::Green,
            PieceKind::O => Color::Yellow,
            PieceKind::J => Color::Orange,
            PieceKind::L => Color::Blue,
        }
    }
}

/// A cell on the grid
///
/// - `None`: Empty cell
/// - `Some(Color)`: Locked cell carrying the color of the piece that filled it
pub type Cell = Option<Color>;

/// Discrete commands the presentation/input layer issues to the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameAction {
    /// Move piece one cell left
    MoveLeft,
    /// Move piece one cell right
    MoveRight,
    /// Rotate piece 90° clockwise
    Rotate,
    /// Hold (`true`) or release (`false`) soft drop
    SetSoftDrop(bool),
    /// Toggle pause state
    Pause,
    /// Restart the game from scratch
    Restart,
}

/// Engine state machine.
///
/// `GameOver` is terminal; only a restart leaves it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum GameStatus {
    #[default]
    Running,
    Paused,
    GameOver,
}

/// Recorded after a piece locks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LockEvent {
    pub lines_cleared: u32,
    pub points: u32,
    pub level_up: bool,
    /// Whether the following spawn collided (the game ended on this lock).
    pub topped_out: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timing_defaults() {
        assert_eq!(BASE_FALL_INTERVAL_MS, 500);
        assert_eq!(FALL_INTERVAL_STEP_MS, 50);
        assert_eq!(SOFT_DROP_INTERVAL_MS, 50);
        assert!(MIN_FALL_INTERVAL_MS > 0);
    }

    #[test]
    fn kind_table_order_and_colors() {
        let colors: Vec<Color> = PieceKind::ALL.iter().map(|k| k.color()).collect();
        assert_eq!(
            colors,
            [
                Color::Cyan,
                Color::Purple,
                Color::Red,
                Color::Green,
                Color::Yellow,
                Color::Orange,
                Color::Blue
            ]
        );
        for (i, kind) in PieceKind::ALL.iter().enumerate() {
            assert_eq!(kind.index(), i);
        }
    }

    #[test]
    fn colors_are_distinct() {
        for (i, a) in PieceKind::ALL.iter().enumerate() {
            for b in &PieceKind::ALL[i + 1..] {
                assert_ne!(a.color().rgb(), b.color().rgb());
            }
        }
    }

    #[test]
    fn status_defaults_to_running() {
        assert_eq!(GameStatus::default(), GameStatus::Running);
    }
}
