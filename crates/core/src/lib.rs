//! Core game logic - pure, deterministic, and testable
//!
//! Everything here is free of terminal, input, and I/O concerns. The
//! presentation layer feeds elapsed time and commands into [`GameState`] and
//! reads back a [`GameSnapshot`].
//!
//! # Module Structure
//!
//! - [`grid`]: 10x20 grid of locked colored cells, bounds checks and row clearing
//! - [`pieces`]: tetromino shape matrices, clockwise rotation, the active piece
//! - [`rng`]: piece sources (seeded uniform random, scripted sequences)
//! - [`scoring`]: points per line, level and gravity progression
//! - [`game_state`]: the engine: timers, locking, pause and restart
//! - [`snapshot`]: read-only view for rendering
//!
//! # Rules
//!
//! - Seven one-sided tetrominoes, chosen uniformly at random on every spawn
//! - Rotation is clockwise only and is rejected if the result would collide
//! - A piece that cannot move down locks immediately (no lock delay)
//! - Each cleared line is worth 50 points; the level rises every 10 lines
//! - Gravity starts at 500ms and speeds up by 50ms per level, down to 50ms
//!
//! # Example
//!
//! ```
//! use blockfall_core::GameState;
//! use blockfall_core::types::GameAction;
//!
//! let mut game = GameState::new(12345);
//! game.apply_action(GameAction::MoveRight);
//! game.apply_action(GameAction::Rotate);
//!
//! // 500ms of gravity moves the piece down one row.
//! let y = game.active().y;
//! assert!(game.tick(500));
//! assert_eq!(game.active().y, y + 1);
//! ```

pub mod game_state;
pub mod grid;
pub mod pieces;
pub mod rng;
pub mod scoring;
pub mod snapshot;

pub use blockfall_types as types;

pub use game_state::GameState;
pub use grid::Grid;
pub use pieces::{Piece, PieceCells, Shape};
pub use rng::{PieceSource, RandomPieces, SequencePieces};
pub use scoring::{fall_interval_ms, level_for_lines, line_clear_points, score_lock, ScoreResult};
pub use snapshot::{ActiveSnapshot, GameSnapshot};
