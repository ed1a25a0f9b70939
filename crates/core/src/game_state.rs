//! Game state module - the engine that owns the grid and the active piece
//!
//! The engine is tick-driven and single-threaded: the presentation loop calls
//! [`GameState::tick`] with the elapsed time and forwards discrete commands
//! (move, rotate, soft drop, pause, restart) as they happen.
//!
//! Two named timers drive the falling piece:
//! - the **gravity** timer fires every `fall_interval_ms` (500ms at level 1)
//! - the **soft-drop** timer fires every `SOFT_DROP_INTERVAL_MS` while soft drop is held
//!
//! Both feed the same step: move down one row, or lock when the piece cannot
//! move. A tick applies at most one step no matter how many timers are due,
//! and any step restarts both timers.

use crate::grid::Grid;
use crate::pieces::Piece;
use crate::rng::{PieceSource, RandomPieces};
use crate::scoring::{fall_interval_ms, score_lock};
use crate::snapshot::{ActiveSnapshot, GameSnapshot};
use crate::types::*;

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState<S = RandomPieces> {
    grid: Grid,
    active: Piece,
    source: S,
    status: GameStatus,
    score: u32,
    lines: u32,
    level: u32,
    fall_interval_ms: u32,
    soft_drop: bool,
    gravity_elapsed_ms: u32,
    soft_drop_elapsed_ms: u32,
    /// Monotonic spawn counter (reset on restart)
    pieces_spawned: u32,
    /// Last lock event (consumed by observers)
    last_event: Option<LockEvent>,
}

impl GameState<RandomPieces> {
    /// Create a new game with uniformly random pieces from `seed`
    pub fn new(seed: u64) -> Self {
        Self::with_source(RandomPieces::seeded(seed))
    }
}

impl<S: PieceSource> GameState<S> {
    /// Start a game on an empty grid with the given piece source
    pub fn with_source(source: S) -> Self {
        Self::with_grid(Grid::new(), source)
    }

    /// Start a game on a prepared grid.
    ///
    /// The first piece is spawned immediately; if it collides with the
    /// prepared cells the game starts in `GameOver`.
    pub fn with_grid(grid: Grid, mut source: S) -> Self {
        let active = Piece::new(source.next_kind());
        let mut state = Self {
            grid,
            active,
            source,
            status: GameStatus::Running,
            score: 0,
            lines: 0,
            level: START_LEVEL,
            fall_interval_ms: fall_interval_ms(START_LEVEL),
            soft_drop: false,
            gravity_elapsed_ms: 0,
            soft_drop_elapsed_ms: 0,
            pieces_spawned: 1,
            last_event: None,
        };
        if state.active.collides(&state.grid, 0, 0) {
            state.status = GameStatus::GameOver;
        }
        state
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn active(&self) -> &Piece {
        &self.active
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn paused(&self) -> bool {
        self.status == GameStatus::Paused
    }

    pub fn game_over(&self) -> bool {
        self.status == GameStatus::GameOver
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn lines(&self) -> u32 {
        self.lines
    }

    pub fn fall_interval_ms(&self) -> u32 {
        self.fall_interval_ms
    }

    pub fn soft_drop(&self) -> bool {
        self.soft_drop
    }

    pub fn gravity_elapsed_ms(&self) -> u32 {
        self.gravity_elapsed_ms
    }

    pub fn soft_drop_elapsed_ms(&self) -> u32 {
        self.soft_drop_elapsed_ms
    }

    pub fn pieces_spawned(&self) -> u32 {
        self.pieces_spawned
    }

    /// Take and clear the last lock event.
    pub fn take_last_event(&mut self) -> Option<LockEvent> {
        self.last_event.take()
    }

    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        self.grid.write_rows(&mut out.grid);
        out.active = Some(ActiveSnapshot::from(&self.active));
        out.score = self.score;
        out.level = self.level;
        out.lines = self.lines;
        out.fall_interval_ms = self.fall_interval_ms;
        out.status = self.status;
        out.soft_drop = self.soft_drop;
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut s = GameSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }

    /// Replace the active piece with a fresh one from the source.
    ///
    /// Returns false when the new piece collides at its spawn position; the
    /// game is then over. The colliding piece stays active so it can still be
    /// drawn on top of the stack.
    fn spawn_piece(&mut self) -> bool {
        self.active = Piece::new(self.source.next_kind());
        self.pieces_spawned = self.pieces_spawned.wrapping_add(1);

        if self.active.collides(&self.grid, 0, 0) {
            self.status = GameStatus::GameOver;
            self.soft_drop = false;
            return false;
        }
        true
    }

    /// Advance the fall timers by `elapsed_ms`.
    ///
    /// Returns true when a downward step (move or lock) was applied. Only a
    /// running game advances; zero or negative elapsed time is a no-op.
    pub fn tick(&mut self, elapsed_ms: i64) -> bool {
        if self.status != GameStatus::Running || elapsed_ms <= 0 {
            return false;
        }
        let elapsed = u32::try_from(elapsed_ms).unwrap_or(u32::MAX);

        self.gravity_elapsed_ms = self.gravity_elapsed_ms.saturating_add(elapsed);
        if self.soft_drop {
            self.soft_drop_elapsed_ms = self.soft_drop_elapsed_ms.saturating_add(elapsed);
        }

        let gravity_due = self.gravity_elapsed_ms >= self.fall_interval_ms;
        let soft_drop_due = self.soft_drop && self.soft_drop_elapsed_ms >= SOFT_DROP_INTERVAL_MS;
        if !gravity_due && !soft_drop_due {
            return false;
        }

        self.gravity_elapsed_ms = 0;
        self.soft_drop_elapsed_ms = 0;
        self.step_down();
        true
    }

    /// Move the piece down one row, locking it if it cannot move.
    fn step_down(&mut self) {
        if !self.active.try_move(&self.grid, 0, 1) {
            self.lock_piece();
        }
    }

    /// Lock the active piece, clear full rows, score, and spawn the next piece
    fn lock_piece(&mut self) {
        self.active.lock(&mut self.grid);
        let cleared = self.grid.clear_full_rows() as u32;

        let result = score_lock(cleared, self.lines);
        self.score = self.score.saturating_add(result.points);
        self.lines = result.total_lines;
        self.level = result.level;
        self.fall_interval_ms = result.fall_interval_ms;

        let topped_out = !self.spawn_piece();
        let event = LockEvent {
            lines_cleared: cleared,
            points: result.points,
            level_up: result.level_up,
            topped_out,
        };
        self.last_event = Some(event);
    }

    fn playable(&self) -> bool {
        self.status == GameStatus::Running
    }

    pub fn move_left(&mut self) -> bool {
        self.playable() && self.active.try_move(&self.grid, -1, 0)
    }

    pub fn move_right(&mut self) -> bool {
        self.playable() && self.active.try_move(&self.grid, 1, 0)
    }

    /// Rotate clockwise; rejected (shape unchanged) when the result would collide
    pub fn rotate(&mut self) -> bool {
        self.playable() && self.active.try_rotate(&self.grid)
    }

    /// Hold or release soft drop.
    ///
    /// Holding only takes effect while running; releasing is always accepted
    /// so a key released during pause does not leave the flag stuck.
    pub fn set_soft_drop(&mut self, held: bool) {
        if held {
            if self.playable() && !self.soft_drop {
                self.soft_drop = true;
                self.soft_drop_elapsed_ms = 0;
            }
        } else {
            self.soft_drop = false;
            self.soft_drop_elapsed_ms = 0;
        }
    }

    /// Toggle Running/Paused. Timers keep their accumulated time.
    ///
    /// Returns false (no change) once the game is over.
    pub fn toggle_pause(&mut self) -> bool {
        self.status = match self.status {
            GameStatus::Running => GameStatus::Paused,
            GameStatus::Paused => GameStatus::Running,
            GameStatus::GameOver => return false,
        };
        true
    }

    /// Start over: empty grid, initial score/lines/level/interval, fresh piece.
    ///
    /// The piece source keeps its position, so a restart continues the
    /// sequence instead of replaying it.
    pub fn restart(&mut self) {
        self.grid.clear();
        self.status = GameStatus::Running;
        self.score = 0;
        self.lines = 0;
        self.level = START_LEVEL;
        self.fall_interval_ms = fall_interval_ms(START_LEVEL);
        self.soft_drop = false;
        self.gravity_elapsed_ms = 0;
        self.soft_drop_elapsed_ms = 0;
        self.pieces_spawned = 0;
        self.last_event = None;
        self.spawn_piece();
    }

    /// Apply a game action
    pub fn apply_action(&mut self, action: GameAction) -> bool {
        match action {
            GameAction::MoveLeft => self.move_left(),
            GameAction::MoveRight => self.move_right(),
            GameAction::Rotate => self.rotate(),
            GameAction::SetSoftDrop(held) => {
                self.set_soft_drop(held);
                self.soft_drop == held
            }
            GameAction::Pause => self.toggle_pause(),
            GameAction::Restart => {
                self.restart();
                true
            }
        }
    }
}

impl Default for GameState<RandomPieces> {
    fn default() -> Self {
        Self::new(1)
    }
}
