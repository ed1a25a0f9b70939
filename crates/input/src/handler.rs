//! Held-key tracking for terminal environments.
//!
//! Left/Right are edge-triggered: a press moves once, and the key has to be
//! released before it moves again. Down is level-triggered: the first press
//! turns soft drop on and the release turns it off.
//!
//! Many terminals never emit release events. For those, a key counts as
//! released once no press or repeat for it has been seen for
//! `KEY_RELEASE_TIMEOUT_MS`. Horizontal keys and Down time out independently.
//! Terminals that do report releases use [`InputHandler::for_terminal`] and
//! get no timeout at all.

use arrayvec::ArrayVec;
use crossterm::event::{KeyCode, KeyEvent};

use crate::map::handle_key_event;
use crate::types::{GameAction, KEY_RELEASE_TIMEOUT_MS};

/// Direction for horizontal movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HorizontalDirection {
    Left,
    Right,
    None,
}

/// Tracks which movement keys are currently held.
#[derive(Debug, Clone)]
pub struct InputHandler {
    horizontal: HorizontalDirection,
    down_held: bool,
    /// Time since the last press/repeat of the held horizontal key
    horizontal_idle_ms: u32,
    /// Time since the last press/repeat of Down
    down_idle_ms: u32,
    /// `None` when the terminal reports key releases
    key_release_timeout_ms: Option<u32>,
}

impl InputHandler {
    pub fn new() -> Self {
        Self {
            horizontal: HorizontalDirection::None,
            down_held: false,
            horizontal_idle_ms: 0,
            down_idle_ms: 0,
            key_release_timeout_ms: Some(KEY_RELEASE_TIMEOUT_MS),
        }
    }

    /// Handler for a terminal that does (or does not) send release events.
    pub fn for_terminal(reports_key_release: bool) -> Self {
        let handler = Self::new();
        if reports_key_release {
            handler.without_key_release_timeout()
        } else {
            handler
        }
    }

    pub fn with_key_release_timeout_ms(mut self, timeout_ms: u32) -> Self {
        self.key_release_timeout_ms = Some(timeout_ms);
        self
    }

    /// Keys stay held until their release event arrives.
    pub fn without_key_release_timeout(mut self) -> Self {
        self.key_release_timeout_ms = None;
        self
    }

    pub fn key_release_timeout_ms(&self) -> Option<u32> {
        self.key_release_timeout_ms
    }

    pub fn horizontal(&self) -> HorizontalDirection {
        self.horizontal
    }

    pub fn down_held(&self) -> bool {
        self.down_held
    }

    /// Handle a key press; returns the action to apply, if any.
    pub fn handle_key_press(&mut self, key: KeyEvent) -> Option<GameAction> {
        match key.code {
            KeyCode::Left => self.press_horizontal(HorizontalDirection::Left),
            KeyCode::Right => self.press_horizontal(HorizontalDirection::Right),
            KeyCode::Down => self.hold_down(),
            _ => handle_key_event(key),
        }
    }

    fn press_horizontal(&mut self, direction: HorizontalDirection) -> Option<GameAction> {
        self.horizontal_idle_ms = 0;
        if self.horizontal == direction {
            return None;
        }
        self.horizontal = direction;
        match direction {
            HorizontalDirection::Left => Some(GameAction::MoveLeft),
            HorizontalDirection::Right => Some(GameAction::MoveRight),
            HorizontalDirection::None => None,
        }
    }

    fn hold_down(&mut self) -> Option<GameAction> {
        self.down_idle_ms = 0;
        if self.down_held {
            return None;
        }
        self.down_held = true;
        Some(GameAction::SetSoftDrop(true))
    }

    /// Handle terminal auto-repeat of a held key.
    ///
    /// A repeat never moves the piece again. A repeat of Down that arrives
    /// after Down timed out turns soft drop back on.
    pub fn handle_key_repeat(&mut self, code: KeyCode) -> Option<GameAction> {
        let direction = match code {
            KeyCode::Left => HorizontalDirection::Left,
            KeyCode::Right => HorizontalDirection::Right,
            KeyCode::Down => return self.hold_down(),
            _ => return None,
        };
        if self.horizontal == HorizontalDirection::None {
            self.horizontal = direction;
        }
        if self.horizontal == direction {
            self.horizontal_idle_ms = 0;
        }
        None
    }

    /// Handle a key release; releasing Down yields `SetSoftDrop(false)`.
    pub fn handle_key_release(&mut self, code: KeyCode) -> Option<GameAction> {
        match code {
            KeyCode::Left if self.horizontal == HorizontalDirection::Left => {
                self.release_horizontal();
                None
            }
            KeyCode::Right if self.horizontal == HorizontalDirection::Right => {
                self.release_horizontal();
                None
            }
            KeyCode::Down if self.down_held => self.release_down(),
            _ => None,
        }
    }

    fn release_horizontal(&mut self) {
        self.horizontal = HorizontalDirection::None;
        self.horizontal_idle_ms = 0;
    }

    fn release_down(&mut self) -> Option<GameAction> {
        self.down_held = false;
        self.down_idle_ms = 0;
        Some(GameAction::SetSoftDrop(false))
    }

    /// Advance the release timeouts by `elapsed_ms`.
    pub fn update(&mut self, elapsed_ms: u32) -> ArrayVec<GameAction, 2> {
        let mut actions = ArrayVec::<GameAction, 2>::new();
        let Some(timeout_ms) = self.key_release_timeout_ms else {
            return actions;
        };

        if self.horizontal != HorizontalDirection::None {
            self.horizontal_idle_ms = self.horizontal_idle_ms.saturating_add(elapsed_ms);
            if self.horizontal_idle_ms > timeout_ms {
                self.release_horizontal();
            }
        }

        if self.down_held {
            self.down_idle_ms = self.down_idle_ms.saturating_add(elapsed_ms);
            if self.down_idle_ms > timeout_ms {
                if let Some(action) = self.release_down() {
                    let _ = actions.try_push(action);
                }
            }
        }

        actions
    }

    /// Forget all held keys (e.g. after a restart).
    pub fn reset(&mut self) {
        self.release_horizontal();
        self.down_held = false;
        self.down_idle_ms = 0;
    }
}

impl Default for InputHandler {
    fn default() -> Self {
        Self::new()
    }
}
