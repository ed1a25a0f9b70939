//! Terminal input module (engine-facing).
//!
//! Maps `crossterm` key events into [`crate::types::GameAction`] values and
//! tracks held keys so that horizontal moves fire once per press and soft drop
//! follows the Down key. Terminals that never report key releases are handled
//! with a release timeout.

pub mod handler;
pub mod map;

pub use blockfall_types as types;

pub use handler::InputHandler;
pub use map::{handle_key_event, should_quit};
