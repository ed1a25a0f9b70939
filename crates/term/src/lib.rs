//! Terminal rendering layer.
//!
//! A small game-oriented renderer: the view draws a snapshot into a
//! [`Canvas`] of styled characters and [`TerminalRenderer`] flushes canvases to
//! the terminal, writing only what changed. Each grid cell is drawn
//! `CELL_WIDTH` columns wide to compensate for the glyph aspect ratio.

pub mod canvas;
pub mod renderer;
pub mod view;

pub use blockfall_core as core;
pub use blockfall_types as types;

pub use canvas::{Canvas, Glyph, Rgb, Style};
pub use renderer::{encode_diff_into, encode_full_into, TerminalRenderer};
pub use view::{Button, GameView, Layout, Rect, Viewport};
