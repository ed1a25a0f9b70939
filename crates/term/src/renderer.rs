//! TerminalRenderer: flushes a canvas to a real terminal.
//!
//! Frames are diffed against the previous one and only changed runs are
//! written. `enter`/`exit` own the terminal modes (raw mode, alternate screen,
//! mouse capture, key-release reporting where the terminal supports it).

use std::io::{self, Write};

use anyhow::Result;

use crossterm::{
    cursor,
    event::{
        DisableMouseCapture, EnableMouseCapture, KeyboardEnhancementFlags,
        PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    style::{
        Attribute, Color, Print, ResetColor, SetAttribute, SetBackgroundColor, SetForegroundColor,
    },
    terminal, QueueableCommand,
};

use crate::canvas::{Canvas, Rgb, Style};

pub struct TerminalRenderer {
    stdout: io::Stdout,
    last: Option<Canvas>,
    buf: Vec<u8>,
    mouse: bool,
    keyboard_enhanced: bool,
}

impl TerminalRenderer {
    pub fn new(mouse: bool) -> Self {
        Self {
            stdout: io::stdout(),
            last: None,
            buf: Vec::with_capacity(64 * 1024),
            mouse,
            keyboard_enhanced: false,
        }
    }

    /// Whether the terminal reports key releases.
    pub fn reports_key_release(&self) -> bool {
        self.keyboard_enhanced
    }

    pub fn enter(&mut self) -> Result<()> {
        terminal::enable_raw_mode()?;
        self.keyboard_enhanced = terminal::supports_keyboard_enhancement().unwrap_or(false);

        self.buf.clear();
        self.buf.queue(terminal::EnterAlternateScreen)?;
        self.buf.queue(cursor::Hide)?;
        self.buf.queue(terminal::DisableLineWrap)?;
        if self.mouse {
            self.buf.queue(EnableMouseCapture)?;
        }
        if self.keyboard_enhanced {
            self.buf.queue(PushKeyboardEnhancementFlags(
                KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
            ))?;
        }
        self.flush_buf()?;
        Ok(())
    }

    pub fn exit(&mut self) -> Result<()> {
        self.buf.clear();
        if self.keyboard_enhanced {
            self.buf.queue(PopKeyboardEnhancementFlags)?;
        }
        if self.mouse {
            self.buf.queue(DisableMouseCapture)?;
        }
        self.buf.queue(ResetColor)?;
        self.buf.queue(SetAttribute(Attribute::Reset))?;
        self.buf.queue(terminal::EnableLineWrap)?;
        self.buf.queue(cursor::Show)?;
        self.buf.queue(terminal::LeaveAlternateScreen)?;
        self.flush_buf()?;
        terminal::disable_raw_mode()?;
        Ok(())
    }

    /// Force the next draw to be a full redraw (e.g. after a resize).
    pub fn invalidate(&mut self) {
        self.last = None;
    }

    /// Draw a canvas, swapping it into internal state.
    ///
    /// Callers keep one `Canvas` and pass it every frame; after the call it
    /// holds the previous frame and can be redrawn without reallocating.
    pub fn draw_swap(&mut self, canvas: &mut Canvas) -> Result<()> {
        self.buf.clear();
        let mut prev = match self.last.take() {
            Some(prev) if prev.width() == canvas.width() && prev.height() == canvas.height() => {
                encode_diff_into(&prev, canvas, &mut self.buf)?;
                prev
            }
            other => {
                encode_full_into(canvas, &mut self.buf)?;
                let mut prev = other.unwrap_or_else(|| Canvas::new(0, 0));
                prev.resize(canvas.width(), canvas.height());
                prev
            }
        };
        self.flush_buf()?;

        std::mem::swap(&mut prev, canvas);
        self.last = Some(prev);
        Ok(())
    }

    fn flush_buf(&mut self) -> Result<()> {
        self.stdout.write_all(&self.buf)?;
        self.stdout.flush()?;
        Ok(())
    }
}

/// Encode a full-frame redraw into `out`.
pub fn encode_full_into(canvas: &Canvas, out: &mut Vec<u8>) -> Result<()> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;

    let mut current_style: Option<Style> = None;
    for y in 0..canvas.height() {
        out.queue(cursor::MoveTo(0, y))?;
        for x in 0..canvas.width() {
            let glyph = canvas.get(x, y).unwrap_or_default();
            if current_style != Some(glyph.style) {
                apply_style_into(out, glyph.style)?;
                current_style = Some(glyph.style);
            }
            out.queue(Print(glyph.ch))?;
        }
    }

    out.queue(ResetColor)?;
    out.queue(SetAttribute(Attribute::Reset))?;
    Ok(())
}

/// Encode only the runs that changed between `prev` and `next` into `out`.
pub fn encode_diff_into(prev: &Canvas, next: &Canvas, out: &mut Vec<u8>) -> Result<()> {
    let mut current_style: Option<Style> = None;

    for_each_changed_run(prev, next, |x, y, len| {
        out.queue(cursor::MoveTo(x, y))?;
        for dx in 0..len {
            let glyph = next.get(x + dx, y).unwrap_or_default();
            if current_style != Some(glyph.style) {
                apply_style_into(out, glyph.style)?;
                current_style = Some(glyph.style);
            }
            out.queue(Print(glyph.ch))?;
        }
        Ok(())
    })?;

    if current_style.is_some() {
        out.queue(ResetColor)?;
        out.queue(SetAttribute(Attribute::Reset))?;
    }
    Ok(())
}

fn apply_style_into(out: &mut Vec<u8>, style: Style) -> Result<()> {
    out.queue(SetAttribute(Attribute::Reset))?;
    out.queue(SetForegroundColor(rgb_to_color(style.fg)))?;
    out.queue(SetBackgroundColor(rgb_to_color(style.bg)))?;
    if style.bold {
        out.queue(SetAttribute(Attribute::Bold))?;
    }
    if style.dim {
        out.queue(SetAttribute(Attribute::Dim))?;
    }
    Ok(())
}

fn rgb_to_color(rgb: Rgb) -> Color {
    Color::Rgb {
        r: rgb.r,
        g: rgb.g,
        b: rgb.b,
    }
}

/// Calls `f(x, y, len)` for each horizontal run of differing glyphs.
/// Canvases of different sizes are treated as fully changed.
fn for_each_changed_run(
    prev: &Canvas,
    next: &Canvas,
    mut f: impl FnMut(u16, u16, u16) -> Result<()>,
) -> Result<()> {
    if prev.width() != next.width() || prev.height() != next.height() {
        for y in 0..next.height() {
            f(0, y, next.width())?;
        }
        return Ok(());
    }

    let w = next.width();
    for y in 0..next.height() {
        let mut x = 0;
        while x < w {
            if prev.get(x, y) == next.get(x, y) {
                x += 1;
                continue;
            }
            let start = x;
            while x < w && prev.get(x, y) != next.get(x, y) {
                x += 1;
            }
            f(start, y, x - start)?;
        }
    }

    Ok(())
}
