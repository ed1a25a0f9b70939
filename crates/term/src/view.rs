//! GameView: lays out and draws a [`GameSnapshot`] onto a [`Canvas`].
//!
//! Pure (no I/O). The playfield sits in a box on the left and the info panel
//! on the right shows score, level, lines and the two clickable buttons. The
//! same layout is used for drawing and for mapping mouse clicks back to
//! buttons, so the two can never disagree.

use crate::canvas::{Canvas, Glyph, Rgb, Style};
use crate::core::GameSnapshot;
use crate::types::{GameAction, GameStatus, CELL_HEIGHT, CELL_WIDTH, GRID_COLS, GRID_ROWS};

/// Panel columns, including the gap after the playfield box.
const PANEL_WIDTH: u16 = 16;
const PANEL_GAP: u16 = 3;
/// Buttons are drawn at a fixed width so their click area is stable.
const BUTTON_WIDTH: u16 = 12;

const FIELD_BG: Rgb = Rgb::new(30, 30, 40);
const SCREEN_BG: Rgb = Rgb::new(0, 0, 0);

/// Terminal viewport dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

/// Screen rectangle in terminal cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rect {
    pub x: u16,
    pub y: u16,
    pub w: u16,
    pub h: u16,
}

impl Rect {
    pub fn contains(&self, column: u16, row: u16) -> bool {
        column >= self.x
            && row >= self.y
            && column < self.x.saturating_add(self.w)
            && row < self.y.saturating_add(self.h)
    }
}

/// Clickable panel buttons.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Button {
    Restart,
    Pause,
}

impl Button {
    /// Label for the current status; Pause reads "Resume" while paused.
    pub fn label(&self, status: GameStatus) -> &'static str {
        match self {
            Button::Restart => "Restart",
            Button::Pause if status == GameStatus::Paused => "Resume",
            Button::Pause => "Pause",
        }
    }

    /// Action for a click. Restart always applies; Pause is ignored once the
    /// game is over.
    pub fn click_action(&self, status: GameStatus) -> Option<GameAction> {
        match self {
            Button::Restart => Some(GameAction::Restart),
            Button::Pause if status == GameStatus::GameOver => None,
            Button::Pause => Some(GameAction::Pause),
        }
    }
}

/// Where everything goes for one viewport size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Layout {
    /// Playfield box including the border
    pub field: Rect,
    pub panel_x: u16,
    pub restart: Rect,
    pub pause: Rect,
}

/// Terminal view of the game.
#[derive(Debug, Clone, Copy)]
pub struct GameView {
    /// Grid cell width in terminal columns.
    cell_w: u16,
    /// Grid cell height in terminal rows.
    cell_h: u16,
}

impl Default for GameView {
    fn default() -> Self {
        Self::new(CELL_WIDTH, CELL_HEIGHT)
    }
}

impl GameView {
    pub fn new(cell_w: u16, cell_h: u16) -> Self {
        Self {
            cell_w: cell_w.max(1),
            cell_h: cell_h.max(1),
        }
    }

    pub fn layout(&self, viewport: Viewport) -> Layout {
        let field_w = GRID_COLS as u16 * self.cell_w + 2;
        let field_h = GRID_ROWS as u16 * self.cell_h + 2;
        let total_w = field_w + PANEL_GAP + PANEL_WIDTH;

        let x = viewport.width.saturating_sub(total_w) / 2;
        let y = viewport.height.saturating_sub(field_h) / 2;
        let panel_x = x + field_w + PANEL_GAP;
        let panel_y = y + 1;

        Layout {
            field: Rect {
                x,
                y,
                w: field_w,
                h: field_h,
            },
            panel_x,
            restart: Rect {
                x: panel_x,
                y: panel_y + 9,
                w: BUTTON_WIDTH,
                h: 1,
            },
            pause: Rect {
                x: panel_x,
                y: panel_y + 11,
                w: BUTTON_WIDTH,
                h: 1,
            },
        }
    }

    /// Which button, if any, sits under a mouse click.
    pub fn hit_test(&self, viewport: Viewport, column: u16, row: u16) -> Option<Button> {
        let layout = self.layout(viewport);
        if layout.restart.contains(column, row) {
            Some(Button::Restart)
        } else if layout.pause.contains(column, row) {
            Some(Button::Pause)
        } else {
            None
        }
    }

    /// Draw into an existing canvas, resizing it to the viewport.
    pub fn render_into(&self, snap: &GameSnapshot, viewport: Viewport, canvas: &mut Canvas) {
        canvas.resize(viewport.width, viewport.height);
        canvas.clear(Glyph::default());

        let layout = self.layout(viewport);
        let field = layout.field;

        canvas.fill_rect(
            field.x + 1,
            field.y + 1,
            field.w - 2,
            field.h - 2,
            ' ',
            Style::new(FIELD_BG, FIELD_BG),
        );
        canvas.draw_box(
            field.x,
            field.y,
            field.w,
            field.h,
            Style::new(Rgb::new(200, 200, 200), SCREEN_BG),
        );

        for y in 0..GRID_ROWS as i8 {
            for x in 0..GRID_COLS as i8 {
                match snap.composed_cell(x, y) {
                    Some(color) => self.draw_cell(
                        canvas,
                        field,
                        x as u16,
                        y as u16,
                        '█',
                        Style::new(Rgb::from(color), FIELD_BG),
                    ),
                    None => self.draw_cell(
                        canvas,
                        field,
                        x as u16,
                        y as u16,
                        '·',
                        Style::new(Rgb::new(90, 90, 100), FIELD_BG).dim(),
                    ),
                }
            }
        }

        self.draw_panel(canvas, snap, &layout);

        match snap.status {
            GameStatus::Paused => draw_overlay(canvas, field, "PAUSED"),
            GameStatus::GameOver => draw_overlay(canvas, field, "GAME OVER"),
            GameStatus::Running => {}
        }
    }

    /// Convenience helper that allocates a new canvas.
    pub fn render(&self, snap: &GameSnapshot, viewport: Viewport) -> Canvas {
        let mut canvas = Canvas::new(viewport.width, viewport.height);
        self.render_into(snap, viewport, &mut canvas);
        canvas
    }

    fn draw_cell(&self, canvas: &mut Canvas, field: Rect, x: u16, y: u16, ch: char, style: Style) {
        let px = field.x + 1 + x * self.cell_w;
        let py = field.y + 1 + y * self.cell_h;
        canvas.fill_rect(px, py, self.cell_w, self.cell_h, ch, style);
    }

    fn draw_panel(&self, canvas: &mut Canvas, snap: &GameSnapshot, layout: &Layout) {
        let label = Style::new(Rgb::new(220, 220, 220), SCREEN_BG).bold();
        let value = Style::new(Rgb::new(200, 200, 200), SCREEN_BG);
        let x = layout.panel_x;
        let mut y = layout.field.y + 1;

        for (name, number) in [("SCORE", snap.score), ("LEVEL", snap.level), ("LINES", snap.lines)] {
            canvas.put_str(x, y, name, label);
            canvas.put_u32(x, y + 1, number, value);
            y += 3;
        }

        draw_button(canvas, layout.restart, Button::Restart.label(snap.status), true);
        draw_button(
            canvas,
            layout.pause,
            Button::Pause.label(snap.status),
            !snap.game_over(),
        );

        let help = Style::new(Rgb::new(140, 140, 150), SCREEN_BG).dim();
        let help_y = layout.pause.y + 3;
        for (i, line) in ["←/→ move", "↑ rotate", "↓ drop", "p pause", "r restart", "q quit"]
            .iter()
            .enumerate()
        {
            canvas.put_str(x, help_y + i as u16, line, help);
        }
    }
}

fn draw_button(canvas: &mut Canvas, rect: Rect, label: &str, enabled: bool) {
    let mut style = Style::new(Rgb::new(240, 240, 240), Rgb::new(60, 60, 90)).bold();
    if !enabled {
        style = Style::new(Rgb::new(120, 120, 120), Rgb::new(40, 40, 50)).dim();
    }
    canvas.fill_rect(rect.x, rect.y, rect.w, rect.h, ' ', style);

    let text_w = label.chars().count() as u16;
    let pad = rect.w.saturating_sub(text_w) / 2;
    canvas.put_str(rect.x + pad, rect.y, label, style);
}

fn draw_overlay(canvas: &mut Canvas, field: Rect, text: &str) {
    let style = Style::new(Rgb::new(255, 255, 255), SCREEN_BG).bold();
    let text_w = text.chars().count() as u16;
    let x = field.x + field.w.saturating_sub(text_w + 2) / 2;
    let y = field.y + field.h / 2;
    canvas.put_str(x, y, " ", style);
    canvas.put_str(x + 1, y, text, style);
    canvas.put_str(x + 1 + text_w, y, " ", style);
}
