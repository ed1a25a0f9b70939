//! Terminal runner (default binary).
//!
//! Uses crossterm for keyboard/mouse input and the canvas renderer from
//! `blockfall::term`. Diagnostics go to stderr once the terminal is restored.

use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::event::{self, Event, KeyEventKind, MouseButton, MouseEventKind};

use blockfall::core::{GameSnapshot, GameState};
use blockfall::input::{should_quit, InputHandler};
use blockfall::term::{Canvas, GameView, TerminalRenderer, Viewport};
use blockfall::types::{GameAction, GameStatus};
use blockfall::AppConfig;

/// Totals reported after the game loop ends.
#[derive(Debug, Default)]
struct Session {
    pieces_locked: u32,
    best_clear: u32,
    level_ups: u32,
    game_overs: u32,
}

fn main() -> Result<()> {
    let config = AppConfig::from_env();

    let mut term = TerminalRenderer::new(config.mouse);
    term.enter()?;

    let mut game = GameState::new(config.seed);
    let mut session = Session::default();
    let result = run(&mut term, &mut game, &mut session, &config);

    // Always try to restore terminal state.
    let _ = term.exit();

    eprintln!(
        "[Game] final score {} level {} lines {} (seed {}, {} pieces locked, best clear {}, {} level-ups, {} game overs)",
        game.score(),
        game.level(),
        game.lines(),
        config.seed,
        session.pieces_locked,
        session.best_clear,
        session.level_ups,
        session.game_overs,
    );
    result
}

fn run(
    term: &mut TerminalRenderer,
    game: &mut GameState,
    session: &mut Session,
    config: &AppConfig,
) -> Result<()> {
    let view = GameView::default();
    let mut input = InputHandler::for_terminal(term.reports_key_release());
    let mut snap = GameSnapshot::default();
    let mut canvas = Canvas::new(0, 0);

    let tick_duration = Duration::from_millis(config.tick_ms as u64);
    let mut last_tick = Instant::now();

    loop {
        // Render.
        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        let viewport = Viewport::new(w, h);
        game.snapshot_into(&mut snap);
        view.render_into(&snap, viewport, &mut canvas);
        term.draw_swap(&mut canvas)?;

        // Input with timeout until next tick.
        let timeout = tick_duration.saturating_sub(last_tick.elapsed());
        if event::poll(timeout)? {
            let action = match event::read()? {
                Event::Key(key) => match key.kind {
                    KeyEventKind::Press => {
                        if should_quit(key) {
                            return Ok(());
                        }
                        input.handle_key_press(key)
                    }
                    KeyEventKind::Repeat => input.handle_key_repeat(key.code),
                    KeyEventKind::Release => input.handle_key_release(key.code),
                },
                Event::Mouse(mouse) if mouse.kind == MouseEventKind::Down(MouseButton::Left) => view
                    .hit_test(viewport, mouse.column, mouse.row)
                    .and_then(|button| button.click_action(game.status())),
                Event::Resize(_, _) => {
                    term.invalidate();
                    None
                }
                _ => None,
            };

            if let Some(action) = action {
                apply(game, &mut input, action);
            }
        }

        // Tick.
        let elapsed = last_tick.elapsed();
        if elapsed >= tick_duration {
            last_tick = Instant::now();
            let elapsed_ms = elapsed.as_millis().min(u32::MAX as u128) as u32;

            for action in input.update(elapsed_ms) {
                apply(game, &mut input, action);
            }

            let was_over = game.game_over();
            game.tick(elapsed_ms as i64);
            if let Some(event) = game.take_last_event() {
                session.pieces_locked += 1;
                session.best_clear = session.best_clear.max(event.lines_cleared);
                session.level_ups += event.level_up as u32;
            }
            if !was_over && game.status() == GameStatus::GameOver {
                session.game_overs += 1;
            }
        }
    }
}

fn apply(game: &mut GameState, input: &mut InputHandler, action: GameAction) {
    game.apply_action(action);
    if action == GameAction::Restart {
        input.reset();
    }
}
