//! Integration tests for the game engine driven through the facade

use blockfall::core::{GameState, Grid, PieceSource, SequencePieces};
use blockfall::input::InputHandler;
use blockfall::types::{Color, GameAction, GameStatus, LockEvent, PieceKind};
use crossterm::event::{KeyCode, KeyEvent};

fn scripted(rows: &[&str], kinds: &[PieceKind]) -> GameState<SequencePieces> {
    let grid = Grid::from_ascii(rows, Color::Blue).expect("picture fits");
    GameState::with_grid(grid, SequencePieces::new(kinds.to_vec()))
}

/// Run gravity until the active piece locks.
fn drop_piece<S: PieceSource>(state: &mut GameState<S>) -> LockEvent {
    for _ in 0..32 {
        let interval = state.fall_interval_ms() as i64;
        state.tick(interval);
        if let Some(event) = state.take_last_event() {
            return event;
        }
    }
    panic!("piece did not lock");
}

#[test]
fn test_game_lifecycle() {
    let mut state = GameState::new(12345);
    assert_eq!(state.status(), GameStatus::Running);

    assert!(state.toggle_pause());
    assert_eq!(state.status(), GameStatus::Paused);
    assert!(state.toggle_pause());
    assert_eq!(state.status(), GameStatus::Running);

    // Play until the stack reaches the top.
    let mut locks = 0;
    while !state.game_over() {
        drop_piece(&mut state);
        locks += 1;
        assert!(locks < 500, "game never ended");
    }
    assert!(locks >= 5);

    state.restart();
    assert_eq!(state.status(), GameStatus::Running);
    assert_eq!(state.grid().filled_count(), 0);
}

#[test]
fn test_same_seed_same_game() {
    let mut a = GameState::new(99);
    let mut b = GameState::new(99);
    for _ in 0..6 {
        assert_eq!(a.active().kind, b.active().kind);
        drop_piece(&mut a);
        drop_piece(&mut b);
    }
    assert_eq!(a.grid(), b.grid());
}

#[test]
fn test_single_cell_completes_bottom_row() {
    let mut grid = Grid::new();
    grid.set(5, 18, Some(Color::Green));
    for x in 1..10 {
        grid.set(x, 19, Some(Color::Red));
    }

    grid.lock(&[(0, 19)], Color::Cyan);
    assert!(grid.is_row_full(19));
    assert_eq!(grid.clear_full_rows(), 1);

    assert!(grid.is_row_empty(0));
    assert_eq!(grid.get(5, 19), Some(Some(Color::Green)));
    assert_eq!(grid.filled_count(), 1);
}

#[test]
fn test_vertical_i_clears_four_rows() {
    let mut state = scripted(
        &[".#########", ".#########", ".#########", ".#########"],
        &[PieceKind::I, PieceKind::O],
    );

    assert!(state.rotate());
    while state.move_left() {}
    assert_eq!(state.active().x, 0);

    let event = drop_piece(&mut state);
    assert_eq!(event.lines_cleared, 4);
    assert_eq!(event.points, 200);
    assert_eq!(state.score(), 200);
    assert_eq!(state.lines(), 4);
    assert_eq!(state.grid().filled_count(), 0);
    assert_eq!(state.active().kind, PieceKind::O);
}

#[test]
fn test_double_clear_adds_100() {
    let mut state = scripted(&["####..####", "####..####"], &[PieceKind::O]);
    let event = drop_piece(&mut state);

    assert_eq!(event.lines_cleared, 2);
    assert_eq!(state.score(), 100);
    assert_eq!(state.lines(), 2);
}

#[test]
fn test_level_up_through_play() {
    let well = vec!["#########."; 12];
    let mut state = scripted(&well, &[PieceKind::I]);

    for expected_lines in [4, 8, 12] {
        assert!(state.rotate());
        while state.move_right() {}
        assert_eq!(state.active().x, 9);

        let event = drop_piece(&mut state);
        assert_eq!(event.lines_cleared, 4);
        assert_eq!(state.lines(), expected_lines);
        assert_eq!(event.level_up, expected_lines == 12);
    }

    assert_eq!(state.score(), 600);
    assert_eq!(state.level(), 2);
    assert_eq!(state.fall_interval_ms(), 450);
    assert_eq!(state.grid().filled_count(), 0);
}

#[test]
fn test_blocked_spawn_is_game_over() {
    let mut rows = vec!["..######.."; 4];
    rows.extend(std::iter::repeat("..........").take(16));
    let mut state = scripted(&rows, &[PieceKind::I]);

    assert_eq!(state.status(), GameStatus::GameOver);
    let before = *state.active();
    assert!(!state.tick(1_000));
    assert!(!state.move_left());
    assert!(!state.move_right());
    assert!(!state.rotate());
    state.set_soft_drop(true);
    assert!(!state.soft_drop());
    assert_eq!(*state.active(), before);

    // Game over is left only through restart.
    assert!(!state.apply_action(GameAction::Pause));
    assert_eq!(state.status(), GameStatus::GameOver);
    assert!(state.apply_action(GameAction::Restart));
    assert_eq!(state.status(), GameStatus::Running);
}

#[test]
fn test_pause_resumes_cadence() {
    let mut state = scripted(&[], &[PieceKind::T]);
    state.tick(300);
    state.toggle_pause();
    state.tick(1_000);
    state.toggle_pause();

    assert!(!state.tick(199));
    assert_eq!(state.active().y, 0);
    assert!(state.tick(1));
    assert_eq!(state.active().y, 1);
}

#[test]
fn test_one_step_when_both_timers_due() {
    let mut state = scripted(&[], &[PieceKind::L]);
    state.tick(490);
    state.set_soft_drop(true);
    assert!(state.tick(50));
    assert_eq!(state.active().y, 1);
}

#[test]
fn test_negative_elapsed_is_ignored() {
    let mut state = scripted(&[], &[PieceKind::S]);
    assert!(!state.tick(-500));
    assert!(!state.tick(i64::MIN));
    assert_eq!(state.gravity_elapsed_ms(), 0);
    assert_eq!(state.active().y, 0);
}

#[test]
fn test_keyboard_drives_engine() {
    let mut state = scripted(&[], &[PieceKind::T]);
    let mut input = InputHandler::new();
    let x = state.active().x;

    let press = |input: &mut InputHandler, code: KeyCode| input.handle_key_press(KeyEvent::from(code));

    // A held key only moves once.
    for _ in 0..5 {
        if let Some(action) = press(&mut input, KeyCode::Left) {
            state.apply_action(action);
        }
    }
    assert_eq!(state.active().x, x - 1);

    if let Some(action) = input.handle_key_release(KeyCode::Left) {
        state.apply_action(action);
    }
    if let Some(action) = press(&mut input, KeyCode::Left) {
        state.apply_action(action);
    }
    assert_eq!(state.active().x, x - 2);

    // Down held: soft drop steps every 50ms.
    let action = press(&mut input, KeyCode::Down).expect("soft drop on");
    state.apply_action(action);
    assert!(state.tick(50));
    assert!(state.tick(50));
    assert_eq!(state.active().y, 2);

    let action = input.handle_key_release(KeyCode::Down).expect("soft drop off");
    state.apply_action(action);
    assert!(!state.soft_drop());
    assert!(!state.tick(50));
}

#[test]
fn test_held_down_keeps_soft_dropping_when_releases_are_reported() {
    let mut state = scripted(&[], &[PieceKind::T]);
    let mut input = InputHandler::for_terminal(true);

    let action = input
        .handle_key_press(KeyEvent::from(KeyCode::Down))
        .expect("soft drop on");
    state.apply_action(action);

    // No repeat events arrive; each 50ms frame is one soft-drop step.
    for _ in 0..6 {
        for action in input.update(50) {
            state.apply_action(action);
        }
        assert!(state.tick(50));
    }
    assert!(state.soft_drop());
    assert_eq!(state.active().y, 6);
}

#[test]
fn test_restart_mid_game() {
    let mut state = GameState::new(5);
    for _ in 0..3 {
        drop_piece(&mut state);
    }
    assert!(state.grid().filled_count() > 0);

    state.apply_action(GameAction::Restart);
    assert_eq!(state.score(), 0);
    assert_eq!(state.lines(), 0);
    assert_eq!(state.level(), 1);
    assert_eq!(state.fall_interval_ms(), 500);
    assert_eq!(state.grid().filled_count(), 0);
    assert_eq!(state.active().y, 0);
}
