use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};

use crate::game::Game;
use crate::ui::Viewport;

/// Frames a direction stays held after its last press on terminals that
/// never report key releases. Covers the usual OS key-repeat delay.
const HOLD_WINDOW: u64 = 30;

#[derive(Clone, Copy, PartialEq, Debug)]
enum Direction {
    Left,
    Right,
}

pub struct App {
    pub should_quit: bool,
    pub game: Game,
    /// Set by the renderer; used to map mouse clicks onto the playfield.
    pub viewport: Option<Viewport>,
    /// Whether the terminal sends `Release` key events.
    release_events: bool,
    frame: u64,
    left_seen: Option<u64>,
    right_seen: Option<u64>,
}

impl App {
    pub fn new(game: Game, release_events: bool) -> Self {
        Self {
            should_quit: false,
            game,
            viewport: None,
            release_events,
            frame: 0,
            left_seen: None,
            right_seen: None,
        }
    }

    pub fn on_tick(&mut self) {
        self.frame += 1;
        if !self.release_events {
            self.expire_held_keys();
        }
        self.game.update();
    }

    fn expire_held_keys(&mut self) {
        let frame = self.frame;
        let expired = |seen: Option<u64>| seen.is_some_and(|at| frame.saturating_sub(at) > HOLD_WINDOW);
        if expired(self.left_seen) {
            self.left_seen = None;
            self.game.set_moving_left(false);
        }
        if expired(self.right_seen) {
            self.right_seen = None;
            self.game.set_moving_right(false);
        }
    }

    pub fn on_key(&mut self, key: KeyEvent) {
        // Ctrl+C always quits
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.should_quit = true;
            return;
        }

        let pressed = matches!(key.kind, KeyEventKind::Press | KeyEventKind::Repeat);
        match key.code {
            KeyCode::Left | KeyCode::Char('a') | KeyCode::Char('A') => {
                self.steer(Direction::Left, pressed);
            }
            KeyCode::Right | KeyCode::Char('d') | KeyCode::Char('D') => {
                self.steer(Direction::Right, pressed);
            }
            _ if key.kind != KeyEventKind::Press => {}
            KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('Q') => {
                self.should_quit = true;
            }
            KeyCode::Char(' ') => {
                self.game.fire_bullet();
            }
            KeyCode::Enter => {
                self.game.start_game();
            }
            _ => {}
        }
    }

    fn steer(&mut self, direction: Direction, pressed: bool) {
        let seen = pressed.then_some(self.frame);
        // Without release events the other key may still look held.
        let turn = pressed && !self.release_events;
        match direction {
            Direction::Left => {
                self.left_seen = seen;
                self.game.set_moving_left(pressed);
                if turn {
                    self.right_seen = None;
                    self.game.set_moving_right(false);
                }
            }
            Direction::Right => {
                self.right_seen = seen;
                self.game.set_moving_right(pressed);
                if turn {
                    self.left_seen = None;
                    self.game.set_moving_left(false);
                }
            }
        }
    }

    pub fn on_mouse(&mut self, mouse: MouseEvent) {
        if mouse.kind != MouseEventKind::Down(MouseButton::Left) {
            return;
        }
        let Some(viewport) = self.viewport else { return };
        if let Some((x, y)) = viewport.to_world(mouse.column, mouse.row) {
            self.game.check_play_button(x, y);
        }
    }

    /// Mouse capture follows the idle indicator: on while the Play control
    /// is up, off during play.
    pub fn wants_mouse(&self) -> bool {
        self.game.pointer_visible()
    }
}
