use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};

use crate::game::Direction;
use crate::render::{Button, ControlPad};

/// What the player asked for
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputAction {
    Turn(Direction),
    TogglePause,
    Restart,
    Quit,
    None,
}

impl From<Button> for InputAction {
    fn from(button: Button) -> Self {
        match button {
            Button::Up => InputAction::Turn(Direction::Up),
            Button::Down => InputAction::Turn(Direction::Down),
            Button::Left => InputAction::Turn(Direction::Left),
            Button::Right => InputAction::Turn(Direction::Right),
            Button::Pause => InputAction::TogglePause,
            Button::Restart => InputAction::Restart,
        }
    }
}

pub struct InputHandler;

impl InputHandler {
    pub fn new() -> Self {
        Self
    }

    pub fn handle_key_event(&self, key: KeyEvent) -> InputAction {
        // Handle Ctrl+C
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return InputAction::Quit;
        }

        match key.code {
            // Movement - Arrow keys
            KeyCode::Up => InputAction::Turn(Direction::Up),
            KeyCode::Down => InputAction::Turn(Direction::Down),
            KeyCode::Left => InputAction::Turn(Direction::Left),
            KeyCode::Right => InputAction::Turn(Direction::Right),

            // Movement - WASD
            KeyCode::Char('w') | KeyCode::Char('W') => InputAction::Turn(Direction::Up),
            KeyCode::Char('s') | KeyCode::Char('S') => InputAction::Turn(Direction::Down),
            KeyCode::Char('a') | KeyCode::Char('A') => InputAction::Turn(Direction::Left),
            KeyCode::Char('d') | KeyCode::Char('D') => InputAction::Turn(Direction::Right),

            // Controls
            KeyCode::Char('p') | KeyCode::Char('P') | KeyCode::Char(' ') => {
                InputAction::TogglePause
            }
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => InputAction::Quit,
            KeyCode::Char('r') | KeyCode::Char('R') => InputAction::Restart,

            _ => InputAction::None,
        }
    }

    /// Map a left click on one of the on-screen buttons
    pub fn handle_mouse_event(&self, mouse: MouseEvent, pad: &ControlPad) -> InputAction {
        if mouse.kind != MouseEventKind::Down(MouseButton::Left) {
            return InputAction::None;
        }

        pad.button_at(mouse.column, mouse.row)
            .map(InputAction::from)
            .unwrap_or(InputAction::None)
    }
}

impl Default for InputHandler {
    fn default() -> Self {
        Self::new()
    }
}
