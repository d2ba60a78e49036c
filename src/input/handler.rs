use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::game::Direction;

/// A key press translated into what it means, independent of the screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    /// Arrow keys and WASD
    Steer(Direction),
    /// Enter or Space
    Confirm,
    /// Esc
    Back,
    Pause,
    /// Number keys 1-9
    Digit(char),
    Leaderboard,
    ToggleAudio,
    Quit,
    None,
}

pub struct InputHandler;

impl InputHandler {
    pub fn new() -> Self {
        Self
    }

    pub fn handle_key_event(&self, key: KeyEvent) -> KeyAction {
        // Handle Ctrl+C
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return KeyAction::Quit;
        }

        match key.code {
            KeyCode::Up => KeyAction::Steer(Direction::Up),
            KeyCode::Down => KeyAction::Steer(Direction::Down),
            KeyCode::Left => KeyAction::Steer(Direction::Left),
            KeyCode::Right => KeyAction::Steer(Direction::Right),

            KeyCode::Enter => KeyAction::Confirm,
            KeyCode::Esc => KeyAction::Back,

            KeyCode::Char(c) => match c.to_ascii_lowercase() {
                'w' => KeyAction::Steer(Direction::Up),
                's' => KeyAction::Steer(Direction::Down),
                'a' => KeyAction::Steer(Direction::Left),
                'd' => KeyAction::Steer(Direction::Right),
                ' ' => KeyAction::Confirm,
                'p' => KeyAction::Pause,
                'l' => KeyAction::Leaderboard,
                'm' => KeyAction::ToggleAudio,
                'q' => KeyAction::Quit,
                d @ '1'..='9' => KeyAction::Digit(d),
                _ => KeyAction::None,
            },

            _ => KeyAction::None,
        }
    }
}

impl Default for InputHandler {
    fn default() -> Self {
        Self::new()
    }
}
