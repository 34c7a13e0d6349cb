use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// A key press, translated into what it means to the game
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Command {
    Quit,
    Up,
    Down,
    Left,
    Right,
}

impl Command {
    pub(crate) fn from_key_event(ev: KeyEvent) -> Option<Command> {
        match (ev.modifiers, ev.code) {
            (KeyModifiers::CONTROL, KeyCode::Char('c')) => Some(Command::Quit),
            (KeyModifiers::NONE, KeyCode::Char('w' | 'k') | KeyCode::Up) => Some(Command::Up),
            (KeyModifiers::NONE, KeyCode::Char('s' | 'j') | KeyCode::Down) => Some(Command::Down),
            (KeyModifiers::NONE, KeyCode::Char('a' | 'h') | KeyCode::Left) => Some(Command::Left),
            (KeyModifiers::NONE, KeyCode::Char('d' | 'l') | KeyCode::Right) => Some(Command::Right),
            _ => None,
        }
    }
}
