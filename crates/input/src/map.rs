//! Key mapping from terminal events to controller commands.

use crate::types::Command;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// Map a key press to a command.
///
/// Release events (only reported by terminals with keyboard enhancement) map
/// to nothing so that a single press never produces two commands.
pub fn map_key(key: KeyEvent) -> Option<Command> {
    if key.kind == KeyEventKind::Release {
        return None;
    }

    match key.code {
        // Movement
        KeyCode::Left | KeyCode::Char('h') | KeyCode::Char('H') | KeyCode::Char('a') | KeyCode::Char('A') => {
            Some(Command::Left)
        }
        KeyCode::Right | KeyCode::Char('l') | KeyCode::Char('L') | KeyCode::Char('d') | KeyCode::Char('D') => {
            Some(Command::Right)
        }

        // Rotation
        KeyCode::Up
        | KeyCode::Char('k')
        | KeyCode::Char('K')
        | KeyCode::Char('w')
        | KeyCode::Char('W')
        | KeyCode::Char('x')
        | KeyCode::Char('X') => Some(Command::RotateRight),
        KeyCode::Char('z') | KeyCode::Char('Z') | KeyCode::Char('y') | KeyCode::Char('Y') => {
            Some(Command::RotateLeft)
        }

        // Drop
        KeyCode::Down
        | KeyCode::Char(' ')
        | KeyCode::Char('j')
        | KeyCode::Char('J')
        | KeyCode::Char('s')
        | KeyCode::Char('S') => Some(Command::Down),

        // Pause doubles as "new game" once the game is over
        KeyCode::Char('p') | KeyCode::Char('P') | KeyCode::Enter => Some(Command::Pause),

        _ => None,
    }
}

/// Check if key should quit the game.
pub fn should_quit(key: KeyEvent) -> bool {
    matches!(key.code, KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc)
        || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyEventState;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::from(code)
    }

    #[test]
    fn test_movement_keys() {
        assert_eq!(map_key(press(KeyCode::Left)), Some(Command::Left));
        assert_eq!(map_key(press(KeyCode::Right)), Some(Command::Right));
        assert_eq!(map_key(press(KeyCode::Char('H'))), Some(Command::Left));
        assert_eq!(map_key(press(KeyCode::Char('l'))), Some(Command::Right));
        assert_eq!(map_key(press(KeyCode::Char('a'))), Some(Command::Left));
        assert_eq!(map_key(press(KeyCode::Char('D'))), Some(Command::Right));
    }

    #[test]
    fn test_rotation_keys() {
        assert_eq!(map_key(press(KeyCode::Up)), Some(Command::RotateRight));
        assert_eq!(map_key(press(KeyCode::Char('x'))), Some(Command::RotateRight));
        assert_eq!(map_key(press(KeyCode::Char('W'))), Some(Command::RotateRight));
        assert_eq!(map_key(press(KeyCode::Char('z'))), Some(Command::RotateLeft));
        assert_eq!(map_key(press(KeyCode::Char('Y'))), Some(Command::RotateLeft));
    }

    #[test]
    fn test_drop_and_pause_keys() {
        assert_eq!(map_key(press(KeyCode::Down)), Some(Command::Down));
        assert_eq!(map_key(press(KeyCode::Char(' '))), Some(Command::Down));
        assert_eq!(map_key(press(KeyCode::Char('j'))), Some(Command::Down));
        assert_eq!(map_key(press(KeyCode::Char('p'))), Some(Command::Pause));
        assert_eq!(map_key(press(KeyCode::Enter)), Some(Command::Pause));
    }

    #[test]
    fn test_unmapped_and_release() {
        assert_eq!(map_key(press(KeyCode::Char('c'))), None);
        assert_eq!(map_key(press(KeyCode::Tab)), None);

        let release = KeyEvent {
            code: KeyCode::Left,
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Release,
            state: KeyEventState::NONE,
        };
        assert_eq!(map_key(release), None);
    }

    #[test]
    fn test_quit_keys() {
        assert!(should_quit(press(KeyCode::Char('q'))));
        assert!(should_quit(press(KeyCode::Esc)));
        assert!(should_quit(KeyEvent::new(
            KeyCode::Char('c'),
            KeyModifiers::CONTROL
        )));
        assert!(!should_quit(press(KeyCode::Char('x'))));
        assert!(!should_quit(press(KeyCode::Char('c'))));
    }
}
