use crate::game::Direction;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Command {
    Quit,
    Up,
    Down,
    Left,
    Right,
    Enter,
    /// A digit key picking a difficulty by its position in the menu
    Level(usize),
    M,
    Q,
    R,
}

impl Command {
    pub(crate) fn from_key_event(ev: KeyEvent) -> Option<Command> {
        let normal_modifiers = KeyModifiers::NONE | KeyModifiers::SHIFT;
        match (ev.modifiers, ev.code) {
            (KeyModifiers::CONTROL, KeyCode::Char('c')) => Some(Command::Quit),
            (m, code) if normal_modifiers.contains(m) => match code {
                KeyCode::Char('w' | 'k') | KeyCode::Up => Some(Command::Up),
                KeyCode::Char('s' | 'j') | KeyCode::Down => Some(Command::Down),
                KeyCode::Char('a' | 'h') | KeyCode::Left => Some(Command::Left),
                KeyCode::Char('d' | 'l') | KeyCode::Right => Some(Command::Right),
                KeyCode::Enter => Some(Command::Enter),
                KeyCode::Char(c @ '1'..='9') => c
                    .to_digit(10)
                    .and_then(|n| usize::try_from(n).ok())
                    .map(Command::Level),
                KeyCode::Char('m') => Some(Command::M),
                KeyCode::Char('q') => Some(Command::Q),
                KeyCode::Char('r') => Some(Command::R),
                _ => None,
            },
            _ => None,
        }
    }

    /// The direction a movement key asks the snake to turn
    pub(crate) fn direction(self) -> Option<Direction> {
        match self {
            Command::Up => Some(Direction::Up),
            Command::Down => Some(Direction::Down),
            Command::Left => Some(Direction::Left),
            Command::Right => Some(Direction::Right),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(KeyCode::Up, KeyModifiers::NONE, Some(Command::Up))]
    #[case(KeyCode::Char('k'), KeyModifiers::NONE, Some(Command::Up))]
    #[case(KeyCode::Char('s'), KeyModifiers::NONE, Some(Command::Down))]
    #[case(KeyCode::Char('h'), KeyModifiers::NONE, Some(Command::Left))]
    #[case(KeyCode::Right, KeyModifiers::SHIFT, Some(Command::Right))]
    #[case(KeyCode::Enter, KeyModifiers::NONE, Some(Command::Enter))]
    #[case(KeyCode::Char('3'), KeyModifiers::NONE, Some(Command::Level(3)))]
    #[case(KeyCode::Char('0'), KeyModifiers::NONE, None)]
    #[case(KeyCode::Char('c'), KeyModifiers::CONTROL, Some(Command::Quit))]
    #[case(KeyCode::Char('q'), KeyModifiers::NONE, Some(Command::Q))]
    #[case(KeyCode::Char('r'), KeyModifiers::NONE, Some(Command::R))]
    #[case(KeyCode::Char('m'), KeyModifiers::NONE, Some(Command::M))]
    #[case(KeyCode::Char('q'), KeyModifiers::ALT, None)]
    #[case(KeyCode::Char('x'), KeyModifiers::NONE, None)]
    fn test_from_key_event(
        #[case] code: KeyCode,
        #[case] modifiers: KeyModifiers,
        #[case] cmd: Option<Command>,
    ) {
        assert_eq!(Command::from_key_event(KeyEvent::new(code, modifiers)), cmd);
    }

    #[test]
    fn only_movement_keys_have_directions() {
        assert_eq!(Command::Left.direction(), Some(Direction::Left));
        assert_eq!(Command::Enter.direction(), None);
        assert_eq!(Command::Level(1).direction(), None);
    }
}
