use crate::app::Screen;
use crate::command::Command;
use crate::consts;
use crate::difficulty::Difficulty;
use crate::game::Game;
use crate::scoreboard::Scoreboard;
use crate::util::{get_display_area, Globals};
use crossterm::event::{read, Event};
use enum_map::Enum;
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Flex, Layout, Rect},
    style::Style,
    text::{Line, Span, Text},
    widgets::{Block, Widget},
    Frame,
};
use std::io;

/// The screen shown at launch: pick a difficulty, look at past scores
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct StartupScreen {
    globals: Globals,
    selection: Difficulty,
}

impl StartupScreen {
    pub(crate) fn new(globals: Globals, selection: Difficulty) -> Self {
        StartupScreen { globals, selection }
    }

    pub(crate) fn draw(&self, frame: &mut Frame<'_>) {
        frame.render_widget(self, frame.area());
    }

    pub(crate) fn process_input(&mut self) -> io::Result<Option<Screen>> {
        self.handle_event(read()?)
    }

    fn handle_event(&mut self, event: Event) -> io::Result<Option<Screen>> {
        let Some(cmd) = event
            .as_key_press_event()
            .and_then(Command::from_key_event)
        else {
            return Ok(None);
        };
        match cmd {
            Command::Quit | Command::Q => return Ok(Some(Screen::Quit)),
            Command::Up => {
                if let Some(d) = self.selection.faster() {
                    self.selection = d;
                }
            }
            Command::Down => {
                if let Some(d) = self.selection.slower() {
                    self.selection = d;
                }
            }
            Command::Enter => return self.play(self.selection).map(Some),
            Command::Level(n) => {
                if let Some(d) = Difficulty::from_ordinal(n) {
                    return self.play(d).map(Some);
                }
            }
            _ => (),
        }
        Ok(None)
    }

    fn play(&self, difficulty: Difficulty) -> io::Result<Screen> {
        Game::start(self.globals.clone(), difficulty).map(Screen::Game)
    }
}

static INSTRUCTIONS: &[&str] = &[
    "Move the snake with:",
    "       ← ↓ ↑ →",
    "   or: h j k l",
    "   or: a s w d",
    "Eat the fruit, but don't hit",
    "the walls or yourself!",
];

const INSTRUCTIONS_WIDTH: u16 = 28;

const MENU_WIDTH: u16 = 24;

impl Widget for &StartupScreen {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let display = get_display_area(area);
        let [left, scores_area] =
            Layout::horizontal([Constraint::Fill(1), Constraint::Length(consts::PANEL_WIDTH)])
                .spacing(1)
                .areas(display);
        let menu_height = u16::try_from(Difficulty::LENGTH)
            .unwrap_or(u16::MAX)
            .saturating_add(2);
        let [title_area, instructions_area, menu_area, hint_area] = Layout::vertical([
            1,
            u16::try_from(INSTRUCTIONS.len()).unwrap_or(u16::MAX),
            menu_height,
            1,
        ])
        .flex(Flex::Start)
        .spacing(1)
        .areas(left);

        Line::styled("G R I D S N A K E", consts::TITLE_STYLE)
            .centered()
            .render(title_area, buf);

        let [instructions_area] = Layout::horizontal([INSTRUCTIONS_WIDTH])
            .flex(Flex::Center)
            .areas(instructions_area);
        Text::from_iter(INSTRUCTIONS.iter().copied()).render(instructions_area, buf);

        let [menu_area] = Layout::horizontal([MENU_WIDTH])
            .flex(Flex::Center)
            .areas(menu_area);
        let block = Block::bordered().title(" Difficulty ");
        let inner = block.inner(menu_area);
        block.render(menu_area, buf);
        Text::from_iter(Difficulty::iter().enumerate().map(|(i, d)| {
            let (marker, style) = if d == self.selection {
                ("»", consts::MENU_SELECTION_STYLE)
            } else {
                (" ", Style::new())
            };
            Line::from_iter([
                Span::raw(format!(" {marker} ")),
                Span::styled((i + 1).to_string(), consts::KEY_STYLE),
                Span::raw(") "),
                Span::styled(
                    format!("{:<6} {:>3} ms", d, d.tick_interval().as_millis()),
                    style,
                ),
            ])
        }))
        .render(inner, buf);

        Line::from_iter([
            Span::raw("Start ("),
            Span::styled("Enter", consts::KEY_STYLE),
            Span::raw(") — Quit ("),
            Span::styled("q", consts::KEY_STYLE),
            Span::raw(")"),
        ])
        .centered()
        .render(hint_area, buf);

        Scoreboard::new(&self.globals.history).render(scores_area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
    use rstest::rstest;

    fn key(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn screen_text(buf: &Buffer) -> String {
        let area = buf.area;
        let mut s = String::new();
        for y in area.top()..area.bottom() {
            for x in area.left()..area.right() {
                s.push_str(buf[(x, y)].symbol());
            }
            s.push('\n');
        }
        s
    }

    #[rstest]
    #[case(Difficulty::Normal, KeyCode::Up, Difficulty::Hard)]
    #[case(Difficulty::Normal, KeyCode::Char('j'), Difficulty::Easy)]
    #[case(Difficulty::Hell, KeyCode::Up, Difficulty::Hell)]
    #[case(Difficulty::Easy, KeyCode::Down, Difficulty::Easy)]
    #[case(Difficulty::Hard, KeyCode::Char('x'), Difficulty::Hard)]
    fn move_selection(
        #[case] start: Difficulty,
        #[case] code: KeyCode,
        #[case] selection: Difficulty,
    ) {
        let mut screen = StartupScreen::new(Globals::default(), start);
        assert!(screen.handle_event(key(code)).unwrap().is_none());
        assert_eq!(screen.selection, selection);
    }

    #[test]
    fn quit() {
        let mut screen = StartupScreen::new(Globals::default(), Difficulty::Normal);
        assert!(matches!(
            screen.handle_event(key(KeyCode::Char('q'))).unwrap(),
            Some(Screen::Quit)
        ));
    }

    #[test]
    fn digit_starts_game() {
        let mut screen = StartupScreen::new(Globals::default(), Difficulty::Normal);
        assert!(matches!(
            screen.handle_event(key(KeyCode::Char('2'))).unwrap(),
            Some(Screen::Game(_))
        ));
    }

    #[test]
    fn out_of_range_digit_ignored() {
        let mut screen = StartupScreen::new(Globals::default(), Difficulty::Normal);
        let digit = char::from_digit(u32::try_from(Difficulty::LENGTH + 1).unwrap(), 10).unwrap();
        assert!(screen
            .handle_event(key(KeyCode::Char(digit)))
            .unwrap()
            .is_none());
    }

    #[test]
    fn enter_starts_game() {
        let mut screen = StartupScreen::new(Globals::default(), Difficulty::Easy);
        assert!(matches!(
            screen.handle_event(key(KeyCode::Enter)).unwrap(),
            Some(Screen::Game(_))
        ));
    }

    #[test]
    fn draw_menu() {
        let screen = StartupScreen::new(Globals::default(), Difficulty::Hard);
        let area = Rect::new(0, 0, 96, 33);
        let mut buffer = Buffer::empty(area);
        (&screen).render(area, &mut buffer);
        let text = screen_text(&buffer);
        assert!(text.contains("G R I D S N A K E"));
        assert!(text.contains("1) Hell    50 ms"));
        assert!(text.contains("» 2) Hard   100 ms"));
        assert!(text.contains("  3) Normal 300 ms"));
        assert!(text.contains("4) Easy   500 ms"));
        assert!(text.contains("No games played yet"));
        assert!(text.contains("Start (Enter)"));
    }
}
