use crate::game::Game;
use crate::startup::StartupScreen;
use crate::util::Globals;
use ratatui::{backend::Backend, Terminal};
use std::io;

#[derive(Debug)]
pub(crate) struct App {
    screen: Screen,
}

impl App {
    pub(crate) fn new(globals: Globals) -> App {
        let selection = globals.config.difficulty;
        let screen = Screen::Startup(StartupScreen::new(globals, selection));
        App { screen }
    }

    pub(crate) fn run<B: Backend>(mut self, mut terminal: Terminal<B>) -> io::Result<()> {
        while !self.quitting() {
            self.draw(&mut terminal)?;
            self.process_input()?;
        }
        Ok(())
    }

    fn draw<B: Backend>(&self, terminal: &mut Terminal<B>) -> io::Result<()> {
        match self.screen {
            Screen::Startup(ref startup) => {
                terminal.draw(|frame| startup.draw(frame))?;
            }
            Screen::Game(ref game) => {
                terminal.draw(|frame| game.draw(frame))?;
            }
            Screen::Quit => (),
        }
        Ok(())
    }

    fn process_input(&mut self) -> io::Result<()> {
        let next = match self.screen {
            Screen::Startup(ref mut startup) => startup.process_input()?,
            Screen::Game(ref mut game) => game.process_input()?,
            Screen::Quit => None,
        };
        if let Some(screen) = next {
            self.screen = screen;
        }
        Ok(())
    }

    fn quitting(&self) -> bool {
        matches!(self.screen, Screen::Quit)
    }
}

#[derive(Debug)]
pub(crate) enum Screen {
    Startup(StartupScreen),
    Game(Game),
    Quit,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::difficulty::Difficulty;
    use ratatui::{backend::TestBackend, buffer::Buffer, layout::Rect};

    #[test]
    fn opens_on_configured_difficulty() {
        let mut globals = Globals::default();
        globals.config.difficulty = Difficulty::Easy;
        let app = App::new(globals);
        let mut terminal = Terminal::new(TestBackend::new(96, 33)).unwrap();
        app.draw(&mut terminal).unwrap();
        let buffer: &Buffer = terminal.backend().buffer();
        let area: Rect = buffer.area;
        let text = (area.top()..area.bottom())
            .flat_map(|y| (area.left()..area.right()).map(move |x| (x, y)))
            .map(|pos| buffer[pos].symbol())
            .collect::<String>();
        assert!(text.contains("» 4) Easy"));
        assert!(!app.quitting());
    }
}
