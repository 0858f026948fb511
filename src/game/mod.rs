mod collision;
mod direction;
mod engine;
mod fruit;
mod grid;
mod input;
mod session;
mod snake;
pub(crate) use self::direction::Direction;
use self::engine::{GameState, Snapshot};
use self::grid::{Bounds, Position};
use self::session::Session;
use crate::app::Screen;
use crate::command::Command;
use crate::consts;
use crate::difficulty::Difficulty;
use crate::history::History;
use crate::scoreboard::Scoreboard;
use crate::startup::StartupScreen;
use crate::util::{get_display_area, Globals};
use crossterm::event::{poll, read, Event};
use rand::{rngs::StdRng, SeedableRng};
use ratatui::{
    buffer::Buffer,
    layout::{Layout, Rect},
    style::Style,
    text::{Line, Span, Text},
    widgets::{Block, Widget},
    Frame,
};
use std::io;
use std::sync::Arc;

/// The game screen.  While a session is running, its logic lives on another
/// thread and this screen only forwards turn requests and draws the latest
/// snapshot.
#[derive(Debug)]
pub(crate) struct Game {
    globals: Globals,
    difficulty: Difficulty,
    session: Option<Session>,
    snapshot: Arc<Snapshot>,
}

impl Game {
    pub(crate) fn start(globals: Globals, difficulty: Difficulty) -> io::Result<Game> {
        let mut rng = StdRng::from_os_rng();
        let state = GameState::new(difficulty, Bounds::from(consts::ARENA_SIZE), &mut rng);
        let snapshot = Arc::new(state.snapshot());
        let session = Session::start(state, globals.history.clone(), rng)?;
        Ok(Game {
            globals,
            difficulty,
            session: Some(session),
            snapshot,
        })
    }

    pub(crate) fn draw(&self, frame: &mut Frame<'_>) {
        frame.render_widget(self, frame.area());
    }

    pub(crate) fn process_input(&mut self) -> io::Result<Option<Screen>> {
        if self.session.is_some() {
            let event = if poll(consts::RENDER_PERIOD)? {
                Some(read()?)
            } else {
                None
            };
            // Also refreshes right after a keypress, not only once per period
            self.refresh()?;
            let Some(event) = event else {
                return Ok(None);
            };
            self.handle_event(event)
        } else {
            self.handle_event(read()?)
        }
    }

    /// Pick up the newest snapshot, and collect the session's history once
    /// the snake has died.
    fn refresh(&mut self) -> io::Result<()> {
        if let Some(session) = self.session.as_ref() {
            self.snapshot = session.latest();
            if self.snapshot.is_over() {
                self.end_session()?;
            }
        }
        Ok(())
    }

    fn end_session(&mut self) -> io::Result<()> {
        if let Some(session) = self.session.take() {
            self.snapshot = session.latest();
            self.globals.history = session.finish()?;
        }
        Ok(())
    }

    fn handle_event(&mut self, event: Event) -> io::Result<Option<Screen>> {
        let Some(cmd) = event
            .as_key_press_event()
            .and_then(Command::from_key_event)
        else {
            return Ok(None);
        };
        if let Some(session) = self.session.as_ref() {
            if matches!(cmd, Command::Quit | Command::Q) {
                self.end_session()?;
                return Ok(Some(Screen::Quit));
            } else if let Some(direction) = cmd.direction() {
                session.propose(direction);
            }
        } else {
            match cmd {
                Command::R => {
                    let game = Game::start(self.globals.clone(), self.difficulty)?;
                    return Ok(Some(Screen::Game(game)));
                }
                Command::M => {
                    let startup = StartupScreen::new(self.globals.clone(), self.difficulty);
                    return Ok(Some(Screen::Startup(startup)));
                }
                Command::Quit | Command::Q => return Ok(Some(Screen::Quit)),
                _ => (),
            }
        }
        Ok(None)
    }
}

impl Widget for &Game {
    fn render(self, area: Rect, buf: &mut Buffer) {
        GameView {
            snapshot: &self.snapshot,
            history: &self.globals.history,
        }
        .render(area, buf);
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
struct GameView<'a> {
    snapshot: &'a Snapshot,
    history: &'a History,
}

impl GameView<'_> {
    fn arena_block_size() -> (u16, u16) {
        let width = consts::ARENA_SIZE
            .width
            .saturating_mul(consts::CELL_WIDTH)
            .saturating_add(2);
        let height = consts::ARENA_SIZE.height.saturating_add(2);
        (width, height)
    }

    fn render_stats(&self, area: Rect, buf: &mut Buffer) {
        let block = Block::bordered().title(" Snake ");
        let inner = block.inner(area);
        block.render(area, buf);
        Text::from_iter([
            format!("Score:  {}", self.snapshot.score),
            format!("Length: {}", self.snapshot.snake.len()),
            format!("Mode:   {}", self.snapshot.difficulty),
        ])
        .render(inner, buf);
    }

    fn render_message(&self, area: Rect, buf: &mut Buffer) {
        let line = match self.snapshot.collision {
            None => Line::from_iter([
                Span::raw(" Steer with the arrow keys — Quit ("),
                Span::styled("q", consts::KEY_STYLE),
                Span::raw(")"),
            ]),
            Some(collision) => Line::from_iter([
                Span::raw(format!(" GAME OVER ({collision}) — Restart (")),
                Span::styled("r", consts::KEY_STYLE),
                Span::raw(") — Main Menu ("),
                Span::styled("m", consts::KEY_STYLE),
                Span::raw(") — Quit ("),
                Span::styled("q", consts::KEY_STYLE),
                Span::raw(")"),
            ]),
        };
        line.render(area, buf);
    }
}

impl Widget for GameView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let display = get_display_area(area);
        let (block_width, block_height) = Self::arena_block_size();
        let [board_area, msg_area] = Layout::vertical([block_height, 1]).areas(display);
        let [block_area, panel_area] = Layout::horizontal([block_width, consts::PANEL_WIDTH])
            .spacing(1)
            .areas(board_area);

        let block = Block::bordered();
        let arena_area = block.inner(block_area);
        block.render(block_area, buf);
        let mut arena = Canvas {
            area: arena_area,
            buf,
        };
        arena.draw_cell(
            self.snapshot.fruit,
            consts::FRUIT_SYMBOL,
            consts::FRUIT_STYLE,
        );
        let mut cells = self.snapshot.snake.iter().copied();
        let head = cells.next();
        for pos in cells {
            arena.draw_cell(pos, consts::SNAKE_BODY_SYMBOL, consts::SNAKE_STYLE);
        }
        // The head goes last so that a collision glyph covers whatever it hit
        if let Some(head) = head {
            if self.snapshot.is_over() {
                arena.draw_cell(head, consts::COLLISION_SYMBOL, consts::COLLISION_STYLE);
            } else {
                arena.draw_cell(
                    head,
                    head_symbol(self.snapshot.facing),
                    consts::SNAKE_STYLE,
                );
            }
        }

        let [stats_area, scores_area] = Layout::vertical([5, panel_area.height.saturating_sub(5)])
            .areas(panel_area);
        self.render_stats(stats_area, buf);
        Scoreboard::new(self.history).render(scores_area, buf);
        self.render_message(msg_area, buf);
    }
}

fn head_symbol(facing: Direction) -> &'static str {
    match facing {
        Direction::Up => consts::SNAKE_HEAD_UP_SYMBOL,
        Direction::Down => consts::SNAKE_HEAD_DOWN_SYMBOL,
        Direction::Left => consts::SNAKE_HEAD_LEFT_SYMBOL,
        Direction::Right => consts::SNAKE_HEAD_RIGHT_SYMBOL,
    }
}

/// Draws arena cells, each [`CELL_WIDTH`][consts::CELL_WIDTH] columns wide
#[derive(Debug, Eq, PartialEq)]
struct Canvas<'a> {
    area: Rect,
    buf: &'a mut Buffer,
}

impl Canvas<'_> {
    fn draw_cell(&mut self, pos: Position, symbol: &str, style: Style) {
        let (Ok(col), Ok(row)) = (u16::try_from(pos.x), u16::try_from(pos.y)) else {
            return;
        };
        let Some(x) = col
            .checked_mul(consts::CELL_WIDTH)
            .and_then(|dx| self.area.x.checked_add(dx))
        else {
            return;
        };
        let Some(y) = self.area.y.checked_add(row) else {
            return;
        };
        if x >= self.area.right() || y >= self.area.bottom() {
            return;
        }
        self.buf.set_stringn(
            x,
            y,
            symbol,
            usize::from(self.area.right() - x),
            Style::reset().patch(style),
        );
    }
}
