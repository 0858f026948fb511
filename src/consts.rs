//! Assorted constants & hard-coded configuration
use ratatui::{
    layout::Size,
    style::{Color, Modifier, Style},
};
use std::time::Duration;

/// Time between redraws of the game screen, independent of the difficulty
pub(crate) const RENDER_PERIOD: Duration = Duration::from_millis(50);

/// Time between snake movements on [`Difficulty::Hell`][crate::difficulty::Difficulty::Hell]
pub(crate) const HELL_TICK_PERIOD: Duration = Duration::from_millis(50);

/// Time between snake movements on [`Difficulty::Hard`][crate::difficulty::Difficulty::Hard]
pub(crate) const HARD_TICK_PERIOD: Duration = Duration::from_millis(100);

/// Time between snake movements on [`Difficulty::Normal`][crate::difficulty::Difficulty::Normal]
pub(crate) const NORMAL_TICK_PERIOD: Duration = Duration::from_millis(300);

/// Time between snake movements on [`Difficulty::Easy`][crate::difficulty::Difficulty::Easy]
pub(crate) const EASY_TICK_PERIOD: Duration = Duration::from_millis(500);

/// Size of the arena in cells
pub(crate) const ARENA_SIZE: Size = Size {
    width: 30,
    height: 30,
};

/// The snake's starting cell is never within this many cells of the right or
/// bottom edge of the arena.
pub(crate) const HEAD_SPAWN_MARGIN: u16 = 5;

/// Number of terminal columns used to draw one arena cell
pub(crate) const CELL_WIDTH: u16 = 2;

/// Draw everything inside a rectangle of this size in the center of the
/// terminal window.
///
/// Cf. [`crate::util::get_display_area()`]
pub(crate) const DISPLAY_SIZE: Size = Size {
    width: 96,
    height: 33,
};

/// Width of the side panel holding the score and history
pub(crate) const PANEL_WIDTH: u16 = 32;

/// The number of past sessions shown in the ranked history table
pub(crate) const HISTORY_DISPLAY_LIMIT: usize = 20;

/// Glyph for the snake's head when it is moving up
pub(crate) const SNAKE_HEAD_UP_SYMBOL: &str = "▲▲";

/// Glyph for the snake's head when it is moving down
pub(crate) const SNAKE_HEAD_DOWN_SYMBOL: &str = "▼▼";

/// Glyph for the snake's head when it is moving left
pub(crate) const SNAKE_HEAD_LEFT_SYMBOL: &str = "◀◀";

/// Glyph for the snake's head when it is moving right
pub(crate) const SNAKE_HEAD_RIGHT_SYMBOL: &str = "▶▶";

/// Glyph for the parts of the snake's body
pub(crate) const SNAKE_BODY_SYMBOL: &str = "▓▓";

/// Glyph for the fruit
pub(crate) const FRUIT_SYMBOL: &str = "()";

/// Glyph for the snake's head once it has collided with a wall or itself
pub(crate) const COLLISION_SYMBOL: &str = "××";

/// Style for the snake's head and body
pub(crate) const SNAKE_STYLE: Style = Style::new().fg(Color::Green).add_modifier(Modifier::BOLD);

/// Style for the fruit
pub(crate) const FRUIT_STYLE: Style = Style::new().fg(Color::LightRed);

/// Style for [`COLLISION_SYMBOL`]
pub(crate) const COLLISION_STYLE: Style = Style::new()
    .fg(Color::LightRed)
    .add_modifier(Modifier::REVERSED);

/// Style for key codes shown in the interface
pub(crate) const KEY_STYLE: Style = Style::new().fg(Color::Yellow);

/// Style for the title on the startup screen
pub(crate) const TITLE_STYLE: Style = Style::new().fg(Color::Green).add_modifier(Modifier::BOLD);

/// Style for the header row of the history table
pub(crate) const HISTORY_HEADER_STYLE: Style = Style::new().add_modifier(Modifier::BOLD);

/// Style for the currently-selected menu item
pub(crate) const MENU_SELECTION_STYLE: Style = Style::new().add_modifier(Modifier::UNDERLINED);
