use crate::consts;
use crate::history::History;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Text},
    widgets::{Block, Widget},
};

/// Bordered table of the best past sessions, highest score first
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct Scoreboard<'a> {
    history: &'a History,
}

impl<'a> Scoreboard<'a> {
    pub(crate) fn new(history: &'a History) -> Self {
        Scoreboard { history }
    }
}

impl Widget for Scoreboard<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::bordered().title(" History ");
        let inner = block.inner(area);
        block.render(area, buf);
        let ranked = self.history.ranked();
        if ranked.is_empty() {
            Line::from("No games played yet").render(inner, buf);
            return;
        }
        let header = format!("{:>4} {:>5} {:<6} {}", "Rank", "Score", "Mode", "Date");
        let mut text = Text::from(Line::styled(header, consts::HISTORY_HEADER_STYLE));
        for (i, rec) in ranked.into_iter().enumerate() {
            text.push_line(format!(
                "{:>4} {:>5} {:<6} {}",
                i + 1,
                rec.score,
                rec.mode,
                rec.date
            ));
        }
        text.render(inner, buf);
    }
}
