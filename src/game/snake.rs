use super::grid::Position;
use std::collections::VecDeque;

/// Snake state.  Snate.
///
/// Cells are stored head first; the tail is the last element.  A snake always
/// has at least one cell.
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct Snake {
    body: VecDeque<Position>,
}

impl Snake {
    /// Create a one-cell snake at `head`
    pub(crate) fn new(head: Position) -> Snake {
        Snake {
            body: VecDeque::from([head]),
        }
    }

    /// Create a snake from its cells, head first.  Returns `None` if `cells`
    /// is empty.
    #[cfg(test)]
    pub(crate) fn from_cells<I: IntoIterator<Item = Position>>(cells: I) -> Option<Snake> {
        let body = cells.into_iter().collect::<VecDeque<_>>();
        (!body.is_empty()).then_some(Snake { body })
    }

    /// Return the position of the snake's head
    pub(crate) fn head(&self) -> Position {
        // `body` is never empty.
        self.body[0]
    }

    #[cfg(test)]
    pub(crate) fn tail(&self) -> Position {
        self.body[self.body.len() - 1]
    }

    pub(crate) fn len(&self) -> usize {
        self.body.len()
    }

    /// Iterate over the snake's cells from head to tail
    pub(crate) fn cells(&self) -> impl Iterator<Item = Position> + '_ {
        self.body.iter().copied()
    }

    pub(crate) fn contains(&self, pos: Position) -> bool {
        self.body.contains(&pos)
    }

    /// Move the head to `new_head`.  Unless `grow` is true, the tail cell is
    /// vacated so that the length stays the same.
    pub(crate) fn advance(&mut self, new_head: Position, grow: bool) {
        self.body.push_front(new_head);
        if !grow {
            let _ = self.body.pop_back();
        }
    }
}
