use super::grid::{Bounds, Position};
use super::snake::Snake;
use std::fmt;

/// Why a session ended
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Collision {
    /// The head left the arena
    Boundary,
    /// The head ran into the snake's own body
    SelfCollision,
}

impl Collision {
    pub(crate) fn as_str(self) -> &'static str {
        match self {
            Collision::Boundary => "boundary",
            Collision::SelfCollision => "self-collision",
        }
    }
}

impl fmt::Display for Collision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// Check whether moving the head to `new_head` is fatal, returning the kind of
/// collision if so.
///
/// `snake` is the body *before* the move.  In particular, its tail cell still
/// counts as occupied even though a non-growing move would vacate it, so
/// chasing one's own tail into the cell it is leaving is a collision.
pub(crate) fn check(new_head: Position, snake: &Snake, bounds: Bounds) -> Option<Collision> {
    if !bounds.contains(new_head) {
        Some(Collision::Boundary)
    } else if snake.contains(new_head) {
        Some(Collision::SelfCollision)
    } else {
        None
    }
}
