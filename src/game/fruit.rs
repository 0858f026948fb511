use super::grid::{Bounds, Position};
use super::snake::Snake;
use rand::Rng;

/// Pick a cell for the next fruit by rejection sampling: draw uniformly random
/// cells until one is not occupied by the snake.
///
/// This never returns if the snake fills the whole arena.
pub(crate) fn spawn<R: Rng + ?Sized>(rng: &mut R, snake: &Snake, bounds: Bounds) -> Position {
    loop {
        let pos = bounds.random_cell(rng);
        if !snake.contains(pos) {
            return pos;
        }
    }
}
