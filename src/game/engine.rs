use super::collision::{self, Collision};
use super::direction::Direction;
use super::fruit;
use super::grid::{Bounds, Position};
use super::input::DirectionInput;
use super::snake::Snake;
use crate::consts;
use crate::difficulty::Difficulty;
use rand::Rng;

/// The complete state of one session.  Owned and mutated by exactly one
/// logic task; everybody else looks at [`Snapshot`]s.
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct GameState {
    snake: Snake,
    fruit: Position,
    /// Set when the snake has just eaten `fruit`; cleared by
    /// [`GameState::respawn_fruit()`]
    fruit_consumed: bool,
    input: DirectionInput,
    score: u32,
    collision: Option<Collision>,
    difficulty: Difficulty,
    bounds: Bounds,
}

/// Result of a single [`GameState::tick()`]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum TickOutcome {
    /// The snake moved without eating
    Moved,
    /// The snake moved onto the fruit and grew by one cell.  The fruit must be
    /// respawned before the next tick.
    Ate,
    /// The move was fatal; the state is frozen
    Terminal(Collision),
}

impl GameState {
    /// Start a session: one-cell snake at a random cell away from the
    /// right/bottom edges, random facing, and a fruit somewhere else.
    pub(crate) fn new<R: Rng + ?Sized>(
        difficulty: Difficulty,
        bounds: Bounds,
        rng: &mut R,
    ) -> GameState {
        let head = bounds.shrink(consts::HEAD_SPAWN_MARGIN).random_cell(rng);
        let direction = Direction::random(rng);
        let snake = Snake::new(head);
        let fruit = fruit::spawn(rng, &snake, bounds);
        GameState::from_parts(snake, fruit, direction, difficulty, bounds)
    }

    pub(crate) fn from_parts(
        snake: Snake,
        fruit: Position,
        direction: Direction,
        difficulty: Difficulty,
        bounds: Bounds,
    ) -> GameState {
        GameState {
            snake,
            fruit,
            fruit_consumed: false,
            input: DirectionInput::new(direction),
            score: 0,
            collision: None,
            difficulty,
            bounds,
        }
    }

    /// Request a turn; see [`DirectionInput::propose()`]
    pub(crate) fn propose(&mut self, direction: Direction) -> bool {
        self.input.propose(direction)
    }

    /// Advance the snake one cell in the pending direction.
    ///
    /// Collisions are checked against the body as it was before the move.
    /// Once a collision has occurred, every further call returns the same
    /// `Terminal` outcome without changing anything.
    pub(crate) fn tick(&mut self) -> TickOutcome {
        if let Some(collision) = self.collision {
            return TickOutcome::Terminal(collision);
        }
        debug_assert!(
            !self.fruit_consumed,
            "tick() called before the eaten fruit was respawned"
        );
        let new_head = self.snake.head().step(self.input.pending());
        if let Some(collision) = collision::check(new_head, &self.snake, self.bounds) {
            self.collision = Some(collision);
            return TickOutcome::Terminal(collision);
        }
        let ate = new_head == self.fruit;
        self.snake.advance(new_head, ate);
        self.input.commit();
        if ate {
            self.score += 1;
            self.fruit_consumed = true;
            TickOutcome::Ate
        } else {
            TickOutcome::Moved
        }
    }

    /// Place a new fruit after the previous one was eaten.  Does nothing if
    /// the current fruit has not been eaten.
    pub(crate) fn respawn_fruit<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        if self.fruit_consumed {
            self.fruit = fruit::spawn(rng, &self.snake, self.bounds);
            self.fruit_consumed = false;
        }
    }

    pub(crate) fn snake(&self) -> &Snake {
        &self.snake
    }

    pub(crate) fn fruit(&self) -> Position {
        self.fruit
    }

    pub(crate) fn fruit_consumed(&self) -> bool {
        self.fruit_consumed
    }

    pub(crate) fn score(&self) -> u32 {
        self.score
    }

    pub(crate) fn alive(&self) -> bool {
        self.collision.is_none()
    }

    pub(crate) fn collision(&self) -> Option<Collision> {
        self.collision
    }

    pub(crate) fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    pub(crate) fn previous_direction(&self) -> Direction {
        self.input.committed()
    }

    pub(crate) fn pending_direction(&self) -> Direction {
        self.input.pending()
    }

    /// Capture everything a renderer needs
    pub(crate) fn snapshot(&self) -> Snapshot {
        Snapshot {
            snake: self.snake.cells().collect(),
            fruit: self.fruit,
            facing: self.input.committed(),
            score: self.score,
            difficulty: self.difficulty,
            collision: self.collision,
        }
    }
}

/// Immutable view of a [`GameState`] handed to readers
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct Snapshot {
    /// Snake cells, head first
    pub(crate) snake: Vec<Position>,
    pub(crate) fruit: Position,
    /// Direction of the most recent move
    pub(crate) facing: Direction,
    pub(crate) score: u32,
    pub(crate) difficulty: Difficulty,
    /// Set once the session is over
    pub(crate) collision: Option<Collision>,
}

impl Snapshot {
    pub(crate) fn is_over(&self) -> bool {
        self.collision.is_some()
    }
}
