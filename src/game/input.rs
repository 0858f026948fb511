use super::direction::Direction;

/// Turns requested by the player, validated against the direction the snake
/// last actually moved in.
///
/// Requests only ever touch the pending direction.  The committed direction
/// is advanced by the movement step via [`DirectionInput::commit()`], so a
/// quick "reverse, then back" within one tick cannot sneak a reversal past the
/// check.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct DirectionInput {
    committed: Direction,
    pending: Direction,
}

impl DirectionInput {
    pub(crate) fn new(direction: Direction) -> DirectionInput {
        DirectionInput {
            committed: direction,
            pending: direction,
        }
    }

    /// Request a turn.  A request to reverse the committed direction is
    /// ignored; otherwise it replaces any earlier request.  Returns whether the
    /// request was accepted.
    pub(crate) fn propose(&mut self, direction: Direction) -> bool {
        if direction == self.committed.reverse() {
            false
        } else {
            self.pending = direction;
            true
        }
    }

    /// The direction the next tick will move in
    pub(crate) fn pending(&self) -> Direction {
        self.pending
    }

    /// The direction of the most recently completed move
    pub(crate) fn committed(&self) -> Direction {
        self.committed
    }

    /// Record that the snake has moved in the pending direction
    pub(crate) fn commit(&mut self) {
        self.committed = self.pending;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(Direction::Up)]
    #[case(Direction::Down)]
    #[case(Direction::Left)]
    #[case(Direction::Right)]
    fn reversal_is_noop(#[case] d: Direction) {
        let mut input = DirectionInput::new(d);
        let before = input;
        assert!(!input.propose(d.reverse()));
        assert_eq!(input, before);
    }

    #[test]
    fn last_valid_request_wins() {
        let mut input = DirectionInput::new(Direction::Right);
        assert!(input.propose(Direction::Up));
        assert!(input.propose(Direction::Down));
        assert_eq!(input.pending(), Direction::Down);
        assert_eq!(input.committed(), Direction::Right);
    }

    #[test]
    fn reversal_checked_against_committed_direction() {
        let mut input = DirectionInput::new(Direction::Right);
        assert!(input.propose(Direction::Up));
        // Opposite of the committed direction, not of the pending one
        assert!(!input.propose(Direction::Left));
        assert!(input.propose(Direction::Right));
        assert_eq!(input.pending(), Direction::Right);
    }

    #[test]
    fn commit_advances_reversal_check() {
        let mut input = DirectionInput::new(Direction::Right);
        assert!(input.propose(Direction::Up));
        input.commit();
        assert_eq!(input.committed(), Direction::Up);
        assert!(!input.propose(Direction::Down));
        assert!(input.propose(Direction::Left));
    }
}
