use super::direction::Direction;
use rand::Rng;
use ratatui::layout::Size;

/// A cell of the arena, in cell units with the origin at the top-left corner.
///
/// Coordinates are signed so that a step off the top or left edge produces a
/// representable (out-of-bounds) position rather than wrapping.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub(crate) struct Position {
    pub(crate) x: i32,
    pub(crate) y: i32,
}

impl Position {
    #[cfg(test)]
    pub(crate) const fn new(x: i32, y: i32) -> Position {
        Position { x, y }
    }

    /// Return the cell one step away from `self` in `direction`
    pub(crate) fn step(self, direction: Direction) -> Position {
        let (dx, dy) = direction.delta();
        Position {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// Are `self` and `other` orthogonal neighbors?
    #[cfg(test)]
    pub(crate) fn is_adjacent(self, other: Position) -> bool {
        self.x.abs_diff(other.x) + self.y.abs_diff(other.y) == 1
    }
}

/// The dimensions of the arena in cells
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct Bounds {
    pub(crate) width: u16,
    pub(crate) height: u16,
}

impl Bounds {
    /// Does `pos` lie within `[0, width) × [0, height)`?
    pub(crate) fn contains(self, pos: Position) -> bool {
        (0..i32::from(self.width)).contains(&pos.x) && (0..i32::from(self.height)).contains(&pos.y)
    }

    /// Draw a uniformly random cell.
    ///
    /// # Panics
    ///
    /// Panics if either dimension is zero.
    pub(crate) fn random_cell<R: Rng + ?Sized>(self, rng: &mut R) -> Position {
        Position {
            x: rng.random_range(0..i32::from(self.width)),
            y: rng.random_range(0..i32::from(self.height)),
        }
    }

    /// Return the bounds with `margin` cells shaved off the right and bottom
    /// edges, never shrinking below a single cell.
    pub(crate) fn shrink(self, margin: u16) -> Bounds {
        Bounds {
            width: self.width.saturating_sub(margin).max(1),
            height: self.height.saturating_sub(margin).max(1),
        }
    }
}

impl From<Size> for Bounds {
    fn from(size: Size) -> Bounds {
        Bounds {
            width: size.width,
            height: size.height,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha12Rng;
    use rstest::rstest;

    const BOUNDS: Bounds = Bounds {
        width: 10,
        height: 15,
    };

    #[rstest]
    #[case(Position::new(0, 0), true)]
    #[case(Position::new(9, 14), true)]
    #[case(Position::new(-1, 3), false)]
    #[case(Position::new(3, -1), false)]
    #[case(Position::new(10, 3), false)]
    #[case(Position::new(3, 15), false)]
    fn test_contains(#[case] pos: Position, #[case] inside: bool) {
        assert_eq!(BOUNDS.contains(pos), inside);
    }

    #[rstest]
    #[case(Position::new(2, 7), Position::new(2, 8), true)]
    #[case(Position::new(2, 7), Position::new(1, 7), true)]
    #[case(Position::new(2, 7), Position::new(3, 8), false)]
    #[case(Position::new(2, 7), Position::new(2, 7), false)]
    #[case(Position::new(2, 7), Position::new(2, 9), false)]
    fn test_is_adjacent(#[case] a: Position, #[case] b: Position, #[case] adjacent: bool) {
        assert_eq!(a.is_adjacent(b), adjacent);
    }

    #[test]
    fn random_cells_stay_in_bounds() {
        let mut rng = ChaCha12Rng::seed_from_u64(0x5EED);
        for _ in 0..1000 {
            assert!(BOUNDS.contains(BOUNDS.random_cell(&mut rng)));
        }
    }

    #[test]
    fn shrink_keeps_one_cell() {
        assert_eq!(
            BOUNDS.shrink(5),
            Bounds {
                width: 5,
                height: 10
            }
        );
        assert_eq!(
            BOUNDS.shrink(40),
            Bounds {
                width: 1,
                height: 1
            }
        );
    }
}
