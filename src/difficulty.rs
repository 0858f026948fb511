use crate::consts;
use enum_map::Enum;
use serde::Deserialize;
use std::fmt;
use std::time::Duration;

/// Speed of the snake, chosen once per session before the first tick
#[derive(Clone, Copy, Debug, Default, Deserialize, Enum, Eq, Hash, PartialEq)]
#[serde(rename_all = "kebab-case")]
pub(crate) enum Difficulty {
    Hell,
    Hard,
    #[default]
    Normal,
    Easy,
}

impl Difficulty {
    /// Iterate over the difficulty levels from fastest to slowest
    pub(crate) fn iter() -> impl Iterator<Item = Difficulty> {
        (0..Self::LENGTH).map(Self::from_usize)
    }

    /// Time between two moves of the snake
    pub(crate) fn tick_interval(self) -> Duration {
        match self {
            Difficulty::Hell => consts::HELL_TICK_PERIOD,
            Difficulty::Hard => consts::HARD_TICK_PERIOD,
            Difficulty::Normal => consts::NORMAL_TICK_PERIOD,
            Difficulty::Easy => consts::EASY_TICK_PERIOD,
        }
    }

    /// The mode label recorded in the session history
    pub(crate) fn as_str(self) -> &'static str {
        match self {
            Difficulty::Hell => "Hell",
            Difficulty::Hard => "Hard",
            Difficulty::Normal => "Normal",
            Difficulty::Easy => "Easy",
        }
    }

    /// The next faster level, if any
    pub(crate) fn faster(self) -> Option<Difficulty> {
        self.into_usize().checked_sub(1).map(Self::from_usize)
    }

    /// The next slower level, if any
    pub(crate) fn slower(self) -> Option<Difficulty> {
        let i = self.into_usize() + 1;
        (i < Self::LENGTH).then(|| Self::from_usize(i))
    }

    /// Look up a level by its one-based position in [`Difficulty::iter()`]
    pub(crate) fn from_ordinal(n: usize) -> Option<Difficulty> {
        n.checked_sub(1)
            .filter(|&i| i < Self::LENGTH)
            .map(Self::from_usize)
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}
