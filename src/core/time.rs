//! Day/night schedule and alignment bonuses

use anyhow::{anyhow, Result};
use num_derive::{FromPrimitive, ToPrimitive};
use num_traits::{FromPrimitive, ToPrimitive};

use super::convert::{FromIndex, ToIndex};
use super::units::Alignment;

/// Phase of the six-turn day cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, FromPrimitive, ToPrimitive)]
pub enum TimeOfDay {
    Dawn,
    Morning,
    Afternoon,
    Dusk,
    FirstWatch,
    SecondWatch,
}

impl TimeOfDay {
    pub fn next(self) -> Self {
        let idx = (self.to_index().unwrap() + 1) % 6;
        TimeOfDay::from_index(idx).unwrap()
    }

    fn is_day(self) -> bool {
        matches!(self, TimeOfDay::Morning | TimeOfDay::Afternoon)
    }

    fn is_night(self) -> bool {
        matches!(self, TimeOfDay::FirstWatch | TimeOfDay::SecondWatch)
    }

    /// Damage multiplier for a unit of the given alignment: lawful units
    /// strike 25% harder by day and weaker by night, chaotic the reverse.
    /// Twilight and neutral units are flat.
    pub fn combat_bonus(self, alignment: Alignment) -> f32 {
        match alignment {
            Alignment::Neutral => 1.0,
            Alignment::Lawful if self.is_day() => 1.25,
            Alignment::Lawful if self.is_night() => 0.75,
            Alignment::Chaotic if self.is_day() => 0.75,
            Alignment::Chaotic if self.is_night() => 1.25,
            _ => 1.0,
        }
    }
}

impl FromIndex for TimeOfDay {
    fn from_index(idx: usize) -> Result<Self> {
        FromPrimitive::from_usize(idx)
            .ok_or_else(|| anyhow!("Invalid time of day index: {}", idx))
    }
}

impl ToIndex for TimeOfDay {
    fn to_index(&self) -> Result<usize> {
        ToPrimitive::to_usize(self)
            .ok_or_else(|| anyhow!("Invalid time of day"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test]
    fn test_cycle_wraps() {
        let mut tod = TimeOfDay::Dawn;
        for _ in 0..6 {
            tod = tod.next();
        }
        assert_eq!(tod, TimeOfDay::Dawn);
    }

    #[test_case(TimeOfDay::Afternoon, Alignment::Lawful, 1.25)]
    #[test_case(TimeOfDay::Afternoon, Alignment::Chaotic, 0.75)]
    #[test_case(TimeOfDay::SecondWatch, Alignment::Chaotic, 1.25)]
    #[test_case(TimeOfDay::Dusk, Alignment::Lawful, 1.0)]
    #[test_case(TimeOfDay::FirstWatch, Alignment::Neutral, 1.0)]
    fn test_combat_bonus(tod: TimeOfDay, alignment: Alignment, expected: f32) {
        assert_eq!(tod.combat_bonus(alignment), expected);
    }
}
