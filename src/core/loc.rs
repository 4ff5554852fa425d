use std::{
    fmt::Display, ops::{Add, Neg, Sub}, str::FromStr
};
use anyhow::Context;

/// A location on the battlefield grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Loc {
    pub x: i32,
    pub y: i32,
}

impl Loc {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// The six neighboring hexes, unfiltered; callers drop the ones that
    /// fall outside the map.
    pub fn neighbors(&self) -> [Loc; 6] {
        DIRS.map(|dir| self + &dir.into())
    }

    /// The hex on the far side of `self` as seen from `from`; `from` must be
    /// one of the six neighbors.
    pub fn opposite(&self, from: &Loc) -> Loc {
        self + &(self - from)
    }

    pub fn dist(&self, other: &Loc) -> i32 {
        (self - other).length()
    }
}

impl From<(i32, i32)> for Loc {
    fn from((x, y): (i32, i32)) -> Self {
        Self { x, y }
    }
}

impl FromStr for Loc {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (x, y) = s.split_once(',')
            .context("Invalid loc")?;

        Ok(Loc {
            x: x.parse()?,
            y: y.parse()?,
        })
    }
}

impl Display for Loc {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", (self.x as u8 + b'a') as char, self.y)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LocDelta {
    pub dx: i32,
    pub dy: i32,
}

impl LocDelta {
    pub fn length(&self) -> i32 {
        [self.dx.abs(), self.dy.abs(), (self.dx + self.dy).abs()]
            .into_iter()
            .max()
            .unwrap()
    }
}

impl Add<&LocDelta> for &Loc {
    type Output = Loc;

    fn add(self, other: &LocDelta) -> Self::Output {
        Loc {
            x: self.x + other.dx,
            y: self.y + other.dy,
        }
    }
}

impl Sub<&LocDelta> for &Loc {
    type Output = Loc;

    fn sub(self, other: &LocDelta) -> Self::Output {
        Loc {
            x: self.x - other.dx,
            y: self.y - other.dy,
        }
    }
}

impl Sub<&Loc> for &Loc {
    type Output = LocDelta;

    fn sub(self, other: &Loc) -> Self::Output {
        LocDelta {
            dx: self.x - other.x,
            dy: self.y - other.y,
        }
    }
}

impl Neg for &LocDelta {
    type Output = LocDelta;

    fn neg(self) -> Self::Output {
        LocDelta {
            dx: -self.dx,
            dy: -self.dy,
        }
    }
}

enum Dir {
    W,
    NW,
    NE,
    E,
    SE,
    SW,
}

// Opposite directions sit three apart, which the flanking checks rely on.
const DIRS: [Dir; 6] = [
    Dir::W,
    Dir::NW,
    Dir::NE,
    Dir::E,
    Dir::SE,
    Dir::SW,
];

impl From<Dir> for LocDelta {
    fn from(dir: Dir) -> Self {
        match dir {
            Dir::W => LocDelta { dx: -1, dy: 0 },
            Dir::NW => LocDelta { dx: -1, dy: 1 },
            Dir::NE => LocDelta { dx: 0, dy: 1 },
            Dir::E => LocDelta { dx: 1, dy: 0 },
            Dir::SE => LocDelta { dx: 1, dy: -1 },
            Dir::SW => LocDelta { dx: 0, dy: -1 },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_neighbors_are_adjacent() {
        let loc = Loc::new(4, 4);
        for n in loc.neighbors() {
            assert_eq!(loc.dist(&n), 1);
        }
    }

    #[test]
    fn test_opposite_pairs() {
        let loc = Loc::new(3, 3);
        let n = loc.neighbors();
        for i in 0..3 {
            assert_eq!(loc.opposite(&n[i]), n[i + 3]);
        }
    }

    #[test]
    fn test_loc_ordering_and_parse() {
        assert!(Loc::new(1, 2) < Loc::new(2, 0));
        let loc: Loc = "3,5".parse().unwrap();
        assert_eq!(loc, Loc::new(3, 5));
        assert!("35".parse::<Loc>().is_err());
    }
}
