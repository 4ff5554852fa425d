//! Map and hex grid representations

use anyhow::{anyhow, ensure, Result};
use num_derive::{FromPrimitive, ToPrimitive};
use num_traits::{FromPrimitive, ToPrimitive};

use super::convert::{FromIndex, ToIndex};
use super::loc::Loc;
use super::units::TerrainClass;

/// Terrain of one battlefield hex
#[derive(Debug, Clone, Copy, PartialEq, Eq, FromPrimitive, ToPrimitive)]
pub enum Terrain {
    Plains,
    Forest,
    Hills,
    Mountains,
    Swamp,
    Water,
    Village,
    Castle,
    Keep,
}

impl Terrain {
    pub fn is_village(self) -> bool {
        self == Terrain::Village
    }

    pub fn is_keep(self) -> bool {
        self == Terrain::Keep
    }

    pub fn to_char(self) -> char {
        match self {
            Terrain::Plains => 'g',
            Terrain::Forest => 'f',
            Terrain::Hills => 'h',
            Terrain::Mountains => 'm',
            Terrain::Swamp => 's',
            Terrain::Water => 'w',
            Terrain::Village => 'v',
            Terrain::Castle => 'c',
            Terrain::Keep => 'k',
        }
    }

    pub fn from_char(c: char) -> Option<Self> {
        match c {
            'g' => Some(Terrain::Plains),
            'f' => Some(Terrain::Forest),
            'h' => Some(Terrain::Hills),
            'm' => Some(Terrain::Mountains),
            's' => Some(Terrain::Swamp),
            'w' => Some(Terrain::Water),
            'v' => Some(Terrain::Village),
            'c' => Some(Terrain::Castle),
            'k' => Some(Terrain::Keep),
            _ => None,
        }
    }
}

impl FromIndex for Terrain {
    fn from_index(idx: usize) -> Result<Self> {
        FromPrimitive::from_usize(idx)
            .ok_or_else(|| anyhow!("Invalid terrain index: {}", idx))
    }
}

impl ToIndex for Terrain {
    fn to_index(&self) -> Result<usize> {
        ToPrimitive::to_usize(self)
            .ok_or_else(|| anyhow!("Invalid terrain"))
    }
}

/// Chance in [0, 1] that a unit of the given class is hit while standing on
/// the given terrain. Lower is better ground.
pub fn hit_chance(class: TerrainClass, terrain: Terrain) -> f32 {
    match class {
        TerrainClass::Foot => match terrain {
            Terrain::Plains => 0.60,
            Terrain::Forest => 0.50,
            Terrain::Hills => 0.50,
            Terrain::Mountains => 0.40,
            Terrain::Swamp => 0.80,
            Terrain::Water => 0.80,
            Terrain::Village => 0.40,
            Terrain::Castle => 0.40,
            Terrain::Keep => 0.40,
        },
        TerrainClass::Mounted => match terrain {
            Terrain::Plains => 0.60,
            Terrain::Forest => 0.70,
            Terrain::Hills => 0.60,
            Terrain::Mountains => 0.80,
            Terrain::Swamp => 0.80,
            Terrain::Water => 0.80,
            Terrain::Village => 0.60,
            Terrain::Castle => 0.60,
            Terrain::Keep => 0.60,
        },
        TerrainClass::Scout => match terrain {
            Terrain::Plains => 0.60,
            Terrain::Forest => 0.30,
            Terrain::Hills => 0.40,
            Terrain::Mountains => 0.40,
            Terrain::Swamp => 0.70,
            Terrain::Water => 0.70,
            Terrain::Village => 0.30,
            Terrain::Castle => 0.40,
            Terrain::Keep => 0.40,
        },
    }
}

/// Grid of hexagonal tiles
#[derive(Debug, Clone)]
pub struct HexArray<T> {
    width: usize,
    height: usize,
    tiles: Vec<T>,
}

impl<T: Clone> HexArray<T> {
    /// Create a new hex grid with given dimensions
    pub fn new(width: usize, height: usize, default: T) -> Self {
        Self {
            width,
            height,
            tiles: vec![default; width * height],
        }
    }

    /// Get tile at specified location
    pub fn get(&self, loc: Loc) -> Option<&T> {
        if self.in_bounds(loc) {
            Some(&self.tiles[self.index(loc)])
        } else {
            None
        }
    }

    /// Set tile at specified location
    pub fn set(&mut self, loc: Loc, value: T) -> bool {
        if self.in_bounds(loc) {
            let index = self.index(loc);
            self.tiles[index] = value;
            true
        } else {
            false
        }
    }

    pub fn in_bounds(&self, loc: Loc) -> bool {
        loc.x >= 0 && loc.x < self.width as i32 &&
        loc.y >= 0 && loc.y < self.height as i32
    }

    fn index(&self, loc: Loc) -> usize {
        (loc.y as usize) * self.width + (loc.x as usize)
    }
}

/// A battlefield map: terrain per hex
#[derive(Debug, Clone)]
pub struct Map {
    hexes: HexArray<Terrain>,
    width: usize,
    height: usize,
}

impl Map {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            hexes: HexArray::new(width, height, Terrain::Plains),
            width,
            height,
        }
    }

    /// Parse a map from terrain-character rows, top row first.
    pub fn parse(rows: &[&str]) -> Result<Self> {
        ensure!(!rows.is_empty(), "Map needs at least one row");
        let width = rows[0].chars().count();
        let mut map = Map::new(width, rows.len());

        for (y, row) in rows.iter().enumerate() {
            ensure!(
                row.chars().count() == width,
                "Ragged map row {}: expected width {}",
                y,
                width
            );
            for (x, c) in row.chars().enumerate() {
                let terrain = Terrain::from_char(c)
                    .ok_or_else(|| anyhow!("Unknown terrain char '{}'", c))?;
                map.hexes.set(Loc::new(x as i32, y as i32), terrain);
            }
        }

        Ok(map)
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn in_bounds(&self, loc: Loc) -> bool {
        self.hexes.in_bounds(loc)
    }

    pub fn get(&self, loc: Loc) -> Option<Terrain> {
        self.hexes.get(loc).copied()
    }

    pub fn set(&mut self, loc: Loc, terrain: Terrain) -> bool {
        self.hexes.set(loc, terrain)
    }

    pub fn is_village(&self, loc: Loc) -> bool {
        self.get(loc).map_or(false, Terrain::is_village)
    }

    /// Hit chance for the class on the terrain at `loc`; off-board hexes
    /// count as open ground.
    pub fn hit_chance_at(&self, class: TerrainClass, loc: Loc) -> f32 {
        hit_chance(class, self.get(loc).unwrap_or(Terrain::Plains))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_round_trip() {
        let map = Map::parse(&[
            "ggfg",
            "gvhg",
            "wwck",
        ]).unwrap();

        assert_eq!(map.width(), 4);
        assert_eq!(map.height(), 3);
        assert_eq!(map.get(Loc::new(2, 0)), Some(Terrain::Forest));
        assert_eq!(map.get(Loc::new(1, 1)), Some(Terrain::Village));
        assert_eq!(map.get(Loc::new(3, 2)), Some(Terrain::Keep));
        assert_eq!(map.get(Loc::new(4, 0)), None);
        assert!(map.is_village(Loc::new(1, 1)));
    }

    #[test]
    fn test_parse_rejects_bad_input() {
        assert!(Map::parse(&[]).is_err());
        assert!(Map::parse(&["gg", "g"]).is_err());
        assert!(Map::parse(&["gx"]).is_err());
    }

    #[test]
    fn test_hit_chance_prefers_cover() {
        assert!(hit_chance(TerrainClass::Foot, Terrain::Village)
            < hit_chance(TerrainClass::Foot, Terrain::Plains));
        assert!(hit_chance(TerrainClass::Scout, Terrain::Forest)
            < hit_chance(TerrainClass::Mounted, Terrain::Forest));
    }
}
