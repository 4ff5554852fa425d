//! Unit roster and stat lines

use anyhow::{anyhow, Result};
use lazy_static::lazy_static;
use num_derive::{FromPrimitive, ToPrimitive};
use num_traits::{FromPrimitive, ToPrimitive};

use super::convert::{FromIndex, ToIndex};
use super::time::TimeOfDay;

/// Combat alignment: which part of the day favors the unit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Alignment {
    Lawful,
    Neutral,
    Chaotic,
}

/// Movement class used by the terrain defense tables
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TerrainClass {
    Foot,
    Mounted,
    Scout,
}

/// A single weapon line
#[derive(Debug, Clone)]
pub struct Weapon {
    pub name: &'static str,
    pub damage: i32,
    pub strikes: i32,
    pub slows: bool,
    pub backstab: bool,
}

impl Weapon {
    /// Damage over a full round if every strike lands, adjusted for the
    /// time of day.
    pub fn expected_damage(&self, alignment: Alignment, time: TimeOfDay) -> f32 {
        (self.damage * self.strikes) as f32 * time.combat_bonus(alignment)
    }
}

/// Stat line for one unit type
#[derive(Debug, Clone)]
pub struct UnitStats {
    pub cost: i32,
    pub hitpoints: i32,
    pub level: i32,
    pub max_experience: i32,
    pub alignment: Alignment,
    pub terrain_class: TerrainClass,
    pub can_recruit: bool,
    pub weapons: Vec<Weapon>,
}

impl UnitStats {
    pub fn has_slowing_weapon(&self) -> bool {
        self.weapons.iter().any(|w| w.slows)
    }

    pub fn has_backstab_weapon(&self) -> bool {
        self.weapons.iter().any(|w| w.backstab)
    }

    /// Strongest single-weapon round of damage at the given time of day.
    pub fn best_expected_damage(&self, time: TimeOfDay) -> f32 {
        self.weapons
            .iter()
            .map(|w| w.expected_damage(self.alignment, time))
            .fold(0.0, f32::max)
    }
}

/// Labels for the unit types in the roster
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, FromPrimitive, ToPrimitive)]
pub enum UnitLabel {
    Spearman,
    Bowman,
    HeavyInfantry,
    Cavalryman,
    Rogue,
    Sorceress,
    Wolf,
    Commander,
}

impl UnitLabel {
    pub fn stats(&self) -> &'static UnitStats {
        &ROSTER[*self as usize]
    }

    /// Single-character tag used by map parsing and board rendering
    pub fn to_char(self) -> char {
        match self {
            UnitLabel::Spearman => 'S',
            UnitLabel::Bowman => 'B',
            UnitLabel::HeavyInfantry => 'H',
            UnitLabel::Cavalryman => 'C',
            UnitLabel::Rogue => 'R',
            UnitLabel::Sorceress => 'O',
            UnitLabel::Wolf => 'W',
            UnitLabel::Commander => 'L',
        }
    }

    pub fn from_char(c: char) -> Option<Self> {
        match c.to_ascii_uppercase() {
            'S' => Some(UnitLabel::Spearman),
            'B' => Some(UnitLabel::Bowman),
            'H' => Some(UnitLabel::HeavyInfantry),
            'C' => Some(UnitLabel::Cavalryman),
            'R' => Some(UnitLabel::Rogue),
            'O' => Some(UnitLabel::Sorceress),
            'W' => Some(UnitLabel::Wolf),
            'L' => Some(UnitLabel::Commander),
            _ => None,
        }
    }
}

impl FromIndex for UnitLabel {
    fn from_index(idx: usize) -> Result<Self> {
        FromPrimitive::from_usize(idx)
            .ok_or_else(|| anyhow!("Invalid unit index: {}", idx))
    }
}

impl ToIndex for UnitLabel {
    fn to_index(&self) -> Result<usize> {
        ToPrimitive::to_usize(self)
            .ok_or_else(|| anyhow!("Invalid unit label"))
    }
}

lazy_static! {
    /// Stat table indexed by `UnitLabel`. Weapon lists keep this out of
    /// `const` land.
    pub static ref ROSTER: Vec<UnitStats> = vec![
        // Spearman
        UnitStats {
            cost: 14,
            hitpoints: 36,
            level: 1,
            max_experience: 42,
            alignment: Alignment::Lawful,
            terrain_class: TerrainClass::Foot,
            can_recruit: false,
            weapons: vec![
                Weapon { name: "spear", damage: 7, strikes: 3, slows: false, backstab: false },
            ],
        },
        // Bowman
        UnitStats {
            cost: 14,
            hitpoints: 33,
            level: 1,
            max_experience: 39,
            alignment: Alignment::Lawful,
            terrain_class: TerrainClass::Foot,
            can_recruit: false,
            weapons: vec![
                Weapon { name: "dagger", damage: 4, strikes: 2, slows: false, backstab: false },
                Weapon { name: "bow", damage: 6, strikes: 3, slows: false, backstab: false },
            ],
        },
        // Heavy infantry
        UnitStats {
            cost: 19,
            hitpoints: 38,
            level: 1,
            max_experience: 40,
            alignment: Alignment::Lawful,
            terrain_class: TerrainClass::Foot,
            can_recruit: false,
            weapons: vec![
                Weapon { name: "mace", damage: 11, strikes: 2, slows: false, backstab: false },
            ],
        },
        // Cavalryman
        UnitStats {
            cost: 23,
            hitpoints: 34,
            level: 1,
            max_experience: 40,
            alignment: Alignment::Lawful,
            terrain_class: TerrainClass::Mounted,
            can_recruit: false,
            weapons: vec![
                Weapon { name: "sabre", damage: 6, strikes: 3, slows: false, backstab: false },
            ],
        },
        // Rogue
        UnitStats {
            cost: 17,
            hitpoints: 28,
            level: 1,
            max_experience: 42,
            alignment: Alignment::Chaotic,
            terrain_class: TerrainClass::Scout,
            can_recruit: false,
            weapons: vec![
                Weapon { name: "knife", damage: 5, strikes: 4, slows: false, backstab: true },
            ],
        },
        // Sorceress
        UnitStats {
            cost: 20,
            hitpoints: 24,
            level: 1,
            max_experience: 41,
            alignment: Alignment::Chaotic,
            terrain_class: TerrainClass::Foot,
            can_recruit: false,
            weapons: vec![
                Weapon { name: "touch", damage: 4, strikes: 3, slows: true, backstab: false },
                Weapon { name: "bolt", damage: 7, strikes: 2, slows: false, backstab: false },
            ],
        },
        // Wolf
        UnitStats {
            cost: 12,
            hitpoints: 26,
            level: 1,
            max_experience: 35,
            alignment: Alignment::Chaotic,
            terrain_class: TerrainClass::Mounted,
            can_recruit: false,
            weapons: vec![
                Weapon { name: "fangs", damage: 5, strikes: 3, slows: false, backstab: false },
            ],
        },
        // Commander
        UnitStats {
            cost: 30,
            hitpoints: 45,
            level: 2,
            max_experience: 80,
            alignment: Alignment::Neutral,
            terrain_class: TerrainClass::Foot,
            can_recruit: true,
            weapons: vec![
                Weapon { name: "sword", damage: 8, strikes: 4, slows: false, backstab: false },
            ],
        },
    ];
}
