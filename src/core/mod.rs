//! Core battlefield representations

pub mod board;
pub mod convert;
pub mod display;
pub mod loc;
pub mod map;
pub mod side;
pub mod team;
pub mod time;
pub mod units;

pub use board::{Board, Piece};
pub use convert::{FromIndex, ToIndex};
pub use loc::Loc;
pub use map::{HexArray, Map, Terrain};
pub use side::{Side, SideArray};
pub use team::Team;
pub use time::TimeOfDay;
pub use units::{Alignment, TerrainClass, UnitLabel, UnitStats, Weapon};
