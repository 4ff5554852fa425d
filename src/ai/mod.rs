//! Combat planning: threat projection, attack search, plan evaluation

pub mod actions;
pub mod analysis;
pub mod combat;
pub mod move_map;
pub mod power;
pub mod search;
pub mod targets;

// Re-export key types
pub use actions::AiAction;
pub use analysis::AttackAnalysis;
pub use combat::{CombatModel, CombatOutcome, HpDist};
pub use move_map::{MoveMap, MoveMapProvider, MoveMaps};
pub use power::power_projection;
pub use search::{Interrupt, NoInterrupt, SearchSession};
pub use targets::find_attacks;
