//! Actions the planner hands to the downstream executor

use std::fmt;

use crate::core::{Loc, UnitLabel};

use super::analysis::AttackAnalysis;

/// The closed set of things the surrounding AI framework can be told to do.
/// The combat planner itself only ever produces `Attack`; the other kinds
/// come from the recruitment and scripting layers that share the executor.
#[derive(Debug, Clone)]
pub enum AiAction {
    Move {
        from: Loc,
        to: Loc,
    },
    Attack {
        analysis: AttackAnalysis,
    },
    Recruit {
        unit: UnitLabel,
        at: Loc,
    },
    SetVariable {
        name: String,
        value: String,
    },
    Fallback,
}

impl fmt::Display for AiAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AiAction::Move { from, to } => write!(f, "move {}{}", from, to),
            AiAction::Attack { analysis } => write!(f, "{}", analysis),
            AiAction::Recruit { unit, at } => {
                write!(f, "recruit {} {}", unit.to_char(), at)
            }
            AiAction::SetVariable { name, value } => {
                write!(f, "set {}={}", name, value)
            }
            AiAction::Fallback => write!(f, "fallback"),
        }
    }
}
