//! Reachability maps handed in by the movement layer

use std::collections::HashMap;

use crate::core::{Board, Loc, Side};

/// Destinations reachable per unit, with the inverse direction kept in sync.
/// The planner only ever asks two questions: where can this unit go, and who
/// can come here.
#[derive(Debug, Clone, Default)]
pub struct MoveMap {
    dsts: HashMap<Loc, Vec<Loc>>,
    srcs: HashMap<Loc, Vec<Loc>>,
}

impl MoveMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, src: Loc, dst: Loc) {
        let reachable = self.dsts.entry(src).or_default();
        if !reachable.contains(&dst) {
            reachable.push(dst);
            self.srcs.entry(dst).or_default().push(src);
        }
    }

    pub fn can_reach(&self, src: Loc, dst: Loc) -> bool {
        self.dsts.get(&src).map_or(false, |v| v.contains(&dst))
    }

    /// Destinations reachable from `src`
    pub fn reachable(&self, src: Loc) -> &[Loc] {
        self.dsts.get(&src).map_or(&[], Vec::as_slice)
    }

    /// Units able to reach `dst`
    pub fn reachers(&self, dst: Loc) -> &[Loc] {
        self.srcs.get(&dst).map_or(&[], Vec::as_slice)
    }

    /// Every unit origin in the map, in a stable order
    pub fn sources(&self) -> Vec<Loc> {
        let mut locs: Vec<Loc> = self.dsts.keys().copied().collect();
        locs.sort();
        locs
    }

    pub fn is_empty(&self) -> bool {
        self.dsts.is_empty()
    }
}

/// The four reachability maps built once per planning pass
#[derive(Debug, Clone, Default)]
pub struct MoveMaps {
    /// Own units, movement they have left this turn
    pub own_limited: MoveMap,
    /// Own units at their full movement allowance
    pub own_full: MoveMap,
    /// Enemy units, movement they have left this turn
    pub enemy_limited: MoveMap,
    /// Enemy units at their full movement allowance
    pub enemy_full: MoveMap,
}

/// Boundary to the movement layer. Implementations own pathfinding and
/// zone-of-control rules; the planner treats the maps as ground truth.
pub trait MoveMapProvider {
    fn move_maps(&self, board: &Board, side: Side) -> MoveMaps;
}
