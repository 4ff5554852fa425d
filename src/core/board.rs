//! Unit registry and battlefield state

use std::collections::HashMap;

use anyhow::{ensure, Context, Result};

use super::loc::Loc;
use super::map::Map;
use super::side::{Side, SideArray};
use super::team::Team;
use super::time::TimeOfDay;
use super::units::{UnitLabel, UnitStats};

/// A unit instance on the battlefield
#[derive(Debug, Clone, PartialEq)]
pub struct Piece {
    pub unit: UnitLabel,
    pub side: Side,
    pub loc: Loc,
    pub hp: i32,
    pub experience: i32,
    pub concealed: bool,
    pub incapacitated: bool,
}

impl Piece {
    pub fn new(unit: UnitLabel, side: Side, loc: Loc) -> Self {
        Self {
            unit,
            side,
            loc,
            hp: unit.stats().hitpoints,
            experience: 0,
            concealed: false,
            incapacitated: false,
        }
    }

    pub fn stats(&self) -> &'static UnitStats {
        self.unit.stats()
    }

    pub fn hp_ratio(&self) -> f32 {
        self.hp as f32 / self.stats().hitpoints as f32
    }

    /// Unit worth with experience priced in: a nearly-advanced unit is worth
    /// almost twice its recruit cost.
    pub fn scaled_cost(&self) -> f32 {
        let stats = self.stats();
        stats.cost as f32
            * (1.0 + self.experience as f32 / stats.max_experience as f32)
    }

    /// Targets only count as attackable while visible and able to act.
    pub fn is_attackable(&self) -> bool {
        !self.concealed && !self.incapacitated
    }
}

/// The live unit registry plus the static battlefield surfaces the planner
/// queries: terrain, village ownership, team settings, time of day.
#[derive(Debug, Clone)]
pub struct Board {
    pub map: Map,
    pieces: HashMap<Loc, Piece>,
    village_owner: HashMap<Loc, Side>,
    pub teams: SideArray<Team>,
    pub time: TimeOfDay,
}

impl Board {
    pub fn new(map: Map) -> Self {
        Self {
            map,
            pieces: HashMap::new(),
            village_owner: HashMap::new(),
            teams: SideArray::new(Team::default(), Team::default()),
            time: TimeOfDay::Dawn,
        }
    }

    pub fn piece_at(&self, loc: &Loc) -> Option<&Piece> {
        self.pieces.get(loc)
    }

    pub fn piece_at_mut(&mut self, loc: &Loc) -> Result<&mut Piece> {
        self.pieces.get_mut(loc).context("No piece at loc")
    }

    /// Add a piece to the board
    pub fn add_piece(&mut self, piece: Piece) {
        debug_assert!(!self.pieces.contains_key(&piece.loc));
        debug_assert!(self.map.in_bounds(piece.loc));
        self.pieces.insert(piece.loc, piece);
    }

    /// Remove a piece from the board
    pub fn remove_piece(&mut self, loc: &Loc) -> Option<Piece> {
        self.pieces.remove(loc)
    }

    pub fn pieces(&self) -> impl Iterator<Item = (&Loc, &Piece)> {
        self.pieces.iter()
    }

    /// Locations of every piece, in a stable order
    pub fn piece_locs(&self) -> Vec<Loc> {
        let mut locs: Vec<Loc> = self.pieces.keys().copied().collect();
        locs.sort();
        locs
    }

    pub fn leader_loc(&self, side: Side) -> Option<Loc> {
        self.piece_locs().into_iter().find(|loc| {
            let piece = &self.pieces[loc];
            piece.side == side && piece.stats().can_recruit
        })
    }

    pub fn set_village_owner(&mut self, loc: Loc, side: Side) -> Result<()> {
        ensure!(self.map.is_village(loc), "No village at {}", loc);
        self.village_owner.insert(loc, side);
        Ok(())
    }

    pub fn village_owner(&self, loc: Loc) -> Option<Side> {
        self.village_owner.get(&loc).copied()
    }

    /// A village the given side could take: any village it does not hold.
    pub fn capturable_village(&self, loc: Loc, side: Side) -> bool {
        self.map.is_village(loc) && self.village_owner(loc) != Some(side)
    }

    pub fn is_hostile_at(&self, loc: &Loc, side: Side) -> bool {
        self.piece_at(loc).map_or(false, |p| p.side != side)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small_board() -> Board {
        Board::new(Map::parse(&["ggg", "gvg", "ggg"]).unwrap())
    }

    #[test]
    fn test_add_and_remove() {
        let mut board = small_board();
        board.add_piece(Piece::new(UnitLabel::Spearman, Side::S0, Loc::new(0, 0)));

        assert!(board.piece_at(&Loc::new(0, 0)).is_some());
        assert!(board.piece_at(&Loc::new(1, 1)).is_none());

        let removed = board.remove_piece(&Loc::new(0, 0)).unwrap();
        assert_eq!(removed.unit, UnitLabel::Spearman);
        assert!(board.piece_at(&Loc::new(0, 0)).is_none());
    }

    #[test]
    fn test_leader_lookup() {
        let mut board = small_board();
        board.add_piece(Piece::new(UnitLabel::Spearman, Side::S0, Loc::new(0, 0)));
        board.add_piece(Piece::new(UnitLabel::Commander, Side::S0, Loc::new(2, 2)));

        assert_eq!(board.leader_loc(Side::S0), Some(Loc::new(2, 2)));
        assert_eq!(board.leader_loc(Side::S1), None);
    }

    #[test]
    fn test_village_capture_rules() {
        let mut board = small_board();
        let village = Loc::new(1, 1);

        assert!(board.capturable_village(village, Side::S0));
        board.set_village_owner(village, Side::S0).unwrap();
        assert!(!board.capturable_village(village, Side::S0));
        assert!(board.capturable_village(village, Side::S1));

        assert!(board.set_village_owner(Loc::new(0, 0), Side::S0).is_err());
    }

    #[test]
    fn test_scaled_cost_grows_with_experience() {
        let mut piece = Piece::new(UnitLabel::Spearman, Side::S0, Loc::new(0, 0));
        let base = piece.scaled_cost();
        piece.experience = piece.stats().max_experience / 2;
        assert!(piece.scaled_cost() > base);
    }
}
