//! Target sweep: one search per hostile visible unit

use tracing::debug;

use crate::core::{Board, Loc, Side};

use super::analysis::AttackAnalysis;
use super::combat::CombatModel;
use super::move_map::{MoveMap, MoveMapProvider, MoveMaps};
use super::search::{search, Interrupt, SearchSession};

/// Sweep every hostile, visible enemy unit and gather all strictly-improving
/// attack plans against each. The maps must come from one planning pass so
/// `support` reflects units that have not committed yet. Picking the global
/// winner — or reading an empty or all-sentinel list as "no attack" — is the
/// caller's concern.
pub fn find_attacks(
    board: &Board,
    maps: &MoveMaps,
    side: Side,
    attack_depth: usize,
    model: &dyn CombatModel,
    interrupt: &mut dyn Interrupt,
) -> Vec<AttackAnalysis> {
    let mut results = Vec::new();

    let pool_template: Vec<Loc> = maps
        .own_limited
        .sources()
        .into_iter()
        .filter(|loc| board.piece_at(loc).map_or(false, |p| p.side == side))
        .collect();

    for target in board.piece_locs() {
        let Some(piece) = board.piece_at(&target) else {
            continue;
        };
        if piece.side == side || !piece.is_attackable() {
            continue;
        }

        debug!(at = %target, "searching attack plans");

        let mut session = SearchSession::new(target, &board.map, attack_depth);
        let mut plan = AttackAnalysis::new(target);
        let mut pool = pool_template.clone();

        search(
            &mut session,
            board,
            maps,
            model,
            side,
            &mut pool,
            &mut plan,
            f32::NEG_INFINITY,
            &mut results,
            interrupt,
        );
    }

    debug!(plans = results.len(), "attack sweep finished");
    results
}

/// Convenience wrapper: build the four maps through the provider, then run
/// the sweep.
pub fn plan_pass(
    board: &Board,
    side: Side,
    provider: &dyn MoveMapProvider,
    attack_depth: usize,
    model: &dyn CombatModel,
    interrupt: &mut dyn Interrupt,
) -> Vec<AttackAnalysis> {
    let maps = provider.move_maps(board, side);
    find_attacks(board, &maps, side, attack_depth, model, interrupt)
}

/// Own pieces an enemy can close with on its current movement: any piece
/// with an enemy-reachable hex next to it. Downstream defensive logic uses
/// this to decide who needs help first.
pub fn exposed_units(board: &Board, enemy_limited: &MoveMap, side: Side) -> Vec<Loc> {
    board
        .piece_locs()
        .into_iter()
        .filter(|loc| {
            board.piece_at(loc).map_or(false, |p| p.side == side)
                && loc
                    .neighbors()
                    .iter()
                    .any(|n| !enemy_limited.reachers(*n).is_empty())
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Map, Piece, UnitLabel};

    #[test]
    fn test_exposed_units() {
        let mut board = Board::new(Map::parse(&[
            "gggggg", "gggggg", "gggggg", "gggggg",
        ]).unwrap());

        let near = Loc::new(1, 1);
        let far = Loc::new(5, 3);
        let enemy = Loc::new(3, 1);
        board.add_piece(Piece::new(UnitLabel::Spearman, Side::S0, near));
        board.add_piece(Piece::new(UnitLabel::Bowman, Side::S0, far));
        board.add_piece(Piece::new(UnitLabel::Wolf, Side::S1, enemy));

        let mut enemy_limited = MoveMap::new();
        enemy_limited.insert(enemy, Loc::new(2, 1));

        let exposed = exposed_units(&board, &enemy_limited, Side::S0);
        assert_eq!(exposed, vec![near]);
    }
}
