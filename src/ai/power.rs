//! Threat projection: the combat pressure a set of units can bring to bear
//! on one hex

use std::cmp::Ordering;
use std::collections::HashMap;

use crate::core::{map::hit_chance, Board, Loc};

use super::move_map::MoveMap;

/// Estimate the worst-case pressure projectable onto `target` by the units
/// in `moves`. With `use_terrain` the estimate is weighted by each unit's
/// footing on the hex it would strike from (enemy pressure); without it a
/// flat 0.5 stands in (ally support, where final footing is unknown).
///
/// Each unit is counted at most once even when it reaches several adjacent
/// hexes: a hex may steal a unit claimed earlier only by rating it strictly
/// higher, and the earlier hex is left vacant rather than refilled.
pub fn power_projection(target: Loc, moves: &MoveMap, board: &Board, use_terrain: bool) -> f32 {
    let mut slots: [Option<(Loc, f32)>; 6] = [None; 6];
    let mut claims: HashMap<Loc, usize> = HashMap::new();

    for (i, hex) in target.neighbors().into_iter().enumerate() {
        if !board.map.in_bounds(hex) {
            continue;
        }
        let terrain = board.map.get(hex).unwrap();

        let mut candidates: Vec<(Loc, f32)> = moves
            .reachers(hex)
            .iter()
            .filter_map(|&src| {
                // Units gone from the registry since the maps were built are
                // skipped silently.
                let piece = board.piece_at(&src)?;
                let stats = piece.stats();

                let defense = if use_terrain {
                    1.0 - hit_chance(stats.terrain_class, terrain)
                } else {
                    0.5
                };
                let damage = stats.best_expected_damage(board.time);
                let village = if use_terrain && board.capturable_village(hex, piece.side) {
                    1.5
                } else {
                    1.0
                };

                Some((src, piece.hp_ratio() * defense * damage * village))
            })
            .collect();

        candidates.sort_by(|a, b| {
            b.1.partial_cmp(&a.1)
                .unwrap_or(Ordering::Equal)
                .then(a.0.cmp(&b.0))
        });

        for (src, rating) in candidates {
            match claims.get(&src) {
                // Already summed at an earlier hex for at least this much:
                // the claim stays put, try the next strongest unit.
                Some(&slot) if slots[slot].is_some_and(|(_, r)| r >= rating) => continue,
                // Strictly better here: move the claim, leave the old hex
                // vacant.
                Some(&slot) => slots[slot] = None,
                None => {}
            }
            slots[i] = Some((src, rating));
            claims.insert(src, i);
            break;
        }
    }

    slots.iter().flatten().map(|&(_, rating)| rating).sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Map, Piece, Side, TimeOfDay, UnitLabel};

    fn board_with(units: &[(UnitLabel, Side, Loc)]) -> Board {
        let mut board = Board::new(Map::parse(&[
            "ggggg",
            "ggggg",
            "gvggg",
            "ggggg",
            "ggggg",
        ]).unwrap());
        board.time = TimeOfDay::Dawn;
        for &(unit, side, loc) in units {
            board.add_piece(Piece::new(unit, side, loc));
        }
        board
    }

    #[test]
    fn test_single_unit_counts_once_across_hexes() {
        let target = Loc::new(2, 2);
        let src = Loc::new(0, 0);
        let board = board_with(&[(UnitLabel::Spearman, Side::S1, src)]);

        let hexes = target.neighbors();
        let mut moves = MoveMap::new();
        moves.insert(src, hexes[0]);

        let one_hex = power_projection(target, &moves, &board, false);

        // Reaching a second adjacent hex of the same terrain must not add a
        // second helping of the same spearman.
        moves.insert(src, hexes[3]);
        let two_hexes = power_projection(target, &moves, &board, false);

        // Flattened terrain: 1.0 hp ratio x 0.5 x (7x3 spear).
        assert!((one_hex - 10.5).abs() < 1e-5);
        assert_eq!(one_hex, two_hexes);
    }

    #[test]
    fn test_claim_moves_to_strictly_better_hex() {
        let target = Loc::new(2, 2);
        let src = Loc::new(0, 0);
        let board = board_with(&[(UnitLabel::Spearman, Side::S1, src)]);

        // The village west of the target rates higher than open ground for
        // the same unit under terrain weighting.
        let hexes = target.neighbors();
        let village = hexes.iter().position(|&h| board.map.is_village(h));

        let mut moves = MoveMap::new();
        moves.insert(src, hexes[3]);
        let plains_only = power_projection(target, &moves, &board, true);

        for &hex in &hexes {
            moves.insert(src, hex);
        }
        let with_village = power_projection(target, &moves, &board, true);

        assert!(village.is_some());
        assert!(with_village > plains_only);
        // Still a single claim: the village rating alone.
        // 1.0 hp x (1 - 0.4 village hit chance) x 21 damage x 1.5 capture bonus
        assert!((with_village - (0.6 * 21.0 * 1.5)).abs() < 1e-4);
    }

    #[test]
    fn test_two_units_fill_two_hexes() {
        let target = Loc::new(2, 2);
        let a = Loc::new(0, 0);
        let b = Loc::new(4, 4);
        let board = board_with(&[
            (UnitLabel::Spearman, Side::S1, a),
            (UnitLabel::Wolf, Side::S1, b),
        ]);

        let hexes = target.neighbors();
        let mut moves = MoveMap::new();
        moves.insert(a, hexes[0]);
        moves.insert(b, hexes[1]);

        let both = power_projection(target, &moves, &board, false);
        // spearman 10.5 + wolf 0.5 x 15 = 7.5
        assert!((both - 18.0).abs() < 1e-5);
    }
}
