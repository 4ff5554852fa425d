//! Branch-and-bound search over attacker/position assignments

use tracing::trace;

use crate::core::{map::hit_chance, Board, Loc, Map, Side};

use super::analysis::{AttackAnalysis, Placement};
use super::combat::CombatModel;
use super::move_map::MoveMaps;
use super::power::power_projection;

/// Ceiling on discovered plans per pass; past it no new branches open.
pub const MAX_ATTACK_RESULTS: usize = 1000;

/// Most attackers a single plan can position around one target.
const MAX_ATTACKERS: usize = 6;

/// Cooperative checkpoint polled inside the search loop. Long searches call
/// it once per candidate attacker so a front end stays responsive; reporting
/// `true` stops further branch generation and returns what was found.
pub trait Interrupt {
    fn should_stop(&mut self) -> bool;
}

/// Default checkpoint that never stops the search
pub struct NoInterrupt;

impl Interrupt for NoInterrupt {
    fn should_stop(&mut self) -> bool {
        false
    }
}

/// Per-invocation search state for one target: the adjacent hexes with
/// their claim flags, and the best rating reached at each plan depth
/// (index = depth − 1). Constructed fresh per target, never persisted.
pub struct SearchSession {
    pub target: Loc,
    pub adjacent: Vec<Loc>,
    pub claimed: Vec<bool>,
    pub best_results: [f32; MAX_ATTACKERS],
    pub attack_depth: usize,
}

impl SearchSession {
    pub fn new(target: Loc, map: &Map, attack_depth: usize) -> Self {
        let adjacent: Vec<Loc> = target
            .neighbors()
            .into_iter()
            .filter(|loc| map.in_bounds(*loc))
            .collect();
        let claimed = vec![false; adjacent.len()];

        Self {
            target,
            adjacent,
            claimed,
            best_results: [f32::NEG_INFINITY; MAX_ATTACKERS],
            attack_depth: attack_depth.min(MAX_ATTACKERS),
        }
    }
}

struct BestHex {
    index: usize,
    terrain_rating: f32,
    vulnerability: f32,
    support: f32,
    bonus: f32,
}

impl BestHex {
    fn exposure(&self) -> f32 {
        self.vulnerability / self.bonus - self.support * self.bonus
    }
}

/// Hostile pieces on an opposite pair of neighbors, or three or more
/// hostile neighbors, count as surrounded; the rating relaxes its sanity
/// gate for such attackers.
pub fn is_surrounded(board: &Board, loc: Loc, side: Side) -> bool {
    let hostile: Vec<bool> = loc
        .neighbors()
        .iter()
        .map(|n| board.is_hostile_at(n, side))
        .collect();

    let flanked = (0..3).any(|i| hostile[i] && hostile[i + 3]);
    flanked || hostile.iter().filter(|h| **h).count() >= 3
}

/// Extend `plan` with every combination of remaining attackers and
/// unclaimed adjacent hexes, depth-first, appending each strictly-improving
/// plan to `results`. `rating_before` is the rating of `plan` as it stands;
/// a deeper plan must beat both it and the best rating already recorded at
/// the new depth. All tentative state is rolled back before trying the next
/// attacker, so `plan` and the pool come back unchanged.
#[allow(clippy::too_many_arguments)]
pub fn search(
    session: &mut SearchSession,
    board: &Board,
    maps: &MoveMaps,
    model: &dyn CombatModel,
    side: Side,
    pool: &mut Vec<Loc>,
    plan: &mut AttackAnalysis,
    rating_before: f32,
    results: &mut Vec<AttackAnalysis>,
    interrupt: &mut dyn Interrupt,
) {
    if plan.movements.len() >= session.attack_depth {
        return;
    }
    // The ceiling never cuts off the root sweep, only deeper extensions.
    if !plan.movements.is_empty() && results.len() > MAX_ATTACK_RESULTS {
        return;
    }

    let mut i = 0;
    while i < pool.len() {
        if interrupt.should_stop() {
            return;
        }

        let src = pool[i];
        let Some(piece) = board.piece_at(&src) else {
            i += 1;
            continue;
        };
        let stats = piece.stats();

        // A slowing attacker only pays off before the target strikes back at
        // full strength, so it must lead the plan.
        if stats.has_slowing_weapon() && !plan.movements.is_empty() {
            i += 1;
            continue;
        }

        let surrounded = is_surrounded(board, src, side);
        let placement = Placement::from_plan(board, &plan.movements);

        let mut best: Option<BestHex> = None;
        for (j, &hex) in session.adjacent.iter().enumerate() {
            if session.claimed[j] {
                continue;
            }
            if hex != src && !maps.own_limited.can_reach(src, hex) {
                continue;
            }
            if hex != src && placement.piece_at(hex).is_some() {
                continue;
            }

            let terrain = board.map.get(hex).unwrap();
            let mut terrain_rating = 1.0 - hit_chance(stats.terrain_class, terrain);
            let mut bonus = 1.0;

            let opposite = session.target.opposite(&hex);
            if opposite != src && placement.is_friendly(opposite, side) {
                // A friend on the far side pins the target; with the right
                // weapon that completes a backstab.
                bonus = 1.2;
                if stats.has_backstab_weapon() {
                    terrain_rating *= 2.0;
                }
            }

            let vulnerability = power_projection(hex, &maps.enemy_full, board, true);
            let support = power_projection(hex, &maps.own_full, board, false);

            let candidate = BestHex {
                index: j,
                terrain_rating,
                vulnerability,
                support,
                bonus,
            };
            let better = match &best {
                None => true,
                Some(b) => {
                    candidate.terrain_rating > b.terrain_rating
                        || (candidate.terrain_rating == b.terrain_rating
                            && candidate.exposure() < b.exposure())
                }
            };
            if better {
                best = Some(candidate);
            }
        }

        if let Some(b) = best {
            let hex = session.adjacent[b.index];

            // Tentative commit
            pool.remove(i);
            plan.movements.push((src, hex));
            plan.vulnerability += b.vulnerability / b.bonus;
            plan.support += b.support * b.bonus;
            let was_surrounded = plan.is_surrounded;
            plan.is_surrounded = plan.is_surrounded || surrounded;

            plan.analyze(board, maps, model, side);
            let target_attacked_elsewhere =
                results.iter().any(|a| a.target == plan.target);
            let rating = plan.rating(&board.teams[side], target_attacked_elsewhere);

            let depth = plan.movements.len();
            let bound = session.best_results[depth - 1].max(rating_before);

            if rating > bound {
                trace!(depth, rating, "keeping improved plan");
                session.best_results[depth - 1] = rating;
                results.push(plan.clone());

                session.claimed[b.index] = true;
                search(
                    session, board, maps, model, side, pool, plan, rating, results,
                    interrupt,
                );
                session.claimed[b.index] = false;
            }

            // Roll back before trying the next attacker
            plan.is_surrounded = was_surrounded;
            plan.support -= b.support * b.bonus;
            plan.vulnerability -= b.vulnerability / b.bonus;
            plan.movements.pop();
            plan.weapons.truncate(plan.movements.len());
            pool.insert(i, src);
        }

        i += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Map, Piece, UnitLabel};

    #[test]
    fn test_is_surrounded_by_flanked_pair() {
        let mut board = Board::new(Map::parse(&[
            "ggggg", "ggggg", "ggggg", "ggggg", "ggggg",
        ]).unwrap());
        let loc = Loc::new(2, 2);
        let n = loc.neighbors();

        board.add_piece(Piece::new(UnitLabel::Wolf, Side::S1, n[1]));
        assert!(!is_surrounded(&board, loc, Side::S0));

        board.add_piece(Piece::new(UnitLabel::Wolf, Side::S1, n[4]));
        assert!(is_surrounded(&board, loc, Side::S0));
    }

    #[test]
    fn test_is_surrounded_by_count() {
        let mut board = Board::new(Map::parse(&[
            "ggggg", "ggggg", "ggggg", "ggggg", "ggggg",
        ]).unwrap());
        let loc = Loc::new(2, 2);
        let n = loc.neighbors();

        board.add_piece(Piece::new(UnitLabel::Wolf, Side::S1, n[0]));
        board.add_piece(Piece::new(UnitLabel::Wolf, Side::S1, n[1]));
        assert!(!is_surrounded(&board, loc, Side::S0));

        board.add_piece(Piece::new(UnitLabel::Wolf, Side::S1, n[2]));
        assert!(is_surrounded(&board, loc, Side::S0));

        // Friends don't surround.
        let friendly_loc = Loc::new(0, 0);
        board.add_piece(Piece::new(UnitLabel::Spearman, Side::S0, friendly_loc.neighbors()[3]));
        assert!(!is_surrounded(&board, friendly_loc, Side::S0));
    }

    #[test]
    fn test_session_clamps_depth_and_trims_edges() {
        let map = Map::parse(&["ggg", "ggg"]).unwrap();
        let session = SearchSession::new(Loc::new(0, 0), &map, 10);

        assert_eq!(session.attack_depth, 6);
        // Corner hex: only W/NW/SW-side neighbors that exist stay.
        assert!(session.adjacent.len() < 6);
        assert_eq!(session.adjacent.len(), session.claimed.len());
        assert!(session
            .best_results
            .iter()
            .all(|r| *r == f32::NEG_INFINITY));
    }
}
