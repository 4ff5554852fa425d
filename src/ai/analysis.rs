//! Attack plans: evaluation and rating

use std::fmt;

use crate::core::{map::hit_chance, Board, Loc, Piece, Side, Team, Terrain};

use super::combat::{CombatModel, HpDist};
use super::move_map::MoveMaps;

/// Hypothetical relocations layered over the live registry. The evaluator
/// and search read positions through this overlay instead of moving pieces,
/// so the registry is never written and nothing has to be restored.
pub struct Placement<'a> {
    board: &'a Board,
    moves: Vec<(Loc, Loc)>,
}

impl<'a> Placement<'a> {
    pub fn new(board: &'a Board) -> Self {
        Self { board, moves: Vec::new() }
    }

    pub fn from_plan(board: &'a Board, movements: &[(Loc, Loc)]) -> Self {
        Self { board, moves: movements.to_vec() }
    }

    pub fn place(&mut self, from: Loc, to: Loc) {
        self.moves.push((from, to));
    }

    pub fn piece_at(&self, loc: Loc) -> Option<&'a Piece> {
        if let Some(&(from, _)) = self.moves.iter().find(|&&(_, to)| to == loc) {
            return self.board.piece_at(&from);
        }
        if self.moves.iter().any(|&(from, to)| from == loc && to != loc) {
            return None;
        }
        self.board.piece_at(&loc)
    }

    pub fn is_friendly(&self, loc: Loc, side: Side) -> bool {
        self.piece_at(loc).map_or(false, |p| p.side == side)
    }
}

/// A candidate coordinated strike against one enemy unit
#[derive(Debug, Clone)]
pub struct AttackAnalysis {
    pub target: Loc,
    /// (attacker origin, chosen adjacent hex), in strike order
    pub movements: Vec<(Loc, Loc)>,
    /// Chosen weapon index per movement
    pub weapons: Vec<usize>,

    pub target_value: f32,
    pub target_starting_damage: f32,
    pub avg_losses: f32,
    pub chance_to_kill: f32,
    pub avg_damage_inflicted: f32,
    pub avg_damage_taken: f32,
    pub resources_used: f32,
    pub terrain_quality: f32,
    pub alternative_terrain_quality: f32,
    pub vulnerability: f32,
    pub support: f32,

    pub leader_threat: bool,
    pub uses_leader: bool,
    pub is_surrounded: bool,
}

impl AttackAnalysis {
    pub fn new(target: Loc) -> Self {
        Self {
            target,
            movements: Vec::new(),
            weapons: Vec::new(),
            target_value: 0.0,
            target_starting_damage: 0.0,
            avg_losses: 0.0,
            chance_to_kill: 0.0,
            avg_damage_inflicted: 0.0,
            avg_damage_taken: 0.0,
            resources_used: 0.0,
            terrain_quality: 0.0,
            alternative_terrain_quality: 0.0,
            vulnerability: 0.0,
            support: 0.0,
            leader_threat: false,
            uses_leader: false,
            is_surrounded: false,
        }
    }

    /// Simulate the plan attacker by attacker and fill in every metric the
    /// rating reads, choosing weapons along the way. `vulnerability`,
    /// `support` and `is_surrounded` belong to the search and are left
    /// untouched, so re-running on the same plan reproduces the same
    /// metrics. The registry itself is only read.
    pub fn analyze(
        &mut self,
        board: &Board,
        maps: &MoveMaps,
        model: &dyn CombatModel,
        side: Side,
    ) {
        let defender = board
            .piece_at(&self.target)
            .expect("attack target must exist");
        assert!(!self.movements.is_empty(), "cannot analyze an empty plan");

        let dstats = defender.stats();

        self.weapons.clear();
        self.uses_leader = false;
        self.leader_threat = self.target.neighbors().iter().any(|loc| {
            board
                .piece_at(loc)
                .map_or(false, |p| p.side == side && p.stats().can_recruit)
        });

        self.target_value = defender.scaled_cost();
        self.target_starting_damage = (dstats.hitpoints - defender.hp) as f32;

        // Baseline for trading ground for damage: the footing each attacker
        // could have had by retreating instead, cost-weighted.
        let mut cost_sum = 0.0;
        let mut alt_quality = 0.0;
        for &(src, _) in &self.movements {
            let attacker = board.piece_at(&src).expect("attacker must exist");
            let stats = attacker.stats();
            let mut best = board.map.hit_chance_at(stats.terrain_class, src);
            for &retreat in maps.own_limited.reachable(src) {
                best = best.min(board.map.hit_chance_at(stats.terrain_class, retreat));
            }
            let scaled = attacker.scaled_cost();
            alt_quality += scaled * best;
            cost_sum += scaled;
        }
        self.alternative_terrain_quality = alt_quality / cost_sum;

        let first_level = board.piece_at(&self.movements[0].0)
            .expect("attacker must exist")
            .stats()
            .level
            .max(1);

        self.avg_losses = 0.0;
        self.avg_damage_taken = 0.0;
        self.resources_used = 0.0;
        let mut terrain_raw = 0.0;
        let mut placement = Placement::new(board);
        let mut defender_dist: Option<HpDist> = None;
        let mut cumulative_kill = 0.0;
        let mut first_kill_chance = 0.0;
        let defender_terrain = board.map.get(self.target).unwrap_or(Terrain::Plains);

        for (idx, &(src, dst)) in self.movements.iter().enumerate() {
            let attacker = board.piece_at(&src).expect("attacker must exist");
            let stats = attacker.stats();

            assert!(
                dst == src || placement.piece_at(dst).is_none(),
                "attack position must be free"
            );
            placement.place(src, dst);

            if stats.can_recruit {
                self.uses_leader = true;
                self.leader_threat = false;
            }

            let attacker_terrain = board.map.get(dst).unwrap_or(Terrain::Plains);
            let outcome = model.best_weapon_and_outcome(
                attacker,
                defender,
                defender_dist.as_ref(),
                attacker_terrain,
                defender_terrain,
                board.time,
            );
            self.weapons.push(outcome.weapon);

            let kill_after = outcome.defender_hp.chance_of_death();
            let kill_gain = (kill_after - cumulative_kill).max(0.0);
            if idx == 0 {
                first_kill_chance = kill_after;
            }
            cumulative_kill = kill_after;

            self.avg_damage_taken += attacker.hp as f32 - outcome.attacker_hp.expected();

            let scaled = attacker.scaled_cost();
            self.resources_used += scaled;

            let mut loss = scaled * outcome.attacker_hp.chance_of_death();
            if board.map.is_village(dst) {
                // A village under the attacker blunts the counterblows.
                loss *= 0.5;
            }
            let kill_xp = (8 * dstats.level.max(1)) as f32;
            let fight_xp = dstats.level.max(1) as f32;
            let xp_gain = kill_gain * kill_xp + (1.0 - kill_gain) * fight_xp;
            if attacker.experience as f32 + xp_gain >= stats.max_experience as f32 {
                // An advancement pays back about half a replacement.
                loss -= scaled * 0.5;
            }
            self.avg_losses += loss;

            terrain_raw += scaled * hit_chance(stats.terrain_class, attacker_terrain);

            defender_dist = Some(outcome.defender_hp);
        }

        self.terrain_quality = terrain_raw / cost_sum;

        let final_dist = defender_dist.expect("at least one attack was simulated");
        let expected_damage = defender.hp as f32 - final_dist.expected();
        let near_advance =
            dstats.max_experience - defender.experience <= first_level;

        if near_advance {
            // Anything short of a one-hit kill likely levels the target;
            // wounding it is worth less than nothing.
            self.chance_to_kill = first_kill_chance;
            self.avg_damage_inflicted = -expected_damage;
        } else {
            self.chance_to_kill = cumulative_kill;
            self.avg_damage_inflicted = expected_damage;
        }
    }

    /// Reduce the metrics to one comparable score; −1.0 rejects the plan
    /// outright. Higher is better.
    pub fn rating(&self, team: &Team, target_attacked_elsewhere: bool) -> f32 {
        let mut aggression = team.aggression;
        if self.leader_threat {
            aggression = 1.0;
        }
        if self.uses_leader {
            aggression = aggression.min(-4.0);
        }

        let mut value =
            self.chance_to_kill * self.target_value - self.avg_losses * (1.0 - aggression);

        if self.terrain_quality > self.alternative_terrain_quality {
            // The plan trades good ground for damage; charge for the
            // exposure.
            let exposure = if self.uses_leader { 2.0 } else { team.caution };
            value -= exposure
                * self.resources_used
                * (self.terrain_quality - self.alternative_terrain_quality)
                * self.vulnerability / self.support.max(0.01)
                * (1.0 - aggression);
        }

        if self.uses_leader && team.leader_can_reach_keep && team.gold > 20 {
            value -= team.gold as f32 / 2.0;
        }

        value += ((self.target_starting_damage / 3.0 + self.avg_damage_inflicted)
            - (1.0 - aggression) * self.avg_damage_taken)
            / 10.0;

        let desperate =
            self.is_surrounded && (self.support == 0.0 || self.avg_damage_taken == 0.0);
        if !desperate {
            if self.vulnerability > 50.0
                && self.vulnerability > 2.0 * self.support
                && self.chance_to_kill < 0.02
                && aggression < 0.75
                && !target_attacked_elsewhere
            {
                return -1.0;
            } else if !self.leader_threat && self.vulnerability * self.terrain_quality > 0.0 {
                value *= self.support / (self.vulnerability * self.terrain_quality);
            }
        }
        // The multiplier above lands a second time here whenever the else
        // branch ran; the tuning of everything downstream expects the
        // squared magnitude, so both applications stay.
        if !self.leader_threat && self.vulnerability * self.terrain_quality > 0.0 {
            value *= self.support / (self.vulnerability * self.terrain_quality);
        }

        value /= (self.resources_used / 2.0) * (1.0 + self.terrain_quality);

        if self.leader_threat {
            value *= 5.0;
        }

        value
    }
}

impl fmt::Display for AttackAnalysis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "attack {} [", self.target)?;
        for (i, (src, dst)) in self.movements.iter().enumerate() {
            if i > 0 {
                write!(f, " ")?;
            }
            write!(f, "{}>{}", src, dst)?;
        }
        write!(f, "] kill {:.2}", self.chance_to_kill)
    }
}
