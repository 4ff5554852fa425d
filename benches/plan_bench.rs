use criterion::{black_box, criterion_group, criterion_main, Criterion};
use pprof::criterion::{Output, PProfProfiler};

use skirmish::ai::{
    find_attacks, CombatModel, CombatOutcome, HpDist, MoveMaps, NoInterrupt,
};
use skirmish::core::{Board, Loc, Map, Piece, Side, Terrain, TimeOfDay, UnitLabel};

/// All-strikes-land predictor, enough to keep the search honest.
struct EveryStrikeLands;

impl CombatModel for EveryStrikeLands {
    fn best_weapon_and_outcome(
        &self,
        attacker: &Piece,
        defender: &Piece,
        defender_prior: Option<&HpDist>,
        _attacker_terrain: Terrain,
        _defender_terrain: Terrain,
        time: TimeOfDay,
    ) -> CombatOutcome {
        let astats = attacker.stats();
        let weapon = astats
            .weapons
            .iter()
            .enumerate()
            .max_by(|a, b| {
                a.1.expected_damage(astats.alignment, time)
                    .partial_cmp(&b.1.expected_damage(astats.alignment, time))
                    .unwrap()
            })
            .map(|(i, _)| i)
            .unwrap();
        let damage = astats.weapons[weapon]
            .expected_damage(astats.alignment, time)
            .round() as i32;

        let start = defender_prior
            .cloned()
            .unwrap_or_else(|| HpDist::certain(defender.hp));
        let mut probs = vec![0.0; start.0.len()];
        for (hp, p) in start.0.iter().enumerate() {
            probs[hp.saturating_sub(damage.max(0) as usize)] += p;
        }
        let defender_hp = HpDist(probs);

        let retaliation = defender.stats().best_expected_damage(time).round() as i32;
        let survived = 1.0 - defender_hp.chance_of_death();
        let mut att = vec![0.0; attacker.hp as usize + 1];
        att[(attacker.hp - retaliation).max(0) as usize] += survived;
        att[attacker.hp as usize] += defender_hp.chance_of_death();

        CombatOutcome {
            attacker_hp: HpDist(att),
            defender_hp,
            weapon,
        }
    }
}

fn fixture() -> (Board, MoveMaps) {
    let mut board = Board::new(Map::parse(&[
        "gggggggggg",
        "ggfgghgggg",
        "ggggvggggg",
        "gggggggggg",
        "ggghgggfgg",
        "gggggggggg",
        "ggvggggggg",
        "gggggggggg",
    ]).unwrap());

    let own = [
        (UnitLabel::Spearman, Loc::new(1, 2)),
        (UnitLabel::Bowman, Loc::new(1, 4)),
        (UnitLabel::HeavyInfantry, Loc::new(2, 5)),
        (UnitLabel::Rogue, Loc::new(3, 1)),
        (UnitLabel::Cavalryman, Loc::new(6, 6)),
        (UnitLabel::Commander, Loc::new(0, 0)),
    ];
    let enemy = [
        (UnitLabel::Wolf, Loc::new(4, 3)),
        (UnitLabel::HeavyInfantry, Loc::new(5, 4)),
        (UnitLabel::Sorceress, Loc::new(7, 2)),
    ];
    for &(unit, loc) in &own {
        board.add_piece(Piece::new(unit, Side::S0, loc));
    }
    for &(unit, loc) in &enemy {
        board.add_piece(Piece::new(unit, Side::S1, loc));
    }

    // Everyone reaches the ring around every enemy; a dense worst case.
    let mut maps = MoveMaps::default();
    for &(_, target) in &enemy {
        for hex in target.neighbors() {
            if !board.map.in_bounds(hex) {
                continue;
            }
            for &(_, src) in &own {
                if board.piece_at(&hex).is_none() {
                    maps.own_limited.insert(src, hex);
                }
                maps.own_full.insert(src, hex);
            }
            for &(_, src) in &enemy {
                maps.enemy_limited.insert(src, hex);
                maps.enemy_full.insert(src, hex);
            }
        }
    }

    (board, maps)
}

fn plan_benchmark(c: &mut Criterion) {
    let (board, maps) = fixture();

    c.bench_function("attack_sweep_depth_4", |b| {
        b.iter(|| {
            let plans = find_attacks(
                black_box(&board),
                black_box(&maps),
                Side::S0,
                4,
                &EveryStrikeLands,
                &mut NoInterrupt,
            );
            // prevent the result from being optimized away
            black_box(plans)
        })
    });
}

criterion_group! {
    name = benches;
    config = Criterion::default().with_profiler(PProfProfiler::new(100, Output::Flamegraph(None)));
    targets = plan_benchmark
}
criterion_main!(benches);
