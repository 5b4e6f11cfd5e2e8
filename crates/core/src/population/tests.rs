use std::collections::BTreeSet;

use rand_chacha::rand_core::SeedableRng;

use super::*;
use crate::content::AiKind;
use crate::test_support::{open_room_fixture, race, stats, vertical_corridor_fixture};

const FAR_AWAY: Pos = Pos::new(-50, -50);

fn manager(max_percentage: f64, seed: u64) -> EnemyPopulationManager {
    let config = PopulationConfig { max_percentage, placement_attempts: 50 };
    EnemyPopulationManager::new(&config, ChaCha8Rng::seed_from_u64(seed))
}

fn catalog() -> RaceCatalog {
    RaceCatalog::new(vec![race("patroller", AiKind::BackAndForth), race("sentry", AiKind::Stationary)])
        .expect("fixture catalog")
}

#[test]
fn budget_is_the_floor_of_the_floor_tile_share() {
    let grid = open_room_fixture();
    let mut population = manager(0.1, 1);
    let spawned =
        population.new_level(1, &grid, &catalog(), Pos::new(4, 4), ChaCha8Rng::seed_from_u64(2));
    assert_eq!(population.budget(), 6);
    assert_eq!(spawned.len(), 6);
    assert_eq!(population.len(), 6);
    assert_eq!(population.level(), 1);
}

#[test]
fn placement_avoids_walls_the_player_and_other_enemies() {
    let grid = open_room_fixture();
    let player = Pos::new(4, 4);
    for seed in 0..20 {
        let mut population = manager(0.25, seed);
        population.new_level(3, &grid, &catalog(), player, ChaCha8Rng::seed_from_u64(seed + 100));
        let mut seen = BTreeSet::new();
        for enemy in population.iter() {
            assert_eq!(grid.chip(enemy.position()), MapChip::Room, "seed={seed}");
            assert_ne!(enemy.position(), player);
            assert!(seen.insert(enemy.position()), "two enemies share {:?}", enemy.position());
        }
    }
}

#[test]
fn refill_spawns_at_most_one_and_only_below_budget() {
    let grid = open_room_fixture();
    let player = Pos::new(4, 4);
    let mut population = manager(0.1, 9);
    population.new_level(1, &grid, &catalog(), player, ChaCha8Rng::seed_from_u64(10));
    assert_eq!(population.refill_one_if_below_budget(&grid, player), None);

    let killer = stats(1, 0, 1_000);
    let victims: Vec<EnemyId> = population.iter().take(2).map(Enemy::id).collect();
    for victim in victims {
        assert!(population.strike(victim, &killer).is_some_and(|report| report.killed));
    }
    assert_eq!(population.len(), 4);

    assert!(population.refill_one_if_below_budget(&grid, player).is_some());
    assert_eq!(population.len(), 5);
    assert!(population.refill_one_if_below_budget(&grid, player).is_some());
    assert_eq!(population.refill_one_if_below_budget(&grid, player), None);
    assert_eq!(population.len(), 6);
}

#[test]
fn killed_enemy_leaves_occupancy_immediately_and_pays_out() {
    let grid = open_room_fixture();
    let mut population = manager(0.0, 3);
    population.new_level(1, &grid, &catalog(), FAR_AWAY, ChaCha8Rng::seed_from_u64(4));
    let pos = Pos::new(2, 2);
    let id = population.spawn_at(&race("target", AiKind::Stationary), pos);
    assert_eq!(population.exist_enemy(pos), Some(id));

    let hero = stats(10, 0, 3);
    let first = population.strike(id, &hero).expect("live target");
    assert_eq!(first, StrikeReport { damage: 3, killed: false, rewards: (0, 0) });
    assert_eq!(population.get(id).map(|enemy| enemy.status().hit_point()), Some(7));

    for _ in 0..2 {
        population.strike(id, &hero);
    }
    let last = population.strike(id, &hero).expect("still registered");
    assert_eq!(last, StrikeReport { damage: 3, killed: true, rewards: (5, 7) });
    assert_eq!(population.exist_enemy(pos), None);
    assert!(population.get(id).is_none());
    assert!(population.strike(id, &hero).is_none());
}

#[test]
fn occupancy_check_includes_the_asking_enemy_without_blocking_it() {
    let grid = vertical_corridor_fixture();
    let mut population = manager(0.0, 5);
    let start = Pos::new(1, 1);
    let id = population.spawn_at(&race("patroller", AiKind::BackAndForth), start);
    assert_eq!(population.exist_enemy(start), Some(id));

    let mut player = stats(10, 0, 0);
    population.think_all(&grid, FAR_AWAY);
    assert_eq!(population.get(id).map(Enemy::next_position), Some(Pos::new(1, 2)));
    let acts = population.act_all(&mut player);
    assert_eq!(acts, vec![EnemyAct::Moved { enemy: id, from: start, to: Pos::new(1, 2) }]);
    assert_eq!(population.exist_enemy(start), None);
}

#[test]
fn earlier_decisions_block_later_movers() {
    let grid = vertical_corridor_fixture();
    let mut population = manager(0.0, 6);
    let sentry = population.spawn_at(&race("sentry", AiKind::Stationary), Pos::new(1, 3));
    let patroller = population.spawn_at(&race("patroller", AiKind::BackAndForth), Pos::new(1, 1));
    let mut player = stats(10, 0, 0);

    population.think_all(&grid, FAR_AWAY);
    population.act_all(&mut player);
    assert_eq!(population.get(patroller).map(Enemy::position), Some(Pos::new(1, 2)));

    for _ in 0..3 {
        population.think_all(&grid, FAR_AWAY);
        assert!(population.act_all(&mut player).is_empty());
    }
    assert_eq!(population.get(patroller).map(Enemy::position), Some(Pos::new(1, 2)));
    assert_eq!(population.get(sentry).map(Enemy::position), Some(Pos::new(1, 3)));
}

#[test]
fn attacks_resolve_in_creation_order_and_stop_at_death() {
    let grid = open_room_fixture();
    let mut population = manager(0.0, 7);
    let player_pos = Pos::new(4, 4);
    let first = population.spawn_at(&race("left", AiKind::Stationary), Pos::new(3, 4));
    population.spawn_at(&race("right", AiKind::BackAndForth), Pos::new(5, 5));

    let mut player = stats(2, 0, 0);
    population.think_all(&grid, player_pos);
    let acts = population.act_all(&mut player);
    assert_eq!(acts, vec![EnemyAct::Attacked { enemy: first, damage: 3 }]);
    assert_eq!(player.hit_point(), 0);
    assert!(population.iter().all(|enemy| enemy.next_position() == enemy.position()));
}

#[test]
fn empty_race_pool_spawns_nothing() {
    let grid = open_room_fixture();
    let mut late = race("late", AiKind::BackAndForth);
    late.lowest_spawn_level = 5;
    let catalog = RaceCatalog::new(vec![late]).expect("valid");

    let mut population = manager(0.2, 8);
    let spawned = population.new_level(1, &grid, &catalog, Pos::new(4, 4), ChaCha8Rng::seed_from_u64(1));
    assert!(spawned.is_empty());
    assert!(population.is_empty());
    assert!(population.budget() > 0);
    assert_eq!(population.refill_one_if_below_budget(&grid, Pos::new(4, 4)), None);
}
