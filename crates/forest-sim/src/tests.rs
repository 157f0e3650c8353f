//! Tests for the simulation engine, the tree/seed/tank systems and the
//! headless scene.

use std::f64::consts::PI;

use glam::DVec3;
use hecs::{Entity, World};

use forest_ai::fsm::EnemyState;
use forest_core::commands::PlayerCommand;
use forest_core::components::{PhysicsBody, SeedStock, Tank, Tree};
use forest_core::config::Tuning;
use forest_core::constants::*;
use forest_core::enums::{Prototype, SoundCue, TreePhase};
use forest_core::events::SimEvent;
use forest_core::types::{RenderHandle, Transform};

use crate::bridge::{Contact, HeadlessScene, SceneBridge};
use crate::engine::{SimConfig, SimulationEngine};
use crate::registry::{EntitySet, Registry};
use crate::systems::daynight::DayNight;
use crate::systems::enemy::Brain;
use crate::systems::health::forest_health;
use crate::systems::{physics, tree};
use crate::world_setup;

const DT: f64 = 1.0 / 60.0;
const GROUND_Y: f64 = TANK_HEIGHT / 2.0;

fn empty_engine() -> SimulationEngine<HeadlessScene> {
    SimulationEngine::new(SimConfig::default(), HeadlessScene::new(ARENA_SIZE))
}

fn forest_engine(seed: u64) -> SimulationEngine<HeadlessScene> {
    SimulationEngine::with_forest(
        SimConfig {
            seed,
            ..Default::default()
        },
        HeadlessScene::new(ARENA_SIZE),
    )
}

fn tree_of(engine: &SimulationEngine<HeadlessScene>, entity: Entity) -> Tree {
    *engine.world().get::<&Tree>(entity).unwrap()
}

fn brain_of(engine: &SimulationEngine<HeadlessScene>, entity: Entity) -> Brain {
    *engine.world().get::<&Brain>(entity).unwrap()
}

// ---- Determinism ----

#[test]
fn test_determinism_same_seed() {
    let mut engine_a = forest_engine(12345);
    let mut engine_b = forest_engine(12345);

    for i in 0..600 {
        let command = PlayerCommand::Steer {
            heading: (i as f64) * 0.01,
            speed: PLAYER_SPEED,
        };
        engine_a.queue_command(command);
        engine_b.queue_command(command);

        let json_a = serde_json::to_string(&engine_a.tick(DT)).unwrap();
        let json_b = serde_json::to_string(&engine_b.tick(DT)).unwrap();
        assert_eq!(json_a, json_b, "snapshots diverged at tick {i}");
    }
}

#[test]
fn test_determinism_different_seeds() {
    let mut engine_a = forest_engine(111);
    let mut engine_b = forest_engine(222);

    let json_a = serde_json::to_string(&engine_a.tick(DT)).unwrap();
    let json_b = serde_json::to_string(&engine_b.tick(DT)).unwrap();
    assert_ne!(json_a, json_b, "different seeds should lay out different forests");
}

#[test]
fn test_populate_builds_forest_and_tanks() {
    let engine = forest_engine(7);
    let sets = engine.registry();
    let snap = engine.snapshot();

    assert!(!sets.trees.is_empty());
    assert_eq!(snap.forest.desired_trees as usize, sets.live_trees.len());
    assert_eq!(snap.forest.health, 1.0);
    assert!(snap.player.is_some());
    assert_eq!(snap.enemies.len(), 1);
    // Trees, the player and one enemy are all instanced.
    assert_eq!(engine.bridge().instance_count(), sets.trees.len() + 2);
    // Only the tanks start in the update set.
    assert_eq!(sets.updating.len(), 2);
}

// ---- Tick contract ----

#[test]
fn test_non_positive_dt_is_noop() {
    let mut engine = forest_engine(3);
    for _ in 0..30 {
        engine.tick(DT);
    }
    let before = serde_json::to_string(&engine.snapshot()).unwrap();
    engine.update(0.0);
    engine.update(-1.0);
    engine.update(f64::NAN);
    let after = serde_json::to_string(&engine.snapshot()).unwrap();
    assert_eq!(before, after);
}

#[test]
fn test_commands_wait_for_a_positive_tick() {
    let mut engine = empty_engine();
    let player = engine.spawn_player(DVec3::new(0.0, GROUND_Y, 0.0), 0.0);
    engine.queue_command(PlayerCommand::Steer {
        heading: 0.0,
        speed: PLAYER_SPEED,
    });

    engine.tick(0.0);
    assert!(!engine.world().get::<&Tank>(player).unwrap().moving);

    engine.tick(DT);
    assert!(engine.world().get::<&Tank>(player).unwrap().moving);
}

#[test]
fn test_time_advances_per_update() {
    let mut engine = empty_engine();
    engine.tick(0.25);
    engine.tick(0.25);
    assert_eq!(engine.time().tick, 2);
    assert!((engine.time().elapsed_secs - 0.5).abs() < 1e-12);
}

// ---- Tank vs tree ----

#[test]
fn test_tank_knocks_tree_down_once() {
    let mut engine = empty_engine();
    let tree = engine.spawn_tree(DVec3::new(0.0, 0.0, 3.0), Tree::grown());
    engine.set_desired_trees(1);
    engine.set_seed_wait(1e9);
    engine.spawn_player(DVec3::new(0.0, GROUND_Y, 0.0), 0.0);

    let mut events = Vec::new();
    for _ in 0..300 {
        engine.queue_command(PlayerCommand::Steer {
            heading: 0.0,
            speed: PLAYER_SPEED,
        });
        events.extend(engine.tick(DT).events);
    }

    let fallen = tree_of(&engine, tree);
    assert_eq!(fallen.phase, TreePhase::Fallen);
    assert_eq!(fallen.angle, TREE_FALLEN_ANGLE);

    let sets = engine.registry();
    assert!(sets.trees.contains(tree));
    assert!(!sets.live_trees.contains(tree));
    assert!(!sets.updating.contains(tree));

    assert_eq!(engine.bridge().sounds().len(), 1);
    assert_eq!(engine.bridge().sounds()[0].0, SoundCue::TreeFall);
    let fell = events.iter().filter(|e| matches!(e, SimEvent::TreeFell { .. })).count();
    assert_eq!(fell, 1);

    assert_eq!(engine.forest_health(), 0.0);
    assert!(engine.is_game_over());
    let lost = events.iter().filter(|e| matches!(e, SimEvent::ForestLost { .. })).count();
    assert_eq!(lost, 1, "game over must fire exactly once");
}

#[test]
fn test_tree_fall_is_monotonic_and_terminal() {
    let mut world = World::new();
    let mut sets = Registry::default();
    let mut scene = HeadlessScene::new(ARENA_SIZE);
    let mut events = Vec::new();
    let tuning = Tuning::default();

    let entity =
        world_setup::spawn_tree(&mut world, &mut sets, &mut scene, DVec3::ZERO, Tree::grown());
    assert!(!sets.updating.contains(entity));

    let tipped = tree::push(&mut world, &mut sets, &mut scene, &mut events, entity, DVec3::X);
    assert!(tipped);
    assert!(sets.updating.contains(entity));
    assert!(!sets.live_trees.contains(entity));
    assert!(world.get::<&Tree>(entity).unwrap().dir > 0.0);

    let mut last_angle = 0.0;
    let mut ticks = 0;
    while sets.updating.contains(entity) {
        tree::update(&mut world, &mut sets, &mut scene, entity, DT, &tuning);
        let angle = world.get::<&Tree>(entity).unwrap().angle;
        assert!(angle >= last_angle, "fall angle went backwards");
        assert!(angle <= TREE_FALLEN_ANGLE);
        last_angle = angle;
        ticks += 1;
        assert!(ticks < 600, "tree never finished falling");
    }

    let done = *world.get::<&Tree>(entity).unwrap();
    assert_eq!(done.phase, TreePhase::Fallen);
    assert_eq!(done.angle, TREE_FALLEN_ANGLE);

    // Further pushes only nudge the direction, and a fallen tree barely turns.
    let dir = done.dir;
    let again = tree::push(&mut world, &mut sets, &mut scene, &mut events, entity, DVec3::NEG_X);
    assert!(!again);
    assert!((world.get::<&Tree>(entity).unwrap().dir - dir).abs() < 1e-9);
    assert_eq!(scene.sounds().len(), 1);
    assert_eq!(events.len(), 1);
}

#[test]
fn test_sapling_tipped_while_growing_finishes_growth_then_falls() {
    let mut world = World::new();
    let mut sets = Registry::default();
    let mut scene = HeadlessScene::new(ARENA_SIZE);
    let mut events = Vec::new();
    let tuning = Tuning::default();

    let entity =
        world_setup::spawn_tree(&mut world, &mut sets, &mut scene, DVec3::ZERO, Tree::sapling());
    assert!(sets.updating.contains(entity));
    assert!(sets.live_trees.contains(entity));

    assert!(tree::push(&mut world, &mut sets, &mut scene, &mut events, entity, DVec3::Z));
    assert!(!sets.live_trees.contains(entity));

    for _ in 0..10 {
        tree::update(&mut world, &mut sets, &mut scene, entity, DT, &tuning);
    }
    let growing = *world.get::<&Tree>(entity).unwrap();
    assert_eq!(growing.phase, TreePhase::Falling);
    assert_eq!(growing.angle, 0.0);
    assert!(growing.size > 0.0 && growing.size < 1.0);

    let mut ticks = 0;
    while sets.updating.contains(entity) {
        tree::update(&mut world, &mut sets, &mut scene, entity, DT, &tuning);
        ticks += 1;
        assert!(ticks < 600);
    }
    let done = *world.get::<&Tree>(entity).unwrap();
    assert_eq!(done.phase, TreePhase::Fallen);
    assert_eq!(done.size, 1.0);
}

#[test]
fn test_sapling_grows_to_full_size_and_stops_updating() {
    let mut engine = empty_engine();
    engine.set_seed_wait(1e9);
    let sapling = engine.spawn_tree(DVec3::new(5.0, 0.0, 5.0), Tree::sapling());

    for _ in 0..40 {
        engine.tick(DT);
    }
    let grown = tree_of(&engine, sapling);
    assert_eq!(grown.phase, TreePhase::Standing);
    assert_eq!(grown.size, 1.0);
    assert!(!engine.registry().updating.contains(sapling));
    assert!(engine.registry().live_trees.contains(sapling));
    let handle = *engine.world().get::<&RenderHandle>(sapling).unwrap();
    let scale = engine.bridge().transform(handle).unwrap().scale;
    assert_eq!(scale, 1.0);
}

// ---- Seeds ----

#[test]
fn test_collect_then_plant() {
    let mut engine = empty_engine();
    engine.set_seed_wait(1e9);
    let player = engine.spawn_player(DVec3::new(0.0, GROUND_Y, 0.0), 0.0);
    let seed = engine.spawn_seed(DVec3::new(0.0, SEED_SIZE / 2.0, 1.0));

    let snap = engine.tick(DT);
    assert!(snap
        .events
        .iter()
        .any(|e| matches!(e, SimEvent::SeedCollected { stock: 1 })));
    assert_eq!(engine.world().get::<&SeedStock>(player).unwrap().seeds, 1);
    assert!(engine.registry().is_queued_for_removal(seed));

    engine.tick(DT);
    assert!(!engine.world().contains(seed));
    assert!(engine.registry().seeds.is_empty());
    assert_eq!(engine.bridge().instance_count(), 1);

    let at = engine.snapshot().player.unwrap().position;
    engine.queue_command(PlayerCommand::Plant);
    let snap = engine.tick(DT);
    let planted = snap
        .events
        .iter()
        .find_map(|e| match e {
            SimEvent::TreePlanted { position, stock } => Some((*position, *stock)),
            _ => None,
        })
        .expect("plant should succeed with one seed");
    assert_eq!(planted.1, 0);
    assert!((planted.0 - DVec3::new(at.x, 0.0, at.z - PLANT_DISTANCE_BEHIND)).length() < 1e-9);

    let sets = engine.registry();
    assert_eq!(sets.trees.len(), 1);
    let sapling = sets.trees.get(0).unwrap();
    assert!(sets.live_trees.contains(sapling));
    assert!(sets.updating.contains(sapling));
    assert_eq!(tree_of(&engine, sapling).phase, TreePhase::Growing);

    // Out of seeds: planting does nothing.
    engine.queue_command(PlayerCommand::Plant);
    let snap = engine.tick(DT);
    assert!(!snap.events.iter().any(|e| matches!(e, SimEvent::TreePlanted { .. })));
    assert_eq!(engine.registry().trees.len(), 1);
}

#[test]
fn test_seed_expires_and_is_disposed() {
    let mut engine = empty_engine();
    engine.set_seed_wait(1e9);
    let seed = engine.spawn_seed(DVec3::new(5.0, 1.0, 5.0));

    let mut expired = 0;
    for _ in 0..125 {
        let snap = engine.tick(0.5);
        expired += snap
            .events
            .iter()
            .filter(|e| matches!(e, SimEvent::SeedExpired))
            .count();
    }
    assert_eq!(expired, 1);
    assert!(!engine.world().contains(seed));
    assert!(engine.registry().seeds.is_empty());
    assert!(engine.registry().updating.is_empty());
    assert_eq!(engine.bridge().instance_count(), 0);
}

#[test]
fn test_seed_spawner_counts_down_by_live_trees() {
    let mut engine = empty_engine();
    for x in [-4.0, 0.0, 4.0] {
        engine.spawn_tree(DVec3::new(x, 0.0, 0.0), Tree::grown());
    }
    engine.set_seed_wait(1.0);
    engine.tick(0.1);
    assert!((engine.seed_spawner().wait - 0.7).abs() < 1e-9);
    assert!(engine.registry().seeds.is_empty());
}

#[test]
fn test_seed_spawner_drops_near_a_live_tree() {
    let mut engine = empty_engine();
    let parents: Vec<DVec3> = [-8.0, 0.0, 8.0]
        .iter()
        .map(|x| DVec3::new(*x, 0.0, 0.0))
        .collect();
    for p in &parents {
        engine.spawn_tree(*p, Tree::grown());
    }
    engine.set_seed_wait(0.0);

    let snap = engine.tick(DT);
    let dropped = snap
        .events
        .iter()
        .find_map(|e| match e {
            SimEvent::SeedDropped { position } => Some(*position),
            _ => None,
        })
        .expect("a seed should drop once the countdown is over");
    assert_eq!(dropped.y, SEED_DROP_HEIGHT);
    assert!(parents.iter().any(|p| {
        let r = DVec3::new(dropped.x - p.x, 0.0, dropped.z - p.z).length();
        (SEED_DROP_RADIUS_MIN - 1e-9..=SEED_DROP_RADIUS_MAX + 1e-9).contains(&r)
    }));
    assert_eq!(engine.registry().seeds.len(), 1);

    let wait = engine.seed_spawner().wait;
    assert!((SEED_WAIT_MIN..=SEED_WAIT_MAX).contains(&wait));

    // The cap of 0.33 seeds per live tree allows no second seed for three trees.
    engine.set_seed_wait(0.0);
    engine.tick(DT);
    assert_eq!(engine.registry().seeds.len(), 1);
}

// ---- Steering ----

#[test]
fn test_steer_reaches_desired_speed_monotonically() {
    let mut engine = empty_engine();
    let player = engine.spawn_player(DVec3::new(0.0, GROUND_Y, 0.0), 0.0);

    let mut last = 0.0;
    for _ in 0..15 {
        engine.queue_command(PlayerCommand::Steer {
            heading: 0.0,
            speed: PLAYER_SPEED,
        });
        engine.tick(DT);
        let speed = engine.world().get::<&Tank>(player).unwrap().speed;
        assert!(speed >= last);
        last = speed;
    }
    assert_eq!(last, PLAYER_SPEED);
    assert!(engine.snapshot().player.unwrap().position.z > 0.0);
}

#[test]
fn test_steer_turns_at_limited_rate() {
    let mut engine = empty_engine();
    let player = engine.spawn_player(DVec3::new(0.0, GROUND_Y, 0.0), 0.0);

    engine.queue_command(PlayerCommand::Steer {
        heading: PI / 2.0,
        speed: PLAYER_SPEED,
    });
    engine.tick(DT);
    let heading = engine.world().get::<&Transform>(player).unwrap().heading();
    assert!((heading - TANK_TURN_RATE * DT).abs() < 1e-12);
    // Facing well off target, the commanded speed is scaled down.
    assert!(engine.world().get::<&Tank>(player).unwrap().speed < PLAYER_SPEED);
}

#[test]
fn test_stop_brakes_once() {
    let mut engine = empty_engine();
    let player = engine.spawn_player(DVec3::new(0.0, GROUND_Y, 0.0), 0.0);
    for _ in 0..30 {
        engine.queue_command(PlayerCommand::Steer {
            heading: 0.0,
            speed: PLAYER_SPEED,
        });
        engine.tick(DT);
    }
    let cruising = engine.world().get::<&PhysicsBody>(player).unwrap().velocity.z;
    assert!(cruising > 0.0);

    engine.queue_command(PlayerCommand::Stop);
    engine.tick(DT);
    assert!(!engine.world().get::<&Tank>(player).unwrap().moving);
    let braked = engine.world().get::<&PhysicsBody>(player).unwrap().velocity.z;
    assert!(braked < cruising);
}

#[test]
fn test_turret_stays_within_arc() {
    let mut engine = empty_engine();
    let player = engine.spawn_player(DVec3::new(0.0, GROUND_Y, 0.0), 0.0);
    for _ in 0..300 {
        engine.queue_command(PlayerCommand::Look { heading: PI });
        engine.tick(DT);
        let turret = engine.world().get::<&Tank>(player).unwrap().turret;
        assert!(turret.abs() <= TURRET_ARC);
    }
    let turret = engine.world().get::<&Tank>(player).unwrap().turret;
    assert_eq!(turret.abs(), TURRET_ARC);
}

// ---- Enemies ----

#[test]
fn test_two_enemies_one_tree_single_claim() {
    let mut engine = empty_engine();
    let tree = engine.spawn_tree(DVec3::ZERO, Tree::grown());
    let first = engine.spawn_enemy(DVec3::new(10.0, GROUND_Y, 0.0), 0.0);
    let second = engine.spawn_enemy(DVec3::new(-12.0, GROUND_Y, 0.0), 0.0);

    engine.tick(DT);

    assert_eq!(brain_of(&engine, first).state.target(), Some(tree));
    assert_eq!(brain_of(&engine, second).state, EnemyState::Seeking);
}

#[test]
fn test_enemy_tips_target_then_cools_down() {
    let mut engine = empty_engine();
    engine.set_seed_wait(1e9);
    let tree = engine.spawn_tree(DVec3::ZERO, Tree::grown());
    let enemy = engine.spawn_enemy(DVec3::new(0.0, GROUND_Y, -6.0), 0.0);

    let mut tipped = false;
    for _ in 0..600 {
        engine.tick(DT);
        if tree_of(&engine, tree).phase != TreePhase::Standing {
            tipped = true;
            break;
        }
    }
    assert!(tipped, "enemy never reached its target");
    assert!(matches!(
        brain_of(&engine, enemy).state,
        EnemyState::Cooldown { .. }
    ));

    engine.tick(DT);
    assert!(matches!(
        brain_of(&engine, enemy).state,
        EnemyState::Cooldown { .. }
    ));
    assert_eq!(engine.bridge().sounds().len(), 1);
}

#[test]
fn test_enemy_ages_each_tick() {
    let mut engine = empty_engine();
    let enemy = engine.spawn_enemy(DVec3::new(0.0, GROUND_Y, 0.0), 0.0);
    for _ in 0..10 {
        engine.tick(0.1);
    }
    assert!((brain_of(&engine, enemy).age - 1.0).abs() < 1e-9);
}

// ---- Forest health and lighting ----

#[test]
fn test_forest_health_bounds() {
    assert_eq!(forest_health(0, 0), 0.0);
    assert_eq!(forest_health(1, 2), 0.5);
    assert_eq!(forest_health(3, 2), 1.0);

    let mut engine = empty_engine();
    for x in [-4.0, 0.0, 4.0] {
        engine.spawn_tree(DVec3::new(x, 0.0, 0.0), Tree::grown());
    }
    engine.set_desired_trees(2);
    engine.tick(DT);
    assert_eq!(engine.forest_health(), 1.0);
    assert!(!engine.is_game_over());
}

#[test]
fn test_empty_world_is_not_game_over() {
    let mut engine = empty_engine();
    engine.tick(DT);
    assert!(!engine.is_game_over());
}

#[test]
fn test_day_night_intensities() {
    let mut noon = DayNight::new(true);
    noon.advance(60.0, DAY_LENGTH_SECS);
    assert!((noon.daytime - PI / 2.0).abs() < 1e-9);
    assert!((noon.sun_intensity - 0.4).abs() < 1e-9);
    assert!((noon.ambient_intensity - 0.4).abs() < 1e-9);

    let mut midnight = DayNight::new(true);
    midnight.advance(180.0, DAY_LENGTH_SECS);
    assert!(midnight.is_night());
    assert!((midnight.sun_intensity - 0.02).abs() < 1e-9);
    assert!((midnight.ambient_intensity - 0.2).abs() < 1e-9);

    let mut wrapped = DayNight::new(true);
    wrapped.advance(DAY_LENGTH_SECS + 60.0, DAY_LENGTH_SECS);
    assert!((wrapped.daytime - PI / 2.0).abs() < 1e-9);
}

#[test]
fn test_day_night_disabled_keeps_initial_light() {
    let mut frozen = DayNight::new(false);
    frozen.advance(100.0, DAY_LENGTH_SECS);
    assert_eq!(frozen.daytime, 0.0);
    assert_eq!(frozen.sun_intensity, INITIAL_SUN_INTENSITY);
    assert_eq!(frozen.ambient_intensity, INITIAL_AMBIENT_INTENSITY);
}

// ---- Physics ----

#[test]
fn test_integrate_consumes_acceleration() {
    let mut body = PhysicsBody::with_mass(2.0);
    physics::add_acceleration(&mut body, DVec3::new(0.0, 0.0, 6.0));
    let displacement = physics::integrate(&mut body, 0.5);
    assert_eq!(body.velocity, DVec3::new(0.0, 0.0, 3.0));
    assert_eq!(body.acceleration, DVec3::ZERO);
    assert_eq!(displacement, DVec3::new(0.0, 0.0, 1.5));
}

#[test]
fn test_environment_forces() {
    let tuning = Tuning::default();
    let mut body = PhysicsBody::with_mass(62.0);
    body.velocity = DVec3::new(62.0, 0.0, 0.0);
    physics::apply_environment(&mut body, &tuning);
    assert!((body.acceleration.x + 10.0).abs() < 1e-9);
    assert_eq!(body.acceleration.y, -GRAVITY);

    let mut bumped = PhysicsBody::default();
    bumped.velocity = DVec3::new(1.0, -2.0, 1.0);
    physics::on_collision(&mut bumped, &tuning);
    assert_eq!(bumped.velocity, DVec3::new(0.92, 0.0, 0.92));
}

// ---- Headless scene ----

#[test]
fn test_scene_ground_and_walls() {
    let mut scene = HeadlessScene::new(10.0);
    let seed = scene.create_instance(Prototype::Seed, &Transform::at(DVec3::new(0.0, 0.5, 0.0)));

    let fall = scene.move_with_collisions(seed, DVec3::new(0.0, -1.0, 0.0));
    assert_eq!(fall.contacts, vec![Contact::Ground]);
    assert_eq!(scene.transform(seed).unwrap().position.y, SEED_SIZE / 2.0);

    let slide = scene.move_with_collisions(seed, DVec3::new(100.0, 0.0, 0.0));
    assert!(slide.contacts.contains(&Contact::Wall));
    assert_eq!(scene.transform(seed).unwrap().position.x, 5.0 - SEED_SIZE / 2.0);
}

#[test]
fn test_scene_arena_narrower_than_tank() {
    let mut scene = HeadlessScene::new(3.0);
    let tank = scene.create_instance(
        Prototype::EnemyTank,
        &Transform::at(DVec3::new(0.0, GROUND_Y, 0.0)),
    );
    let outcome = scene.move_with_collisions(tank, DVec3::new(2.0, 0.0, -1.0));
    assert!(outcome.contacts.contains(&Contact::Wall));
    let position = scene.transform(tank).unwrap().position;
    assert_eq!(position.x, 0.0);
    assert_eq!(position.z, 0.0);
}

#[test]
fn test_scene_trunks_do_not_block() {
    let mut scene = HeadlessScene::new(ARENA_SIZE);
    let tank = scene.create_instance(
        Prototype::PlayerTank,
        &Transform::at(DVec3::new(0.0, GROUND_Y, 0.0)),
    );
    let trunk = scene.create_instance(Prototype::Tree, &Transform::at(DVec3::new(0.0, 0.0, 3.0)));
    assert!(!scene.intersects(tank, trunk));

    let outcome = scene.move_with_collisions(tank, DVec3::new(0.0, 0.0, 1.5));
    assert!(outcome.contacts.is_empty());
    assert!(scene.intersects(tank, trunk));
    assert!(scene.intersects(trunk, tank));
}

#[test]
fn test_scene_bodies_push_apart() {
    let mut scene = HeadlessScene::new(ARENA_SIZE);
    let a = scene.create_instance(Prototype::EnemyTank, &Transform::at(DVec3::new(0.0, GROUND_Y, 0.0)));
    let b = scene.create_instance(Prototype::EnemyTank, &Transform::at(DVec3::new(5.0, GROUND_Y, 0.0)));

    let outcome = scene.move_with_collisions(a, DVec3::new(3.0, 0.0, 0.0));
    assert_eq!(outcome.contacts, vec![Contact::Instance(b)]);
    let reach = TANK_WIDTH.max(TANK_DEPTH);
    assert!((scene.transform(a).unwrap().position.x - (5.0 - reach)).abs() < 1e-9);
}

#[test]
#[should_panic]
fn test_scene_rejects_disposed_handle() {
    let mut scene = HeadlessScene::new(ARENA_SIZE);
    let seed = scene.create_instance(Prototype::Seed, &Transform::default());
    scene.dispose(seed);
    scene.dispose(seed);
}

// ---- Membership sets ----

#[test]
fn test_entity_set_keeps_insertion_order() {
    let mut world = World::new();
    let a = world.spawn((1u8,));
    let b = world.spawn((2u8,));
    let c = world.spawn((3u8,));

    let mut set = EntitySet::default();
    assert!(set.insert(c));
    assert!(set.insert(a));
    assert!(set.insert(b));
    assert!(!set.insert(a));
    assert_eq!(set.snapshot(), vec![c, a, b]);

    assert!(set.remove(a));
    assert!(!set.remove(a));
    assert_eq!(set.iter().collect::<Vec<_>>(), vec![c, b]);
    assert_eq!(set.drain(), vec![c, b]);
    assert!(set.is_empty());
}
