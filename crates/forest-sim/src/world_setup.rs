//! Entity spawn factories and initial world layout.
//!
//! Creates trees, seeds and tanks with their component bundles, registers
//! them in the membership sets and instances them in the scene.

use std::f64::consts::TAU;

use glam::{DVec2, DVec3};
use hecs::{Entity, World};
use log::debug;
use rand::Rng;

use forest_ai::fsm::EnemyBrain;
use forest_core::components::{PhysicsBody, Seed, SeedStock, Tank, Tree};
use forest_core::constants::TANK_SPAWN_HEIGHT;
use forest_core::enums::{Prototype, TreePhase};
use forest_core::math::denormalize;
use forest_core::types::{RenderHandle, Transform};
use forest_terrain::{find_free_space, layout_tree_grid, TreeLayout, Triangulation};

use crate::bridge::SceneBridge;
use crate::registry::Registry;

/// Spawn a tree. Saplings join the update set so they grow.
pub fn spawn_tree(
    world: &mut World,
    sets: &mut Registry,
    bridge: &mut dyn SceneBridge,
    position: DVec3,
    tree: Tree,
) -> Entity {
    let transform = Transform {
        scale: tree.size,
        ..Transform::at(position)
    };
    let handle = bridge.create_instance(Prototype::Tree, &transform);
    let entity = world.spawn((tree, transform, handle));
    sets.bind_handle(handle, entity);
    sets.add_tree(entity);
    if tree.phase == TreePhase::Growing {
        sets.updating.insert(entity);
    }
    entity
}

pub fn spawn_seed(
    world: &mut World,
    sets: &mut Registry,
    bridge: &mut dyn SceneBridge,
    position: DVec3,
) -> Entity {
    let transform = Transform::at(position);
    let handle = bridge.create_instance(Prototype::Seed, &transform);
    let entity = world.spawn((Seed::default(), Seed::body(), transform, handle));
    sets.bind_handle(handle, entity);
    sets.add_seed(entity);
    entity
}

/// Spawn the player tank, with an empty seed stock.
pub fn spawn_player(
    world: &mut World,
    sets: &mut Registry,
    bridge: &mut dyn SceneBridge,
    position: DVec3,
    heading: f64,
) -> Entity {
    let (transform, handle) = tank_instance(bridge, Prototype::PlayerTank, position, heading);
    let entity = world.spawn((
        Tank::default(),
        PhysicsBody::default(),
        SeedStock::default(),
        transform,
        handle,
    ));
    sets.bind_handle(handle, entity);
    sets.add_mob(entity);
    sets.player = Some(entity);
    entity
}

pub fn spawn_enemy(
    world: &mut World,
    sets: &mut Registry,
    bridge: &mut dyn SceneBridge,
    position: DVec3,
    heading: f64,
) -> Entity {
    let (transform, handle) = tank_instance(bridge, Prototype::EnemyTank, position, heading);
    let entity = world.spawn((
        Tank::default(),
        PhysicsBody::default(),
        EnemyBrain::<Entity>::default(),
        transform,
        handle,
    ));
    sets.bind_handle(handle, entity);
    sets.add_enemy(entity);
    entity
}

fn tank_instance(
    bridge: &mut dyn SceneBridge,
    prototype: Prototype,
    position: DVec3,
    heading: f64,
) -> (Transform, RenderHandle) {
    let mut transform = Transform::at(position);
    transform.rotation.y = heading;
    let handle = bridge.create_instance(prototype, &transform);
    (transform, handle)
}

/// Lay out the starting forest on a jittered grid. Returns the triangulation
/// of the tree positions, used later for free-space queries.
pub fn plant_forest<R: Rng + ?Sized>(
    world: &mut World,
    sets: &mut Registry,
    bridge: &mut dyn SceneBridge,
    rng: &mut R,
    arena_size: f64,
    density: f64,
) -> Triangulation {
    let layout = TreeLayout {
        density,
        ..TreeLayout::default()
    };
    let grid = layout_tree_grid(arena_size, &layout, rng);
    for p in &grid.positions {
        spawn_tree(world, sets, bridge, DVec3::new(p.x, 0.0, p.y), Tree::grown());
    }
    debug!(
        "planted {} trees on a {}x{} grid",
        grid.positions.len(),
        grid.grid_size,
        grid.grid_size
    );
    Triangulation::from_points(&grid.positions)
}

/// Spawn the player at the arena center and `enemy_count` enemies at random
/// spots, each then moved into the roomiest unoccupied gap between trees.
#[allow(clippy::too_many_arguments)]
pub fn spawn_tanks<R: Rng + ?Sized>(
    world: &mut World,
    sets: &mut Registry,
    bridge: &mut dyn SceneBridge,
    rng: &mut R,
    triangulation: &Triangulation,
    arena_size: f64,
    enemy_count: usize,
    min_dist: f64,
    spawn_inset: f64,
) {
    let heading = TAU * rng.gen::<f64>();
    let player = spawn_player(
        world,
        sets,
        bridge,
        DVec3::new(0.0, TANK_SPAWN_HEIGHT, 0.0),
        heading,
    );
    move_to_free_space(world, sets, bridge, triangulation, player, min_dist);

    let reach = arena_size / 2.0 - spawn_inset;
    for _ in 0..enemy_count {
        let heading = TAU * rng.gen::<f64>();
        let x = denormalize(rng.gen(), -1.0, 1.0) * reach;
        let z = denormalize(rng.gen(), -1.0, 1.0) * reach;
        let enemy = spawn_enemy(world, sets, bridge, DVec3::new(x, TANK_SPAWN_HEIGHT, z), heading);
        move_to_free_space(world, sets, bridge, triangulation, enemy, min_dist);
    }
}

/// Move a mobile entity to the centroid of the largest free triangle of the
/// tree triangulation that does not overlap another mob. Leaves the entity
/// where it was when no such spot exists. Returns whether it moved.
pub fn move_to_free_space(
    world: &mut World,
    sets: &Registry,
    bridge: &mut dyn SceneBridge,
    triangulation: &Triangulation,
    entity: Entity,
    min_dist: f64,
) -> bool {
    let Ok(mut query) = world.query_one::<(&Transform, &RenderHandle)>(entity) else {
        return false;
    };
    let Some((origin, handle)) = query.get().map(|(t, h)| (*t, *h)) else {
        return false;
    };
    drop(query);

    let others: Vec<RenderHandle> = sets
        .mobs
        .iter()
        .filter(|m| *m != entity)
        .filter_map(|m| world.get::<&RenderHandle>(m).ok().map(|h| *h))
        .collect();

    let at = |spot: DVec2| {
        let mut transform = origin;
        transform.position.x = spot.x;
        transform.position.z = spot.y;
        transform
    };
    let spot = find_free_space(triangulation, min_dist, |candidate| {
        bridge.sync_transform(handle, &at(candidate));
        !others.iter().any(|other| bridge.intersects(handle, *other))
    });

    let placed = spot.map_or(origin, at);
    bridge.sync_transform(handle, &placed);
    if let Ok(mut transform) = world.get::<&mut Transform>(entity) {
        *transform = placed;
    }
    spot.is_some()
}
