//! Snapshot system: builds a `WorldSnapshot` from the current world state.

use hecs::{Entity, World};

use forest_core::components::{PhysicsBody, Seed, SeedStock, Tank, Tree};
use forest_core::events::SimEvent;
use forest_core::state::{ForestView, LightingView, SeedView, TankView, TreeView, WorldSnapshot};
use forest_core::types::{SimTime, Transform};

use crate::registry::Registry;

/// Build a complete snapshot. Membership sets fix the ordering of every list.
pub fn build_snapshot(
    world: &World,
    sets: &Registry,
    time: SimTime,
    lighting: LightingView,
    forest: ForestView,
    events: Vec<SimEvent>,
) -> WorldSnapshot {
    WorldSnapshot {
        time,
        lighting,
        forest,
        player: sets.player.and_then(|p| tank_view(world, p)),
        enemies: sets.enemies.iter().filter_map(|e| tank_view(world, e)).collect(),
        trees: sets.trees.iter().filter_map(|t| tree_view(world, t)).collect(),
        seeds: sets.seeds.iter().filter_map(|s| seed_view(world, s)).collect(),
        events,
    }
}

fn tank_view(world: &World, entity: Entity) -> Option<TankView> {
    let mut query = world
        .query_one::<(&Tank, &Transform, &PhysicsBody, Option<&SeedStock>)>(entity)
        .ok()?;
    let (tank, transform, body, stock) = query.get()?;
    Some(TankView {
        position: transform.position,
        heading: transform.heading(),
        turret_heading: transform.heading() + tank.turret,
        speed: body.velocity.length(),
        seeds: stock.map_or(0, |s| s.seeds),
    })
}

fn tree_view(world: &World, entity: Entity) -> Option<TreeView> {
    let mut query = world.query_one::<(&Tree, &Transform)>(entity).ok()?;
    let (tree, transform) = query.get()?;
    Some(TreeView {
        position: transform.position,
        phase: tree.phase,
        angle: tree.angle,
        dir: tree.dir,
        size: tree.size,
    })
}

fn seed_view(world: &World, entity: Entity) -> Option<SeedView> {
    let mut query = world.query_one::<(&Seed, &Transform)>(entity).ok()?;
    let (seed, transform) = query.get()?;
    Some(SeedView {
        position: transform.position,
        age: seed.age,
    })
}
