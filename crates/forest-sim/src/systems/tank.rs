//! Tank driving, turret aiming, tree knocking and the player's seed economy.

use std::f64::consts::PI;

use glam::DVec3;
use hecs::{Entity, World};
use log::{debug, warn};

use forest_core::components::{PhysicsBody, SeedStock, Tank, Tree};
use forest_core::config::Tuning;
use forest_core::constants::{PLANT_DISTANCE_BEHIND, TURRET_ARC};
use forest_core::events::SimEvent;
use forest_core::math::{
    delta_angle, heading_vector, lerp, move_towards, move_towards_angle, normalize_radians,
};
use forest_core::types::{RenderHandle, Transform};

use super::{lifecycle_violation, physics, tree};
use crate::bridge::{Contact, SceneBridge};
use crate::registry::Registry;
use crate::world_setup;

/// Turn toward `target` heading and accelerate forward.
///
/// The commanded speed scales down with the remaining turn, so a tank facing
/// away from its target barely moves until it has come around.
pub fn steer(
    world: &mut World,
    bridge: &mut dyn SceneBridge,
    entity: Entity,
    target: f64,
    goal_speed: f64,
    dt: f64,
    tuning: &Tuning,
) {
    let (tank, body, transform, handle) = world
        .query_one_mut::<(&mut Tank, &mut PhysicsBody, &mut Transform, &RenderHandle)>(entity)
        .unwrap_or_else(|_| lifecycle_violation(entity, "tank"));

    let heading = move_towards_angle(transform.heading(), target, tuning.tank_turn_rate * dt);
    transform.rotation.y = heading;
    let alignment = 1.0 - delta_angle(heading, target).abs() / PI;
    let goal = lerp(0.0, goal_speed, alignment);
    tank.speed = move_towards(tank.speed, goal, tuning.tank_speed_change_rate * dt);
    physics::add_acceleration(body, heading_vector(heading) * tank.speed);
    tank.moving = true;
    bridge.sync_transform(*handle, transform);
}

/// Brake once if the tank was moving.
pub fn stop(world: &mut World, entity: Entity, tuning: &Tuning) {
    let (tank, body) = world
        .query_one_mut::<(&mut Tank, &mut PhysicsBody)>(entity)
        .unwrap_or_else(|_| lifecycle_violation(entity, "tank"));
    if tank.moving {
        let brake = body.velocity * -tuning.tank_brake_factor;
        physics::add_acceleration(body, brake);
        tank.moving = false;
    }
}

/// Swing the turret toward a world heading, limited to the forward arc.
pub fn look(world: &mut World, entity: Entity, target: f64, dt: f64, tuning: &Tuning) {
    let (tank, transform) = world
        .query_one_mut::<(&mut Tank, &Transform)>(entity)
        .unwrap_or_else(|_| lifecycle_violation(entity, "tank"));
    let relative = normalize_radians(target - transform.heading());
    tank.turret = move_towards_angle(tank.turret, relative, tuning.tank_turn_rate * dt)
        .clamp(-TURRET_ARC, TURRET_ARC);
}

/// Physics step shared by every tank, followed by tree knocking. Returns the
/// contacts of the move.
pub fn update(
    world: &mut World,
    sets: &mut Registry,
    bridge: &mut dyn SceneBridge,
    events: &mut Vec<SimEvent>,
    entity: Entity,
    dt: f64,
    tuning: &Tuning,
) -> Vec<Contact> {
    let contacts = physics::step(world, bridge, entity, dt, tuning);
    knock_trees(world, sets, bridge, events, entity, tuning);
    contacts
}

/// Push every nearby tree whose trunk touches the tank body.
pub fn knock_trees(
    world: &mut World,
    sets: &mut Registry,
    bridge: &mut dyn SceneBridge,
    events: &mut Vec<SimEvent>,
    entity: Entity,
    tuning: &Tuning,
) {
    let (position, handle) = {
        let (transform, handle) = world
            .query_one_mut::<(&Transform, &RenderHandle)>(entity)
            .unwrap_or_else(|_| lifecycle_violation(entity, "tank"));
        (transform.position, *handle)
    };

    let touching: Vec<(Entity, DVec3)> = sets
        .trees
        .iter()
        .filter_map(|candidate| {
            let mut query = world.query_one::<(&Transform, &RenderHandle)>(candidate).ok()?;
            let (transform, tree_handle) = query.get()?;
            let dir = transform.position - position;
            let touches = dir.length_squared() < tuning.tree_contact_distance_sq
                && bridge.intersects(*tree_handle, handle);
            touches.then_some((candidate, dir))
        })
        .collect();

    for (target, dir) in touching {
        tree::push(world, sets, bridge, events, target, dir);
    }
}

/// Pick up every seed the player bumped into this tick. Each seed is
/// collected at most once even if several contacts report it.
pub fn collect_seeds(
    world: &mut World,
    sets: &mut Registry,
    events: &mut Vec<SimEvent>,
    player: Entity,
    contacts: &[Contact],
) {
    for contact in contacts {
        let Contact::Instance(handle) = contact else {
            continue;
        };
        let Some(seed) = sets.entity_for(*handle) else {
            continue;
        };
        if !sets.seeds.contains(seed) || !sets.queue_removal(seed) {
            continue;
        }
        let mut stock = world
            .get::<&mut SeedStock>(player)
            .unwrap_or_else(|_| lifecycle_violation(player, "seed stock"));
        stock.seeds += 1;
        events.push(SimEvent::SeedCollected { stock: stock.seeds });
        debug!("player collected seed {seed:?}, holding {}", stock.seeds);
    }
}

/// Plant a sapling behind the player, consuming one seed. Returns the new
/// tree, or `None` when the player has no seeds.
pub fn plant(
    world: &mut World,
    sets: &mut Registry,
    bridge: &mut dyn SceneBridge,
    events: &mut Vec<SimEvent>,
    player: Entity,
) -> Option<Entity> {
    let (stock, transform) = world
        .query_one_mut::<(&mut SeedStock, &Transform)>(player)
        .unwrap_or_else(|_| lifecycle_violation(player, "seed stock"));
    if stock.seeds == 0 {
        warn!("plant requested with no seeds");
        return None;
    }
    stock.seeds -= 1;
    let remaining = stock.seeds;

    let behind = transform.position - heading_vector(transform.heading()) * PLANT_DISTANCE_BEHIND;
    let position = DVec3::new(behind.x, 0.0, behind.z);
    let sapling = world_setup::spawn_tree(world, sets, bridge, position, Tree::sapling());
    events.push(SimEvent::TreePlanted {
        position,
        stock: remaining,
    });
    debug!("planted sapling {sapling:?}, {remaining} seeds left");
    Some(sapling)
}
