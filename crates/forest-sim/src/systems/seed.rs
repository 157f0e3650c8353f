//! Seed drops from live trees and seed decay.

use std::f64::consts::TAU;

use glam::DVec3;
use hecs::{Entity, World};
use log::debug;
use rand::Rng;

use forest_core::components::{PhysicsBody, Seed};
use forest_core::config::Tuning;
use forest_core::constants::{SEED_DROP_HEIGHT, SEED_DROP_RADIUS_MAX, SEED_DROP_RADIUS_MIN};
use forest_core::events::SimEvent;
use forest_core::math::denormalize;
use forest_core::types::Transform;

use super::{lifecycle_violation, physics};
use crate::bridge::SceneBridge;
use crate::registry::Registry;
use crate::world_setup;

/// Countdown until the next seed drop.
///
/// The countdown runs faster the more live trees there are.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SeedSpawner {
    pub wait: f64,
}

impl SeedSpawner {
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            wait: tuning.seed_initial_wait,
        }
    }
}

/// Tick the spawner; drop a seed from a random live tree when the countdown
/// has run out and the seed population is below its cap.
#[allow(clippy::too_many_arguments)]
pub fn run<R: Rng + ?Sized>(
    world: &mut World,
    sets: &mut Registry,
    bridge: &mut dyn SceneBridge,
    rng: &mut R,
    spawner: &mut SeedSpawner,
    events: &mut Vec<SimEvent>,
    dt: f64,
    tuning: &Tuning,
) {
    let live = sets.live_trees.len();
    if spawner.wait > 0.0 {
        spawner.wait = (spawner.wait - dt * live as f64).max(0.0);
        return;
    }
    if live == 0 || sets.seeds.len() as f64 >= tuning.max_seed_ratio * live as f64 {
        return;
    }

    spawner.wait = denormalize(rng.gen(), tuning.seed_wait_min, tuning.seed_wait_max);
    let index = ((rng.gen::<f64>() * live as f64) as usize).min(live - 1);
    let Some(parent) = sets.live_trees.get(index) else {
        return;
    };
    let base = world
        .get::<&Transform>(parent)
        .unwrap_or_else(|_| lifecycle_violation(parent, "transform"))
        .position;

    let angle = TAU * rng.gen::<f64>();
    let radius = denormalize(rng.gen(), SEED_DROP_RADIUS_MIN, SEED_DROP_RADIUS_MAX);
    let (sin, cos) = angle.sin_cos();
    let position = base + DVec3::new(radius * cos, SEED_DROP_HEIGHT, radius * sin);

    let seed = world_setup::spawn_seed(world, sets, bridge, position);
    if let Ok(mut body) = world.get::<&mut PhysicsBody>(seed) {
        let launch = DVec3::new(cos, 0.0, sin) * tuning.seed_launch_acceleration;
        physics::add_acceleration(&mut body, launch);
    }
    events.push(SimEvent::SeedDropped { position });
    debug!("tree {parent:?} dropped seed {seed:?}; next drop in {:.1}", spawner.wait);
}

/// Physics, then ageing. A seed past its lifetime is queued for removal.
pub fn update(
    world: &mut World,
    sets: &mut Registry,
    bridge: &mut dyn SceneBridge,
    events: &mut Vec<SimEvent>,
    entity: Entity,
    dt: f64,
    tuning: &Tuning,
) {
    physics::step(world, bridge, entity, dt, tuning);

    let mut seed = world
        .get::<&mut Seed>(entity)
        .unwrap_or_else(|_| lifecycle_violation(entity, "seed"));
    seed.age += dt;
    if seed.age > tuning.seed_max_age_secs && sets.queue_removal(entity) {
        events.push(SimEvent::SeedExpired);
        debug!("seed {entity:?} expired");
    }
}
