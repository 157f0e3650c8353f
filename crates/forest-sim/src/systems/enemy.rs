//! Enemy tank AI system: feeds world state into the pursuit state machine
//! and applies its decisions.

use hecs::{Entity, World};
use log::debug;
use rand::Rng;

use forest_ai::fsm::{evaluate, Drive, EnemyBrain, EnemyContext, EnemyState, TreeSighting};
use forest_ai::look::update_look;
use forest_core::components::Tree;
use forest_core::config::Tuning;
use forest_core::constants::ENEMY_AIM_HOLD_SECS;
use forest_core::types::Transform;

use super::{lifecycle_violation, tank};
use crate::bridge::SceneBridge;
use crate::registry::Registry;

/// Brain component stored on enemy tanks.
pub type Brain = EnemyBrain<Entity>;

/// Run one enemy's AI for this tick. Physics has already been stepped.
pub fn think<R: Rng + ?Sized>(
    world: &mut World,
    sets: &Registry,
    bridge: &mut dyn SceneBridge,
    rng: &mut R,
    entity: Entity,
    dt: f64,
    tuning: &Tuning,
) {
    let trees = sightings(world, sets);
    let claimed: Vec<Entity> = sets
        .enemies
        .iter()
        .filter_map(|e| world.get::<&Brain>(e).ok().and_then(|b| b.state.target()))
        .collect();

    let (position, heading) = {
        let transform = world
            .get::<&Transform>(entity)
            .unwrap_or_else(|_| lifecycle_violation(entity, "transform"));
        (transform.position, transform.heading())
    };
    let mut brain = *world
        .get::<&Brain>(entity)
        .unwrap_or_else(|_| lifecycle_violation(entity, "enemy brain"));

    brain.age += dt;
    if let Some(target) = update_look(&mut brain.look, heading, dt, rng) {
        tank::look(world, entity, target, dt, tuning);
    }

    let ctx = EnemyContext {
        position,
        age: brain.age,
        dt,
        trees: &trees,
        claimed: &claimed,
        speed: tuning.enemy_speed,
        stuck_timeout_secs: tuning.enemy_stuck_timeout_secs,
    };
    let previous = brain.state;
    let update = evaluate(previous, &ctx, rng);
    log_transition(entity, &previous, &update.state, update.flipped);

    brain.state = update.state;
    if let Some(aim) = update.aim {
        brain.look.hold(aim, ENEMY_AIM_HOLD_SECS);
    }
    if let Ok(mut stored) = world.get::<&mut Brain>(entity) {
        *stored = brain;
    }

    match update.drive {
        Drive::Steer { heading, speed } => tank::steer(world, bridge, entity, heading, speed, dt, tuning),
        Drive::Stop => tank::stop(world, entity, tuning),
        Drive::Hold => {}
    }
}

/// Every tree as the AI sees it, in world order.
fn sightings(world: &World, sets: &Registry) -> Vec<TreeSighting<Entity>> {
    sets.trees
        .iter()
        .filter_map(|id| {
            let tree = world.get::<&Tree>(id).ok()?;
            let transform = world.get::<&Transform>(id).ok()?;
            Some(TreeSighting {
                id,
                position: transform.position,
                upright: tree.phase.is_upright(),
            })
        })
        .collect()
}

fn log_transition(entity: Entity, from: &EnemyState<Entity>, to: &EnemyState<Entity>, flipped: bool) {
    match (from, to) {
        (EnemyState::Seeking, EnemyState::Pursuing(p)) => {
            debug!("enemy {entity:?} targets tree {:?}", p.target);
        }
        (EnemyState::Pursuing(_), EnemyState::Cooldown { remaining }) => {
            debug!("enemy {entity:?} lost its target, cooling down {remaining:.2}s");
        }
        _ if flipped => debug!("enemy {entity:?} stuck, approaching from the other side"),
        _ => {}
    }
}
