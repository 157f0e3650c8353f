//! Tree growth and fall.

use glam::DVec3;
use hecs::{Entity, World};
use log::debug;

use forest_core::components::Tree;
use forest_core::config::Tuning;
use forest_core::constants::TREE_FALLEN_ANGLE;
use forest_core::enums::{SoundCue, TreePhase};
use forest_core::events::SimEvent;
use forest_core::math::{heading_of, move_towards_angle};
use forest_core::types::{RenderHandle, Transform};

use super::lifecycle_violation;
use crate::bridge::SceneBridge;
use crate::registry::Registry;

/// Push a tree along `dir`, a ground vector from the pusher to the trunk.
///
/// The fall direction always leans toward the push, less so the further the
/// tree has already fallen. Only the first push of an upright tree tips it.
/// Returns true if this push tipped the tree.
pub fn push(
    world: &mut World,
    sets: &mut Registry,
    bridge: &mut dyn SceneBridge,
    events: &mut Vec<SimEvent>,
    entity: Entity,
    dir: DVec3,
) -> bool {
    let (tree, transform, handle) = world
        .query_one_mut::<(&mut Tree, &Transform, &RenderHandle)>(entity)
        .unwrap_or_else(|_| lifecycle_violation(entity, "tree"));

    let weight = tree.angle.cos().powi(4);
    tree.dir = move_towards_angle(tree.dir, heading_of(dir), weight);

    if !tree.phase.is_upright() {
        return false;
    }
    tree.phase = TreePhase::Falling;
    let position = transform.position;
    let handle = *handle;

    sets.fall(entity);
    bridge.play_sound(SoundCue::TreeFall, handle);
    events.push(SimEvent::TreeFell { position });
    debug!("tree {entity:?} tipped at ({:.1}, {:.1})", position.x, position.z);
    true
}

/// Advance growth, then the fall, and sync the result to the scene.
pub fn update(
    world: &mut World,
    sets: &mut Registry,
    bridge: &mut dyn SceneBridge,
    entity: Entity,
    dt: f64,
    tuning: &Tuning,
) {
    let (tree, transform, handle) = world
        .query_one_mut::<(&mut Tree, &mut Transform, &RenderHandle)>(entity)
        .unwrap_or_else(|_| lifecycle_violation(entity, "tree"));

    if tree.size < 1.0 {
        tree.size += tuning.tree_growth_rate * dt;
        if tree.size >= 1.0 {
            tree.size = 1.0;
            if tree.phase == TreePhase::Growing {
                tree.phase = TreePhase::Standing;
                sets.updating.remove(entity);
            }
        }
        transform.scale = tree.size;
        bridge.sync_transform(*handle, transform);
        return;
    }

    if tree.phase != TreePhase::Falling {
        sets.updating.remove(entity);
        return;
    }

    tree.angular_velocity += tuning.tree_fall_acceleration * dt;
    let damping = (tuning.tree_fall_damping * tree.angular_velocity * tree.angular_velocity)
        .min(tree.angular_velocity.abs());
    tree.angular_velocity -= damping * dt;
    tree.angle += tree.angular_velocity * dt;
    if tree.angle >= TREE_FALLEN_ANGLE {
        tree.angle = TREE_FALLEN_ANGLE;
        tree.phase = TreePhase::Fallen;
        sets.updating.remove(entity);
    }

    transform.rotation = DVec3::new(tree.angle, tree.dir, 0.0);
    bridge.sync_transform(*handle, transform);
}
