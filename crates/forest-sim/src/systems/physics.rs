//! Rigid-body integration for mobile entities.

use glam::DVec3;
use hecs::{Entity, World};

use forest_core::components::PhysicsBody;
use forest_core::config::Tuning;
use forest_core::types::{RenderHandle, Transform};

use super::lifecycle_violation;
use crate::bridge::{Contact, SceneBridge};

/// Accumulate a force, divided by the body's mass.
pub fn add_force(body: &mut PhysicsBody, force: DVec3) {
    body.acceleration += force / body.mass;
}

/// Accumulate an acceleration, independent of mass.
pub fn add_acceleration(body: &mut PhysicsBody, acceleration: DVec3) {
    body.acceleration += acceleration;
}

/// Gravity and linear drag for this tick.
pub fn apply_environment(body: &mut PhysicsBody, tuning: &Tuning) {
    add_acceleration(body, DVec3::new(0.0, -tuning.gravity, 0.0));
    let drag = body.velocity * -tuning.drag_coefficient;
    add_force(body, drag);
}

/// Fold the accumulated acceleration into velocity, clear it, and return the
/// displacement for this tick.
pub fn integrate(body: &mut PhysicsBody, dt: f64) -> DVec3 {
    body.velocity += body.acceleration * dt;
    body.acceleration = DVec3::ZERO;
    body.velocity * dt
}

/// Collision response: lose some speed and stop any vertical motion.
pub fn on_collision(body: &mut PhysicsBody, tuning: &Tuning) {
    body.velocity *= tuning.collision_restitution;
    body.velocity.y = 0.0;
}

/// Full physics update for one mobile entity: environment forces,
/// integration, a collision-resolved move through the bridge and the
/// collision response. Returns the contacts of the move.
pub fn step(
    world: &mut World,
    bridge: &mut dyn SceneBridge,
    entity: Entity,
    dt: f64,
    tuning: &Tuning,
) -> Vec<Contact> {
    let (body, transform, handle) = world
        .query_one_mut::<(&mut PhysicsBody, &mut Transform, &RenderHandle)>(entity)
        .unwrap_or_else(|_| lifecycle_violation(entity, "physics body"));

    apply_environment(body, tuning);
    let displacement = integrate(body, dt);
    let outcome = bridge.move_with_collisions(*handle, displacement);
    transform.position += outcome.displacement;
    if outcome.collided() {
        on_collision(body, tuning);
    }
    outcome.contacts
}
