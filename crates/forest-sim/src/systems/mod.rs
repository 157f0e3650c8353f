//! Systems that operate on the simulation world each tick.
//!
//! Systems are free functions over the hecs world, the membership
//! [`Registry`](crate::registry::Registry) and the scene bridge. They hold no
//! state of their own apart from the small spawner and lighting records the
//! engine owns.

pub mod cleanup;
pub mod daynight;
pub mod enemy;
pub mod health;
pub mod physics;
pub mod seed;
pub mod snapshot;
pub mod tank;
pub mod tree;

use hecs::Entity;

/// An updating entity is missing a component its role requires. This only
/// happens when an entity is touched after disposal.
pub(crate) fn lifecycle_violation(entity: Entity, component: &str) -> ! {
    panic!("entity {entity:?} has no {component}; was it used after disposal?")
}
