//! Cleanup system: disposes entities queued for removal.

use hecs::World;
use log::debug;

use forest_core::types::RenderHandle;

use crate::bridge::SceneBridge;
use crate::registry::Registry;

/// Dispose every queued entity: drop it from all sets, release its scene
/// instance and despawn it. Runs at the start of a tick so nothing removed
/// here is touched by that tick's update pass.
pub fn run(world: &mut World, sets: &mut Registry, bridge: &mut dyn SceneBridge) {
    for entity in sets.removals.drain() {
        let handle = world.get::<&RenderHandle>(entity).ok().map(|h| *h);
        sets.detach(entity, handle);
        if let Some(handle) = handle {
            bridge.dispose(handle);
        }
        if world.despawn(entity).is_ok() {
            debug!("disposed {entity:?}");
        }
    }
}
