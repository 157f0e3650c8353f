//! Entity membership sets owned by the engine.
//!
//! Entities live in the hecs world; these sets record which roles an entity
//! currently plays (mobile, tree, live tree, updating, ...). Sets keep
//! insertion order so every pass over them is deterministic.

use std::collections::{HashMap, HashSet};

use hecs::Entity;

use forest_core::types::RenderHandle;

/// Insertion-ordered set of entities.
#[derive(Debug, Clone, Default)]
pub struct EntitySet {
    order: Vec<Entity>,
    members: HashSet<Entity>,
}

impl EntitySet {
    /// Returns false if already present.
    pub fn insert(&mut self, entity: Entity) -> bool {
        if !self.members.insert(entity) {
            return false;
        }
        self.order.push(entity);
        true
    }

    /// Returns false if absent.
    pub fn remove(&mut self, entity: Entity) -> bool {
        if !self.members.remove(&entity) {
            return false;
        }
        self.order.retain(|e| *e != entity);
        true
    }

    pub fn contains(&self, entity: Entity) -> bool {
        self.members.contains(&entity)
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<Entity> {
        self.order.get(index).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = Entity> + '_ {
        self.order.iter().copied()
    }

    /// Copy of the current members, for iterating while the set changes.
    pub fn snapshot(&self) -> Vec<Entity> {
        self.order.clone()
    }

    /// Remove and return every member, in order.
    pub fn drain(&mut self) -> Vec<Entity> {
        self.members.clear();
        std::mem::take(&mut self.order)
    }
}

/// All membership sets of the world, plus the render-handle index.
#[derive(Debug, Default)]
pub struct Registry {
    /// Physics-driven entities: tanks and seeds.
    pub mobs: EntitySet,
    /// Every tree, upright or fallen.
    pub trees: EntitySet,
    /// Trees still standing; drives forest health and seed drops.
    pub live_trees: EntitySet,
    /// Entities updated each tick.
    pub updating: EntitySet,
    /// Entities queued for disposal at the next tick boundary.
    pub removals: EntitySet,
    pub enemies: EntitySet,
    pub seeds: EntitySet,
    pub player: Option<Entity>,
    handles: HashMap<RenderHandle, Entity>,
}

impl Registry {
    pub fn bind_handle(&mut self, handle: RenderHandle, entity: Entity) {
        self.handles.insert(handle, entity);
    }

    /// Entity behind a render handle, if it is still registered.
    pub fn entity_for(&self, handle: RenderHandle) -> Option<Entity> {
        self.handles.get(&handle).copied()
    }

    pub fn add_mob(&mut self, entity: Entity) {
        self.mobs.insert(entity);
        self.updating.insert(entity);
    }

    pub fn add_enemy(&mut self, entity: Entity) {
        self.enemies.insert(entity);
        self.add_mob(entity);
    }

    pub fn add_seed(&mut self, entity: Entity) {
        self.seeds.insert(entity);
        self.add_mob(entity);
    }

    pub fn add_tree(&mut self, entity: Entity) {
        self.trees.insert(entity);
        self.live_trees.insert(entity);
    }

    /// A tree started falling: it is no longer live and needs updates.
    pub fn fall(&mut self, entity: Entity) {
        if self.trees.contains(entity) {
            self.live_trees.remove(entity);
            self.updating.insert(entity);
        }
    }

    /// Queue an entity for disposal. Returns false if it was already queued.
    pub fn queue_removal(&mut self, entity: Entity) -> bool {
        self.removals.insert(entity)
    }

    pub fn is_queued_for_removal(&self, entity: Entity) -> bool {
        self.removals.contains(entity)
    }

    /// Drop an entity from every set and the handle index.
    pub fn detach(&mut self, entity: Entity, handle: Option<RenderHandle>) {
        self.mobs.remove(entity);
        self.trees.remove(entity);
        self.live_trees.remove(entity);
        self.updating.remove(entity);
        self.enemies.remove(entity);
        self.seeds.remove(entity);
        if self.player == Some(entity) {
            self.player = None;
        }
        if let Some(handle) = handle {
            self.handles.remove(&handle);
        }
    }
}
