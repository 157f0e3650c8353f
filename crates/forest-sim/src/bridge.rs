//! Boundary to the rendering and collision collaborator.
//!
//! The simulation never touches meshes or a physics engine directly. It asks
//! the bridge to create instances, move them with collision resolution, test
//! overlaps and play sounds. [`HeadlessScene`] is a minimal implementation
//! used by tests and the headless runner.

use std::collections::BTreeMap;

use glam::DVec3;

use forest_core::constants::{
    SEED_SIZE, TANK_DEPTH, TANK_HEIGHT, TANK_WIDTH, TREE_HEIGHT, TREE_TRUNK_DIAMETER,
};
use forest_core::enums::{Prototype, SoundCue};
use forest_core::types::{RenderHandle, Transform};

/// Something a moving instance bumped into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Contact {
    Ground,
    Wall,
    Instance(RenderHandle),
}

/// Result of a collision-resolved move.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MoveOutcome {
    /// Displacement actually applied after resolution.
    pub displacement: DVec3,
    /// Contacts touched during the move, in discovery order.
    pub contacts: Vec<Contact>,
}

impl MoveOutcome {
    pub fn collided(&self) -> bool {
        !self.contacts.is_empty()
    }
}

/// Rendering, collision and audio collaborator.
///
/// Calls on a disposed handle are a lifecycle bug; implementations may panic.
pub trait SceneBridge {
    /// Instance a prototype shape at `transform`.
    fn create_instance(&mut self, prototype: Prototype, transform: &Transform) -> RenderHandle;

    /// Push a new transform to the instance without collision resolution.
    fn sync_transform(&mut self, handle: RenderHandle, transform: &Transform);

    /// Move an instance by `displacement`, sliding against colliders.
    fn move_with_collisions(&mut self, handle: RenderHandle, displacement: DVec3) -> MoveOutcome;

    /// Whether the two instances' shapes overlap.
    fn intersects(&self, a: RenderHandle, b: RenderHandle) -> bool;

    fn dispose(&mut self, handle: RenderHandle);

    /// Fire-and-forget spatial sound attached to an instance.
    fn play_sound(&mut self, cue: SoundCue, at: RenderHandle);
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Shape {
    /// Collides and blocks movement.
    Body { radius: f64, half_height: f64 },
    /// Upright cylinder standing on its base. Never blocks movement.
    Trunk { radius: f64, height: f64 },
}

impl Shape {
    fn for_prototype(prototype: Prototype) -> Self {
        match prototype {
            Prototype::Tree => Shape::Trunk {
                radius: TREE_TRUNK_DIAMETER / 2.0,
                height: TREE_HEIGHT,
            },
            Prototype::Seed => Shape::Body {
                radius: SEED_SIZE / 2.0,
                half_height: SEED_SIZE / 2.0,
            },
            Prototype::PlayerTank | Prototype::EnemyTank => Shape::Body {
                radius: TANK_WIDTH.max(TANK_DEPTH) / 2.0,
                half_height: TANK_HEIGHT / 2.0,
            },
        }
    }
}

#[derive(Debug, Clone)]
struct Instance {
    shape: Shape,
    transform: Transform,
}

impl Instance {
    fn radius(&self) -> f64 {
        match self.shape {
            Shape::Body { radius, .. } => radius,
            Shape::Trunk { radius, .. } => radius * self.transform.scale,
        }
    }

    /// Vertical extent `(bottom, top)`.
    fn span(&self) -> (f64, f64) {
        let y = self.transform.position.y;
        match self.shape {
            Shape::Body { half_height, .. } => (y - half_height, y + half_height),
            Shape::Trunk { height, .. } => (y, y + height * self.transform.scale),
        }
    }

    fn overlaps(&self, other: &Instance) -> bool {
        let (a_bottom, a_top) = self.span();
        let (b_bottom, b_top) = other.span();
        if a_top <= b_bottom || b_top <= a_bottom {
            return false;
        }
        let reach = self.radius() + other.radius();
        horizontal(other.transform.position - self.transform.position).length_squared() < reach * reach
    }
}

fn horizontal(v: DVec3) -> DVec3 {
    DVec3::new(v.x, 0.0, v.z)
}

/// Headless scene: a ground plane at `y = 0`, four arena walls, round bodies
/// for tanks and seeds, and trunk cylinders for trees.
#[derive(Debug, Clone)]
pub struct HeadlessScene {
    half_extent: f64,
    instances: BTreeMap<RenderHandle, Instance>,
    next_handle: u32,
    sounds: Vec<(SoundCue, RenderHandle)>,
}

impl HeadlessScene {
    /// Scene for a square arena of edge `arena_size`, centered on the origin.
    pub fn new(arena_size: f64) -> Self {
        Self {
            half_extent: arena_size / 2.0,
            instances: BTreeMap::new(),
            next_handle: 0,
            sounds: Vec::new(),
        }
    }

    pub fn instance_count(&self) -> usize {
        self.instances.len()
    }

    pub fn contains(&self, handle: RenderHandle) -> bool {
        self.instances.contains_key(&handle)
    }

    pub fn transform(&self, handle: RenderHandle) -> Option<&Transform> {
        self.instances.get(&handle).map(|i| &i.transform)
    }

    /// Every sound played so far, in order.
    pub fn sounds(&self) -> &[(SoundCue, RenderHandle)] {
        &self.sounds
    }

    fn instance(&self, handle: RenderHandle) -> &Instance {
        self.instances
            .get(&handle)
            .unwrap_or_else(|| panic!("no scene instance for {handle:?}"))
    }
}

impl SceneBridge for HeadlessScene {
    fn create_instance(&mut self, prototype: Prototype, transform: &Transform) -> RenderHandle {
        let handle = RenderHandle(self.next_handle);
        self.next_handle += 1;
        self.instances.insert(
            handle,
            Instance {
                shape: Shape::for_prototype(prototype),
                transform: *transform,
            },
        );
        handle
    }

    fn sync_transform(&mut self, handle: RenderHandle, transform: &Transform) {
        match self.instances.get_mut(&handle) {
            Some(instance) => instance.transform = *transform,
            None => panic!("sync_transform on unknown instance {handle:?}"),
        }
    }

    fn move_with_collisions(&mut self, handle: RenderHandle, displacement: DVec3) -> MoveOutcome {
        let mover = self.instance(handle).clone();
        let Shape::Body { radius, half_height } = mover.shape else {
            // Trunks are static scenery.
            return MoveOutcome::default();
        };

        let start = mover.transform.position;
        let mut moved = mover.clone();
        moved.transform.position += displacement;
        let mut contacts = Vec::new();

        if moved.transform.position.y - half_height < 0.0 {
            moved.transform.position.y = half_height;
            contacts.push(Contact::Ground);
        }

        // An arena narrower than the body pins it to the centre line.
        let limit = (self.half_extent - radius).max(0.0);
        let clamped_x = moved.transform.position.x.clamp(-limit, limit);
        let clamped_z = moved.transform.position.z.clamp(-limit, limit);
        if clamped_x != moved.transform.position.x || clamped_z != moved.transform.position.z {
            moved.transform.position.x = clamped_x;
            moved.transform.position.z = clamped_z;
            contacts.push(Contact::Wall);
        }

        for (other_handle, other) in &self.instances {
            if *other_handle == handle || !matches!(other.shape, Shape::Body { .. }) {
                continue;
            }
            if !moved.overlaps(other) {
                continue;
            }
            let reach = moved.radius() + other.radius();
            let away = horizontal(moved.transform.position - other.transform.position);
            let push = if away.length_squared() > f64::EPSILON {
                away.normalize()
            } else {
                DVec3::X
            };
            let resolved = other.transform.position + push * reach;
            moved.transform.position.x = resolved.x;
            moved.transform.position.z = resolved.z;
            contacts.push(Contact::Instance(*other_handle));
        }

        let end = moved.transform.position;
        self.sync_transform(handle, &moved.transform);
        MoveOutcome {
            displacement: end - start,
            contacts,
        }
    }

    fn intersects(&self, a: RenderHandle, b: RenderHandle) -> bool {
        self.instance(a).overlaps(self.instance(b))
    }

    fn dispose(&mut self, handle: RenderHandle) {
        if self.instances.remove(&handle).is_none() {
            panic!("dispose on unknown instance {handle:?}");
        }
    }

    fn play_sound(&mut self, cue: SoundCue, at: RenderHandle) {
        self.sounds.push((cue, at));
    }
}
