//! ECS components for hecs entities.
//!
//! Components are plain data. Game logic lives in the simulation systems.

use glam::DVec3;
use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_MASS, SEED_MASS};
use crate::enums::TreePhase;

/// Mass, velocity and the acceleration accumulated for the current tick.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PhysicsBody {
    pub mass: f64,
    pub velocity: DVec3,
    /// Reset to zero after every integration step.
    pub acceleration: DVec3,
}

impl Default for PhysicsBody {
    fn default() -> Self {
        Self::with_mass(DEFAULT_MASS)
    }
}

impl PhysicsBody {
    pub fn with_mass(mass: f64) -> Self {
        Self {
            mass,
            velocity: DVec3::ZERO,
            acceleration: DVec3::ZERO,
        }
    }
}

/// Fall and growth state of a tree.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Tree {
    pub phase: TreePhase,
    /// 0 = upright, π/2 = fully fallen.
    pub angle: f64,
    pub angular_velocity: f64,
    /// Heading the tree falls toward.
    pub dir: f64,
    /// Growth, 0 for a fresh sapling and 1 when grown.
    /// A sapling tipped while growing keeps growing before it falls.
    pub size: f64,
}

impl Tree {
    pub fn grown() -> Self {
        Self {
            phase: TreePhase::Standing,
            angle: 0.0,
            angular_velocity: 0.0,
            dir: 0.0,
            size: 1.0,
        }
    }

    pub fn sapling() -> Self {
        Self {
            phase: TreePhase::Growing,
            size: 0.0,
            ..Self::grown()
        }
    }
}

/// A seed dropped by a live tree.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Seed {
    pub age: f64,
}

impl Seed {
    pub fn body() -> PhysicsBody {
        PhysicsBody::with_mass(SEED_MASS)
    }
}

/// Tank drive and turret state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Tank {
    /// Turret heading relative to the body, within the forward arc.
    pub turret: f64,
    /// Commanded forward acceleration after rate limiting.
    pub speed: f64,
    /// Whether the tank was steered since the last stop.
    pub moving: bool,
}

/// Planting stock held by the player tank.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeedStock {
    pub seeds: u32,
}
