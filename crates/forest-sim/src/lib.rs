//! Simulation engine for the forest defense game.
//!
//! Owns the hecs ECS world, runs the per-tick systems against a scene
//! bridge, and produces `WorldSnapshot`s for the host.

pub mod bridge;
pub mod engine;
pub mod registry;
pub mod systems;
pub mod world_setup;

pub use bridge::{HeadlessScene, SceneBridge};
pub use engine::{SimConfig, SimulationEngine};
pub use forest_core as core;

#[cfg(test)]
mod tests;
