//! Enemy tank AI for the forest simulation.
//!
//! Implements the pursuit state machine (target selection, stuck detection,
//! cooldown) and the idle turret look-around. Pure functions over plain data
//! plus an injected random source; no ECS dependency.

pub mod fsm;
pub mod look;

pub use forest_core as core;
