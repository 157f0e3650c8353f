//! Core types and definitions for the forest simulation.
//!
//! This crate defines the vocabulary shared across all other crates:
//! vector/angle math, components, commands, snapshots, events, constants
//! and tuning. It has no dependency on an ECS or a random source.

pub mod commands;
pub mod components;
pub mod config;
pub mod constants;
pub mod enums;
pub mod events;
pub mod math;
pub mod state;
pub mod types;
