//! Runtime tuning: every numeric rule of the simulation in one serde struct.
//!
//! Defaults come from [`crate::constants`]. A JSON file may override any
//! subset of fields.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::constants::*;

/// Failure loading a tuning file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read tuning file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid tuning JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid tuning value: {0}")]
    Invalid(&'static str),
}

/// Tunable simulation parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // Physics
    pub gravity: f64,
    pub drag_coefficient: f64,
    pub collision_restitution: f64,

    // Trees
    pub tree_growth_rate: f64,
    pub tree_fall_acceleration: f64,
    pub tree_fall_damping: f64,
    pub tree_contact_distance_sq: f64,

    // Seeds
    pub seed_max_age_secs: f64,
    pub seed_initial_wait: f64,
    pub seed_wait_min: f64,
    pub seed_wait_max: f64,
    pub max_seed_ratio: f64,
    pub seed_launch_acceleration: f64,

    // Tanks
    pub tank_turn_rate: f64,
    pub tank_speed_change_rate: f64,
    pub tank_brake_factor: f64,

    // Enemy AI
    pub enemy_speed: f64,
    pub enemy_stuck_timeout_secs: f64,

    // World
    pub day_length_secs: f64,
    pub tree_density: f64,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            gravity: GRAVITY,
            drag_coefficient: DRAG_COEFFICIENT,
            collision_restitution: COLLISION_RESTITUTION,
            tree_growth_rate: TREE_GROWTH_RATE,
            tree_fall_acceleration: TREE_FALL_ACCELERATION,
            tree_fall_damping: TREE_FALL_DAMPING,
            tree_contact_distance_sq: TREE_CONTACT_DISTANCE_SQ,
            seed_max_age_secs: SEED_MAX_AGE_SECS,
            seed_initial_wait: SEED_INITIAL_WAIT,
            seed_wait_min: SEED_WAIT_MIN,
            seed_wait_max: SEED_WAIT_MAX,
            max_seed_ratio: MAX_SEED_RATIO,
            seed_launch_acceleration: SEED_LAUNCH_ACCELERATION,
            tank_turn_rate: TANK_TURN_RATE,
            tank_speed_change_rate: TANK_SPEED_CHANGE_RATE,
            tank_brake_factor: TANK_BRAKE_FACTOR,
            enemy_speed: ENEMY_SPEED,
            enemy_stuck_timeout_secs: ENEMY_STUCK_TIMEOUT_SECS,
            day_length_secs: DAY_LENGTH_SECS,
            tree_density: TREE_DENSITY,
        }
    }
}

impl Tuning {
    /// Parse a (possibly partial) JSON object of overrides.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Load overrides from a JSON file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let json = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json_str(&json)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.seed_wait_min > self.seed_wait_max {
            return Err(ConfigError::Invalid("seed_wait_min exceeds seed_wait_max"));
        }
        if self.day_length_secs <= 0.0 {
            return Err(ConfigError::Invalid("day_length_secs must be positive"));
        }
        if !(0.0..=1.0).contains(&self.tree_density) {
            return Err(ConfigError::Invalid("tree_density must be within [0, 1]"));
        }
        if !(0.0..=1.0).contains(&self.collision_restitution) {
            return Err(ConfigError::Invalid(
                "collision_restitution must be within [0, 1]",
            ));
        }
        Ok(())
    }
}
