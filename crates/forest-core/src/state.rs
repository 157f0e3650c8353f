//! World snapshot: the complete visible state handed to the host after each tick.

use glam::DVec3;
use serde::{Deserialize, Serialize};

use crate::enums::TreePhase;
use crate::events::SimEvent;
use crate::types::SimTime;

/// Complete simulation state produced after each tick.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WorldSnapshot {
    pub time: SimTime,
    pub lighting: LightingView,
    pub forest: ForestView,
    pub player: Option<TankView>,
    pub enemies: Vec<TankView>,
    pub trees: Vec<TreeView>,
    pub seeds: Vec<SeedView>,
    pub events: Vec<SimEvent>,
}

/// Outputs of the day-night cycle, consumed by the lighting collaborator.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct LightingView {
    /// Day phase angle in `[0, 2π)`; night when above π.
    pub daytime: f64,
    pub sun_intensity: f64,
    pub ambient_intensity: f64,
}

/// Forest health and scoring.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct ForestView {
    pub live_trees: u32,
    pub desired_trees: u32,
    /// `live / desired`, clamped to `[0, 1]`.
    pub health: f64,
    /// Palette blend for the renderer: 0 = dead, 1 = healthy.
    pub color_blend: f64,
    pub game_over: bool,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct TankView {
    pub position: DVec3,
    pub heading: f64,
    /// World heading of the turret.
    pub turret_heading: f64,
    pub speed: f64,
    /// Seeds carried (player only).
    pub seeds: u32,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct TreeView {
    pub position: DVec3,
    pub phase: TreePhase,
    pub angle: f64,
    pub dir: f64,
    pub size: f64,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct SeedView {
    pub position: DVec3,
    pub age: f64,
}
