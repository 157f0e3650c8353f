//! Simulation engine: the core of the game.
//!
//! `SimulationEngine` owns the hecs ECS world, the membership sets and the
//! scene bridge. It applies player commands, runs every system in a fixed
//! order and produces `WorldSnapshot`s. It has no renderer dependency, which
//! keeps it deterministic and testable.

use std::collections::VecDeque;

use glam::{DVec2, DVec3};
use hecs::{Entity, World};
use log::{info, warn};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use forest_core::commands::PlayerCommand;
use forest_core::components::{Seed, Tree};
use forest_core::config::Tuning;
use forest_core::constants::{ARENA_SIZE, ENEMY_SPAWN_INSET, FREE_SPACE_DISTANCE};
use forest_core::events::SimEvent;
use forest_core::state::WorldSnapshot;
use forest_core::types::{SimTime, Transform};
use forest_terrain::Triangulation;

use crate::bridge::SceneBridge;
use crate::registry::Registry;
use crate::systems;
use crate::systems::daynight::DayNight;
use crate::systems::health::ForestHealth;
use crate::systems::seed::SeedSpawner;
use crate::world_setup;

/// Configuration for starting a new simulation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// RNG seed for determinism. Same seed = same simulation.
    pub seed: u64,
    /// Arena edge length.
    pub arena_size: f64,
    /// Enemies spawned by [`SimulationEngine::populate`].
    pub enemy_count: usize,
    /// Run the day-night cycle. When off, lighting keeps its initial values.
    pub day_night: bool,
    pub tuning: Tuning,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            arena_size: ARENA_SIZE,
            enemy_count: 1,
            day_night: false,
            tuning: Tuning::default(),
        }
    }
}

/// The simulation engine. Owns the ECS world and all sim state.
pub struct SimulationEngine<B: SceneBridge> {
    world: World,
    sets: Registry,
    bridge: B,
    rng: ChaCha8Rng,
    tuning: Tuning,
    arena_size: f64,
    enemy_count: usize,
    time: SimTime,
    command_queue: VecDeque<PlayerCommand>,
    events: Vec<SimEvent>,
    spawner: SeedSpawner,
    day_night: DayNight,
    forest: ForestHealth,
    triangulation: Triangulation,
}

impl<B: SceneBridge> SimulationEngine<B> {
    /// Create an engine with an empty world.
    pub fn new(config: SimConfig, bridge: B) -> Self {
        Self {
            world: World::new(),
            sets: Registry::default(),
            bridge,
            rng: ChaCha8Rng::seed_from_u64(config.seed),
            spawner: SeedSpawner::new(&config.tuning),
            tuning: config.tuning,
            arena_size: config.arena_size,
            enemy_count: config.enemy_count,
            time: SimTime::default(),
            command_queue: VecDeque::new(),
            events: Vec::new(),
            day_night: DayNight::new(config.day_night),
            forest: ForestHealth::default(),
            triangulation: Triangulation::default(),
        }
    }

    /// Create an engine and populate it with the standard starting world.
    pub fn with_forest(config: SimConfig, bridge: B) -> Self {
        let mut engine = Self::new(config, bridge);
        engine.populate();
        engine
    }

    /// Plant the starting forest, then spawn the player and enemies in free
    /// space between the trees. The number of trees planted becomes the
    /// desired tree count.
    pub fn populate(&mut self) {
        self.triangulation = world_setup::plant_forest(
            &mut self.world,
            &mut self.sets,
            &mut self.bridge,
            &mut self.rng,
            self.arena_size,
            self.tuning.tree_density,
        );
        self.forest.desired_trees = self.sets.live_trees.len() as u32;
        world_setup::spawn_tanks(
            &mut self.world,
            &mut self.sets,
            &mut self.bridge,
            &mut self.rng,
            &self.triangulation,
            self.arena_size,
            self.enemy_count,
            FREE_SPACE_DISTANCE,
            ENEMY_SPAWN_INSET,
        );
        self.forest.health =
            systems::health::forest_health(self.sets.live_trees.len(), self.forest.desired_trees);
        info!(
            "world ready: {} trees, {} enemies, arena {}",
            self.forest.desired_trees,
            self.sets.enemies.len(),
            self.arena_size
        );
    }

    /// Queue a player command for processing at the next tick boundary.
    pub fn queue_command(&mut self, command: PlayerCommand) {
        self.command_queue.push_back(command);
    }

    /// Apply queued commands, advance the world by `dt` and return the
    /// resulting snapshot. Events raised since the last snapshot are drained
    /// into it.
    pub fn tick(&mut self, dt: f64) -> WorldSnapshot {
        if dt > 0.0 {
            self.process_commands(dt);
        }
        self.update(dt);
        let events = std::mem::take(&mut self.events);
        self.build_snapshot(events)
    }

    /// Advance the world by `dt` seconds. A non-positive (or NaN) `dt` does
    /// nothing.
    ///
    /// Order: dispose queued removals, update every entity in the update
    /// set as it stood at the start of the pass, tick the seed spawner, the
    /// day-night cycle and forest health.
    pub fn update(&mut self, dt: f64) {
        if dt.is_nan() || dt <= 0.0 {
            return;
        }

        systems::cleanup::run(&mut self.world, &mut self.sets, &mut self.bridge);

        for entity in self.sets.updating.snapshot() {
            assert!(
                self.world.contains(entity),
                "entity {entity:?} is in the update set after disposal"
            );
            self.update_entity(entity, dt);
        }

        systems::seed::run(
            &mut self.world,
            &mut self.sets,
            &mut self.bridge,
            &mut self.rng,
            &mut self.spawner,
            &mut self.events,
            dt,
            &self.tuning,
        );
        self.day_night.advance(dt, self.tuning.day_length_secs);
        self.time.advance(dt);
        self.forest
            .update(self.sets.live_trees.len(), self.time.elapsed_secs, &mut self.events);
    }

    /// Snapshot of the current state without draining pending events.
    pub fn snapshot(&self) -> WorldSnapshot {
        self.build_snapshot(self.events.clone())
    }

    fn build_snapshot(&self, events: Vec<SimEvent>) -> WorldSnapshot {
        systems::snapshot::build_snapshot(
            &self.world,
            &self.sets,
            self.time,
            self.day_night.view(),
            self.forest.view(self.sets.live_trees.len()),
            events,
        )
    }

    pub fn time(&self) -> SimTime {
        self.time
    }

    /// Get a read-only reference to the ECS world.
    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn registry(&self) -> &Registry {
        &self.sets
    }

    pub fn bridge(&self) -> &B {
        &self.bridge
    }

    pub fn player(&self) -> Option<Entity> {
        self.sets.player
    }

    /// `live / desired` trees, in `[0, 1]`.
    pub fn forest_health(&self) -> f64 {
        self.forest.health
    }

    pub fn is_game_over(&self) -> bool {
        self.forest.game_over
    }

    pub fn day_night(&self) -> &DayNight {
        &self.day_night
    }

    pub fn seed_spawner(&self) -> &SeedSpawner {
        &self.spawner
    }

    /// Override the desired tree count. `populate` sets it from the layout.
    pub fn set_desired_trees(&mut self, desired: u32) {
        self.forest.desired_trees = desired;
        self.forest.health = systems::health::forest_health(self.sets.live_trees.len(), desired);
    }

    /// Override the seed spawner countdown.
    pub fn set_seed_wait(&mut self, wait: f64) {
        self.spawner.wait = wait;
    }

    pub fn spawn_tree(&mut self, position: DVec3, tree: Tree) -> Entity {
        world_setup::spawn_tree(&mut self.world, &mut self.sets, &mut self.bridge, position, tree)
    }

    pub fn spawn_seed(&mut self, position: DVec3) -> Entity {
        world_setup::spawn_seed(&mut self.world, &mut self.sets, &mut self.bridge, position)
    }

    pub fn spawn_player(&mut self, position: DVec3, heading: f64) -> Entity {
        world_setup::spawn_player(&mut self.world, &mut self.sets, &mut self.bridge, position, heading)
    }

    pub fn spawn_enemy(&mut self, position: DVec3, heading: f64) -> Entity {
        world_setup::spawn_enemy(&mut self.world, &mut self.sets, &mut self.bridge, position, heading)
    }

    /// Rebuild the free-space triangulation from the current tree positions.
    pub fn triangulate(&mut self) {
        let points: Vec<_> = self
            .sets
            .trees
            .iter()
            .filter_map(|t| self.world.get::<&Transform>(t).ok())
            .map(|transform| DVec2::new(transform.position.x, transform.position.z))
            .collect();
        self.triangulation = Triangulation::from_points(&points);
    }

    /// Move a mobile entity into the roomiest free gap between trees.
    pub fn move_to_free_space(&mut self, entity: Entity, min_dist: f64) -> bool {
        world_setup::move_to_free_space(
            &mut self.world,
            &self.sets,
            &mut self.bridge,
            &self.triangulation,
            entity,
            min_dist,
        )
    }

    /// Process all queued commands.
    fn process_commands(&mut self, dt: f64) {
        while let Some(command) = self.command_queue.pop_front() {
            self.handle_command(command, dt);
        }
    }

    /// Handle a single player command.
    fn handle_command(&mut self, command: PlayerCommand, dt: f64) {
        let Some(player) = self.sets.player else {
            warn!("dropping {command:?}: no player tank");
            return;
        };
        match command {
            PlayerCommand::Steer { heading, speed } => systems::tank::steer(
                &mut self.world,
                &mut self.bridge,
                player,
                heading,
                speed,
                dt,
                &self.tuning,
            ),
            PlayerCommand::Stop => systems::tank::stop(&mut self.world, player, &self.tuning),
            PlayerCommand::Look { heading } => {
                systems::tank::look(&mut self.world, player, heading, dt, &self.tuning)
            }
            PlayerCommand::Plant => {
                systems::tank::plant(
                    &mut self.world,
                    &mut self.sets,
                    &mut self.bridge,
                    &mut self.events,
                    player,
                );
            }
        }
    }

    /// Dispatch one entity's update by the components it carries.
    fn update_entity(&mut self, entity: Entity, dt: f64) {
        let (is_tree, is_seed, is_enemy) = match self.world.entity(entity) {
            Ok(e) => (
                e.has::<Tree>(),
                e.has::<Seed>(),
                e.has::<systems::enemy::Brain>(),
            ),
            Err(_) => return,
        };

        if is_tree {
            systems::tree::update(
                &mut self.world,
                &mut self.sets,
                &mut self.bridge,
                entity,
                dt,
                &self.tuning,
            );
        } else if is_seed {
            systems::seed::update(
                &mut self.world,
                &mut self.sets,
                &mut self.bridge,
                &mut self.events,
                entity,
                dt,
                &self.tuning,
            );
        } else {
            let contacts = systems::tank::update(
                &mut self.world,
                &mut self.sets,
                &mut self.bridge,
                &mut self.events,
                entity,
                dt,
                &self.tuning,
            );
            if self.sets.player == Some(entity) {
                systems::tank::collect_seeds(
                    &mut self.world,
                    &mut self.sets,
                    &mut self.events,
                    entity,
                    &contacts,
                );
            }
            if is_enemy {
                systems::enemy::think(
                    &mut self.world,
                    &self.sets,
                    &mut self.bridge,
                    &mut self.rng,
                    entity,
                    dt,
                    &self.tuning,
                );
            }
        }
    }
}
