//! Simulation constants and tuning defaults.

use std::f64::consts::PI;

// --- Physics ---

/// Gravitational acceleration (m/s²), applied without mass division.
pub const GRAVITY: f64 = 9.81;

/// Linear drag coefficient; drag force is `-DRAG_COEFFICIENT * velocity`.
pub const DRAG_COEFFICIENT: f64 = 10.0;

/// Velocity retained after each collision contact.
pub const COLLISION_RESTITUTION: f64 = 0.92;

/// Default body mass for mobile entities (tanks).
pub const DEFAULT_MASS: f64 = 62.0;

// --- Trees ---

/// Fully fallen tree angle.
pub const TREE_FALLEN_ANGLE: f64 = PI / 2.0;

/// Sapling growth per second (size units).
pub const TREE_GROWTH_RATE: f64 = 2.0;

/// Angular acceleration of a falling tree (rad/s²).
pub const TREE_FALL_ACCELERATION: f64 = 4.0;

/// Quadratic damping on the fall angular velocity.
pub const TREE_FALL_DAMPING: f64 = 0.3;

/// Tree trunk height.
pub const TREE_HEIGHT: f64 = 5.0;

/// Trunk diameter, used for intersection against tank bodies.
pub const TREE_TRUNK_DIAMETER: f64 = 0.6;

/// Squared ground distance within which a tank checks trunk contact.
pub const TREE_CONTACT_DISTANCE_SQ: f64 = 10.0;

// --- Seeds ---

/// Seed body mass.
pub const SEED_MASS: f64 = 8.0;

/// Seed cube edge length.
pub const SEED_SIZE: f64 = 0.2;

/// Age after which an uncollected seed decays (seconds).
pub const SEED_MAX_AGE_SECS: f64 = 60.0;

/// Initial spawn countdown.
pub const SEED_INITIAL_WAIT: f64 = 4.0;

/// Spawn countdown is reset uniformly into this range.
pub const SEED_WAIT_MIN: f64 = 40.0;
pub const SEED_WAIT_MAX: f64 = 60.0;

/// Maximum live seeds per live tree.
pub const MAX_SEED_RATIO: f64 = 0.33;

/// Seed drop height above the parent tree's base.
pub const SEED_DROP_HEIGHT: f64 = 2.0;

/// Seed drop radius range around the parent tree.
pub const SEED_DROP_RADIUS_MIN: f64 = 0.5;
pub const SEED_DROP_RADIUS_MAX: f64 = 1.0;

/// Outward launch acceleration given to a freshly dropped seed.
pub const SEED_LAUNCH_ACCELERATION: f64 = 100.0;

// --- Tanks ---

/// Body and turret turn rate (rad/s).
pub const TANK_TURN_RATE: f64 = 0.9;

/// Maximum change in commanded speed per second.
pub const TANK_SPEED_CHANGE_RATE: f64 = 60.0;

/// One-shot braking factor applied by `stop`.
pub const TANK_BRAKE_FACTOR: f64 = 20.0;

/// Turret may rotate at most this far from the body's forward axis.
pub const TURRET_ARC: f64 = PI / 2.0;

/// Tank body dimensions.
pub const TANK_WIDTH: f64 = 2.0;
pub const TANK_HEIGHT: f64 = 0.86;
pub const TANK_DEPTH: f64 = 3.7;

/// Spawn height of a tank body's center.
pub const TANK_SPAWN_HEIGHT: f64 = TANK_HEIGHT / 2.0 + 0.5;

/// Distance behind the tank at which a planted tree appears.
pub const PLANT_DISTANCE_BEHIND: f64 = 3.0;

/// Player driving speed used by the host's input mapping.
pub const PLAYER_SPEED: f64 = 10.0;

// --- Enemy AI ---

/// Pursuit driving speed.
pub const ENEMY_SPEED: f64 = 7.0;

/// Checkpoint distance change that counts as progress.
pub const ENEMY_PROGRESS_EPSILON: f64 = 1.0;

/// Time without progress before the approach side flips (seconds).
pub const ENEMY_STUCK_TIMEOUT_SECS: f64 = 4.0;

/// `away` is cleared once the target is farther than `base + rng * jitter`.
pub const ENEMY_AWAY_RESET_BASE: f64 = 6.0;
pub const ENEMY_AWAY_RESET_JITTER: f64 = 2.0;

/// Beyond this distance the turret tracks the pursuit bearing.
pub const ENEMY_AIM_DISTANCE: f64 = 6.0;

/// How long a pursuit aim is held.
pub const ENEMY_AIM_HOLD_SECS: f64 = 0.1;

/// Cooldown after a target tree is tipped: `base + rng * jitter`.
pub const ENEMY_COOLDOWN_BASE: f64 = 0.4;
pub const ENEMY_COOLDOWN_JITTER: f64 = 0.1;

/// Idle look-around offset range (± radians from body heading).
pub const LOOK_AROUND_ARC: f64 = PI / 4.0;

/// Idle look-around hold: `base + rng * jitter`.
pub const LOOK_AROUND_HOLD_BASE: f64 = 1.9;
pub const LOOK_AROUND_HOLD_JITTER: f64 = 0.2;

// --- World ---

/// Arena edge length.
pub const ARENA_SIZE: f64 = 48.0;

/// Day-night cycle length (seconds).
pub const DAY_LENGTH_SECS: f64 = 240.0;

/// Light intensities before the first day-night update.
pub const INITIAL_SUN_INTENSITY: f64 = 0.4;
pub const INITIAL_AMBIENT_INTENSITY: f64 = 0.6;

/// Tree grid layout.
pub const TREE_GRID_SPACING: f64 = 4.0;
pub const TREE_GRID_MARGIN: f64 = 0.7;
pub const TREE_GRID_BORDER: f64 = 12.0;

/// Probability that a tree grid cell holds a tree.
pub const TREE_DENSITY: f64 = 0.66;

/// Minimum clearance used when moving tanks into free space.
pub const FREE_SPACE_DISTANCE: f64 = 4.0;

/// Enemies spawn within `±(ARENA_SIZE / 2 - ENEMY_SPAWN_INSET)`.
pub const ENEMY_SPAWN_INSET: f64 = 10.0;
