//! Enemy pursuit finite state machine.
//!
//! An enemy seeks the nearest unclaimed upright tree, drives at it until the
//! tree is tipped, waits out a short cooldown, and seeks again. Progress is
//! checked against a distance checkpoint; when it stalls the enemy flips to
//! approaching from the far side.

use std::f64::consts::PI;

use glam::DVec3;
use rand::Rng;

use forest_core::constants::*;
use forest_core::math::heading_of;

use crate::look::LookAround;

/// Pursuit bookkeeping for a claimed target.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pursuit<Id> {
    pub target: Id,
    /// Distance to the target when progress was last observed.
    pub checkpoint: f64,
    /// Brain age at the last checkpoint.
    pub checkpoint_time: f64,
    /// Time spent without progress in the current stuck episode.
    pub stuck_secs: f64,
    /// Approach from the opposite side.
    pub away: bool,
    /// `away` already flipped in the current stuck episode.
    pub flipped: bool,
}

/// Pursuit state of one enemy.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EnemyState<Id> {
    /// No target; scanning for one.
    Seeking,
    /// Driving toward a claimed tree.
    Pursuing(Pursuit<Id>),
    /// Waiting after a target was tipped.
    Cooldown { remaining: f64 },
}

impl<Id> Default for EnemyState<Id> {
    fn default() -> Self {
        EnemyState::Seeking
    }
}

impl<Id: Copy> EnemyState<Id> {
    /// The tree this enemy has claimed, if any.
    pub fn target(&self) -> Option<Id> {
        match self {
            EnemyState::Pursuing(p) => Some(p.target),
            _ => None,
        }
    }
}

/// Everything an enemy remembers between ticks.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EnemyBrain<Id> {
    pub state: EnemyState<Id>,
    pub look: LookAround,
    /// Seconds since spawn.
    pub age: f64,
}

impl<Id> Default for EnemyBrain<Id> {
    fn default() -> Self {
        Self {
            state: EnemyState::Seeking,
            look: LookAround::default(),
            age: 0.0,
        }
    }
}

/// A tree as seen by the AI.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TreeSighting<Id> {
    pub id: Id,
    pub position: DVec3,
    /// Still standing (angle 0).
    pub upright: bool,
}

/// Input to the FSM for a single enemy.
pub struct EnemyContext<'a, Id> {
    pub position: DVec3,
    pub age: f64,
    pub dt: f64,
    /// Every tree in the world, in world iteration order.
    pub trees: &'a [TreeSighting<Id>],
    /// Trees currently targeted by any enemy.
    pub claimed: &'a [Id],
    pub speed: f64,
    pub stuck_timeout_secs: f64,
}

/// What the enemy does with its tracks this tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Drive {
    /// Steer toward a world heading at a desired speed.
    Steer { heading: f64, speed: f64 },
    /// Brake once.
    Stop,
    /// Neither steer nor brake.
    Hold,
}

/// Output from the FSM.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EnemyUpdate<Id> {
    pub state: EnemyState<Id>,
    pub drive: Drive,
    /// Turret bearing to hold briefly, overriding the idle look-around.
    pub aim: Option<f64>,
    /// Whether the approach side flipped this tick.
    pub flipped: bool,
}

impl<Id> EnemyUpdate<Id> {
    fn hold(state: EnemyState<Id>) -> Self {
        Self {
            state,
            drive: Drive::Hold,
            aim: None,
            flipped: false,
        }
    }
}

/// Evaluate the FSM for one enemy.
pub fn evaluate<Id, R>(state: EnemyState<Id>, ctx: &EnemyContext<'_, Id>, rng: &mut R) -> EnemyUpdate<Id>
where
    Id: Copy + PartialEq,
    R: Rng + ?Sized,
{
    match state {
        EnemyState::Cooldown { remaining } => {
            let remaining = (remaining - ctx.dt).max(0.0);
            if remaining == 0.0 {
                EnemyUpdate::hold(EnemyState::Seeking)
            } else {
                EnemyUpdate::hold(EnemyState::Cooldown { remaining })
            }
        }
        EnemyState::Seeking => EnemyUpdate::hold(acquire_target(ctx)),
        EnemyState::Pursuing(pursuit) => pursue(pursuit, ctx, rng),
    }
}

/// Pick the nearest upright tree that no enemy has claimed.
///
/// The distance comparison runs before the claim check, so a claimed tree
/// closer than every unclaimed one is skipped without lowering the bar; the
/// outcome depends on iteration order when enemies compete.
pub fn acquire_target<Id: Copy + PartialEq>(ctx: &EnemyContext<'_, Id>) -> EnemyState<Id> {
    let mut closest = f64::INFINITY;
    let mut state = EnemyState::Seeking;
    for tree in ctx.trees {
        if !tree.upright {
            continue;
        }
        let dist = (tree.position - ctx.position).length();
        if dist < closest {
            if ctx.claimed.contains(&tree.id) {
                continue;
            }
            closest = dist;
            state = EnemyState::Pursuing(Pursuit {
                target: tree.id,
                checkpoint: dist,
                checkpoint_time: ctx.age,
                stuck_secs: 0.0,
                away: false,
                flipped: false,
            });
        }
    }
    state
}

fn pursue<Id, R>(mut pursuit: Pursuit<Id>, ctx: &EnemyContext<'_, Id>, rng: &mut R) -> EnemyUpdate<Id>
where
    Id: Copy + PartialEq,
    R: Rng + ?Sized,
{
    let target = ctx
        .trees
        .iter()
        .find(|t| t.id == pursuit.target)
        .filter(|t| t.upright);

    let Some(target) = target else {
        // Tipped (by anyone) or gone.
        let remaining = rng.gen::<f64>() * ENEMY_COOLDOWN_JITTER + ENEMY_COOLDOWN_BASE;
        return EnemyUpdate {
            state: EnemyState::Cooldown { remaining },
            drive: Drive::Stop,
            aim: None,
            flipped: false,
        };
    };

    let delta = target.position - ctx.position;
    let dist = delta.length();
    let mut flipped = false;

    if (pursuit.checkpoint - dist).abs() > ENEMY_PROGRESS_EPSILON {
        pursuit.checkpoint = dist;
        pursuit.checkpoint_time = ctx.age;
        pursuit.stuck_secs = 0.0;
        pursuit.flipped = false;
        if dist > rng.gen::<f64>() * ENEMY_AWAY_RESET_JITTER + ENEMY_AWAY_RESET_BASE {
            pursuit.away = false;
        }
    } else {
        pursuit.stuck_secs += ctx.dt;
        if !pursuit.flipped && pursuit.stuck_secs > ctx.stuck_timeout_secs {
            pursuit.away = !pursuit.away;
            pursuit.flipped = true;
            flipped = true;
        }
    }

    let bearing = heading_of(delta) + if pursuit.away { PI } else { 0.0 };
    let aim = (dist > ENEMY_AIM_DISTANCE).then_some(bearing);

    EnemyUpdate {
        state: EnemyState::Pursuing(pursuit),
        drive: Drive::Steer {
            heading: bearing,
            speed: ctx.speed,
        },
        aim,
        flipped,
    }
}
