//! Per-frame simulation tick
//!
//! Advances every ball by one unit time step: regime forces, explicit Euler
//! integration, then the cage wall bounce. Balls never interact.

use glam::Vec3;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::ball::{Ball, symmetric};
use super::collision::resolve_wall_bounce;
use super::state::CageState;
use crate::settings::PhysicsSettings;

/// Force regime, chosen fresh every tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Regime {
    /// Cage is spinning: random kicks, capped speed
    Agitated,
    /// Cage is idle: friction plus a constant downward pull
    #[default]
    Settling,
}

impl Regime {
    pub fn from_agitated(agitated: bool) -> Self {
        if agitated {
            Regime::Agitated
        } else {
            Regime::Settling
        }
    }

    pub fn is_agitated(&self) -> bool {
        *self == Regime::Agitated
    }
}

/// Driver input for a single tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TickInput {
    /// Cage is spinning (draw in progress)
    pub agitated: bool,
    /// Desired number of balls; may be zero or negative
    pub target_count: i64,
}

/// Advance the cage by one tick
///
/// Reinitializes the ball set first if the target count changed, so the new
/// set is what this tick moves.
pub fn tick<R: Rng>(state: &mut CageState<R>, input: &TickInput) {
    state.sync_target_count(input.target_count);

    let regime = Regime::from_agitated(input.agitated);
    if regime != state.regime {
        log::debug!("Regime {:?} -> {:?} at tick {}", state.regime, regime, state.time_ticks);
        state.regime = regime;
    }

    advance(&mut state.balls, regime, &mut state.rng, &state.settings);
    state.time_ticks += 1;
}

/// Move every ball one step under `regime` and resolve wall bounces
pub fn advance<R: Rng + ?Sized>(
    balls: &mut [Ball],
    regime: Regime,
    rng: &mut R,
    settings: &PhysicsSettings,
) {
    for ball in balls.iter_mut() {
        ball.vel = apply_forces(ball.vel, regime, rng, settings);
        ball.pos += ball.vel;

        let limit = settings.containment_limit(ball.size);
        resolve_wall_bounce(&mut ball.pos, &mut ball.vel, limit, settings.restitution);
    }
}

/// New velocity after one tick of regime forces
pub fn apply_forces<R: Rng + ?Sized>(
    vel: Vec3,
    regime: Regime,
    rng: &mut R,
    settings: &PhysicsSettings,
) -> Vec3 {
    match regime {
        Regime::Agitated => {
            let half = settings.agitation / 2.0;
            let kick = Vec3::new(
                symmetric(rng, half),
                symmetric(rng, half),
                symmetric(rng, half),
            );
            clamp_speed(vel + kick, settings.speed_limit)
        }
        Regime::Settling => {
            let mut vel = vel * settings.friction;
            vel.y += settings.gravity;
            vel
        }
    }
}

/// Rescale `vel` to `limit` if it is faster, keeping direction
#[inline]
pub fn clamp_speed(vel: Vec3, limit: f32) -> Vec3 {
    let speed = vel.length();
    if speed > limit {
        vel * (limit / speed)
    } else {
        vel
    }
}
