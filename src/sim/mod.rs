//! Cage simulation module
//!
//! All ball physics lives here. This module must stay renderer-agnostic:
//! - Unit time step per tick
//! - Injected RNG only
//! - Stable iteration order (by ball id)
//! - No rendering or platform dependencies

pub mod ball;
pub mod clock;
pub mod collision;
pub mod snapshot;
pub mod state;
pub mod tick;

pub use ball::{Ball, BallColor, PALETTE, palette_color};
pub use clock::FrameClock;
pub use collision::{CollisionResult, cage_wall_collision, reflect_velocity, resolve_wall_bounce};
pub use snapshot::{BallView, CageSnapshot};
pub use state::{CageState, spawn_balls};
pub use tick::{Regime, TickInput, advance, apply_forces, clamp_speed, tick};
