//! Lucky Cage - lottery cage simulation for a classroom lucky draw
//!
//! Core modules:
//! - `sim`: Ball physics inside the spherical cage (forces, wall bounces, snapshots)
//! - `renderer`: GPU instance records built from snapshots
//! - `platform`: Loop cancellation and browser bindings
//! - `settings`: Data-driven physics tuning

pub mod error;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use error::CageError;
pub use settings::PhysicsSettings;
pub use sim::{CageSnapshot, CageState, Regime, TickInput, tick};

/// Simulation constants
pub mod consts {
    /// Nominal tick rate (one tick per display frame at 60 Hz)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum ticks run per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 4;

    /// Cage radius (pixels of the host view)
    pub const CAGE_RADIUS: f32 = 145.0;
    /// Hard cap on balls in the cage
    pub const MAX_BALLS: usize = 25;

    /// Initial positions are drawn from [-SPAWN_EXTENT, SPAWN_EXTENT] per axis
    pub const SPAWN_EXTENT: f32 = 50.0;
    /// Initial velocities are drawn from [-SPAWN_SPEED, SPAWN_SPEED] per axis
    pub const SPAWN_SPEED: f32 = 2.0;
    /// Ball size range
    pub const BALL_SIZE_MIN: f32 = 24.0;
    pub const BALL_SIZE_MAX: f32 = 32.0;

    /// Width of the per-axis random kick while spinning
    pub const AGITATION: f32 = 3.0;
    /// Speed cap while spinning
    pub const SPEED_LIMIT: f32 = 15.0;
    /// Per-tick velocity damping while settling
    pub const FRICTION: f32 = 0.98;
    /// Per-tick +y bias while settling (screen space, +y is down)
    pub const GRAVITY: f32 = 0.2;
    /// Fraction of velocity kept after a wall bounce
    pub const RESTITUTION: f32 = 0.8;

    /// Offset added to z for DOM stacking order
    pub const Z_INDEX_OFFSET: f32 = 500.0;
}
