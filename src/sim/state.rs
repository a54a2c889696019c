//! Cage state and ball set lifecycle
//!
//! The ball set is created on the first observed target count and replaced
//! wholesale whenever that count changes. Nothing carries over.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::ball::Ball;
use super::snapshot::CageSnapshot;
use super::tick::Regime;
use crate::settings::PhysicsSettings;

/// Complete simulator state
///
/// Generic over the random source so tests can inject their own; the
/// default is a seeded `Pcg32`.
#[derive(Debug, Clone)]
pub struct CageState<R: Rng = Pcg32> {
    /// Physics tuning
    pub(crate) settings: PhysicsSettings,
    /// Random source for spawning and agitation
    pub(crate) rng: R,
    /// Live balls (sorted by id)
    pub(crate) balls: Vec<Ball>,
    /// Last observed target count; None until the first observation
    target_count: Option<i64>,
    /// Regime applied on the most recent tick
    pub(crate) regime: Regime,
    /// Simulation tick counter
    pub(crate) time_ticks: u64,
}

impl CageState<Pcg32> {
    /// Create a cage with default settings and the given seed
    pub fn new(seed: u64) -> Self {
        Self::with_rng(PhysicsSettings::default(), Pcg32::seed_from_u64(seed))
    }

    /// Create a cage with custom settings and the given seed
    pub fn with_settings(settings: PhysicsSettings, seed: u64) -> Self {
        Self::with_rng(settings, Pcg32::seed_from_u64(seed))
    }
}

impl<R: Rng> CageState<R> {
    /// Create an empty cage driven by an arbitrary random source
    pub fn with_rng(settings: PhysicsSettings, rng: R) -> Self {
        Self {
            settings,
            rng,
            balls: Vec::new(),
            target_count: None,
            regime: Regime::Settling,
            time_ticks: 0,
        }
    }

    /// Replace the ball set with `min(target_count, max_balls)` fresh balls
    ///
    /// Zero or negative counts give an empty cage.
    pub fn initialize(&mut self, target_count: i64) -> &[Ball] {
        let n = self.settings.clamp_count(target_count);
        if n as i64 != target_count.max(0) {
            log::debug!("Requested {} balls, clamped to {}", target_count, n);
        }

        self.balls = spawn_balls(n, &mut self.rng, &self.settings);
        self.target_count = Some(target_count);
        log::info!("Cage initialized with {} balls", self.balls.len());
        &self.balls
    }

    /// Reinitialize only if the target count differs from the last one seen
    ///
    /// Returns true if the set was replaced.
    pub fn sync_target_count(&mut self, target_count: i64) -> bool {
        if self.target_count == Some(target_count) {
            return false;
        }
        self.initialize(target_count);
        true
    }

    /// Live balls, read-only
    pub fn balls(&self) -> &[Ball] {
        &self.balls
    }

    /// Owned copy of the current state for rendering
    pub fn snapshot(&self) -> CageSnapshot {
        CageSnapshot::capture(self.time_ticks, self.regime, &self.balls)
    }

    pub fn settings(&self) -> &PhysicsSettings {
        &self.settings
    }

    /// Last observed target count
    pub fn target_count(&self) -> Option<i64> {
        self.target_count
    }

    /// Regime applied on the most recent tick
    pub fn regime(&self) -> Regime {
        self.regime
    }

    /// Ticks advanced since creation
    pub fn time_ticks(&self) -> u64 {
        self.time_ticks
    }

    /// Total kinetic energy (unit mass)
    pub fn kinetic_energy(&self) -> f32 {
        self.balls.iter().map(Ball::kinetic_energy).sum()
    }
}

/// Spawn `count` balls with ids `0..count`
pub fn spawn_balls<R: Rng + ?Sized>(
    count: usize,
    rng: &mut R,
    settings: &PhysicsSettings,
) -> Vec<Ball> {
    (0..count as u32)
        .map(|id| Ball::spawn(id, rng, settings))
        .collect()
}
