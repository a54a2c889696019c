//! Ball entity and the festive palette

use glam::Vec3;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::settings::PhysicsSettings;

/// Three shades of one ball color, as 0xRRGGBB
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BallColor {
    pub light: u32,
    pub main: u32,
    pub dark: u32,
}

impl BallColor {
    pub const fn new(light: u32, main: u32, dark: u32) -> Self {
        Self { light, main, dark }
    }

    /// CSS hex string for a packed color, e.g. `#ef4444`
    pub fn css(rgb: u32) -> String {
        format!("#{:06x}", rgb & 0x00ff_ffff)
    }

    /// Linear 0-1 RGBA for a packed color (opaque)
    pub fn rgba(rgb: u32) -> [f32; 4] {
        let channel = |shift: u32| ((rgb >> shift) & 0xff) as f32 / 255.0;
        [channel(16), channel(8), channel(0), 1.0]
    }
}

/// Ball colors, assigned by `id % PALETTE.len()`
pub const PALETTE: [BallColor; 5] = [
    BallColor::new(0xfecaca, 0xef4444, 0x991b1b), // red
    BallColor::new(0xfef3c7, 0xf59e0b, 0x92400e), // amber
    BallColor::new(0xffedd5, 0xf97316, 0x9a3412), // orange
    BallColor::new(0xfef08a, 0xeab308, 0x854d0e), // yellow
    BallColor::new(0xfff1f2, 0xfb7185, 0xbe123c), // rose
];

/// Palette entry for a ball index
#[inline]
pub fn palette_color(id: u32) -> BallColor {
    PALETTE[id as usize % PALETTE.len()]
}

/// A ball in the cage
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ball {
    /// Index in the current set, stable across ticks
    pub id: u32,
    /// Position relative to the cage center
    pub pos: Vec3,
    pub vel: Vec3,
    /// Visual diameter; fixed at spawn
    pub size: f32,
    pub color: BallColor,
}

impl Ball {
    /// Spawn ball `id` with a random position, velocity and size
    pub fn spawn<R: Rng + ?Sized>(id: u32, rng: &mut R, settings: &PhysicsSettings) -> Self {
        let extent = settings.spawn_extent;
        let speed = settings.spawn_speed;
        let pos = Vec3::new(
            symmetric(rng, extent),
            symmetric(rng, extent),
            symmetric(rng, extent),
        );
        let vel = Vec3::new(
            symmetric(rng, speed),
            symmetric(rng, speed),
            symmetric(rng, speed),
        );
        let size = settings.size_min + rng.random::<f32>() * (settings.size_max - settings.size_min);

        Self {
            id,
            pos,
            vel,
            size,
            color: palette_color(id),
        }
    }

    /// Number painted on the ball (1-based)
    #[inline]
    pub fn label(&self) -> u32 {
        self.id + 1
    }

    #[inline]
    pub fn speed(&self) -> f32 {
        self.vel.length()
    }

    /// Kinetic energy with unit mass
    #[inline]
    pub fn kinetic_energy(&self) -> f32 {
        0.5 * self.vel.length_squared()
    }
}

/// Uniform sample in `[-half_width, half_width)`
#[inline]
pub(crate) fn symmetric<R: Rng + ?Sized>(rng: &mut R, half_width: f32) -> f32 {
    (rng.random::<f32>() - 0.5) * 2.0 * half_width
}
