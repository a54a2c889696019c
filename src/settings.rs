//! Physics tuning
//!
//! Defaults reproduce the stock cage. Persisted as JSON (a file natively,
//! LocalStorage in the browser).

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::{CageError, Result};

/// Tunable physics parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicsSettings {
    // === Cage ===
    /// Radius of the spherical cage
    pub cage_radius: f32,
    /// Maximum number of balls, whatever the requested count
    pub max_balls: usize,

    // === Spawning ===
    /// Half-width of the spawn cube
    pub spawn_extent: f32,
    /// Half-width of the initial per-axis velocity range
    pub spawn_speed: f32,
    /// Smallest ball size
    pub size_min: f32,
    /// Largest ball size
    pub size_max: f32,

    // === Spinning ===
    /// Width of the uniform per-axis kick
    pub agitation: f32,
    /// Speed cap
    pub speed_limit: f32,

    // === Settling ===
    /// Per-tick velocity multiplier
    pub friction: f32,
    /// Per-tick +y bias
    pub gravity: f32,

    // === Walls ===
    /// Fraction of velocity kept after a bounce (0.0 - 1.0)
    pub restitution: f32,
}

impl Default for PhysicsSettings {
    fn default() -> Self {
        Self {
            cage_radius: CAGE_RADIUS,
            max_balls: MAX_BALLS,

            spawn_extent: SPAWN_EXTENT,
            spawn_speed: SPAWN_SPEED,
            size_min: BALL_SIZE_MIN,
            size_max: BALL_SIZE_MAX,

            agitation: AGITATION,
            speed_limit: SPEED_LIMIT,

            friction: FRICTION,
            gravity: GRAVITY,

            restitution: RESTITUTION,
        }
    }
}

impl PhysicsSettings {
    /// Containment limit for a ball center: the cage radius minus half the ball size
    #[inline]
    pub fn containment_limit(&self, size: f32) -> f32 {
        self.cage_radius - size / 2.0
    }

    /// Clamp a requested ball count into `[0, max_balls]`
    pub fn clamp_count(&self, requested: i64) -> usize {
        if requested <= 0 {
            0
        } else {
            usize::try_from(requested).map_or(self.max_balls, |n| n.min(self.max_balls))
        }
    }

    /// Check every value is usable by the simulation
    pub fn validate(&self) -> Result<()> {
        let finite = [
            ("cage_radius", self.cage_radius),
            ("spawn_extent", self.spawn_extent),
            ("spawn_speed", self.spawn_speed),
            ("size_min", self.size_min),
            ("size_max", self.size_max),
            ("agitation", self.agitation),
            ("speed_limit", self.speed_limit),
            ("friction", self.friction),
            ("gravity", self.gravity),
            ("restitution", self.restitution),
        ];
        for (name, value) in finite {
            if !value.is_finite() {
                return Err(CageError::invalid(format!("{name} must be finite, got {value}")));
            }
        }

        if self.size_min <= 0.0 || self.size_min > self.size_max {
            return Err(CageError::invalid(format!(
                "size range [{}, {}] is empty or non-positive",
                self.size_min, self.size_max
            )));
        }
        if self.containment_limit(self.size_max) <= 0.0 {
            return Err(CageError::invalid(format!(
                "cage radius {} cannot hold a ball of size {}",
                self.cage_radius, self.size_max
            )));
        }
        if self.spawn_extent < 0.0 || self.spawn_speed < 0.0 || self.agitation < 0.0 {
            return Err(CageError::invalid("spawn extent, spawn speed and agitation must be >= 0"));
        }
        if self.speed_limit <= 0.0 {
            return Err(CageError::invalid(format!(
                "speed_limit must be positive, got {}",
                self.speed_limit
            )));
        }
        if !(0.0..=1.0).contains(&self.restitution) {
            return Err(CageError::invalid(format!(
                "restitution must be within [0, 1], got {}",
                self.restitution
            )));
        }
        Ok(())
    }

    /// Parse and validate settings from JSON
    pub fn from_json(json: &str) -> Result<Self> {
        let settings: Self = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Serialize settings as pretty JSON
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// LocalStorage key
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "lucky_cage_physics";

    /// Load settings from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                match Self::from_json(&json) {
                    Ok(settings) => {
                        log::info!("Loaded physics settings from LocalStorage");
                        return settings;
                    }
                    Err(e) => log::warn!("Ignoring stored physics settings: {e}"),
                }
            }
        }

        log::info!("Using default physics settings");
        Self::default()
    }

    /// Save settings to LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(json) = serde_json::to_string(self) {
                let _ = storage.set_item(Self::STORAGE_KEY, &json);
                log::info!("Physics settings saved");
            }
        }
    }

    /// Load settings from a JSON file
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load(path: impl AsRef<std::path::Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let settings = Self::from_json(&json)?;
        log::info!("Loaded physics settings from {}", path.display());
        Ok(settings)
    }

    /// Save settings to a JSON file
    #[cfg(not(target_arch = "wasm32"))]
    pub fn save(&self, path: impl AsRef<std::path::Path>) -> Result<()> {
        let path = path.as_ref();
        std::fs::write(path, self.to_json()?)?;
        log::info!("Physics settings saved to {}", path.display());
        Ok(())
    }
}
