//! Fixed-rate tick scheduling
//!
//! Converts wall-clock frame deltas into a whole number of simulation ticks,
//! so the cage moves at the same speed on 60 Hz and 144 Hz displays. A
//! per-frame clock instead runs exactly one tick per display frame.

use crate::consts::{MAX_SUBSTEPS, SIM_DT};

/// Accumulates frame time and hands out whole ticks
#[derive(Debug, Clone)]
pub struct FrameClock {
    tick_dt: f32,
    max_substeps: u32,
    accumulator: f32,
    /// Ticks dropped because a frame exceeded the substep cap
    dropped: u64,
    /// One tick per frame, whatever the frame time
    per_frame: bool,
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new(SIM_DT, MAX_SUBSTEPS)
    }
}

impl FrameClock {
    pub fn new(tick_dt: f32, max_substeps: u32) -> Self {
        Self {
            tick_dt,
            max_substeps,
            accumulator: 0.0,
            dropped: 0,
            per_frame: false,
        }
    }

    /// Clock that ticks once per frame, tying cage speed to the display rate
    pub fn per_frame() -> Self {
        Self {
            per_frame: true,
            ..Self::default()
        }
    }

    pub fn is_per_frame(&self) -> bool {
        self.per_frame
    }

    /// Feed `dt` seconds of frame time; returns how many ticks to run now
    pub fn advance(&mut self, dt: f32) -> u32 {
        if self.per_frame {
            return 1;
        }

        // Long stalls (hidden tab, debugger) are capped to 0.1 s
        let dt = if dt.is_finite() { dt.clamp(0.0, 0.1) } else { 0.0 };
        self.accumulator += dt;

        let mut ticks = 0;
        while self.accumulator >= self.tick_dt && ticks < self.max_substeps {
            self.accumulator -= self.tick_dt;
            ticks += 1;
        }

        if self.accumulator >= self.tick_dt {
            let backlog = (self.accumulator / self.tick_dt) as u64;
            log::warn!("Frame clock behind; dropping {} ticks", backlog);
            self.dropped += backlog;
            self.accumulator %= self.tick_dt;
        }

        ticks
    }

    /// Leftover fraction of a tick, for render interpolation
    pub fn alpha(&self) -> f32 {
        self.accumulator / self.tick_dt
    }

    pub fn dropped_ticks(&self) -> u64 {
        self.dropped
    }

    pub fn reset(&mut self) {
        self.accumulator = 0.0;
    }
}
