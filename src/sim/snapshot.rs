//! Read-only views of the cage for renderers
//!
//! Snapshots own their data. Nothing a consumer does to one can reach back
//! into the simulation.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use super::ball::{Ball, BallColor};
use super::tick::Regime;
use crate::consts::Z_INDEX_OFFSET;

/// One ball as seen by a renderer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BallView {
    pub id: u32,
    /// Number painted on the ball
    pub label: u32,
    pub pos: Vec3,
    pub size: f32,
    pub color: BallColor,
}

impl BallView {
    fn from_ball(ball: &Ball) -> Self {
        Self {
            id: ball.id,
            label: ball.label(),
            pos: ball.pos,
            size: ball.size,
            color: ball.color,
        }
    }

    /// DOM stacking order; larger z draws on top
    pub fn z_index(&self) -> i32 {
        (self.pos.z + Z_INDEX_OFFSET).round() as i32
    }

    /// CSS transform placing the ball relative to the cage center
    pub fn css_transform(&self) -> String {
        format!(
            "translate3d({}px, {}px, {}px)",
            self.pos.x, self.pos.y, self.pos.z
        )
    }
}

/// Cage state after a tick
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CageSnapshot {
    /// Tick that produced this snapshot
    pub tick: u64,
    pub regime: Regime,
    /// Balls in id order
    pub balls: Vec<BallView>,
    /// Total kinetic energy (unit mass)
    pub kinetic_energy: f32,
}

impl CageSnapshot {
    pub fn capture(tick: u64, regime: Regime, balls: &[Ball]) -> Self {
        Self {
            tick,
            regime,
            balls: balls.iter().map(BallView::from_ball).collect(),
            kinetic_energy: balls.iter().map(Ball::kinetic_energy).sum(),
        }
    }

    pub fn len(&self) -> usize {
        self.balls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.balls.is_empty()
    }

    pub fn get(&self, id: u32) -> Option<&BallView> {
        self.balls.iter().find(|b| b.id == id)
    }

    /// Balls ordered back to front (ascending z) for painter's-order drawing
    pub fn depth_sorted(&self) -> Vec<&BallView> {
        let mut sorted: Vec<&BallView> = self.balls.iter().collect();
        sorted.sort_by(|a, b| a.pos.z.total_cmp(&b.pos.z).then(a.id.cmp(&b.id)));
        sorted
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::ball::palette_color;

    fn ball(id: u32, z: f32) -> Ball {
        Ball {
            id,
            pos: Vec3::new(1.0, 2.0, z),
            vel: Vec3::new(0.0, 2.0, 0.0),
            size: 24.0,
            color: palette_color(id),
        }
    }

    #[test]
    fn test_capture() {
        let balls = vec![ball(0, 5.0), ball(1, -5.0)];
        let snapshot = CageSnapshot::capture(10, Regime::Agitated, &balls);

        assert_eq!(snapshot.tick, 10);
        assert_eq!(snapshot.len(), 2);
        assert_eq!(snapshot.balls[1].label, 2);
        assert_eq!(snapshot.get(1).map(|b| b.pos.z), Some(-5.0));
        assert!(snapshot.get(7).is_none());
        // 2 * (0.5 * 4)
        assert!((snapshot.kinetic_energy - 4.0).abs() < 1e-6);
    }

    #[test]
    fn test_depth_sorted() {
        let balls = vec![ball(0, 30.0), ball(1, -40.0), ball(2, 0.0)];
        let snapshot = CageSnapshot::capture(0, Regime::Settling, &balls);
        let order: Vec<u32> = snapshot.depth_sorted().iter().map(|b| b.id).collect();
        assert_eq!(order, vec![1, 2, 0]);
        // Original order untouched
        assert_eq!(snapshot.balls[0].id, 0);
    }

    #[test]
    fn test_z_index_and_transform() {
        let snapshot = CageSnapshot::capture(0, Regime::Settling, &[ball(0, -20.4)]);
        let view = &snapshot.balls[0];
        assert_eq!(view.z_index(), 480);
        assert_eq!(view.css_transform(), "translate3d(1px, 2px, -20.4px)");
    }

    #[test]
    fn test_json_shape() {
        let snapshot = CageSnapshot::capture(3, Regime::Agitated, &[ball(0, 1.0)]);
        let value: serde_json::Value = serde_json::from_str(&snapshot.to_json().unwrap()).unwrap();
        assert_eq!(value["tick"], 3);
        assert_eq!(value["regime"], "Agitated");
        assert_eq!(value["balls"][0]["label"], 1);
        assert_eq!(value["balls"][0]["pos"][2], 1.0);
    }
}
