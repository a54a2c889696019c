//! Per-ball instance records for instanced sphere rendering

use bytemuck::{Pod, Zeroable};

use crate::sim::{BallColor, BallView, CageSnapshot};

/// One ball, laid out for a GPU instance buffer
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct BallInstance {
    pub position: [f32; 3],
    pub radius: f32,
    pub color_light: [f32; 4],
    pub color_main: [f32; 4],
    pub color_dark: [f32; 4],
}

impl BallInstance {
    /// Byte stride of one instance
    pub const STRIDE: usize = std::mem::size_of::<BallInstance>();

    pub fn from_view(view: &BallView) -> Self {
        Self {
            position: view.pos.to_array(),
            radius: view.size / 2.0,
            color_light: BallColor::rgba(view.color.light),
            color_main: BallColor::rgba(view.color.main),
            color_dark: BallColor::rgba(view.color.dark),
        }
    }
}

/// Instances in back-to-front order, ready for alpha blending
pub fn build_instances(snapshot: &CageSnapshot) -> Vec<BallInstance> {
    snapshot
        .depth_sorted()
        .into_iter()
        .map(BallInstance::from_view)
        .collect()
}

/// Raw bytes for upload
pub fn instance_bytes(instances: &[BallInstance]) -> &[u8] {
    bytemuck::cast_slice(instances)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{CageState, Regime};

    #[test]
    fn test_layout() {
        assert_eq!(BallInstance::STRIDE, 64);
    }

    #[test]
    fn test_build_instances() {
        let mut state = CageState::new(4);
        state.initialize(6);
        let snapshot = state.snapshot();
        assert_eq!(snapshot.regime, Regime::Settling);

        let instances = build_instances(&snapshot);
        assert_eq!(instances.len(), 6);
        for pair in instances.windows(2) {
            assert!(pair[0].position[2] <= pair[1].position[2]);
        }
        for instance in &instances {
            assert!((12.0..=16.0).contains(&instance.radius));
            assert_eq!(instance.color_main[3], 1.0);
        }
        assert_eq!(instance_bytes(&instances).len(), 6 * BallInstance::STRIDE);
    }

    #[test]
    fn test_instance_colors_come_from_ball() {
        let mut state = CageState::new(9);
        state.initialize(1);
        let snapshot = state.snapshot();
        let instance = BallInstance::from_view(&snapshot.balls[0]);

        let color = crate::sim::PALETTE[0];
        assert_eq!(instance.color_light, BallColor::rgba(color.light));
        assert_eq!(instance.color_main, BallColor::rgba(color.main));
        assert_eq!(instance.color_dark, BallColor::rgba(color.dark));
        assert_eq!(instance.position, snapshot.balls[0].pos.to_array());
    }
}
