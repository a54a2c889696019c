//! Collision detection and response against the cage wall
//!
//! The cage is a sphere centered on the origin. A ball collides when its
//! center passes the containment limit (cage radius minus half its size).

use glam::Vec3;

/// Result of a collision check
#[derive(Debug, Clone)]
pub struct CollisionResult {
    /// Whether a collision occurred
    pub hit: bool,
    /// Contact point on the containment shell (if hit)
    pub point: Vec3,
    /// Outward wall normal at the contact
    pub normal: Vec3,
    /// How far past the shell the ball center went
    pub penetration: f32,
}

impl CollisionResult {
    pub fn miss() -> Self {
        Self {
            hit: false,
            point: Vec3::ZERO,
            normal: Vec3::ZERO,
            penetration: 0.0,
        }
    }
}

/// Check a ball center against the spherical containment shell of radius `limit`
///
/// A center sitting exactly on the cage center has no defined normal and is
/// reported as a miss; the bounce is skipped for that tick.
pub fn cage_wall_collision(ball_pos: Vec3, limit: f32) -> CollisionResult {
    let dist = ball_pos.length();

    if dist <= limit || dist <= f32::EPSILON {
        return CollisionResult::miss();
    }

    let normal = ball_pos / dist;
    CollisionResult {
        hit: true,
        point: normal * limit,
        normal,
        penetration: dist - limit,
    }
}

/// Reflect velocity off a surface
///
/// Standard reflection: v' = v - 2(v·n)n
#[inline]
pub fn reflect_velocity(velocity: Vec3, normal: Vec3) -> Vec3 {
    velocity - 2.0 * velocity.dot(normal) * normal
}

/// Bounce a ball off the cage wall if it went past `limit`
///
/// Reflects and scales the velocity by `restitution`, then snaps the position
/// onto the shell. Returns true if a bounce happened.
pub fn resolve_wall_bounce(pos: &mut Vec3, vel: &mut Vec3, limit: f32, restitution: f32) -> bool {
    let result = cage_wall_collision(*pos, limit);
    if !result.hit {
        return false;
    }

    *vel = reflect_velocity(*vel, result.normal) * restitution;
    *pos = result.point;
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inside_is_miss() {
        let result = cage_wall_collision(Vec3::new(100.0, 0.0, 0.0), 130.0);
        assert!(!result.hit);

        // Exactly on the shell is still inside
        let result = cage_wall_collision(Vec3::new(0.0, 130.0, 0.0), 130.0);
        assert!(!result.hit);
    }

    #[test]
    fn test_outside_is_hit() {
        let result = cage_wall_collision(Vec3::new(0.0, 0.0, 135.0), 130.0);
        assert!(result.hit);
        assert!((result.normal - Vec3::Z).length() < 1e-6);
        assert!((result.point - Vec3::new(0.0, 0.0, 130.0)).length() < 1e-4);
        assert!((result.penetration - 5.0).abs() < 1e-4);
    }

    #[test]
    fn test_zero_distance_is_skipped() {
        // Degenerate cage (negative limit) with the ball dead center
        let mut pos = Vec3::ZERO;
        let mut vel = Vec3::new(1.0, 2.0, 3.0);
        assert!(!resolve_wall_bounce(&mut pos, &mut vel, -1.0, 0.8));
        assert_eq!(pos, Vec3::ZERO);
        assert_eq!(vel, Vec3::new(1.0, 2.0, 3.0));
    }

    #[test]
    fn test_reflect_velocity() {
        // Moving along +x, wall normal +x
        let reflected = reflect_velocity(Vec3::new(100.0, 0.0, 0.0), Vec3::X);
        assert!((reflected.x - (-100.0)).abs() < 0.001);
        assert!(reflected.y.abs() < 0.001);
        assert!(reflected.z.abs() < 0.001);

        // Tangential component is kept
        let reflected = reflect_velocity(Vec3::new(3.0, 4.0, 0.0), Vec3::X);
        assert!((reflected - Vec3::new(-3.0, 4.0, 0.0)).length() < 1e-6);
    }

    #[test]
    fn test_direct_outward_bounce_loses_energy() {
        let limit = 130.0;
        let mut pos = Vec3::new(133.0, 0.0, 0.0);
        let mut vel = Vec3::new(5.0, 0.0, 0.0);

        assert!(resolve_wall_bounce(&mut pos, &mut vel, limit, 0.8));
        assert!((vel.length() - 0.8 * 5.0).abs() < 1e-5);
        assert!(vel.x < 0.0, "velocity should point back inward");
        assert!((pos.length() - limit).abs() < 1e-4);
    }

    #[test]
    fn test_oblique_bounce_snaps_to_shell() {
        let limit = 100.0;
        let mut pos = Vec3::new(80.0, 70.0, 10.0);
        let mut vel = Vec3::new(4.0, 3.0, -1.0);
        let before = vel;

        assert!(resolve_wall_bounce(&mut pos, &mut vel, limit, 0.8));
        assert!((pos.length() - limit).abs() < 1e-3);
        // Reflection preserves magnitude before restitution
        assert!((vel.length() - 0.8 * before.length()).abs() < 1e-4);
        // Now heading inward
        assert!(vel.dot(pos) < 0.0);
    }
}
