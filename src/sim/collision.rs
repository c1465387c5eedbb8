//! Collision detection between the ball and other bodies
//!
//! One primitive covers everything: find the closest surface point of the
//! struck body to the ball center and compare the gap along the surface
//! normal with the ball radius. Walls are half-plane bodies, so the same
//! test doubles as the point-vs-plane check.

use glam::Vec2;

use super::body::RigidBody;

/// Result of a collision check
#[derive(Debug, Clone)]
pub struct CollisionResult {
    /// Whether a collision occurred
    pub hit: bool,
    /// Closest point on the struck body's surface
    pub point: Vec2,
    /// Surface normal at the point (pointing toward the ball center)
    pub normal: Vec2,
    /// Overlap depth, positive when the ball sinks into the surface
    pub penetration: f32,
}

impl CollisionResult {
    pub fn miss() -> Self {
        Self {
            hit: false,
            point: Vec2::ZERO,
            normal: Vec2::ZERO,
            penetration: 0.0,
        }
    }
}

/// Check whether a ball of `ball_radius` at `ball_center` touches `body`
///
/// The gap is measured along the outward normal, so it equals the Euclidean
/// distance for exterior contacts and goes negative when the ball center is
/// inside a brick or behind a wall.
pub fn intersects(body: &RigidBody, ball_center: Vec2, ball_radius: f32) -> CollisionResult {
    let surface = body.closest_point_to(ball_center);
    let gap = if surface.normal == Vec2::ZERO {
        ball_center.distance(surface.point)
    } else {
        surface.normal.dot(ball_center - surface.point)
    };

    if gap <= ball_radius {
        CollisionResult {
            hit: true,
            point: surface.point,
            normal: surface.normal,
            penetration: ball_radius - gap,
        }
    } else {
        CollisionResult::miss()
    }
}

/// Convenience wrapper for a ball body against another body
pub fn ball_collision(ball: &RigidBody, other: &RigidBody) -> CollisionResult {
    intersects(other, ball.center, ball.shape().radius())
}
