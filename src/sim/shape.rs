//! Collision shapes and closest-point queries
//!
//! The set of shapes is closed: the ball is a circle, bricks are rotated
//! rectangles, the paddle is a trapezoid with a wider bottom edge, and the
//! level boundaries are half-planes.

use glam::Vec2;

use super::geometry::{Weights, barycentric, is_clamped, normal_of, point_on_line, rotate};

/// A point on a shape's surface with the outward normal there
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfacePoint {
    pub point: Vec2,
    pub normal: Vec2,
}

/// Shape of a rigid body, in body-local coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Shape {
    Circle { radius: f32 },
    /// Four-cornered body: `size` is the top-edge width and the height,
    /// `flare` scales the bottom edge (1.0 for a rectangle)
    Quad { size: Vec2, flare: f32 },
    /// Half-plane through the body center; `normal` points into the open side
    Plane { normal: Vec2 },
}

impl Shape {
    pub fn circle(radius: f32) -> Self {
        Shape::Circle { radius }
    }

    pub fn rect(size: Vec2) -> Self {
        Shape::Quad { size, flare: 1.0 }
    }

    pub fn trapezoid(size: Vec2, flare: f32) -> Self {
        Shape::Quad { size, flare }
    }

    pub fn plane(normal: Vec2) -> Self {
        Shape::Plane {
            normal: normal.normalize_or_zero(),
        }
    }

    /// Radius of a circle, zero for everything else
    pub fn radius(&self) -> f32 {
        match *self {
            Shape::Circle { radius } => radius,
            _ => 0.0,
        }
    }

    /// Moment of inertia about the centroid for the given mass
    pub fn moment_of_inertia(&self, mass: f32) -> f32 {
        match *self {
            Shape::Circle { radius } => 0.5 * mass * radius * radius,
            Shape::Quad { size, flare } => {
                let mean_width = size.x * (1.0 + flare) / 2.0;
                mass / 12.0 * (mean_width * mean_width + size.y * size.y)
            }
            Shape::Plane { .. } => f32::INFINITY,
        }
    }

    /// World-space corners `[a, b, c, d]` of a quad
    ///
    /// ```text
    /// a --- b
    /// |     |
    /// c --- d
    /// ```
    pub fn corners(&self, center: Vec2, angle_deg: f32) -> Option<[Vec2; 4]> {
        let Shape::Quad { size, flare } = *self else {
            return None;
        };
        let angle = angle_deg.to_radians();
        let half = size / 2.0;
        let bottom = half.x * flare;
        let local = [
            Vec2::new(-half.x, -half.y),
            Vec2::new(half.x, -half.y),
            Vec2::new(-bottom, half.y),
            Vec2::new(bottom, half.y),
        ];
        Some(local.map(|corner| center + rotate(corner, angle)))
    }

    /// Closest surface point to `target` and the outward normal there
    pub fn closest_point_to(&self, center: Vec2, angle_deg: f32, target: Vec2) -> SurfacePoint {
        match *self {
            Shape::Circle { radius } => match (target - center).try_normalize() {
                Some(dir) => SurfacePoint {
                    point: center + radius * dir,
                    normal: dir,
                },
                // Querying the center itself has no direction
                None => SurfacePoint {
                    point: center,
                    normal: Vec2::ZERO,
                },
            },
            Shape::Quad { .. } => {
                let corners = self.corners(center, angle_deg).unwrap_or([center; 4]);
                closest_on_quad(corners, target)
            }
            Shape::Plane { normal } => SurfacePoint {
                point: target - normal * normal.dot(target - center),
                normal,
            },
        }
    }
}

/// Candidate contact on one edge of a quad
struct EdgeHit {
    point: Vec2,
    weights: Weights,
    normal: Vec2,
    distance: f32,
}

fn closest_on_quad([a, b, c, d]: [Vec2; 4], target: Vec2) -> SurfacePoint {
    // Fixed order: top, bottom, left, right
    let edges = [
        (a, b, normal_of(a - b)),
        (c, d, normal_of(d - c)),
        (a, c, normal_of(c - a)),
        (b, d, normal_of(b - d)),
    ];

    let [first, rest @ ..] = edges.map(|(p, q, normal)| {
        let weights = barycentric(target, p, q, true);
        let point = point_on_line(weights, p, q);
        EdgeHit {
            point,
            weights,
            normal,
            distance: target.distance(point),
        }
    });
    // Strict comparison keeps the first edge on ties
    let hit = rest.into_iter().fold(first, |best, edge| {
        if edge.distance < best.distance {
            edge
        } else {
            best
        }
    });

    let on_face =
        is_clamped(hit.weights.0, 0.0, 1.0, true) && is_clamped(hit.weights.1, 0.0, 1.0, true);
    let normal = if on_face {
        hit.normal
    } else {
        (target - hit.point).try_normalize().unwrap_or(hit.normal)
    };

    SurfacePoint {
        point: hit.point,
        normal,
    }
}
