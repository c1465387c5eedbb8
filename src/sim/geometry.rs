//! 2D vector helpers
//!
//! Stateless functions shared by the shape queries and the impulse resolver.
//! Perpendiculars use the left-hand convention `(x, y) -> (-y, x)`.

use glam::Vec2;

/// Barycentric weights `(w_a, w_b)` of a point on the line through `a` and `b`
pub type Weights = (f32, f32);

/// Vector from magnitude and angle (radians)
#[inline]
pub fn polar(magnitude: f32, angle: f32) -> Vec2 {
    Vec2::new(magnitude * angle.cos(), magnitude * angle.sin())
}

/// Vector from magnitude and angle (degrees)
#[inline]
pub fn polar_degrees(magnitude: f32, angle_deg: f32) -> Vec2 {
    polar(magnitude, angle_deg.to_radians())
}

/// Rotate a vector counter-clockwise (in math orientation) by `angle` radians
#[inline]
pub fn rotate(vector: Vec2, angle: f32) -> Vec2 {
    let (s, c) = angle.sin_cos();
    Vec2::new(c * vector.x - s * vector.y, s * vector.x + c * vector.y)
}

/// Rotate `point` by `angle` radians around `pivot`
#[inline]
pub fn rotate_about(point: Vec2, angle: f32, pivot: Vec2) -> Vec2 {
    pivot + rotate(point - pivot, angle)
}

/// Unit left-hand perpendicular of `vector`
///
/// A zero vector has no perpendicular; `Vec2::ZERO` is returned instead of NaN.
#[inline]
pub fn normal_of(vector: Vec2) -> Vec2 {
    Vec2::new(-vector.y, vector.x).normalize_or_zero()
}

/// 2D cross product (z component of the 3D cross product)
#[inline]
pub fn cross(a: Vec2, b: Vec2) -> f32 {
    a.x * b.y - a.y * b.x
}

/// Project `point` onto the line through `a` and `b`
///
/// Returns weights with `w_a + w_b = 1` such that the projection equals
/// `w_a * a + w_b * b`. With `clamped` the weights are restricted to `[0, 1]`,
/// which keeps the reconstructed point on the segment. A zero-length segment
/// returns `(1, 0)`.
pub fn barycentric(point: Vec2, a: Vec2, b: Vec2, clamped: bool) -> Weights {
    let edge = b - a;
    let len_sq = edge.length_squared();
    if len_sq == 0.0 {
        return (1.0, 0.0);
    }

    let t = (point - a).dot(edge) / len_sq;
    let (w_a, w_b) = (1.0 - t, t);

    if clamped {
        (w_a.clamp(0.0, 1.0), w_b.clamp(0.0, 1.0))
    } else {
        (w_a, w_b)
    }
}

/// Reconstruct a point from barycentric weights
#[inline]
pub fn point_on_line(weights: Weights, a: Vec2, b: Vec2) -> Vec2 {
    weights.0 * a + weights.1 * b
}

/// Orthogonal projection of `point` onto the infinite line through `a`, `b`
#[inline]
pub fn project_point_on_line(point: Vec2, a: Vec2, b: Vec2) -> Vec2 {
    point_on_line(barycentric(point, a, b, false), a, b)
}

/// Whether `x` lies in `[min, max]` (or `(min, max)` when `exclusive`)
#[inline]
pub fn is_clamped(x: f32, min: f32, max: f32, exclusive: bool) -> bool {
    if exclusive {
        x > min && x < max
    } else {
        x >= min && x <= max
    }
}
