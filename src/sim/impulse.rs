//! Impulse-based collision response
//!
//! Resolves a single contact between a round body `a` (the ball, or a point
//! when the radius is zero) and any body `b` (brick, paddle, wall). The
//! normal points from `b` toward `a`.

use glam::Vec2;

use super::body::RigidBody;

/// Restitution and friction of a contact
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Surface {
    /// Coefficient of restitution in [0, 1]
    pub restitution: f32,
    /// Coulomb friction coefficient
    pub friction: f32,
}

impl Surface {
    pub fn new(restitution: f32, friction: f32) -> Self {
        Self {
            restitution,
            friction,
        }
    }

    pub fn elastic() -> Self {
        Self::new(1.0, 0.0)
    }
}

/// Resolve a contact and return the impulse applied to `a`
///
/// `point` lies on the surface of `b`. Nothing changes (and zero is
/// returned) unless the bodies overlap and approach each other along the
/// normal.
pub fn resolve(
    a: &mut RigidBody,
    radius_a: f32,
    b: &mut RigidBody,
    point: Vec2,
    normal: Vec2,
    surface: Surface,
) -> Vec2 {
    let point_a = a.center - radius_a * normal;

    // Gap between the two closest points, negative when overlapping
    let depth = normal.dot(point_a - point);
    let relative = a.velocity_at(point_a) - b.velocity_at(point);
    let v_imp = normal.dot(relative);

    if !(depth <= 0.0 && v_imp < 0.0) {
        return Vec2::ZERO;
    }

    let inverse_mass =
        a.inverse_effective_mass(normal, point_a) + b.inverse_effective_mass(normal, point);
    if inverse_mass <= 0.0 {
        return Vec2::ZERO;
    }
    let effective_mass = 1.0 / inverse_mass;

    let j = -(1.0 + surface.restitution) * effective_mass * v_imp;

    let slip = relative - normal * v_imp;
    let v_slip = slip.length();
    let impulse = if v_slip > 0.0 {
        let e_slip = slip / v_slip;
        let limit = surface.friction * j;
        let jf = (-v_slip).clamp(-limit, limit);
        normal * j + e_slip * jf
    } else {
        normal * j
    };

    a.apply_impulse(impulse, point_a);
    b.apply_impulse(-impulse, point);

    separate(a, b, normal, depth);

    log::trace!(
        "contact at ({:.2}, {:.2}) depth={:.3} v_imp={:.3} J={:.3}",
        point.x,
        point.y,
        depth,
        v_imp,
        j
    );

    impulse
}

/// Push overlapping bodies apart along the normal, split by inverse mass
fn separate(a: &mut RigidBody, b: &mut RigidBody, normal: Vec2, depth: f32) {
    let inv_a = a.inverse_mass();
    let inv_b = b.inverse_mass();
    let total = inv_a + inv_b;
    if total <= 0.0 {
        return;
    }
    let correction = -depth * normal;
    a.center += correction * (inv_a / total);
    b.center -= correction * (inv_b / total);
}
