//! Rigid body state and integration

use glam::Vec2;

use super::geometry::cross;
use super::shape::{Shape, SurfacePoint};
use crate::error::{PhysicsError, Result};

/// Linear and angular state of a simulated object
#[derive(Debug, Clone, PartialEq)]
pub struct RigidBody {
    /// World-space centroid
    pub center: Vec2,
    pub velocity: Vec2,
    /// Orientation in degrees
    pub angle_deg: f32,
    /// Spin in radians per second
    pub angular_velocity: f32,
    /// Immovable: skipped by integration and impulses
    pub is_static: bool,
    pub is_visible: bool,
    /// No angular response to impulses
    pub rotation_locked: bool,
    mass: f32,
    shape: Shape,
}

impl RigidBody {
    /// Create a dynamic body; `mass` must be finite and positive
    pub fn new(shape: Shape, center: Vec2, mass: f32) -> Result<Self> {
        validate_mass(mass)?;
        Ok(Self {
            center,
            velocity: Vec2::ZERO,
            angle_deg: 0.0,
            angular_velocity: 0.0,
            is_static: false,
            is_visible: true,
            rotation_locked: false,
            mass,
            shape,
        })
    }

    /// Create an immovable body
    pub fn new_static(shape: Shape, center: Vec2) -> Self {
        Self {
            center,
            velocity: Vec2::ZERO,
            angle_deg: 0.0,
            angular_velocity: 0.0,
            is_static: true,
            is_visible: true,
            rotation_locked: true,
            mass: 1.0,
            shape,
        }
    }

    pub fn mass(&self) -> f32 {
        self.mass
    }

    pub fn set_mass(&mut self, mass: f32) -> Result<()> {
        validate_mass(mass)?;
        self.mass = mass;
        Ok(())
    }

    pub fn shape(&self) -> &Shape {
        &self.shape
    }

    pub fn set_shape(&mut self, shape: Shape) {
        self.shape = shape;
    }

    pub fn moment_of_inertia(&self) -> f32 {
        self.shape.moment_of_inertia(self.mass)
    }

    /// Inverse mass, zero for static bodies
    pub fn inverse_mass(&self) -> f32 {
        if self.is_static { 0.0 } else { 1.0 / self.mass }
    }

    /// Inverse moment of inertia, zero when the body can't spin
    pub fn inverse_inertia(&self) -> f32 {
        let inertia = self.moment_of_inertia();
        if self.is_static || self.rotation_locked || !(inertia.is_finite() && inertia > 0.0) {
            0.0
        } else {
            1.0 / inertia
        }
    }

    /// Advance the body by `elapsed` seconds under the given accelerations
    ///
    /// Semi-implicit Euler: angular state first, then velocity, then position
    /// using the updated velocity.
    pub fn integrate(
        &mut self,
        elapsed: f32,
        acceleration: Vec2,
        angular_acceleration: f32,
    ) -> Result<()> {
        validate_elapsed(elapsed)?;
        if self.is_static {
            return Ok(());
        }

        self.angular_velocity += elapsed * angular_acceleration;
        self.angle_deg += elapsed * self.angular_velocity.to_degrees();
        self.velocity += elapsed * acceleration;
        self.center += elapsed * self.velocity;
        Ok(())
    }

    /// Velocity of the material point of this body located at `point`
    pub fn velocity_at(&self, point: Vec2) -> Vec2 {
        let delta = point - self.center;
        self.velocity + Vec2::new(-delta.y, delta.x) * self.angular_velocity
    }

    /// Apply an impulse at a world-space point
    pub fn apply_impulse(&mut self, impulse: Vec2, point: Vec2) {
        if self.is_static {
            return;
        }
        self.velocity += impulse * self.inverse_mass();
        self.angular_velocity += cross(point - self.center, impulse) * self.inverse_inertia();
    }

    /// Inverse of the mass this body presents along `direction` at `point`
    pub fn inverse_effective_mass(&self, direction: Vec2, point: Vec2) -> f32 {
        if self.is_static {
            return 0.0;
        }
        let lever = cross(direction, self.center - point);
        self.inverse_mass() + lever * lever * self.inverse_inertia()
    }

    /// Closest point on this body's surface to `target`
    pub fn closest_point_to(&self, target: Vec2) -> SurfacePoint {
        self.shape
            .closest_point_to(self.center, self.angle_deg, target)
    }

    /// World-space corners for quads
    pub fn corners(&self) -> Option<[Vec2; 4]> {
        self.shape.corners(self.center, self.angle_deg)
    }
}

pub(crate) fn validate_elapsed(elapsed: f32) -> Result<()> {
    if elapsed.is_finite() && elapsed >= 0.0 {
        Ok(())
    } else {
        Err(PhysicsError::InvalidElapsed(elapsed))
    }
}

fn validate_mass(mass: f32) -> Result<()> {
    if mass.is_finite() && mass > 0.0 {
        Ok(())
    } else {
        Err(PhysicsError::InvalidMass(mass))
    }
}
