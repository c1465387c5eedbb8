//! Deterministic simulation module
//!
//! All physics lives here. This module must stay pure and deterministic:
//! - Time is supplied by the caller, one step at a time
//! - Seeded RNG only
//! - Stable iteration order (grid order for bricks)
//! - No rendering or platform dependencies

pub mod body;
pub mod collision;
pub mod geometry;
pub mod impulse;
pub mod shape;
pub mod state;
pub mod tick;

pub use body::RigidBody;
pub use collision::{CollisionResult, ball_collision, intersects};
pub use impulse::{Surface, resolve};
pub use shape::{Shape, SurfacePoint};
pub use state::{Ball, Brick, Paddle, SimEvent, StepReport, Wall, WallSide, World};
pub use tick::{TickInput, tick};
