//! Impulse Breakout - rigid-body core of a paddle/ball/brick arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (geometry, bodies, collisions, world step)
//! - `config`: Tunable physics parameters, loadable from JSON
//! - `error`: Error types for API-boundary validation
//!
//! Rendering, input and timers live outside this crate. They read the world's
//! bodies and drive it through `World::step` or `sim::tick`.

pub mod config;
pub mod error;
pub mod sim;

pub use config::{PhysicsConfig, WallRestitution};
pub use error::{PhysicsError, Result};
pub use sim::{Ball, Brick, Paddle, RigidBody, Shape};
pub use sim::{SimEvent, StepReport, TickInput, World, tick};

/// Default tuning constants
///
/// World units are roughly "percent of the play area"; y grows downward.
pub mod consts {
    /// Default tick length in seconds (15 ms timer scaled by 1/100)
    pub const DEFAULT_ELAPSED: f32 = 0.15;

    /// Play area
    pub const PLAY_WIDTH: f32 = 100.0;
    pub const PLAY_HEIGHT: f32 = 100.0;

    /// Downward gravity (units/s²)
    pub const GRAVITY: f32 = 1.0;

    /// Per-wall restitution
    pub const WALL_COR_SIDE: f32 = 0.96;
    pub const WALL_COR_TOP: f32 = 1.0;
    pub const WALL_COR_BOTTOM: f32 = 0.92;

    /// Ball defaults
    pub const BALL_RADIUS: f32 = 3.0;
    pub const BALL_BOOST_RADIUS: f32 = 4.0;
    pub const BALL_MASS: f32 = 1.0;
    pub const BALL_LAUNCH_SPEED: f32 = 16.0;
    pub const BALL_LAUNCH_ANGLE_DEG: f32 = -110.0;
    /// Speed above which the ball is damped and clamped
    pub const BALL_SPEED_CEILING: f32 = 25.0;
    /// Fraction of velocity removed when over the ceiling
    pub const BALL_SPEED_DAMPING: f32 = 0.1;

    /// Paddle defaults
    pub const PADDLE_WIDTH: f32 = 18.0;
    pub const PADDLE_HEIGHT: f32 = 3.0;
    /// Bottom edge half-width over top edge half-width
    pub const PADDLE_FLARE: f32 = 4.0 / 3.0;
    /// How far above its rest line the paddle may be pushed
    pub const PADDLE_TRAVEL: f32 = 6.0;
    /// Tracking blend factor λ
    pub const PADDLE_DAMPING: f32 = 0.45;
    pub const PADDLE_COR: f32 = 1.0;
    pub const PADDLE_FRICTION: f32 = 0.2;

    /// Brick defaults
    pub const BRICK_WIDTH: f32 = 12.0;
    pub const BRICK_HEIGHT: f32 = 4.0;
    pub const BRICK_MASS: f32 = 16.0;
    pub const BRICK_ROWS: usize = 8;
    pub const BRICK_COLS: usize = 8;
    /// Fraction of the play height covered by the brick grid
    pub const BRICK_FIELD_FRACTION: f32 = 0.5;
    pub const BRICK_COR: f32 = 1.0;
    pub const BRICK_FRICTION: f32 = 0.1;

    /// Points for a hit are `BRICK_POINTS / (1 + remaining strength)`
    pub const BRICK_POINTS: f32 = 100.0;
}
