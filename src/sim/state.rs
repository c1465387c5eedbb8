//! World state and the bodies it owns
//!
//! The world exclusively owns one ball, one paddle, four boundary walls, the
//! active bricks and the falling debris of destroyed bricks.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::body::RigidBody;
use super::geometry::polar_degrees;
use super::shape::Shape;
use crate::config::PhysicsConfig;
use crate::error::{PhysicsError, Result};

/// The ball
#[derive(Debug, Clone)]
pub struct Ball {
    pub body: RigidBody,
}

impl Ball {
    pub fn new(radius: f32, mass: f32) -> Result<Self> {
        validate_radius(radius)?;
        Ok(Self {
            body: RigidBody::new(Shape::circle(radius), Vec2::ZERO, mass)?,
        })
    }

    pub fn radius(&self) -> f32 {
        self.body.shape().radius()
    }

    pub fn diameter(&self) -> f32 {
        2.0 * self.radius()
    }

    pub fn set_radius(&mut self, radius: f32) -> Result<()> {
        validate_radius(radius)?;
        self.body.set_shape(Shape::circle(radius));
        Ok(())
    }

    pub fn top(&self) -> f32 {
        self.body.center.y - self.radius()
    }

    pub fn bottom(&self) -> f32 {
        self.body.center.y + self.radius()
    }
}

/// The player's paddle: a static trapezoid driven toward a target point
#[derive(Debug, Clone)]
pub struct Paddle {
    pub body: RigidBody,
    /// Externally supplied tracking target
    pub target: Vec2,
}

impl Paddle {
    pub fn new(size: Vec2, flare: f32) -> Self {
        Self {
            body: RigidBody::new_static(Shape::trapezoid(size, flare), Vec2::ZERO),
            target: Vec2::ZERO,
        }
    }

    pub fn size(&self) -> Vec2 {
        match *self.body.shape() {
            Shape::Quad { size, .. } => size,
            _ => Vec2::ZERO,
        }
    }

    /// Left end of the top edge
    pub fn left(&self) -> f32 {
        self.body.center.x - self.size().x / 2.0
    }

    pub fn right(&self) -> f32 {
        self.body.center.x + self.size().x / 2.0
    }

    pub fn top(&self) -> f32 {
        self.body.center.y - self.size().y / 2.0
    }

    /// Critically-damped tracking toward `target`, then clamp inside the play width
    ///
    /// The paddle is kinematic: its velocity feeds the contact with the ball
    /// but impulses never push it.
    pub fn track(&mut self, elapsed: f32, damping: f32, play_width: f32) {
        if elapsed <= 0.0 {
            return;
        }
        let pull = (self.target - self.body.center) / elapsed;
        self.body.velocity = (1.0 - damping) * self.body.velocity + damping * pull;
        self.body.center += elapsed * self.body.velocity;

        if self.left() < 0.0 {
            self.body.center.x -= self.left();
        }
        if self.right() > play_width {
            self.body.center.x -= self.right() - play_width;
        }
    }
}

/// A destructible brick
#[derive(Debug, Clone)]
pub struct Brick {
    pub body: RigidBody,
    strength: u32,
}

impl Brick {
    /// A fixed brick at `center`
    pub fn new(center: Vec2, size: Vec2, mass: f32, strength: u32) -> Result<Self> {
        let mut body = RigidBody::new(Shape::rect(size), center, mass)?;
        body.is_static = true;
        Ok(Self { body, strength })
    }

    /// Remaining hit points
    pub fn strength(&self) -> u32 {
        self.strength
    }

    pub fn is_destroyed(&self) -> bool {
        self.strength == 0
    }

    /// Take one hit; returns the strength left. A destroyed brick is released
    /// from its fixed position and falls.
    pub fn hit(&mut self) -> u32 {
        self.strength = self.strength.saturating_sub(1);
        self.body.is_static = self.strength > 0;
        self.strength
    }
}

/// Which level boundary a wall is
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WallSide {
    Left,
    Top,
    Right,
    Bottom,
}

/// A level boundary: a static half-plane with its own restitution
#[derive(Debug, Clone)]
pub struct Wall {
    pub side: WallSide,
    pub body: RigidBody,
    pub restitution: f32,
}

impl Wall {
    pub fn new(side: WallSide, point: Vec2, inward_normal: Vec2, restitution: f32) -> Self {
        Self {
            side,
            body: RigidBody::new_static(Shape::plane(inward_normal), point),
            restitution,
        }
    }
}

/// Something a UI, audio or scoring collaborator may react to
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SimEvent {
    WallBounce(WallSide),
    PaddleHit,
    BrickHit {
        strength_left: u32,
        points: f32,
    },
    BrickDestroyed { center: Vec2 },
    /// Debris left the play area
    DebrisLost,
    LevelCleared,
}

/// Outcome of one `World::step`
#[derive(Debug, Clone, Default)]
pub struct StepReport {
    /// False when the world was paused and nothing moved
    pub advanced: bool,
    pub events: Vec<SimEvent>,
    /// Points awarded during this step
    pub points: f32,
    /// Total score after this step
    pub score: f32,
}

impl StepReport {
    pub fn brick_hits(&self) -> usize {
        self.events
            .iter()
            .filter(|e| matches!(e, SimEvent::BrickHit { .. }))
            .count()
    }

    pub fn level_cleared(&self) -> bool {
        self.events.contains(&SimEvent::LevelCleared)
    }
}

/// The simulated level
#[derive(Debug, Clone)]
pub struct World {
    pub ball: Ball,
    pub paddle: Paddle,
    /// Bricks still in the grid and taking hits (grid order)
    pub bricks: Vec<Brick>,
    /// Destroyed bricks on their way out of the play area
    pub debris: Vec<Brick>,
    pub walls: [Wall; 4],
    pub(crate) score: f32,
    pub(crate) time: f32,
    pub(crate) paused: bool,
    config: PhysicsConfig,
    rng: Pcg32,
}

impl World {
    /// Validate `config` and set up the first level (paused, ball on the paddle)
    pub fn new(config: PhysicsConfig) -> Result<Self> {
        config.validate()?;

        let mut world = Self {
            ball: Ball::new(config.ball_radius, config.ball_mass)?,
            paddle: Paddle::new(config.paddle_size, config.paddle_flare),
            bricks: Vec::new(),
            debris: Vec::new(),
            walls: build_walls(&config),
            score: 0.0,
            time: 0.0,
            paused: true,
            rng: Pcg32::seed_from_u64(config.seed),
            config,
        };
        world.setup_level()?;
        Ok(world)
    }

    pub fn config(&self) -> &PhysicsConfig {
        &self.config
    }

    pub fn score(&self) -> f32 {
        self.score
    }

    /// Simulated seconds since the level was set up
    pub fn elapsed_time(&self) -> f32 {
        self.time
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn play_area(&self) -> Vec2 {
        self.config.play_area
    }

    /// Reset score and time, place ball and paddle, rebuild the brick grid
    pub fn setup_level(&mut self) -> Result<()> {
        let play = self.config.play_area;
        self.score = 0.0;
        self.time = 0.0;
        self.paused = true;

        let paddle_height = self.config.paddle_size.y;
        self.paddle.body.center = Vec2::new(play.x / 2.0, play.y - paddle_height);
        self.paddle.body.velocity = Vec2::ZERO;
        self.paddle.target = self.paddle.body.center;

        self.ball.set_radius(self.config.ball_radius)?;
        self.rest_ball_on_paddle();
        self.ball.body.angle_deg = 0.0;
        self.ball.body.angular_velocity = 0.0;
        self.ball.body.is_static = false;
        self.ball.body.is_visible = true;

        let mut angle = self.config.launch_angle_deg;
        if self.config.launch_jitter_deg > 0.0 {
            let spread = self.config.launch_jitter_deg;
            angle += self.rng.random_range(-spread..=spread);
        }
        self.ball.body.velocity = polar_degrees(self.config.launch_speed, angle);

        self.bricks = build_grid(&self.config)?;
        self.debris.clear();

        log::info!(
            "Level set up: {} bricks, launch angle {:.1}°",
            self.bricks.len(),
            angle
        );
        Ok(())
    }

    /// Start a freshly set up level
    pub fn launch(&mut self) {
        if self.paused && self.time == 0.0 {
            self.paused = false;
        }
    }

    pub fn pause(&mut self) {
        self.paused = true;
    }

    pub fn resume(&mut self) {
        self.paused = false;
    }

    pub fn toggle_pause(&mut self) {
        self.paused = !self.paused;
    }

    /// Move the paddle's tracking target
    ///
    /// The vertical coordinate is kept within the paddle's travel band. While
    /// paused the paddle jumps straight to the target, and before the first
    /// tick the ball rides along on top of it.
    pub fn set_paddle_target(&mut self, point: Vec2) {
        let rest = self.config.play_area.y - self.config.paddle_size.y;
        let y = point.y.clamp(rest - self.config.paddle_travel, rest);
        self.paddle.target = Vec2::new(point.x, y);

        if self.paused {
            self.paddle.body.center = self.paddle.target;
            self.paddle.body.velocity = Vec2::ZERO;
            if self.time == 0.0 {
                self.rest_ball_on_paddle();
            }
        }
    }

    /// Grow the ball to its boosted radius
    pub fn boost_ball(&mut self) -> Result<()> {
        self.ball.set_radius(self.config.ball_boost_radius)
    }

    /// Return the ball to its normal radius
    pub fn shrink_ball(&mut self) -> Result<()> {
        self.ball.set_radius(self.config.ball_radius)
    }

    fn rest_ball_on_paddle(&mut self) {
        self.ball.body.center = Vec2::new(
            self.paddle.body.center.x,
            self.paddle.top() - self.ball.radius(),
        );
    }
}

fn validate_radius(radius: f32) -> Result<()> {
    if radius.is_finite() && radius > 0.0 {
        Ok(())
    } else {
        Err(PhysicsError::InvalidRadius(radius))
    }
}

fn build_walls(config: &PhysicsConfig) -> [Wall; 4] {
    let play = config.play_area;
    let cor = config.wall_restitution;
    [
        Wall::new(WallSide::Left, Vec2::ZERO, Vec2::X, cor.left),
        Wall::new(WallSide::Top, Vec2::ZERO, Vec2::Y, cor.top),
        Wall::new(WallSide::Right, Vec2::new(play.x, 0.0), -Vec2::X, cor.right),
        Wall::new(
            WallSide::Bottom,
            Vec2::new(0.0, play.y),
            -Vec2::Y,
            cor.bottom,
        ),
    ]
}

/// Bricks laid out on a uniform grid over the top of the play area
fn build_grid(config: &PhysicsConfig) -> Result<Vec<Brick>> {
    let play = config.play_area;
    let dx = play.x / config.brick_cols as f32;
    let dy = config.brick_field_fraction * play.y / config.brick_rows as f32;

    let mut bricks = Vec::with_capacity(config.brick_rows * config.brick_cols);
    for row in 0..config.brick_rows {
        let y = dy * (row as f32 + 0.5);
        let strength = config.strength_for_row(row);
        for col in 0..config.brick_cols {
            let x = dx * (col as f32 + 0.5);
            bricks.push(Brick::new(
                Vec2::new(x, y),
                config.brick_size,
                config.brick_mass,
                strength,
            )?);
        }
    }
    Ok(bricks)
}
