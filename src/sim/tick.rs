//! Simulation tick
//!
//! Advances the world by one externally timed step in a fixed order: ball,
//! walls, paddle, bricks, debris clean-up, paddle contact, speed ceiling.

use glam::Vec2;

use super::body::validate_elapsed;
use super::collision::{ball_collision, intersects};
use super::impulse::{Surface, resolve};
use super::state::{SimEvent, StepReport, World};
use crate::consts::BRICK_POINTS;
use crate::error::Result;

/// Input commands gathered between two ticks
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Where the pointer wants the paddle
    pub paddle_target: Option<Vec2>,
    /// Start a freshly set up level
    pub launch: bool,
    /// Pause toggle
    pub pause: bool,
    /// Grow the ball to its boosted radius
    pub boost: bool,
    /// Return the ball to its normal radius
    pub shrink: bool,
}

/// Apply `input` to the world, then advance it by `elapsed` seconds
pub fn tick(world: &mut World, input: &TickInput, elapsed: f32) -> Result<StepReport> {
    if input.pause {
        world.toggle_pause();
    }
    if input.launch {
        world.launch();
    }
    if let Some(target) = input.paddle_target {
        world.set_paddle_target(target);
    }
    if input.boost {
        world.boost_ball()?;
    } else if input.shrink {
        world.shrink_ball()?;
    }

    world.step(elapsed)
}

impl World {
    /// Advance the simulation by `elapsed` seconds
    ///
    /// A paused world does nothing and reports `advanced == false`. Negative
    /// or non-finite `elapsed` is rejected before any state changes.
    pub fn step(&mut self, elapsed: f32) -> Result<StepReport> {
        validate_elapsed(elapsed)?;

        let mut report = StepReport {
            score: self.score,
            ..Default::default()
        };
        if self.paused {
            return Ok(report);
        }
        report.advanced = true;
        self.time += elapsed;

        let gravity = self.config().gravity;
        let radius = self.ball.radius();

        // Ball flight and level boundaries
        if !self.ball.body.is_static {
            self.ball.body.integrate(elapsed, gravity, 0.0)?;

            let wall_friction = self.config().wall_friction;
            for wall in &mut self.walls {
                let contact = intersects(&wall.body, self.ball.body.center, radius);
                if !contact.hit {
                    continue;
                }
                let surface = Surface::new(wall.restitution, wall_friction);
                let impulse = resolve(
                    &mut self.ball.body,
                    radius,
                    &mut wall.body,
                    contact.point,
                    contact.normal,
                    surface,
                );
                if impulse != Vec2::ZERO {
                    report.events.push(SimEvent::WallBounce(wall.side));
                }
            }
        }

        // Paddle follows its target
        let damping = self.config().paddle_damping;
        let play = self.play_area();
        self.paddle.track(elapsed, damping, play.x);

        // Bricks
        let brick_surface = Surface::new(
            self.config().brick_restitution,
            self.config().brick_friction,
        );
        for brick in &mut self.bricks {
            let contact = ball_collision(&self.ball.body, &brick.body);
            if !contact.hit {
                continue;
            }

            let strength_left = brick.hit();
            let points = BRICK_POINTS / (1.0 + strength_left as f32);
            self.score += points;
            report.points += points;
            report.events.push(SimEvent::BrickHit {
                strength_left,
                points,
            });

            resolve(
                &mut self.ball.body,
                radius,
                &mut brick.body,
                contact.point,
                contact.normal,
                brick_surface,
            );

            if brick.is_destroyed() {
                log::debug!(
                    "Brick destroyed at ({:.1}, {:.1})",
                    brick.body.center.x,
                    brick.body.center.y
                );
                report.events.push(SimEvent::BrickDestroyed {
                    center: brick.body.center,
                });
            }
        }

        // Debris drifts until it leaves the play area on any side
        for piece in &mut self.debris {
            piece.body.integrate(elapsed, gravity, 0.0)?;
            let center = piece.body.center;
            if center.cmplt(Vec2::ZERO).any() || center.cmpgt(play).any() {
                piece.body.is_visible = false;
                report.events.push(SimEvent::DebrisLost);
            }
        }

        // Deferred removal: destroyed bricks leave the grid, lost debris is dropped
        self.debris.retain(|piece| piece.body.is_visible);
        let (destroyed, standing): (Vec<_>, Vec<_>) = std::mem::take(&mut self.bricks)
            .into_iter()
            .partition(|brick| brick.is_destroyed());
        self.bricks = standing;
        self.debris.extend(destroyed);

        // Paddle contact
        if !self.ball.body.is_static {
            let contact = ball_collision(&self.ball.body, &self.paddle.body);
            if contact.hit {
                let surface = Surface::new(
                    self.config().paddle_restitution,
                    self.config().paddle_friction,
                );
                let impulse = resolve(
                    &mut self.ball.body,
                    radius,
                    &mut self.paddle.body,
                    contact.point,
                    contact.normal,
                    surface,
                );
                if impulse != Vec2::ZERO {
                    report.events.push(SimEvent::PaddleHit);
                }
            }
        }

        self.limit_ball_speed();

        if self.bricks.is_empty() && self.debris.is_empty() {
            self.paused = true;
            report.events.push(SimEvent::LevelCleared);
            log::info!(
                "Level cleared in {:.1}s with score {:.0}",
                self.time,
                self.score
            );
        }

        report.score = self.score;
        Ok(report)
    }

    /// Damp the ball above the speed ceiling and never let it exceed it
    fn limit_ball_speed(&mut self) {
        let ceiling = self.config().speed_ceiling;
        let velocity = self.ball.body.velocity;
        if velocity.length() > ceiling {
            let damped = velocity - self.config().speed_damping * velocity;
            self.ball.body.velocity = damped.clamp_length_max(ceiling);
            log::debug!(
                "Ball speed {:.2} over ceiling, now {:.2}",
                velocity.length(),
                self.ball.body.velocity.length()
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PhysicsConfig;
    use crate::error::PhysicsError;
    use crate::sim::state::WallSide;

    /// One strength-1 brick centered at (50, 25)
    fn single_brick_world() -> World {
        let config = PhysicsConfig {
            brick_rows: 1,
            brick_cols: 1,
            row_strength: vec![1],
            ..Default::default()
        };
        let world = World::new(config).unwrap();
        assert!(
            (world.bricks[0].body.center - Vec2::new(50.0, 25.0)).length() < 1e-5
        );
        world
    }

    /// Ball just below the brick, launched straight up into it
    fn launch_into_brick(world: &mut World) {
        world.ball.body.center = Vec2::new(50.0, 31.0);
        world.ball.body.velocity = Vec2::new(0.0, -16.0);
        world.launch();
    }

    #[test]
    fn test_paused_world_does_not_move() {
        let mut world = World::new(PhysicsConfig::default()).unwrap();
        let before = world.ball.body.clone();
        let report = world.step(0.15).unwrap();
        assert!(!report.advanced);
        assert_eq!(world.ball.body, before);
        assert_eq!(world.elapsed_time(), 0.0);
    }

    #[test]
    fn test_negative_elapsed_rejected() {
        let mut world = World::new(PhysicsConfig::default()).unwrap();
        world.launch();
        let before = world.ball.body.clone();
        assert!(matches!(
            world.step(-0.01),
            Err(PhysicsError::InvalidElapsed(_))
        ));
        assert!(world.step(f32::NAN).is_err());
        assert_eq!(world.ball.body, before);
    }

    #[test]
    fn test_zero_elapsed_step_is_harmless() {
        let mut world = World::new(PhysicsConfig::default()).unwrap();
        world.launch();
        let before = world.ball.body.center;
        let report = world.step(0.0).unwrap();
        assert!(report.advanced);
        assert!(!world.paddle.body.velocity.is_nan());
        assert!((world.ball.body.center - before).length() < 1e-5);
    }

    #[test]
    fn test_single_brick_scores_and_leaves_grid() {
        let mut world = single_brick_world();
        launch_into_brick(&mut world);

        let report = world.step(0.15).unwrap();

        assert_eq!(report.brick_hits(), 1);
        assert_eq!(report.points, 100.0);
        assert_eq!(world.score(), 100.0);
        assert!(world.bricks.is_empty());

        // Ball bounced back down
        assert!(world.ball.body.velocity.y > 0.0);

        // The brick lives on as falling debris
        assert_eq!(world.debris.len(), 1);
        let debris = &world.debris[0];
        assert_eq!(debris.strength(), 0);
        assert!(!debris.body.is_static);
        assert!(debris.body.velocity.y < 0.0);
    }

    #[test]
    fn test_debris_removed_after_falling_out() {
        let mut world = single_brick_world();
        launch_into_brick(&mut world);
        world.step(0.15).unwrap();

        let mut lost = false;
        for _ in 0..1000 {
            let report = world.step(0.15).unwrap();
            // Debris no longer collides or scores
            assert_eq!(report.brick_hits(), 0);
            if report.events.contains(&SimEvent::DebrisLost) {
                lost = true;
                assert!(report.level_cleared());
                break;
            }
            let piece = &world.debris[0];
            assert!(piece.body.center.y <= world.play_area().y);
        }

        assert!(lost);
        assert!(world.debris.is_empty());
        assert!(world.is_paused());
        assert_eq!(world.score(), 100.0);
    }

    #[test]
    fn test_debris_leaving_through_top_clears_level() {
        // Without gravity the struck brick drifts upward forever
        let config = PhysicsConfig {
            brick_rows: 1,
            brick_cols: 1,
            row_strength: vec![1],
            gravity: Vec2::ZERO,
            ..Default::default()
        };
        let mut world = World::new(config).unwrap();
        launch_into_brick(&mut world);
        world.step(0.15).unwrap();
        assert_eq!(world.debris.len(), 1);
        assert!(world.debris[0].body.velocity.y < 0.0);

        let mut cleared = false;
        for _ in 0..1000 {
            let report = world.step(0.15).unwrap();
            if report.level_cleared() {
                assert!(report.events.contains(&SimEvent::DebrisLost));
                cleared = true;
                break;
            }
            assert!(world.debris[0].body.center.y >= 0.0);
        }

        assert!(cleared);
        assert!(world.debris.is_empty());
        assert!(world.is_paused());
    }

    #[test]
    fn test_stronger_brick_survives_hit() {
        let config = PhysicsConfig {
            brick_rows: 1,
            brick_cols: 1,
            row_strength: vec![3],
            ..Default::default()
        };
        let mut world = World::new(config).unwrap();
        launch_into_brick(&mut world);

        let report = world.step(0.15).unwrap();
        assert_eq!(report.brick_hits(), 1);
        assert!((report.points - 100.0 / 3.0).abs() < 1e-4);
        assert_eq!(world.bricks.len(), 1);
        assert_eq!(world.bricks[0].strength(), 2);
        assert!(world.bricks[0].body.is_static);
        assert_eq!(world.bricks[0].body.center, Vec2::new(50.0, 25.0));
    }

    #[test]
    fn test_wall_bounce() {
        let config = PhysicsConfig {
            gravity: Vec2::ZERO,
            ..Default::default()
        };
        let mut world = World::new(config).unwrap();
        world.ball.body.center = Vec2::new(1.0, 60.0);
        world.ball.body.velocity = Vec2::new(-10.0, 0.0);
        world.launch();

        let report = world.step(0.15).unwrap();
        assert!(report.events.contains(&SimEvent::WallBounce(WallSide::Left)));
        // Left wall restitution 0.96
        assert!((world.ball.body.velocity.x - 9.6).abs() < 1e-4);
        assert!(world.ball.body.center.x >= world.ball.radius() - 1e-4);
    }

    #[test]
    fn test_paddle_returns_ball() {
        let config = PhysicsConfig {
            gravity: Vec2::ZERO,
            ..Default::default()
        };
        let mut world = World::new(config).unwrap();
        // Paddle top at 95.5; ball falling onto its middle
        world.ball.body.center = Vec2::new(50.0, 91.5);
        world.ball.body.velocity = Vec2::new(0.0, 10.0);
        world.launch();

        let report = world.step(0.15).unwrap();
        assert!(report.events.contains(&SimEvent::PaddleHit));
        assert!(world.ball.body.velocity.y < 0.0);
    }

    #[test]
    fn test_speed_ceiling_holds_every_step() {
        let mut world = World::new(PhysicsConfig::default()).unwrap();
        world.launch();
        // Start well over the ceiling
        world.ball.body.velocity = Vec2::new(30.0, -40.0);

        for _ in 0..3000 {
            let target = Vec2::new(world.ball.body.center.x, world.play_area().y);
            let input = TickInput {
                paddle_target: Some(target),
                ..Default::default()
            };
            tick(&mut world, &input, 0.15).unwrap();
            assert!(world.ball.body.velocity.length() <= 25.0 + 1e-4);
            assert!(world.ball.body.center.is_finite());
            if world.is_paused() {
                break;
            }
        }
    }

    #[test]
    fn test_score_never_decreases() {
        let mut world = World::new(PhysicsConfig::default()).unwrap();
        world.launch();
        let mut last_score = 0.0;
        for _ in 0..2000 {
            let target = Vec2::new(world.ball.body.center.x, world.play_area().y);
            world.set_paddle_target(target);
            let report = world.step(0.15).unwrap();
            assert!(report.score >= last_score);
            last_score = report.score;
            // Only bricks with strength left stay in the grid
            assert!(world.bricks.iter().all(|b| b.strength() >= 1));
            assert!(world.debris.iter().all(|b| b.is_destroyed()));
            if world.is_paused() {
                break;
            }
        }
    }

    #[test]
    fn test_tick_input_pause_and_launch() {
        let mut world = World::new(PhysicsConfig::default()).unwrap();

        let report = tick(&mut world, &TickInput::default(), 0.15).unwrap();
        assert!(!report.advanced);

        let launch = TickInput {
            launch: true,
            ..Default::default()
        };
        let report = tick(&mut world, &launch, 0.15).unwrap();
        assert!(report.advanced);

        let pause = TickInput {
            pause: true,
            ..Default::default()
        };
        let report = tick(&mut world, &pause, 0.15).unwrap();
        assert!(!report.advanced);
        assert!(world.is_paused());

        // Launch is ignored once the level has started; unpause instead
        tick(&mut world, &launch, 0.15).unwrap();
        assert!(world.is_paused());
        let report = tick(&mut world, &pause, 0.15).unwrap();
        assert!(report.advanced);
    }

    #[test]
    fn test_tick_input_boost() {
        let mut world = World::new(PhysicsConfig::default()).unwrap();
        let boost = TickInput {
            boost: true,
            ..Default::default()
        };
        tick(&mut world, &boost, 0.15).unwrap();
        assert_eq!(world.ball.radius(), 4.0);

        let shrink = TickInput {
            shrink: true,
            ..Default::default()
        };
        tick(&mut world, &shrink, 0.15).unwrap();
        assert_eq!(world.ball.radius(), 3.0);
    }

    #[test]
    fn test_determinism() {
        let config = PhysicsConfig {
            launch_jitter_deg: 15.0,
            seed: 99999,
            ..Default::default()
        };
        let mut world1 = World::new(config.clone()).unwrap();
        let mut world2 = World::new(config).unwrap();

        let inputs = [
            TickInput {
                paddle_target: Some(Vec2::new(40.0, 97.0)),
                ..Default::default()
            },
            TickInput {
                launch: true,
                ..Default::default()
            },
            TickInput {
                paddle_target: Some(Vec2::new(60.0, 92.0)),
                ..Default::default()
            },
            TickInput::default(),
        ];

        for _ in 0..50 {
            for input in &inputs {
                tick(&mut world1, input, 0.15).unwrap();
                tick(&mut world2, input, 0.15).unwrap();
            }
        }

        assert_eq!(world1.score(), world2.score());
        assert_eq!(world1.bricks.len(), world2.bricks.len());
        assert_eq!(world1.ball.body.center, world2.ball.body.center);
        assert_eq!(world1.paddle.body.center, world2.paddle.body.center);
    }
}
