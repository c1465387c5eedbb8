//! Physics tuning parameters
//!
//! Every constant the simulation uses is exposed here so a level or a test
//! can override it. Partial JSON files are accepted: missing keys fall back
//! to the defaults in [`crate::consts`].

use std::path::Path;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::{PhysicsError, Result};

/// Restitution of the four level boundaries
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WallRestitution {
    pub left: f32,
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
}

impl Default for WallRestitution {
    fn default() -> Self {
        Self {
            left: WALL_COR_SIDE,
            top: WALL_COR_TOP,
            right: WALL_COR_SIDE,
            bottom: WALL_COR_BOTTOM,
        }
    }
}

/// Simulation configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicsConfig {
    // === World ===
    /// Width and height of the play area
    pub play_area: Vec2,
    /// Acceleration applied to the ball and to falling debris
    pub gravity: Vec2,
    /// Fixed tick length used by drivers that don't measure time
    pub tick_elapsed: f32,
    /// Seed for launch jitter
    pub seed: u64,

    // === Walls ===
    pub wall_restitution: WallRestitution,
    pub wall_friction: f32,

    // === Ball ===
    pub ball_radius: f32,
    pub ball_boost_radius: f32,
    pub ball_mass: f32,
    pub launch_speed: f32,
    pub launch_angle_deg: f32,
    /// Uniform random spread (±degrees) added to the launch angle
    pub launch_jitter_deg: f32,
    pub speed_ceiling: f32,
    pub speed_damping: f32,

    // === Paddle ===
    pub paddle_size: Vec2,
    pub paddle_flare: f32,
    pub paddle_travel: f32,
    /// Tracking blend factor λ in (0, 1]
    pub paddle_damping: f32,
    pub paddle_restitution: f32,
    pub paddle_friction: f32,

    // === Bricks ===
    pub brick_size: Vec2,
    pub brick_mass: f32,
    pub brick_rows: usize,
    pub brick_cols: usize,
    /// Strength per grid row (top first); rows past the end reuse the last entry
    pub row_strength: Vec<u32>,
    pub brick_field_fraction: f32,
    pub brick_restitution: f32,
    pub brick_friction: f32,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            play_area: Vec2::new(PLAY_WIDTH, PLAY_HEIGHT),
            gravity: Vec2::new(0.0, GRAVITY),
            tick_elapsed: DEFAULT_ELAPSED,
            seed: 0,

            wall_restitution: WallRestitution::default(),
            wall_friction: 0.0,

            ball_radius: BALL_RADIUS,
            ball_boost_radius: BALL_BOOST_RADIUS,
            ball_mass: BALL_MASS,
            launch_speed: BALL_LAUNCH_SPEED,
            launch_angle_deg: BALL_LAUNCH_ANGLE_DEG,
            launch_jitter_deg: 0.0,
            speed_ceiling: BALL_SPEED_CEILING,
            speed_damping: BALL_SPEED_DAMPING,

            paddle_size: Vec2::new(PADDLE_WIDTH, PADDLE_HEIGHT),
            paddle_flare: PADDLE_FLARE,
            paddle_travel: PADDLE_TRAVEL,
            paddle_damping: PADDLE_DAMPING,
            paddle_restitution: PADDLE_COR,
            paddle_friction: PADDLE_FRICTION,

            brick_size: Vec2::new(BRICK_WIDTH, BRICK_HEIGHT),
            brick_mass: BRICK_MASS,
            brick_rows: BRICK_ROWS,
            brick_cols: BRICK_COLS,
            row_strength: vec![3, 2, 1],
            brick_field_fraction: BRICK_FIELD_FRACTION,
            brick_restitution: BRICK_COR,
            brick_friction: BRICK_FRICTION,
        }
    }
}

impl PhysicsConfig {
    /// Parse a (possibly partial) JSON document and validate it
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read and validate a JSON tuning file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| PhysicsError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_json(&json)?;
        log::info!("Loaded physics config from {}", path.display());
        Ok(config)
    }

    /// Strength of bricks in grid row `row`
    pub fn strength_for_row(&self, row: usize) -> u32 {
        self.row_strength
            .get(row)
            .or(self.row_strength.last())
            .copied()
            .unwrap_or(1)
    }

    /// Check every parameter; the world refuses to start on failure
    pub fn validate(&self) -> Result<()> {
        positive_vec("play_area", self.play_area)?;
        finite_vec("gravity", self.gravity)?;
        non_negative("tick_elapsed", self.tick_elapsed)?;

        unit_interval("wall_restitution.left", self.wall_restitution.left)?;
        unit_interval("wall_restitution.top", self.wall_restitution.top)?;
        unit_interval("wall_restitution.right", self.wall_restitution.right)?;
        unit_interval("wall_restitution.bottom", self.wall_restitution.bottom)?;
        non_negative("wall_friction", self.wall_friction)?;

        if !(self.ball_radius.is_finite() && self.ball_radius > 0.0) {
            return Err(PhysicsError::InvalidRadius(self.ball_radius));
        }
        if !(self.ball_boost_radius.is_finite() && self.ball_boost_radius > 0.0) {
            return Err(PhysicsError::InvalidRadius(self.ball_boost_radius));
        }
        if !(self.ball_mass.is_finite() && self.ball_mass > 0.0) {
            return Err(PhysicsError::InvalidMass(self.ball_mass));
        }
        non_negative("launch_speed", self.launch_speed)?;
        finite("launch_angle_deg", self.launch_angle_deg)?;
        non_negative("launch_jitter_deg", self.launch_jitter_deg)?;
        positive("speed_ceiling", self.speed_ceiling)?;
        if !(0.0..1.0).contains(&self.speed_damping) {
            return Err(invalid("speed_damping", "must be in [0, 1)"));
        }

        positive_vec("paddle_size", self.paddle_size)?;
        positive("paddle_flare", self.paddle_flare)?;
        non_negative("paddle_travel", self.paddle_travel)?;
        if !(self.paddle_damping > 0.0 && self.paddle_damping <= 1.0) {
            return Err(invalid("paddle_damping", "must be in (0, 1]"));
        }
        unit_interval("paddle_restitution", self.paddle_restitution)?;
        non_negative("paddle_friction", self.paddle_friction)?;

        positive_vec("brick_size", self.brick_size)?;
        if !(self.brick_mass.is_finite() && self.brick_mass > 0.0) {
            return Err(PhysicsError::InvalidMass(self.brick_mass));
        }
        if self.brick_rows == 0 || self.brick_cols == 0 {
            return Err(invalid("brick grid", "needs at least one row and column"));
        }
        if self.row_strength.contains(&0) {
            return Err(invalid("row_strength", "strength must be at least 1"));
        }
        if !(self.brick_field_fraction > 0.0 && self.brick_field_fraction <= 1.0) {
            return Err(invalid("brick_field_fraction", "must be in (0, 1]"));
        }
        unit_interval("brick_restitution", self.brick_restitution)?;
        non_negative("brick_friction", self.brick_friction)?;

        Ok(())
    }
}

fn invalid(name: &str, why: &str) -> PhysicsError {
    PhysicsError::InvalidConfig(format!("{name} {why}"))
}

fn finite(name: &str, value: f32) -> Result<()> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(invalid(name, "must be finite"))
    }
}

fn finite_vec(name: &str, value: Vec2) -> Result<()> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(invalid(name, "must be finite"))
    }
}

fn positive(name: &str, value: f32) -> Result<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(invalid(name, "must be positive"))
    }
}

fn positive_vec(name: &str, value: Vec2) -> Result<()> {
    if value.is_finite() && value.x > 0.0 && value.y > 0.0 {
        Ok(())
    } else {
        Err(invalid(name, "must be positive in both axes"))
    }
}

fn non_negative(name: &str, value: f32) -> Result<()> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(invalid(name, "must be non-negative"))
    }
}

fn unit_interval(name: &str, value: f32) -> Result<()> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(invalid(name, "must be in [0, 1]"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = PhysicsConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.strength_for_row(0), 3);
        assert_eq!(config.strength_for_row(1), 2);
        assert_eq!(config.strength_for_row(7), 1);
    }

    #[test]
    fn test_partial_json_overrides() {
        let config =
            PhysicsConfig::from_json(r#"{ "brick_rows": 2, "speed_ceiling": 30.0 }"#).unwrap();
        assert_eq!(config.brick_rows, 2);
        assert_eq!(config.speed_ceiling, 30.0);
        assert_eq!(config.brick_cols, BRICK_COLS);
        assert_eq!(config.wall_restitution, WallRestitution::default());
    }

    #[test]
    fn test_rejects_bad_restitution() {
        let config = PhysicsConfig {
            brick_restitution: 1.2,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(PhysicsError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_rejects_non_positive_mass() {
        let config = PhysicsConfig {
            ball_mass: 0.0,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(PhysicsError::InvalidMass(_))
        ));
    }

    #[test]
    fn test_rejects_zero_strength_row() {
        let config = PhysicsConfig {
            row_strength: vec![2, 0],
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_malformed_json() {
        assert!(matches!(
            PhysicsConfig::from_json("{ not json"),
            Err(PhysicsError::Parse(_))
        ));
    }

    #[test]
    fn test_empty_row_strength_defaults_to_one() {
        let config = PhysicsConfig {
            row_strength: Vec::new(),
            ..Default::default()
        };
        assert_eq!(config.strength_for_row(4), 1);
    }
}
