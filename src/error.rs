//! Error types for the simulation core
//!
//! Physics code paths are total; errors only come from invalid input at the
//! API boundary (bad tick length, bad mass, bad tuning files).

use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum PhysicsError {
    #[error("elapsed time must be finite and non-negative, got {0}")]
    InvalidElapsed(f32),

    #[error("mass must be finite and positive, got {0}")]
    InvalidMass(f32),

    #[error("radius must be finite and positive, got {0}")]
    InvalidRadius(f32),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse configuration: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Result type for simulation operations
pub type Result<T> = std::result::Result<T, PhysicsError>;
