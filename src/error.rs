use thiserror::Error;

use crate::collision::BodyHandle;

/// Errors reported by the simulation core.
///
/// Every variant is recoverable: the world is left untouched when a call
/// returns an error.
#[derive(Debug, Error)]
pub enum PhysicsError {
    /// Mass must be finite and strictly positive
    #[error("invalid mass {0}: must be finite and > 0")]
    InvalidMass(f32),

    /// Radius must be finite and strictly positive
    #[error("invalid radius {0}: must be finite and > 0")]
    InvalidRadius(f32),

    /// Room bounds must satisfy min < max on every axis
    #[error("invalid bounds on {axis} axis: min {min} must be below max {max}")]
    InvalidBounds { axis: char, min: f32, max: f32 },

    /// Fixed time step must be finite and strictly positive
    #[error("invalid fixed time step {0}: must be finite and > 0")]
    InvalidTimeStep(f32),

    /// At least one substep is required per update
    #[error("max substeps must be at least 1")]
    InvalidSubsteps,

    /// Spawn count outside the accepted range
    #[error("invalid count {count}: must be between 1 and {max}")]
    InvalidCount { count: usize, max: usize },

    /// Handle refers to a removed or never-created body
    #[error("body {0} not found")]
    BodyNotFound(BodyHandle),

    /// Ball-only command issued on a plain sphere
    #[error("body {0} is not a ball")]
    NotABall(BodyHandle),

    /// World configuration could not be parsed
    #[error("invalid world config: {0}")]
    Config(#[from] serde_json::Error),
}

/// Result alias used throughout the crate
pub type Result<T> = std::result::Result<T, PhysicsError>;
