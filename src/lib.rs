//! # Ballroom
//!
//! Rigid sphere simulation for a room full of bouncing balls.
//!
//! ## Features
//!
//! - **Fixed-step substepping**: each frame is split into fixed substeps with a
//!   per-frame ceiling
//! - **Sphere collisions**: exhaustive pairwise broadphase, restitution impulses,
//!   and positional correction
//! - **Room boundaries**: six reflecting faces with floor friction
//! - **Balls**: colored spheres the player can hold, carry, drop, and throw
//! - **Reproducible runs**: all randomness comes from a seeded world RNG
//! - **Generation-checked handles**: removed bodies cannot be reached through
//!   old handles
//!
//! ## Quick Start
//!
//! ```rust
//! use ballroom::prelude::*;
//!
//! let mut world = World::new(WorldConfig::default().with_seed(7)).unwrap();
//! let ball = world.create_ball(Vec3::new(0.0, 5.0, 0.0), None).unwrap();
//!
//! for _ in 0..120 {
//!     world.update(1.0 / 60.0);
//! }
//!
//! let pos = world.body(ball).unwrap().position;
//! assert!(pos.y >= 0.25);
//! ```

pub mod collision;
pub mod dynamics;
pub mod error;
pub mod math;
pub mod sandbox;
mod world;

pub use error::{PhysicsError, Result};
pub use world::{BallSnapshot, StepReport, World, WorldConfig};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::collision::{BodyHandle, Resolution, SphereContact, WorldBounds};
    pub use crate::dynamics::{BallState, Body, BodyDesc, BodyKind, DampingMode};
    pub use crate::error::{PhysicsError, Result};
    pub use crate::math::Vec3;
    pub use crate::sandbox::console::{Command, CommandError, Console};
    pub use crate::sandbox::{HandAction, Sandbox};
    pub use crate::world::{BallSnapshot, StepReport, World, WorldConfig};
}
